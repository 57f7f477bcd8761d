//! Verdict - maps the binary label to the user-facing outcome

use serde::{Deserialize, Serialize};

use super::model::PipelineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Diagnosis {
    NoDisease,
    DiseaseLikely,
}

/// How the banner is styled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Success,
    Error,
}

impl Diagnosis {
    /// Only 0 and 1 are verdicts; anything else is a model problem
    pub fn from_label(label: i64) -> Result<Self, PipelineError> {
        match label {
            0 => Ok(Diagnosis::NoDisease),
            1 => Ok(Diagnosis::DiseaseLikely),
            other => Err(PipelineError::UnexpectedLabel(other)),
        }
    }

    pub fn label(self) -> u8 {
        match self {
            Diagnosis::NoDisease => 0,
            Diagnosis::DiseaseLikely => 1,
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            Diagnosis::NoDisease => "💚 No Heart Disease Detected!",
            Diagnosis::DiseaseLikely => "💔 Heart Disease Detected!",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Diagnosis::NoDisease => "You seem to have a healthy heart. Keep it up!",
            Diagnosis::DiseaseLikely => "Please consult a cardiologist as soon as possible.",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            Diagnosis::NoDisease => Tone::Success,
            Diagnosis::DiseaseLikely => Tone::Error,
        }
    }

    pub fn verdict(self) -> Verdict {
        Verdict {
            diagnosis: self,
            headline: self.headline(),
            message: self.message(),
            tone: self.tone(),
        }
    }
}

/// Rendered outcome of one prediction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub diagnosis: Diagnosis,
    pub headline: &'static str,
    pub message: &'static str,
    pub tone: Tone,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label() {
        assert_eq!(Diagnosis::from_label(0).unwrap(), Diagnosis::NoDisease);
        assert_eq!(Diagnosis::from_label(1).unwrap(), Diagnosis::DiseaseLikely);
        assert_eq!(Diagnosis::from_label(2).unwrap_err(), PipelineError::UnexpectedLabel(2));
        assert_eq!(Diagnosis::from_label(-1).unwrap_err(), PipelineError::UnexpectedLabel(-1));
    }

    #[test]
    fn test_label_roundtrip() {
        for label in [0, 1] {
            assert_eq!(i64::from(Diagnosis::from_label(label).unwrap().label()), label);
        }
    }

    #[test]
    fn test_rendering_is_fixed_per_label() {
        let sick = Diagnosis::DiseaseLikely.verdict();
        assert_eq!(sick.tone, Tone::Error);
        assert!(sick.headline.contains("Heart Disease Detected!"));
        assert_eq!(sick.message, "Please consult a cardiologist as soon as possible.");

        let healthy = Diagnosis::NoDisease.verdict();
        assert_eq!(healthy.tone, Tone::Success);
        assert!(healthy.headline.contains("No Heart Disease Detected!"));
        assert_eq!(healthy.message, "You seem to have a healthy heart. Keep it up!");

        assert_eq!(Diagnosis::NoDisease.verdict(), healthy);
    }

    #[test]
    fn test_serialized_names() {
        let json = serde_json::to_string(&Diagnosis::DiseaseLikely.verdict()).unwrap();
        assert!(json.contains(r#""diagnosis":"disease_likely""#));
        assert!(json.contains(r#""tone":"error""#));
    }
}
