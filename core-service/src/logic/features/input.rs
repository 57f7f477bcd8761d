//! Patient Input - the thirteen bounded form fields
//!
//! `PatientInput` is what the form (or the JSON API) submits. It owns the
//! field bounds, the defaults shown on first render and the mapping into the
//! fixed-order `FeatureVector`.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use super::layout::{feature_index, FEATURE_COUNT};
use super::vector::FeatureVector;

// ============================================================================
// SEX
// ============================================================================

/// Categorical sex field. Encoded as 1 (Male) / 0 (Female).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Sex {
    #[default]
    Male,
    Female,
}

impl Sex {
    /// Numeric code the model was fit on
    pub fn code(self) -> f64 {
        match self {
            Sex::Male => 1.0,
            Sex::Female => 0.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }
}

// ============================================================================
// PATIENT INPUT
// ============================================================================

/// One submission of the form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PatientInput {
    #[validate(range(min = 1, max = 120, message = "age must be between 1 and 120"))]
    pub age: u16,
    pub sex: Sex,
    #[validate(range(max = 3, message = "cp must be one of 0, 1, 2, 3"))]
    pub cp: u8,
    #[validate(range(min = 80, max = 200, message = "trestbps must be between 80 and 200"))]
    pub trestbps: u16,
    #[validate(range(min = 100, max = 600, message = "chol must be between 100 and 600"))]
    pub chol: u16,
    #[validate(range(max = 1, message = "fbs must be 0 or 1"))]
    pub fbs: u8,
    #[validate(range(max = 2, message = "restecg must be one of 0, 1, 2"))]
    pub restecg: u8,
    #[validate(range(min = 60, max = 220, message = "thalach must be between 60 and 220"))]
    pub thalach: u16,
    #[validate(range(max = 1, message = "exang must be 0 or 1"))]
    pub exang: u8,
    #[validate(
        custom(function = "validate_finite"),
        range(min = 0.0, max = 10.0, message = "oldpeak must be between 0.0 and 10.0")
    )]
    pub oldpeak: f64,
    #[validate(range(max = 2, message = "slope must be one of 0, 1, 2"))]
    pub slope: u8,
    #[validate(range(max = 3, message = "ca must be one of 0, 1, 2, 3"))]
    pub ca: u8,
    #[validate(range(max = 2, message = "thal must be one of 0, 1, 2"))]
    pub thal: u8,
}

impl Default for PatientInput {
    fn default() -> Self {
        Self {
            age: 30,
            sex: Sex::Male,
            cp: 0,
            trestbps: 120,
            chol: 200,
            fbs: 0,
            restecg: 0,
            thalach: 150,
            exang: 0,
            oldpeak: 1.0,
            slope: 0,
            ca: 0,
            thal: 0,
        }
    }
}

fn validate_finite(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        let mut err = ValidationError::new("non_finite");
        err.message = Some("oldpeak must be a finite number".into());
        Err(err)
    }
}

impl PatientInput {
    /// Run the field constraints, errors flattened into one message
    pub fn check(&self) -> Result<(), String> {
        self.validate().map_err(|e| describe_errors(&e))
    }

    /// Assemble the raw feature vector in layout order
    pub fn to_feature_vector(&self) -> FeatureVector {
        let values: [f64; FEATURE_COUNT] = [
            f64::from(self.age),
            self.sex.code(),
            f64::from(self.cp),
            f64::from(self.trestbps),
            f64::from(self.chol),
            f64::from(self.fbs),
            f64::from(self.restecg),
            f64::from(self.thalach),
            f64::from(self.exang),
            self.oldpeak,
            f64::from(self.slope),
            f64::from(self.ca),
            f64::from(self.thal),
        ];
        FeatureVector::from_values(values)
    }

    /// Current value of a field as the form displays it
    pub fn field_value(&self, key: &str) -> Option<String> {
        let value = match key {
            "age" => self.age.to_string(),
            "sex" => self.sex.as_str().to_string(),
            "cp" => self.cp.to_string(),
            "trestbps" => self.trestbps.to_string(),
            "chol" => self.chol.to_string(),
            "fbs" => self.fbs.to_string(),
            "restecg" => self.restecg.to_string(),
            "thalach" => self.thalach.to_string(),
            "exang" => self.exang.to_string(),
            "oldpeak" => format_decimal(self.oldpeak),
            "slope" => self.slope.to_string(),
            "ca" => self.ca.to_string(),
            "thal" => self.thal.to_string(),
            _ => return None,
        };
        Some(value)
    }
}

fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// Flatten validation errors into one line, in layout order
pub fn describe_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<(usize, String)> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            let order = feature_index(&field).unwrap_or(FEATURE_COUNT);
            errs.iter()
                .map(|e| {
                    let text = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid ({})", field, e.code));
                    (order, text)
                })
                .collect::<Vec<_>>()
        })
        .collect();

    messages.sort();
    messages
        .into_iter()
        .map(|(_, text)| text)
        .collect::<Vec<_>>()
        .join("; ")
}

// ============================================================================
// FORM FIELD METADATA
// ============================================================================

/// Option of a categorical field
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ChoiceOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Widget kind and bounds of a field
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum FieldKind {
    Integer { min: i64, max: i64 },
    Decimal { min: f64, max: f64, step: f64 },
    Choice { options: &'static [ChoiceOption] },
}

/// Static description of one form field
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    /// 0 = left column, 1 = right column
    pub column: u8,
}

const fn opt(value: &'static str) -> ChoiceOption {
    ChoiceOption { value, label: value }
}

const SEX_OPTIONS: &[ChoiceOption] = &[opt("Male"), opt("Female")];
const BINARY: &[ChoiceOption] = &[opt("0"), opt("1")];
const TERNARY: &[ChoiceOption] = &[opt("0"), opt("1"), opt("2")];
const QUATERNARY: &[ChoiceOption] = &[opt("0"), opt("1"), opt("2"), opt("3")];

/// All form fields in layout order
pub const FORM_FIELDS: &[FieldSpec] = &[
    FieldSpec { key: "age", label: "Age (in years)", kind: FieldKind::Integer { min: 1, max: 120 }, column: 0 },
    FieldSpec { key: "sex", label: "Sex", kind: FieldKind::Choice { options: SEX_OPTIONS }, column: 0 },
    FieldSpec { key: "cp", label: "Chest Pain Type (0-3)", kind: FieldKind::Choice { options: QUATERNARY }, column: 0 },
    FieldSpec { key: "trestbps", label: "Resting Blood Pressure (mm Hg)", kind: FieldKind::Integer { min: 80, max: 200 }, column: 0 },
    FieldSpec { key: "chol", label: "Serum Cholesterol (mg/dl)", kind: FieldKind::Integer { min: 100, max: 600 }, column: 0 },
    FieldSpec { key: "fbs", label: "Fasting Blood Sugar > 120 mg/dl", kind: FieldKind::Choice { options: BINARY }, column: 0 },
    FieldSpec { key: "restecg", label: "Resting ECG Results (0-2)", kind: FieldKind::Choice { options: TERNARY }, column: 0 },
    FieldSpec { key: "thalach", label: "Maximum Heart Rate Achieved", kind: FieldKind::Integer { min: 60, max: 220 }, column: 1 },
    FieldSpec { key: "exang", label: "Exercise Induced Angina (0=No,1=Yes)", kind: FieldKind::Choice { options: BINARY }, column: 1 },
    FieldSpec { key: "oldpeak", label: "ST Depression Induced by Exercise", kind: FieldKind::Decimal { min: 0.0, max: 10.0, step: 0.1 }, column: 1 },
    FieldSpec { key: "slope", label: "Slope of ST Segment (0-2)", kind: FieldKind::Choice { options: TERNARY }, column: 1 },
    FieldSpec { key: "ca", label: "Number of Major Vessels (0-3)", kind: FieldKind::Choice { options: QUATERNARY }, column: 1 },
    FieldSpec { key: "thal", label: "Thal (0=Normal,1=Fixed,2=Reversible)", kind: FieldKind::Choice { options: TERNARY }, column: 1 },
];

/// Fields of one form column
pub fn column_fields(column: u8) -> impl Iterator<Item = &'static FieldSpec> {
    FORM_FIELDS.iter().filter(move |f| f.column == column)
}
