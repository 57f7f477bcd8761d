//! Reference Panel - normal ranges and heart health tips
//!
//! Static content shown under the form. Nothing here touches the pipeline.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReferenceRow {
    /// Layout name of the feature
    pub key: &'static str,
    pub feature: &'static str,
    pub description: &'static str,
    pub normal_range: &'static str,
}

pub static REFERENCE_RANGES: &[ReferenceRow] = &[
    ReferenceRow { key: "age", feature: "Age", description: "Age of the person", normal_range: "20 - 70 years" },
    ReferenceRow { key: "sex", feature: "Sex", description: "Gender of patient", normal_range: "1 = Male, 0 = Female" },
    ReferenceRow {
        key: "cp",
        feature: "cp (Chest Pain Type)",
        description: "0 = Typical Angina, 1 = Atypical Angina, 2 = Non-anginal, 3 = Asymptomatic",
        normal_range: "0–3",
    },
    ReferenceRow { key: "trestbps", feature: "trestbps (Resting BP)", description: "Resting Blood Pressure", normal_range: "90–140 mm Hg" },
    ReferenceRow { key: "chol", feature: "chol (Cholesterol)", description: "Serum Cholesterol", normal_range: "150–250 mg/dl" },
    ReferenceRow { key: "fbs", feature: "fbs (Fasting Sugar)", description: "Fasting Blood Sugar > 120 mg/dl", normal_range: "0 = No, 1 = Yes" },
    ReferenceRow {
        key: "restecg",
        feature: "restecg (ECG Results)",
        description: "0 = Normal, 1 = ST-T Abnormality, 2 = LV Hypertrophy",
        normal_range: "0–2",
    },
    ReferenceRow {
        key: "thalach",
        feature: "thalach (Max Heart Rate)",
        description: "Max heart rate achieved during test",
        normal_range: "100–200 bpm",
    },
    ReferenceRow { key: "exang", feature: "exang (Exercise Angina)", description: "Pain during exercise", normal_range: "0 = No, 1 = Yes" },
    ReferenceRow {
        key: "oldpeak",
        feature: "oldpeak (ST Depression)",
        description: "Depression induced by exercise",
        normal_range: "0–2.5 (Normal)",
    },
    ReferenceRow {
        key: "slope",
        feature: "slope (ST Slope)",
        description: "Slope of peak exercise ST",
        normal_range: "0 = Upsloping, 1 = Flat, 2 = Downsloping",
    },
    ReferenceRow {
        key: "ca",
        feature: "ca (Major Vessels)",
        description: "Number of major vessels colored by fluoroscopy",
        normal_range: "0–3",
    },
    ReferenceRow {
        key: "thal",
        feature: "thal",
        description: "Thalassemia test result",
        normal_range: "0 = Normal, 1 = Fixed Defect, 2 = Reversible",
    },
];

pub static HEALTH_TIPS: &[&str] = &[
    "🥗 Eat balanced, low-cholesterol food regularly",
    "🚶‍♂️ Exercise or walk at least 30 minutes daily",
    "🚭 Avoid smoking and alcohol completely",
    "🧘‍♀️ Practice meditation or yoga for stress relief",
    "💧 Drink plenty of water and get enough sleep",
];

/// Everything the reference panel shows
#[derive(Debug, Clone, Serialize)]
pub struct ReferencePanel {
    pub ranges: &'static [ReferenceRow],
    pub tips: &'static [&'static str],
}

pub fn reference_panel() -> ReferencePanel {
    ReferencePanel {
        ranges: REFERENCE_RANGES,
        tips: HEALTH_TIPS,
    }
}
