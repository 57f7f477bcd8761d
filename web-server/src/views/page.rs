//! The prediction page: header, two-column form, result, reference panel

use heartcheck_core::logic::features::input::column_fields;
use heartcheck_core::logic::features::{FieldKind, FieldSpec};
use heartcheck_core::logic::reference::{HEALTH_TIPS, REFERENCE_RANGES};
use heartcheck_core::{PatientInput, Tone, Verdict};

use super::escape;

/// What the prediction section shows
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// First render, nothing submitted yet
    Idle,
    Verdict(Verdict),
    Error(String),
}

const STYLE: &str = r#"
body { font-family: -apple-system, "Segoe UI", Roboto, sans-serif; margin: 0 auto; max-width: 1100px; padding: 1rem 2rem; color: #262730; }
h1 { text-align: center; color: red; }
.lead { text-align: center; font-size: 18px; }
hr { border: none; border-top: 1px solid #e6e6e6; margin: 1.5rem 0; }
.columns { display: flex; gap: 2rem; }
.column { flex: 1; }
.field { display: flex; flex-direction: column; margin-bottom: 1rem; }
.field label { font-size: 14px; margin-bottom: .3rem; }
.field input, .field select { padding: .45rem; border: 1px solid #ccc; border-radius: 6px; font-size: 15px; }
.section { color: #00BFFF; }
button { padding: .5rem 1.2rem; font-size: 16px; border-radius: 6px; border: 1px solid #ccc; background: #fff; cursor: pointer; }
button:disabled { opacity: .6; cursor: wait; }
#busy { display: none; margin-top: 1rem; }
.banner { padding: 1rem; border-radius: 6px; margin-top: 1rem; }
.banner.success { background: #d4edda; color: #155724; }
.banner.error { background: #f8d7da; color: #721c24; }
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid #e6e6e6; padding: .5rem; text-align: left; }
.tips { text-align: center; }
.tips ul { text-align: left; display: inline-block; }
.footer { font-size: 13px; color: gray; text-align: center; }
"#;

const BUSY_SCRIPT: &str = r#"
document.getElementById('predict-form').addEventListener('submit', function () {
  document.getElementById('predict-button').disabled = true;
  document.getElementById('busy').style.display = 'block';
});
"#;

/// Render the full page for the given form values and outcome
pub fn render_page(input: &PatientInput, outcome: &Outcome) -> String {
    let mut html = String::with_capacity(16 * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>Heart Disease Prediction</title>\n");
    html.push_str("<link rel=\"icon\" href=\"data:image/svg+xml,<svg xmlns=%22http://www.w3.org/2000/svg%22 viewBox=%220 0 100 100%22><text y=%22.9em%22 font-size=%2290%22>❤️</text></svg>\">\n");
    html.push_str(&format!("<style>{}</style>\n</head>\n<body>\n", STYLE));

    // Header
    html.push_str("<h1>❤️ Heart Disease Prediction App</h1>\n");
    html.push_str("<p class=\"lead\">Predict your heart condition based on your health details.</p>\n<hr>\n");

    // Form
    html.push_str("<h2>🩺 Enter Your Health Details</h2>\n");
    html.push_str("<form id=\"predict-form\" method=\"post\" action=\"/\">\n<div class=\"columns\">\n");
    for column in 0..2 {
        html.push_str("<div class=\"column\">\n");
        for field in column_fields(column) {
            html.push_str(&render_field(field, input));
        }
        html.push_str("</div>\n");
    }
    html.push_str("</div>\n<hr>\n");

    // Prediction section
    html.push_str("<h3 class=\"section\">🔍 Prediction Section</h3>\n");
    html.push_str("<button id=\"predict-button\" type=\"submit\">🔍 Predict</button>\n");
    html.push_str("<div id=\"busy\">Analyzing your heart condition... ⏳</div>\n</form>\n");
    html.push_str(&render_outcome(outcome));
    html.push_str("<hr>\n");

    html.push_str(&render_reference());
    html.push_str(&format!("<script>{}</script>\n</body>\n</html>\n", BUSY_SCRIPT));
    html
}

fn render_field(field: &FieldSpec, input: &PatientInput) -> String {
    let current = input.field_value(field.key).unwrap_or_default();
    let key = escape(field.key);

    let widget = match field.kind {
        FieldKind::Integer { min, max } => format!(
            "<input type=\"number\" id=\"{key}\" name=\"{key}\" min=\"{min}\" max=\"{max}\" step=\"1\" value=\"{value}\" required>",
            value = escape(&current),
        ),
        FieldKind::Decimal { min, max, step } => format!(
            "<input type=\"number\" id=\"{key}\" name=\"{key}\" min=\"{min:.1}\" max=\"{max:.1}\" step=\"{step}\" value=\"{value}\" required>",
            value = escape(&current),
        ),
        FieldKind::Choice { options } => {
            let mut select = format!("<select id=\"{key}\" name=\"{key}\">");
            for option in options {
                let selected = if option.value == current { " selected" } else { "" };
                select.push_str(&format!(
                    "<option value=\"{}\"{}>{}</option>",
                    escape(option.value),
                    selected,
                    escape(option.label)
                ));
            }
            select.push_str("</select>");
            select
        }
    };

    format!(
        "<div class=\"field\"><label for=\"{key}\">{label}</label>{widget}</div>\n",
        label = escape(field.label),
    )
}

fn render_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Idle => String::new(),
        Outcome::Verdict(verdict) => {
            let class = match verdict.tone {
                Tone::Success => "success",
                Tone::Error => "error",
            };
            format!(
                "<h3>🩸 Prediction Result:</h3>\n<div class=\"banner {}\" role=\"status\"><strong>{}</strong> {}</div>\n",
                class,
                escape(verdict.headline),
                escape(verdict.message)
            )
        }
        Outcome::Error(message) => format!(
            "<div class=\"banner error\" role=\"alert\"><strong>Prediction failed.</strong> {}</div>\n",
            escape(message)
        ),
    }
}

fn render_reference() -> String {
    let mut html = String::from("<h2>📋 Health Parameter Information and Normal Ranges</h2>\n<table>\n");
    html.push_str("<thead><tr><th>Feature</th><th>Description</th><th>Normal Range / Meaning</th></tr></thead>\n<tbody>\n");
    for row in REFERENCE_RANGES {
        html.push_str(&format!(
            "<tr><td><strong>{}</strong></td><td>{}</td><td>{}</td></tr>\n",
            escape(row.feature),
            escape(row.description),
            escape(row.normal_range)
        ));
    }
    html.push_str("</tbody>\n</table>\n<hr>\n");

    html.push_str("<div class=\"tips\">\n<h4>💡 Tips for a Healthy Heart:</h4>\n<ul>\n");
    for tip in HEALTH_TIPS {
        html.push_str(&format!("<li>{}</li>\n", escape(tip)));
    }
    html.push_str("</ul>\n</div>\n");
    html.push_str(&format!(
        "<p class=\"footer\">{} v{}</p>\n",
        heartcheck_core::constants::APP_NAME,
        heartcheck_core::constants::APP_VERSION
    ));
    html
}
