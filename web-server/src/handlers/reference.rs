//! Static reference and form metadata handlers

use axum::Json;
use heartcheck_core::logic::features::FieldSpec;
use heartcheck_core::{reference_panel, PatientInput, ReferencePanel, FORM_FIELDS};
use serde::Serialize;

/// GET /api/v1/reference
pub async fn reference() -> Json<ReferencePanel> {
    Json(reference_panel())
}

#[derive(Serialize)]
pub struct FormResponse {
    fields: &'static [FieldSpec],
    defaults: PatientInput,
}

/// GET /api/v1/form
pub async fn form() -> Json<FormResponse> {
    Json(FormResponse {
        fields: FORM_FIELDS,
        defaults: PatientInput::default(),
    })
}
