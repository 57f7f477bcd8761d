//! Router tests against an in-memory pipeline

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use heartcheck_core::logic::model::{Classifier, LogisticModel, PipelineError, Scaler};
use heartcheck_core::{FeatureVector, PredictionPipeline};
use serde_json::Value;
use tower::ServiceExt;

use crate::config::Config;
use crate::{create_router, AppState};

const DEFAULT_FORM: &str = "age=30&sex=Male&cp=0&trestbps=120&chol=200&fbs=0&restecg=0\
    &thalach=150&exang=0&oldpeak=1.0&slope=0&ca=0&thal=0";

const SICK_FORM: &str = "age=63&sex=Male&cp=3&trestbps=150&chol=290&fbs=1&restecg=2\
    &thalach=110&exang=1&oldpeak=3.0&slope=2&ca=2&thal=2";

fn fixture_pipeline() -> PredictionPipeline {
    let scaler = Scaler::Standard {
        mean: vec![54.37, 0.68, 0.97, 131.62, 246.26, 0.15, 0.53, 149.65, 0.33, 1.04, 1.40, 0.73, 1.30],
        scale: vec![9.07, 0.47, 1.03, 17.51, 51.75, 0.36, 0.53, 22.87, 0.47, 1.16, 0.62, 1.02, 0.60],
    };
    let model = LogisticModel::new(
        vec![0.42, 0.71, 0.58, 0.31, 0.22, 0.05, 0.18, -0.64, 0.52, 0.61, 0.33, 0.83, 0.49],
        -0.12,
    );
    PredictionPipeline::new(scaler, model)
}

/// Classifier that answers a fixed label
struct FixedLabel(i64);

impl Classifier for FixedLabel {
    fn predict(&self, _vector: &FeatureVector) -> Result<i64, PipelineError> {
        Ok(self.0)
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

fn config(delay_ms: &str) -> Config {
    let delay_ms = delay_ms.to_string();
    Config::from_lookup(move |key| match key {
        "PREDICT_DELAY_MS" => Some(delay_ms.clone()),
        _ => None,
    })
}

fn app_with(pipeline: PredictionPipeline, delay_ms: &str) -> Router {
    create_router(AppState {
        pipeline: Arc::new(pipeline),
        config: config(delay_ms),
    })
}

fn app() -> Router {
    app_with(fixture_pipeline(), "0")
}

fn form_post(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn json_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

// ============================================================================
// HTML FORM
// ============================================================================

#[tokio::test]
async fn test_page_renders_defaults() {
    let response = app().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Heart Disease Prediction App"));
    assert!(html.contains(r#"value="30""#));
    assert!(html.contains("Health Parameter Information and Normal Ranges"));
}

#[tokio::test]
async fn test_form_submit_defaults() {
    let response = app().oneshot(form_post(DEFAULT_FORM)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("No Heart Disease Detected!"));
    assert!(html.contains(r#"class="banner success""#));
}

#[tokio::test]
async fn test_form_submit_keeps_values() {
    let response = app().oneshot(form_post(SICK_FORM)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Please consult a cardiologist as soon as possible."));
    assert!(html.contains(r#"value="63""#));
    assert!(html.contains(r#"value="3.0""#));
}

#[tokio::test]
async fn test_form_out_of_bounds() {
    let body = DEFAULT_FORM.replace("age=30", "age=0");
    let response = app().oneshot(form_post(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let html = body_text(response).await;
    assert!(html.contains(r#"role="alert""#));
    assert!(html.contains("age must be between 1 and 120"));
    assert!(html.contains(r#"value="0""#));
}

#[tokio::test]
async fn test_form_unparsable_value() {
    let body = DEFAULT_FORM.replace("sex=Male", "sex=Unknown");
    let response = app().oneshot(form_post(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains(r#"role="alert""#));
}

#[tokio::test]
async fn test_form_waits_for_delay() {
    let app = app_with(fixture_pipeline(), "50");
    let started = tokio::time::Instant::now();

    let response = app.oneshot(form_post(DEFAULT_FORM)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(started.elapsed() >= std::time::Duration::from_millis(50));
}

#[tokio::test]
async fn test_form_rejects_before_delay() {
    let app = app_with(fixture_pipeline(), "1000");
    let body = DEFAULT_FORM.replace("age=30", "age=0");
    let started = tokio::time::Instant::now();

    let response = app.oneshot(form_post(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(started.elapsed() < std::time::Duration::from_millis(500));
    assert!(body_text(response).await.contains("age must be between 1 and 120"));
}

#[tokio::test]
async fn test_form_unexpected_label() {
    let app = app_with(PredictionPipeline::new(Scaler::Identity, FixedLabel(3)), "0");
    let response = app.oneshot(form_post(DEFAULT_FORM)).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let html = body_text(response).await;
    assert!(html.contains("classifier returned label 3"));
    assert!(!html.contains("Heart Disease Detected!"));
}

// ============================================================================
// JSON API
// ============================================================================

#[tokio::test]
async fn test_api_predict() {
    let body = r#"{"age": 30, "sex": "Male", "cp": 0, "trestbps": 120, "chol": 200, "fbs": 0,
        "restecg": 0, "thalach": 150, "exang": 0, "oldpeak": 1.0, "slope": 0, "ca": 0, "thal": 0}"#;
    let response = app().oneshot(json_post("/api/v1/predict", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["label"], 0);
    assert_eq!(json["diagnosis"], "no_disease");
    assert_eq!(json["engine"], "logistic");
    assert_eq!(json["message"], "You seem to have a healthy heart. Keep it up!");
    assert!(json["request_id"].as_str().unwrap().len() == 36);
}

#[tokio::test]
async fn test_api_predict_ignores_delay() {
    let app = app_with(fixture_pipeline(), "1000");
    let started = tokio::time::Instant::now();

    let response = app.oneshot(json_post("/api/v1/predict", &defaults_json())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(started.elapsed() < std::time::Duration::from_millis(500));
    assert_eq!(body_json(response).await["label"], 0);
}

#[tokio::test]
async fn test_api_predict_rejects_bounds() {
    let body = r#"{"age": 30, "sex": "Female", "cp": 4, "trestbps": 120, "chol": 700, "fbs": 0,
        "restecg": 0, "thalach": 150, "exang": 0, "oldpeak": 1.0, "slope": 0, "ca": 0, "thal": 0}"#;
    let response = app().oneshot(json_post("/api/v1/predict", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["status"], 400);
    assert_eq!(json["error"], "cp must be one of 0, 1, 2, 3; chol must be between 100 and 600");
}

#[tokio::test]
async fn test_api_predict_malformed_body() {
    let response = app().oneshot(json_post("/api/v1/predict", r#"{"age": "old"}"#)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["status"], 400);
}

#[tokio::test]
async fn test_api_unexpected_label() {
    let app = app_with(PredictionPipeline::new(Scaler::Identity, FixedLabel(-1)), "0");
    let response = app.oneshot(json_post("/api/v1/predict", &defaults_json())).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["status"], 500);
    assert!(json["error"].as_str().unwrap().contains("label -1"));
}

fn defaults_json() -> String {
    serde_json::to_string(&heartcheck_core::PatientInput::default()).unwrap()
}

#[tokio::test]
async fn test_model_status_counts() {
    let app = app();

    let response = app.clone().oneshot(json_post("/api/v1/predict", &defaults_json())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(app.oneshot(get("/api/v1/model")).await.unwrap()).await;
    assert_eq!(json["inference_count"], 1);
    assert_eq!(json["failure_count"], 0);
    assert_eq!(json["layout"]["feature_count"], 13);
    assert_eq!(json["classifier"]["engine"], "logistic");
    assert_eq!(json["scaler"]["engine"], "standard");
}

#[tokio::test]
async fn test_reference_and_form_metadata() {
    let reference = body_json(app().oneshot(get("/api/v1/reference")).await.unwrap()).await;
    assert_eq!(reference["ranges"].as_array().unwrap().len(), 13);
    assert_eq!(reference["tips"].as_array().unwrap().len(), 5);

    let form = body_json(app().oneshot(get("/api/v1/form")).await.unwrap()).await;
    assert_eq!(form["fields"].as_array().unwrap().len(), 13);
    assert_eq!(form["fields"][0]["kind"]["widget"], "integer");
    assert_eq!(form["defaults"]["age"], 30);
    assert_eq!(form["defaults"]["sex"], "Male");
}

#[tokio::test]
async fn test_health() {
    let json = body_json(app().oneshot(get("/health")).await.unwrap()).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["engine"], "logistic");
}
