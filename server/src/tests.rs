//! Router tests against the bundled model

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use crate::config::{Config, DashboardLayout};
use crate::{create_router, AppState};

const FORM: &str = "application/x-www-form-urlencoded";

fn app_with(config: Config) -> Router {
    let model = parkinson_core::load_model(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../models/model.json"
    ))
    .unwrap();
    create_router(AppState {
        model: Arc::new(model),
        config,
    })
}

fn app() -> Router {
    app_with(Config::default())
}

fn form_body(overrides: &[(&str, u16)]) -> String {
    parkinson_core::features::FEATURE_SPECS
        .iter()
        .map(|spec| {
            let value = overrides
                .iter()
                .find(|(name, _)| *name == spec.name)
                .map(|(_, v)| *v)
                .unwrap_or(spec.default);
            format!("{}={}", spec.name, value)
        })
        .collect::<Vec<_>>()
        .join("&")
}

const SEVERE: &[(&str, u16)] = &[
    ("UPDRS", 150),
    ("MoCA", 10),
    ("FunctionalAssessment", 2),
    ("Tremor", 1),
    ("Bradykinesia", 1),
    ("PosturalInstability", 1),
];

async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post(app: Router, uri: &str, content_type: &str, body: String) -> (StatusCode, String) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

#[tokio::test]
async fn test_index_shows_form_without_results() {
    let (status, html) = get(app(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Enter Patient Information"));
    assert!(html.contains(r#"name="UPDRS" min="0" max="199" step="1" value="50""#));
    assert!(!html.contains("Prediction Confidence"));
}

#[tokio::test]
async fn test_detect_reference_patient() {
    let (status, html) = post(app(), "/detect", FORM, form_body(&[])).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Negative for Parkinson&#39;s Disease"));
    assert!(html.contains("<p>0.33</p>"));
    assert!(html.contains("<th>Contribution (%)</th>"));
    assert_eq!(html.matches("<tr><td>").count(), 10);
    assert!(html.contains("Top Features Influencing Prediction"));
    assert!(html.contains("<p><strong>Gender:</strong> Male</p>"));
}

#[tokio::test]
async fn test_detect_is_reproducible() {
    let (_, first) = post(app(), "/detect", FORM, form_body(&[])).await;
    let (_, second) = post(app(), "/detect", FORM, form_body(&[])).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_detect_severe_patient_keeps_values() {
    let (status, html) = post(app(), "/detect", FORM, form_body(SEVERE)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Positive for Parkinson&#39;s Disease"));
    assert!(html.contains("<p>0.80</p>"));
    assert!(html.contains(r#"value="150""#));
    assert!(html.contains("<p><strong>Tremor:</strong> Yes</p>"));
}

#[tokio::test]
async fn test_detect_out_of_domain_is_bad_request() {
    let (status, html) = post(app(), "/detect", FORM, form_body(&[("UPDRS", 250)])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(html.contains("400 Bad Request"));
    assert!(!html.contains("Prediction Confidence"));

    let (status, _) = post(app(), "/detect", FORM, form_body(&[("Tremor", 2)])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_detect_malformed_form_is_bad_request() {
    let (status, html) = post(app(), "/detect", FORM, "Age=70&Gender=0".to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!html.contains("Prediction Confidence"));

    let body = form_body(&[]).replace("MoCA=15", "MoCA=12.5");
    let (status, _) = post(app(), "/detect", FORM, body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_sidebar_layout() {
    let config = Config {
        layout: DashboardLayout::Sidebar,
        ..Config::default()
    };
    let (status, html) = post(app_with(config), "/detect", FORM, form_body(&[])).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"<aside class="sidebar">"#));
    assert!(html.contains("Prediction Confidence"));
}

#[tokio::test]
async fn test_top_contributions_setting() {
    let config = Config {
        top_contributions: 3,
        ..Config::default()
    };
    let (_, html) = post(app_with(config), "/detect", FORM, form_body(&[])).await;
    assert_eq!(html.matches("<tr><td>").count(), 3);
}

#[tokio::test]
async fn test_api_predict() {
    let payload = serde_json::json!({
        "Age": 70, "Gender": 0, "FamilyHistoryParkinsons": 0,
        "TraumaticBrainInjury": 0, "UPDRS": 50, "MoCA": 15,
        "FunctionalAssessment": 5, "Tremor": 0, "Rigidity": 0,
        "Bradykinesia": 0, "PosturalInstability": 0, "SpeechProblems": 0,
        "SleepDisorders": 0, "Constipation": 0
    });
    let (status, body) = post(app(), "/api/v1/predict", "application/json", payload.to_string()).await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["label"], 0);
    assert_eq!(json["diagnosis"], "Negative for Parkinson's Disease");
    let probability = json["probability"].as_f64().unwrap();
    assert!((probability - 0.3317).abs() < 1e-3);

    let contributions = json["contributions"].as_array().unwrap();
    assert_eq!(contributions.len(), 10);
    let magnitudes: Vec<f64> = contributions
        .iter()
        .map(|c| c["contribution"].as_f64().unwrap().abs())
        .collect();
    assert!(magnitudes.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn test_api_predict_rejects_invalid_input() {
    let payload = serde_json::json!({ "Age": 20 });
    let (status, body) = post(app(), "/api/v1/predict", "application/json", payload.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], 400);
}

#[tokio::test]
async fn test_api_features() {
    let (status, body) = get(app(), "/api/v1/features").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    let features = json["features"].as_array().unwrap();
    assert_eq!(features.len(), 14);
    assert_eq!(features[0]["name"], "Age");
    assert_eq!(features[0]["domain"]["kind"], "range");
    assert_eq!(features[1]["domain"]["labels"][1], "Female");
    assert_eq!(json["layout"]["feature_count"], 14);
}

#[tokio::test]
async fn test_api_model_and_health() {
    let (status, body) = get(app(), "/api/v1/model").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["model_type"], "random_forest");
    assert_eq!(json["tree_count"], 6);

    let (status, body) = get(app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "healthy");
}
