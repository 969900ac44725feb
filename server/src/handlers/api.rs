//! JSON API handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use parkinson_core::features::{FeatureSpec, LayoutInfo};
use parkinson_core::model::ModelMetadata;
use parkinson_core::detect;
use serde::Serialize;

use crate::models::{feature_schema, PatientForm, PredictResponse};
use crate::{AppResult, AppState};

/// Predict and explain one patient
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PatientForm>, JsonRejection>,
) -> AppResult<Json<PredictResponse>> {
    let Json(form) = payload?;
    let record = form.to_record()?;

    let detection = detect(state.model.ensemble(), &record)?;
    Ok(Json(PredictResponse::from_detection(
        &detection,
        state.config.top_contributions,
    )))
}

#[derive(Serialize)]
pub struct FeaturesResponse {
    pub layout: LayoutInfo,
    pub features: &'static [FeatureSpec],
}

/// Feature schema: names, labels, domains, defaults
pub async fn features() -> Json<FeaturesResponse> {
    Json(FeaturesResponse {
        layout: LayoutInfo::current(),
        features: feature_schema(),
    })
}

/// Metadata of the loaded model
pub async fn model_info(State(state): State<AppState>) -> Json<ModelMetadata> {
    Json(state.model.metadata().clone())
}
