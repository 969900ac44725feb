//! Dashboard handlers - the interactive page and its Detect action

use axum::{
    extract::{rejection::FormRejection, State},
    response::Html,
    Form,
};

use parkinson_core::{detect, FeatureRecord};

use crate::error::PageError;
use crate::models::PatientForm;
use crate::view::DashboardView;
use crate::AppState;

/// Dashboard with every control at its default
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let record = FeatureRecord::defaults();
    Html(
        DashboardView {
            layout: state.config.layout,
            record: &record,
            detection: None,
            top: state.config.top_contributions,
        }
        .render(),
    )
}

/// Detect: validate the submitted form, run the pipeline, render results
pub async fn detect_form(
    State(state): State<AppState>,
    form: Result<Form<PatientForm>, FormRejection>,
) -> Result<Html<String>, PageError> {
    let Form(form) = form?;
    let record = form.to_record()?;

    tracing::debug!(?record, "Detect requested from dashboard");
    let detection = detect(state.model.ensemble(), &record)?;

    Ok(Html(
        DashboardView {
            layout: state.config.layout,
            record: &detection.record,
            detection: Some(&detection),
            top: state.config.top_contributions,
        }
        .render(),
    ))
}
