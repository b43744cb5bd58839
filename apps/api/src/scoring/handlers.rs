//! Axum route handlers for the FitScore API.

use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        State,
    },
    Form, Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::scoring::engine::FitScoreInput;
use crate::scoring::models::FitScoreResponse;
use crate::state::AppState;

/// HTML form fields. Browsers send unchecked checkboxes as absent and
/// checked ones as `on`.
#[derive(Debug, Deserialize)]
pub struct FitScoreForm {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub collateral: Option<String>,
    #[serde(default)]
    pub use_gpt4: Option<String>,
    #[serde(default)]
    pub openai_api_key: Option<String>,
}

impl From<FitScoreForm> for FitScoreInput {
    fn from(form: FitScoreForm) -> Self {
        Self {
            resume_text: form.resume_text,
            job_description: form.job_description,
            collateral: form.collateral,
            use_gpt4: matches!(form.use_gpt4.as_deref(), Some("on" | "true" | "1")),
            openai_api_key: form.openai_api_key,
        }
    }
}

/// POST /api/v1/fitscore
///
/// Scores one resume against one job description.
pub async fn handle_fitscore(
    State(state): State<AppState>,
    payload: Result<Json<FitScoreInput>, JsonRejection>,
) -> Result<Json<FitScoreResponse>, AppError> {
    let Json(input) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    evaluate(&state, input).await
}

/// POST /api/v1/fitscore/form
///
/// Same as the JSON endpoint, for url-encoded form posts.
pub async fn handle_fitscore_form(
    State(state): State<AppState>,
    payload: Result<Form<FitScoreForm>, FormRejection>,
) -> Result<Json<FitScoreResponse>, AppError> {
    let Form(form) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    evaluate(&state, form.into()).await
}

async fn evaluate(state: &AppState, input: FitScoreInput) -> Result<Json<FitScoreResponse>, AppError> {
    let result = state.engine.evaluate(&input).await?;
    Ok(Json(FitScoreResponse::success(result)))
}
