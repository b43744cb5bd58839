use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::llm_client::MODEL;
use crate::scoring::aggregator::{DEFAULT_WEIGHTS, SUBMIT_THRESHOLD};
use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "fitscore-api",
        "augmentation_configured": state.config.openai_api_key.is_some(),
    }))
}

/// GET /api-docs
/// Describes the endpoints and an example request.
pub async fn api_docs_handler() -> Json<Value> {
    Json(json!({
        "service": "fitscore-api",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "GET /health": "Service status",
            "GET /api-docs": "This document",
            "POST /api/v1/fitscore": "Score a resume against a job description (JSON body)",
            "POST /api/v1/fitscore/form": "Same as above, url-encoded form body",
        },
        "request": {
            "resume_text": "string, required",
            "job_description": "string, required",
            "collateral": "string, optional additional context about the role or company",
            "use_gpt4": "bool, default true; enables AI augmentation when a key is available",
            "openai_api_key": "string, optional; overrides the server's configured key",
        },
        "example": {
            "resume_text": "Senior Software Engineer at Google (2019 - 2024)\n- Led a team building distributed systems",
            "job_description": "Senior backend engineer for an enterprise SaaS platform. Python, AWS, Kubernetes.",
            "use_gpt4": false,
        },
        "scoring": {
            "weights": DEFAULT_WEIGHTS,
            "submit_threshold": SUBMIT_THRESHOLD,
            "ai_model": MODEL,
        },
    }))
}
