use crate::error::{ApiError, ApiResult};
use crate::AppState;
use axum::{extract::State, Json};
use clinical_rag_common::GroundingRef;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct RagRequest {
    pub query: String,
    #[serde(default, rename = "patientContext")]
    pub patient_context: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct RagResponse {
    pub answer: String,
    pub grounding: Vec<GroundingRef>,
}

/// Retrieval-then-generation over the clinical knowledge base. Retrieval
/// failures degrade to an ungrounded answer; only a generation failure or
/// a malformed request fails the call.
pub async fn rag_handler(
    State(state): State<AppState>,
    Json(payload): Json<RagRequest>,
) -> ApiResult<Json<RagResponse>> {
    if payload.query.trim().is_empty() {
        return Err(ApiError::Validation(
            "query must be a non-empty string".to_string(),
        ));
    }

    let request_id = Uuid::new_v4();
    debug!("[{}] RAG query received ({} chars)", request_id, payload.query.len());

    let results = state.retrieval.retrieve(&payload.query).await;

    let grounded = state
        .orchestrator
        .answer(&payload.query, payload.patient_context.as_ref(), &results)
        .await?;

    info!(
        "[{}] Answered with {} grounding documents",
        request_id,
        grounded.grounding.len()
    );

    Ok(Json(RagResponse {
        answer: grounded.answer,
        grounding: grounded.grounding,
    }))
}
