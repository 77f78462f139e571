//! HTTP handlers for the decision log

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::log::{sanitize_url, LogError, LogKind};
use crate::AppState;

/// GET /api/decisions response
#[derive(Debug, Serialize)]
pub struct DecisionsResponse {
    pub success: bool,
    pub keep: Vec<String>,
    pub remove: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
}

/// GET /api/decisions
///
/// Returns every URL in both logs, creating missing logs first.
pub async fn get_decisions(
    State(state): State<AppState>,
) -> Result<Json<DecisionsResponse>, ApiError> {
    let (keep, remove) = tokio::try_join!(
        state.log.read_urls(LogKind::Keep),
        state.log.read_urls(LogKind::Remove)
    )?;

    Ok(Json(DecisionsResponse {
        success: true,
        keep,
        remove,
    }))
}

/// POST /api/decisions
///
/// Body `{profileUrl, decision}` with decision `keep` or `remove`. Validation failures
/// are rejected before any file is touched.
pub async fn post_decision(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Json(body) = payload.map_err(|e| ApiError::Validation(vec![e.body_text()]))?;
    let (url, kind) = validate_decision(&body).map_err(ApiError::Validation)?;

    state.log.append(kind, &url).await?;
    tracing::info!("Logged {} decision for {}", kind.as_str(), url);

    Ok(Json(SuccessResponse { success: true }))
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "tidyli-server".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Check a decision body; returns the sanitized URL and target log, or every problem found
pub fn validate_decision(body: &Value) -> Result<(String, LogKind), Vec<String>> {
    let Some(obj) = body.as_object() else {
        return Err(vec!["Invalid request data".to_string()]);
    };

    let mut errors = Vec::new();

    let url = match obj.get("profileUrl").and_then(Value::as_str) {
        Some(raw) if !sanitize_url(raw).is_empty() => Some(sanitize_url(raw)),
        _ => {
            errors.push("Profile URL is required and must be a string".to_string());
            None
        }
    };

    let kind = match obj.get("decision").and_then(Value::as_str) {
        Some(d) if !d.is_empty() => {
            let kind = LogKind::parse(d);
            if kind.is_none() {
                errors.push("Decision must be either \"keep\" or \"remove\"".to_string());
            }
            kind
        }
        _ => {
            errors.push("Decision is required and must be a string".to_string());
            None
        }
    };

    match (url, kind) {
        (Some(url), Some(kind)) if errors.is_empty() => Ok((url, kind)),
        _ => Err(errors),
    }
}

/// Handler errors; both render as `{"success": false}`
#[derive(Debug)]
pub enum ApiError {
    Validation(Vec<String>),
    Log(LogError),
}

impl From<LogError> for ApiError {
    fn from(e: LogError) -> Self {
        ApiError::Log(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Validation(errors) => {
                tracing::warn!("Rejected decision: {}", errors.join("; "));
                StatusCode::BAD_REQUEST
            }
            ApiError::Log(e) => {
                tracing::error!("Decision log error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "success": false }))).into_response()
    }
}
