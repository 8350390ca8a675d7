use std::collections::HashMap;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::response::{ApiResponse, ApiResult};
use super::AppState;
use crate::error::ApiError;
use crate::identity::{
    attach_from_attribute, resolve_display_batch, resolve_display_info, resolve_outgoing_label,
    DisplayInfo, Message, MessageKind, User,
};

/// Body of `POST /api/messages/from`
///
/// ```json
/// {
///   "user": { "id": "...", "name": "Ana", "email": "ana@...", "role": "expert" },
///   "kind": "user",
///   "attributes": "{\"inquiry_id\":\"abc\"}"
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct FromLabelRequest {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(flatten)]
    pub kind: MessageKind,
    /// Caller-chosen label, used as-is when present
    #[serde(default)]
    pub from: Option<String>,
    /// Attributes the message will be sent with
    #[serde(default)]
    pub attributes: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct FromLabelResponse {
    pub from: String,
    /// Serialized attributes, `from` included, ready for the provider
    pub attributes: String,
}

#[derive(Debug, Deserialize)]
pub struct DisplayRequest {
    pub message: Message,
    #[serde(default)]
    pub viewer: Option<User>,
}

#[derive(Debug, Deserialize)]
pub struct DisplayBatchRequest {
    pub messages: Vec<Message>,
    #[serde(default)]
    pub viewer: Option<User>,
}

/// POST /api/messages/from - Compute the label for an outgoing message
pub async fn from_label(
    payload: Result<Json<FromLabelRequest>, JsonRejection>,
) -> ApiResult<FromLabelResponse> {
    let Json(request) = payload?;

    let from = resolve_outgoing_label(request.from.as_deref(), request.user.as_ref(), &request.kind);
    let attributes = attach_from_attribute(request.attributes.as_ref(), &from);

    Ok(ApiResponse::success(FromLabelResponse { from, attributes }))
}

/// POST /api/messages/display - Rendering info for one received message
pub async fn display(
    State(state): State<AppState>,
    payload: Result<Json<DisplayRequest>, JsonRejection>,
) -> ApiResult<DisplayInfo> {
    let Json(request) = payload?;

    let info = resolve_display_info(&request.message, request.viewer.as_ref(), &state.config.identity);
    Ok(ApiResponse::success(info))
}

/// POST /api/messages/display/batch - Rendering info for a conversation history
pub async fn display_batch(
    State(state): State<AppState>,
    payload: Result<Json<DisplayBatchRequest>, JsonRejection>,
) -> ApiResult<Vec<DisplayInfo>> {
    let Json(request) = payload?;

    let max = state.config.api.max_batch_messages;
    if request.messages.len() > max {
        let mut field_errors = HashMap::new();
        field_errors.insert(
            "messages".to_string(),
            format!("At most {} messages per request", max),
        );
        return Err(ApiError::validation_error("Too many messages", Some(field_errors)));
    }

    let infos = resolve_display_batch(&request.messages, request.viewer.as_ref(), &state.config.identity);
    tracing::debug!(count = infos.len(), "resolved display batch");
    Ok(ApiResponse::success(infos))
}
