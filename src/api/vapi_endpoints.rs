use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::api::vapi_dtos::{
    AssistantRequestResponse, ToolCall, ToolCallResult, ToolCallResults, WebhookPayload,
};
use crate::AppState;

const CREATE_ASSISTANT_RESULT: &str = "Assistant created successfully";

/// Why a createAssistant tool call was skipped. Skipped calls contribute no
/// result entry and the platform still gets a 200; tightening that into an
/// explicit error result would need a contract change on the VAPI side.
#[derive(Debug, thiserror::Error)]
enum ToolCallError {
    #[error("customer phone number missing")]
    MissingCallerNumber,
    #[error("assistant description argument missing")]
    MissingDescription,
}

/// Shared-secret guard for the webhook route. Only active when a secret is
/// configured; VAPI sends it back in the `x-vapi-secret` header.
pub async fn validate_vapi_secret(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(secret) = state.vapi_secret.as_deref() else {
        return Ok(next.run(request).await);
    };

    match headers.get("x-vapi-secret").and_then(|v| v.to_str().ok()) {
        Some(value) if value == secret => Ok(next.run(request).await),
        Some(_) => {
            warn!("webhook request with invalid x-vapi-secret");
            Err(StatusCode::UNAUTHORIZED)
        }
        None => {
            warn!("webhook request missing x-vapi-secret header");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}

/// Entry point for every VAPI webhook delivery, dispatching on the event
/// type. Unrecognized types are acknowledged with an empty 200 so new event
/// types on the platform side never break calls.
pub async fn handle_webhook(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Response {
    let event: WebhookPayload = match serde_json::from_value(payload) {
        Ok(event) => event,
        Err(e) => {
            warn!("failed to parse webhook payload: {}", e);
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    match event.get_request_type().as_str() {
        "assistant-request" => handle_assistant_request(&event, &state).await,
        "tool-calls" => handle_tool_calls(&event, &state).await,
        other => {
            info!("ignoring webhook event of type: {}", other);
            StatusCode::OK.into_response()
        }
    }
}

async fn handle_assistant_request(event: &WebhookPayload, state: &Arc<AppState>) -> Response {
    let caller_number = event.get_phone_number().unwrap_or_default();
    info!("received new call from: {}", caller_number);

    match &event.message.call {
        Some(call) => info!("call id: {}", call.id),
        None => warn!("assistant-request event carried no call id"),
    }

    let assistant = state
        .provisioner
        .resolve(&caller_number, &state.vapi_phone_number)
        .await;

    (StatusCode::OK, Json(AssistantRequestResponse { assistant })).into_response()
}

async fn handle_tool_calls(event: &WebhookPayload, state: &Arc<AppState>) -> Response {
    if let Some(tool_calls) = event.get_tool_calls() {
        for tool_call in tool_calls {
            match tool_call.function.name.as_str() {
                "createAssistant" => {
                    match cache_assistant_description(event, tool_call, state).await {
                        Ok(result) => {
                            return (
                                StatusCode::OK,
                                Json(ToolCallResults {
                                    results: vec![result],
                                }),
                            )
                                .into_response();
                        }
                        Err(e) => {
                            error!("skipping createAssistant call {}: {}", tool_call.id, e)
                        }
                    }
                }
                other => info!("ignoring unknown tool call: {}", other),
            }
        }
    }

    StatusCode::OK.into_response()
}

async fn cache_assistant_description(
    event: &WebhookPayload,
    tool_call: &ToolCall,
    state: &Arc<AppState>,
) -> Result<ToolCallResult, ToolCallError> {
    let caller_number = event
        .get_phone_number()
        .ok_or(ToolCallError::MissingCallerNumber)?;
    let description = tool_call
        .function
        .arguments
        .assistant
        .as_deref()
        .ok_or(ToolCallError::MissingDescription)?;

    state.assistant_cache.put(&caller_number, description).await;
    info!("cached assistant description for: {}", caller_number);

    Ok(ToolCallResult {
        tool_call_id: tool_call.id.clone(),
        result: CREATE_ASSISTANT_RESULT.to_string(),
    })
}
