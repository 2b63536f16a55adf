//! `POST /api/chat`: one user message in, one trimmed completion out.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use bytes::Bytes;
use http::HeaderMap;

use crate::config::ProviderConfig;
use crate::error::ChatError;
use crate::models::api::{ChatRequest, ChatResponse};
use crate::models::chat::{ChatCompletionRequest, ChatMessage};
use crate::provider::ProviderError;
use crate::util::AppState;

pub const SYSTEM_PROMPT: &str = "You are a helpful assistant for the CPL course.";
pub const TEMPERATURE: f64 = 0.3;

/// True for `application/json` and `application/*+json`, parameters ignored.
fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(ct) = headers
        .get(http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };
    let mime = ct.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// Build the outbound completion request for a trimmed, non-empty message.
pub fn completion_request(deployment: &str, message: &str) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: deployment.to_string(),
        messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(message)],
        temperature: Some(TEMPERATURE),
    }
}

/// Run one chat turn against the configured provider.
///
/// `message` must already be trimmed. Configuration is resolved here, on every call.
pub async fn complete_turn(state: &AppState, message: &str) -> Result<String, ChatError> {
    if message.is_empty() {
        return Err(ChatError::Validation);
    }

    let config = ProviderConfig::resolve(&state.env)?;
    let provider = state.providers.build(&config)?;

    let request = completion_request(&config.deployment, message);
    let response = provider.complete(&request).await?;
    let content = response.first_content().ok_or(ProviderError::NoChoices)?;

    Ok(content.trim().to_string())
}

pub async fn chat_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ChatResponse>, ChatError> {
    let request = if is_json_content_type(&headers) {
        ChatRequest::from_body(&body)
    } else {
        ChatRequest::default()
    };

    let answer = complete_turn(&state, &request.message).await?;
    tracing::debug!(
        message_chars = request.message.chars().count(),
        answer_chars = answer.chars().count(),
        "chat turn completed"
    );
    Ok(Json(ChatResponse { answer }))
}
