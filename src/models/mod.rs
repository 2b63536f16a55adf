//! Data models for the proxy.
//!
//! - `api`: the browser-facing request/response bodies of `/api/chat`.
//! - `chat`: the subset of the Azure OpenAI Chat Completions wire format the proxy sends and reads.

pub mod api;
pub mod chat;

pub use api::{ChatRequest, ChatResponse, ErrorResponse};
pub use chat::{
    AssistantMessage, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Choice, Role,
};
