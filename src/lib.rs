#![forbid(unsafe_code)]
#![doc = r#"
CPL Chat

Thin HTTP front-end that relays one chat message per request to an Azure OpenAI
deployment and returns the trimmed answer.

Crate highlights
- HTTP server (in `server`): home/chat/admin pages, `/health`, `/versions`, `/static/*`
  and `POST /api/chat`.
- Provider configuration is resolved from the environment on every request.
- Closed error taxonomy (`error::ChatError`) with an explicit status/message mapping.

Modules
- `chat`: the `/api/chat` handler.
- `config`: environment-backed provider configuration.
- `provider`: completion provider trait and the Azure OpenAI client.
- `models`: browser-facing bodies and the Chat Completions wire subset.
- `pages`: embedded HTML pages.
- `util`: tracing, HTTP client, CORS and shared state.
"#]

pub mod chat;
pub mod config;
pub mod error;
pub mod models;
pub mod pages;
pub mod provider;
pub mod server;
pub mod util;

pub use crate::config::{ConfigError, ProviderConfig};
pub use crate::error::ChatError;
pub use crate::provider::{
    AzureOpenAiClient, AzureProviderFactory, CompletionProvider, ProviderError, ProviderFactory,
};
