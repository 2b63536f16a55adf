use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cpl_chat::config::{ConfigError, ProviderConfig};
use cpl_chat::models::chat::{ChatCompletionRequest, ChatCompletionResponse};
use cpl_chat::provider::{CompletionProvider, ProviderError, ProviderFactory};

/// What the stub provider answers with.
#[derive(Clone)]
pub enum StubReply {
    /// One choice with the given content (`None` = JSON null).
    Content(Option<String>),
    /// A response with an empty `choices` array.
    NoChoices,
    /// Fail with an upstream HTTP status and body.
    Status { status: u16, body: String },
    /// Fail at the transport level.
    Connection(String),
    /// Refuse to build a client at all.
    InitFailure { kind: &'static str, detail: String },
}

/// Provider factory that records every configuration and request it sees.
#[derive(Clone)]
pub struct StubProvider {
    reply: StubReply,
    builds: Arc<AtomicUsize>,
    configs: Arc<Mutex<Vec<ProviderConfig>>>,
    requests: Arc<Mutex<Vec<ChatCompletionRequest>>>,
}

impl StubProvider {
    pub fn new(reply: StubReply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            builds: Arc::new(AtomicUsize::new(0)),
            configs: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        })
    }

    pub fn answering(text: &str) -> Arc<Self> {
        Self::new(StubReply::Content(Some(text.to_string())))
    }

    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }

    pub fn take_configs(&self) -> Vec<ProviderConfig> {
        let mut guard = self.configs.lock().expect("lock stub configs");
        guard.drain(..).collect()
    }

    pub fn take_requests(&self) -> Vec<ChatCompletionRequest> {
        let mut guard = self.requests.lock().expect("lock stub requests");
        guard.drain(..).collect()
    }
}

impl ProviderFactory for StubProvider {
    fn build(&self, config: &ProviderConfig) -> Result<Arc<dyn CompletionProvider>, ConfigError> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut guard) = self.configs.lock() {
            guard.push(config.clone());
        }
        if let StubReply::InitFailure { kind, detail } = &self.reply {
            return Err(ConfigError::ClientInit {
                kind: *kind,
                detail: detail.clone(),
            });
        }
        Ok(Arc::new(self.clone()))
    }
}

#[async_trait]
impl CompletionProvider for StubProvider {
    async fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ProviderError> {
        if let Ok(mut guard) = self.requests.lock() {
            guard.push(request.clone());
        }
        match &self.reply {
            StubReply::Content(content) => Ok(serde_json::from_value(serde_json::json!({
                "id": "chatcmpl-stub",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": content},
                    "finish_reason": "stop"
                }]
            }))
            .expect("stub response")),
            StubReply::NoChoices => Ok(ChatCompletionResponse::default()),
            StubReply::Status { status, body } => Err(ProviderError::Status {
                status: http::StatusCode::from_u16(*status).expect("valid status"),
                body: body.clone(),
            }),
            StubReply::Connection(msg) => Err(ProviderError::Connection(msg.clone())),
            StubReply::InitFailure { .. } => unreachable!("build fails first"),
        }
    }
}
