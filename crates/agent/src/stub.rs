use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::llm::{LlmClient, LlmError};

/// In-memory backend that replays a fixed reply. Used for tests and local
/// runs without a model server.
#[derive(Debug)]
pub struct ScriptedLlmClient {
    available: bool,
    reply: Result<String, LlmError>,
    model: String,
    completions: AtomicUsize,
}

impl ScriptedLlmClient {
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            available: true,
            reply: Ok(text.into()),
            model: "scripted".to_string(),
            completions: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: LlmError) -> Self {
        Self { reply: Err(error), ..Self::replying("") }
    }

    pub fn unavailable() -> Self {
        Self { available: false, ..Self::replying("") }
    }

    pub fn completions(&self) -> usize {
        self.completions.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmClient for ScriptedLlmClient {
    async fn complete(&self, _system_prompt: &str, _user_prompt: &str) -> Result<String, LlmError> {
        self.completions.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }

    async fn is_available(&self) -> bool {
        self.available
    }

    fn model(&self) -> &str {
        &self.model
    }
}
