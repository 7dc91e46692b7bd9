use anclora_core::ApplicationError;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LlmError {
    #[error("generation request timed out")]
    Timeout,
    #[error("generation backend returned status {status}")]
    UpstreamStatus { status: u16 },
    #[error("{0}")]
    Communication(String),
}

impl From<LlmError> for ApplicationError {
    fn from(value: LlmError) -> Self {
        match value {
            LlmError::Timeout => Self::BackendTimeout,
            LlmError::UpstreamStatus { status } => Self::BackendStatus(status),
            LlmError::Communication(detail) => Self::BackendCommunication(detail),
        }
    }
}

/// A text-generation backend. One call, one outcome: implementations must not
/// retry.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String, LlmError>;

    /// Lightweight reachability probe. Never fails; any error reads as `false`.
    async fn is_available(&self) -> bool;

    fn model(&self) -> &str;
}
