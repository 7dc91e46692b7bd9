use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid quote request: {0}")]
    InvalidRequest(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("generation backend is not available")]
    BackendUnavailable,
    #[error("generation backend timed out")]
    BackendTimeout,
    #[error("generation backend returned status {0}")]
    BackendStatus(u16),
    #[error("generation backend communication failed: {0}")]
    BackendCommunication(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("unprocessable request: {message}")]
    Unprocessable { message: String, correlation_id: String },
    #[error("service unavailable: {message}")]
    ServiceUnavailable { message: String, correlation_id: String },
    #[error("gateway timeout: {message}")]
    GatewayTimeout { message: String, correlation_id: String },
    #[error("internal error: {message}")]
    Internal { message: String, correlation_id: String },
}

impl InterfaceError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Unprocessable { .. } => 422,
            Self::ServiceUnavailable { .. } => 503,
            Self::GatewayTimeout { .. } => 504,
            Self::Internal { .. } => 500,
        }
    }

    /// Text returned to the caller as the error `detail`.
    pub fn message(&self) -> &str {
        match self {
            Self::Unprocessable { message, .. }
            | Self::ServiceUnavailable { message, .. }
            | Self::GatewayTimeout { message, .. }
            | Self::Internal { message, .. } => message,
        }
    }

    pub fn correlation_id(&self) -> &str {
        match self {
            Self::Unprocessable { correlation_id, .. }
            | Self::ServiceUnavailable { correlation_id, .. }
            | Self::GatewayTimeout { correlation_id, .. }
            | Self::Internal { correlation_id, .. } => correlation_id,
        }
    }
}

impl ApplicationError {
    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        let correlation_id = correlation_id.into();
        let mut mapped = InterfaceError::from(self);
        match &mut mapped {
            InterfaceError::Unprocessable { correlation_id: id, .. }
            | InterfaceError::ServiceUnavailable { correlation_id: id, .. }
            | InterfaceError::GatewayTimeout { correlation_id: id, .. }
            | InterfaceError::Internal { correlation_id: id, .. } => *id = correlation_id,
        }
        mapped
    }
}

impl From<ApplicationError> for InterfaceError {
    fn from(value: ApplicationError) -> Self {
        let correlation_id = "unassigned".to_owned();
        match value {
            ApplicationError::Domain(DomainError::InvalidRequest(message)) => {
                Self::Unprocessable { message, correlation_id }
            }
            ApplicationError::BackendUnavailable => Self::ServiceUnavailable {
                message: "AI service (Ollama) is not available. Please try again later."
                    .to_owned(),
                correlation_id,
            },
            ApplicationError::BackendTimeout => Self::GatewayTimeout {
                message: "Request to Ollama timed out. Try again.".to_owned(),
                correlation_id,
            },
            ApplicationError::BackendStatus(status) => {
                Self::Internal { message: format!("Ollama returned status {status}"), correlation_id }
            }
            ApplicationError::BackendCommunication(detail) => Self::Internal {
                message: format!("Error communicating with Ollama: {detail}"),
                correlation_id,
            },
        }
    }
}
