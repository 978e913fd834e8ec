use thiserror::Error;

/// Failure raised by a handler operation.
///
/// The dispatcher hands this back to the caller exactly as the handler produced it.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Collaborator error: {0}")]
    Collaborator(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HandlerError {
    pub fn validation(message: impl Into<String>) -> Self {
        HandlerError::Validation(message.into())
    }

    pub fn precondition(message: impl Into<String>) -> Self {
        HandlerError::Precondition(message.into())
    }

    pub fn collaborator(message: impl Into<String>) -> Self {
        HandlerError::Collaborator(message.into())
    }
}

/// Errors surfaced by the entry point while turning a platform notification into a dispatch
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("Invalid notification: {0}")]
    InvalidNotification(String),

    #[error(transparent)]
    Handler(#[from] HandlerError),
}

impl EntryError {
    pub fn invalid(message: impl Into<String>) -> Self {
        EntryError::InvalidNotification(message.into())
    }
}
