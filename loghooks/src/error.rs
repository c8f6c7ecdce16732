//! Error types for hook construction and delivery

/// Errors from the hook registry and the built-in hooks.
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    /// No factory is registered under the requested name.
    #[error("hook not exist")]
    NotExists,

    /// A factory received arguments it cannot build a hook from.
    #[error("invalid hook arguments: {0}")]
    InvalidArgs(String),

    /// Decoding hook options from the environment failed.
    #[error(transparent)]
    Decode(#[from] hookconf::DecodeError),

    /// Writing a rotated log file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A webhook request could not be delivered or was rejected.
    #[error("webhook delivery failed: {0}")]
    Delivery(String),
}

impl HookError {
    /// Whether this error means the requested hook is not registered.
    pub fn is_not_exists(&self) -> bool {
        matches!(self, Self::NotExists)
    }
}
