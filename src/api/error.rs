use thiserror::Error;

/// Failure of a single PBX call
#[derive(Debug, Error)]
pub enum ApiError {
    /// DNS, TLS, timeout, non-2xx status or an unreadable body
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The PBX answered with a non-zero errcode
    #[error("{message}")]
    Api { code: i64, message: String },

    /// The PBX answered errcode 0 but without the fields the call needs
    #[error("{0}")]
    Malformed(String),
}

/// Coarse classification used when surfacing a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Application,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Transport(_) => ErrorKind::Transport,
            ApiError::Api { .. } | ApiError::Malformed(_) => ErrorKind::Application,
        }
    }
}
