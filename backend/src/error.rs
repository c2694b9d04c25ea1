use thiserror::Error;
use tonstake_types::TonAddress;

#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend reported a nominator pool we do not recognize. This is
    /// treated as a potential attack on fund routing, never as a soft
    /// failure.
    #[error("backend reported unknown nominator pool {0}")]
    UnknownPool(TonAddress),

    #[error("malformed backend response: {0}")]
    Malformed(String),

    #[error("backend request failed: {0}")]
    Transport(String),
}
