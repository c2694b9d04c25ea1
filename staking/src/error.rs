use thiserror::Error;
use tonstake_backend::BackendError;
use tonstake_types::TokenAmount;

use crate::chain::ChainError;

#[derive(Debug, Error)]
pub enum StakingError {
    /// A zero exchange rate in the common-data snapshot. Rates are
    /// positive for every well-formed snapshot, so this is a
    /// data-integrity fault, not a user error.
    #[error("invalid exchange rate in common data")]
    InvalidRate,

    #[error("amount below the protocol minimum of {minimum}")]
    AmountBelowMinimum { minimum: TokenAmount },

    #[error("arithmetic overflow in rate conversion")]
    Overflow,

    #[error("unknown account {0}")]
    UnknownAccount(String),

    #[error("reward pool wallets not yet discovered; refresh staking states first")]
    MissingRewardWallets,

    #[error("wrapped-token wallet not yet resolved; refresh staking states first")]
    MissingTokenWallet,

    #[error("chain read failed: {0}")]
    ChainRead(String),

    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Failure reported by the transfer pipeline, passed through unchanged.
    #[error("transfer pipeline error: {0}")]
    Submission(String),
}

impl From<ChainError> for StakingError {
    fn from(e: ChainError) -> Self {
        Self::ChainRead(e.to_string())
    }
}
