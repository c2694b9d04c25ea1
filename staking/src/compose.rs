//! Submission-result composition.
//!
//! The transfer pipeline returns only a transaction id; the wallet UI
//! additionally needs to render a local activity entry immediately,
//! before the indexer has seen the transaction. The composer attaches
//! that metadata to the raw receipt.

use serde::{Deserialize, Serialize};
use tonstake_types::{TokenAmount, TokenSlug, TonAddress};

use crate::chain::SubmissionReceipt;

/// Direction of a staking action, for activity rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StakingDirection {
    Stake,
    Unstake,
    Claim,
}

/// Wallet-facing metadata for an optimistic local activity entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocalActivity {
    pub destination: TonAddress,
    pub amount: TokenAmount,
    pub token_slug: TokenSlug,
    pub direction: StakingDirection,
}

/// A successful submission, enriched for the caller.
#[derive(Clone, Debug)]
pub struct SubmissionResult {
    pub tx_id: String,
    pub activity: LocalActivity,
}

pub fn compose_submission(
    receipt: SubmissionReceipt,
    destination: TonAddress,
    amount: TokenAmount,
    token_slug: TokenSlug,
    direction: StakingDirection,
) -> SubmissionResult {
    SubmissionResult {
        tx_id: receipt.tx_id,
        activity: LocalActivity {
            destination,
            amount,
            token_slug,
            direction,
        },
    }
}
