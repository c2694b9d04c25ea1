//! Reconciliation of the local `stakedAt` hint with backend truth.
//!
//! The backend is authoritative but latent; the local hint is immediate
//! but optimistic (stamped the moment a submit succeeds). Merging always
//! takes the maximum so neither source can roll the other back.

use tonstake_types::Timestamp;

/// Merge two stake-time observations, keeping the newer one.
pub fn merge_staked_at(
    local: Option<Timestamp>,
    backend: Option<Timestamp>,
) -> Option<Timestamp> {
    match (local, backend) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (some, None) => some,
        (None, some) => some,
    }
}
