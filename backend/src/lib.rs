//! Client for the off-chain staking metadata backend.
//!
//! The backend is an indexer service that knows things the chain alone
//! cannot tell us cheaply (nominator-pool membership, loyalty tiers,
//! payout-collection status). It is *not* trusted: every response passes
//! through the trust gate in [`state`] before the rest of the engine can
//! see it, and a nominator pool address outside the configured allow-list
//! aborts the fetch outright.

pub mod client;
pub mod error;
pub mod state;

pub use client::{BackendClient, BackendConfig};
pub use error::BackendError;
pub use state::{
    BackendStakingState, BackendStakingType, LoyaltyTier, NominatorsPoolInfo,
};
