//! Staking aggregation and transaction-drafting engine.
//!
//! A single account may have value staked across several independent
//! mechanisms at once: a nominator pool, the liquid-staking pool, one or
//! more jetton staking pools, and the synthetic-asset yield vault. This
//! crate reconstructs one protocol-agnostic [`StakingState`] per mechanism
//! from on-chain reads plus validated backend metadata, and builds the
//! exact transfer drafts (amounts, destinations, payloads, gas reserves)
//! needed to stake, unstake, or claim.
//!
//! Signing, broadcast and key management are external collaborators,
//! reached through the traits in [`chain`].

pub mod aggregator;
pub mod cache;
pub mod chain;
pub mod common;
pub mod compose;
pub mod draft;
pub mod engine;
pub mod error;
pub mod math;
pub mod rounds;
pub mod state;

pub use aggregator::TokenBalances;
pub use chain::{
    AccountId, AccountRef, AuthCredential, ChainReader, TransferPipeline,
};
pub use common::StakingCommonData;
pub use compose::{LocalActivity, StakingDirection, SubmissionResult};
pub use draft::{
    LiquidUnstakeMode, StakeDraftCheck, TransferDraft, TransferPayload, UnstakeDraftCheck,
};
pub use engine::{EngineOptions, StakingEngine};
pub use error::StakingError;
pub use state::{
    EthenaState, JettonState, LiquidState, NominatorsState, StakingState, YieldKind,
};
