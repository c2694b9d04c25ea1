//! Collaborator seams.
//!
//! Every external capability the engine needs — on-chain contract reads,
//! the account/wallet store, and the generic transfer pipeline — is a
//! trait here. The engine depends only on the traits; production backends
//! and test mocks implement them.

use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tonstake_types::{Network, Timestamp, TokenAmount, TonAddress};

use crate::cache::merge_staked_at;
use crate::draft::TransferDraft;
use crate::error::StakingError;

/// Opaque wallet-level account identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Chain address and network an account identifier resolves to.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccountRef {
    pub address: TonAddress,
    pub network: Network,
}

/// Authentication credential required by the transfer pipeline. Opaque to
/// this crate; the pipeline knows what it means.
#[derive(Clone)]
pub struct AuthCredential(String);

impl AuthCredential {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthCredential(<redacted>)")
    }
}

/// Failure of a single on-chain read. During aggregation these degrade the
/// affected variant to zeros; in draft building they abort the draft.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ChainError(pub String);

/// A nominator pool's member entry for one account.
#[derive(Clone, Debug)]
pub struct NominatorMember {
    pub deposit: TokenAmount,
    pub pending_deposit: TokenAmount,
    pub withdraw_requested: bool,
}

/// Storage of the account's per-pool stake-wallet contract.
#[derive(Clone, Debug)]
pub struct StakeWalletState {
    pub stake_wallet: TonAddress,
    /// Lock period in days this wallet was opened with.
    pub period: u32,
    pub staked: TokenAmount,
    pub unclaimed_rewards: TokenAmount,
    /// Pool wallets of the reward tokens this stake participates in.
    pub pool_wallets: Vec<TonAddress>,
}

/// Time-lock data read from a wrapped-token wallet.
#[derive(Clone, Debug)]
pub struct TimelockState {
    pub locked: TokenAmount,
    pub unlock_at: Timestamp,
}

/// Read-only access to on-chain contract state.
#[allow(async_fn_in_trait)]
pub trait ChainReader: Send + Sync {
    /// The account's entry in a nominator pool's member list, if any.
    async fn nominator_member(
        &self,
        pool: &TonAddress,
        member: &TonAddress,
    ) -> Result<Option<NominatorMember>, ChainError>;

    /// The account's stake wallet in a jetton pool. `Ok(None)` when the
    /// wallet contract has never been deployed (the account never staked
    /// there).
    async fn stake_wallet_state(
        &self,
        pool: &TonAddress,
        owner: &TonAddress,
    ) -> Result<Option<StakeWalletState>, ChainError>;

    /// Time-lock data on a wrapped-token wallet, if a locked withdrawal
    /// is pending.
    async fn timelock_state(
        &self,
        token_wallet: &TonAddress,
    ) -> Result<Option<TimelockState>, ChainError>;

    /// Resolve the owner's token-wallet address for a token master.
    async fn token_wallet_address(
        &self,
        owner: &TonAddress,
        master: &TonAddress,
    ) -> Result<TonAddress, ChainError>;
}

/// Estimate returned by the transfer pipeline for a draft.
#[derive(Clone, Copy, Debug)]
pub struct DraftEstimate {
    /// Incremental network fee, on top of any attached gas reserve.
    pub fee: TokenAmount,
}

/// Raw submission outcome from the transfer pipeline.
#[derive(Clone, Debug)]
pub struct SubmissionReceipt {
    pub tx_id: String,
}

/// The generic transfer pipeline (signing and broadcast live behind it).
#[allow(async_fn_in_trait)]
pub trait TransferPipeline: Send + Sync {
    async fn check_transaction_draft(
        &self,
        account: &AccountId,
        draft: &TransferDraft,
    ) -> Result<DraftEstimate, StakingError>;

    async fn submit_transfer(
        &self,
        account: &AccountId,
        auth: &AuthCredential,
        draft: &TransferDraft,
    ) -> Result<SubmissionReceipt, StakingError>;
}

/// Account resolution plus the small persistent per-account cache.
pub trait AccountStore: Send + Sync {
    fn account_ref(&self, account: &AccountId) -> Result<AccountRef, StakingError>;

    /// Locally recorded stake time, if any.
    fn staked_at_hint(&self, account: &AccountId) -> Option<Timestamp>;

    /// Record an optimistic stake time. Implementations must keep the
    /// maximum of the stored and incoming values, never regressing to an
    /// older timestamp.
    fn record_staked_at(&self, account: &AccountId, at: Timestamp);
}

/// In-memory [`AccountStore`] for tests and simple embedders.
#[derive(Default)]
pub struct MemoryAccountStore {
    accounts: HashMap<AccountId, AccountRef>,
    hints: Mutex<HashMap<AccountId, Timestamp>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(mut self, account: AccountId, account_ref: AccountRef) -> Self {
        self.accounts.insert(account, account_ref);
        self
    }
}

impl AccountStore for MemoryAccountStore {
    fn account_ref(&self, account: &AccountId) -> Result<AccountRef, StakingError> {
        self.accounts
            .get(account)
            .cloned()
            .ok_or_else(|| StakingError::UnknownAccount(account.to_string()))
    }

    fn staked_at_hint(&self, account: &AccountId) -> Option<Timestamp> {
        self.hints
            .lock()
            .expect("staked-at cache poisoned")
            .get(account)
            .copied()
    }

    fn record_staked_at(&self, account: &AccountId, at: Timestamp) {
        let mut hints = self.hints.lock().expect("staked-at cache poisoned");
        let existing = hints.get(account).copied();
        if let Some(merged) = merge_staked_at(existing, Some(at)) {
            hints.insert(account.clone(), merged);
        }
    }
}
