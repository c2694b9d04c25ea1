//! The unified per-protocol staking state.
//!
//! One variant per staking mechanism the account participates in. States
//! are pure projections of a common-data snapshot, backend metadata and
//! on-chain reads; they are recomputed on every query and never mutated
//! in place. Every consumer matches the enum exhaustively, so adding a
//! variant without updating the draft builder or the APR logic fails to
//! compile.

use serde::{Deserialize, Serialize};
use tonstake_types::{Timestamp, TokenAmount, TokenSlug, TonAddress};

/// Whether an annual yield value compounds (APY) or not (APR).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YieldKind {
    Apy,
    Apr,
}

/// Direct nominator-pool position.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NominatorsState {
    pub id: String,
    pub token_slug: TokenSlug,
    /// Staked balance in display units (includes the loyalty bonus the
    /// backend folds in).
    pub balance: TokenAmount,
    pub annual_yield: f64,
    /// Full balance when a withdrawal was requested, zero otherwise;
    /// nominator pools do not support partial withdrawal requests.
    pub unstake_request_amount: TokenAmount,
    pub pool: TonAddress,
    pub start: Timestamp,
    /// Round end, inclusive of the withdrawal grace period.
    pub end: Timestamp,
}

/// Liquid-staking position.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LiquidState {
    pub id: String,
    pub token_slug: TokenSlug,
    /// Display value: shares at the current rate plus any pending
    /// unstake request.
    pub balance: TokenAmount,
    pub annual_yield: f64,
    pub unstake_request_amount: TokenAmount,
    pub pool: TonAddress,
    pub token_master: TonAddress,
    /// Raw share-token balance, excluding already-requested funds.
    pub token_balance: TokenAmount,
    /// Share exchange rate this projection was computed with.
    pub rate: u64,
    /// Ceiling for instant withdrawal; zero while the deposit is still in
    /// its validation period or the pool has no liquidity.
    pub instant_available: TokenAmount,
    pub start: Timestamp,
    pub end: Timestamp,
}

/// Jetton staking-pool position.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JettonState {
    pub id: String,
    pub token_slug: TokenSlug,
    pub balance: TokenAmount,
    /// APR derived from pool TVL and active reward distributions.
    pub annual_yield: f64,
    pub unstake_request_amount: TokenAmount,
    pub pool: TonAddress,
    pub token_master: TonAddress,
    /// The account's per-pool stake wallet, once discovered on chain.
    pub stake_wallet: Option<TonAddress>,
    pub unclaimed_rewards: TokenAmount,
    /// Reward-token pool wallets discovered during aggregation; required
    /// for claiming.
    pub pool_wallets: Vec<TonAddress>,
    pub tvl: TokenAmount,
    pub daily_reward: TokenAmount,
    /// Lock period in days.
    pub period: u32,
}

/// Synthetic-asset vault position.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EthenaState {
    pub id: String,
    pub token_slug: TokenSlug,
    /// Wrapped-token balance at the current redemption rate.
    pub balance: TokenAmount,
    /// The yield currently displayed (standard or verified tier).
    pub annual_yield: f64,
    pub unstake_request_amount: TokenAmount,
    pub vault: TonAddress,
    pub token_master: TonAddress,
    pub deposit_token_slug: TokenSlug,
    pub deposit_token_master: TonAddress,
    /// Raw wrapped-token balance.
    pub token_balance: TokenAmount,
    /// Redemption rate this projection was computed with.
    pub rate: u64,
    pub annual_yield_standard: f64,
    pub annual_yield_verified: f64,
    /// Expiry of the time-locked withdrawal, when one is pending.
    pub unlock_time: Option<Timestamp>,
    /// The account's wrapped-token wallet, once resolved on chain.
    pub token_wallet: Option<TonAddress>,
}

/// A staking position in exactly one protocol variant.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StakingState {
    Nominators(NominatorsState),
    Liquid(LiquidState),
    Jetton(JettonState),
    Ethena(EthenaState),
}

impl StakingState {
    pub fn id(&self) -> &str {
        match self {
            Self::Nominators(s) => &s.id,
            Self::Liquid(s) => &s.id,
            Self::Jetton(s) => &s.id,
            Self::Ethena(s) => &s.id,
        }
    }

    pub fn token_slug(&self) -> &TokenSlug {
        match self {
            Self::Nominators(s) => &s.token_slug,
            Self::Liquid(s) => &s.token_slug,
            Self::Jetton(s) => &s.token_slug,
            Self::Ethena(s) => &s.token_slug,
        }
    }

    /// Staked balance in display units.
    pub fn balance(&self) -> TokenAmount {
        match self {
            Self::Nominators(s) => s.balance,
            Self::Liquid(s) => s.balance,
            Self::Jetton(s) => s.balance,
            Self::Ethena(s) => s.balance,
        }
    }

    pub fn annual_yield(&self) -> f64 {
        match self {
            Self::Nominators(s) => s.annual_yield,
            Self::Liquid(s) => s.annual_yield,
            Self::Jetton(s) => s.annual_yield,
            Self::Ethena(s) => s.annual_yield,
        }
    }

    pub fn yield_kind(&self) -> YieldKind {
        match self {
            Self::Nominators(_) | Self::Liquid(_) | Self::Ethena(_) => YieldKind::Apy,
            Self::Jetton(_) => YieldKind::Apr,
        }
    }

    /// Amount already pending withdrawal.
    pub fn unstake_request_amount(&self) -> TokenAmount {
        match self {
            Self::Nominators(s) => s.unstake_request_amount,
            Self::Liquid(s) => s.unstake_request_amount,
            Self::Jetton(s) => s.unstake_request_amount,
            Self::Ethena(s) => s.unstake_request_amount,
        }
    }
}
