//! Process-wide staking common data.
//!
//! One immutable snapshot shared read-only by all accounts, refreshed by
//! an external scheduler and passed explicitly into every aggregation or
//! draft call. Nothing in this crate mutates a snapshot after creation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tonstake_backend::LoyaltyTier;
use tonstake_types::{Timestamp, TokenAmount, TokenSlug, TonAddress};

/// A settlement round. Invariant: `start <= unlock`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Round {
    pub start: Timestamp,
    pub unlock: Timestamp,
}

/// Liquid-staking pool parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LiquidPoolData {
    pub pool: TonAddress,
    /// Slug of the minted share token.
    pub token_slug: TokenSlug,
    /// Master contract of the share token.
    pub token_master: TonAddress,
    /// Share exchange rate, scaled by [`crate::math::RATE_SCALE`].
    pub rate: u64,
    pub previous_round: Round,
    pub current_round: Round,
    /// Pool liquidity available for instant withdrawal.
    pub instant_liquidity: TokenAmount,
    /// Standard-tier APY, percent.
    pub apy: f64,
    /// Preferential APY per loyalty tier, percent.
    pub apy_by_tier: HashMap<LoyaltyTier, f64>,
}

impl LiquidPoolData {
    /// APY for an account's loyalty tier, falling back to the standard
    /// rate for unknown or absent tiers.
    pub fn apy_for(&self, tier: Option<LoyaltyTier>) -> f64 {
        tier.and_then(|t| self.apy_by_tier.get(&t).copied())
            .unwrap_or(self.apy)
    }
}

/// Synthetic-asset vault parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EthenaData {
    pub vault: TonAddress,
    /// Slug of the yield-bearing wrapped token.
    pub token_slug: TokenSlug,
    pub token_master: TonAddress,
    /// Slug and master of the token deposited into the vault.
    pub deposit_token_slug: TokenSlug,
    pub deposit_token_master: TonAddress,
    /// Redemption rate, scaled by [`crate::math::RATE_SCALE`].
    pub rate: u64,
    /// Standard APY, percent.
    pub apy: f64,
    /// APY for accounts that completed verification, percent.
    pub apy_verified: f64,
    /// Maintenance-mode flag; when false the variant is never offered.
    pub enabled: bool,
}

/// One reward emission of a jetton pool.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RewardDistribution {
    /// Reward tokens emitted per day, minor units.
    pub speed_per_day: TokenAmount,
    pub start: Timestamp,
    /// Open-ended when `None`.
    pub end: Option<Timestamp>,
}

impl RewardDistribution {
    pub fn is_active(&self, now: Timestamp) -> bool {
        self.start <= now && self.end.map_or(true, |end| now < end)
    }
}

/// Catalog entry for one jetton staking pool, including the packed
/// on-chain configuration the backend mirrors for us.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JettonPoolConfig {
    pub pool: TonAddress,
    /// Slug of the staked jetton.
    pub token_slug: TokenSlug,
    pub token_master: TonAddress,
    /// Available lock periods, in days.
    pub periods: Vec<u32>,
    /// Total value locked in the pool, minor units of the staked jetton.
    pub tvl: TokenAmount,
    pub rewards: Vec<RewardDistribution>,
}

impl JettonPoolConfig {
    /// Sum of currently-active reward distribution speeds.
    pub fn daily_reward(&self, now: Timestamp) -> TokenAmount {
        self.rewards
            .iter()
            .filter(|r| r.is_active(now))
            .map(|r| r.speed_per_day)
            .sum()
    }

    /// Annualized reward rate in percent, derived from TVL and the active
    /// distribution speeds. Display value only.
    pub fn apr(&self, now: Timestamp) -> f64 {
        if self.tvl.is_zero() {
            return 0.0;
        }
        let daily = self.daily_reward(now);
        daily.raw() as f64 * 365.0 / self.tvl.raw() as f64 * 100.0
    }

    /// Default lock period offered when the account has no active stake.
    pub fn default_period(&self) -> u32 {
        self.periods.first().copied().unwrap_or(0)
    }
}

/// The process-wide staking snapshot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StakingCommonData {
    pub liquid: LiquidPoolData,
    pub ethena: EthenaData,
    pub jetton_pools: Vec<JettonPoolConfig>,
}
