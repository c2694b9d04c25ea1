//! Validated backend staking state and the raw wire form it is parsed from.

use serde::{Deserialize, Serialize};
use tonstake_types::{Timestamp, TokenAmount, TonAddress};

use crate::error::BackendError;

/// Decimals of the native coin; backend balances are decimal TON strings.
const TONCOIN_DECIMALS: u32 = 9;

/// Which staking mechanism the backend considers active for the account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendStakingType {
    Nominators,
    Liquid,
}

/// Loyalty classification yielding a preferential APY table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoyaltyTier {
    Standard,
    Silver,
    Gold,
    Platinum,
    Diamond,
}

/// Nominator-pool membership as reported by the backend.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NominatorsPoolInfo {
    pub address: TonAddress,
    pub apy: f64,
    pub start: Timestamp,
    pub end: Timestamp,
}

/// Per-account staking metadata, already validated by the trust gate.
///
/// Instances of this type only exist after the allow-list check has
/// passed; code downstream may route funds based on `nominators_pool`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BackendStakingState {
    pub staking_type: BackendStakingType,
    /// Account balance in the active mechanism, minor units.
    pub balance: TokenAmount,
    pub nominators_pool: Option<NominatorsPoolInfo>,
    pub loyalty_tier: Option<LoyaltyTier>,
    /// Synthetic-vault verification flag. `None` means the account has
    /// never completed (or failed) verification.
    pub is_verified: Option<bool>,
    /// Liquid unstake amount already requested and awaiting settlement.
    pub liquid_unstake_amount: TokenAmount,
    pub staked_at: Option<Timestamp>,
    /// Whether the previous liquid round's payout collection is still
    /// executing on chain.
    pub payout_collection_active: bool,
}

// ── Wire form ───────────────────────────────────────────────────────────

/// Raw response body of `GET /staking/state/{address}`.
///
/// Balances are decimal strings; everything here is untrusted until
/// [`validate`] has run.
#[derive(Debug, Deserialize)]
pub(crate) struct RawStakingState {
    #[serde(rename = "type")]
    pub staking_type: BackendStakingType,
    pub balance: String,
    #[serde(default)]
    pub nominators_pool: Option<RawNominatorsPool>,
    #[serde(default)]
    pub loyalty_type: Option<LoyaltyTier>,
    #[serde(default)]
    pub is_verified: Option<bool>,
    #[serde(default)]
    pub liquid_unstake_amount: Option<String>,
    #[serde(default)]
    pub staked_at: Option<u64>,
    #[serde(default)]
    pub payout_collection_active: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawNominatorsPool {
    pub address: String,
    #[serde(default)]
    pub apy: f64,
    pub start: u64,
    pub end: u64,
}

/// Trust gate: turn a raw backend response into a validated state.
///
/// Rejects any nominator pool address outside `allowed_pools` with
/// [`BackendError::UnknownPool`]; that error must never be downgraded.
pub(crate) fn validate(
    raw: RawStakingState,
    allowed_pools: &[TonAddress],
) -> Result<BackendStakingState, BackendError> {
    let nominators_pool = match raw.nominators_pool {
        Some(pool) => {
            let address = TonAddress::new(pool.address);
            if !allowed_pools.contains(&address) {
                tracing::error!(
                    pool = %address,
                    "backend reported a nominator pool outside the allow-list; \
                     rejecting state"
                );
                return Err(BackendError::UnknownPool(address));
            }
            Some(NominatorsPoolInfo {
                address,
                apy: pool.apy,
                start: Timestamp::new(pool.start),
                end: Timestamp::new(pool.end),
            })
        }
        None => None,
    };

    let balance = parse_balance(&raw.balance)?;
    let liquid_unstake_amount = match raw.liquid_unstake_amount.as_deref() {
        Some(text) => parse_balance(text)?,
        None => TokenAmount::ZERO,
    };

    Ok(BackendStakingState {
        staking_type: raw.staking_type,
        balance,
        nominators_pool,
        loyalty_tier: raw.loyalty_type,
        is_verified: raw.is_verified,
        liquid_unstake_amount,
        staked_at: raw.staked_at.map(Timestamp::new),
        payout_collection_active: raw.payout_collection_active,
    })
}

fn parse_balance(text: &str) -> Result<TokenAmount, BackendError> {
    TokenAmount::from_decimal_str(text, TONCOIN_DECIMALS)
        .ok_or_else(|| BackendError::Malformed(format!("bad balance value {text:?}")))
}
