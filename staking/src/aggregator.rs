//! The state aggregator: one unified `StakingState` per protocol variant
//! the account participates in.
//!
//! All protocol-specific on-chain reads fan out concurrently and are
//! joined before returning. A failed read degrades its own variant to a
//! zero/unknown view and never fails the aggregation; only data-integrity
//! faults (bad rate) abort the whole call.

use std::collections::HashMap;

use futures_util::future::join_all;
use tonstake_backend::{BackendStakingState, BackendStakingType};
use tonstake_types::{Network, Timestamp, TokenAmount, TokenSlug, TonAddress};

use crate::cache::merge_staked_at;
use crate::chain::{AccountId, AccountStore, ChainReader, TransferPipeline};
use crate::common::{JettonPoolConfig, StakingCommonData};
use crate::engine::StakingEngine;
use crate::error::StakingError;
use crate::math::{mul_by_rate, RATE_SCALE};
use crate::rounds::{instant_withdrawal_open, nominators_end_with_grace, resolve_unlock_window};
use crate::state::{EthenaState, JettonState, LiquidState, NominatorsState, StakingState};

/// The account's wallet token balances, keyed by slug.
///
/// A slug being present means the wallet tracks that token (the balance
/// may be zero); an absent slug means the balance is known to be zero
/// without any network read.
#[derive(Clone, Debug, Default)]
pub struct TokenBalances(HashMap<TokenSlug, TokenAmount>);

impl TokenBalances {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, slug: TokenSlug, amount: TokenAmount) -> Self {
        self.0.insert(slug, amount);
        self
    }

    pub fn set(&mut self, slug: TokenSlug, amount: TokenAmount) {
        self.0.insert(slug, amount);
    }

    pub fn amount(&self, slug: &TokenSlug) -> TokenAmount {
        self.0.get(slug).copied().unwrap_or(TokenAmount::ZERO)
    }

    /// Whether the wallet tracks this token at all.
    pub fn tracks(&self, slug: &TokenSlug) -> bool {
        self.0.contains_key(slug)
    }
}

impl<R, P, S> StakingEngine<R, P, S>
where
    R: ChainReader,
    P: TransferPipeline,
    S: AccountStore,
{
    /// Build the list of staking states for one account.
    ///
    /// The liquid variant is always present (every account implicitly
    /// participates at zero balance). Nominators appear only when the
    /// backend reports a pool, one jetton variant per pool whose staked
    /// token the account holds, and ethena only when the wallet tracks
    /// the wrapped token and the vault is not in maintenance mode.
    pub async fn get_staking_states(
        &self,
        account: &AccountId,
        common: &StakingCommonData,
        backend: &BackendStakingState,
        balances: &TokenBalances,
        now: Timestamp,
    ) -> Result<Vec<StakingState>, StakingError> {
        let account_ref = self.store.account_ref(account)?;
        let address = &account_ref.address;

        let staked_at = merge_staked_at(self.store.staked_at_hint(account), backend.staked_at);
        let liquid = self.build_liquid_state(common, backend, balances, staked_at, now)?;

        let jetton_futures: Vec<_> = common
            .jetton_pools
            .iter()
            .filter(|pool| !balances.amount(&pool.token_slug).is_zero())
            .map(|pool| self.build_jetton_state(address, pool, now))
            .collect();

        let (nominators, ethena, jettons) = tokio::join!(
            self.build_nominators_state(address, backend),
            self.build_ethena_state(address, account_ref.network, common, backend, balances),
            join_all(jetton_futures),
        );

        let mut states = vec![StakingState::Liquid(liquid)];
        if let Some(state) = nominators {
            states.push(StakingState::Nominators(state));
        }
        states.extend(jettons.into_iter().map(StakingState::Jetton));
        if let Some(state) = ethena? {
            states.push(StakingState::Ethena(state));
        }
        Ok(states)
    }

    /// Liquid staking needs no on-chain read: shares come from the wallet
    /// balance, everything else from the common snapshot and the backend.
    fn build_liquid_state(
        &self,
        common: &StakingCommonData,
        backend: &BackendStakingState,
        balances: &TokenBalances,
        staked_at: Option<Timestamp>,
        now: Timestamp,
    ) -> Result<LiquidState, StakingError> {
        let liquid = &common.liquid;
        let shares = balances.amount(&liquid.token_slug);
        let staked_value = mul_by_rate(shares, liquid.rate)?;
        // Requested funds no longer bear the rate but still count toward
        // the total staked value.
        let balance = staked_value
            .checked_add(backend.liquid_unstake_amount)
            .ok_or(StakingError::Overflow)?;

        let window = resolve_unlock_window(liquid, backend.payout_collection_active, now);
        let open = instant_withdrawal_open(staked_at, now, self.options.simulate_liquid_delay);
        let instant_available = if open {
            liquid.instant_liquidity
        } else {
            TokenAmount::ZERO
        };

        Ok(LiquidState {
            id: "liquid".into(),
            token_slug: TokenSlug::toncoin(),
            balance,
            annual_yield: liquid.apy_for(backend.loyalty_tier),
            unstake_request_amount: backend.liquid_unstake_amount,
            pool: liquid.pool.clone(),
            token_master: liquid.token_master.clone(),
            token_balance: shares,
            rate: liquid.rate,
            instant_available,
            start: window.start,
            end: window.end,
        })
    }

    async fn build_nominators_state(
        &self,
        address: &TonAddress,
        backend: &BackendStakingState,
    ) -> Option<NominatorsState> {
        let pool = backend.nominators_pool.as_ref()?;

        let member = match self.reader.nominator_member(&pool.address, address).await {
            Ok(member) => member,
            Err(e) => {
                tracing::warn!(
                    pool = %pool.address,
                    error = %e,
                    "nominator member read failed; using backend-only view"
                );
                None
            }
        };

        // The backend balance folds in a loyalty bonus we cannot compute
        // locally; the raw on-chain entry is only used while the backend
        // still reports another staking type (mechanism switch in flight).
        let balance = if backend.staking_type == BackendStakingType::Nominators {
            backend.balance
        } else {
            member
                .as_ref()
                .map(|m| m.deposit.saturating_add(m.pending_deposit))
                .unwrap_or(TokenAmount::ZERO)
        };

        // Nominator pools only support full withdrawal requests.
        let unstake_request_amount = if member.as_ref().is_some_and(|m| m.withdraw_requested) {
            balance
        } else {
            TokenAmount::ZERO
        };

        Some(NominatorsState {
            id: "nominators".into(),
            token_slug: TokenSlug::toncoin(),
            balance,
            annual_yield: pool.apy,
            unstake_request_amount,
            pool: pool.address.clone(),
            start: pool.start,
            end: nominators_end_with_grace(pool.end),
        })
    }

    async fn build_jetton_state(
        &self,
        address: &TonAddress,
        pool: &JettonPoolConfig,
        now: Timestamp,
    ) -> JettonState {
        let wallet = match self.reader.stake_wallet_state(&pool.pool, address).await {
            Ok(wallet) => wallet,
            Err(e) => {
                tracing::warn!(
                    pool = %pool.pool,
                    error = %e,
                    "stake wallet read failed; treating stake as zero"
                );
                None
            }
        };

        let (stake_wallet, period, staked, unclaimed_rewards, pool_wallets) = match wallet {
            Some(w) => (
                Some(w.stake_wallet),
                w.period,
                w.staked,
                w.unclaimed_rewards,
                w.pool_wallets,
            ),
            // Undeployed stake wallet: the account never staked here.
            None => (
                None,
                pool.default_period(),
                TokenAmount::ZERO,
                TokenAmount::ZERO,
                Vec::new(),
            ),
        };

        JettonState {
            id: format!("jetton-{}", pool.pool),
            token_slug: pool.token_slug.clone(),
            balance: staked,
            annual_yield: pool.apr(now),
            unstake_request_amount: TokenAmount::ZERO,
            pool: pool.pool.clone(),
            token_master: pool.token_master.clone(),
            stake_wallet,
            unclaimed_rewards,
            pool_wallets,
            tvl: pool.tvl,
            daily_reward: pool.daily_reward(now),
            period,
        }
    }

    async fn build_ethena_state(
        &self,
        address: &TonAddress,
        network: Network,
        common: &StakingCommonData,
        backend: &BackendStakingState,
        balances: &TokenBalances,
    ) -> Result<Option<EthenaState>, StakingError> {
        let ethena = &common.ethena;
        if !ethena.enabled || !balances.tracks(&ethena.token_slug) {
            return Ok(None);
        }

        // Redemption rate is fixed at 1 on test networks.
        let rate = if network.is_testnet() {
            RATE_SCALE
        } else {
            ethena.rate
        };
        let token_balance = balances.amount(&ethena.token_slug);
        let balance = mul_by_rate(token_balance, rate)?;

        let (token_wallet, timelock) = match self
            .reader
            .token_wallet_address(address, &ethena.token_master)
            .await
        {
            Ok(wallet) => {
                let timelock = match self.reader.timelock_state(&wallet).await {
                    Ok(timelock) => timelock,
                    Err(e) => {
                        tracing::warn!(
                            wallet = %wallet,
                            error = %e,
                            "timelock read failed; treating as no pending lock"
                        );
                        None
                    }
                };
                (Some(wallet), timelock)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "wrapped-token wallet resolution failed; degrading ethena view"
                );
                (None, None)
            }
        };
        let unstake_request_amount = timelock
            .as_ref()
            .map(|t| t.locked)
            .unwrap_or(TokenAmount::ZERO);
        let unlock_time = timelock.map(|t| t.unlock_at);

        // Accounts that never went through verification and have nothing
        // staked see the verified rate, so browsing users are not shown
        // an artificially low number.
        let verified = match backend.is_verified {
            Some(flag) => flag,
            None => balance.is_zero(),
        };
        let annual_yield = if verified {
            ethena.apy_verified
        } else {
            ethena.apy
        };

        Ok(Some(EthenaState {
            id: "ethena".into(),
            token_slug: ethena.token_slug.clone(),
            balance,
            annual_yield,
            unstake_request_amount,
            vault: ethena.vault.clone(),
            token_master: ethena.token_master.clone(),
            deposit_token_slug: ethena.deposit_token_slug.clone(),
            deposit_token_master: ethena.deposit_token_master.clone(),
            token_balance,
            rate,
            annual_yield_standard: ethena.apy,
            annual_yield_verified: ethena.apy_verified,
            unlock_time,
            token_wallet,
        }))
    }
}
