//! Transaction-draft building for stake, unstake and claim.
//!
//! A draft describes one outgoing transfer: destination, native attach
//! amount, optional token-transfer fields and an optional structured
//! payload. Drafts are checked through the transfer pipeline for a fee
//! estimate, then submitted with an auth credential. Nothing here signs
//! or broadcasts; that lives behind [`crate::chain::TransferPipeline`].

use serde::{Deserialize, Serialize};
use tonstake_types::{Timestamp, TokenAmount, TokenSlug, TonAddress};

use crate::chain::{AccountId, AccountStore, AuthCredential, ChainReader, TransferPipeline};
use crate::compose::{compose_submission, StakingDirection, SubmissionResult};
use crate::engine::StakingEngine;
use crate::error::StakingError;
use crate::math::div_by_rate;
use crate::state::{EthenaState, JettonState, LiquidState, StakingState};

pub const ONE_TON: TokenAmount = TokenAmount::new(1_000_000_000);

/// The nominators stake reserve doubles as the protocol minimum.
pub const NOMINATORS_MIN_STAKE: TokenAmount = ONE_TON;
const NOMINATORS_RESERVE: TokenAmount = ONE_TON;
const LIQUID_RESERVE: TokenAmount = ONE_TON;
const JETTON_STAKE_GAS: TokenAmount = TokenAmount::new(300_000_000);
const JETTON_STAKE_FORWARD: TokenAmount = TokenAmount::new(250_000_000);
const JETTON_UNSTAKE_GAS: TokenAmount = TokenAmount::new(300_000_000);
const JETTON_CLAIM_GAS: TokenAmount = TokenAmount::new(300_000_000);
const ETHENA_STAKE_GAS: TokenAmount = TokenAmount::new(200_000_000);
const ETHENA_STAKE_FORWARD: TokenAmount = TokenAmount::new(100_000_000);
const ETHENA_UNSTAKE_GAS: TokenAmount = TokenAmount::new(200_000_000);
const ETHENA_LOCKED_UNSTAKE_GAS: TokenAmount = TokenAmount::new(300_000_000);

/// Structured payload attached to a transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransferPayload {
    /// Plain text comment; pool contracts dispatch on it.
    Comment(String),
    LiquidWithdrawal {
        token_amount: TokenAmount,
        wait_till_round_end: bool,
        fill_or_kill: bool,
    },
    JettonStake {
        /// Lock period in days.
        period: u32,
    },
    JettonUnstake {
        token_amount: TokenAmount,
    },
    JettonClaim {
        pool_wallets: Vec<TonAddress>,
    },
    VaultRedeem {
        token_amount: TokenAmount,
    },
    TimeLockedWithdrawal,
}

/// One outgoing transfer, ready for fee estimation or submission.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransferDraft {
    pub destination: TonAddress,
    /// Native coin to attach (the transfer value plus any gas reserve).
    pub amount: TokenAmount,
    /// Set for token transfers; the pipeline routes through the sender's
    /// token wallet for this master.
    pub token_master: Option<TonAddress>,
    /// Token units to transfer, when `token_master` is set.
    pub token_amount: Option<TokenAmount>,
    /// Forward-amount hint for the receiving contract.
    pub forward_amount: Option<TokenAmount>,
    pub payload: Option<TransferPayload>,
}

impl TransferDraft {
    fn native(destination: TonAddress, amount: TokenAmount, payload: TransferPayload) -> Self {
        Self {
            destination,
            amount,
            token_master: None,
            token_amount: None,
            forward_amount: None,
            payload: Some(payload),
        }
    }
}

/// Outcome of a stake draft check.
#[derive(Clone, Debug)]
pub struct StakeDraftCheck {
    /// Gas reserve plus the pipeline's network-fee estimate.
    pub fee: TokenAmount,
    pub draft: TransferDraft,
}

/// Outcome of an unstake draft check.
#[derive(Clone, Debug)]
pub struct UnstakeDraftCheck {
    pub fee: TokenAmount,
    /// The resolved amount in token units (after any rate conversion).
    pub token_amount: TokenAmount,
    pub draft: TransferDraft,
}

/// Liquid withdrawal modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LiquidUnstakeMode {
    /// Pay out as soon as liquidity allows.
    Default,
    /// Wait for the round end and the settled rate.
    BestRate,
    /// Immediate fill-or-kill against pool liquidity.
    Instant,
}

impl<R, P, S> StakingEngine<R, P, S>
where
    R: ChainReader,
    P: TransferPipeline,
    S: AccountStore,
{
    pub async fn check_stake_draft(
        &self,
        account: &AccountId,
        state: &StakingState,
        amount: TokenAmount,
    ) -> Result<StakeDraftCheck, StakingError> {
        let (draft, reserve) = build_stake_draft(state, amount)?;
        let estimate = self.pipeline.check_transaction_draft(account, &draft).await?;
        let fee = reserve
            .checked_add(estimate.fee)
            .ok_or(StakingError::Overflow)?;
        Ok(StakeDraftCheck { fee, draft })
    }

    pub async fn submit_stake(
        &self,
        account: &AccountId,
        auth: &AuthCredential,
        state: &StakingState,
        amount: TokenAmount,
    ) -> Result<SubmissionResult, StakingError> {
        let (draft, _) = build_stake_draft(state, amount)?;
        let receipt = self.pipeline.submit_transfer(account, auth, &draft).await?;
        self.store.record_staked_at(account, Timestamp::now());
        Ok(compose_submission(
            receipt,
            draft.destination,
            amount,
            stake_token_slug(state),
            StakingDirection::Stake,
        ))
    }

    pub async fn check_unstake_draft(
        &self,
        account: &AccountId,
        state: &StakingState,
        amount: TokenAmount,
    ) -> Result<UnstakeDraftCheck, StakingError> {
        let (draft, token_amount, reserve) = self
            .build_unstake_draft(account, state, amount, None)
            .await?;
        let estimate = self.pipeline.check_transaction_draft(account, &draft).await?;
        let fee = reserve
            .checked_add(estimate.fee)
            .ok_or(StakingError::Overflow)?;
        Ok(UnstakeDraftCheck {
            fee,
            token_amount,
            draft,
        })
    }

    /// Submit a withdrawal. For liquid staking the mode is picked
    /// automatically: best-rate while instant liquidity is unavailable,
    /// default otherwise.
    pub async fn submit_unstake(
        &self,
        account: &AccountId,
        auth: &AuthCredential,
        state: &StakingState,
        amount: TokenAmount,
    ) -> Result<SubmissionResult, StakingError> {
        self.submit_unstake_inner(account, auth, state, amount, None)
            .await
    }

    /// Submit a fill-or-kill instant liquid withdrawal. The transfer
    /// bounces instead of queueing when pool liquidity is insufficient.
    pub async fn submit_unstake_instant(
        &self,
        account: &AccountId,
        auth: &AuthCredential,
        state: &LiquidState,
        amount: TokenAmount,
    ) -> Result<SubmissionResult, StakingError> {
        self.submit_unstake_inner(
            account,
            auth,
            &StakingState::Liquid(state.clone()),
            amount,
            Some(LiquidUnstakeMode::Instant),
        )
        .await
    }

    async fn submit_unstake_inner(
        &self,
        account: &AccountId,
        auth: &AuthCredential,
        state: &StakingState,
        amount: TokenAmount,
        mode: Option<LiquidUnstakeMode>,
    ) -> Result<SubmissionResult, StakingError> {
        let (draft, _, _) = self
            .build_unstake_draft(account, state, amount, mode)
            .await?;
        let receipt = self.pipeline.submit_transfer(account, auth, &draft).await?;
        self.store.record_staked_at(account, Timestamp::now());
        Ok(compose_submission(
            receipt,
            draft.destination,
            amount,
            state.token_slug().clone(),
            StakingDirection::Unstake,
        ))
    }

    /// Claim accrued jetton-pool rewards. Requires the pool wallets
    /// discovered during aggregation.
    pub async fn submit_token_staking_claim(
        &self,
        account: &AccountId,
        auth: &AuthCredential,
        state: &JettonState,
    ) -> Result<SubmissionResult, StakingError> {
        let stake_wallet = state
            .stake_wallet
            .clone()
            .ok_or(StakingError::MissingTokenWallet)?;
        if state.pool_wallets.is_empty() {
            return Err(StakingError::MissingRewardWallets);
        }
        let draft = TransferDraft::native(
            stake_wallet,
            JETTON_CLAIM_GAS,
            TransferPayload::JettonClaim {
                pool_wallets: state.pool_wallets.clone(),
            },
        );
        let receipt = self.pipeline.submit_transfer(account, auth, &draft).await?;
        self.store.record_staked_at(account, Timestamp::now());
        Ok(compose_submission(
            receipt,
            draft.destination,
            state.unclaimed_rewards,
            state.token_slug.clone(),
            StakingDirection::Claim,
        ))
    }

    /// Collect a matured time-locked vault withdrawal. Whether the lock
    /// has actually expired is the caller's presentation concern; the
    /// contract rejects an early collection on its own.
    pub async fn submit_unstake_ethena_locked(
        &self,
        account: &AccountId,
        auth: &AuthCredential,
        state: &EthenaState,
    ) -> Result<SubmissionResult, StakingError> {
        let token_wallet = state
            .token_wallet
            .clone()
            .ok_or(StakingError::MissingTokenWallet)?;
        let draft = TransferDraft::native(
            token_wallet,
            ETHENA_LOCKED_UNSTAKE_GAS,
            TransferPayload::TimeLockedWithdrawal,
        );
        let receipt = self.pipeline.submit_transfer(account, auth, &draft).await?;
        self.store.record_staked_at(account, Timestamp::now());
        Ok(compose_submission(
            receipt,
            draft.destination,
            state.unstake_request_amount,
            state.deposit_token_slug.clone(),
            StakingDirection::Unstake,
        ))
    }

    async fn build_unstake_draft(
        &self,
        account: &AccountId,
        state: &StakingState,
        amount: TokenAmount,
        mode: Option<LiquidUnstakeMode>,
    ) -> Result<(TransferDraft, TokenAmount, TokenAmount), StakingError> {
        match state {
            StakingState::Nominators(s) => {
                // Pools treat any "w" as a full-withdrawal request; the
                // amount only feeds the activity entry.
                let draft = TransferDraft::native(
                    s.pool.clone(),
                    NOMINATORS_RESERVE,
                    TransferPayload::Comment("w".into()),
                );
                Ok((draft, amount, NOMINATORS_RESERVE))
            }
            StakingState::Liquid(s) => {
                let token_amount = display_to_token(amount, s.balance, s.token_balance, s.rate)?;
                let mode = mode.unwrap_or(if s.instant_available.is_zero() {
                    LiquidUnstakeMode::BestRate
                } else {
                    LiquidUnstakeMode::Default
                });
                let (wait_till_round_end, fill_or_kill) = match mode {
                    LiquidUnstakeMode::Default => (false, false),
                    LiquidUnstakeMode::BestRate => (true, false),
                    LiquidUnstakeMode::Instant => (false, true),
                };
                // The burn goes to the account's own share-token wallet.
                let owner = self.store.account_ref(account)?.address;
                let destination = self
                    .reader
                    .token_wallet_address(&owner, &s.token_master)
                    .await?;
                let draft = TransferDraft::native(
                    destination,
                    LIQUID_RESERVE,
                    TransferPayload::LiquidWithdrawal {
                        token_amount,
                        wait_till_round_end,
                        fill_or_kill,
                    },
                );
                Ok((draft, token_amount, LIQUID_RESERVE))
            }
            StakingState::Jetton(s) => {
                let stake_wallet = s
                    .stake_wallet
                    .clone()
                    .ok_or(StakingError::MissingTokenWallet)?;
                let draft = TransferDraft::native(
                    stake_wallet,
                    JETTON_UNSTAKE_GAS,
                    TransferPayload::JettonUnstake {
                        token_amount: amount,
                    },
                );
                Ok((draft, amount, JETTON_UNSTAKE_GAS))
            }
            StakingState::Ethena(s) => {
                let token_amount = display_to_token(amount, s.balance, s.token_balance, s.rate)?;
                let owner = self.store.account_ref(account)?.address;
                let destination = match &s.token_wallet {
                    Some(wallet) => wallet.clone(),
                    None => {
                        self.reader
                            .token_wallet_address(&owner, &s.token_master)
                            .await?
                    }
                };
                let draft = TransferDraft::native(
                    destination,
                    ETHENA_UNSTAKE_GAS,
                    TransferPayload::VaultRedeem { token_amount },
                );
                Ok((draft, token_amount, ETHENA_UNSTAKE_GAS))
            }
        }
    }
}

fn build_stake_draft(
    state: &StakingState,
    amount: TokenAmount,
) -> Result<(TransferDraft, TokenAmount), StakingError> {
    match state {
        StakingState::Nominators(s) => {
            if amount < NOMINATORS_MIN_STAKE {
                return Err(StakingError::AmountBelowMinimum {
                    minimum: NOMINATORS_MIN_STAKE,
                });
            }
            let attach = amount
                .checked_add(NOMINATORS_RESERVE)
                .ok_or(StakingError::Overflow)?;
            let draft =
                TransferDraft::native(s.pool.clone(), attach, TransferPayload::Comment("d".into()));
            Ok((draft, NOMINATORS_RESERVE))
        }
        StakingState::Liquid(s) => {
            let attach = amount
                .checked_add(LIQUID_RESERVE)
                .ok_or(StakingError::Overflow)?;
            let draft =
                TransferDraft::native(s.pool.clone(), attach, TransferPayload::Comment("d".into()));
            Ok((draft, LIQUID_RESERVE))
        }
        StakingState::Jetton(s) => {
            let draft = TransferDraft {
                destination: s.pool.clone(),
                amount: JETTON_STAKE_GAS,
                token_master: Some(s.token_master.clone()),
                token_amount: Some(amount),
                forward_amount: Some(JETTON_STAKE_FORWARD),
                payload: Some(TransferPayload::JettonStake { period: s.period }),
            };
            Ok((draft, JETTON_STAKE_GAS))
        }
        StakingState::Ethena(s) => {
            // A plain deposit-token transfer; the vault mints on receipt.
            let draft = TransferDraft {
                destination: s.vault.clone(),
                amount: ETHENA_STAKE_GAS,
                token_master: Some(s.deposit_token_master.clone()),
                token_amount: Some(amount),
                forward_amount: Some(ETHENA_STAKE_FORWARD),
                payload: None,
            };
            Ok((draft, ETHENA_STAKE_GAS))
        }
    }
}

/// Convert a display-unit amount to token units at `rate`, except that a
/// full-balance withdrawal reuses the cached token balance verbatim so no
/// rounding dust is left behind.
fn display_to_token(
    amount: TokenAmount,
    balance: TokenAmount,
    token_balance: TokenAmount,
    rate: u64,
) -> Result<TokenAmount, StakingError> {
    if amount == balance {
        Ok(token_balance)
    } else {
        div_by_rate(amount, rate)
    }
}

/// Token slug the staked funds leave the wallet in.
fn stake_token_slug(state: &StakingState) -> TokenSlug {
    match state {
        StakingState::Nominators(_) | StakingState::Liquid(_) => TokenSlug::toncoin(),
        StakingState::Jetton(s) => s.token_slug.clone(),
        StakingState::Ethena(s) => s.deposit_token_slug.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{
        AccountRef, ChainError, DraftEstimate, MemoryAccountStore, NominatorMember,
        StakeWalletState, SubmissionReceipt, TimelockState,
    };
    use std::sync::Mutex;
    use tonstake_types::Network;

    fn addr(tag: &str) -> TonAddress {
        TonAddress::new(format!("EQ{tag:A<46}"))
    }

    fn account_id() -> AccountId {
        AccountId::new("acct-1")
    }

    fn auth() -> AuthCredential {
        AuthCredential::new("pw")
    }

    struct StubReader;

    impl ChainReader for StubReader {
        async fn nominator_member(
            &self,
            _pool: &TonAddress,
            _member: &TonAddress,
        ) -> Result<Option<NominatorMember>, ChainError> {
            Ok(None)
        }

        async fn stake_wallet_state(
            &self,
            _pool: &TonAddress,
            _owner: &TonAddress,
        ) -> Result<Option<StakeWalletState>, ChainError> {
            Ok(None)
        }

        async fn timelock_state(
            &self,
            _token_wallet: &TonAddress,
        ) -> Result<Option<TimelockState>, ChainError> {
            Ok(None)
        }

        async fn token_wallet_address(
            &self,
            _owner: &TonAddress,
            _master: &TonAddress,
        ) -> Result<TonAddress, ChainError> {
            Ok(addr("sharewallet"))
        }
    }

    #[derive(Default)]
    struct RecordingPipeline {
        submitted: Mutex<Vec<TransferDraft>>,
    }

    impl TransferPipeline for RecordingPipeline {
        async fn check_transaction_draft(
            &self,
            _account: &AccountId,
            _draft: &TransferDraft,
        ) -> Result<DraftEstimate, StakingError> {
            Ok(DraftEstimate {
                fee: TokenAmount::new(3_000_000),
            })
        }

        async fn submit_transfer(
            &self,
            _account: &AccountId,
            _auth: &AuthCredential,
            draft: &TransferDraft,
        ) -> Result<SubmissionReceipt, StakingError> {
            self.submitted.lock().unwrap().push(draft.clone());
            Ok(SubmissionReceipt {
                tx_id: "tx-9".into(),
            })
        }
    }

    fn engine() -> StakingEngine<StubReader, RecordingPipeline, MemoryAccountStore> {
        let store = MemoryAccountStore::new().with_account(
            account_id(),
            AccountRef {
                address: addr("owner"),
                network: Network::Mainnet,
            },
        );
        StakingEngine::new(StubReader, RecordingPipeline::default(), store)
    }

    fn nominators_state() -> StakingState {
        StakingState::Nominators(crate::state::NominatorsState {
            id: "nominators".into(),
            token_slug: TokenSlug::toncoin(),
            balance: TokenAmount::new(5_000_000_000),
            annual_yield: 4.5,
            unstake_request_amount: TokenAmount::ZERO,
            pool: addr("nompool"),
            start: Timestamp::new(1_000),
            end: Timestamp::new(2_000),
        })
    }

    fn liquid_state() -> LiquidState {
        LiquidState {
            id: "liquid".into(),
            token_slug: TokenSlug::toncoin(),
            balance: TokenAmount::new(2_100),
            annual_yield: 4.0,
            unstake_request_amount: TokenAmount::ZERO,
            pool: addr("liquidpool"),
            token_master: addr("sttonmaster"),
            token_balance: TokenAmount::new(2_000),
            rate: 1_050_000_000, // 1.05
            instant_available: TokenAmount::ZERO,
            start: Timestamp::new(1_000),
            end: Timestamp::new(2_000),
        }
    }

    fn jetton_state() -> JettonState {
        JettonState {
            id: "jetton-x".into(),
            token_slug: "ton-jpool".into(),
            balance: TokenAmount::new(10_000),
            annual_yield: 10.0,
            unstake_request_amount: TokenAmount::ZERO,
            pool: addr("jettonpool"),
            token_master: addr("jpoolmaster"),
            stake_wallet: Some(addr("stakewallet")),
            unclaimed_rewards: TokenAmount::new(123),
            pool_wallets: vec![addr("rewardpoolwallet")],
            tvl: TokenAmount::new(3_650_000),
            daily_reward: TokenAmount::new(1_000),
            period: 30,
        }
    }

    fn ethena_state() -> EthenaState {
        EthenaState {
            id: "ethena".into(),
            token_slug: "ton-tsusde".into(),
            balance: TokenAmount::new(1_100),
            annual_yield: 7.0,
            unstake_request_amount: TokenAmount::new(55),
            vault: addr("vault"),
            token_master: addr("tsusdemaster"),
            deposit_token_slug: "ton-usde".into(),
            deposit_token_master: addr("usdemaster"),
            token_balance: TokenAmount::new(1_000),
            rate: 1_100_000_000, // 1.1
            annual_yield_standard: 3.0,
            annual_yield_verified: 7.0,
            unlock_time: Some(Timestamp::new(9_000)),
            token_wallet: Some(addr("tsusdewallet")),
        }
    }

    #[tokio::test]
    async fn nominators_stake_below_minimum_is_rejected() {
        let engine = engine();
        let err = engine
            .check_stake_draft(
                &account_id(),
                &nominators_state(),
                TokenAmount::new(999_999_999),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StakingError::AmountBelowMinimum {
                minimum: NOMINATORS_MIN_STAKE
            }
        ));
    }

    #[tokio::test]
    async fn nominators_stake_attaches_amount_plus_reserve() {
        let engine = engine();
        let check = engine
            .check_stake_draft(&account_id(), &nominators_state(), ONE_TON)
            .await
            .unwrap();
        assert_eq!(check.draft.destination, addr("nompool"));
        // 1 TON stake + 1 TON reserve.
        assert_eq!(check.draft.amount, TokenAmount::new(2_000_000_000));
        assert_eq!(
            check.draft.payload,
            Some(TransferPayload::Comment("d".into()))
        );
        // Reserve + pipeline network fee.
        assert_eq!(check.fee, TokenAmount::new(1_003_000_000));
    }

    #[tokio::test]
    async fn liquid_stake_is_a_comment_deposit() {
        let engine = engine();
        let check = engine
            .check_stake_draft(
                &account_id(),
                &StakingState::Liquid(liquid_state()),
                TokenAmount::new(500),
            )
            .await
            .unwrap();
        assert_eq!(check.draft.destination, addr("liquidpool"));
        assert_eq!(check.draft.amount, TokenAmount::new(1_000_000_500));
        assert_eq!(
            check.draft.payload,
            Some(TransferPayload::Comment("d".into()))
        );
        assert!(check.draft.token_master.is_none());
    }

    #[tokio::test]
    async fn jetton_stake_is_a_token_transfer_keyed_by_period() {
        let engine = engine();
        let check = engine
            .check_stake_draft(
                &account_id(),
                &StakingState::Jetton(jetton_state()),
                TokenAmount::new(700),
            )
            .await
            .unwrap();
        let draft = &check.draft;
        assert_eq!(draft.destination, addr("jettonpool"));
        assert_eq!(draft.amount, TokenAmount::new(300_000_000));
        assert_eq!(draft.token_master, Some(addr("jpoolmaster")));
        assert_eq!(draft.token_amount, Some(TokenAmount::new(700)));
        assert_eq!(draft.forward_amount, Some(TokenAmount::new(250_000_000)));
        assert_eq!(
            draft.payload,
            Some(TransferPayload::JettonStake { period: 30 })
        );
    }

    #[tokio::test]
    async fn ethena_stake_is_a_plain_token_transfer() {
        let engine = engine();
        let check = engine
            .check_stake_draft(
                &account_id(),
                &StakingState::Ethena(ethena_state()),
                TokenAmount::new(400),
            )
            .await
            .unwrap();
        let draft = &check.draft;
        assert_eq!(draft.destination, addr("vault"));
        assert_eq!(draft.token_master, Some(addr("usdemaster")));
        assert_eq!(draft.forward_amount, Some(TokenAmount::new(100_000_000)));
        assert!(draft.payload.is_none());
    }

    #[tokio::test]
    async fn full_balance_liquid_unstake_uses_cached_token_balance() {
        let engine = engine();
        let state = liquid_state();
        let check = engine
            .check_unstake_draft(
                &account_id(),
                &StakingState::Liquid(state.clone()),
                state.balance,
            )
            .await
            .unwrap();
        // Exactly the cached shares, not 2100 × 1e9 / 1.05e9 = 2000 ± drift.
        assert_eq!(check.token_amount, TokenAmount::new(2_000));
        match check.draft.payload {
            Some(TransferPayload::LiquidWithdrawal { token_amount, .. }) => {
                assert_eq!(token_amount, TokenAmount::new(2_000));
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[tokio::test]
    async fn partial_liquid_unstake_converts_by_rate() {
        let engine = engine();
        let check = engine
            .check_unstake_draft(
                &account_id(),
                &StakingState::Liquid(liquid_state()),
                TokenAmount::new(1_050),
            )
            .await
            .unwrap();
        // 1050 / 1.05 = 1000 shares, burned via the account's own wallet.
        assert_eq!(check.token_amount, TokenAmount::new(1_000));
        assert_eq!(check.draft.destination, addr("sharewallet"));
        assert_eq!(check.draft.amount, ONE_TON);
    }

    #[tokio::test]
    async fn liquid_mode_waits_for_round_end_without_liquidity() {
        let engine = engine();
        let check = engine
            .check_unstake_draft(
                &account_id(),
                &StakingState::Liquid(liquid_state()), // instant_available = 0
                TokenAmount::new(1_050),
            )
            .await
            .unwrap();
        assert_eq!(
            check.draft.payload,
            Some(TransferPayload::LiquidWithdrawal {
                token_amount: TokenAmount::new(1_000),
                wait_till_round_end: true,
                fill_or_kill: false,
            })
        );
    }

    #[tokio::test]
    async fn liquid_mode_defaults_when_liquidity_available() {
        let engine = engine();
        let mut state = liquid_state();
        state.instant_available = TokenAmount::new(1_000_000);
        let check = engine
            .check_unstake_draft(
                &account_id(),
                &StakingState::Liquid(state),
                TokenAmount::new(1_050),
            )
            .await
            .unwrap();
        assert_eq!(
            check.draft.payload,
            Some(TransferPayload::LiquidWithdrawal {
                token_amount: TokenAmount::new(1_000),
                wait_till_round_end: false,
                fill_or_kill: false,
            })
        );
    }

    #[tokio::test]
    async fn instant_unstake_is_fill_or_kill() {
        let engine = engine();
        let result = engine
            .submit_unstake_instant(
                &account_id(),
                &auth(),
                &liquid_state(),
                TokenAmount::new(1_050),
            )
            .await
            .unwrap();
        assert_eq!(result.tx_id, "tx-9");
        let submitted = engine.pipeline.submitted.lock().unwrap();
        assert_eq!(
            submitted[0].payload,
            Some(TransferPayload::LiquidWithdrawal {
                token_amount: TokenAmount::new(1_000),
                wait_till_round_end: false,
                fill_or_kill: true,
            })
        );
    }

    #[tokio::test]
    async fn nominators_unstake_is_a_full_withdrawal_request() {
        let engine = engine();
        let check = engine
            .check_unstake_draft(&account_id(), &nominators_state(), ONE_TON)
            .await
            .unwrap();
        assert_eq!(check.draft.destination, addr("nompool"));
        assert_eq!(check.draft.amount, NOMINATORS_RESERVE);
        assert_eq!(
            check.draft.payload,
            Some(TransferPayload::Comment("w".into()))
        );
    }

    #[tokio::test]
    async fn jetton_unstake_goes_to_the_stake_wallet() {
        let engine = engine();
        let check = engine
            .check_unstake_draft(
                &account_id(),
                &StakingState::Jetton(jetton_state()),
                TokenAmount::new(4_000),
            )
            .await
            .unwrap();
        assert_eq!(check.draft.destination, addr("stakewallet"));
        assert_eq!(check.token_amount, TokenAmount::new(4_000));
        assert_eq!(
            check.draft.payload,
            Some(TransferPayload::JettonUnstake {
                token_amount: TokenAmount::new(4_000)
            })
        );
    }

    #[tokio::test]
    async fn jetton_unstake_without_stake_wallet_fails() {
        let engine = engine();
        let mut state = jetton_state();
        state.stake_wallet = None;
        let err = engine
            .check_unstake_draft(
                &account_id(),
                &StakingState::Jetton(state),
                TokenAmount::new(1),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StakingError::MissingTokenWallet));
    }

    #[tokio::test]
    async fn ethena_full_unstake_redeems_cached_wrapped_balance() {
        let engine = engine();
        let state = ethena_state();
        let check = engine
            .check_unstake_draft(
                &account_id(),
                &StakingState::Ethena(state.clone()),
                state.balance,
            )
            .await
            .unwrap();
        assert_eq!(check.token_amount, TokenAmount::new(1_000));
        assert_eq!(check.draft.destination, addr("tsusdewallet"));
        assert_eq!(
            check.draft.payload,
            Some(TransferPayload::VaultRedeem {
                token_amount: TokenAmount::new(1_000)
            })
        );
    }

    #[tokio::test]
    async fn claim_requires_discovered_pool_wallets() {
        let engine = engine();
        let mut state = jetton_state();
        state.pool_wallets.clear();
        let err = engine
            .submit_token_staking_claim(&account_id(), &auth(), &state)
            .await
            .unwrap_err();
        assert!(matches!(err, StakingError::MissingRewardWallets));
    }

    #[tokio::test]
    async fn claim_sends_reward_wallets_to_the_stake_wallet() {
        let engine = engine();
        let result = engine
            .submit_token_staking_claim(&account_id(), &auth(), &jetton_state())
            .await
            .unwrap();
        assert_eq!(result.activity.amount, TokenAmount::new(123));
        assert_eq!(result.activity.direction, StakingDirection::Claim);
        let submitted = engine.pipeline.submitted.lock().unwrap();
        assert_eq!(submitted[0].destination, addr("stakewallet"));
        assert_eq!(submitted[0].amount, JETTON_CLAIM_GAS);
        assert_eq!(
            submitted[0].payload,
            Some(TransferPayload::JettonClaim {
                pool_wallets: vec![addr("rewardpoolwallet")]
            })
        );
    }

    #[tokio::test]
    async fn locked_withdrawal_goes_to_the_token_wallet() {
        let engine = engine();
        let result = engine
            .submit_unstake_ethena_locked(&account_id(), &auth(), &ethena_state())
            .await
            .unwrap();
        assert_eq!(result.activity.amount, TokenAmount::new(55));
        let submitted = engine.pipeline.submitted.lock().unwrap();
        assert_eq!(submitted[0].destination, addr("tsusdewallet"));
        assert_eq!(submitted[0].payload, Some(TransferPayload::TimeLockedWithdrawal));
    }

    #[tokio::test]
    async fn locked_withdrawal_without_wallet_fails() {
        let engine = engine();
        let mut state = ethena_state();
        state.token_wallet = None;
        let err = engine
            .submit_unstake_ethena_locked(&account_id(), &auth(), &state)
            .await
            .unwrap_err();
        assert!(matches!(err, StakingError::MissingTokenWallet));
    }

    #[tokio::test]
    async fn successful_submit_stamps_the_stake_time() {
        let engine = engine();
        let before = Timestamp::now();
        engine
            .submit_stake(&account_id(), &auth(), &nominators_state(), ONE_TON)
            .await
            .unwrap();
        let hint = engine.store().staked_at_hint(&account_id()).unwrap();
        assert!(hint >= before);
    }
}
