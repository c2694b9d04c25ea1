//! Settlement-round and unlock-window resolution.
//!
//! Liquid-pool withdrawals settle per round. On-chain settlement is not
//! instantaneous: funds only become spendable once the chain-level payout
//! transaction lands, so every advertised unlock time carries a grace
//! period on top of the nominal round boundary.

use tonstake_types::Timestamp;

use crate::common::LiquidPoolData;

/// Extra time after a round's nominal unlock before funds are advertised
/// as available, covering payout settlement latency.
pub const UNLOCK_GRACE_PERIOD_SECS: u64 = 1_800;

/// Minimum elapsed time after a liquid deposit before the minted shares
/// are redeemable (shares are validated asynchronously, one validation
/// cycle after the deposit).
pub const VALIDATION_PERIOD_SECS: u64 = 65_536;

/// The round window governing unlock-date display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnlockWindow {
    pub start: Timestamp,
    pub end: Timestamp,
}

/// Select the round that currently governs the liquid pool's unlock date.
///
/// The previous round governs while `now` sits inside its grace window
/// *and* the backend still reports its payout collection as active; once
/// the grace period elapses or the payout has executed, control passes to
/// the current round. The returned window never ends before it starts
/// because every round satisfies `start <= unlock`.
pub fn resolve_unlock_window(
    liquid: &LiquidPoolData,
    payout_collection_active: bool,
    now: Timestamp,
) -> UnlockWindow {
    let prev = &liquid.previous_round;
    let in_prev_grace =
        now >= prev.unlock && !prev.unlock.has_expired(UNLOCK_GRACE_PERIOD_SECS, now);
    let round = if in_prev_grace && payout_collection_active {
        prev
    } else {
        &liquid.current_round
    };
    UnlockWindow {
        start: round.start,
        end: round.unlock.plus_secs(UNLOCK_GRACE_PERIOD_SECS),
    }
}

/// Nominator pools report a plain end time; the same settlement grace is
/// added directly to it.
pub fn nominators_end_with_grace(end: Timestamp) -> Timestamp {
    end.plus_secs(UNLOCK_GRACE_PERIOD_SECS)
}

/// Whether instant liquid withdrawal is currently open for an account.
///
/// `simulate_delay` is a developer-only override that forces the
/// delayed-withdrawal path for UI testing.
pub fn instant_withdrawal_open(
    staked_at: Option<Timestamp>,
    now: Timestamp,
    simulate_delay: bool,
) -> bool {
    if simulate_delay {
        return false;
    }
    match staked_at {
        Some(at) => at.has_expired(VALIDATION_PERIOD_SECS, now),
        None => true,
    }
}
