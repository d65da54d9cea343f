//! # Stake positions and linear vesting
//!
//! ## State Machine
//!
//! ```text
//!   ┌──────────┐  stake / extend   ┌────────┐
//!   │ UNSTAKED ├──────────────────▶│ STAKED │◀─┐ stake / extend
//!   └──────────┘                   └───┬────┘  │ (clock restarts)
//!        ▲        unstake to zero      │───────┘
//!        └─────────────────────────────┘
//! ```
//!
//! A position unlocks linearly from `timestamp` over `duration`, with
//! nothing withdrawable before `timestamp + cliff`. Every top-up sets
//! `initial` to the new balance and restarts the clock for the whole
//! position, re-locking anything that had already vested.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::{Amount, Timestamp};

/// Whether a position currently holds stake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StakeState {
    Unstaked,
    Staked,
}

impl std::fmt::Display for StakeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unstaked => write!(f, "UNSTAKED"),
            Self::Staked => write!(f, "STAKED"),
        }
    }
}

/// One depositor position.
///
/// Invariant: `balance <= initial`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakePosition {
    /// Tokens still held by the position.
    pub balance: Amount,
    /// Balance at the last stake/extend; the base of the vesting schedule.
    pub initial: Amount,
    /// Ledger time of the last stake/extend.
    pub timestamp: Timestamp,
}

impl StakePosition {
    /// Open a position of `amount` at ledger time `now`.
    #[must_use]
    pub fn open(amount: Amount, now: Timestamp) -> Self {
        Self {
            balance: amount,
            initial: amount,
            timestamp: now,
        }
    }

    #[must_use]
    pub fn state(&self) -> StakeState {
        if self.balance.is_zero() {
            StakeState::Unstaked
        } else {
            StakeState::Staked
        }
    }

    /// Add `amount` and restart the vesting clock at `now`.
    pub fn top_up(&mut self, amount: Amount, now: Timestamp) {
        self.balance = self.balance.saturating_add(amount);
        self.initial = self.balance;
        self.timestamp = now;
    }

    /// Whether the cliff has elapsed at `now`.
    #[must_use]
    pub fn cliff_reached(&self, now: Timestamp, cliff: u64) -> bool {
        now >= self.timestamp.saturating_add(cliff)
    }

    /// Total vested so far (withdrawn or not).
    #[must_use]
    pub fn vested(&self, now: Timestamp, duration: u64) -> Amount {
        let elapsed = now.saturating_sub(self.timestamp);
        if duration == 0 || elapsed >= duration {
            return self.initial;
        }
        // initial = q * duration + r, so neither product can overflow.
        let (elapsed, duration) = (U256::from(elapsed), U256::from(duration));
        let (q, r) = (self.initial / duration, self.initial % duration);
        q * elapsed + r * elapsed / duration
    }

    /// Vested and not yet withdrawn. Ignores the cliff; callers check it.
    #[must_use]
    pub fn available(&self, now: Timestamp, duration: u64) -> Amount {
        if now.saturating_sub(self.timestamp) >= duration {
            return self.balance;
        }
        let withdrawn = self.initial.saturating_sub(self.balance);
        self.vested(now, duration).saturating_sub(withdrawn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLIFF: u64 = 100;
    const DURATION: u64 = 1000;

    #[test]
    fn open_position_is_staked() {
        let pos = StakePosition::open(U256::from(1000), 50);
        assert_eq!(pos.state(), StakeState::Staked);
        assert_eq!(pos.balance, pos.initial);
        assert_eq!(pos.timestamp, 50);
    }

    #[test]
    fn cliff_boundary() {
        let pos = StakePosition::open(U256::from(1000), 0);
        assert!(!pos.cliff_reached(CLIFF - 1, CLIFF));
        assert!(pos.cliff_reached(CLIFF, CLIFF));
    }

    #[test]
    fn linear_vesting() {
        let pos = StakePosition::open(U256::from(1_000_000), 0);
        assert_eq!(pos.available(0, DURATION), U256::ZERO);
        assert_eq!(pos.available(250, DURATION), U256::from(250_000));
        assert_eq!(pos.available(500, DURATION), U256::from(500_000));
        assert_eq!(pos.available(DURATION, DURATION), U256::from(1_000_000));
        assert_eq!(pos.available(DURATION * 5, DURATION), U256::from(1_000_000));
    }

    #[test]
    fn vesting_huge_position_is_exact() {
        let initial = U256::MAX / U256::from(2);
        let pos = StakePosition::open(initial, 0);
        assert_eq!(pos.vested(500, DURATION), U256::MAX / U256::from(4));
        assert_eq!(pos.vested(1, DURATION), initial / U256::from(DURATION));
        // initial is odd, so initial * 999 / 1000 is not an integer.
        let per_second = initial / U256::from(DURATION);
        assert_eq!(
            pos.vested(DURATION - 1, DURATION),
            initial - per_second - U256::from(1)
        );
    }

    #[test]
    fn withdrawals_reduce_available() {
        let mut pos = StakePosition::open(U256::from(1000), 0);
        pos.balance -= U256::from(300);
        // 60% vested = 600, 300 already out.
        assert_eq!(pos.available(600, DURATION), U256::from(300));
        // Past duration everything left is available.
        assert_eq!(pos.available(DURATION, DURATION), U256::from(700));
    }

    #[test]
    fn withdrawn_beyond_vested_floors_at_zero() {
        let mut pos = StakePosition::open(U256::from(1000), 0);
        pos.balance -= U256::from(500);
        assert_eq!(pos.available(100, DURATION), U256::ZERO);
    }

    #[test]
    fn top_up_restarts_clock_and_relocks() {
        let mut pos = StakePosition::open(U256::from(1000), 0);
        assert_eq!(pos.available(DURATION, DURATION), U256::from(1000));
        pos.top_up(U256::from(10), DURATION);
        assert_eq!(pos.initial, U256::from(1010));
        assert_eq!(pos.timestamp, DURATION);
        assert_eq!(pos.available(DURATION, DURATION), U256::ZERO);
    }

    #[test]
    fn drained_position_is_unstaked() {
        let mut pos = StakePosition::open(U256::from(10), 0);
        pos.balance = U256::ZERO;
        assert_eq!(pos.state(), StakeState::Unstaked);
        assert_eq!(format!("{}", pos.state()), "UNSTAKED");
    }
}
