//! # openswap-staking
//!
//! Staking ledger whose positions gate fee rebates.
//!
//! Depositors lock the staking token with [`StakingLedger::stake`]; each
//! position vests linearly after a cliff and can be drawn down with
//! [`StakingLedger::unstake`]. Topping up a position restarts its clock.
//! Balances are exposed through a fungible receipt interface
//! (`balance_of`, `total_supply`, `name`, `symbol`, `decimals`).

pub mod staking;

pub use staking::StakingLedger;
