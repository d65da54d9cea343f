//! # openswap-types
//!
//! Shared types, errors, and configuration for the **OpenSwap** settlement
//! protocol.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Primitives**: [`Address`], [`U256`], [`Nonce`], [`Amount`], [`Timestamp`]
//! - **Order model**: [`Order`], [`OrderSignature`]
//! - **Signing domain**: [`SwapDomain`] (EIP-712 digest and separator)
//! - **Signature recovery**: [`recover_signer`]
//! - **Events**: [`SwapEvent`], [`StakingEvent`]
//! - **Staking model**: [`StakePosition`], [`StakeState`]
//! - **Configuration**: [`SwapConfig`], [`StakingConfig`]
//! - **Time**: [`LedgerClock`], [`SystemClock`], [`ManualClock`]
//! - **Errors**: [`OpenswapError`] with `OS_ERR_` prefix codes
//! - **Constants**: fee divisor, domain name/version, vesting defaults

pub mod clock;
pub mod config;
pub mod constants;
pub mod domain;
pub mod error;
pub mod event;
pub mod ids;
pub mod order;
pub mod signature;
pub mod stake;

// Re-export all primary types at crate root for ergonomic imports:
//   use openswap_types::{Order, SwapDomain, SwapEvent, ...};

pub use clock::*;
pub use config::*;
pub use domain::*;
pub use error::*;
pub use event::*;
pub use ids::*;
pub use order::*;
pub use signature::*;
pub use stake::*;

// Constants are accessed via `openswap_types::constants::FOO`
// (not re-exported to avoid name collisions).
