//! # openswap-settlement
//!
//! **Finality Plane**: settles signed orders against the host token ledger.
//!
//! ## Architecture
//!
//! [`SwapEngine`] owns the settlement contract state and drives the ingress
//! components:
//! 1. Validates the order through the `OrderValidator`
//! 2. Consumes the signer's nonce (no double-settlement)
//! 3. Moves both legs plus the protocol fee in one all-or-nothing batch
//! 4. Appends a `Swap` event to the contract log
//!
//! [`FeeConfig`] holds the owner-controlled fee rate and fee wallet.

pub mod engine;
pub mod fee_config;

pub use engine::SwapEngine;
pub use fee_config::FeeConfig;
