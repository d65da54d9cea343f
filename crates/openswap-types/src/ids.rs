//! Primitive identifiers used throughout OpenSwap.
//!
//! Accounts and tokens are 20-byte EVM addresses; amounts and nonces are
//! 256-bit unsigned integers so signed orders hash exactly as on chain.

pub use alloy_primitives::{Address, B256, U256};

/// Per-signer order identifier. Scoped to the signer wallet, not global.
pub type Nonce = U256;

/// Token amount in the token's smallest unit.
pub type Amount = U256;

/// Ledger-observed time in seconds since the UNIX epoch.
pub type Timestamp = u64;
