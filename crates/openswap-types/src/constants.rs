//! System-wide constants for OpenSwap.

/// Denominator for fee rates. A fee of `FEE_DIVISOR` is 100%.
pub const FEE_DIVISOR: u64 = 10_000;

/// Default signer fee (7 bps).
pub const DEFAULT_SIGNER_FEE: u64 = 7;

/// EIP-712 domain name for order signing.
pub const DOMAIN_NAME: &str = "SWAP_LIGHT";

/// EIP-712 domain version for order signing.
pub const DOMAIN_VERSION: &str = "3";

/// Default chain identifier (Ethereum mainnet).
pub const DEFAULT_CHAIN_ID: u64 = 1;

/// Default staking cliff: one week, in seconds.
pub const DEFAULT_STAKING_CLIFF: u64 = 7 * 24 * 60 * 60;

/// Default staking vesting duration: twelve weeks, in seconds.
pub const DEFAULT_STAKING_DURATION: u64 = 12 * 7 * 24 * 60 * 60;

/// Default staking receipt name.
pub const DEFAULT_STAKING_NAME: &str = "Staked AST";

/// Default staking receipt symbol.
pub const DEFAULT_STAKING_SYMBOL: &str = "sAST";

/// Default staking receipt decimals (matches the staking token).
pub const DEFAULT_STAKING_DECIMALS: u8 = 4;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Protocol name.
pub const PROTOCOL_NAME: &str = "OpenSwap";
