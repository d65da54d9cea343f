//! Error types for OpenSwap.
//!
//! All errors use the `OS_ERR_` prefix convention for easy grepping in logs,
//! followed by the literal revert reason a caller observes.
//! Error codes are grouped by subsystem:
//! - 1xx: Order validation errors
//! - 2xx: Fee / owner configuration errors
//! - 3xx: Token ledger errors
//! - 4xx: Staking errors
//! - 9xx: General / internal errors

use alloy_primitives::U256;
use thiserror::Error;

/// Central error enum for all OpenSwap operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OpenswapError {
    // =================================================================
    // Order Validation Errors (1xx)
    // =================================================================
    /// The order's expiry is at or before the current ledger time.
    #[error("OS_ERR_100: EXPIRED")]
    Expired,

    /// Signature recovery failed or recovered the zero address.
    #[error("OS_ERR_101: INVALID_SIG")]
    InvalidSignature,

    /// Recovered signer is neither the signer wallet nor its delegate,
    /// or the order was signed against a stale fee.
    #[error("OS_ERR_102: UNAUTHORIZED")]
    Unauthorized,

    /// The (signer wallet, nonce) pair was already settled or cancelled.
    #[error("OS_ERR_103: NONCE_ALREADY_USED")]
    NonceAlreadyUsed,

    // =================================================================
    // Fee / Owner Configuration Errors (2xx)
    // =================================================================
    /// Fee exceeds the fee divisor.
    #[error("OS_ERR_200: INVALID_FEE")]
    InvalidFee,

    /// Fee wallet is the zero address.
    #[error("OS_ERR_201: INVALID_FEE_WALLET")]
    InvalidFeeWallet,

    /// Caller is not the contract owner.
    #[error("OS_ERR_202: OWNER_ONLY: Ownable: caller is not the owner")]
    OwnerOnly,

    /// Ownership cannot move to the zero address.
    #[error("OS_ERR_203: INVALID_OWNER")]
    InvalidOwner,

    // =================================================================
    // Token Ledger Errors (3xx)
    // =================================================================
    /// Not enough token balance to perform the transfer.
    #[error("OS_ERR_300: INSUFFICIENT_BALANCE: need {needed}, have {available}")]
    InsufficientBalance { needed: U256, available: U256 },

    /// The spender has not been approved for enough tokens.
    #[error("OS_ERR_301: INSUFFICIENT_ALLOWANCE: need {needed}, approved {approved}")]
    InsufficientAllowance { needed: U256, approved: U256 },

    /// Supply conservation invariant violated — critical safety alert.
    #[error("OS_ERR_302: SUPPLY_INVARIANT_VIOLATION: {reason}")]
    SupplyInvariantViolation { reason: String },

    // =================================================================
    // Staking Errors (4xx)
    // =================================================================
    /// Stake amounts must be non-zero.
    #[error("OS_ERR_400: AMOUNT_INVALID")]
    AmountInvalid,

    /// The position's cliff has not elapsed yet.
    #[error("OS_ERR_401: CLIFF_NOT_REACHED")]
    CliffNotReached,

    /// Requested more than the currently vested, unwithdrawn amount.
    #[error("OS_ERR_402: AMOUNT_EXCEEDS_AVAILABLE: requested {requested}, available {available}")]
    AmountExceedsAvailable { requested: U256, available: U256 },

    /// No stake position at this index for the account.
    #[error("OS_ERR_403: INDEX_OUT_OF_RANGE: {index}")]
    IndexOutOfRange { index: usize },

    /// Vesting parameters are inconsistent (zero duration or cliff > duration).
    #[error("OS_ERR_404: INVALID_VESTING")]
    InvalidVesting,

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Configuration error (invalid values, missing fields, etc.).
    #[error("OS_ERR_900: CONFIGURATION: {0}")]
    Configuration(String),

    /// Serialization / deserialization error.
    #[error("OS_ERR_901: SERIALIZATION: {0}")]
    Serialization(String),
}

impl OpenswapError {
    /// The literal revert reason, without code prefix or detail.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Expired => "EXPIRED",
            Self::InvalidSignature => "INVALID_SIG",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::NonceAlreadyUsed => "NONCE_ALREADY_USED",
            Self::InvalidFee => "INVALID_FEE",
            Self::InvalidFeeWallet => "INVALID_FEE_WALLET",
            Self::OwnerOnly => "OWNER_ONLY",
            Self::InvalidOwner => "INVALID_OWNER",
            Self::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            Self::InsufficientAllowance { .. } => "INSUFFICIENT_ALLOWANCE",
            Self::SupplyInvariantViolation { .. } => "SUPPLY_INVARIANT_VIOLATION",
            Self::AmountInvalid => "AMOUNT_INVALID",
            Self::CliffNotReached => "CLIFF_NOT_REACHED",
            Self::AmountExceedsAvailable { .. } => "AMOUNT_EXCEEDS_AVAILABLE",
            Self::IndexOutOfRange { .. } => "INDEX_OUT_OF_RANGE",
            Self::InvalidVesting => "INVALID_VESTING",
            Self::Configuration(_) => "CONFIGURATION",
            Self::Serialization(_) => "SERIALIZATION",
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, OpenswapError>;

impl From<serde_json::Error> for OpenswapError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
