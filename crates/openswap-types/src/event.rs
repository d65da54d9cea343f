//! Log records emitted by the settlement and staking contracts.
//!
//! Events are append-only: engines push them as the final step of a
//! successful operation, so a failed call never leaves a record behind.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::{Amount, Nonce, Timestamp};

/// Events emitted by the settlement contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "PascalCase")]
pub enum SwapEvent {
    /// An order settled.
    #[serde(rename_all = "camelCase")]
    Swap {
        nonce: Nonce,
        timestamp: Timestamp,
        /// The address that actually signed (the delegate when one signed).
        signer_wallet: Address,
        signer_token: Address,
        signer_amount: Amount,
        signer_fee: U256,
        sender_wallet: Address,
        sender_token: Address,
        sender_amount: Amount,
    },
    /// A nonce was cancelled by its signer wallet.
    #[serde(rename_all = "camelCase")]
    Cancel { nonce: Nonce, signer_wallet: Address },
    /// `signer_wallet` delegated signing to `signer`.
    #[serde(rename_all = "camelCase")]
    Authorize {
        signer: Address,
        signer_wallet: Address,
    },
    /// `signer_wallet` cleared its delegate (`signer` is the one removed).
    #[serde(rename_all = "camelCase")]
    Revoke {
        signer: Address,
        signer_wallet: Address,
    },
    #[serde(rename_all = "camelCase")]
    SetFee { signer_fee: U256 },
    #[serde(rename_all = "camelCase")]
    SetFeeWallet { fee_wallet: Address },
    #[serde(rename_all = "camelCase")]
    OwnershipTransferred {
        previous_owner: Address,
        new_owner: Address,
    },
}

impl SwapEvent {
    /// Event name as it appears in the contract ABI.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Swap { .. } => "Swap",
            Self::Cancel { .. } => "Cancel",
            Self::Authorize { .. } => "Authorize",
            Self::Revoke { .. } => "Revoke",
            Self::SetFee { .. } => "SetFee",
            Self::SetFeeWallet { .. } => "SetFeeWallet",
            Self::OwnershipTransferred { .. } => "OwnershipTransferred",
        }
    }
}

/// Events emitted by the staking contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "PascalCase")]
pub enum StakingEvent {
    /// Receipt balance movement: mint from the zero address on stake,
    /// burn to the zero address on unstake.
    Transfer {
        from: Address,
        to: Address,
        amount: Amount,
    },
    SetVesting { duration: u64, cliff: u64 },
    SetMetaData { name: String, symbol: String },
    #[serde(rename_all = "camelCase")]
    OwnershipTransferred {
        previous_owner: Address,
        new_owner: Address,
    },
}
