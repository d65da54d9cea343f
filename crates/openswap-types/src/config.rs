//! Deployment configuration for the settlement and staking contracts.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::{OpenswapError, Result, SwapDomain, constants};

/// Constructor arguments for the settlement contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapConfig {
    /// Chain the contract is deployed on (EIP-712 domain).
    pub chain_id: u64,
    /// Address of the settlement contract (EIP-712 verifying contract).
    pub contract: Address,
    /// Account allowed to change fee parameters.
    pub owner: Address,
    /// Recipient of protocol fees. Must be non-zero.
    pub fee_wallet: Address,
    /// Fee rate in units of `FEE_DIVISOR`.
    pub signer_fee: U256,
}

impl SwapConfig {
    #[must_use]
    pub fn new(contract: Address, owner: Address, fee_wallet: Address, signer_fee: u64) -> Self {
        Self {
            chain_id: constants::DEFAULT_CHAIN_ID,
            contract,
            owner,
            fee_wallet,
            signer_fee: U256::from(signer_fee),
        }
    }

    #[must_use]
    pub fn domain(&self) -> SwapDomain {
        SwapDomain::new(self.chain_id, self.contract)
    }

    /// Apply the same bounds the contract enforces at construction.
    ///
    /// # Errors
    /// `InvalidFee` if the fee exceeds `FEE_DIVISOR`, `InvalidFeeWallet` if
    /// the fee wallet is the zero address.
    pub fn validate(&self) -> Result<()> {
        validate_fee(self.signer_fee)?;
        if self.fee_wallet.is_zero() {
            return Err(OpenswapError::InvalidFeeWallet);
        }
        Ok(())
    }

    /// Parse a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Constructor arguments for the staking contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakingConfig {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Token accepted for staking.
    pub staking_token: Address,
    /// Address of the staking contract (holds staked tokens).
    pub contract: Address,
    pub owner: Address,
    /// Seconds after a stake before anything can be withdrawn.
    pub cliff: u64,
    /// Seconds over which a stake fully unlocks.
    pub duration: u64,
}

impl StakingConfig {
    #[must_use]
    pub fn new(staking_token: Address, contract: Address, owner: Address) -> Self {
        Self {
            name: constants::DEFAULT_STAKING_NAME.to_string(),
            symbol: constants::DEFAULT_STAKING_SYMBOL.to_string(),
            decimals: constants::DEFAULT_STAKING_DECIMALS,
            staking_token,
            contract,
            owner,
            cliff: constants::DEFAULT_STAKING_CLIFF,
            duration: constants::DEFAULT_STAKING_DURATION,
        }
    }

    #[must_use]
    pub fn with_vesting(mut self, duration: u64, cliff: u64) -> Self {
        self.duration = duration;
        self.cliff = cliff;
        self
    }

    /// Reject configurations the contract could never operate under.
    pub fn validate(&self) -> Result<()> {
        validate_vesting(self.duration, self.cliff)?;
        if self.staking_token.is_zero() || self.contract.is_zero() {
            return Err(OpenswapError::Configuration(
                "staking token and contract must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// Parse a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A fee of exactly `FEE_DIVISOR` (100%) is allowed.
pub fn validate_fee(signer_fee: U256) -> Result<()> {
    if signer_fee > U256::from(constants::FEE_DIVISOR) {
        return Err(OpenswapError::InvalidFee);
    }
    Ok(())
}

/// Vesting parameters must have a non-zero duration and a cliff within it.
pub fn validate_vesting(duration: u64, cliff: u64) -> Result<()> {
    if duration == 0 || cliff > duration {
        return Err(OpenswapError::InvalidVesting);
    }
    Ok(())
}
