//! Owner-controlled fee parameters.
//!
//! Every mutation checks ownership before it looks at the new value, so a
//! non-owner always sees `OWNER_ONLY` even when the value is also invalid.

use openswap_types::constants::FEE_DIVISOR;
use openswap_types::{Address, Amount, OpenswapError, Result, U256, validate_fee};

/// Fee rate, fee recipient, and the account allowed to change them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeConfig {
    owner: Address,
    fee_wallet: Address,
    signer_fee: U256,
}

impl FeeConfig {
    /// # Errors
    /// `InvalidFee` if `signer_fee > FEE_DIVISOR`, `InvalidFeeWallet` if the
    /// wallet is zero.
    pub fn new(owner: Address, fee_wallet: Address, signer_fee: U256) -> Result<Self> {
        validate_fee(signer_fee)?;
        if fee_wallet.is_zero() {
            return Err(OpenswapError::InvalidFeeWallet);
        }
        Ok(Self {
            owner,
            fee_wallet,
            signer_fee,
        })
    }

    #[must_use]
    pub fn owner(&self) -> Address {
        self.owner
    }

    #[must_use]
    pub fn fee_wallet(&self) -> Address {
        self.fee_wallet
    }

    #[must_use]
    pub fn signer_fee(&self) -> U256 {
        self.signer_fee
    }

    fn ensure_owner(&self, caller: &Address) -> Result<()> {
        if *caller == self.owner {
            Ok(())
        } else {
            Err(OpenswapError::OwnerOnly)
        }
    }

    pub fn set_fee(&mut self, caller: &Address, signer_fee: U256) -> Result<()> {
        self.ensure_owner(caller)?;
        validate_fee(signer_fee)?;
        self.signer_fee = signer_fee;
        Ok(())
    }

    pub fn set_fee_wallet(&mut self, caller: &Address, fee_wallet: Address) -> Result<()> {
        self.ensure_owner(caller)?;
        if fee_wallet.is_zero() {
            return Err(OpenswapError::InvalidFeeWallet);
        }
        self.fee_wallet = fee_wallet;
        Ok(())
    }

    /// Hand ownership to `new_owner`. Returns the previous owner.
    pub fn transfer_ownership(&mut self, caller: &Address, new_owner: Address) -> Result<Address> {
        self.ensure_owner(caller)?;
        if new_owner.is_zero() {
            return Err(OpenswapError::InvalidOwner);
        }
        Ok(std::mem::replace(&mut self.owner, new_owner))
    }

    /// `floor(amount * signer_fee / FEE_DIVISOR)`.
    ///
    /// Split as `q * fee + floor(r * fee / D)` with `amount = q * D + r`,
    /// which is exact and cannot overflow while `fee <= D`.
    #[must_use]
    pub fn fee_amount(&self, amount: Amount) -> Amount {
        let divisor = U256::from(FEE_DIVISOR);
        let (q, r) = (amount / divisor, amount % divisor);
        q * self.signer_fee + r * self.signer_fee / divisor
    }
}
