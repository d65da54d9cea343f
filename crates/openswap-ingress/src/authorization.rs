//! Signer delegation registry.
//!
//! A wallet may let one other address sign orders on its behalf. The most
//! recent `authorize` wins; `revoke` clears the entry so the wallet again
//! signs only for itself.

use std::collections::HashMap;

use openswap_types::Address;

/// Mapping from delegating wallet to its single authorized signer.
#[derive(Debug, Default)]
pub struct AuthorizationRegistry {
    delegates: HashMap<Address, Address>,
}

impl AuthorizationRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `signer` as `wallet`'s delegate, returning the one it replaced.
    /// Authorizing the zero address is the same as revoking.
    pub fn authorize(&mut self, wallet: Address, signer: Address) -> Option<Address> {
        if signer.is_zero() {
            return self.revoke(&wallet);
        }
        self.delegates.insert(wallet, signer)
    }

    /// Clear `wallet`'s delegate, returning it if there was one.
    pub fn revoke(&mut self, wallet: &Address) -> Option<Address> {
        self.delegates.remove(wallet)
    }

    /// The current delegate of `wallet`, or the zero address for none.
    #[must_use]
    pub fn authorized(&self, wallet: &Address) -> Address {
        self.delegates.get(wallet).copied().unwrap_or(Address::ZERO)
    }

    /// Whether `signer` may sign orders for `wallet`.
    #[must_use]
    pub fn may_sign_for(&self, wallet: &Address, signer: &Address) -> bool {
        !signer.is_zero() && (signer == wallet || self.delegates.get(wallet) == Some(signer))
    }
}
