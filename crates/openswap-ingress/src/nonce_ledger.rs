//! Nonce ledger — prevents an order from settling more than once.
//!
//! Each `(signer wallet, nonce)` pair is write-once: it becomes used when an
//! order settles or when the signer cancels it, and no completed operation
//! ever clears it. Nonces are scoped per signer wallet, so two wallets may
//! use the same number independently.

use std::collections::{HashMap, HashSet};

use openswap_types::{Address, Nonce, OpenswapError, Result};

/// Per-signer set of consumed or cancelled nonces.
#[derive(Debug, Default)]
pub struct NonceLedger {
    /// `signer wallet → set<nonce>`.
    used: HashMap<Address, HashSet<Nonce>>,
}

impl NonceLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `nonce` is already used for `wallet`.
    #[must_use]
    pub fn is_used(&self, wallet: &Address, nonce: &Nonce) -> bool {
        self.used.get(wallet).is_some_and(|set| set.contains(nonce))
    }

    /// Consume a nonce for settlement.
    ///
    /// # Errors
    /// Returns [`OpenswapError::NonceAlreadyUsed`] if the pair is taken.
    pub fn consume(&mut self, wallet: Address, nonce: Nonce) -> Result<()> {
        if self.used.entry(wallet).or_default().insert(nonce) {
            Ok(())
        } else {
            Err(OpenswapError::NonceAlreadyUsed)
        }
    }

    /// Mark a nonce used by cancellation. Returns `false` if it already was.
    pub fn cancel(&mut self, wallet: Address, nonce: Nonce) -> bool {
        self.used.entry(wallet).or_default().insert(nonce)
    }

    /// Undo a [`consume`](Self::consume) made earlier in a transaction that
    /// is now aborting. Only the settlement engine calls this, before the
    /// aborted call returns, so no caller ever observes the consumption.
    pub fn revert_consume(&mut self, wallet: &Address, nonce: &Nonce) {
        if let Some(set) = self.used.get_mut(wallet) {
            set.remove(nonce);
            if set.is_empty() {
                self.used.remove(wallet);
            }
        }
    }

    /// Number of used nonces for `wallet`.
    #[must_use]
    pub fn used_count(&self, wallet: &Address) -> usize {
        self.used.get(wallet).map_or(0, HashSet::len)
    }
}
