//! Supply conservation invariant checker.
//!
//! Invariant enforced by the token ledger:
//! ```text
//! ∀ token: Σ balances == Σ minted - Σ burned
//! ```
//!
//! Swaps and stakes only move tokens between holders, so any drift means a
//! transfer created or destroyed value.

use std::collections::{HashMap, HashSet};

use openswap_types::{Address, Amount, OpenswapError, Result, U256};

/// Tracks per-token issuance and validates conservation against the sum of
/// holder balances.
#[derive(Debug, Default)]
pub struct SupplyConservation {
    minted: HashMap<Address, Amount>,
    burned: HashMap<Address, Amount>,
}

impl SupplyConservation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_mint(&mut self, token: Address, amount: Amount) {
        let entry = self.minted.entry(token).or_default();
        *entry = entry.saturating_add(amount);
    }

    pub fn record_burn(&mut self, token: Address, amount: Amount) {
        let entry = self.burned.entry(token).or_default();
        *entry = entry.saturating_add(amount);
    }

    /// Expected total supply for a token: minted - burned.
    #[must_use]
    pub fn expected_supply(&self, token: &Address) -> Amount {
        self.total_minted(token)
            .saturating_sub(self.total_burned(token))
    }

    /// Verify that `actual_supply` (sum of all holder balances) matches the
    /// expected supply for `token`.
    ///
    /// # Errors
    /// Returns [`OpenswapError::SupplyInvariantViolation`] if actual ≠ expected.
    pub fn verify(&self, token: &Address, actual_supply: Amount) -> Result<()> {
        let expected = self.expected_supply(token);
        if actual_supply != expected {
            return Err(OpenswapError::SupplyInvariantViolation {
                reason: format!(
                    "token {token}: actual supply {actual_supply} != expected {expected} \
                     (minted={}, burned={})",
                    self.total_minted(token),
                    self.total_burned(token),
                ),
            });
        }
        Ok(())
    }

    /// Every token that has ever been minted or burned.
    #[must_use]
    pub fn tracked_tokens(&self) -> Vec<Address> {
        let mut tokens: HashSet<Address> = self.minted.keys().copied().collect();
        tokens.extend(self.burned.keys().copied());
        tokens.into_iter().collect()
    }

    #[must_use]
    pub fn total_minted(&self, token: &Address) -> Amount {
        self.minted.get(token).copied().unwrap_or(U256::ZERO)
    }

    #[must_use]
    pub fn total_burned(&self, token: &Address) -> Amount {
        self.burned.get(token).copied().unwrap_or(U256::ZERO)
    }
}
