//! Host token ledger: fungible balances and allowances.
//!
//! Settlement moves tokens only through "transfer on behalf of": a wallet
//! approves the settlement contract as spender, and the contract pulls from
//! it. [`TokenLedger::transfer_batch`] applies several such pulls as one
//! unit: either every transfer lands or none does.

use std::collections::HashMap;

use openswap_types::{Address, Amount, OpenswapError, Result, U256};
use serde::{Deserialize, Serialize};

use crate::supply_conservation::SupplyConservation;

/// One leg of a multi-party settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTransfer {
    pub token: Address,
    pub from: Address,
    pub to: Address,
    pub amount: Amount,
}

impl TokenTransfer {
    #[must_use]
    pub fn new(token: Address, from: Address, to: Address, amount: Amount) -> Self {
        Self {
            token,
            from,
            to,
            amount,
        }
    }
}

/// Fungible-token operations the contracts rely on.
pub trait TokenLedger {
    fn balance_of(&self, token: &Address, owner: &Address) -> Amount;

    fn allowance(&self, token: &Address, owner: &Address, spender: &Address) -> Amount;

    /// Set `spender`'s allowance over `owner`'s `token` to `amount`.
    fn approve(&mut self, token: Address, owner: Address, spender: Address, amount: Amount);

    /// Move `amount` from `from` (the caller) to `to`.
    fn transfer(&mut self, token: Address, from: Address, to: Address, amount: Amount)
    -> Result<()>;

    /// Move `amount` from `from` to `to` using `spender`'s allowance.
    fn transfer_from(
        &mut self,
        token: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()> {
        self.transfer_batch(spender, &[TokenTransfer::new(token, from, to, amount)])
    }

    /// Apply every transfer using `spender`'s allowances, all-or-nothing.
    fn transfer_batch(&mut self, spender: Address, transfers: &[TokenTransfer]) -> Result<()>;
}

/// In-memory token ledger with supply tracking.
#[derive(Debug, Default)]
pub struct TokenBank {
    /// `(token, holder) → balance`.
    balances: HashMap<(Address, Address), Amount>,
    /// `(token, owner, spender) → allowance`.
    allowances: HashMap<(Address, Address, Address), Amount>,
    supply: SupplyConservation,
}

impl TokenBank {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create `amount` new tokens for `to`.
    pub fn mint(&mut self, token: Address, to: Address, amount: Amount) {
        let entry = self.balances.entry((token, to)).or_default();
        *entry = entry.saturating_add(amount);
        self.supply.record_mint(token, amount);
    }

    /// Destroy `amount` of `from`'s tokens.
    ///
    /// # Errors
    /// Returns `InsufficientBalance` if `from` holds less than `amount`.
    pub fn burn(&mut self, token: Address, from: Address, amount: Amount) -> Result<()> {
        let available = self.balance_of(&token, &from);
        if available < amount {
            return Err(OpenswapError::InsufficientBalance {
                needed: amount,
                available,
            });
        }
        self.balances.insert((token, from), available - amount);
        self.supply.record_burn(token, amount);
        Ok(())
    }

    /// Sum of all holder balances of `token`.
    #[must_use]
    pub fn total_supply(&self, token: &Address) -> Amount {
        self.balances
            .iter()
            .filter(|((t, _), _)| t == token)
            .fold(U256::ZERO, |acc, (_, bal)| acc.saturating_add(*bal))
    }

    /// Check that no transfer created or destroyed `token`.
    pub fn verify_supply(&self, token: &Address) -> Result<()> {
        self.supply.verify(token, self.total_supply(token))
    }

    /// Check conservation for every token ever minted.
    pub fn verify_all_supply(&self) -> Result<()> {
        self.supply
            .tracked_tokens()
            .iter()
            .try_for_each(|token| self.verify_supply(token))
    }
}

/// Staged changes of one batch, committed only if every leg succeeds.
#[derive(Default)]
struct Overlay {
    balances: HashMap<(Address, Address), Amount>,
    allowances: HashMap<(Address, Address, Address), Amount>,
}

impl TokenLedger for TokenBank {
    fn balance_of(&self, token: &Address, owner: &Address) -> Amount {
        self.balances
            .get(&(*token, *owner))
            .copied()
            .unwrap_or(U256::ZERO)
    }

    fn allowance(&self, token: &Address, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(&(*token, *owner, *spender))
            .copied()
            .unwrap_or(U256::ZERO)
    }

    fn approve(&mut self, token: Address, owner: Address, spender: Address, amount: Amount) {
        self.allowances.insert((token, owner, spender), amount);
    }

    fn transfer(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()> {
        let from_balance = self.balance_of(&token, &from);
        if from_balance < amount {
            return Err(OpenswapError::InsufficientBalance {
                needed: amount,
                available: from_balance,
            });
        }
        self.balances.insert((token, from), from_balance - amount);
        let to_balance = self.balances.entry((token, to)).or_default();
        *to_balance = to_balance.saturating_add(amount);
        Ok(())
    }

    fn transfer_batch(&mut self, spender: Address, transfers: &[TokenTransfer]) -> Result<()> {
        let mut overlay = Overlay::default();

        for leg in transfers {
            // Allowance (an unlimited approval is never decremented).
            let allowance_key = (leg.token, leg.from, spender);
            let approved = overlay
                .allowances
                .get(&allowance_key)
                .copied()
                .unwrap_or_else(|| self.allowance(&leg.token, &leg.from, &spender));
            if approved < leg.amount {
                return Err(OpenswapError::InsufficientAllowance {
                    needed: leg.amount,
                    approved,
                });
            }
            if approved != U256::MAX {
                overlay.allowances.insert(allowance_key, approved - leg.amount);
            }

            // Debit
            let from_key = (leg.token, leg.from);
            let from_balance = overlay
                .balances
                .get(&from_key)
                .copied()
                .unwrap_or_else(|| self.balance_of(&leg.token, &leg.from));
            if from_balance < leg.amount {
                return Err(OpenswapError::InsufficientBalance {
                    needed: leg.amount,
                    available: from_balance,
                });
            }
            overlay.balances.insert(from_key, from_balance - leg.amount);

            // Credit
            let to_key = (leg.token, leg.to);
            let to_balance = overlay
                .balances
                .get(&to_key)
                .copied()
                .unwrap_or_else(|| self.balance_of(&leg.token, &leg.to));
            overlay
                .balances
                .insert(to_key, to_balance.saturating_add(leg.amount));
        }

        self.balances.extend(overlay.balances);
        self.allowances.extend(overlay.allowances);
        tracing::debug!(legs = transfers.len(), spender = %spender, "token batch applied");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(b: u8) -> Address {
        Address::repeat_byte(b)
    }

    const TOKEN: u8 = 0xaa;
    const SPENDER: u8 = 0xcc;

    fn funded() -> TokenBank {
        let mut bank = TokenBank::new();
        bank.mint(addr(TOKEN), addr(1), U256::from(1000));
        bank
    }

    #[test]
    fn mint_increases_balance_and_supply() {
        let bank = funded();
        assert_eq!(bank.balance_of(&addr(TOKEN), &addr(1)), U256::from(1000));
        assert_eq!(bank.total_supply(&addr(TOKEN)), U256::from(1000));
        bank.verify_supply(&addr(TOKEN)).unwrap();
    }

    #[test]
    fn transfer_moves_balance() {
        let mut bank = funded();
        bank.transfer(addr(TOKEN), addr(1), addr(2), U256::from(400))
            .unwrap();
        assert_eq!(bank.balance_of(&addr(TOKEN), &addr(1)), U256::from(600));
        assert_eq!(bank.balance_of(&addr(TOKEN), &addr(2)), U256::from(400));
        bank.verify_supply(&addr(TOKEN)).unwrap();
    }

    #[test]
    fn transfer_insufficient_fails_unchanged() {
        let mut bank = funded();
        let err = bank
            .transfer(addr(TOKEN), addr(1), addr(2), U256::from(1001))
            .unwrap_err();
        assert!(matches!(err, OpenswapError::InsufficientBalance { .. }));
        assert_eq!(bank.balance_of(&addr(TOKEN), &addr(1)), U256::from(1000));
    }

    #[test]
    fn transfer_from_requires_allowance() {
        let mut bank = funded();
        let err = bank
            .transfer_from(addr(TOKEN), addr(SPENDER), addr(1), addr(2), U256::from(1))
            .unwrap_err();
        assert_eq!(err.reason(), "INSUFFICIENT_ALLOWANCE");

        bank.approve(addr(TOKEN), addr(1), addr(SPENDER), U256::from(300));
        bank.transfer_from(addr(TOKEN), addr(SPENDER), addr(1), addr(2), U256::from(100))
            .unwrap();
        assert_eq!(
            bank.allowance(&addr(TOKEN), &addr(1), &addr(SPENDER)),
            U256::from(200)
        );
        assert_eq!(bank.balance_of(&addr(TOKEN), &addr(2)), U256::from(100));
    }

    #[test]
    fn unlimited_allowance_not_decremented() {
        let mut bank = funded();
        bank.approve(addr(TOKEN), addr(1), addr(SPENDER), U256::MAX);
        bank.transfer_from(addr(TOKEN), addr(SPENDER), addr(1), addr(2), U256::from(10))
            .unwrap();
        assert_eq!(bank.allowance(&addr(TOKEN), &addr(1), &addr(SPENDER)), U256::MAX);
    }

    #[test]
    fn batch_is_all_or_nothing() {
        let mut bank = funded();
        let other = addr(0xbb);
        bank.mint(other, addr(2), U256::from(50));
        bank.approve(addr(TOKEN), addr(1), addr(SPENDER), U256::MAX);
        // addr(2) never approved the spender for `other`.
        let legs = [
            TokenTransfer::new(addr(TOKEN), addr(1), addr(2), U256::from(500)),
            TokenTransfer::new(other, addr(2), addr(1), U256::from(50)),
        ];
        let err = bank.transfer_batch(addr(SPENDER), &legs).unwrap_err();
        assert!(matches!(err, OpenswapError::InsufficientAllowance { .. }));
        assert_eq!(bank.balance_of(&addr(TOKEN), &addr(1)), U256::from(1000));
        assert_eq!(bank.balance_of(&addr(TOKEN), &addr(2)), U256::ZERO);
        assert_eq!(bank.balance_of(&other, &addr(2)), U256::from(50));
    }

    #[test]
    fn batch_debits_accumulate() {
        let mut bank = funded();
        bank.approve(addr(TOKEN), addr(1), addr(SPENDER), U256::MAX);
        let legs = [
            TokenTransfer::new(addr(TOKEN), addr(1), addr(2), U256::from(600)),
            TokenTransfer::new(addr(TOKEN), addr(1), addr(3), U256::from(600)),
        ];
        let err = bank.transfer_batch(addr(SPENDER), &legs).unwrap_err();
        assert!(matches!(err, OpenswapError::InsufficientBalance { .. }));
        assert_eq!(bank.balance_of(&addr(TOKEN), &addr(1)), U256::from(1000));
    }

    #[test]
    fn batch_allowance_accumulates() {
        let mut bank = funded();
        bank.approve(addr(TOKEN), addr(1), addr(SPENDER), U256::from(900));
        let legs = [
            TokenTransfer::new(addr(TOKEN), addr(1), addr(2), U256::from(500)),
            TokenTransfer::new(addr(TOKEN), addr(1), addr(3), U256::from(500)),
        ];
        let err = bank.transfer_batch(addr(SPENDER), &legs).unwrap_err();
        assert!(matches!(err, OpenswapError::InsufficientAllowance { .. }));
        assert_eq!(
            bank.allowance(&addr(TOKEN), &addr(1), &addr(SPENDER)),
            U256::from(900)
        );
    }

    #[test]
    fn batch_success_conserves_supply() {
        let mut bank = funded();
        bank.approve(addr(TOKEN), addr(1), addr(SPENDER), U256::from(1000));
        let legs = [
            TokenTransfer::new(addr(TOKEN), addr(1), addr(2), U256::from(970)),
            TokenTransfer::new(addr(TOKEN), addr(1), addr(3), U256::from(30)),
        ];
        bank.transfer_batch(addr(SPENDER), &legs).unwrap();
        assert_eq!(bank.balance_of(&addr(TOKEN), &addr(1)), U256::ZERO);
        assert_eq!(bank.balance_of(&addr(TOKEN), &addr(2)), U256::from(970));
        assert_eq!(bank.balance_of(&addr(TOKEN), &addr(3)), U256::from(30));
        bank.verify_all_supply().unwrap();
    }

    #[test]
    fn self_transfer_keeps_balance() {
        let mut bank = funded();
        bank.approve(addr(TOKEN), addr(1), addr(SPENDER), U256::MAX);
        let legs = [TokenTransfer::new(addr(TOKEN), addr(1), addr(1), U256::from(10))];
        bank.transfer_batch(addr(SPENDER), &legs).unwrap();
        assert_eq!(bank.balance_of(&addr(TOKEN), &addr(1)), U256::from(1000));
    }

    #[test]
    fn burn_reduces_supply() {
        let mut bank = funded();
        bank.burn(addr(TOKEN), addr(1), U256::from(100)).unwrap();
        assert_eq!(bank.total_supply(&addr(TOKEN)), U256::from(900));
        bank.verify_supply(&addr(TOKEN)).unwrap();
        assert!(bank.burn(addr(TOKEN), addr(1), U256::from(901)).is_err());
    }
}
