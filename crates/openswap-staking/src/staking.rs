//! Staking ledger.
//!
//! Depositors lock the staking token in positions that unlock linearly over
//! `duration` after a `cliff`. The ledger mirrors a fungible receipt token:
//! staking mints receipt balance, unstaking burns it.
//!
//! Token movement always happens before a position is touched, so a failed
//! transfer leaves positions, supply and token balances exactly as they were.

use std::collections::HashMap;

use openswap_ingress::TokenLedger;
use openswap_types::{
    Address, Amount, LedgerClock, OpenswapError, Result, StakePosition, StakingConfig,
    StakingEvent, U256, validate_vesting,
};

/// Where a deposit lands.
#[derive(Debug, Clone, Copy)]
enum Target {
    /// Top up the latest live position, or open a new one.
    Latest,
    /// Top up a specific position.
    Index(usize),
}

/// Staking contract state.
#[derive(Debug)]
pub struct StakingLedger<C: LedgerClock> {
    config: StakingConfig,
    positions: HashMap<Address, Vec<StakePosition>>,
    total_supply: Amount,
    clock: C,
    events: Vec<StakingEvent>,
}

impl<C: LedgerClock> StakingLedger<C> {
    /// Deploy a staking contract.
    ///
    /// # Errors
    /// `InvalidVesting` or `Configuration` if `config` fails validation.
    pub fn new(config: StakingConfig, clock: C) -> Result<Self> {
        config.validate()?;
        tracing::info!(
            contract = %config.contract,
            token = %config.staking_token,
            cliff = config.cliff,
            duration = config.duration,
            "staking ledger deployed"
        );
        Ok(Self {
            config,
            positions: HashMap::new(),
            total_supply: U256::ZERO,
            clock,
            events: Vec::new(),
        })
    }

    // ----- Staking -----

    /// Stake `amount` from `caller` for itself. Returns the position index.
    ///
    /// # Errors
    /// `AmountInvalid` for zero, or the token ledger's transfer error.
    pub fn stake<L: TokenLedger>(
        &mut self,
        ledger: &mut L,
        caller: Address,
        amount: Amount,
    ) -> Result<usize> {
        self.deposit(ledger, caller, caller, Target::Latest, amount)
    }

    /// Stake `amount` pulled from `caller` into `account`'s positions.
    pub fn stake_for<L: TokenLedger>(
        &mut self,
        ledger: &mut L,
        caller: Address,
        account: Address,
        amount: Amount,
    ) -> Result<usize> {
        self.deposit(ledger, caller, account, Target::Latest, amount)
    }

    /// Add `amount` to position `index`, restarting its vesting clock.
    pub fn extend<L: TokenLedger>(
        &mut self,
        ledger: &mut L,
        caller: Address,
        index: usize,
        amount: Amount,
    ) -> Result<usize> {
        self.deposit(ledger, caller, caller, Target::Index(index), amount)
    }

    fn deposit<L: TokenLedger>(
        &mut self,
        ledger: &mut L,
        payer: Address,
        account: Address,
        target: Target,
        amount: Amount,
    ) -> Result<usize> {
        if amount.is_zero() {
            return Err(OpenswapError::AmountInvalid);
        }
        let existing = self.positions.get(&account).map_or(0, Vec::len);
        let slot = match target {
            Target::Index(index) if index >= existing => {
                return Err(OpenswapError::IndexOutOfRange { index });
            }
            Target::Index(index) => Some(index),
            Target::Latest => self
                .positions
                .get(&account)
                .and_then(|list| list.last())
                .filter(|p| !p.balance.is_zero())
                .map(|_| existing - 1),
        };

        ledger.transfer_from(
            self.config.staking_token,
            self.config.contract,
            payer,
            self.config.contract,
            amount,
        )?;

        let now = self.clock.now();
        let list = self.positions.entry(account).or_default();
        let index = match slot {
            Some(index) => {
                list[index].top_up(amount, now);
                index
            }
            None => {
                list.push(StakePosition::open(amount, now));
                list.len() - 1
            }
        };
        self.total_supply = self.total_supply.saturating_add(amount);

        tracing::info!(
            account = %account,
            index,
            amount = %amount,
            balance = %list[index].balance,
            "stake recorded"
        );
        self.events.push(StakingEvent::Transfer {
            from: Address::ZERO,
            to: account,
            amount,
        });
        Ok(index)
    }

    /// Withdraw `amount` of vested stake from `caller`'s position `index`.
    ///
    /// # Errors
    /// - `IndexOutOfRange` if `caller` has no such position
    /// - `CliffNotReached` before `timestamp + cliff`
    /// - `AmountExceedsAvailable` if more than the vested remainder is asked
    pub fn unstake<L: TokenLedger>(
        &mut self,
        ledger: &mut L,
        caller: Address,
        index: usize,
        amount: Amount,
    ) -> Result<()> {
        let now = self.clock.now();
        let position = self.position(&caller, index)?;
        if !position.cliff_reached(now, self.config.cliff) {
            return Err(OpenswapError::CliffNotReached);
        }
        let available = position.available(now, self.config.duration);
        if amount > available {
            return Err(OpenswapError::AmountExceedsAvailable {
                requested: amount,
                available,
            });
        }

        ledger.transfer(self.config.staking_token, self.config.contract, caller, amount)?;

        if let Some(position) = self
            .positions
            .get_mut(&caller)
            .and_then(|list| list.get_mut(index))
        {
            position.balance -= amount;
        }
        self.total_supply = self.total_supply.saturating_sub(amount);

        tracing::info!(account = %caller, index, amount = %amount, "stake withdrawn");
        self.events.push(StakingEvent::Transfer {
            from: caller,
            to: Address::ZERO,
            amount,
        });
        Ok(())
    }

    // ----- Owner controls -----

    fn ensure_owner(&self, caller: &Address) -> Result<()> {
        if *caller == self.config.owner {
            Ok(())
        } else {
            Err(OpenswapError::OwnerOnly)
        }
    }

    /// Change the vesting schedule for every position.
    pub fn set_vesting(&mut self, caller: Address, duration: u64, cliff: u64) -> Result<()> {
        self.ensure_owner(&caller)?;
        validate_vesting(duration, cliff)?;
        self.config.duration = duration;
        self.config.cliff = cliff;
        tracing::info!(duration, cliff, "vesting schedule updated");
        self.events.push(StakingEvent::SetVesting { duration, cliff });
        Ok(())
    }

    pub fn set_meta_data(&mut self, caller: Address, name: &str, symbol: &str) -> Result<()> {
        self.ensure_owner(&caller)?;
        self.config.name = name.to_string();
        self.config.symbol = symbol.to_string();
        self.events.push(StakingEvent::SetMetaData {
            name: self.config.name.clone(),
            symbol: self.config.symbol.clone(),
        });
        Ok(())
    }

    pub fn transfer_ownership(&mut self, caller: Address, new_owner: Address) -> Result<()> {
        self.ensure_owner(&caller)?;
        if new_owner.is_zero() {
            return Err(OpenswapError::InvalidOwner);
        }
        let previous_owner = std::mem::replace(&mut self.config.owner, new_owner);
        tracing::info!(previous = %previous_owner, new = %new_owner, "ownership transferred");
        self.events.push(StakingEvent::OwnershipTransferred {
            previous_owner,
            new_owner,
        });
        Ok(())
    }

    // ----- Views -----

    fn position(&self, account: &Address, index: usize) -> Result<&StakePosition> {
        self.positions
            .get(account)
            .and_then(|list| list.get(index))
            .ok_or(OpenswapError::IndexOutOfRange { index })
    }

    /// Receipt balance: the sum of `account`'s position balances.
    #[must_use]
    pub fn balance_of(&self, account: &Address) -> Amount {
        self.positions(account)
            .iter()
            .fold(U256::ZERO, |acc, p| acc.saturating_add(p.balance))
    }

    #[must_use]
    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    #[must_use]
    pub fn positions(&self, account: &Address) -> &[StakePosition] {
        self.positions.get(account).map(Vec::as_slice).unwrap_or(&[])
    }

    /// What `account` could unstake from position `index` right now.
    /// Zero before the cliff.
    pub fn available_to_unstake(&self, account: &Address, index: usize) -> Result<Amount> {
        let now = self.clock.now();
        let position = self.position(account, index)?;
        if position.cliff_reached(now, self.config.cliff) {
            Ok(position.available(now, self.config.duration))
        } else {
            Ok(U256::ZERO)
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.config.symbol
    }

    #[must_use]
    pub fn decimals(&self) -> u8 {
        self.config.decimals
    }

    #[must_use]
    pub fn cliff(&self) -> u64 {
        self.config.cliff
    }

    #[must_use]
    pub fn duration(&self) -> u64 {
        self.config.duration
    }

    #[must_use]
    pub fn owner(&self) -> Address {
        self.config.owner
    }

    #[must_use]
    pub fn staking_token(&self) -> Address {
        self.config.staking_token
    }

    /// Address of this contract; stakers approve it and it holds the stake.
    #[must_use]
    pub fn address(&self) -> Address {
        self.config.contract
    }

    #[must_use]
    pub fn events(&self) -> &[StakingEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<StakingEvent> {
        std::mem::take(&mut self.events)
    }
}
