//! Swap settlement engine.
//!
//! One `SwapEngine` is one deployed settlement contract. A swap:
//! 1. Validates the order (expiry, fee, signature, authorization, nonce)
//! 2. Consumes `(signer wallet, nonce)`
//! 3. Pulls `sender_amount` of the sender token from the caller to the signer
//! 4. Pulls `signer_amount - fee` of the signer token from the signer to the caller
//! 5. Pulls `fee` of the signer token from the signer to the fee wallet
//! 6. Emits `Swap`
//!
//! Steps 3-5 go through [`TokenLedger::transfer_batch`] as one unit. If the
//! batch fails the nonce from step 2 is released again and the error is
//! returned, so a failed swap leaves nothing behind.

use openswap_ingress::{
    AuthorizationRegistry, NonceLedger, OrderValidator, TokenLedger, TokenTransfer,
    ValidationContext,
};
use openswap_types::constants;
use openswap_types::{
    Address, B256, LedgerClock, Nonce, Order, Result, SwapConfig, SwapDomain, SwapEvent, U256,
};

use crate::fee_config::FeeConfig;

/// Settlement contract state: nonces, delegations, fee parameters, event log.
#[derive(Debug)]
pub struct SwapEngine<C: LedgerClock> {
    address: Address,
    validator: OrderValidator,
    fees: FeeConfig,
    nonces: NonceLedger,
    authorizations: AuthorizationRegistry,
    clock: C,
    events: Vec<SwapEvent>,
}

impl<C: LedgerClock> SwapEngine<C> {
    /// Deploy a settlement contract.
    ///
    /// # Errors
    /// `InvalidFee` / `InvalidFeeWallet` if the fee parameters are out of
    /// bounds.
    pub fn new(config: &SwapConfig, clock: C) -> Result<Self> {
        let fees = FeeConfig::new(config.owner, config.fee_wallet, config.signer_fee)?;
        tracing::info!(
            contract = %config.contract,
            chain_id = config.chain_id,
            signer_fee = %config.signer_fee,
            fee_wallet = %config.fee_wallet,
            protocol = constants::PROTOCOL_NAME,
            version = constants::VERSION,
            "swap engine deployed"
        );
        Ok(Self {
            address: config.contract,
            validator: OrderValidator::new(config.domain()),
            fees,
            nonces: NonceLedger::new(),
            authorizations: AuthorizationRegistry::new(),
            clock,
            events: Vec::new(),
        })
    }

    // ----- Settlement -----

    /// Settle `order` with `caller` as the sender.
    ///
    /// # Errors
    /// Any validation failure, or `InsufficientBalance` /
    /// `InsufficientAllowance` from the token ledger.
    pub fn swap<L: TokenLedger>(
        &mut self,
        ledger: &mut L,
        caller: Address,
        order: &Order,
    ) -> Result<()> {
        self.settle(ledger, caller, caller, order)
    }

    /// Settle `order` with `caller` as the sender, delivering the signer
    /// token proceeds to `recipient`.
    pub fn swap_with_recipient<L: TokenLedger>(
        &mut self,
        ledger: &mut L,
        caller: Address,
        recipient: Address,
        order: &Order,
    ) -> Result<()> {
        self.settle(ledger, caller, recipient, order)
    }

    fn settle<L: TokenLedger>(
        &mut self,
        ledger: &mut L,
        caller: Address,
        recipient: Address,
        order: &Order,
    ) -> Result<()> {
        let now = self.clock.now();
        let ctx = ValidationContext {
            now,
            signer_fee: self.fees.signer_fee(),
            authorizations: &self.authorizations,
            nonces: &self.nonces,
        };
        let signer = match self.validator.validate(order, caller, &ctx) {
            Ok(signer) => signer,
            Err(e) => {
                tracing::warn!(
                    nonce = %order.nonce,
                    signer_wallet = %order.signer_wallet,
                    sender = %caller,
                    reason = e.reason(),
                    "swap rejected"
                );
                return Err(e);
            }
        };

        self.nonces.consume(order.signer_wallet, order.nonce)?;

        let fee = self.fees.fee_amount(order.signer_amount);
        let mut legs = vec![
            TokenTransfer::new(
                order.sender_token,
                caller,
                order.signer_wallet,
                order.sender_amount,
            ),
            TokenTransfer::new(
                order.signer_token,
                order.signer_wallet,
                recipient,
                order.signer_amount - fee,
            ),
        ];
        if fee > U256::ZERO {
            legs.push(TokenTransfer::new(
                order.signer_token,
                order.signer_wallet,
                self.fees.fee_wallet(),
                fee,
            ));
        }

        if let Err(e) = ledger.transfer_batch(self.address, &legs) {
            self.nonces.revert_consume(&order.signer_wallet, &order.nonce);
            tracing::warn!(
                nonce = %order.nonce,
                signer_wallet = %order.signer_wallet,
                reason = e.reason(),
                "swap transfer failed, nonce released"
            );
            return Err(e);
        }

        tracing::info!(
            nonce = %order.nonce,
            signer = %signer,
            signer_wallet = %order.signer_wallet,
            sender = %caller,
            fee = %fee,
            "swap settled"
        );
        self.events.push(SwapEvent::Swap {
            nonce: order.nonce,
            timestamp: now,
            signer_wallet: signer,
            signer_token: order.signer_token,
            signer_amount: order.signer_amount,
            signer_fee: order.signer_fee,
            sender_wallet: caller,
            sender_token: order.sender_token,
            sender_amount: order.sender_amount,
        });
        Ok(())
    }

    // ----- Cancellation & delegation -----

    /// Mark each nonce used for `caller`. Already used nonces and duplicates
    /// are skipped. Returns how many nonces were newly cancelled.
    pub fn cancel(&mut self, caller: Address, nonces: &[Nonce]) -> usize {
        let mut cancelled = 0;
        for nonce in nonces {
            if self.nonces.cancel(caller, *nonce) {
                self.events.push(SwapEvent::Cancel {
                    nonce: *nonce,
                    signer_wallet: caller,
                });
                cancelled += 1;
            } else {
                tracing::debug!(
                    wallet = %caller,
                    nonce = %nonce,
                    "nonce already used, skip cancel"
                );
            }
        }
        cancelled
    }

    /// Let `signer` sign orders for `caller`, replacing any earlier delegate.
    pub fn authorize(&mut self, caller: Address, signer: Address) {
        self.authorizations.authorize(caller, signer);
        tracing::info!(wallet = %caller, signer = %signer, "signer authorized");
        self.events.push(SwapEvent::Authorize {
            signer,
            signer_wallet: caller,
        });
    }

    /// Clear `caller`'s delegate. The event carries the removed signer, or
    /// the zero address if there was none.
    pub fn revoke(&mut self, caller: Address) {
        let signer = self.authorizations.revoke(&caller).unwrap_or(Address::ZERO);
        tracing::info!(wallet = %caller, signer = %signer, "signer revoked");
        self.events.push(SwapEvent::Revoke {
            signer,
            signer_wallet: caller,
        });
    }

    // ----- Owner controls -----

    pub fn set_fee(&mut self, caller: Address, signer_fee: U256) -> Result<()> {
        self.fees.set_fee(&caller, signer_fee)?;
        tracing::info!(signer_fee = %signer_fee, "signer fee updated");
        self.events.push(SwapEvent::SetFee { signer_fee });
        Ok(())
    }

    pub fn set_fee_wallet(&mut self, caller: Address, fee_wallet: Address) -> Result<()> {
        self.fees.set_fee_wallet(&caller, fee_wallet)?;
        tracing::info!(fee_wallet = %fee_wallet, "fee wallet updated");
        self.events.push(SwapEvent::SetFeeWallet { fee_wallet });
        Ok(())
    }

    pub fn transfer_ownership(&mut self, caller: Address, new_owner: Address) -> Result<()> {
        let previous_owner = self.fees.transfer_ownership(&caller, new_owner)?;
        tracing::info!(previous = %previous_owner, new = %new_owner, "ownership transferred");
        self.events.push(SwapEvent::OwnershipTransferred {
            previous_owner,
            new_owner,
        });
        Ok(())
    }

    // ----- Views -----

    #[must_use]
    pub fn signer_fee(&self) -> U256 {
        self.fees.signer_fee()
    }

    #[must_use]
    pub fn fee_wallet(&self) -> Address {
        self.fees.fee_wallet()
    }

    #[must_use]
    pub fn owner(&self) -> Address {
        self.fees.owner()
    }

    #[must_use]
    pub fn nonce_used(&self, wallet: &Address, nonce: &Nonce) -> bool {
        self.nonces.is_used(wallet, nonce)
    }

    /// How many of `wallet`'s nonces are settled or cancelled.
    #[must_use]
    pub fn used_nonce_count(&self, wallet: &Address) -> usize {
        self.nonces.used_count(wallet)
    }

    /// Current delegate of `wallet`, or the zero address.
    #[must_use]
    pub fn authorized(&self, wallet: &Address) -> Address {
        self.authorizations.authorized(wallet)
    }

    #[must_use]
    pub fn domain(&self) -> &SwapDomain {
        self.validator.domain()
    }

    #[must_use]
    pub fn domain_separator(&self) -> B256 {
        self.validator.domain().separator()
    }

    #[must_use]
    pub fn chain_id(&self) -> u64 {
        self.validator.domain().chain_id
    }

    /// Address of this contract; wallets approve it as spender.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    #[must_use]
    pub fn events(&self) -> &[SwapEvent] {
        &self.events
    }

    /// Hand the accumulated event log to the host.
    pub fn drain_events(&mut self) -> Vec<SwapEvent> {
        std::mem::take(&mut self.events)
    }
}
