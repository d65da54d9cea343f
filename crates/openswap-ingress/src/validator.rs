//! Order validator — hard gate before any settlement effect.
//!
//! Checks run in a fixed order so the reported reason is deterministic:
//!
//! ```text
//! expiry → fee → signature → authorization → nonce
//! ```
//!
//! The validator only reads the ledgers it is handed; it never mutates them.

use openswap_types::{
    Address, OpenswapError, Order, Result, SwapDomain, Timestamp, U256, recover_signer,
};

use crate::authorization::AuthorizationRegistry;
use crate::nonce_ledger::NonceLedger;

/// Read-only view of the settlement state an order is judged against.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    /// Ledger time of the executing call.
    pub now: Timestamp,
    /// Currently configured signer fee.
    pub signer_fee: U256,
    pub authorizations: &'a AuthorizationRegistry,
    pub nonces: &'a NonceLedger,
}

/// Validates signed orders for one settlement deployment.
#[derive(Debug, Clone, Copy)]
pub struct OrderValidator {
    domain: SwapDomain,
}

impl OrderValidator {
    #[must_use]
    pub fn new(domain: SwapDomain) -> Self {
        Self { domain }
    }

    #[must_use]
    pub fn domain(&self) -> &SwapDomain {
        &self.domain
    }

    /// Validate `order` as executed by `sender`. Returns the recovered signer.
    ///
    /// The digest is computed with `sender_wallet = sender`, so an order
    /// signed for another counterparty fails signature or authorization.
    ///
    /// # Errors
    /// - `Expired` if `expiry <= now`
    /// - `Unauthorized` if the order's fee differs from the configured fee
    /// - `InvalidSignature` if recovery fails or yields the zero address
    /// - `Unauthorized` if the signer is neither the wallet nor its delegate
    /// - `NonceAlreadyUsed` if the nonce is consumed or cancelled
    pub fn validate(
        &self,
        order: &Order,
        sender: Address,
        ctx: &ValidationContext<'_>,
    ) -> Result<Address> {
        // 1. Expiry
        if order.is_expired_at(ctx.now) {
            return Err(OpenswapError::Expired);
        }

        // 2. Fee the signer agreed to must be the live fee
        if order.signer_fee != ctx.signer_fee {
            tracing::debug!(
                order_fee = %order.signer_fee,
                configured_fee = %ctx.signer_fee,
                "order signed against stale fee"
            );
            return Err(OpenswapError::Unauthorized);
        }

        // 3. Signature
        let digest = self.domain.order_digest(&order.with_sender(sender));
        let signer = recover_signer(&digest, &order.signature)?;

        // 4. Authorization
        if !ctx.authorizations.may_sign_for(&order.signer_wallet, &signer) {
            tracing::debug!(
                signer = %signer,
                signer_wallet = %order.signer_wallet,
                "signer not authorized for wallet"
            );
            return Err(OpenswapError::Unauthorized);
        }

        // 5. Nonce
        if ctx.nonces.is_used(&order.signer_wallet, &order.nonce) {
            return Err(OpenswapError::NonceAlreadyUsed);
        }

        Ok(signer)
    }
}
