//! Signed order types for OpenSwap.
//!
//! An [`Order`] is built and signed off-chain by the signer side and handed
//! to the sender, who submits it for settlement. Every field except the
//! signature is covered by the EIP-712 digest (see [`crate::domain`]).

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::{Amount, Nonce, OrderSignature, Timestamp};

/// A signed swap order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Per-signer unique identifier.
    pub nonce: Nonce,
    /// Ledger time after which the order can no longer settle.
    pub expiry: Timestamp,
    /// Wallet whose tokens are sold.
    pub signer_wallet: Address,
    pub signer_token: Address,
    pub signer_amount: Amount,
    /// Fee rate the signer agreed to, in units of `FEE_DIVISOR`.
    pub signer_fee: U256,
    /// Counterparty named by the signer. Settlement binds this to the caller.
    pub sender_wallet: Address,
    pub sender_token: Address,
    pub sender_amount: Amount,
    pub signature: OrderSignature,
}

impl Order {
    /// Whether the order has expired at ledger time `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        self.expiry <= now
    }

    /// Copy of this order as seen from `sender`: the sender wallet covered
    /// by the digest is the party executing the settlement.
    #[must_use]
    pub fn with_sender(&self, sender: Address) -> Self {
        Self {
            sender_wallet: sender,
            ..self.clone()
        }
    }
}

impl std::fmt::Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Order[{}:{}] {} {} -> {} {}",
            self.signer_wallet,
            self.nonce,
            self.signer_amount,
            self.signer_token,
            self.sender_amount,
            self.sender_token,
        )
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
pub mod fixtures {
    use alloy_signer::SignerSync;
    use alloy_signer_local::PrivateKeySigner;

    use super::*;
    use crate::SwapDomain;

    /// Unsigned order terms; signing fills in the signature.
    #[derive(Debug, Clone)]
    pub struct OrderTerms {
        pub nonce: Nonce,
        pub expiry: Timestamp,
        pub signer_wallet: Address,
        pub signer_token: Address,
        pub signer_amount: Amount,
        pub signer_fee: U256,
        pub sender_wallet: Address,
        pub sender_token: Address,
        pub sender_amount: Amount,
    }

    impl OrderTerms {
        /// Terms with a random nonce and the given wallets and amounts.
        pub fn new(
            signer_wallet: Address,
            signer_token: Address,
            signer_amount: u64,
            sender_wallet: Address,
            sender_token: Address,
            sender_amount: u64,
        ) -> Self {
            Self {
                nonce: U256::from(rand::random::<u64>()),
                expiry: u64::MAX,
                signer_wallet,
                signer_token,
                signer_amount: U256::from(signer_amount),
                signer_fee: U256::ZERO,
                sender_wallet,
                sender_token,
                sender_amount: U256::from(sender_amount),
            }
        }

        #[must_use]
        pub fn nonce(mut self, nonce: u64) -> Self {
            self.nonce = U256::from(nonce);
            self
        }

        #[must_use]
        pub fn expiry(mut self, expiry: Timestamp) -> Self {
            self.expiry = expiry;
            self
        }

        #[must_use]
        pub fn fee(mut self, fee: u64) -> Self {
            self.signer_fee = U256::from(fee);
            self
        }

        fn unsigned(&self) -> Order {
            Order {
                nonce: self.nonce,
                expiry: self.expiry,
                signer_wallet: self.signer_wallet,
                signer_token: self.signer_token,
                signer_amount: self.signer_amount,
                signer_fee: self.signer_fee,
                sender_wallet: self.sender_wallet,
                sender_token: self.sender_token,
                sender_amount: self.sender_amount,
                signature: OrderSignature::default(),
            }
        }

        /// Sign the terms with `signer` under `domain`.
        pub fn sign(&self, signer: &PrivateKeySigner, domain: &SwapDomain) -> Order {
            let mut order = self.unsigned();
            let digest = domain.order_digest(&order);
            let sig = signer
                .sign_hash_sync(&digest)
                .expect("local signing cannot fail");
            order.signature = OrderSignature::from_signature(&sig);
            order
        }
    }
}
