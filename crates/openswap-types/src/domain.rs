//! EIP-712 signing domain for orders.
//!
//! The digest binds the chain identifier and the settlement contract address,
//! so an order signed for one deployment cannot replay against another.
//!
//! ```text
//! LightOrder(uint256 nonce,uint256 expiry,address signerWallet,address signerToken,
//!            uint256 signerAmount,uint256 signerFee,address senderWallet,
//!            address senderToken,uint256 senderAmount)
//! ```

use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::{Eip712Domain, SolStruct, eip712_domain, sol};
use serde::{Deserialize, Serialize};

use crate::{Order, constants};

sol! {
    /// Typed-data layout hashed for order signatures.
    struct LightOrder {
        uint256 nonce;
        uint256 expiry;
        address signerWallet;
        address signerToken;
        uint256 signerAmount;
        uint256 signerFee;
        address senderWallet;
        address senderToken;
        uint256 senderAmount;
    }
}

impl From<&Order> for LightOrder {
    fn from(order: &Order) -> Self {
        Self {
            nonce: order.nonce,
            expiry: U256::from(order.expiry),
            signerWallet: order.signer_wallet,
            signerToken: order.signer_token,
            signerAmount: order.signer_amount,
            signerFee: order.signer_fee,
            senderWallet: order.sender_wallet,
            senderToken: order.sender_token,
            senderAmount: order.sender_amount,
        }
    }
}

/// The deployment an order is signed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapDomain {
    pub chain_id: u64,
    /// Address of the settlement contract.
    pub verifying_contract: Address,
}

impl SwapDomain {
    #[must_use]
    pub fn new(chain_id: u64, verifying_contract: Address) -> Self {
        Self {
            chain_id,
            verifying_contract,
        }
    }

    #[must_use]
    pub fn eip712(&self) -> Eip712Domain {
        eip712_domain! {
            name: constants::DOMAIN_NAME,
            version: constants::DOMAIN_VERSION,
            chain_id: self.chain_id,
            verifying_contract: self.verifying_contract,
        }
    }

    /// `DOMAIN_SEPARATOR` as exposed by the contract.
    #[must_use]
    pub fn separator(&self) -> B256 {
        self.eip712().separator()
    }

    /// EIP-712 signing hash of every order field except the signature.
    #[must_use]
    pub fn order_digest(&self, order: &Order) -> B256 {
        LightOrder::from(order).eip712_signing_hash(&self.eip712())
    }
}
