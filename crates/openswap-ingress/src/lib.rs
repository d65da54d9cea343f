//! # openswap-ingress
//!
//! **Security Envelope**: everything an order must clear before settlement
//! is allowed to move a single token.
//!
//! ## Architecture
//!
//! 1. **NonceLedger**: write-once `(signer wallet, nonce)` pairs
//! 2. **AuthorizationRegistry**: one delegate signer per wallet
//! 3. **OrderValidator**: hard gate (expiry, fee, signature, authorization, nonce)
//! 4. **TokenBank**: host token ledger with allowance-based batch transfers
//! 5. **SupplyConservation**: per-token minted/burned bookkeeping
//!
//! ## Order Flow
//!
//! ```text
//! signed Order → OrderValidator.validate() → NonceLedger.consume()
//!     → TokenLedger.transfer_batch() → Swap event
//! ```

pub mod authorization;
pub mod nonce_ledger;
pub mod supply_conservation;
pub mod token_ledger;
pub mod validator;

pub use authorization::AuthorizationRegistry;
pub use nonce_ledger::NonceLedger;
pub use supply_conservation::SupplyConservation;
pub use token_ledger::{TokenBank, TokenLedger, TokenTransfer};
pub use validator::{OrderValidator, ValidationContext};
