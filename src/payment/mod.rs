//! Payment verification for tronpay.
//!
//! Decides whether a fetched transaction satisfies a payment request.
//!
//! # Architecture
//!
//! ```text
//! TransactionRecord + ExpectedPayment
//!        │
//!        ▼
//! ┌─────────────────────┐
//! │ success flag set?   │── no ──▶ Invalid (not found or failed)
//! └─────────┬───────────┘
//!           │
//!    ┌──────┴──────┐
//!    │             │
//!  NATIVE        TOKEN CALL
//!    │             │
//!    │       decode call data ── error ──▶ Invalid (no details)
//!    │             │
//!    └──────┬──────┘
//!           ▼
//!  normalize addresses to text form
//!           │
//!           ▼
//!  compare recipient, amount, token,
//!  contract, sender ≠ recipient
//!           │
//!           ▼
//!  Valid │ Invalid(all reasons) + details
//! ```

mod reason;
mod record;
mod verifier;

pub use reason::{AddressRole, Reason};
pub use record::{
    parse_trongrid_response, ContractCall, TransactionRecord, NATIVE_TRANSFER_TYPE,
    TOKEN_CALL_TYPE,
};
pub use verifier::{ExpectedPayment, PaymentDetails, TransactionVerifier, VerificationVerdict};
