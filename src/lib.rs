//! # tronpay
//!
//! Verification core for TRON payments: decides whether a fetched transaction
//! satisfies a previously issued payment request.
//!
//! ## Components
//!
//! - [`address`]: Base58Check codec between the 21-byte binary form (`41...`)
//!   and the 34-character text form (`T...`)
//! - [`amount`]: exact decimal ⇄ smallest-unit conversion
//! - [`calldata`]: TRC-20 `transfer(address,uint256)` payload decoder
//! - [`payment`]: the verification pipeline producing a [`VerificationVerdict`]
//!
//! Everything here is pure and synchronous. Fetching the transaction from an
//! indexer, persisting requests and rate limiting belong to the caller.
//!
//! ## Example
//!
//! ```no_run
//! use tronpay::{ExpectedPayment, TokenKind, TransactionVerifier, VerifierConfig};
//!
//! # fn run(json: &str) -> tronpay::Result<()> {
//! let verifier = TransactionVerifier::from_config(&VerifierConfig::default())?;
//! let record = tronpay::parse_trongrid_response(json)?;
//! let expected = ExpectedPayment::for_request(
//!     "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t",
//!     "12.5",
//!     TokenKind::Usdt,
//!     verifier.contracts(),
//! )?;
//! let verdict = verifier.verify_by_id("deadbeef", record.as_ref(), &expected);
//! println!("valid = {}", verdict.valid);
//! # Ok(())
//! # }
//! ```

pub mod address;
pub mod amount;
pub mod calldata;
pub mod config;
pub mod error;
pub mod payment;
pub mod token;

pub use address::{
    decode_address, encode_address, is_hex_address, is_text_address, AddressCodec,
    AddressFormat, BinaryAddress,
};
pub use amount::{to_decimal, to_smallest_unit};
pub use calldata::{CallDataDecoder, PaddingPolicy, TransferCall};
pub use config::VerifierConfig;
pub use error::{Error, Result};
pub use payment::{
    parse_trongrid_response, ContractCall, ExpectedPayment, PaymentDetails, Reason,
    TransactionRecord, TransactionVerifier, VerificationVerdict,
};
pub use token::{KnownContracts, TokenKind};
