//! Structured verification failure reasons.

use crate::token::TokenKind;
use serde::Serialize;
use std::fmt;

/// Which address a format failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressRole {
    /// Sender recorded in the transaction.
    Sender,
    /// Recipient recorded in the transaction.
    Recipient,
    /// Destination the payment request expects.
    Expected,
}

impl fmt::Display for AddressRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sender => "sender",
            Self::Recipient => "recipient",
            Self::Expected => "expected recipient",
        })
    }
}

/// Why a transaction failed to satisfy a payment request.
///
/// Serialized with a `code` tag so callers can filter or localize without
/// parsing messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum Reason {
    /// The record is missing or the ledger did not execute it successfully.
    TransactionNotFoundOrFailed,
    /// The record describes a different transaction than the one requested.
    TransactionIdMismatch {
        /// Id the caller asked for.
        requested: String,
        /// Id carried by the record.
        actual: String,
    },
    /// The contract entry is neither a native transfer nor a token call.
    UnsupportedContractType {
        /// Indexer type tag.
        contract_type: String,
    },
    /// The token call payload could not be decoded.
    CallDataRejected {
        /// Decoder error.
        detail: String,
    },
    /// An address is in neither the hex nor the text form.
    InvalidAddressFormat {
        /// Which address.
        role: AddressRole,
        /// The raw value.
        address: String,
    },
    /// Funds went somewhere else.
    RecipientMismatch {
        /// Expected recipient (text form when valid).
        expected: String,
        /// Actual recipient (text form when valid).
        actual: String,
    },
    /// Amount differs from the request.
    AmountMismatch {
        /// Expected smallest-unit amount.
        expected: String,
        /// Transferred smallest-unit amount.
        actual: String,
    },
    /// Asset differs from the request.
    TokenKindMismatch {
        /// Requested asset.
        expected: TokenKind,
        /// Transferred asset.
        actual: TokenKind,
    },
    /// Token contract differs from the request.
    ContractMismatch {
        /// Requested contract.
        expected: String,
        /// Invoked contract, if any.
        actual: Option<String>,
    },
    /// The sender is the expected recipient.
    SelfPayment,
}

impl Reason {
    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::TransactionNotFoundOrFailed => "transaction_not_found_or_failed",
            Self::TransactionIdMismatch { .. } => "transaction_id_mismatch",
            Self::UnsupportedContractType { .. } => "unsupported_contract_type",
            Self::CallDataRejected { .. } => "call_data_rejected",
            Self::InvalidAddressFormat { .. } => "invalid_address_format",
            Self::RecipientMismatch { .. } => "recipient_mismatch",
            Self::AmountMismatch { .. } => "amount_mismatch",
            Self::TokenKindMismatch { .. } => "token_kind_mismatch",
            Self::ContractMismatch { .. } => "contract_mismatch",
            Self::SelfPayment => "self_payment",
        }
    }

    /// Returns true for reasons raised before any field comparison ran.
    #[must_use]
    pub const fn is_extraction_failure(&self) -> bool {
        matches!(
            self,
            Self::TransactionNotFoundOrFailed
                | Self::TransactionIdMismatch { .. }
                | Self::UnsupportedContractType { .. }
                | Self::CallDataRejected { .. }
        )
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TransactionNotFoundOrFailed => f.write_str("transaction not found or failed"),
            Self::TransactionIdMismatch { requested, actual } => write!(
                f,
                "transaction id mismatch: requested {requested}, got {actual}"
            ),
            Self::UnsupportedContractType { contract_type } => {
                write!(f, "unsupported transaction type: {contract_type}")
            }
            Self::CallDataRejected { detail } => {
                write!(f, "token transfer data rejected: {detail}")
            }
            Self::InvalidAddressFormat { role, address } => {
                write!(f, "invalid address format for {role}: {address}")
            }
            Self::RecipientMismatch { expected, actual } => write!(
                f,
                "recipient address mismatch: expected {expected}, got {actual}"
            ),
            Self::AmountMismatch { expected, actual } => {
                write!(f, "amount mismatch: expected {expected}, got {actual}")
            }
            Self::TokenKindMismatch { expected, actual } => {
                write!(f, "token type mismatch: expected {expected}, got {actual}")
            }
            Self::ContractMismatch { expected, actual } => write!(
                f,
                "contract address mismatch: expected {expected}, got {}",
                actual.as_deref().unwrap_or("none")
            ),
            Self::SelfPayment => f.write_str("self-payment detected"),
        }
    }
}
