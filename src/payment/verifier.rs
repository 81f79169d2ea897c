//! Transaction verifier: the comparison pipeline behind every payment decision.
//!
//! A single pass over one record:
//! classify contract → extract fields → normalize addresses → compare.
//! Extraction failures end the pass with exactly one reason and no details;
//! comparison failures are all collected.

use crate::address::AddressCodec;
use crate::amount::{format_smallest_unit, parse_decimal, serialize_as_string};
use crate::calldata::{CallDataDecoder, PaddingPolicy};
use crate::config::VerifierConfig;
use crate::error::Result;
use crate::payment::reason::{AddressRole, Reason};
use crate::payment::record::{ContractCall, TransactionRecord};
use crate::token::{KnownContracts, TokenKind};
use chrono::{DateTime, Utc};
use num_bigint::BigUint;
use serde::Serialize;
use tracing::{debug, info, warn};

/// What a payment request expects to receive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedPayment {
    /// Destination address, in either form.
    pub destination: String,
    /// Amount in smallest units.
    pub amount: BigUint,
    /// Expected asset.
    pub token_kind: TokenKind,
    /// Expected token contract; `None` skips the contract check.
    pub contract_address: Option<String>,
}

impl ExpectedPayment {
    /// Expect `amount` smallest units of `token_kind` at `destination`.
    #[must_use]
    pub fn new(destination: impl Into<String>, amount: BigUint, token_kind: TokenKind) -> Self {
        Self {
            destination: destination.into(),
            amount,
            token_kind,
            contract_address: None,
        }
    }

    /// Also require the given token contract.
    #[must_use]
    pub fn with_contract(mut self, contract_address: impl Into<String>) -> Self {
        self.contract_address = Some(contract_address.into());
        self
    }

    /// Build the expectation for a payment request stated in human units.
    ///
    /// The amount is scaled by the token's decimals and, for tokens, the
    /// contract is taken from `contracts`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MalformedAmount`] if `decimal_amount` is not a
    /// valid decimal.
    pub fn for_request(
        destination: impl Into<String>,
        decimal_amount: &str,
        token_kind: TokenKind,
        contracts: &KnownContracts,
    ) -> Result<Self> {
        let amount = parse_decimal(decimal_amount, token_kind.decimals())?;
        let contract_address = if token_kind.is_native() {
            None
        } else {
            contracts.contract_for(token_kind)
        };
        Ok(Self {
            destination: destination.into(),
            amount,
            token_kind,
            contract_address,
        })
    }
}

/// What the transaction actually did, with addresses in text form where valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentDetails {
    /// Transaction identifier.
    pub tx_id: String,
    /// Sender.
    pub from: String,
    /// Recipient.
    pub to: String,
    /// Amount in smallest units.
    #[serde(serialize_with = "serialize_as_string")]
    pub amount: BigUint,
    /// Transferred asset.
    pub token_kind: TokenKind,
    /// Invoked token contract, `None` for native transfers.
    pub contract_address: Option<String>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl PaymentDetails {
    /// Amount formatted with the token's decimals.
    #[must_use]
    pub fn display_amount(&self) -> String {
        format_smallest_unit(&self.amount, self.token_kind.decimals())
    }

    /// Timestamp as UTC, if it is in chrono's range.
    #[must_use]
    pub fn received_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

/// Outcome of one verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationVerdict {
    /// True iff `reasons` is empty.
    pub valid: bool,
    /// Distinct failure reasons in detection order.
    pub reasons: Vec<Reason>,
    /// Present whenever field extraction succeeded, valid or not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<PaymentDetails>,
}

impl VerificationVerdict {
    fn rejected(reason: Reason) -> Self {
        Self {
            valid: false,
            reasons: vec![reason],
            details: None,
        }
    }

    fn from_checks(reasons: Vec<Reason>, details: PaymentDetails) -> Self {
        Self {
            valid: reasons.is_empty(),
            reasons,
            details: Some(details),
        }
    }

    /// Human-readable reason messages.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.reasons.iter().map(ToString::to_string).collect()
    }
}

/// Fields pulled out of a record before comparison.
struct Extracted {
    from: String,
    to: String,
    amount: BigUint,
    token_kind: TokenKind,
    contract_address: Option<String>,
}

/// Ordered reason list that ignores duplicates.
#[derive(Default)]
struct Reasons(Vec<Reason>);

impl Reasons {
    fn push(&mut self, reason: Reason) {
        if !self.0.contains(&reason) {
            self.0.push(reason);
        }
    }
}

/// Verifies transaction records against payment expectations.
///
/// Immutable after construction and safe to share across threads.
#[derive(Debug, Clone)]
pub struct TransactionVerifier {
    codec: AddressCodec,
    decoder: CallDataDecoder,
    contracts: KnownContracts,
}

impl TransactionVerifier {
    /// Create a verifier for one network.
    #[must_use]
    pub fn new(codec: AddressCodec, contracts: KnownContracts, padding: PaddingPolicy) -> Self {
        Self {
            decoder: CallDataDecoder::new(*codec.format(), padding),
            codec,
            contracts,
        }
    }

    /// Create a verifier from configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the known-contract table is invalid.
    pub fn from_config(config: &VerifierConfig) -> Result<Self> {
        let verifier = Self::new(
            config.codec(),
            config.known_contracts()?,
            config.call_padding,
        );
        info!(
            "Transaction verifier initialized (known_contracts={}, call_padding={:?})",
            verifier.contracts.len(),
            config.call_padding
        );
        Ok(verifier)
    }

    /// Known-contract table in use.
    #[must_use]
    pub const fn contracts(&self) -> &KnownContracts {
        &self.contracts
    }

    /// Address codec in use.
    #[must_use]
    pub const fn codec(&self) -> &AddressCodec {
        &self.codec
    }

    /// Verify a record looked up by `requested_tx_id`.
    ///
    /// A missing record fails like an unsuccessful one; a record for another
    /// transaction fails with [`Reason::TransactionIdMismatch`].
    #[must_use]
    pub fn verify_by_id(
        &self,
        requested_tx_id: &str,
        record: Option<&TransactionRecord>,
        expected: &ExpectedPayment,
    ) -> VerificationVerdict {
        let Some(record) = record else {
            warn!("Transaction {} not found", requested_tx_id);
            return VerificationVerdict::rejected(Reason::TransactionNotFoundOrFailed);
        };
        if record.success && record.tx_id != requested_tx_id {
            warn!(
                "Requested transaction {} but record carries {}",
                requested_tx_id, record.tx_id
            );
            return VerificationVerdict::rejected(Reason::TransactionIdMismatch {
                requested: requested_tx_id.to_string(),
                actual: record.tx_id.clone(),
            });
        }
        self.verify(record, expected)
    }

    /// Verify that `record` satisfies `expected`.
    ///
    /// Never fails: every problem becomes a [`Reason`] in the verdict.
    #[must_use]
    pub fn verify(
        &self,
        record: &TransactionRecord,
        expected: &ExpectedPayment,
    ) -> VerificationVerdict {
        debug!("Verifying transaction {}", record.tx_id);

        if !record.success {
            warn!("Transaction {} not successful", record.tx_id);
            return VerificationVerdict::rejected(Reason::TransactionNotFoundOrFailed);
        }

        let extracted = match self.extract(&record.contract) {
            Ok(extracted) => extracted,
            Err(reason) => {
                warn!("Transaction {} rejected: {}", record.tx_id, reason);
                return VerificationVerdict::rejected(reason);
            }
        };

        let mut reasons = Reasons::default();
        let to = self.normalize(&extracted.to, AddressRole::Recipient, &mut reasons);
        let from = self.normalize(&extracted.from, AddressRole::Sender, &mut reasons);
        let destination =
            self.normalize(&expected.destination, AddressRole::Expected, &mut reasons);

        if !to.eq_ignore_ascii_case(&destination) {
            reasons.push(Reason::RecipientMismatch {
                expected: destination.clone(),
                actual: to.clone(),
            });
        }

        if extracted.amount != expected.amount {
            reasons.push(Reason::AmountMismatch {
                expected: expected.amount.to_string(),
                actual: extracted.amount.to_string(),
            });
        }

        if extracted.token_kind != expected.token_kind {
            reasons.push(Reason::TokenKindMismatch {
                expected: expected.token_kind,
                actual: extracted.token_kind,
            });
        }

        if let Some(expected_contract) = &expected.contract_address {
            if extracted.contract_address.as_ref() != Some(expected_contract) {
                reasons.push(Reason::ContractMismatch {
                    expected: expected_contract.clone(),
                    actual: extracted.contract_address.clone(),
                });
            }
        }

        if from.eq_ignore_ascii_case(&destination) {
            reasons.push(Reason::SelfPayment);
        }

        let details = PaymentDetails {
            tx_id: record.tx_id.clone(),
            from,
            to,
            amount: extracted.amount,
            token_kind: extracted.token_kind,
            contract_address: extracted.contract_address,
            timestamp: record.timestamp,
        };
        let verdict = VerificationVerdict::from_checks(reasons.0, details);

        if verdict.valid {
            info!(
                "Transaction {} verified: {} {}",
                record.tx_id,
                verdict
                    .details
                    .as_ref()
                    .map(PaymentDetails::display_amount)
                    .unwrap_or_default(),
                expected.token_kind
            );
        } else {
            warn!(
                "Transaction {} rejected: {}",
                record.tx_id,
                verdict.messages().join("; ")
            );
        }
        verdict
    }

    fn extract(&self, contract: &ContractCall) -> std::result::Result<Extracted, Reason> {
        match contract {
            ContractCall::NativeTransfer { owner, to, amount } => Ok(Extracted {
                from: owner.clone(),
                to: to.clone(),
                amount: amount.clone(),
                token_kind: TokenKind::NATIVE,
                contract_address: None,
            }),
            ContractCall::TokenCall {
                owner,
                contract_address,
                call_data,
            } => {
                let token_kind = self.contracts.resolve(contract_address);
                let call = self
                    .decoder
                    .decode(call_data)
                    .map_err(|e| Reason::CallDataRejected {
                        detail: e.to_string(),
                    })?;
                Ok(Extracted {
                    from: owner.clone(),
                    to: call.to_address_hex,
                    amount: call.amount,
                    token_kind,
                    contract_address: Some(contract_address.clone()),
                })
            }
            ContractCall::Unsupported { contract_type } => Err(Reason::UnsupportedContractType {
                contract_type: contract_type.clone(),
            }),
        }
    }

    /// Text form of `raw`, or `raw` itself with a recorded reason.
    fn normalize(&self, raw: &str, role: AddressRole, reasons: &mut Reasons) -> String {
        self.codec.normalize(raw).unwrap_or_else(|| {
            reasons.push(Reason::InvalidAddressFormat {
                role,
                address: raw.to_string(),
            });
            raw.to_string()
        })
    }
}
