//! Transaction records as reported by the ledger indexer.

use crate::amount::parse_integer;
use crate::error::{Error, Result};
use num_bigint::BigUint;
use serde::Deserialize;
use serde_json::Value;

/// Indexer contract type of a native transfer.
pub const NATIVE_TRANSFER_TYPE: &str = "TransferContract";

/// Indexer contract type of a smart contract call.
pub const TOKEN_CALL_TYPE: &str = "TriggerSmartContract";

/// Indexer result code of a successful transaction.
const SUCCESS_CODE: &str = "SUCCESS";

/// The single contract entry carried by a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractCall {
    /// Native asset moved directly between accounts.
    NativeTransfer {
        /// Sender address.
        owner: String,
        /// Recipient address.
        to: String,
        /// Amount in smallest units.
        amount: BigUint,
    },
    /// Contract invocation; the transfer details live in `call_data`.
    TokenCall {
        /// Sender address.
        owner: String,
        /// Invoked contract.
        contract_address: String,
        /// Hex encoded call payload.
        call_data: String,
    },
    /// Any other contract type.
    Unsupported {
        /// Indexer type tag.
        contract_type: String,
    },
}

/// A fetched transaction. Read-only input to verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    /// Transaction identifier.
    pub tx_id: String,
    /// Whether the ledger executed the transaction successfully.
    pub success: bool,
    /// The transaction's contract entry.
    pub contract: ContractCall,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

#[derive(Deserialize)]
struct RawTransaction {
    #[serde(rename = "txID")]
    tx_id: String,
    #[serde(default)]
    ret: Vec<RawResult>,
    raw_data: RawData,
}

#[derive(Deserialize)]
struct RawResult {
    #[serde(rename = "contractRet")]
    contract_ret: Option<String>,
}

#[derive(Deserialize)]
struct RawData {
    #[serde(default)]
    contract: Vec<RawContract>,
    #[serde(default)]
    timestamp: i64,
}

#[derive(Deserialize)]
struct RawContract {
    #[serde(rename = "type")]
    kind: String,
    parameter: RawParameter,
}

#[derive(Deserialize)]
struct RawParameter {
    value: Value,
}

/// Parse a `gettransactionbyid` response.
///
/// Returns `Ok(None)` for the empty object the indexer sends for unknown ids.
///
/// # Errors
///
/// Returns [`Error::MalformedRecord`] if the JSON does not have the expected
/// shape, or carries zero or several contract entries.
pub fn parse_trongrid_response(json: &str) -> Result<Option<TransactionRecord>> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| Error::MalformedRecord(e.to_string()))?;

    if value.as_object().is_some_and(serde_json::Map::is_empty) {
        return Ok(None);
    }

    let raw: RawTransaction =
        serde_json::from_value(value).map_err(|e| Error::MalformedRecord(e.to_string()))?;
    record_from_raw(raw).map(Some)
}

fn record_from_raw(raw: RawTransaction) -> Result<TransactionRecord> {
    let success = raw
        .ret
        .first()
        .and_then(|r| r.contract_ret.as_deref())
        == Some(SUCCESS_CODE);

    let mut contracts = raw.raw_data.contract.into_iter();
    let entry = match (contracts.next(), contracts.next()) {
        (Some(entry), None) => entry,
        (None, _) => {
            return Err(Error::MalformedRecord(format!(
                "transaction {} has no contract entry",
                raw.tx_id
            )))
        }
        (Some(_), Some(_)) => {
            return Err(Error::MalformedRecord(format!(
                "transaction {} has more than one contract entry",
                raw.tx_id
            )))
        }
    };

    Ok(TransactionRecord {
        contract: parse_contract(entry)?,
        tx_id: raw.tx_id,
        success,
        timestamp: raw.raw_data.timestamp,
    })
}

fn parse_contract(entry: RawContract) -> Result<ContractCall> {
    let value = &entry.parameter.value;
    match entry.kind.as_str() {
        NATIVE_TRANSFER_TYPE => Ok(ContractCall::NativeTransfer {
            owner: string_field(value, "owner_address")?,
            to: string_field(value, "to_address")?,
            amount: amount_field(value, "amount")?,
        }),
        TOKEN_CALL_TYPE => Ok(ContractCall::TokenCall {
            owner: string_field(value, "owner_address")?,
            contract_address: string_field(value, "contract_address")?,
            call_data: string_field(value, "data")?,
        }),
        other => Ok(ContractCall::Unsupported {
            contract_type: other.to_string(),
        }),
    }
}

fn string_field(value: &Value, name: &str) -> Result<String> {
    value
        .get(name)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| Error::MalformedRecord(format!("missing string field '{name}'")))
}

/// Amounts arrive as JSON numbers; digit strings are accepted too.
fn amount_field(value: &Value, name: &str) -> Result<BigUint> {
    match value.get(name) {
        Some(Value::Number(n)) => n
            .as_u64()
            .map(BigUint::from)
            .ok_or_else(|| Error::MalformedRecord(format!("'{name}' is not an unsigned integer"))),
        Some(Value::String(s)) => {
            parse_integer(s).map_err(|e| Error::MalformedRecord(format!("'{name}': {e}")))
        }
        _ => Err(Error::MalformedRecord(format!(
            "missing amount field '{name}'"
        ))),
    }
}
