//! Indexer response fixtures.

use tronpay::calldata::TRANSFER_SELECTOR;

/// Payer account.
pub const PAYER_HEX: &str = "41c8599c4cd9e6e3b1b4f1b2c7a0d6e5f4a3b2c1d0";

/// Payment gateway account.
pub const GATEWAY_HEX: &str = "419e62be7f4f103c36507cb2a753418791b1cdc182";

/// USDT TRC-20 contract.
pub const USDT_HEX: &str = "41a614f803b6fd780986a42c78ec9c7f77e6ded13c";

/// USDT TRC-20 contract, text form.
pub const USDT_TEXT: &str = "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t";

/// `gettransactionbyid` response for a native TRX transfer.
pub fn native_response(tx_id: &str, from: &str, to: &str, amount: u64, result: &str) -> String {
    format!(
        r#"{{
            "ret": [{{"contractRet": "{result}"}}],
            "signature": ["00"],
            "txID": "{tx_id}",
            "raw_data": {{
                "contract": [{{
                    "parameter": {{
                        "value": {{
                            "amount": {amount},
                            "owner_address": "{from}",
                            "to_address": "{to}"
                        }},
                        "type_url": "type.googleapis.com/protocol.TransferContract"
                    }},
                    "type": "TransferContract"
                }}],
                "ref_block_bytes": "2b3c",
                "expiration": 1700000060000,
                "timestamp": 1700000000000
            }}
        }}"#
    )
}

/// `gettransactionbyid` response for a TRC-20 `transfer` call.
pub fn token_response(tx_id: &str, contract: &str, call_data: &str) -> String {
    format!(
        r#"{{
            "ret": [{{"contractRet": "SUCCESS"}}],
            "txID": "{tx_id}",
            "raw_data": {{
                "contract": [{{
                    "parameter": {{
                        "value": {{
                            "data": "{call_data}",
                            "owner_address": "{PAYER_HEX}",
                            "contract_address": "{contract}"
                        }},
                        "type_url": "type.googleapis.com/protocol.TriggerSmartContract"
                    }},
                    "type": "TriggerSmartContract"
                }}],
                "fee_limit": 100000000,
                "timestamp": 1700000000000
            }}
        }}"#
    )
}

/// Call data for `transfer(to, amount)`; `amount_hex` is left-padded to a word.
pub fn transfer_call(to_hex: &str, amount_hex: &str) -> String {
    format!(
        "{TRANSFER_SELECTOR}{:0>64}{amount_hex:0>64}",
        &to_hex[2..]
    )
}
