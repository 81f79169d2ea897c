//! TRC-20 `transfer(address,uint256)` call data decoding.
//!
//! Layout (hex characters):
//!
//! ```text
//! | selector (8) | address word (64)         | amount word (64) |
//! | a9059cbb     | 24 padding + 40 identity  | big-endian uint  |
//! ```

use crate::address::{AddressFormat, IDENTITY_LEN};
use crate::error::{Error, Result};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Method selector of `transfer(address,uint256)`.
pub const TRANSFER_SELECTOR: &str = "a9059cbb";

const SELECTOR_HEX_LEN: usize = 8;
const WORD_HEX_LEN: usize = 64;
const IDENTITY_HEX_LEN: usize = IDENTITY_LEN * 2;
const PADDING_HEX_LEN: usize = WORD_HEX_LEN - IDENTITY_HEX_LEN;

/// Exact length of a transfer payload in hex characters.
pub const TRANSFER_CALL_HEX_LEN: usize = SELECTOR_HEX_LEN + 2 * WORD_HEX_LEN;

/// What to do with the 12 high bytes of the padded address word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaddingPolicy {
    /// Discard the padding whatever it holds.
    #[default]
    Lenient,
    /// Reject non-zero padding as malformed.
    Strict,
}

/// A decoded token transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferCall {
    /// Recipient as version-prefixed hex (`41...`), ready for the address codec.
    pub to_address_hex: String,
    /// Amount in the token's smallest unit.
    pub amount: BigUint,
}

/// Decodes token transfer call payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallDataDecoder {
    format: AddressFormat,
    padding: PaddingPolicy,
}

impl CallDataDecoder {
    /// Create a decoder producing addresses for `format`.
    #[must_use]
    pub const fn new(format: AddressFormat, padding: PaddingPolicy) -> Self {
        Self { format, padding }
    }

    /// Padding policy in effect.
    #[must_use]
    pub const fn padding(&self) -> PaddingPolicy {
        self.padding
    }

    /// Decode a `transfer(address,uint256)` payload.
    ///
    /// An optional `0x` prefix is accepted.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedCallSignature`] if the selector is not
    ///   [`TRANSFER_SELECTOR`]
    /// - [`Error::MalformedCallData`] if the payload is not exactly two words
    ///   of hex after the selector, or (under [`PaddingPolicy::Strict`]) the
    ///   address padding is non-zero
    pub fn decode(&self, payload: &str) -> Result<TransferCall> {
        let data = payload.strip_prefix("0x").unwrap_or(payload);

        let selector = data.get(..SELECTOR_HEX_LEN).unwrap_or(data);
        if !selector.eq_ignore_ascii_case(TRANSFER_SELECTOR) {
            return Err(Error::UnsupportedCallSignature(selector.to_string()));
        }

        if data.len() != TRANSFER_CALL_HEX_LEN {
            return Err(Error::MalformedCallData(format!(
                "expected {TRANSFER_CALL_HEX_LEN} hex characters, got {}",
                data.len()
            )));
        }
        if !data.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::MalformedCallData(
                "payload contains non-hex characters".to_string(),
            ));
        }

        let (address_word, amount_word) = data[SELECTOR_HEX_LEN..].split_at(WORD_HEX_LEN);
        let (padding, identity) = address_word.split_at(PADDING_HEX_LEN);

        if padding.bytes().any(|b| b != b'0') {
            match self.padding {
                PaddingPolicy::Strict => {
                    return Err(Error::MalformedCallData(format!(
                        "non-zero address padding {padding}"
                    )));
                }
                PaddingPolicy::Lenient => {
                    warn!("Discarding non-zero address padding {}", padding);
                }
            }
        }

        let amount = BigUint::parse_bytes(amount_word.as_bytes(), 16).ok_or_else(|| {
            Error::MalformedCallData(format!("invalid amount word {amount_word}"))
        })?;

        Ok(TransferCall {
            to_address_hex: format!(
                "{}{}",
                self.format.version_hex(),
                identity.to_ascii_lowercase()
            ),
            amount,
        })
    }
}
