//! Base58Check address codec.
//!
//! A TRON address has two lossless representations:
//!
//! - **binary**: one version byte followed by the 20-byte account identity
//!   (21 bytes, usually written as 42 hex characters starting with `41`)
//! - **text**: the binary form plus a 4-byte checksum, Base58 encoded
//!   (34 characters starting with `T`)
//!
//! The checksum is the first 4 bytes of `SHA-256(SHA-256(binary))`. Text
//! that fails the checksum is rejected, never repaired.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Length of the account identity that follows the version byte.
pub const IDENTITY_LEN: usize = 20;

/// Length of a binary address (version byte + identity).
pub const BINARY_ADDRESS_LEN: usize = 1 + IDENTITY_LEN;

/// Length of the hex form of a binary address, without any `0x` prefix.
pub const HEX_ADDRESS_LEN: usize = BINARY_ADDRESS_LEN * 2;

/// Number of checksum bytes appended before Base58 encoding.
pub const CHECKSUM_LEN: usize = 4;

/// Version byte of TRON mainnet addresses.
pub const MAINNET_VERSION_BYTE: u8 = 0x41;

/// Leading character of TRON mainnet text addresses.
pub const MAINNET_TEXT_PREFIX: char = 'T';

/// Length of TRON mainnet text addresses.
pub const MAINNET_TEXT_LEN: usize = 34;

/// Optional prefix accepted in front of hex addresses.
const HEX_PREFIX: &str = "0x";

/// Binary address: version byte followed by the 20-byte identity.
pub type BinaryAddress = [u8; BINARY_ADDRESS_LEN];

/// Network-specific address constants.
///
/// Defaults to TRON mainnet. Other deployments override these through the
/// `[network]` table of the configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressFormat {
    /// First byte of every binary address.
    pub version_byte: u8,
    /// First character of every text address.
    pub text_prefix: char,
    /// Exact length of a text address.
    pub text_len: usize,
}

impl AddressFormat {
    /// TRON mainnet constants.
    pub const MAINNET: Self = Self {
        version_byte: MAINNET_VERSION_BYTE,
        text_prefix: MAINNET_TEXT_PREFIX,
        text_len: MAINNET_TEXT_LEN,
    };

    /// Version byte as two lowercase hex characters (`"41"` on mainnet).
    #[must_use]
    pub fn version_hex(&self) -> String {
        hex::encode([self.version_byte])
    }
}

impl Default for AddressFormat {
    fn default() -> Self {
        Self::MAINNET
    }
}

/// Converts addresses between their binary and text forms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddressCodec {
    format: AddressFormat,
}

impl AddressCodec {
    /// Create a codec for the given network constants.
    #[must_use]
    pub const fn new(format: AddressFormat) -> Self {
        Self { format }
    }

    /// Network constants used by this codec.
    #[must_use]
    pub const fn format(&self) -> &AddressFormat {
        &self.format
    }

    /// Encode a binary address into its checksummed text form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedAddress`] unless `binary` is exactly 21 bytes
    /// starting with the network version byte.
    pub fn encode(&self, binary: &[u8]) -> Result<String> {
        self.check_binary(binary)?;

        let mut buf = Vec::with_capacity(BINARY_ADDRESS_LEN + CHECKSUM_LEN);
        buf.extend_from_slice(binary);
        buf.extend_from_slice(&checksum(binary));

        Ok(bs58::encode(buf).into_string())
    }

    /// Decode a text address into its binary form.
    ///
    /// The checksum is verified before the payload shape, so any corruption of
    /// a well-formed address reports [`Error::ChecksumMismatch`].
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidEncoding`] for characters outside the Base58 alphabet
    ///   or input too short to carry a checksum
    /// - [`Error::ChecksumMismatch`] if the trailing 4 bytes do not match
    /// - [`Error::MalformedAddress`] if the checksummed payload is not a
    ///   21-byte address for this network
    pub fn decode(&self, text: &str) -> Result<BinaryAddress> {
        let raw = bs58::decode(text)
            .into_vec()
            .map_err(|e| Error::InvalidEncoding(e.to_string()))?;

        if raw.len() <= CHECKSUM_LEN {
            return Err(Error::InvalidEncoding(format!(
                "decoded {} bytes, too short to carry a checksum",
                raw.len()
            )));
        }

        let (payload, check) = raw.split_at(raw.len() - CHECKSUM_LEN);
        if check != checksum(payload).as_slice() {
            return Err(Error::ChecksumMismatch);
        }

        self.check_binary(payload)?;
        let mut binary = [0u8; BINARY_ADDRESS_LEN];
        binary.copy_from_slice(payload);
        Ok(binary)
    }

    /// Returns true if `text` is a valid text address for this network.
    #[must_use]
    pub fn is_valid_text(&self, text: &str) -> bool {
        text.starts_with(self.format.text_prefix)
            && text.len() == self.format.text_len
            && self.decode(text).is_ok()
    }

    /// Returns true if `s` is a 42-character hex address (optional `0x`)
    /// starting with the network version byte.
    #[must_use]
    pub fn is_valid_hex(&self, s: &str) -> bool {
        let body = s.strip_prefix(HEX_PREFIX).unwrap_or(s);
        body.len() == HEX_ADDRESS_LEN
            && body.bytes().all(|b| b.is_ascii_hexdigit())
            && body
                .get(..2)
                .is_some_and(|v| v.eq_ignore_ascii_case(&self.format.version_hex()))
    }

    /// Convert a hex address (`41...` or `0x41...`) to text form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedAddress`] if the hex is invalid or the bytes
    /// are not a binary address for this network.
    pub fn hex_to_text(&self, hex_address: &str) -> Result<String> {
        let body = hex_address.strip_prefix(HEX_PREFIX).unwrap_or(hex_address);
        let binary = hex::decode(body)
            .map_err(|e| Error::MalformedAddress(format!("'{hex_address}': {e}")))?;
        self.encode(&binary)
    }

    /// Convert a text address to lowercase hex form (`41...`).
    ///
    /// # Errors
    ///
    /// Same as [`AddressCodec::decode`].
    pub fn text_to_hex(&self, text: &str) -> Result<String> {
        self.decode(text).map(hex::encode)
    }

    /// Parse an address given in either form.
    #[must_use]
    pub fn parse_any(&self, raw: &str) -> Option<BinaryAddress> {
        if self.is_valid_hex(raw) {
            let body = raw.strip_prefix(HEX_PREFIX).unwrap_or(raw);
            let mut binary = [0u8; BINARY_ADDRESS_LEN];
            hex::decode_to_slice(body, &mut binary).ok()?;
            Some(binary)
        } else if self.is_valid_text(raw) {
            self.decode(raw).ok()
        } else {
            None
        }
    }

    /// Normalize an address in either form to text form.
    ///
    /// Returns `None` if `raw` is neither a valid hex nor a valid text address.
    #[must_use]
    pub fn normalize(&self, raw: &str) -> Option<String> {
        if self.is_valid_hex(raw) {
            self.hex_to_text(raw).ok()
        } else if self.is_valid_text(raw) {
            Some(raw.to_string())
        } else {
            None
        }
    }

    fn check_binary(&self, binary: &[u8]) -> Result<()> {
        if binary.len() != BINARY_ADDRESS_LEN {
            return Err(Error::MalformedAddress(format!(
                "expected {BINARY_ADDRESS_LEN} bytes, got {}",
                binary.len()
            )));
        }
        if binary.first() != Some(&self.format.version_byte) {
            return Err(Error::MalformedAddress(format!(
                "address must start with version byte 0x{}",
                self.format.version_hex()
            )));
        }
        Ok(())
    }
}

/// First 4 bytes of the double SHA-256 of `payload`.
fn checksum(payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = Sha256::digest(Sha256::digest(payload));
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[..CHECKSUM_LEN]);
    out
}

/// Encode a mainnet binary address into text form.
///
/// # Errors
///
/// See [`AddressCodec::encode`].
pub fn encode_address(binary: &[u8]) -> Result<String> {
    AddressCodec::default().encode(binary)
}

/// Decode a mainnet text address into binary form.
///
/// # Errors
///
/// See [`AddressCodec::decode`].
pub fn decode_address(text: &str) -> Result<BinaryAddress> {
    AddressCodec::default().decode(text)
}

/// Returns true if `s` is a valid mainnet text address.
#[must_use]
pub fn is_text_address(s: &str) -> bool {
    AddressCodec::default().is_valid_text(s)
}

/// Returns true if `s` is a valid mainnet hex address.
#[must_use]
pub fn is_hex_address(s: &str) -> bool {
    AddressCodec::default().is_valid_hex(s)
}
