//! Token kinds and the known-contract table.

use crate::address::{AddressCodec, BinaryAddress};
use crate::amount::DEFAULT_DECIMALS;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// USDT TRC-20 contract on mainnet.
pub const USDT_CONTRACT: &str = "41a614f803b6fd780986a42c78ec9c7f77e6ded13c";

/// USDC TRC-20 contract on mainnet.
pub const USDC_CONTRACT: &str = "41b8ae8b62f2a4cc78e3f66c45b5acfedb924fd2a6";

/// Asset moved by a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TokenKind {
    /// Native TRX.
    Trx,
    /// Tether USD (TRC-20).
    Usdt,
    /// USD Coin (TRC-20).
    Usdc,
    /// A token contract not in the known-contract table.
    Other,
}

impl TokenKind {
    /// The ledger's native asset.
    pub const NATIVE: Self = Self::Trx;

    /// Returns true for the native asset.
    #[must_use]
    pub fn is_native(self) -> bool {
        self == Self::NATIVE
    }

    /// Fractional digits of the asset's smallest unit.
    #[must_use]
    pub const fn decimals(self) -> u32 {
        match self {
            Self::Trx | Self::Usdt | Self::Usdc | Self::Other => DEFAULT_DECIMALS,
        }
    }

    /// Ticker symbol.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trx => "TRX",
            Self::Usdt => "USDT",
            Self::Usdc => "USDC",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "TRX" => Ok(Self::Trx),
            "USDT" => Ok(Self::Usdt),
            "USDC" => Ok(Self::Usdc),
            "OTHER" => Ok(Self::Other),
            _ => Err(Error::Config(format!("unknown token kind '{s}'"))),
        }
    }
}

/// Immutable mapping from token contract address to token kind.
///
/// Keys are stored as binary addresses, so lookups succeed whichever form the
/// caller or the indexer uses.
#[derive(Debug, Clone, Default)]
pub struct KnownContracts {
    codec: AddressCodec,
    by_address: HashMap<BinaryAddress, TokenKind>,
}

impl KnownContracts {
    /// Build the table from `(address, kind)` pairs, addresses in either form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if an address is invalid for the codec's
    /// network or is mapped to the native asset.
    pub fn new<I, S>(codec: AddressCodec, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, TokenKind)>,
        S: AsRef<str>,
    {
        let mut by_address = HashMap::new();
        for (address, kind) in entries {
            let address = address.as_ref();
            if kind.is_native() {
                return Err(Error::Config(format!(
                    "contract {address} cannot map to the native asset"
                )));
            }
            let key = codec.parse_any(address).ok_or_else(|| {
                Error::Config(format!("known contract '{address}' is not a valid address"))
            })?;
            by_address.insert(key, kind);
        }
        Ok(Self { codec, by_address })
    }

    /// USDT and USDC on mainnet.
    ///
    /// # Errors
    ///
    /// Only fails if the built-in addresses were edited into invalid ones.
    pub fn mainnet() -> Result<Self> {
        Self::new(AddressCodec::default(), default_entries())
    }

    /// Token kind for a contract address; [`TokenKind::Other`] when unknown.
    #[must_use]
    pub fn resolve(&self, contract_address: &str) -> TokenKind {
        self.codec
            .parse_any(contract_address)
            .and_then(|key| self.by_address.get(&key).copied())
            .unwrap_or(TokenKind::Other)
    }

    /// Hex form (`41...`) of the contract configured for `kind`.
    ///
    /// When several contracts map to the same kind, the lowest address wins.
    #[must_use]
    pub fn contract_for(&self, kind: TokenKind) -> Option<String> {
        self.by_address
            .iter()
            .filter(|(_, k)| **k == kind)
            .map(|(address, _)| address)
            .min()
            .map(hex::encode)
    }

    /// Number of known contracts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_address.len()
    }

    /// Returns true if no contract is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_address.is_empty()
    }
}

/// Built-in mainnet table.
#[must_use]
pub fn default_entries() -> Vec<(&'static str, TokenKind)> {
    vec![(USDT_CONTRACT, TokenKind::Usdt), (USDC_CONTRACT, TokenKind::Usdc)]
}
