//! TON contract address type (user-friendly base64 form).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A TON address in user-friendly form, e.g. `EQ…` (bounceable) or
/// `UQ…` (non-bounceable), 48 characters of URL-safe base64.
///
/// The engine treats addresses as opaque routing identifiers; parsing the
/// workchain/hash out of them is the transfer pipeline's concern.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TonAddress(String);

impl TonAddress {
    /// User-friendly address length (base64, with tag and CRC).
    pub const LEN: usize = 48;

    /// Create an address from a raw string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate that this address is well-formed (length and flag prefix).
    pub fn is_valid(&self) -> bool {
        self.0.len() == Self::LEN
            && (self.0.starts_with("EQ")
                || self.0.starts_with("UQ")
                || self.0.starts_with("kQ")
                || self.0.starts_with("0Q"))
    }
}

impl fmt::Display for TonAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TonAddress {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for TonAddress {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
