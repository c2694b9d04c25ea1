//! Token slug type and well-known slugs.
//!
//! A slug is the wallet's stable identifier for a token across chains and
//! contract migrations; balances are keyed by slug, not by master address.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Slug for the native coin.
pub const TONCOIN_SLUG: &str = "toncoin";
/// Slug for the liquid-staking share token.
pub const STAKED_TON_SLUG: &str = "ton-stton";
/// Slug for the synthetic-vault wrapped token.
pub const TS_USDE_SLUG: &str = "ton-tsusde";
/// Slug for the synthetic-vault deposit token.
pub const USDE_SLUG: &str = "ton-usde";

/// A stable token identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenSlug(String);

impl TokenSlug {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn toncoin() -> Self {
        Self::new(TONCOIN_SLUG)
    }
}

impl fmt::Display for TokenSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TokenSlug {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
