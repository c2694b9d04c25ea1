//! Fundamental types for the tonstake workspace.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: addresses, token amounts, token slugs, timestamps, and the
//! network identifier.

pub mod address;
pub mod amount;
pub mod network;
pub mod time;
pub mod token;

pub use address::TonAddress;
pub use amount::TokenAmount;
pub use network::Network;
pub use time::Timestamp;
pub use token::TokenSlug;
