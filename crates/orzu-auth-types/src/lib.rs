//! Auth token types shared across Orzu crates.
//!
//! Provides the JWT claim shape, token-lifetime constants, and validation.
//! Token issuance lives in the accounts service — it is the sole issuer.

pub mod token;
