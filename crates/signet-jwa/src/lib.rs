//! JOSE signing algorithms (JWA).
//!
//! This crate provides the algorithm layer of the signet token stack:
//! - `none` (intentionally insecure, must be requested explicitly)
//! - HS256 / HS384 / HS512 (HMAC over SHA-2)
//! - ES256 (ECDSA P-256 + SHA-256, raw r||s signatures)
//!
//! Algorithms are a closed variant set rather than a trait hierarchy: each
//! variant carries its own key material and exposes `name`, `sign`, and
//! `verify`. Verification never errors — malformed signatures are `false`.

mod algorithm;
mod error;
mod es256;
mod hmac;

pub use algorithm::{Algorithm, HmacKey};
pub use error::JwaError;
pub use es256::generate_es256_keypair;

// Key types callers need to construct ES256 variants.
pub use p256::ecdsa::{SigningKey, VerifyingKey};
