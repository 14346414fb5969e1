//! Compact JWS token encoding, decoding, and claim validation.
//!
//! A token is three Base64URL segments joined by `.`: a JSON header, a JSON
//! claim payload, and a raw signature computed over the first two segments.
//! Encoding composes a [`ClaimSet`] and an [`Algorithm`] into that string;
//! decoding parses it back, validates the registered time and identity
//! claims, and verifies the signature against a caller-supplied candidate
//! list. The header's declared algorithm is matched by name against the
//! candidates and is never trusted on its own to select key material.

pub mod base64url;
mod claims;
mod codec;
mod decode;
mod encode;
mod error;
mod header;
mod validation;

pub use claims::{ClaimSet, ClaimSetBuilder};
pub use decode::{decode, decode_with_options, DecodeOptions};
pub use encode::{encode, encode_claims, encode_with};
pub use error::{EncodeError, InvalidToken};
pub use header::JoseHeader;

// Re-export the algorithm layer so callers need a single dependency.
pub use signet_jwa::{Algorithm, JwaError};
