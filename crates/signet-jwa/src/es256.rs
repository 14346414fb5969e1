//! ECDSA P-256 signing and verification for the ES256 variant.
//!
//! Signatures are raw IEEE P1363 `r || s` (64 bytes), the format JWS
//! carries in the signature segment.

use ecdsa::signature::{Signer, Verifier};
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};

use crate::error::JwaError;

/// Sign a message with ECDSA P-256 + SHA-256.
pub(crate) fn es256_sign(key: &SigningKey, message: &[u8]) -> Result<Vec<u8>, JwaError> {
    let signature: Signature = key
        .try_sign(message)
        .map_err(|e| JwaError::SigningFailed(e.to_string()))?;
    Ok(signature.to_bytes().to_vec())
}

/// Verify an ECDSA P-256 + SHA-256 signature.
///
/// Returns `true` if valid, `false` otherwise — a malformed signature is an
/// invalid one, never an error.
pub(crate) fn es256_verify(key: &VerifyingKey, message: &[u8], signature: &[u8]) -> bool {
    match Signature::from_slice(signature) {
        Ok(signature) => key.verify(message, &signature).is_ok(),
        Err(_) => false,
    }
}

/// Generate a new P-256 signing key pair.
pub fn generate_es256_keypair() -> SigningKey {
    SigningKey::random(&mut rand_core::OsRng)
}
