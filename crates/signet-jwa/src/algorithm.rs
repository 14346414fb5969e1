//! The closed set of supported JOSE algorithms.

use std::fmt;

use p256::ecdsa::{SigningKey, VerifyingKey};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::JwaError;
use crate::es256::{es256_sign, es256_verify};
use crate::hmac::{hmac_sign, HmacHash};

/// HMAC key material, zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct HmacKey(Vec<u8>);

impl HmacKey {
    pub fn new(key: impl AsRef<[u8]>) -> Self {
        Self(key.as_ref().to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for HmacKey {
    // Key bytes must not appear in debug output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HmacKey(..)")
    }
}

/// A JSON Web Algorithm together with its key material.
///
/// <https://tools.ietf.org/html/rfc7518>
#[derive(Clone)]
pub enum Algorithm {
    /// No algorithm, i.e. insecure. Signs to the empty byte string and
    /// verifies only the empty signature. Never selected implicitly; a
    /// verifier must list it as a candidate to accept unsigned tokens.
    None,

    /// HMAC using SHA-256.
    Hs256(HmacKey),

    /// HMAC using SHA-384.
    Hs384(HmacKey),

    /// HMAC using SHA-512.
    Hs512(HmacKey),

    /// ECDSA P-256 + SHA-256 with a private key; signs and verifies.
    Es256(Box<SigningKey>),

    /// ECDSA P-256 + SHA-256 with a public key only; verifies.
    Es256Public(Box<VerifyingKey>),
}

impl Algorithm {
    pub fn hs256(key: impl AsRef<[u8]>) -> Self {
        Algorithm::Hs256(HmacKey::new(key))
    }

    pub fn hs384(key: impl AsRef<[u8]>) -> Self {
        Algorithm::Hs384(HmacKey::new(key))
    }

    pub fn hs512(key: impl AsRef<[u8]>) -> Self {
        Algorithm::Hs512(HmacKey::new(key))
    }

    pub fn es256(key: SigningKey) -> Self {
        Algorithm::Es256(Box::new(key))
    }

    pub fn es256_public(key: VerifyingKey) -> Self {
        Algorithm::Es256Public(Box::new(key))
    }

    /// The canonical JOSE name, used for the header "alg" field and for
    /// matching candidates during verification.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::None => "none",
            Algorithm::Hs256(_) => "HS256",
            Algorithm::Hs384(_) => "HS384",
            Algorithm::Hs512(_) => "HS512",
            Algorithm::Es256(_) | Algorithm::Es256Public(_) => "ES256",
        }
    }

    /// Sign a message, returning the raw signature bytes.
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>, JwaError> {
        match self {
            Algorithm::None => Ok(Vec::new()),
            Algorithm::Hs256(key) => hmac_sign(HmacHash::Sha256, key.as_bytes(), message),
            Algorithm::Hs384(key) => hmac_sign(HmacHash::Sha384, key.as_bytes(), message),
            Algorithm::Hs512(key) => hmac_sign(HmacHash::Sha512, key.as_bytes(), message),
            Algorithm::Es256(key) => es256_sign(key, message),
            Algorithm::Es256Public(_) => Err(JwaError::MissingPrivateKey(self.name())),
        }
    }

    /// Verify a signature for a message. Never errors; any failure to sign
    /// or parse is an invalid signature.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        match self {
            Algorithm::None
            | Algorithm::Hs256(_)
            | Algorithm::Hs384(_)
            | Algorithm::Hs512(_) => match self.sign(message) {
                // Constant-time compare; a length mismatch is an immediate
                // rejection either way.
                Ok(expected) => expected.ct_eq(signature).into(),
                Err(_) => false,
            },
            Algorithm::Es256(key) => es256_verify(key.verifying_key(), message, signature),
            Algorithm::Es256Public(key) => es256_verify(key, message, signature),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Debug for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::None => f.write_str("None"),
            Algorithm::Hs256(_) => f.write_str("Hs256(..)"),
            Algorithm::Hs384(_) => f.write_str("Hs384(..)"),
            Algorithm::Hs512(_) => f.write_str("Hs512(..)"),
            Algorithm::Es256(_) => f.write_str("Es256(..)"),
            Algorithm::Es256Public(_) => f.write_str("Es256Public(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::es256::generate_es256_keypair;

    #[test]
    fn canonical_names() {
        assert_eq!(Algorithm::None.name(), "none");
        assert_eq!(Algorithm::hs256("secret").name(), "HS256");
        assert_eq!(Algorithm::hs384("secret").name(), "HS384");
        assert_eq!(Algorithm::hs512("secret").name(), "HS512");

        let key = generate_es256_keypair();
        assert_eq!(Algorithm::es256_public(key.verifying_key().clone()).name(), "ES256");
        assert_eq!(Algorithm::es256(key).name(), "ES256");
    }

    #[test]
    fn none_signs_to_empty() {
        assert_eq!(Algorithm::None.sign(b"message").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn none_verifies_only_empty_signature() {
        assert!(Algorithm::None.verify(b"message", b""));
        assert!(!Algorithm::None.verify(b"message", b"anything"));
    }

    #[test]
    fn hmac_sign_verify_round_trip() {
        let algorithm = Algorithm::hs256("secret");
        let signature = algorithm.sign(b"message").unwrap();
        assert!(algorithm.verify(b"message", &signature));
    }

    #[test]
    fn hmac_wrong_key_rejected() {
        let signature = Algorithm::hs256("secret").sign(b"message").unwrap();
        assert!(!Algorithm::hs256("other").verify(b"message", &signature));
    }

    #[test]
    fn hmac_wrong_message_rejected() {
        let algorithm = Algorithm::hs256("secret");
        let signature = algorithm.sign(b"original").unwrap();
        assert!(!algorithm.verify(b"tampered", &signature));
    }

    #[test]
    fn hmac_sign_is_deterministic() {
        let algorithm = Algorithm::hs512("secret");
        assert_eq!(
            algorithm.sign(b"message").unwrap(),
            algorithm.sign(b"message").unwrap()
        );
    }

    #[test]
    fn es256_round_trip_with_private_key() {
        let algorithm = Algorithm::es256(generate_es256_keypair());
        let signature = algorithm.sign(b"message").unwrap();
        assert!(algorithm.verify(b"message", &signature));
    }

    #[test]
    fn es256_public_verifies_but_cannot_sign() {
        let key = generate_es256_keypair();
        let signer = Algorithm::es256(key.clone());
        let verifier = Algorithm::es256_public(key.verifying_key().clone());

        let signature = signer.sign(b"message").unwrap();
        assert!(verifier.verify(b"message", &signature));
        assert_eq!(
            verifier.sign(b"message"),
            Err(JwaError::MissingPrivateKey("ES256"))
        );
    }

    #[test]
    fn debug_does_not_leak_key_material() {
        let rendered = format!("{:?}", Algorithm::hs256("super-secret-key"));
        assert!(!rendered.contains("super-secret-key"));
    }
}
