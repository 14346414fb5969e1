use thiserror::Error;

/// Failure reasons from decoding a token.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidToken {
    /// Decoding the token itself failed.
    #[error("Decode Error: {0}")]
    DecodeError(String),

    /// No candidate algorithm both matched the declared name and verified
    /// the signature.
    #[error("Unsupported algorithm or incorrect key")]
    InvalidAlgorithm,

    /// The expiration claim is in the past.
    #[error("Expired Signature")]
    ExpiredSignature,

    /// The not-before claim is in the future.
    #[error("The token is not yet valid (not before claim)")]
    ImmatureSignature,

    /// The issued-at claim is in the future.
    #[error("Issued at claim (iat) is in the future")]
    InvalidIssuedAt,

    /// The audience claim doesn't match.
    #[error("Invalid Audience")]
    InvalidAudience,

    /// The issuer claim failed to verify.
    #[error("Invalid Issuer")]
    InvalidIssuer,
}

/// Failure reasons from encoding a token.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Claims are not representable as JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Signing(#[from] signet_jwa::JwaError),
}
