use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum JwaError {
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    #[error("Cannot sign with {0}: no private key available")]
    MissingPrivateKey(&'static str),
}
