//! HMAC-SHA2 signing for the HS256/HS384/HS512 variants.

use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

use crate::error::JwaError;

/// The SHA-2 width an HMAC variant runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HmacHash {
    Sha256,
    Sha384,
    Sha512,
}

pub(crate) fn hmac_sign(
    hash: HmacHash,
    key: &[u8],
    message: &[u8],
) -> Result<Vec<u8>, JwaError> {
    match hash {
        HmacHash::Sha256 => compute::<Hmac<Sha256>>(key, message),
        HmacHash::Sha384 => compute::<Hmac<Sha384>>(key, message),
        HmacHash::Sha512 => compute::<Hmac<Sha512>>(key, message),
    }
}

fn compute<M: Mac + KeyInit>(key: &[u8], message: &[u8]) -> Result<Vec<u8>, JwaError> {
    let mut mac =
        <M as Mac>::new_from_slice(key).map_err(|e| JwaError::SigningFailed(e.to_string()))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}
