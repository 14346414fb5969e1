//! The decode/verify pipeline.
//!
//! Structural parsing always precedes semantic checks, and claim validation
//! runs before signature verification — an expired token reports its expiry
//! even when the signature would also have failed. Both orderings are
//! user-observable and pinned by tests.

use serde_json::Value;
use signet_jwa::Algorithm;
use tracing::debug;

use crate::base64url::base64url_decode;
use crate::claims::ClaimSet;
use crate::codec::{decode_segment, SegmentError};
use crate::error::InvalidToken;
use crate::header::JoseHeader;

/// Options for [`decode_with_options`].
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    /// Run claim validation and signature verification. Defaults to `true`;
    /// disabling it still enforces the structural checks.
    pub verify: bool,

    /// Expected audience; when set, the "aud" claim must match.
    pub audience: Option<String>,

    /// Expected issuer; when set, the "iss" claim must match.
    pub issuer: Option<String>,

    /// Clock-skew tolerance in seconds for the time claims.
    pub leeway: i64,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            verify: true,
            audience: None,
            issuer: None,
            leeway: 0,
        }
    }
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    pub fn audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn leeway(mut self, leeway: i64) -> Self {
        self.leeway = leeway;
        self
    }
}

/// Decode a token, validating claims and verifying the signature against
/// the candidate algorithms with default options.
///
/// The candidate list is also the way to try multiple keys. Restrict it to
/// keys appropriate for the algorithm family you expect: listing candidates
/// of mixed families reintroduces the key-confusion risk the name matching
/// exists to prevent.
pub fn decode(token: &str, algorithms: &[Algorithm]) -> Result<ClaimSet, InvalidToken> {
    decode_with_options(token, algorithms, &DecodeOptions::default())
}

/// Decode a token with explicit options.
pub fn decode_with_options(
    token: &str,
    algorithms: &[Algorithm],
    options: &DecodeOptions,
) -> Result<ClaimSet, InvalidToken> {
    let (header, claims, signature, signing_input) = load(token)?;

    if options.verify {
        claims.validate(
            options.audience.as_deref(),
            options.issuer.as_deref(),
            options.leeway,
        )?;
        verify_signature(algorithms, &header, &signing_input, &signature)?;
    }

    Ok(claims)
}

/// Split and structurally decode the three segments.
fn load(token: &str) -> Result<(JoseHeader, ClaimSet, Vec<u8>, String), InvalidToken> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(InvalidToken::DecodeError("Not enough segments".to_string()));
    }

    let header_segment = segments[0];
    let payload_segment = segments[1];
    let signature_segment = segments[2];
    let signing_input = format!("{header_segment}.{payload_segment}");

    let header_object = decode_segment(header_segment).map_err(|e| match e {
        SegmentError::NotBase64 => {
            InvalidToken::DecodeError("Header is not correctly encoded as base64".to_string())
        }
        SegmentError::NotJsonObject => InvalidToken::DecodeError("Invalid header".to_string()),
    })?;
    let header: JoseHeader = serde_json::from_value(Value::Object(header_object))
        .map_err(|_| InvalidToken::DecodeError("Invalid header".to_string()))?;

    let payload = decode_segment(payload_segment).map_err(|e| match e {
        SegmentError::NotBase64 => {
            InvalidToken::DecodeError("Payload is not correctly encoded as base64".to_string())
        }
        SegmentError::NotJsonObject => InvalidToken::DecodeError("Invalid payload".to_string()),
    })?;

    let signature = base64url_decode(signature_segment).map_err(|_| {
        InvalidToken::DecodeError("Signature is not correctly encoded as base64".to_string())
    })?;

    Ok((header, ClaimSet::from_claims(payload), signature, signing_input))
}

/// Match candidates against the declared "alg" by name; any candidate that
/// also verifies the signature wins. The declared name alone never selects
/// key material.
fn verify_signature(
    algorithms: &[Algorithm],
    header: &JoseHeader,
    signing_input: &str,
    signature: &[u8],
) -> Result<(), InvalidToken> {
    let Some(alg) = header.algorithm.as_deref() else {
        return Err(InvalidToken::DecodeError("Missing Algorithm".to_string()));
    };

    debug!(alg, candidates = algorithms.len(), "verifying token signature");

    let verified = algorithms
        .iter()
        .filter(|algorithm| algorithm.name() == alg)
        .any(|algorithm| algorithm.verify(signing_input.as_bytes(), signature));

    if verified {
        Ok(())
    } else {
        Err(InvalidToken::InvalidAlgorithm)
    }
}
