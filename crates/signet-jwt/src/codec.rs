//! Compact JSON segment codec: JSON object ⇄ Base64URL segment.

use serde_json::{Map, Value};

use crate::base64url::{base64url_decode, base64url_encode};

/// Why a segment failed to decode. The pipeline maps each case to the
/// message for the segment it was decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SegmentError {
    NotBase64,
    NotJsonObject,
}

/// Serialize a JSON object and Base64URL-encode it as one segment.
pub(crate) fn encode_segment(object: &Map<String, Value>) -> Result<String, serde_json::Error> {
    Ok(base64url_encode(&serde_json::to_vec(object)?))
}

/// Decode a segment back into a JSON object.
pub(crate) fn decode_segment(segment: &str) -> Result<Map<String, Value>, SegmentError> {
    let bytes = base64url_decode(segment).map_err(|_| SegmentError::NotBase64)?;
    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(object)) => Ok(object),
        _ => Err(SegmentError::NotJsonObject),
    }
}
