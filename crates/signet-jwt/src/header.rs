use serde::{Deserialize, Serialize};

/// The JOSE header: the first token segment, declaring the signing
/// algorithm and metadata.
///
/// Unknown keys are tolerated when parsing and are not preserved. Fields
/// set to `None` are omitted from serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoseHeader {
    /// The "alg" (algorithm) that secures the token. Absence is valid here
    /// and only fails during verification.
    #[serde(rename = "alg", skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,

    /// The "typ" (type) declares the media type of the complete token,
    /// conventionally "JWT".
    #[serde(rename = "typ", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,

    /// The "kid" (key ID) hints which key was used to secure the token.
    #[serde(rename = "kid", skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,

    /// The "cty" (content type) declares the media type of the payload.
    #[serde(rename = "cty", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_registered_fields() {
        let header: JoseHeader = serde_json::from_value(json!({
            "alg": "HS256",
            "typ": "JWT",
            "kid": "key-1",
            "cty": "application/json",
        }))
        .unwrap();

        assert_eq!(header.algorithm.as_deref(), Some("HS256"));
        assert_eq!(header.r#type.as_deref(), Some("JWT"));
        assert_eq!(header.key_id.as_deref(), Some("key-1"));
        assert_eq!(header.content_type.as_deref(), Some("application/json"));
    }

    #[test]
    fn tolerates_unknown_keys() {
        let header: JoseHeader =
            serde_json::from_value(json!({"alg": "none", "x5t": "ignored"})).unwrap();
        assert_eq!(header.algorithm.as_deref(), Some("none"));
    }

    #[test]
    fn missing_algorithm_is_valid() {
        let header: JoseHeader = serde_json::from_value(json!({"typ": "JWT"})).unwrap();
        assert_eq!(header.algorithm, None);
    }

    #[test]
    fn omits_absent_fields() {
        let header = JoseHeader {
            algorithm: Some("HS256".to_string()),
            r#type: Some("JWT".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&header).unwrap(),
            r#"{"alg":"HS256","typ":"JWT"}"#
        );
    }
}
