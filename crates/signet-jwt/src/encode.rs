//! The encode pipeline: header merge, two JSON segments, signature.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use signet_jwa::Algorithm;

use crate::base64url::base64url_encode;
use crate::claims::{ClaimSet, ClaimSetBuilder};
use crate::codec::encode_segment;
use crate::error::EncodeError;

/// Encode a claim set into a signed three-segment token.
///
/// Extra headers are merged with the defaults: "typ" is set to "JWT" unless
/// the caller supplies one, and "alg" always comes from the algorithm — the
/// caller cannot override it.
pub fn encode(
    claims: &ClaimSet,
    algorithm: &Algorithm,
    headers: Option<&BTreeMap<String, String>>,
) -> Result<String, EncodeError> {
    let mut header = Map::new();
    header.insert("alg".to_string(), Value::from(algorithm.name()));
    if !headers.is_some_and(|extra| extra.contains_key("typ")) {
        header.insert("typ".to_string(), Value::from("JWT"));
    }
    if let Some(extra) = headers {
        for (key, value) in extra {
            if key == "alg" {
                continue;
            }
            header.insert(key.clone(), Value::from(value.as_str()));
        }
    }

    let header_segment = encode_segment(&header)?;
    let payload_segment = encode_segment(claims.claims())?;
    let signing_input = format!("{header_segment}.{payload_segment}");

    let signature = algorithm.sign(signing_input.as_bytes())?;
    let signature_segment = base64url_encode(&signature);

    Ok(format!("{signing_input}.{signature_segment}"))
}

/// Encode a plain map of claims.
pub fn encode_claims(
    claims: Map<String, Value>,
    algorithm: &Algorithm,
    headers: Option<&BTreeMap<String, String>>,
) -> Result<String, EncodeError> {
    encode(&ClaimSet::from_claims(claims), algorithm, headers)
}

/// Encode a claim set assembled by a builder closure.
pub fn encode_with<F>(algorithm: &Algorithm, build: F) -> Result<String, EncodeError>
where
    F: FnOnce(&mut ClaimSetBuilder),
{
    let mut builder = ClaimSetBuilder::new();
    build(&mut builder);
    encode(&builder.build(), algorithm, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hs256_secret() -> Algorithm {
        Algorithm::hs256("secret")
    }

    #[test]
    fn encodes_known_token() {
        let mut claims = ClaimSet::new();
        claims.set("name", "Kyle");

        let token = encode(&claims, &hs256_secret(), None).unwrap();
        assert_eq!(
            token,
            "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.eyJuYW1lIjoiS3lsZSJ9.\
             zxm7xcp1eZtZhp4t-nlw09ATQnnFKIiSN83uG8u6cAg"
        );
    }

    #[test]
    fn encodes_with_builder() {
        let token = encode_with(&hs256_secret(), |builder| {
            builder.issuer("fuller.li");
        })
        .unwrap();
        assert_eq!(
            token,
            "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.eyJpc3MiOiJmdWxsZXIubGkifQ.\
             d7B7PAQcz1E6oNhrlxmHxHXHgg39_k7X7wWeahl8kSQ"
        );
    }

    #[test]
    fn encodes_extra_headers() {
        let headers = BTreeMap::from([("kid".to_string(), "x".to_string())]);
        let token = encode(&ClaimSet::new(), &hs256_secret(), Some(&headers)).unwrap();
        assert_eq!(
            token,
            "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCIsImtpZCI6IngifQ.e30.\
             ddEotxYYMMdat5HPgYFQnkHRdPXsxPG71ooyhIUoqGA"
        );
    }

    #[test]
    fn encodes_plain_map() {
        let mut claims = Map::new();
        claims.insert("name".to_string(), Value::from("Kyle"));

        let token = encode_claims(claims, &hs256_secret(), None).unwrap();
        assert_eq!(
            token,
            "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.eyJuYW1lIjoiS3lsZSJ9.\
             zxm7xcp1eZtZhp4t-nlw09ATQnnFKIiSN83uG8u6cAg"
        );
    }

    #[test]
    fn caller_cannot_override_alg() {
        let headers = BTreeMap::from([("alg".to_string(), "none".to_string())]);
        let token = encode(&ClaimSet::new(), &hs256_secret(), Some(&headers)).unwrap();
        let header_segment = token.split('.').next().unwrap();
        let header = crate::codec::decode_segment(header_segment).unwrap();
        assert_eq!(header.get("alg"), Some(&Value::from("HS256")));
    }

    #[test]
    fn caller_can_override_typ() {
        let headers = BTreeMap::from([("typ".to_string(), "at+jwt".to_string())]);
        let token = encode(&ClaimSet::new(), &hs256_secret(), Some(&headers)).unwrap();
        let header_segment = token.split('.').next().unwrap();
        let header = crate::codec::decode_segment(header_segment).unwrap();
        assert_eq!(header.get("typ"), Some(&Value::from("at+jwt")));
    }

    #[test]
    fn none_algorithm_has_empty_signature_segment() {
        let mut claims = ClaimSet::new();
        claims.set("test", "ing");
        let token = encode(&claims, &Algorithm::None, None).unwrap();
        assert!(token.ends_with('.'));
        assert_eq!(token.split('.').count(), 3);
    }
}
