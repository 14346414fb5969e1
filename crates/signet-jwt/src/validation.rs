//! Claim validation: identity checks, then the three time checks.

use std::cmp::Ordering;

use chrono::{Duration, Utc};
use serde_json::Value;

use crate::claims::{parse_epoch_seconds, ClaimSet};
use crate::error::InvalidToken;

impl ClaimSet {
    /// Validate the registered claims, first failure wins.
    ///
    /// Order: issuer (only when an expected issuer is supplied), audience
    /// (only when supplied), expiration, not-before, issued-at. `leeway`
    /// widens every time check by the given number of seconds to absorb
    /// clock skew.
    pub fn validate(
        &self,
        audience: Option<&str>,
        issuer: Option<&str>,
        leeway: i64,
    ) -> Result<(), InvalidToken> {
        if let Some(issuer) = issuer {
            self.validate_issuer(issuer)?;
        }

        if let Some(audience) = audience {
            self.validate_audience(audience)?;
        }

        self.validate_expiration(leeway)?;
        self.validate_not_before(leeway)?;
        self.validate_issued_at(leeway)
    }

    /// The "iss" claim must be present, a string, and equal to `expected`.
    pub fn validate_issuer(&self, expected: &str) -> Result<(), InvalidToken> {
        match self.issuer() {
            Some(iss) if iss == expected => Ok(()),
            _ => Err(InvalidToken::InvalidIssuer),
        }
    }

    /// The "aud" claim may be a single string or an array of strings; the
    /// expected audience must equal the string or be contained in the array.
    pub fn validate_audience(&self, expected: &str) -> Result<(), InvalidToken> {
        match self.get("aud") {
            Some(Value::Array(values)) => {
                let mut audiences = Vec::with_capacity(values.len());
                for value in values {
                    let Some(aud) = value.as_str() else {
                        return Err(invalid_audience_shape());
                    };
                    audiences.push(aud);
                }
                if audiences.contains(&expected) {
                    Ok(())
                } else {
                    Err(InvalidToken::InvalidAudience)
                }
            }
            Some(Value::String(aud)) => {
                if aud == expected {
                    Ok(())
                } else {
                    Err(InvalidToken::InvalidAudience)
                }
            }
            _ => Err(invalid_audience_shape()),
        }
    }

    /// The "exp" claim, when present, must not be more than `leeway`
    /// seconds in the past.
    pub fn validate_expiration(&self, leeway: i64) -> Result<(), InvalidToken> {
        self.validate_date(
            "exp",
            Ordering::Less,
            -leeway,
            InvalidToken::ExpiredSignature,
            "Expiration time claim (exp) must be an integer",
        )
    }

    /// The "nbf" claim, when present, must not be more than `leeway`
    /// seconds in the future.
    pub fn validate_not_before(&self, leeway: i64) -> Result<(), InvalidToken> {
        self.validate_date(
            "nbf",
            Ordering::Greater,
            leeway,
            InvalidToken::ImmatureSignature,
            "Not before claim (nbf) must be an integer",
        )
    }

    /// The "iat" claim, when present, must not be more than `leeway`
    /// seconds in the future.
    pub fn validate_issued_at(&self, leeway: i64) -> Result<(), InvalidToken> {
        self.validate_date(
            "iat",
            Ordering::Greater,
            leeway,
            InvalidToken::InvalidIssuedAt,
            "Issued at claim (iat) must be an integer",
        )
    }

    /// Shared time-claim check: compare the claim time against now adjusted
    /// by `leeway`, failing when the comparison lands on `ordering`. The
    /// expiration caller negates leeway, so every check widens the window.
    fn validate_date(
        &self,
        key: &str,
        ordering: Ordering,
        leeway: i64,
        failure: InvalidToken,
        message: &str,
    ) -> Result<(), InvalidToken> {
        let Some(value) = self.get(key) else {
            return Ok(());
        };
        let Some(claim_time) = parse_epoch_seconds(value) else {
            return Err(InvalidToken::DecodeError(message.to_string()));
        };

        let threshold = Utc::now() + Duration::seconds(leeway);
        if claim_time.cmp(&threshold) == ordering {
            return Err(failure);
        }
        Ok(())
    }
}

fn invalid_audience_shape() -> InvalidToken {
    InvalidToken::DecodeError(
        "Invalid audience claim, must be a string or an array of strings".to_string(),
    )
}
