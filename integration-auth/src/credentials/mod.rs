//! Credential blob returned by a provider's token endpoint.

use secrecy::SecretString;
use serde_json::Value;

use crate::error::{credential_error, CredentialErrorKind, Error, ErrorKind};

/// A token-endpoint response, kept verbatim alongside its parsed access token.
///
/// Only the presence of a non-empty `access_token` is validated; every other
/// field is opaque and preserved as-is.
#[derive(Debug, Clone)]
pub struct Credential {
    raw: String,
    value: Value,
    access_token: SecretString,
}

impl Credential {
    /// Parse a credential blob.
    ///
    /// # Returns
    ///
    /// `CredentialErrorKind::Malformed` if `raw` is not a JSON object,
    /// `CredentialErrorKind::MissingAccessToken` if `access_token` is absent,
    /// null, not a string, or empty.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let value: Value = serde_json::from_str(raw).map_err(|e| Error {
            source: Some(Box::new(e)),
            error_kind: ErrorKind::Credential(CredentialErrorKind::Malformed),
        })?;

        let object = value.as_object().ok_or_else(|| {
            credential_error(
                CredentialErrorKind::Malformed,
                "Credential blob is not a JSON object",
            )
        })?;

        let access_token = object
            .get("access_token")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                credential_error(
                    CredentialErrorKind::MissingAccessToken,
                    "Credential blob has no access_token",
                )
            })?;

        Ok(Self {
            access_token: SecretString::new(access_token.to_string()),
            raw: raw.to_string(),
            value,
        })
    }

    /// The access token for bearer authentication.
    pub fn access_token(&self) -> &SecretString {
        &self.access_token
    }

    /// The blob exactly as received.
    pub fn as_json(&self) -> &str {
        &self.raw
    }

    /// The decoded blob.
    pub fn to_value(&self) -> Value {
        self.value.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_parse_keeps_raw_text() {
        let raw = r#"{"access_token":"abc","refresh_token":"def","expires_in":1800}"#;
        let credential = Credential::parse(raw).unwrap();

        assert_eq!(credential.access_token().expose_secret(), "abc");
        assert_eq!(credential.as_json(), raw);
        assert_eq!(credential.to_value()["expires_in"], 1800);
    }

    #[test]
    fn test_parse_rejects_non_json() {
        let err = Credential::parse("not json").unwrap_err();
        assert_eq!(
            err.error_kind,
            ErrorKind::Credential(CredentialErrorKind::Malformed)
        );
    }

    #[test]
    fn test_parse_rejects_non_object() {
        let err = Credential::parse(r#"["access_token"]"#).unwrap_err();
        assert_eq!(
            err.error_kind,
            ErrorKind::Credential(CredentialErrorKind::Malformed)
        );
    }

    #[test]
    fn test_parse_rejects_missing_token() {
        for raw in [
            r#"{}"#,
            r#"{"access_token":null}"#,
            r#"{"access_token":""}"#,
            r#"{"access_token":42}"#,
        ] {
            let err = Credential::parse(raw).unwrap_err();
            assert_eq!(
                err.error_kind,
                ErrorKind::Credential(CredentialErrorKind::MissingAccessToken),
                "{raw}"
            );
        }
    }
}
