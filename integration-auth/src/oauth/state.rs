//! CSRF state tokens for OAuth flows.
//!
//! A state token carries the organization and user that started the flow plus a
//! random nonce, and is signed with HMAC-SHA256. The callback decodes it to find
//! the pending authorization with a single keyed lookup.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::error::{oauth_error, Error, ErrorKind, OAuthErrorKind};

type HmacSha256 = Hmac<Sha256>;

/// Number of random bytes in a state nonce.
const NONCE_BYTES: usize = 32;

/// Decoded state parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateToken {
    #[serde(rename = "o")]
    organization_id: String,
    #[serde(rename = "u")]
    user_id: String,
    #[serde(rename = "n")]
    nonce: String,
}

impl StateToken {
    /// Generate a new state token with a fresh random nonce.
    pub fn generate(organization_id: &str, user_id: &str) -> Self {
        Self {
            organization_id: organization_id.to_string(),
            user_id: user_id.to_string(),
            nonce: Self::generate_nonce(),
        }
    }

    pub fn organization_id(&self) -> &str {
        &self.organization_id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Encode and sign the token as `<payload>.<signature>`.
    ///
    /// The payload is URL-safe base64 without padding and the signature is hex,
    /// so the result can be placed in a query string unchanged.
    pub fn encode(&self, signing_key: &[u8]) -> Result<String, Error> {
        let json = serde_json::to_vec(self).map_err(|e| Error {
            source: Some(Box::new(e)),
            error_kind: ErrorKind::OAuth(OAuthErrorKind::InvalidState),
        })?;
        let payload = URL_SAFE_NO_PAD.encode(json);
        let signature = hex::encode(Self::sign(signing_key, &payload)?);
        Ok(format!("{payload}.{signature}"))
    }

    /// Decode a state parameter, verifying its signature.
    ///
    /// # Returns
    ///
    /// The decoded token, or `OAuthErrorKind::InvalidState` for anything that was
    /// not produced by `encode` with the same key.
    pub fn decode(state: &str, signing_key: &[u8]) -> Result<Self, Error> {
        let (payload, signature) = state
            .split_once('.')
            .ok_or_else(|| oauth_error(OAuthErrorKind::InvalidState, "Malformed state"))?;

        let signature = hex::decode(signature)
            .map_err(|_| oauth_error(OAuthErrorKind::InvalidState, "Malformed state signature"))?;

        let mut mac = Self::mac(signing_key)?;
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| oauth_error(OAuthErrorKind::InvalidState, "State signature mismatch"))?;

        let json = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| oauth_error(OAuthErrorKind::InvalidState, "Malformed state payload"))?;

        serde_json::from_slice(&json)
            .map_err(|_| oauth_error(OAuthErrorKind::InvalidState, "Malformed state payload"))
    }

    fn sign(signing_key: &[u8], payload: &str) -> Result<Vec<u8>, Error> {
        let mut mac = Self::mac(signing_key)?;
        mac.update(payload.as_bytes());
        Ok(mac.finalize().into_bytes().to_vec())
    }

    fn mac(signing_key: &[u8]) -> Result<HmacSha256, Error> {
        HmacSha256::new_from_slice(signing_key)
            .map_err(|_| oauth_error(OAuthErrorKind::InvalidState, "Invalid state signing key"))
    }

    /// Generate a cryptographically random, URL-safe nonce.
    fn generate_nonce() -> String {
        let random_bytes: [u8; NONCE_BYTES] = rand::thread_rng().gen();
        URL_SAFE_NO_PAD.encode(random_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8] = b"test-signing-key";

    #[test]
    fn test_generate_state() {
        let token = StateToken::generate("org-1", "user-1");
        assert_eq!(token.organization_id(), "org-1");
        assert_eq!(token.user_id(), "user-1");
        assert_eq!(token.nonce.len(), 43); // 32 bytes base64 without padding
    }

    #[test]
    fn test_nonces_are_unique() {
        let a = StateToken::generate("org-1", "user-1");
        let b = StateToken::generate("org-1", "user-1");
        assert_ne!(a.nonce, b.nonce);
    }

    #[test]
    fn test_decode_recovers_owner() {
        let token = StateToken::generate("org-1", "user:with:colons");
        let encoded = token.encode(KEY).unwrap();

        let decoded = StateToken::decode(&encoded, KEY).unwrap();
        assert_eq!(decoded, token);
        assert_eq!(decoded.user_id(), "user:with:colons");
    }

    #[test]
    fn test_encoded_state_is_url_safe() {
        let encoded = StateToken::generate("org 1", "ü/ser?").encode(KEY).unwrap();
        assert!(encoded
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.'));
    }

    #[test]
    fn test_decode_rejects_other_key() {
        let encoded = StateToken::generate("org-1", "user-1").encode(KEY).unwrap();

        let err = StateToken::decode(&encoded, b"another-key").unwrap_err();
        assert_eq!(err.error_kind, ErrorKind::OAuth(OAuthErrorKind::InvalidState));
    }

    #[test]
    fn test_decode_rejects_tampered_payload() {
        let encoded = StateToken::generate("org-1", "user-1").encode(KEY).unwrap();
        let (_, signature) = encoded.split_once('.').unwrap();
        let forged_payload = URL_SAFE_NO_PAD.encode(br#"{"o":"org-2","u":"user-1","n":"x"}"#);

        let result = StateToken::decode(&format!("{forged_payload}.{signature}"), KEY);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        for state in ["", "no-dot", "abc.zz", "abc.", ".abcd"] {
            let err = StateToken::decode(state, KEY).unwrap_err();
            assert_eq!(err.error_kind, ErrorKind::OAuth(OAuthErrorKind::InvalidState));
        }
    }
}
