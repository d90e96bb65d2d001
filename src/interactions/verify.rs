//! Ed25519 request authentication
//!
//! Discord signs every webhook with the application's key over
//! `timestamp || body`. Nothing in the body is trusted until this passes.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use ed25519_dalek::{Signature, VerifyingKey};
use thiserror::Error;

pub const SIGNATURE_HEADER: &str = "x-signature-ed25519";
pub const TIMESTAMP_HEADER: &str = "x-signature-timestamp";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("public key must be 32 hex-encoded bytes")]
    InvalidPublicKey,
    /// Any request-time failure; carries no detail
    #[error("request signature rejected")]
    Rejected,
}

#[derive(Clone, Debug)]
pub struct SignatureVerifier {
    key: VerifyingKey,
}

impl SignatureVerifier {
    pub fn from_hex(public_key: &str) -> Result<Self, VerifyError> {
        let bytes: [u8; 32] = hex::decode(public_key.trim())
            .map_err(|_| VerifyError::InvalidPublicKey)?
            .try_into()
            .map_err(|_| VerifyError::InvalidPublicKey)?;
        let key = VerifyingKey::from_bytes(&bytes).map_err(|_| VerifyError::InvalidPublicKey)?;
        Ok(Self { key })
    }

    /// Check a request's signature headers against its raw body bytes
    pub fn verify(
        &self,
        signature: Option<&str>,
        timestamp: Option<&str>,
        body: &[u8],
    ) -> Result<(), VerifyError> {
        let signature = signature.filter(|s| !s.is_empty()).ok_or(VerifyError::Rejected)?;
        let timestamp = timestamp.filter(|t| !t.is_empty()).ok_or(VerifyError::Rejected)?;

        let signature: [u8; 64] = hex::decode(signature)
            .map_err(|_| VerifyError::Rejected)?
            .try_into()
            .map_err(|_| VerifyError::Rejected)?;
        let signature = Signature::from_bytes(&signature);

        let mut message = Vec::with_capacity(timestamp.len() + body.len());
        message.extend_from_slice(timestamp.as_bytes());
        message.extend_from_slice(body);

        self.key
            .verify_strict(&message, &signature)
            .map_err(|_| VerifyError::Rejected)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};

    pub(crate) fn signing_key(seed: u8) -> SigningKey {
        SigningKey::from_bytes(&[seed; 32])
    }

    pub(crate) fn public_hex(key: &SigningKey) -> String {
        hex::encode(key.verifying_key().to_bytes())
    }

    pub(crate) fn sign(key: &SigningKey, timestamp: &str, body: &[u8]) -> String {
        let mut message = timestamp.as_bytes().to_vec();
        message.extend_from_slice(body);
        hex::encode(key.sign(&message).to_bytes())
    }

    #[test]
    fn test_correct_signature_accepted() {
        let key = signing_key(7);
        let verifier = SignatureVerifier::from_hex(&public_hex(&key)).unwrap();
        let body = br#"{"type":1}"#;
        let signature = sign(&key, "1700000000", body);

        assert_eq!(
            verifier.verify(Some(&signature), Some("1700000000"), body),
            Ok(())
        );
    }

    #[test]
    fn test_wrong_key_rejected() {
        let verifier = SignatureVerifier::from_hex(&public_hex(&signing_key(7))).unwrap();
        let body = br#"{"type":1}"#;
        let signature = sign(&signing_key(8), "1700000000", body);

        assert_eq!(
            verifier.verify(Some(&signature), Some("1700000000"), body),
            Err(VerifyError::Rejected)
        );
    }

    #[test]
    fn test_tampered_body_rejected() {
        let key = signing_key(7);
        let verifier = SignatureVerifier::from_hex(&public_hex(&key)).unwrap();
        let signature = sign(&key, "1700000000", br#"{"type":1}"#);

        assert!(verifier
            .verify(Some(&signature), Some("1700000000"), br#"{"type":2}"#)
            .is_err());
    }

    #[test]
    fn test_timestamp_is_signed() {
        let key = signing_key(7);
        let verifier = SignatureVerifier::from_hex(&public_hex(&key)).unwrap();
        let body = br#"{"type":1}"#;
        let signature = sign(&key, "1700000000", body);

        assert!(verifier
            .verify(Some(&signature), Some("1700000001"), body)
            .is_err());
    }

    #[test]
    fn test_missing_or_empty_headers_rejected() {
        let key = signing_key(7);
        let verifier = SignatureVerifier::from_hex(&public_hex(&key)).unwrap();
        let body = b"{}";
        let signature = sign(&key, "1", body);

        assert_eq!(verifier.verify(None, Some("1"), body), Err(VerifyError::Rejected));
        assert_eq!(verifier.verify(Some(""), Some("1"), body), Err(VerifyError::Rejected));
        assert_eq!(verifier.verify(Some(&signature), None, body), Err(VerifyError::Rejected));
    }

    #[test]
    fn test_malformed_signature_rejected() {
        let verifier = SignatureVerifier::from_hex(&public_hex(&signing_key(7))).unwrap();
        assert_eq!(
            verifier.verify(Some("zz-not-hex"), Some("1"), b"{}"),
            Err(VerifyError::Rejected)
        );
        assert_eq!(
            verifier.verify(Some("abcd"), Some("1"), b"{}"),
            Err(VerifyError::Rejected)
        );
    }

    #[test]
    fn test_invalid_public_key() {
        assert_eq!(
            SignatureVerifier::from_hex("1234").unwrap_err(),
            VerifyError::InvalidPublicKey
        );
        assert!(SignatureVerifier::from_hex("not hex at all").is_err());
    }
}
