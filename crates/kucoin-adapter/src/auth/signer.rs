/*
[INPUT]:  Secret key, passphrase, timestamp and canonical request bytes
[OUTPUT]: Base64 HMAC-SHA256 signatures and the KC-API-* header set
[POS]:    Auth layer - cryptographic signing for request authentication
[UPDATE]: When changing signing algorithm, header names or key versions
*/

use std::fmt;
use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::credentials::{ApiKeyVersion, Credentials};

pub const HEADER_API_KEY: &str = "KC-API-KEY";
pub const HEADER_API_SIGN: &str = "KC-API-SIGN";
pub const HEADER_API_TIMESTAMP: &str = "KC-API-TIMESTAMP";
pub const HEADER_API_PASSPHRASE: &str = "KC-API-PASSPHRASE";
pub const HEADER_API_KEY_VERSION: &str = "KC-API-KEY-VERSION";

fn hmac_base64(key: &[u8], message: &[u8]) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(message);
    BASE64.encode(mac.finalize().into_bytes())
}

/// Sign a canonical request string.
///
/// Returns `base64(HMAC-SHA256(secret_key, canonical))`.
pub fn sign(secret_key: &str, canonical: &[u8]) -> String {
    hmac_base64(secret_key.as_bytes(), canonical)
}

/// Encrypt the passphrase for version 2 keys.
///
/// Returns `base64(HMAC-SHA256(secret_key, passphrase))`.
pub fn encrypt_passphrase(secret_key: &str, passphrase: &str) -> String {
    hmac_base64(secret_key.as_bytes(), passphrase.as_bytes())
}

/// Authentication headers for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub api_key: String,
    pub signature: String,
    pub timestamp: String,
    pub passphrase: String,
    pub key_version: ApiKeyVersion,
}

impl SignedHeaders {
    /// Header name/value pairs in the order they are attached
    pub fn pairs(&self) -> [(&'static str, &str); 5] {
        [
            (HEADER_API_KEY, self.api_key.as_str()),
            (HEADER_API_SIGN, self.signature.as_str()),
            (HEADER_API_TIMESTAMP, self.timestamp.as_str()),
            (HEADER_API_PASSPHRASE, self.passphrase.as_str()),
            (HEADER_API_KEY_VERSION, self.key_version.as_str()),
        ]
    }
}

/// Produces the authentication headers for a canonical request.
///
/// One implementation exists per API key version; the client picks it once
/// through [`signer_for`] when it is built.
pub trait RequestSigner: Send + Sync + fmt::Debug {
    fn key_version(&self) -> ApiKeyVersion;

    /// Sign `canonical`, which must already start with `timestamp_ms`
    fn headers(&self, timestamp_ms: u64, canonical: &[u8]) -> SignedHeaders;
}

/// Version 1 keys: passphrase travels in plain text
pub struct SignerV1 {
    api_key: String,
    secret_key: String,
    passphrase: String,
}

impl SignerV1 {
    pub fn new(credentials: &Credentials) -> Self {
        Self {
            api_key: credentials.api_key.clone(),
            secret_key: credentials.secret_key.clone(),
            passphrase: credentials.passphrase.clone(),
        }
    }
}

impl RequestSigner for SignerV1 {
    fn key_version(&self) -> ApiKeyVersion {
        ApiKeyVersion::V1
    }

    fn headers(&self, timestamp_ms: u64, canonical: &[u8]) -> SignedHeaders {
        SignedHeaders {
            api_key: self.api_key.clone(),
            signature: sign(&self.secret_key, canonical),
            timestamp: timestamp_ms.to_string(),
            passphrase: self.passphrase.clone(),
            key_version: ApiKeyVersion::V1,
        }
    }
}

impl fmt::Debug for SignerV1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignerV1")
            .field("api_key", &self.api_key)
            .finish_non_exhaustive()
    }
}

/// Version 2 keys: passphrase is signed once with the secret key
pub struct SignerV2 {
    api_key: String,
    secret_key: String,
    encrypted_passphrase: String,
}

impl SignerV2 {
    pub fn new(credentials: &Credentials) -> Self {
        Self {
            api_key: credentials.api_key.clone(),
            secret_key: credentials.secret_key.clone(),
            encrypted_passphrase: encrypt_passphrase(
                &credentials.secret_key,
                &credentials.passphrase,
            ),
        }
    }
}

impl RequestSigner for SignerV2 {
    fn key_version(&self) -> ApiKeyVersion {
        ApiKeyVersion::V2
    }

    fn headers(&self, timestamp_ms: u64, canonical: &[u8]) -> SignedHeaders {
        SignedHeaders {
            api_key: self.api_key.clone(),
            signature: sign(&self.secret_key, canonical),
            timestamp: timestamp_ms.to_string(),
            passphrase: self.encrypted_passphrase.clone(),
            key_version: ApiKeyVersion::V2,
        }
    }
}

impl fmt::Debug for SignerV2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignerV2")
            .field("api_key", &self.api_key)
            .finish_non_exhaustive()
    }
}

/// Select the signer matching the credentials' key version
pub fn signer_for(credentials: &Credentials) -> Arc<dyn RequestSigner> {
    match credentials.key_version {
        ApiKeyVersion::V1 => Arc::new(SignerV1::new(credentials)),
        ApiKeyVersion::V2 => Arc::new(SignerV2::new(credentials)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_known_vector() {
        let signature = sign("key", b"The quick brown fox jumps over the lazy dog");
        assert_eq!(signature, "97yD9DBThCSxMpjmqm+xQ+9NWaFJRhdZl0edvC0aPNg=");
    }

    #[test]
    fn test_sign_is_deterministic() {
        let canonical = b"1700000000000GET/api/v1/accounts";
        assert_eq!(sign("secret", canonical), sign("secret", canonical));
        assert_eq!(
            sign("secret", canonical),
            "ka2jGwVPj+HJ5t7L4fEM4HttekAXENIQpmo8ulfZmV8="
        );
        assert_ne!(sign("secret", canonical), sign("other", canonical));
    }

    #[test]
    fn test_encrypt_passphrase() {
        assert_eq!(
            encrypt_passphrase("secret", "passphrase"),
            "sWd5rQWAxDzYJTY6K2sov6seA0l3uNP70anWxITg8IA="
        );
    }

    #[test]
    fn test_signer_for_selects_version() {
        let creds = Credentials::new("key", "secret", "passphrase");
        let v2 = signer_for(&creds);
        let v1 = signer_for(&creds.clone().with_key_version(ApiKeyVersion::V1));

        let h2 = v2.headers(1_700_000_000_000, b"1700000000000GET/api/v1/accounts");
        let h1 = v1.headers(1_700_000_000_000, b"1700000000000GET/api/v1/accounts");

        assert_eq!(v2.key_version(), ApiKeyVersion::V2);
        assert_eq!(h2.passphrase, "sWd5rQWAxDzYJTY6K2sov6seA0l3uNP70anWxITg8IA=");
        assert_eq!(h2.key_version.as_str(), "2");

        assert_eq!(v1.key_version(), ApiKeyVersion::V1);
        assert_eq!(h1.passphrase, "passphrase");
        assert_eq!(h1.key_version.as_str(), "1");

        assert_eq!(h1.signature, h2.signature);
        assert_eq!(h1.timestamp, "1700000000000");
    }

    #[test]
    fn test_header_pairs_use_wire_names() {
        let signer = SignerV2::new(&Credentials::new("key", "secret", "passphrase"));
        let headers = signer.headers(1, b"1GET/");
        let names: Vec<_> = headers.pairs().iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec![
                "KC-API-KEY",
                "KC-API-SIGN",
                "KC-API-TIMESTAMP",
                "KC-API-PASSPHRASE",
                "KC-API-KEY-VERSION",
            ]
        );
    }

    #[test]
    fn test_signer_debug_hides_secret() {
        let signer = SignerV1::new(&Credentials::new("key", "secret-value", "pass-value"));
        let rendered = format!("{signer:?}");
        assert!(!rendered.contains("secret-value"));
        assert!(!rendered.contains("pass-value"));
    }
}
