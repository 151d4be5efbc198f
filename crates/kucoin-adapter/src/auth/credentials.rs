/*
[INPUT]:  API key material supplied by the caller or configuration file
[OUTPUT]: Validated, immutable credentials with a key-version tag
[POS]:    Auth layer - key material owned by a configured client
[UPDATE]: When the venue adds a key version or credential field
*/

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::http::{KucoinError, Result};

/// API key version, selects how the passphrase header is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ApiKeyVersion {
    /// Passphrase is sent as plain text
    V1,
    /// Passphrase is HMAC-SHA256 signed with the secret key
    #[default]
    V2,
}

impl ApiKeyVersion {
    /// Value of the `KC-API-KEY-VERSION` header
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiKeyVersion::V1 => "1",
            ApiKeyVersion::V2 => "2",
        }
    }
}

impl fmt::Display for ApiKeyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiKeyVersion {
    type Err = KucoinError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "1" => Ok(ApiKeyVersion::V1),
            "2" => Ok(ApiKeyVersion::V2),
            other => Err(KucoinError::Config(format!(
                "unsupported API key version: {other}"
            ))),
        }
    }
}

impl Serialize for ApiKeyVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ApiKeyVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        // YAML users write both `key_version: 2` and `key_version: "2"`
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        let text = match Raw::deserialize(deserializer)? {
            Raw::Number(n) => n.to_string(),
            Raw::Text(s) => s,
        };
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Key material for authenticated requests
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub api_key: String,
    pub secret_key: String,
    pub passphrase: String,
    #[serde(default)]
    pub key_version: ApiKeyVersion,
}

impl Credentials {
    /// Create version 2 credentials
    pub fn new(
        api_key: impl Into<String>,
        secret_key: impl Into<String>,
        passphrase: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            secret_key: secret_key.into(),
            passphrase: passphrase.into(),
            key_version: ApiKeyVersion::V2,
        }
    }

    /// Override the key version
    pub fn with_key_version(mut self, key_version: ApiKeyVersion) -> Self {
        self.key_version = key_version;
        self
    }

    /// Reject credentials the server would never accept
    pub fn validate(&self) -> Result<()> {
        let missing = [
            ("api_key", &self.api_key),
            ("secret_key", &self.secret_key),
            ("passphrase", &self.passphrase),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect::<Vec<_>>();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(KucoinError::Config(format!(
                "credentials missing: {}",
                missing.join(", ")
            )))
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("secret_key", &"<redacted>")
            .field("passphrase", &"<redacted>")
            .field("key_version", &self.key_version)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_reports_every_missing_field() {
        let creds = Credentials::new("key", " ", "");
        let err = creds.validate().unwrap_err();
        assert!(matches!(err, KucoinError::Config(_)));
        let message = err.to_string();
        assert!(message.contains("secret_key"));
        assert!(message.contains("passphrase"));
        assert!(!message.contains("api_key"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = Credentials::new("key", "top-secret", "pass-phrase");
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("key"));
        assert!(!rendered.contains("top-secret"));
        assert!(!rendered.contains("pass-phrase"));
    }

    #[test]
    fn test_key_version_accepts_number_and_string() {
        let from_number: ApiKeyVersion = serde_json::from_str("1").unwrap();
        let from_string: ApiKeyVersion = serde_json::from_str("\"2\"").unwrap();
        assert_eq!(from_number, ApiKeyVersion::V1);
        assert_eq!(from_string, ApiKeyVersion::V2);
        assert!(serde_json::from_str::<ApiKeyVersion>("3").is_err());
    }

    #[test]
    fn test_credentials_default_to_v2() {
        let creds: Credentials = serde_json::from_str(
            r#"{"api_key":"k","secret_key":"s","passphrase":"p"}"#,
        )
        .unwrap();
        assert_eq!(creds.key_version, ApiKeyVersion::V2);
    }
}
