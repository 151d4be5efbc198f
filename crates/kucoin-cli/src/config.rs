/*
[INPUT]:  YAML configuration file and KUCOIN_API_* environment variables
[OUTPUT]: Parsed CLI configuration and a configured client
[POS]:    Configuration layer - client setup
[UPDATE]: When adding new configuration options
*/

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use kucoin_adapter::{
    ClientConfig, Credentials, EndpointConfig, KucoinClient, MessagePolicy, TracingTrace,
};
use serde::{Deserialize, Serialize};

pub const ENV_API_KEY: &str = "KUCOIN_API_KEY";
pub const ENV_API_SECRET: &str = "KUCOIN_API_SECRET";
pub const ENV_API_PASSPHRASE: &str = "KUCOIN_API_PASSPHRASE";

/// Top-level configuration for the command line client
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    /// API key material; falls back to environment variables when absent
    #[serde(default)]
    pub credentials: Option<Credentials>,
    /// Explicit hosts; exclusive with `sandbox`
    #[serde(default)]
    pub endpoints: Option<EndpointConfig>,
    /// Use the sandbox hosts
    #[serde(default)]
    pub sandbox: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default)]
    pub keep_alive: bool,
    /// Log every request/response at debug level (signatures masked)
    #[serde(default)]
    pub trace_http: bool,
    #[serde(default)]
    pub message_policy: MessagePolicy,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            endpoints: None,
            sandbox: false,
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            keep_alive: false,
            trace_http: false,
            message_policy: MessagePolicy::default(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_connect_timeout_secs() -> u64 {
    5
}

impl CliConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.sandbox && self.endpoints.is_some() {
            bail!("`sandbox` and `endpoints` are mutually exclusive");
        }
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be greater than zero");
        }
        if let Some(credentials) = &self.credentials {
            credentials.validate().context("invalid credentials")?;
        }
        Ok(())
    }

    pub fn endpoint_config(&self) -> EndpointConfig {
        match (&self.endpoints, self.sandbox) {
            (Some(endpoints), _) => endpoints.clone(),
            (None, true) => EndpointConfig::sandbox(),
            (None, false) => EndpointConfig::production(),
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            keep_alive: self.keep_alive,
            trace_http: self.trace_http,
            message_policy: self.message_policy,
            ..ClientConfig::default()
        }
    }

    /// File credentials win; otherwise all three variables must be set
    pub fn resolve_credentials(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Option<Credentials> {
        if let Some(credentials) = &self.credentials {
            return Some(credentials.clone());
        }
        let api_key = lookup(ENV_API_KEY)?;
        let secret = lookup(ENV_API_SECRET)?;
        let passphrase = lookup(ENV_API_PASSPHRASE)?;
        Some(Credentials::new(api_key, secret, passphrase))
    }

    pub fn build_client(&self, credentials: Option<Credentials>) -> anyhow::Result<KucoinClient> {
        let mut builder = KucoinClient::builder()
            .config(self.client_config())
            .endpoints(self.endpoint_config());
        if let Some(credentials) = credentials {
            builder = builder.credentials(credentials);
        }
        if self.trace_http {
            builder = builder.trace(Arc::new(TracingTrace));
        }
        builder.build().context("build client")
    }
}
