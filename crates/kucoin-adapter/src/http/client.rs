/*
[INPUT]:  HTTP configuration (base URLs, timeouts, credentials, trace sink)
[OUTPUT]: Immutable, cloneable client ready for API calls
[POS]:    HTTP layer - core client implementation and construction
[UPDATE]: When adding connection options or changing client behavior
*/

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::auth::{Credentials, RequestSigner, signer_for};
use crate::http::envelope::MessagePolicy;
use crate::http::router::{Access, Host, Route};
use crate::http::trace::{HttpTrace, NoopTrace};
use crate::http::{KucoinError, Result};

/// Production base URLs
pub const SPOT_BASE_URL: &str = "https://api.kucoin.com";
pub const FUTURES_BASE_URL: &str = "https://api-futures.kucoin.com";

/// Sandbox base URLs
pub const SANDBOX_SPOT_BASE_URL: &str = "https://openapi-sandbox.kucoin.com";
pub const SANDBOX_FUTURES_BASE_URL: &str = "https://api-sandbox-futures.kucoin.com";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Bounds the whole call, connect through last body byte
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Keep idle connections for reuse between calls
    pub keep_alive: bool,
    pub user_agent: String,
    /// Hand rendered requests/responses to the trace sink
    pub trace_http: bool,
    pub message_policy: MessagePolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(5),
            keep_alive: false,
            user_agent: format!("kucoin-adapter/{}", env!("CARGO_PKG_VERSION")),
            trace_http: false,
            message_policy: MessagePolicy::Strict,
        }
    }
}

/// Base URLs of the two REST surfaces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub spot: Url,
    pub futures: Url,
}

impl EndpointConfig {
    pub fn new(spot: &str, futures: &str) -> Result<Self> {
        Ok(Self {
            spot: parse_base_url("spot", spot)?,
            futures: parse_base_url("futures", futures)?,
        })
    }

    pub fn production() -> Self {
        Self::new(SPOT_BASE_URL, FUTURES_BASE_URL).expect("production URLs are valid")
    }

    pub fn sandbox() -> Self {
        Self::new(SANDBOX_SPOT_BASE_URL, SANDBOX_FUTURES_BASE_URL)
            .expect("sandbox URLs are valid")
    }

    pub fn base_url(&self, host: Host) -> &Url {
        match host {
            Host::Spot => &self.spot,
            Host::Futures => &self.futures,
        }
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self::production()
    }
}

fn parse_base_url(name: &str, raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| KucoinError::Config(format!("invalid {name} base URL {raw:?}: {e}")))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(KucoinError::Config(format!(
            "{name} base URL must be an http(s) URL: {raw:?}"
        )));
    }
    Ok(url)
}

/// Main HTTP client for the KuCoin REST API.
///
/// Configuration is fixed at construction; cloning is cheap and clones share
/// the transport. Use [`KucoinClient::reconfigure`] to derive a client with
/// different settings.
#[derive(Debug, Clone)]
pub struct KucoinClient {
    pub(crate) http_client: Client,
    injected_transport: bool,
    pub(crate) endpoints: Arc<EndpointConfig>,
    pub(crate) config: Arc<ClientConfig>,
    credentials: Option<Arc<Credentials>>,
    pub(crate) signer: Option<Arc<dyn RequestSigner>>,
    pub(crate) trace: Arc<dyn HttpTrace>,
}

impl KucoinClient {
    /// Create an unauthenticated client with default configuration
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create an unauthenticated client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    /// Create an unauthenticated client against custom hosts
    pub fn with_config_and_base_urls(
        config: ClientConfig,
        spot_base_url: &str,
        futures_base_url: &str,
    ) -> Result<Self> {
        Self::builder()
            .config(config)
            .endpoints(EndpointConfig::new(spot_base_url, futures_base_url)?)
            .build()
    }

    pub fn builder() -> KucoinClientBuilder {
        KucoinClientBuilder::default()
    }

    /// Builder pre-filled with this client's settings.
    ///
    /// A transport passed through [`KucoinClientBuilder::http_client`] is carried
    /// over; otherwise `build()` creates a new one from the (possibly changed) config.
    pub fn reconfigure(&self) -> KucoinClientBuilder {
        KucoinClientBuilder {
            config: (*self.config).clone(),
            endpoints: (*self.endpoints).clone(),
            credentials: self.credentials.as_deref().cloned(),
            http_client: self.injected_transport.then(|| self.http_client.clone()),
            trace: Some(self.trace.clone()),
        }
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.signer.is_some()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn endpoints(&self) -> &EndpointConfig {
        &self.endpoints
    }

    /// Signer for the route; private routes fail without credentials
    pub(crate) fn signer_for_route(&self, route: &Route) -> Result<Option<&dyn RequestSigner>> {
        match (&self.signer, route.access) {
            (Some(signer), _) => Ok(Some(signer.as_ref())),
            (None, Access::Public) => Ok(None),
            (None, Access::Private) => Err(KucoinError::Config(format!(
                "credentials required for {} {}",
                route.verb, route.path
            ))),
        }
    }
}

/// Collects configuration and builds a [`KucoinClient`]
#[derive(Debug, Default)]
pub struct KucoinClientBuilder {
    config: ClientConfig,
    endpoints: EndpointConfig,
    credentials: Option<Credentials>,
    http_client: Option<Client>,
    trace: Option<Arc<dyn HttpTrace>>,
}

impl KucoinClientBuilder {
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn endpoints(mut self, endpoints: EndpointConfig) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Drop credentials; only public endpoints remain callable
    pub fn without_credentials(mut self) -> Self {
        self.credentials = None;
        self
    }

    /// Use a caller-provided transport, e.g. one with a connection pool or proxy
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn trace(mut self, trace: Arc<dyn HttpTrace>) -> Self {
        self.trace = Some(trace);
        self
    }

    pub fn build(self) -> Result<KucoinClient> {
        let signer = match &self.credentials {
            Some(credentials) => {
                credentials.validate()?;
                Some(signer_for(credentials))
            }
            None => None,
        };

        if self.config.timeout.is_zero() {
            return Err(KucoinError::Config("timeout must be greater than zero".into()));
        }

        let trace: Arc<dyn HttpTrace> = match (self.trace, self.config.trace_http) {
            (Some(trace), _) => trace,
            (None, false) => Arc::new(NoopTrace),
            (None, true) => {
                return Err(KucoinError::Config(
                    "trace_http is enabled but no trace sink was provided".into(),
                ));
            }
        };

        let injected_transport = self.http_client.is_some();
        let http_client = match self.http_client {
            Some(client) => client,
            None => build_http_client(&self.config)?,
        };

        Ok(KucoinClient {
            http_client,
            injected_transport,
            endpoints: Arc::new(self.endpoints),
            config: Arc::new(self.config),
            credentials: self.credentials.map(Arc::new),
            signer,
            trace,
        })
    }
}

fn build_http_client(config: &ClientConfig) -> Result<Client> {
    let mut builder = Client::builder()
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout);
    if !config.keep_alive {
        builder = builder.pool_max_idle_per_host(0);
    }
    builder
        .build()
        .map_err(|e| KucoinError::Config(format!("failed to build HTTP client: {e}")))
}
