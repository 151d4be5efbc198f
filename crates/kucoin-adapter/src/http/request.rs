/*
[INPUT]:  Routes, query parameters or request bodies, host base URLs
[OUTPUT]: Prepared requests whose URL/body are exactly what gets signed
[POS]:    HTTP layer - request encoding and canonical string construction
[UPDATE]: When changing parameter encoding or the canonical string format
*/

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;
use url::{Position, Url, form_urlencoded};

use crate::http::router::{Route, Verb};
use crate::http::{KucoinError, Result};

/// Page selection for list operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub current_page: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub fn new(current_page: u32, page_size: u32) -> Self {
        Self {
            current_page,
            page_size,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, 50)
    }
}

/// Query parameter set, one value per key, rendered in key order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        self.0.insert(key.into(), value.to_string());
        self
    }

    /// Insert only present, non-empty values
    pub fn insert_opt<V: ToString>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            let value = value.to_string();
            if !value.is_empty() {
                self.0.insert(key.to_string(), value);
            }
        }
        self
    }

    pub fn insert_page(&mut self, page: PageRequest) -> &mut Self {
        self.insert("currentPage", page.current_page)
            .insert("pageSize", page.page_size)
    }

    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `application/x-www-form-urlencoded` rendering
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.0.iter())
            .finish()
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// Exactly one of: query parameters (GET/DELETE) or raw body (POST)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Query(Params),
    Body(Vec<u8>),
}

/// Everything needed to issue one call.
///
/// Built only through the constructors, which pair the payload kind with the verb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub(crate) route: Route,
    pub(crate) payload: Payload,
    /// Overrides the client timeout for this call only
    pub timeout: Option<Duration>,
}

impl RequestDescriptor {
    /// Descriptor without parameters (empty query or empty body)
    pub fn new(route: Route) -> Self {
        let payload = if route.verb.uses_query() {
            Payload::Query(Params::new())
        } else {
            Payload::Body(Vec::new())
        };
        Self {
            route,
            payload,
            timeout: None,
        }
    }

    /// GET/DELETE descriptor carrying query parameters
    pub fn with_query(route: Route, params: Params) -> Result<Self> {
        if !route.verb.uses_query() {
            return Err(KucoinError::invalid_parameter(
                "params",
                format!("{} requests carry a body, not a query", route.verb),
            ));
        }
        Ok(Self {
            route,
            payload: Payload::Query(params),
            timeout: None,
        })
    }

    /// POST descriptor with an already serialized body
    pub fn with_raw_body(route: Route, body: impl Into<Vec<u8>>) -> Result<Self> {
        if route.verb.uses_query() {
            return Err(KucoinError::invalid_parameter(
                "body",
                format!("{} requests carry a query, not a body", route.verb),
            ));
        }
        Ok(Self {
            route,
            payload: Payload::Body(body.into()),
            timeout: None,
        })
    }

    /// POST descriptor with a JSON body
    pub fn with_json<B: Serialize + ?Sized>(route: Route, body: &B) -> Result<Self> {
        let bytes = serde_json::to_vec(body).map_err(KucoinError::Serialization)?;
        Self::with_raw_body(route, bytes)
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Render the request against `base`.
    ///
    /// The URL is built and parsed exactly once here; both the transmitted
    /// request and the canonical string are read from the result.
    pub fn prepare(&self, base: &Url) -> Result<PreparedRequest> {
        // A path prefix on the base URL (e.g. behind a gateway) is kept
        let mut url = base.clone();
        url.set_path(&format!(
            "{}{}",
            base.path().trim_end_matches('/'),
            self.route.path
        ));
        url.set_query(None);
        url.set_fragment(None);
        let body = match &self.payload {
            Payload::Query(params) => {
                if !params.is_empty() {
                    url.set_query(Some(&params.to_query_string()));
                }
                None
            }
            Payload::Body(bytes) => Some(bytes.clone()),
        };

        Ok(PreparedRequest {
            verb: self.route.verb,
            url,
            body,
        })
    }
}

/// A request rendered once, used for both signing and transmission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub verb: Verb,
    pub url: Url,
    pub body: Option<Vec<u8>>,
}

impl PreparedRequest {
    /// Path plus `?query` when a query is present
    pub fn request_target(&self) -> &str {
        &self.url[Position::BeforePath..Position::AfterQuery]
    }

    pub fn body(&self) -> &[u8] {
        self.body.as_deref().unwrap_or_default()
    }

    /// `timestamp + VERB + request-target + body`
    pub fn canonical(&self, timestamp_ms: u64) -> Vec<u8> {
        let target = self.request_target();
        let body = self.body();
        let mut canonical =
            Vec::with_capacity(20 + self.verb.as_str().len() + target.len() + body.len());
        canonical.extend_from_slice(timestamp_ms.to_string().as_bytes());
        canonical.extend_from_slice(self.verb.as_str().as_bytes());
        canonical.extend_from_slice(target.as_bytes());
        canonical.extend_from_slice(body);
        canonical
    }
}
