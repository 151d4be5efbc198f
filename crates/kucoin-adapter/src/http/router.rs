/*
[INPUT]:  Logical operation definitions and path parameter values
[OUTPUT]: Routes pinned to one host with a verb and a concrete path
[POS]:    HTTP layer - static endpoint table and path templating
[UPDATE]: When adding endpoints or changing path templates
*/

use std::fmt;

use reqwest::Method;

use crate::http::{KucoinError, Result};

/// Which REST surface an operation lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Host {
    Spot,
    Futures,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Delete,
    Post,
}

impl Verb {
    /// Upper-case name, as it appears in the canonical string
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Delete => "DELETE",
            Verb::Post => "POST",
        }
    }

    /// GET and DELETE carry parameters in the query, POST in the body
    pub fn uses_query(&self) -> bool {
        matches!(self, Verb::Get | Verb::Delete)
    }

    pub(crate) fn method(&self) -> Method {
        match self {
            Verb::Get => Method::GET,
            Verb::Delete => Method::DELETE,
            Verb::Post => Method::POST,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an operation needs credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Private,
}

/// A logical operation: host, verb and path template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub host: Host,
    pub verb: Verb,
    pub path: &'static str,
    pub access: Access,
}

/// An endpoint with its path parameters substituted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub host: Host,
    pub verb: Verb,
    pub path: String,
    pub access: Access,
}

impl Endpoint {
    const fn new(host: Host, verb: Verb, path: &'static str, access: Access) -> Self {
        Self {
            host,
            verb,
            path,
            access,
        }
    }

    /// Route for a template without placeholders
    pub fn route(&self) -> Result<Route> {
        self.route_with(&[])
    }

    /// Substitute `{name}` placeholders with the given values.
    ///
    /// Values are opaque server-issued identifiers: they are inserted verbatim
    /// and rejected if they would change the shape of the path.
    pub fn route_with(&self, params: &[(&str, &str)]) -> Result<Route> {
        let mut path = self.path.to_string();
        for (name, value) in params {
            validate_path_value(name, value)?;
            let placeholder = format!("{{{name}}}");
            if !path.contains(&placeholder) {
                return Err(KucoinError::invalid_parameter(
                    *name,
                    format!("no such placeholder in {}", self.path),
                ));
            }
            path = path.replace(&placeholder, value);
        }

        if let Some(start) = path.find('{') {
            let unfilled = path[start..].split('}').next().unwrap_or_default();
            return Err(KucoinError::invalid_parameter(
                unfilled.trim_start_matches('{'),
                "path parameter not provided",
            ));
        }

        Ok(Route {
            host: self.host,
            verb: self.verb,
            path,
            access: self.access,
        })
    }
}

fn validate_path_value(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(KucoinError::invalid_parameter(name, "must not be empty"));
    }
    if matches!(value, "." | "..") {
        return Err(KucoinError::invalid_parameter(name, "must not be a dot segment"));
    }
    if let Some(bad) = value
        .chars()
        .find(|c| matches!(c, '/' | '?' | '#' | '%' | '{' | '}') || c.is_whitespace())
    {
        return Err(KucoinError::invalid_parameter(
            name,
            format!("contains reserved character {bad:?}"),
        ));
    }
    Ok(())
}

// ### Spot host

pub const SPOT_SYMBOLS: Endpoint =
    Endpoint::new(Host::Spot, Verb::Get, "/api/v2/symbols", Access::Public);
pub const SPOT_ACCOUNTS: Endpoint =
    Endpoint::new(Host::Spot, Verb::Get, "/api/v1/accounts", Access::Private);
pub const SPOT_PLACE_ORDER: Endpoint =
    Endpoint::new(Host::Spot, Verb::Post, "/api/v1/orders", Access::Private);
pub const SPOT_PLACE_MARGIN_ORDER: Endpoint =
    Endpoint::new(Host::Spot, Verb::Post, "/api/v1/margin/order", Access::Private);
pub const SPOT_FILLS: Endpoint =
    Endpoint::new(Host::Spot, Verb::Get, "/api/v1/fills", Access::Private);
pub const SPOT_CANCEL_ORDER: Endpoint = Endpoint::new(
    Host::Spot,
    Verb::Delete,
    "/api/v1/orders/{orderId}",
    Access::Private,
);
pub const SPOT_ORDERS: Endpoint =
    Endpoint::new(Host::Spot, Verb::Get, "/api/v1/orders", Access::Private);
pub const SPOT_ORDER: Endpoint = Endpoint::new(
    Host::Spot,
    Verb::Get,
    "/api/v1/orders/{orderId}",
    Access::Private,
);

// ### Futures host

pub const FUTURES_ACCOUNT: Endpoint = Endpoint::new(
    Host::Futures,
    Verb::Get,
    "/api/v1/account-overview",
    Access::Private,
);
pub const FUTURES_PLACE_ORDER: Endpoint =
    Endpoint::new(Host::Futures, Verb::Post, "/api/v1/orders", Access::Private);
pub const FUTURES_CANCEL_ORDER: Endpoint = Endpoint::new(
    Host::Futures,
    Verb::Delete,
    "/api/v1/orders/{orderId}",
    Access::Private,
);
pub const FUTURES_ORDERS: Endpoint =
    Endpoint::new(Host::Futures, Verb::Get, "/api/v1/orders", Access::Private);
pub const FUTURES_ORDER: Endpoint = Endpoint::new(
    Host::Futures,
    Verb::Get,
    "/api/v1/orders/{orderId}",
    Access::Private,
);
pub const FUTURES_FILLS: Endpoint =
    Endpoint::new(Host::Futures, Verb::Get, "/api/v1/fills", Access::Private);
pub const FUTURES_POSITION: Endpoint =
    Endpoint::new(Host::Futures, Verb::Get, "/api/v1/position", Access::Private);
pub const FUTURES_POSITIONS: Endpoint =
    Endpoint::new(Host::Futures, Verb::Get, "/api/v1/positions", Access::Private);
pub const FUTURES_CONTRACTS: Endpoint = Endpoint::new(
    Host::Futures,
    Verb::Get,
    "/api/v1/contracts/active",
    Access::Public,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_without_placeholders() {
        let route = SPOT_ACCOUNTS.route().unwrap();
        assert_eq!(route.path, "/api/v1/accounts");
        assert_eq!(route.host, Host::Spot);
        assert_eq!(route.verb, Verb::Get);
    }

    #[test]
    fn test_route_substitutes_order_id() {
        let route = FUTURES_CANCEL_ORDER
            .route_with(&[("orderId", "5bd6e9286d99522a52e458de")])
            .unwrap();
        assert_eq!(route.path, "/api/v1/orders/5bd6e9286d99522a52e458de");
        assert_eq!(route.host, Host::Futures);
        assert_eq!(route.verb, Verb::Delete);
    }

    #[test]
    fn test_route_rejects_missing_placeholder_value() {
        let err = SPOT_ORDER.route().unwrap_err();
        match err {
            KucoinError::InvalidParameter { name, .. } => assert_eq!(name, "orderId"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_route_rejects_reserved_characters() {
        for bad in ["", ".", "..", "a/b", "a?b", "a b", "a%2F", "a#b"] {
            assert!(
                SPOT_ORDER.route_with(&[("orderId", bad)]).is_err(),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_route_accepts_dots_inside_identifiers() {
        let route = SPOT_ORDER.route_with(&[("orderId", "a..b")]).unwrap();
        assert_eq!(route.path, "/api/v1/orders/a..b");
    }

    #[test]
    fn test_route_rejects_unknown_placeholder() {
        assert!(SPOT_ACCOUNTS.route_with(&[("orderId", "abc")]).is_err());
    }

    #[test]
    fn test_same_path_on_both_hosts_stays_pinned() {
        assert_eq!(SPOT_ORDERS.path, FUTURES_ORDERS.path);
        assert_ne!(SPOT_ORDERS.host, FUTURES_ORDERS.host);
    }

    #[test]
    fn test_verb_query_placement() {
        assert!(Verb::Get.uses_query());
        assert!(Verb::Delete.uses_query());
        assert!(!Verb::Post.uses_query());
        assert_eq!(Verb::Delete.to_string(), "DELETE");
    }
}
