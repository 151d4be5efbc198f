/*
[INPUT]:  Rendered requests and received responses from the dispatcher
[OUTPUT]: Trace events delivered to an injected sink
[POS]:    HTTP layer - optional request/response tracing
[UPDATE]: When trace event fields or bundled sinks change
*/

use std::fmt;
use std::time::Duration;

use tracing::debug;

use crate::auth::signer::{HEADER_API_PASSPHRASE, HEADER_API_SIGN};

/// One traced step of a call
#[derive(Debug, Clone, Copy)]
pub enum HttpEvent<'a> {
    Request {
        method: &'a str,
        url: &'a str,
        headers: &'a [(String, String)],
        body: &'a [u8],
    },
    Response {
        method: &'a str,
        url: &'a str,
        status: u16,
        headers: &'a [(String, String)],
        body: &'a [u8],
        elapsed: Duration,
    },
}

/// Receives trace events; must not fail or block for long
pub trait HttpTrace: Send + Sync + fmt::Debug {
    fn record(&self, event: &HttpEvent<'_>);
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTrace;

impl HttpTrace for NoopTrace {
    fn record(&self, _event: &HttpEvent<'_>) {}
}

/// Forwards events to `tracing` at debug level, masking secrets
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTrace;

impl HttpTrace for TracingTrace {
    fn record(&self, event: &HttpEvent<'_>) {
        match *event {
            HttpEvent::Request {
                method,
                url,
                headers,
                body,
            } => {
                debug!(
                    method,
                    url,
                    headers = %render_headers(headers),
                    body = %String::from_utf8_lossy(body),
                    "http request"
                );
            }
            HttpEvent::Response {
                method,
                url,
                status,
                headers,
                body,
                elapsed,
            } => {
                debug!(
                    method,
                    url,
                    status,
                    elapsed_ms = elapsed.as_millis() as u64,
                    headers = %render_headers(headers),
                    body = %String::from_utf8_lossy(body),
                    "http response"
                );
            }
        }
    }
}

fn render_headers(headers: &[(String, String)]) -> String {
    headers
        .iter()
        .map(|(name, value)| {
            if is_secret_header(name) {
                format!("{name}=***")
            } else {
                format!("{name}={value}")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_secret_header(name: &str) -> bool {
    name.eq_ignore_ascii_case(HEADER_API_PASSPHRASE) || name.eq_ignore_ascii_case(HEADER_API_SIGN)
}
