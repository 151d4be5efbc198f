/*
[INPUT]:  Request descriptors, client transport, signer and trace sink
[OUTPUT]: Raw responses or typed results decoded from the envelope
[POS]:    HTTP layer - signing, sending and decoding one call
[UPDATE]: When changing headers, timeout handling or cancellation
*/

use std::time::{Duration, Instant};

use chrono::Utc;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::http::envelope;
use crate::http::request::{PreparedRequest, RequestDescriptor};
use crate::http::trace::HttpEvent;
use crate::http::{KucoinClient, KucoinError, Result};

const CONTENT_TYPE_JSON: &str = "application/json";

/// Status, headers and body of a completed exchange
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl KucoinClient {
    /// Sign, send and decode one call
    pub async fn execute<T: DeserializeOwned>(&self, request: RequestDescriptor) -> Result<T> {
        let response = self.send(&request).await?;
        envelope::decode(
            response.status,
            &response.body,
            self.config.message_policy,
        )
    }

    /// Like [`execute`](Self::execute), but gives up once `cancel` fires
    pub async fn execute_with_cancel<T: DeserializeOwned>(
        &self,
        request: RequestDescriptor,
        cancel: &CancellationToken,
    ) -> Result<T> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(KucoinError::Cancelled),
            result = self.execute(request) => result,
        }
    }

    /// Perform the network exchange without interpreting the body
    pub async fn send(&self, request: &RequestDescriptor) -> Result<RawResponse> {
        let signer = self.signer_for_route(&request.route)?;
        let base = self.endpoints.base_url(request.route.host);
        let prepared = request.prepare(base)?;
        let timeout = request.timeout.unwrap_or(self.config.timeout);

        let mut headers = vec![
            (CONTENT_TYPE.as_str().to_string(), CONTENT_TYPE_JSON.to_string()),
            (USER_AGENT.as_str().to_string(), self.config.user_agent.clone()),
        ];
        if let Some(signer) = signer {
            let timestamp_ms = now_millis();
            let signed = signer.headers(timestamp_ms, &prepared.canonical(timestamp_ms));
            headers.extend(
                signed
                    .pairs()
                    .iter()
                    .map(|(name, value)| (name.to_string(), value.to_string())),
            );
        }

        self.transmit(&prepared, headers, timeout).await
    }

    async fn transmit(
        &self,
        prepared: &PreparedRequest,
        headers: Vec<(String, String)>,
        timeout: Duration,
    ) -> Result<RawResponse> {
        let method = prepared.verb.as_str();
        let url = prepared.url.as_str();
        let trace_enabled = self.config.trace_http;

        if trace_enabled {
            self.trace.record(&HttpEvent::Request {
                method,
                url,
                headers: &headers,
                body: prepared.body(),
            });
        }

        let mut builder = self
            .http_client
            .request(prepared.verb.method(), prepared.url.clone())
            .timeout(timeout);
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &prepared.body {
            builder = builder.body(body.clone());
        }

        debug!(method, request_target = prepared.request_target(), "sending request");
        let started = Instant::now();

        let response = builder
            .send()
            .await
            .map_err(|err| transport_error(err, timeout))?;
        let status = response.status().as_u16();
        let response_headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect::<Vec<_>>();
        let body = response
            .bytes()
            .await
            .map_err(|err| transport_error(err, timeout))?
            .to_vec();
        let elapsed = started.elapsed();

        debug!(
            method,
            request_target = prepared.request_target(),
            status,
            elapsed_ms = elapsed.as_millis() as u64,
            "received response"
        );

        if trace_enabled {
            self.trace.record(&HttpEvent::Response {
                method,
                url,
                status,
                headers: &response_headers,
                body: &body,
                elapsed,
            });
        }

        Ok(RawResponse {
            status,
            headers: response_headers,
            body,
        })
    }
}

fn transport_error(err: reqwest::Error, timeout: Duration) -> KucoinError {
    if err.is_timeout() {
        KucoinError::Timeout {
            duration_ms: timeout.as_millis() as u64,
        }
    } else {
        KucoinError::Http(err)
    }
}

fn now_millis() -> u64 {
    // Clocks before 1970 are clamped rather than wrapped
    Utc::now().timestamp_millis().max(0) as u64
}
