/*
[INPUT]:  HTTP client configuration and API endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod dispatch;
pub mod envelope;
pub mod error;
pub mod futures;
pub mod request;
pub mod router;
pub mod spot;
pub mod trace;

pub use client::{ClientConfig, EndpointConfig, KucoinClient, KucoinClientBuilder};
pub use dispatch::RawResponse;
pub use envelope::{classify, decode, MessagePolicy, Outcome, ResponseEnvelope};
pub use error::{ErrorKind, KucoinError, Result};
pub use request::{PageRequest, Params, Payload, PreparedRequest, RequestDescriptor};
pub use router::{Access, Endpoint, Host, Route, Verb};
pub use trace::{HttpEvent, HttpTrace, NoopTrace, TracingTrace};
