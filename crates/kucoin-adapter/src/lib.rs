/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public KuCoin REST adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{ApiKeyVersion, Credentials, RequestSigner};

// Re-export commonly used types from http
pub use http::{
    ClientConfig,
    EndpointConfig,
    ErrorKind,
    HttpTrace,
    KucoinClient,
    KucoinClientBuilder,
    KucoinError,
    MessagePolicy,
    PageRequest,
    RequestDescriptor,
    Result,
    TracingTrace,
};

// Re-export all types
pub use types::*;
