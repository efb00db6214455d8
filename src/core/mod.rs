//! Request execution machinery shared by every operation
//!
//! - `config`: validated client settings
//! - `http`: the transport seam and its reqwest implementation
//! - `retry`: exponential backoff around one transport call
//! - `decode`: status checks and shape validation of JSON bodies

pub mod config;
pub mod decode;
pub mod http;
pub mod retry;

pub use config::{SwcConfig, SwcConfigBuilder};
pub use http::{ReqwestTransport, Transport, TransportRequest, TransportResponse};
pub use retry::RetryPolicy;
