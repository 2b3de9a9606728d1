//! Middleware stack para el gateway.
//!
//! - `RequestIdLayer`: genera o propaga `X-Request-Id`
//! - `LoggingLayer`: logging estructurado de cada request

mod logging;
mod request_id;

pub use logging::{LoggingLayer, LoggingMiddleware};
pub use request_id::{REQUEST_ID_HEADER, RequestId, RequestIdLayer, RequestIdMiddleware};
