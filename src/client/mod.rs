//! Staging API adapter: client factory, request descriptors, response
//! normalization and the generic request dispatcher.

mod envelope;
mod http;
mod request;

pub use envelope::{Envelope, RAW_TEXT_LIMIT, REPORT_TEXT_LIMIT};
pub use http::StagingApi;
pub use request::{ApiRequest, HttpMethod, ResponseShape};
