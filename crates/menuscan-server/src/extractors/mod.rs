//! Request extractors that reject with the gateway's JSON errors.

pub mod query;
pub mod upload;

pub use query::{LookupParams, SearchParams};
pub use upload::MenuUpload;
