//! Object URL adapters

mod registry;

pub use registry::{BlobUrlRegistry, URL_PREFIX};
