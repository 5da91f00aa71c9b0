//! Temporary resource URL port interface

use std::fmt;
use std::sync::Arc;

use crate::domain::media::Blob;

use super::capture::MediaStream;

/// Something an object URL can point at
#[derive(Clone)]
pub enum ObjectSource {
    Stream(Arc<dyn MediaStream>),
    Blob(Blob),
}

impl fmt::Debug for ObjectSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stream(stream) => f.debug_tuple("Stream").field(&stream.id()).finish(),
            Self::Blob(blob) => f
                .debug_struct("Blob")
                .field("media_type", &blob.media_type())
                .field("size", &blob.size_bytes())
                .finish(),
        }
    }
}

/// Port for creating displayable references to streams and blobs
pub trait ObjectUrls: Send + Sync {
    /// Register a source and return its URL
    fn create(&self, source: ObjectSource) -> String;

    fn resolve(&self, url: &str) -> Option<ObjectSource>;

    /// Release a URL. Returns false if it was unknown.
    fn revoke(&self, url: &str) -> bool;
}
