//! In-process object URL registry

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tracing::trace;

use crate::application::ports::{ObjectSource, ObjectUrls};

/// Scheme and authority of every issued URL
pub const URL_PREFIX: &str = "blob:camrec/";

/// Maps `blob:camrec/<n>` URLs to the streams and blobs they reference.
///
/// A source stays alive for as long as its URL is registered.
#[derive(Debug, Default)]
pub struct BlobUrlRegistry {
    next_id: AtomicU64,
    entries: Mutex<HashMap<String, ObjectSource>>,
}

impl BlobUrlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live URLs
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ObjectUrls for BlobUrlRegistry {
    fn create(&self, source: ObjectSource) -> String {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let url = format!("{URL_PREFIX}{id}");
        trace!(%url, ?source, "url created");
        self.entries.lock().insert(url.clone(), source);
        url
    }

    fn resolve(&self, url: &str) -> Option<ObjectSource> {
        self.entries.lock().get(url).cloned()
    }

    fn revoke(&self, url: &str) -> bool {
        let removed = self.entries.lock().remove(url).is_some();
        trace!(%url, removed, "url revoked");
        removed
    }
}
