//! Blob value object

use std::fmt;
use std::sync::Arc;

/// Media types produced by the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MediaType {
    /// Recorded video
    #[default]
    WebmAv1,
    /// Captured still frame
    Png,
}

impl MediaType {
    /// Get the MIME type string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WebmAv1 => "video/webm; codecs=av1",
            Self::Png => "image/png",
        }
    }

    /// Get the file extension
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::WebmAv1 => "webm",
            Self::Png => "png",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable in-memory binary artifact.
///
/// Cloning is cheap: clones share the same bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    data: Arc<[u8]>,
    media_type: MediaType,
}

impl Blob {
    /// Create a blob from raw bytes
    pub fn new(data: Vec<u8>, media_type: MediaType) -> Self {
        Self {
            data: data.into(),
            media_type,
        }
    }

    /// Concatenate parts, in order, into one blob
    pub fn concat<I, P>(parts: I, media_type: MediaType) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        let mut data = Vec::new();
        for part in parts {
            data.extend_from_slice(part.as_ref());
        }
        Self::new(data, media_type)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get human-readable size
    pub fn human_readable_size(&self) -> String {
        let bytes = self.size_bytes();
        if bytes < 1024 {
            format!("{} B", bytes)
        } else if bytes < 1024 * 1024 {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
        }
    }
}
