//! Recorded chunks and the per-session chunk buffer

use super::blob::{Blob, MediaType};

/// A fragment of encoded media emitted during a recording session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    data: Vec<u8>,
}

impl Chunk {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl From<Vec<u8>> for Chunk {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl AsRef<[u8]> for Chunk {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

/// Ordered sequence of chunks for one recording session.
///
/// Chunks are kept in arrival order; `finish` drains them into a single
/// blob and leaves the buffer empty for the next session.
#[derive(Debug, Default)]
pub struct ChunkBuffer {
    chunks: Vec<Chunk>,
}

impl ChunkBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk. Empty chunks carry no media and are skipped.
    pub fn push(&mut self, chunk: Chunk) {
        if !chunk.is_empty() {
            self.chunks.push(chunk);
        }
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Total number of buffered bytes
    pub fn size_bytes(&self) -> usize {
        self.chunks.iter().map(Chunk::size_bytes).sum()
    }

    pub fn clear(&mut self) {
        self.chunks.clear();
    }

    /// Concatenate all chunks into one blob and clear the buffer
    pub fn finish(&mut self, media_type: MediaType) -> Blob {
        let chunks = std::mem::take(&mut self.chunks);
        Blob::concat(chunks, media_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_concatenates_in_arrival_order() {
        let mut buffer = ChunkBuffer::new();
        buffer.push(Chunk::new(b"F1".to_vec()));
        buffer.push(Chunk::new(b"F2".to_vec()));
        buffer.push(Chunk::new(b"F3".to_vec()));
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.size_bytes(), 6);

        let blob = buffer.finish(MediaType::WebmAv1);
        assert_eq!(blob.data(), b"F1F2F3");
        assert_eq!(blob.media_type().as_str(), "video/webm; codecs=av1");
        assert!(buffer.is_empty());
    }

    #[test]
    fn empty_chunks_are_skipped() {
        let mut buffer = ChunkBuffer::new();
        buffer.push(Chunk::new(Vec::new()));
        assert!(buffer.is_empty());
    }

    #[test]
    fn finish_on_empty_buffer_yields_empty_blob() {
        let mut buffer = ChunkBuffer::new();
        let blob = buffer.finish(MediaType::WebmAv1);
        assert!(blob.is_empty());
    }

    #[test]
    fn clear_discards_chunks() {
        let mut buffer = ChunkBuffer::new();
        buffer.push(vec![1, 2].into());
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.size_bytes(), 0);
    }
}
