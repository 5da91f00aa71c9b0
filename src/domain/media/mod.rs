//! Recorded media value objects

mod blob;
mod chunk;

pub use blob::{Blob, MediaType};
pub use chunk::{Chunk, ChunkBuffer};
