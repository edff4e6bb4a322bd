//! Transport module - async adapters over tokio byte streams.
//!
//! Provides:
//! - [`FrameReader`] for decoding frames from an `AsyncRead`
//! - [`FrameWriter`] for encoding frames onto an `AsyncWrite`

mod reader;
mod writer;

pub use reader::{FrameReader, ReaderConfig, DEFAULT_READ_BUFFER_SIZE};
pub use writer::FrameWriter;
