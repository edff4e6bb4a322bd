//! Async frame reader.
//!
//! Reads chunks from any `AsyncRead`, runs them through a [`FrameDecoder`]
//! and yields decoded frames one at a time.
//!
//! # Example
//!
//! ```
//! use escframe::protocol::{encode_frame, Markers};
//! use escframe::transport::FrameReader;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> escframe::Result<()> {
//! let markers = Markers::new(0xDB, 0xC0)?;
//! let wire = encode_frame(markers, b"ping");
//!
//! let mut reader = FrameReader::new(&wire[..], markers);
//! assert_eq!(reader.next_frame().await?.as_deref(), Some(&b"ping"[..]));
//! assert_eq!(reader.next_frame().await?, None);
//! # Ok(())
//! # }
//! ```

use bytes::Bytes;
use std::fmt;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::mpsc;

use crate::error::Result;
use crate::protocol::{DecoderState, FrameDecoder, Markers};

/// Default read buffer size (64KB).
pub const DEFAULT_READ_BUFFER_SIZE: usize = 64 * 1024;

/// Configuration for [`FrameReader`].
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Size of the buffer passed to each `read` call.
    pub read_buffer_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
        }
    }
}

/// Sink that queues completed frames for the reader.
type QueueSink = Box<dyn FnMut(Bytes) + Send>;

/// Pulls decoded frames out of an async byte source.
///
/// Frames decoded from one read are queued and returned in order before
/// the next read is issued.
pub struct FrameReader<R> {
    /// Underlying byte source.
    reader: R,
    /// Decoder pushing completed frames into `frames`.
    decoder: FrameDecoder<QueueSink>,
    /// Frames decoded but not yet returned.
    frames: mpsc::UnboundedReceiver<Bytes>,
    /// Read buffer.
    buf: Vec<u8>,
    /// Set once the source returned EOF.
    eof: bool,
}

impl<R: AsyncRead + Unpin> FrameReader<R> {
    /// Create a reader with default settings.
    pub fn new(reader: R, markers: Markers) -> Self {
        Self::with_config(reader, markers, ReaderConfig::default())
    }

    /// Create a reader with custom settings.
    pub fn with_config(reader: R, markers: Markers, config: ReaderConfig) -> Self {
        let (tx, frames) = mpsc::unbounded_channel::<Bytes>();
        let sink: QueueSink = Box::new(move |frame: Bytes| {
            // Receiver lives as long as the reader, so this cannot fail
            let _ = tx.send(frame);
        });

        Self {
            reader,
            decoder: FrameDecoder::with_markers(markers, sink),
            frames,
            buf: vec![0u8; config.read_buffer_size.max(1)],
            eof: false,
        }
    }

    /// Read until the next complete frame.
    ///
    /// Returns `Ok(None)` once the source is exhausted.
    ///
    /// # Errors
    ///
    /// - `Io` if the source fails.
    /// - `TruncatedFrame` if the source ends inside an open frame. Later
    ///   calls return `Ok(None)`.
    pub async fn next_frame(&mut self) -> Result<Option<Bytes>> {
        loop {
            if let Ok(frame) = self.frames.try_recv() {
                return Ok(Some(frame));
            }

            if self.eof {
                return Ok(None);
            }

            let n = self.reader.read(&mut self.buf).await?;
            if n == 0 {
                self.eof = true;
                if let Err(e) = self.decoder.finish() {
                    tracing::warn!("{}", e);
                    return Err(e);
                }
                continue;
            }

            self.decoder.feed_slice(&self.buf[..n]);
        }
    }

    /// Get the decoder state.
    pub fn state(&self) -> DecoderState {
        self.decoder.state()
    }

    /// Get the marker pair.
    pub fn markers(&self) -> Markers {
        self.decoder.markers()
    }

    /// Get a reference to the underlying source.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Consume the reader and return the underlying source.
    ///
    /// Queued frames and any open frame are dropped.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R> fmt::Debug for FrameReader<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameReader")
            .field("decoder", &self.decoder)
            .field("eof", &self.eof)
            .finish_non_exhaustive()
    }
}
