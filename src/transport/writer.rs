//! Async frame writer.
//!
//! Encodes payloads with [`encode_frame_into`] and writes them to any
//! `AsyncWrite`. A single scratch buffer is reused across writes, and
//! [`write_frames`](FrameWriter::write_frames) batches several frames into
//! one `write_all` call.

use bytes::BytesMut;
use std::io;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::{EscFrameError, Result};
use crate::protocol::{encode_frame_into, Markers};

/// Initial scratch buffer capacity.
const DEFAULT_CAPACITY: usize = 4 * 1024;

/// Writes encoded frames to an async byte sink.
#[derive(Debug)]
pub struct FrameWriter<W> {
    /// Underlying byte sink.
    writer: W,
    /// Marker pair used for encoding.
    markers: Markers,
    /// Scratch buffer holding encoded bytes.
    buf: BytesMut,
}

impl<W: AsyncWrite + Unpin> FrameWriter<W> {
    /// Create a new writer.
    pub fn new(writer: W, markers: Markers) -> Self {
        Self {
            writer,
            markers,
            buf: BytesMut::with_capacity(DEFAULT_CAPACITY),
        }
    }

    /// Encode and write a single frame.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionClosed` if the sink stops accepting bytes, or `Io`
    /// for any other write failure.
    pub async fn write_frame(&mut self, payload: &[u8]) -> Result<()> {
        self.buf.clear();
        encode_frame_into(self.markers, payload, &mut self.buf);
        self.write_buffered().await
    }

    /// Encode several frames and write them in one batch.
    pub async fn write_frames<I, P>(&mut self, payloads: I) -> Result<()>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        self.buf.clear();
        let mut count = 0usize;
        for payload in payloads {
            encode_frame_into(self.markers, payload.as_ref(), &mut self.buf);
            count += 1;
        }
        tracing::trace!("writing {} frames ({} bytes)", count, self.buf.len());
        self.write_buffered().await
    }

    /// Flush the underlying sink.
    pub async fn flush(&mut self) -> Result<()> {
        self.writer.flush().await?;
        Ok(())
    }

    /// Get the marker pair.
    pub fn markers(&self) -> Markers {
        self.markers
    }

    /// Get a reference to the underlying sink.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Get a mutable reference to the underlying sink.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Consume the writer and return the underlying sink.
    pub fn into_inner(self) -> W {
        self.writer
    }

    async fn write_buffered(&mut self) -> Result<()> {
        match self.writer.write_all(&self.buf).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::WriteZero => {
                tracing::debug!("sink closed with {} bytes unwritten", self.buf.len());
                Err(EscFrameError::ConnectionClosed)
            }
            Err(e) => Err(EscFrameError::Io(e)),
        }
    }
}
