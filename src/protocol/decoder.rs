//! Streaming ESC/SOF frame decoder.
//!
//! Consumes one byte at a time and hands every completed frame to a sink
//! closure. Implements a four-state machine:
//! - `Idle`: outside any frame
//! - `SeekingSof`: saw `ESC` outside a frame, expecting `SOF`
//! - `InFrame`: accumulating payload bytes
//! - `InFrameEscaped`: saw `ESC` inside a frame
//!
//! Malformed input never produces an error. An escape followed by anything
//! other than `ESC` or `SOF` drops the open frame and the decoder resumes
//! from `Idle`.
//!
//! # Example
//!
//! ```
//! use escframe::protocol::FrameDecoder;
//!
//! let mut frames = Vec::new();
//! let mut decoder = FrameDecoder::new(b'H', 0x11, |frame| frames.push(frame));
//!
//! // "H" doubles as ESC, so a literal "H" in the payload is sent as "HH".
//! decoder.feed_slice(&[0x70, b'H', 0x11, b'H', b'H', b'e', b'l', b'l', b'o', b'H', 0x11]);
//! drop(decoder);
//!
//! assert_eq!(frames.len(), 1);
//! assert_eq!(&frames[0][..], b"Hello");
//! ```

use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;

use super::Markers;
use crate::error::{EscFrameError, Result};

/// Initial capacity of the frame buffer.
const DEFAULT_CAPACITY: usize = 256;

/// Decoder state. Exactly one is active at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    /// Not inside a frame, not processing an escape.
    Idle,
    /// `ESC` seen outside a frame; `SOF` opens a frame.
    SeekingSof,
    /// Accumulating payload bytes of an open frame.
    InFrame,
    /// Inside a frame, the previous byte was `ESC`.
    InFrameEscaped,
}

impl DecoderState {
    /// Get the state name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            DecoderState::Idle => "Idle",
            DecoderState::SeekingSof => "SeekingSof",
            DecoderState::InFrame => "InFrame",
            DecoderState::InFrameEscaped => "InFrameEscaped",
        }
    }

    /// Check if a frame is currently open.
    #[inline]
    pub fn is_in_frame(&self) -> bool {
        matches!(self, DecoderState::InFrame | DecoderState::InFrameEscaped)
    }
}

impl fmt::Display for DecoderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Byte-at-a-time decoder for ESC/SOF stuffed frames.
///
/// The sink is called synchronously from [`feed`](Self::feed), once per
/// completed frame, in arrival order. Each frame is handed over as an owned
/// `Bytes`; the internal buffer is then empty and reused for the next frame.
///
/// A decoder is bound to one logical stream. It does no locking; wrap it in
/// a mutex if several threads must feed it.
pub struct FrameDecoder<F> {
    /// Marker bytes this decoder recognizes.
    markers: Markers,
    /// Current state machine position.
    state: DecoderState,
    /// Payload of the open frame.
    buffer: BytesMut,
    /// Receives completed frames.
    sink: F,
}

impl<F> FrameDecoder<F>
where
    F: FnMut(Bytes),
{
    /// Create a decoder bound to `esc`, `sof` and `sink`.
    ///
    /// # Precondition
    ///
    /// `esc != sof`. This is not checked. With equal markers `ESC SOF` can
    /// still open a frame, but inside it every marker byte is taken as an
    /// escaped `ESC`, so the frame never closes and the sink is never called.
    /// Use [`Markers::new`] and [`with_markers`](Self::with_markers) to get a
    /// checked pair.
    pub fn new(esc: u8, sof: u8, sink: F) -> Self {
        Self::with_markers(Markers::new_unchecked(esc, sof), sink)
    }

    /// Create a decoder from a marker pair.
    pub fn with_markers(markers: Markers, sink: F) -> Self {
        Self {
            markers,
            state: DecoderState::Idle,
            buffer: BytesMut::with_capacity(DEFAULT_CAPACITY),
            sink,
        }
    }

    /// Process exactly one input byte.
    ///
    /// Invokes the sink once, before returning, if and only if this byte
    /// closes a frame.
    pub fn feed(&mut self, byte: u8) {
        let esc = self.markers.esc();
        let sof = self.markers.sof();

        self.state = match self.state {
            DecoderState::Idle => {
                if byte == esc {
                    DecoderState::SeekingSof
                } else {
                    DecoderState::Idle
                }
            }

            // Only SOF is special here: a second ESC is discarded like any
            // other byte instead of restarting the search.
            DecoderState::SeekingSof => {
                if byte == sof {
                    self.buffer.clear();
                    tracing::trace!("frame opened");
                    DecoderState::InFrame
                } else {
                    DecoderState::Idle
                }
            }

            DecoderState::InFrame => {
                if byte == esc {
                    DecoderState::InFrameEscaped
                } else {
                    self.buffer.put_u8(byte);
                    DecoderState::InFrame
                }
            }

            DecoderState::InFrameEscaped => {
                if byte == esc {
                    self.buffer.put_u8(esc);
                    DecoderState::InFrame
                } else if byte == sof {
                    self.emit();
                    DecoderState::Idle
                } else {
                    tracing::debug!(
                        "invalid escape {:#04x}, dropping {} byte frame",
                        byte,
                        self.buffer.len()
                    );
                    self.buffer.clear();
                    DecoderState::Idle
                }
            }
        };
    }

    /// Feed every byte of `data` in order.
    ///
    /// Equivalent to calling [`feed`](Self::feed) once per byte.
    pub fn feed_slice(&mut self, data: &[u8]) {
        for &byte in data {
            self.feed(byte);
        }
    }

    /// Hand the buffered payload to the sink.
    fn emit(&mut self) {
        // Leaves the buffer empty with its spare capacity kept for reuse
        let frame = self.buffer.split().freeze();
        tracing::trace!("frame complete ({} bytes)", frame.len());
        (self.sink)(frame);
    }
}

impl<F> FrameDecoder<F> {
    /// Signal end of stream.
    ///
    /// Resets the decoder to `Idle`. The sink is never invoked: a frame that
    /// is still open is discarded.
    ///
    /// # Errors
    ///
    /// Returns `TruncatedFrame` if a frame was open, carrying the number of
    /// payload bytes that were dropped.
    pub fn finish(&mut self) -> Result<()> {
        let was_open = self.state.is_in_frame();
        let buffered = self.buffer.len();
        self.reset();

        if was_open {
            tracing::debug!("stream ended inside a frame, {} bytes discarded", buffered);
            return Err(EscFrameError::TruncatedFrame { buffered });
        }
        Ok(())
    }

    /// Drop any open frame and return to `Idle`.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.state = DecoderState::Idle;
    }

    /// Get the current state.
    #[inline]
    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// Check if a frame is currently open.
    #[inline]
    pub fn is_in_frame(&self) -> bool {
        self.state.is_in_frame()
    }

    /// Get the number of payload bytes buffered for the open frame.
    #[inline]
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Get the marker pair.
    #[inline]
    pub fn markers(&self) -> Markers {
        self.markers
    }

    /// Get a reference to the sink.
    pub fn sink(&self) -> &F {
        &self.sink
    }

    /// Get a mutable reference to the sink.
    pub fn sink_mut(&mut self) -> &mut F {
        &mut self.sink
    }

    /// Consume the decoder and return the sink. Any open frame is dropped.
    pub fn into_sink(self) -> F {
        self.sink
    }
}

impl<F> fmt::Debug for FrameDecoder<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameDecoder")
            .field("markers", &self.markers)
            .field("state", &self.state)
            .field("buffered", &self.buffer.len())
            .finish_non_exhaustive()
    }
}

/// Decode a complete byte slice with a fresh decoder and return every frame.
///
/// An unterminated trailing frame is discarded.
pub fn collect_frames(markers: Markers, data: &[u8]) -> Vec<Bytes> {
    let mut frames = Vec::new();
    {
        let mut decoder = FrameDecoder::with_markers(markers, |frame| frames.push(frame));
        decoder.feed_slice(data);
    }
    frames
}
