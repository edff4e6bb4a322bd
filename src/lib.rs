//! # escframe
//!
//! Streaming decoder and encoder for ESC/SOF byte-stuffed frames.
//!
//! Frames travel over a plain byte channel as `ESC SOF <payload> ESC SOF`.
//! A literal `ESC` inside the payload is doubled; a bare `SOF` is ordinary
//! data. The decoder consumes one byte at a time and hands each completed
//! frame to a sink closure, dropping frames that contain an invalid escape.
//!
//! ## Architecture
//!
//! - **Protocol** (sync): marker configuration, the state machine decoder,
//!   and the symmetric encoder
//! - **Transport** (tokio): `AsyncRead`/`AsyncWrite` adapters built on top
//!
//! ## Example
//!
//! ```
//! use escframe::protocol::{encode_frame, FrameDecoder, Markers};
//!
//! let markers = Markers::new(0xDB, 0xC0).unwrap();
//!
//! let mut received = Vec::new();
//! let mut decoder = FrameDecoder::with_markers(markers, |frame| received.push(frame));
//! decoder.feed_slice(&encode_frame(markers, b"hello"));
//! decoder.feed_slice(&encode_frame(markers, &[0xDB, 0xC0]));
//! drop(decoder);
//!
//! assert_eq!(&received[0][..], b"hello");
//! assert_eq!(&received[1][..], &[0xDB, 0xC0]);
//! ```

pub mod error;
pub mod protocol;
pub mod transport;

pub use error::{EscFrameError, Result};
pub use protocol::{DecoderState, FrameDecoder, Markers};
pub use transport::{FrameReader, FrameWriter};
