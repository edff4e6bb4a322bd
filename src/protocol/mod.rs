//! Protocol module - markers, frame decoding and frame encoding.
//!
//! This module implements ESC/SOF byte-stuffed framing:
//! - Marker pair configuration
//! - Byte-at-a-time state machine decoder with a frame sink
//! - Symmetric encoder for producing frames

mod decoder;
mod encoder;
mod markers;

pub use decoder::{collect_frames, DecoderState, FrameDecoder};
pub use encoder::{encode_frame, encode_frame_into, encoded_len, FRAME_OVERHEAD};
pub use markers::Markers;
