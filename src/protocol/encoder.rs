//! Frame encoding, the producer side of [`FrameDecoder`](super::FrameDecoder).
//!
//! Wraps a payload as `ESC SOF <payload> ESC SOF`, doubling every `ESC` in
//! the payload. `SOF` bytes in the payload are written as-is.
//!
//! # Example
//!
//! ```
//! use escframe::protocol::{collect_frames, encode_frame, Markers};
//!
//! let markers = Markers::new(b'H', 0x11).unwrap();
//! let wire = encode_frame(markers, b"Hi");
//! assert_eq!(&wire[..], &[b'H', 0x11, b'H', b'H', b'i', b'H', 0x11]);
//!
//! let frames = collect_frames(markers, &wire);
//! assert_eq!(&frames[0][..], b"Hi");
//! ```

use bytes::{BufMut, Bytes, BytesMut};

use super::Markers;

/// Number of marker bytes added around every payload (`ESC SOF` twice).
pub const FRAME_OVERHEAD: usize = 4;

/// Encoded size of `payload`, including delimiters.
pub fn encoded_len(markers: Markers, payload: &[u8]) -> usize {
    let escapes = payload.iter().filter(|&&b| b == markers.esc()).count();
    FRAME_OVERHEAD + payload.len() + escapes
}

/// Encode `payload` as a complete frame.
pub fn encode_frame(markers: Markers, payload: &[u8]) -> Bytes {
    let mut buf = BytesMut::with_capacity(encoded_len(markers, payload));
    encode_frame_into(markers, payload, &mut buf);
    buf.freeze()
}

/// Append the encoded frame for `payload` to `buf`.
pub fn encode_frame_into(markers: Markers, payload: &[u8], buf: &mut BytesMut) {
    let esc = markers.esc();
    let sof = markers.sof();

    buf.reserve(encoded_len(markers, payload));
    buf.put_u8(esc);
    buf.put_u8(sof);

    // Copy runs between escape bytes in one go
    for (i, run) in payload.split(|&b| b == esc).enumerate() {
        if i > 0 {
            buf.put_u8(esc);
            buf.put_u8(esc);
        }
        buf.put_slice(run);
    }

    buf.put_u8(esc);
    buf.put_u8(sof);
}
