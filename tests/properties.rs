//! Property tests for the frame decoder and encoder.

use bytes::Bytes;
use escframe::protocol::{collect_frames, encode_frame, encoded_len, FrameDecoder, Markers};
use proptest::prelude::*;

const ESC: u8 = 0xDB;
const SOF: u8 = 0xC0;

fn markers() -> Markers {
    Markers::new(ESC, SOF).unwrap()
}

/// Bytes other than the two markers.
fn plain_byte() -> impl Strategy<Value = u8> {
    any::<u8>().prop_filter("not a marker", |b| *b != ESC && *b != SOF)
}

/// Byte sequences that never contain ESC immediately followed by SOF.
fn noise() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..512).prop_map(|mut bytes| {
        for i in 1..bytes.len() {
            if bytes[i - 1] == ESC && bytes[i] == SOF {
                bytes[i] = 0x00;
            }
        }
        bytes
    })
}

proptest! {
    #[test]
    fn prop_plain_payload_round_trip(payload in prop::collection::vec(plain_byte(), 0..256)) {
        let mut wire = vec![ESC, SOF];
        wire.extend_from_slice(&payload);
        wire.extend_from_slice(&[ESC, SOF]);

        let frames = collect_frames(markers(), &wire);
        prop_assert_eq!(frames, vec![Bytes::from(payload)]);
    }

    #[test]
    fn prop_encoded_payload_round_trip(payload in prop::collection::vec(any::<u8>(), 0..512)) {
        let wire = encode_frame(markers(), &payload);
        prop_assert_eq!(wire.len(), encoded_len(markers(), &payload));

        let frames = collect_frames(markers(), &wire);
        prop_assert_eq!(frames, vec![Bytes::from(payload)]);
    }

    #[test]
    fn prop_noise_never_emits(bytes in noise()) {
        prop_assert!(collect_frames(markers(), &bytes).is_empty());
    }

    #[test]
    fn prop_frames_stay_isolated(
        first in prop::collection::vec(any::<u8>(), 0..128),
        second in prop::collection::vec(any::<u8>(), 0..128),
    ) {
        let mut wire = encode_frame(markers(), &first).to_vec();
        wire.extend_from_slice(&encode_frame(markers(), &second));

        let frames = collect_frames(markers(), &wire);
        prop_assert_eq!(frames, vec![Bytes::from(first), Bytes::from(second)]);
    }

    #[test]
    fn prop_bad_escape_drops_frame(
        payload in prop::collection::vec(plain_byte(), 0..64),
        bad in plain_byte(),
        tail in noise(),
    ) {
        let mut wire = vec![ESC, SOF];
        wire.extend_from_slice(&payload);
        wire.extend_from_slice(&[ESC, bad]);
        wire.extend_from_slice(&tail);

        prop_assert!(collect_frames(markers(), &wire).is_empty());
    }

    #[test]
    fn prop_chunking_does_not_change_output(
        payloads in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..64), 0..8),
        chunk_size in 1usize..32,
    ) {
        let mut wire = Vec::new();
        for payload in &payloads {
            wire.extend_from_slice(&encode_frame(markers(), payload));
        }

        let mut frames = Vec::new();
        {
            let mut decoder = FrameDecoder::with_markers(markers(), |frame| frames.push(frame));
            for chunk in wire.chunks(chunk_size) {
                decoder.feed_slice(chunk);
            }
        }

        let expected: Vec<Bytes> = payloads.into_iter().map(Bytes::from).collect();
        prop_assert_eq!(frames, expected);
    }
}
