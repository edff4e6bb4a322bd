//! Marker bytes for the ESC/SOF framing scheme.
//!
//! A frame on the wire looks like:
//! ```text
//! ┌─────┬─────┬──────────────────────────┬─────┬─────┐
//! │ ESC │ SOF │ payload (ESC as ESC ESC) │ ESC │ SOF │
//! └─────┴─────┴──────────────────────────┴─────┴─────┘
//! ```
//!
//! A bare `SOF` inside the payload is literal data; only `ESC SOF` delimits.
//!
//! # Example
//!
//! ```
//! use escframe::protocol::Markers;
//!
//! let markers = Markers::from_json(r#"{ "esc": 72, "sof": 17 }"#).unwrap();
//! assert_eq!(markers.esc(), b'H');
//! assert_eq!(markers.sof(), 0x11);
//!
//! assert!(Markers::new(0x7E, 0x7E).is_err());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{EscFrameError, Result};

/// The ESC/SOF pair a decoder or encoder is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Markers {
    /// Escape byte.
    esc: u8,
    /// Start/end-of-frame byte.
    sof: u8,
}

impl Markers {
    /// Create a validated marker pair.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMarkers` if `esc == sof`.
    pub fn new(esc: u8, sof: u8) -> Result<Self> {
        let markers = Self { esc, sof };
        markers.validate()?;
        Ok(markers)
    }

    /// Create a marker pair without checking `esc != sof`.
    ///
    /// Used by [`FrameDecoder::new`](super::FrameDecoder::new), which leaves
    /// the check to the caller.
    #[inline]
    pub(crate) const fn new_unchecked(esc: u8, sof: u8) -> Self {
        Self { esc, sof }
    }

    /// Load markers from a JSON object such as `{"esc": 219, "sof": 192}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let markers: Markers = serde_json::from_str(json)?;
        markers.validate()?;
        Ok(markers)
    }

    /// Check that the two markers are distinct.
    pub fn validate(&self) -> Result<()> {
        if self.esc == self.sof {
            return Err(EscFrameError::InvalidMarkers { byte: self.esc });
        }
        Ok(())
    }

    /// Get the escape byte.
    #[inline]
    pub fn esc(&self) -> u8 {
        self.esc
    }

    /// Get the start/end-of-frame byte.
    #[inline]
    pub fn sof(&self) -> u8 {
        self.sof
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_distinct_markers() {
        let markers = Markers::new(0x48, 0x11).unwrap();
        assert_eq!(markers.esc(), 0x48);
        assert_eq!(markers.sof(), 0x11);
    }

    #[test]
    fn test_new_rejects_equal_markers() {
        let err = Markers::new(0x7E, 0x7E).unwrap_err();
        assert!(matches!(err, EscFrameError::InvalidMarkers { byte: 0x7E }));
        assert!(err.to_string().contains("0x7e"));
    }

    #[test]
    fn test_from_json() {
        let markers = Markers::from_json(r#"{"esc": 219, "sof": 192}"#).unwrap();
        assert_eq!(markers, Markers::new(0xDB, 0xC0).unwrap());
    }

    #[test]
    fn test_from_json_rejects_equal_markers() {
        let result = Markers::from_json(r#"{"esc": 1, "sof": 1}"#);
        assert!(matches!(result, Err(EscFrameError::InvalidMarkers { byte: 1 })));
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        assert!(matches!(
            Markers::from_json(r#"{"esc": 300, "sof": 1}"#),
            Err(EscFrameError::Json(_))
        ));
        assert!(matches!(
            Markers::from_json(r#"{"esc": 1}"#),
            Err(EscFrameError::Json(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let markers = Markers::new(0x10, 0x02).unwrap();
        let json = serde_json::to_string(&markers).unwrap();
        assert_eq!(json, r#"{"esc":16,"sof":2}"#);
        assert_eq!(Markers::from_json(&json).unwrap(), markers);
    }
}
