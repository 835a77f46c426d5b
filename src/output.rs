//! Conversion output types.
//!
//! [`ConversionOutput`] is the downloadable artifact: encoded bytes plus the
//! suggested filename a UI hands to a save dialog or download link. The
//! whole struct serialises to JSON — bytes as base64 — so a host
//! application can ship results over a message bus or log them verbatim.

use crate::format::TargetFormat;
use serde::{Deserialize, Serialize};

/// The result of a successful conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// Encoded image bytes in the target format.
    #[serde(with = "base64_bytes")]
    pub bytes: Vec<u8>,

    /// The format the bytes are encoded in.
    pub format: TargetFormat,

    /// Suggested download filename: `<sanitised-stem>_converted.<ext>`.
    pub file_name: String,

    /// Output width in pixels (differs from the source only for ico downscaling).
    pub width: u32,

    /// Output height in pixels.
    pub height: u32,

    /// Timing and size statistics for this conversion.
    pub stats: ConvertStats,
}

impl ConversionOutput {
    /// MIME type of the encoded bytes.
    pub fn mime(&self) -> &'static str {
        self.format.mime()
    }
}

/// Statistics about a conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertStats {
    /// Size of the source file in bytes.
    pub input_bytes: u64,

    /// Size of the encoded output in bytes.
    pub output_bytes: u64,

    /// Time spent decoding the source.
    pub decode_duration_ms: u64,

    /// Time spent compositing and encoding.
    pub encode_duration_ms: u64,

    /// Wall-clock time for the whole conversion, settle delay included.
    pub total_duration_ms: u64,
}

/// Serde adapter: `Vec<u8>` ⇄ base64 string.
mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(de)?;
        STANDARD.decode(s.as_bytes()).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ConversionOutput {
        ConversionOutput {
            bytes: vec![0xFF, 0xD8, 0xFF, 0xE0],
            format: TargetFormat::Jpeg,
            file_name: "photo_converted.jpeg".into(),
            width: 100,
            height: 80,
            stats: ConvertStats {
                input_bytes: 4096,
                output_bytes: 4,
                decode_duration_ms: 3,
                encode_duration_ms: 5,
                total_duration_ms: 9,
            },
        }
    }

    #[test]
    fn json_round_trip_preserves_bytes() {
        let out = sample();
        let json = serde_json::to_string(&out).expect("output must serialise");
        // bytes field must be base64, not a JSON array
        assert!(json.contains("\"/9j/4A==\""), "got: {json}");

        let back: ConversionOutput = serde_json::from_str(&json).expect("must deserialise");
        assert_eq!(back.bytes, out.bytes);
        assert_eq!(back.format, TargetFormat::Jpeg);
        assert_eq!(back.stats, out.stats);
    }

    #[test]
    fn mime_follows_format() {
        assert_eq!(sample().mime(), "image/jpeg");
    }
}
