//! The format catalogue: what this converter will and will not produce.
//!
//! Two disjoint, static sets. [`CONVERTIBLE_FORMATS`] are targets the raster
//! engine can natively encode (svg via a raster-wrapping document); anything
//! in [`REJECTED_FORMATS`] is refused synchronously in
//! [`crate::ConversionPipeline::choose_format`], before a single pixel is
//! decoded. Camera RAW flavours and editor-native documents land in the
//! rejected set — no encoder exists for them here, and pretending otherwise
//! would only fail after the user has paid for a full decode.

use crate::error::ConvertError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A target encoding this converter can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetFormat {
    Jpeg,
    Png,
    WebP,
    Gif,
    Bmp,
    Ico,
    Tiff,
    Svg,
}

/// Every format this converter can produce, in UI display order.
pub const CONVERTIBLE_FORMATS: [TargetFormat; 8] = [
    TargetFormat::Jpeg,
    TargetFormat::Png,
    TargetFormat::WebP,
    TargetFormat::Gif,
    TargetFormat::Bmp,
    TargetFormat::Ico,
    TargetFormat::Tiff,
    TargetFormat::Svg,
];

/// Format identifiers refused outright: no native encoder exists for them.
pub const REJECTED_FORMATS: [&str; 12] = [
    "raw", "cr2", "nef", "arw", "dng", "psd", "ai", "eps", "heic", "exr", "apng", "jp2",
];

impl TargetFormat {
    /// Canonical lowercase identifier, as shown in a format dropdown.
    pub fn as_str(self) -> &'static str {
        match self {
            TargetFormat::Jpeg => "jpeg",
            TargetFormat::Png => "png",
            TargetFormat::WebP => "webp",
            TargetFormat::Gif => "gif",
            TargetFormat::Bmp => "bmp",
            TargetFormat::Ico => "ico",
            TargetFormat::Tiff => "tiff",
            TargetFormat::Svg => "svg",
        }
    }

    /// MIME type of the encoded output.
    pub fn mime(self) -> &'static str {
        match self {
            TargetFormat::Jpeg => "image/jpeg",
            TargetFormat::Png => "image/png",
            TargetFormat::WebP => "image/webp",
            TargetFormat::Gif => "image/gif",
            TargetFormat::Bmp => "image/bmp",
            TargetFormat::Ico => "image/x-icon",
            TargetFormat::Tiff => "image/tiff",
            TargetFormat::Svg => "image/svg+xml",
        }
    }

    /// File extension for the derived download name.
    pub fn extension(self) -> &'static str {
        self.as_str()
    }

    /// True for formats where a quality fraction is meaningful.
    ///
    /// The quality control in a UI should be visible exactly when this
    /// returns true; the encoder ignores quality for every other format.
    pub fn is_lossy(self) -> bool {
        matches!(self, TargetFormat::Jpeg | TargetFormat::WebP)
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetFormat {
    type Err = ConvertError;

    /// Parse a dropdown identifier, case-insensitively.
    ///
    /// Accepts the common aliases `jpg` and `tif`. Anything else — the
    /// rejected set and unknown identifiers alike — maps to
    /// [`ConvertError::UnsupportedFormat`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(TargetFormat::Jpeg),
            "png" => Ok(TargetFormat::Png),
            "webp" => Ok(TargetFormat::WebP),
            "gif" => Ok(TargetFormat::Gif),
            "bmp" => Ok(TargetFormat::Bmp),
            "ico" => Ok(TargetFormat::Ico),
            "tiff" | "tif" => Ok(TargetFormat::Tiff),
            "svg" => Ok(TargetFormat::Svg),
            other => Err(ConvertError::UnsupportedFormat {
                format: other.to_string(),
            }),
        }
    }
}

/// True if the identifier is in the rejected set.
pub fn is_rejected(id: &str) -> bool {
    let id = id.trim().to_ascii_lowercase();
    REJECTED_FORMATS.contains(&id.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_sets_are_disjoint() {
        for fmt in CONVERTIBLE_FORMATS {
            assert!(
                !is_rejected(fmt.as_str()),
                "{fmt} is in both catalogue sets"
            );
        }
    }

    #[test]
    fn every_convertible_id_parses_back() {
        for fmt in CONVERTIBLE_FORMATS {
            assert_eq!(fmt.as_str().parse::<TargetFormat>().unwrap(), fmt);
        }
    }

    #[test]
    fn rejected_ids_do_not_parse() {
        for id in REJECTED_FORMATS {
            let err = id.parse::<TargetFormat>().unwrap_err();
            assert!(
                matches!(err, ConvertError::UnsupportedFormat { ref format } if format == id),
                "{id} parsed to something other than UnsupportedFormat: {err}"
            );
        }
    }

    #[test]
    fn aliases_and_case_are_accepted() {
        assert_eq!("JPG".parse::<TargetFormat>().unwrap(), TargetFormat::Jpeg);
        assert_eq!("tif".parse::<TargetFormat>().unwrap(), TargetFormat::Tiff);
        assert_eq!(" WebP ".parse::<TargetFormat>().unwrap(), TargetFormat::WebP);
    }

    #[test]
    fn lossy_is_exactly_jpeg_and_webp() {
        let lossy: Vec<_> = CONVERTIBLE_FORMATS
            .iter()
            .filter(|f| f.is_lossy())
            .collect();
        assert_eq!(lossy, [&TargetFormat::Jpeg, &TargetFormat::WebP]);
    }

    #[test]
    fn mime_types_are_image_scoped() {
        for fmt in CONVERTIBLE_FORMATS {
            assert!(fmt.mime().starts_with("image/"), "{fmt}: {}", fmt.mime());
        }
    }

    #[test]
    fn serde_uses_lowercase_ids() {
        let json = serde_json::to_string(&TargetFormat::WebP).unwrap();
        assert_eq!(json, "\"webp\"");
        let back: TargetFormat = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TargetFormat::WebP);
    }
}
