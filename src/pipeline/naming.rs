//! Output filename derivation.
//!
//! Download filenames travel through HTTP headers, OS save dialogs, and
//! shell commands; the stem is reduced to `[A-Za-z0-9_-]` so it survives
//! all three unquoted. The stem is whatever precedes the *first* dot —
//! `archive.tar.gz` keeps only `archive` — and the result is suffixed
//! `_converted.<ext>` so the re-encoded file never collides with the
//! original.

use crate::format::TargetFormat;
use once_cell::sync::Lazy;
use regex::Regex;

static NON_FILENAME_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_-]").unwrap());

/// Fallback stem when sanitisation leaves nothing (e.g. `"日本.png"` or `".png"`).
const FALLBACK_STEM: &str = "image";

/// Derive the download filename for a conversion of `original` to `format`.
///
/// # Example
/// ```rust
/// use pixelshift::TargetFormat;
/// # use pixelshift::pipeline::naming::output_file_name;
/// assert_eq!(
///     output_file_name("my photo!!.png", TargetFormat::WebP),
///     "myphoto_converted.webp"
/// );
/// ```
pub fn output_file_name(original: &str, format: TargetFormat) -> String {
    let raw_stem = original.split('.').next().unwrap_or("");
    let sanitised = NON_FILENAME_CHARS.replace_all(raw_stem, "");

    let stem = if sanitised.is_empty() {
        FALLBACK_STEM
    } else {
        sanitised.as_ref()
    };

    format!("{stem}_converted.{}", format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_spaces_and_punctuation() {
        assert_eq!(
            output_file_name("my photo!!.png", TargetFormat::WebP),
            "myphoto_converted.webp"
        );
    }

    #[test]
    fn keeps_underscores_and_dashes() {
        assert_eq!(
            output_file_name("scan_2024-01.tiff", TargetFormat::Png),
            "scan_2024-01_converted.png"
        );
    }

    #[test]
    fn stem_stops_at_the_first_dot() {
        assert_eq!(
            output_file_name("archive.tar.gz.png", TargetFormat::Jpeg),
            "archive_converted.jpeg"
        );
    }

    #[test]
    fn extensionless_names_work() {
        assert_eq!(
            output_file_name("photo", TargetFormat::Bmp),
            "photo_converted.bmp"
        );
    }

    #[test]
    fn all_stripped_falls_back() {
        assert_eq!(
            output_file_name("!!!.png", TargetFormat::Gif),
            "image_converted.gif"
        );
        assert_eq!(
            output_file_name(".png", TargetFormat::Gif),
            "image_converted.gif"
        );
        assert_eq!(output_file_name("", TargetFormat::Gif), "image_converted.gif");
    }
}
