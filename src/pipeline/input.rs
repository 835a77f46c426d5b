//! Input validation and preview: the selection step.
//!
//! ## Why validate before decoding?
//!
//! Both checks here are O(1) against metadata the caller already has. The
//! size cap runs first so a 40 MB file is refused as oversized no matter
//! what it claims to be; only then is the declared media type consulted.
//! Actual decodability is *not* verified here — a file can declare
//! `image/png` and contain garbage, which surfaces as a decode failure at
//! convert time, after the user has committed to a conversion.
//!
//! The preview is the raw bytes wrapped as a `data:` URL for an image
//! display surface. No pixels are touched; base64 of a 10 MiB payload is
//! still enough work to warrant the blocking pool.

use crate::error::ConvertError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::sync::Arc;
use tracing::debug;

/// A user-selected source image.
///
/// Created whole at selection time and replaced wholesale on the next
/// selection; never mutated in place. Bytes are reference-counted so the
/// pipeline can hand them to blocking tasks without copying the payload.
#[derive(Debug, Clone)]
pub struct SourceImage {
    name: String,
    media_type: String,
    bytes: Arc<[u8]>,
}

impl SourceImage {
    pub fn new(
        name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes: Arc::from(bytes.into()),
        }
    }

    /// Display name as selected, extension and all.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared media type (e.g. `image/png`). Declared, not sniffed.
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Shared handle to the bytes for blocking-pool work.
    pub(crate) fn bytes_shared(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }
}

/// A displayable form of the source: its bytes as a `data:` URL.
#[derive(Debug, Clone)]
pub struct Preview {
    /// `data:<media-type>;base64,<payload>` — hand directly to an image
    /// display surface.
    pub data_url: String,

    /// Media type the URL declares.
    pub media_type: String,
}

/// Validate a selected file against the configured size cap.
///
/// Size is checked before media type; see the module docs.
pub fn validate(source: &SourceImage, max_bytes: u64) -> Result<(), ConvertError> {
    if source.size() > max_bytes {
        return Err(ConvertError::FileTooLarge {
            size: source.size(),
            limit: max_bytes,
        });
    }

    if !source.media_type().starts_with("image/") {
        return Err(ConvertError::InvalidFileType {
            media_type: source.media_type().to_string(),
        });
    }

    debug!(
        "Accepted '{}': {} bytes, {}",
        source.name(),
        source.size(),
        source.media_type()
    );
    Ok(())
}

/// Wrap the source bytes as a data-URL preview.
pub async fn build_preview(source: &SourceImage) -> Result<Preview, ConvertError> {
    let bytes = source.bytes_shared();
    let media_type = source.media_type().to_string();

    let data_url = tokio::task::spawn_blocking(move || {
        format!("data:{};base64,{}", media_type, STANDARD.encode(&bytes[..]))
    })
    .await
    .map_err(|e| ConvertError::Internal(format!("Preview task panicked: {e}")))?;

    debug!("Preview ready: {} chars", data_url.len());

    Ok(Preview {
        data_url,
        media_type: source.media_type().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEN_MIB: u64 = 10 * 1024 * 1024;

    #[test]
    fn accepts_a_small_declared_image() {
        let src = SourceImage::new("photo.png", "image/png", vec![1, 2, 3]);
        assert!(validate(&src, TEN_MIB).is_ok());
    }

    #[test]
    fn oversize_wins_over_bad_type() {
        // 1 byte over the cap, and not an image either: size must be the
        // reported failure.
        let src = SourceImage::new(
            "dump.bin",
            "application/octet-stream",
            vec![0u8; TEN_MIB as usize + 1],
        );
        match validate(&src, TEN_MIB) {
            Err(ConvertError::FileTooLarge { size, limit }) => {
                assert_eq!(size, TEN_MIB + 1);
                assert_eq!(limit, TEN_MIB);
            }
            other => panic!("expected FileTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn non_image_media_type_is_rejected() {
        let src = SourceImage::new("report.pdf", "application/pdf", vec![1, 2, 3]);
        match validate(&src, TEN_MIB) {
            Err(ConvertError::InvalidFileType { media_type }) => {
                assert_eq!(media_type, "application/pdf");
            }
            other => panic!("expected InvalidFileType, got {other:?}"),
        }
    }

    #[test]
    fn media_type_prefix_must_be_exact() {
        // "imagex/png" must not sneak past a sloppy prefix check
        let src = SourceImage::new("x", "imagex/png", vec![0]);
        assert!(validate(&src, TEN_MIB).is_err());
    }

    #[tokio::test]
    async fn preview_is_a_data_url_for_the_declared_type() {
        let src = SourceImage::new("photo.png", "image/png", vec![0xAA, 0xBB]);
        let preview = build_preview(&src).await.unwrap();
        assert!(preview.data_url.starts_with("data:image/png;base64,"));
        assert_eq!(preview.media_type, "image/png");

        let payload = preview.data_url.split(',').nth(1).unwrap();
        assert_eq!(STANDARD.decode(payload).unwrap(), vec![0xAA, 0xBB]);
    }
}
