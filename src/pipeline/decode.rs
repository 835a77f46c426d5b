//! Source decoding: bytes → `DynamicImage` at native dimensions.
//!
//! ## Why spawn_blocking?
//!
//! Decoding a multi-megabyte image is pure CPU work. `tokio::task::
//! spawn_blocking` moves it onto the blocking thread pool so async worker
//! threads are never stalled mid-decode. The async wrapper / `_blocking`
//! inner split keeps the pixel work unit-testable without a runtime.

use crate::error::ConvertError;
use image::DynamicImage;
use std::sync::Arc;
use tracing::debug;

/// Decode source bytes into a raster.
///
/// # Errors
/// [`ConvertError::DecodeFailure`] when the bytes do not form an image the
/// raster engine understands — corrupt data, a truncated file, or a format
/// with no decoder (declared media type notwithstanding).
pub async fn decode_source(bytes: Arc<[u8]>) -> Result<DynamicImage, ConvertError> {
    tokio::task::spawn_blocking(move || decode_blocking(&bytes))
        .await
        .map_err(|e| ConvertError::Internal(format!("Decode task panicked: {e}")))?
}

/// Blocking implementation of source decoding.
fn decode_blocking(bytes: &[u8]) -> Result<DynamicImage, ConvertError> {
    let img = image::load_from_memory(bytes).map_err(|e| ConvertError::DecodeFailure {
        detail: e.to_string(),
    })?;

    debug!("Decoded source → {}x{} px", img.width(), img.height());
    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(w: u32, h: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(w, h, Rgba([10, 200, 30, 255]));
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    #[tokio::test]
    async fn decodes_a_valid_png_at_native_size() {
        let img = decode_source(Arc::from(png_bytes(64, 48))).await.unwrap();
        assert_eq!((img.width(), img.height()), (64, 48));
    }

    #[tokio::test]
    async fn garbage_bytes_are_a_decode_failure() {
        let err = decode_source(Arc::from(b"definitely not an image".to_vec()))
            .await
            .unwrap_err();
        assert!(matches!(err, ConvertError::DecodeFailure { .. }), "{err}");
    }

    #[tokio::test]
    async fn truncated_png_is_a_decode_failure() {
        let mut bytes = png_bytes(64, 48);
        bytes.truncate(bytes.len() / 2);
        let err = decode_source(Arc::from(bytes)).await.unwrap_err();
        assert!(matches!(err, ConvertError::DecodeFailure { .. }), "{err}");
    }
}
