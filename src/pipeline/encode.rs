//! Surface encoding: composed `RgbaImage` → bytes in the target format.
//!
//! Most targets go straight through the raster engine's own encoders. Three
//! need accommodation:
//!
//! - **jpeg** encoders take RGB input; the surface was prefilled opaque
//!   white during composition, so dropping the alpha channel is lossless.
//!   Quality maps 0.0–1.0 → 1–100.
//! - **ico** refuses dimensions above 256 px, so larger surfaces are
//!   downscaled to fit (aspect preserved) before encoding.
//! - **svg** has no raster encoder anywhere; the surface is PNG-encoded and
//!   wrapped in a minimal `<svg>` document at native dimensions.
//!
//! webp is encoded lossless — the raster engine carries no lossy webp
//! encoder — so the quality fraction only affects jpeg output.

use crate::error::ConvertError;
use crate::format::TargetFormat;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::{imageops::FilterType, DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;
use tracing::debug;

/// Encoded output together with its final dimensions.
///
/// Dimensions can differ from the surface's only via the ico downscale.
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Encode a composed surface as the target format.
///
/// Runs on the blocking pool; encoding is as CPU-bound as decoding.
///
/// # Arguments
/// * `surface` — the composited raster, consumed
/// * `target`  — format to encode
/// * `quality` — fraction in [0, 1]; only meaningful for jpeg
/// * `ico_max` — largest edge the ico encoder accepts
pub async fn encode_surface(
    surface: RgbaImage,
    target: TargetFormat,
    quality: f32,
    ico_max: u32,
) -> Result<EncodedImage, ConvertError> {
    tokio::task::spawn_blocking(move || encode_blocking(surface, target, quality, ico_max))
        .await
        .map_err(|e| ConvertError::Internal(format!("Encode task panicked: {e}")))?
}

/// Blocking implementation of surface encoding.
fn encode_blocking(
    surface: RgbaImage,
    target: TargetFormat,
    quality: f32,
    ico_max: u32,
) -> Result<EncodedImage, ConvertError> {
    let encoded = match target {
        TargetFormat::Jpeg => encode_jpeg(surface, quality)?,
        TargetFormat::Svg => encode_svg(surface)?,
        TargetFormat::Ico => encode_ico(surface, ico_max)?,
        TargetFormat::Png | TargetFormat::WebP | TargetFormat::Gif | TargetFormat::Bmp
        | TargetFormat::Tiff => {
            let img = DynamicImage::ImageRgba8(surface);
            let bytes = write_with_engine(&img, engine_format(target))?;
            EncodedImage {
                bytes,
                width: img.width(),
                height: img.height(),
            }
        }
    };

    debug!(
        "Encoded {} → {} bytes ({}x{})",
        target,
        encoded.bytes.len(),
        encoded.width,
        encoded.height
    );
    Ok(encoded)
}

/// Raster-engine format for the targets it encodes directly.
fn engine_format(target: TargetFormat) -> ImageFormat {
    match target {
        TargetFormat::Jpeg => ImageFormat::Jpeg,
        TargetFormat::Png => ImageFormat::Png,
        TargetFormat::WebP => ImageFormat::WebP,
        TargetFormat::Gif => ImageFormat::Gif,
        TargetFormat::Bmp => ImageFormat::Bmp,
        TargetFormat::Ico => ImageFormat::Ico,
        TargetFormat::Tiff => ImageFormat::Tiff,
        TargetFormat::Svg => unreachable!("svg is produced by the wrapper, not the engine"),
    }
}

fn write_with_engine(img: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>, ConvertError> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format)
        .map_err(|e| ConvertError::EncodeFailure {
            detail: e.to_string(),
        })?;
    Ok(buf.into_inner())
}

fn encode_jpeg(surface: RgbaImage, quality: f32) -> Result<EncodedImage, ConvertError> {
    let (width, height) = surface.dimensions();
    // Alpha is uniformly 255 after the white prefill; drop it for the encoder.
    let rgb = DynamicImage::ImageRgba8(surface).to_rgb8();

    let mut bytes = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut bytes, jpeg_quality(quality));
    encoder
        .encode_image(&rgb)
        .map_err(|e| ConvertError::EncodeFailure {
            detail: e.to_string(),
        })?;

    Ok(EncodedImage {
        bytes,
        width,
        height,
    })
}

/// Map a quality fraction to the jpeg encoder's 1–100 scale.
fn jpeg_quality(q: f32) -> u8 {
    (q.clamp(0.0, 1.0) * 100.0).round().max(1.0) as u8
}

fn encode_ico(surface: RgbaImage, ico_max: u32) -> Result<EncodedImage, ConvertError> {
    let img = DynamicImage::ImageRgba8(surface);

    // The ico container caps dimensions at 256; shrink to fit rather than
    // bounce the conversion.
    let img = if img.width() > ico_max || img.height() > ico_max {
        debug!(
            "Downscaling {}x{} to fit ico cap of {} px",
            img.width(),
            img.height(),
            ico_max
        );
        img.resize(ico_max, ico_max, FilterType::Lanczos3)
    } else {
        img
    };

    let bytes = write_with_engine(&img, ImageFormat::Ico)?;
    Ok(EncodedImage {
        bytes,
        width: img.width(),
        height: img.height(),
    })
}

fn encode_svg(surface: RgbaImage) -> Result<EncodedImage, ConvertError> {
    let (width, height) = surface.dimensions();
    let png = write_with_engine(&DynamicImage::ImageRgba8(surface), ImageFormat::Png)?;
    let payload = STANDARD.encode(&png);

    let doc = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{width}" height="{height}" viewBox="0 0 {width} {height}"><image width="{width}" height="{height}" xlink:href="data:image/png;base64,{payload}"/></svg>"#
    );

    Ok(EncodedImage {
        bytes: doc.into_bytes(),
        width,
        height,
    })
}
