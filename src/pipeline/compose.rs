//! Surface composition: build the buffer the encoder will consume.
//!
//! JPEG has no alpha channel. Encoding a transparent raster straight to
//! jpeg composites the pixels against whatever the encoder considers the
//! background — in practice black, producing dark fringes where the source
//! was transparent. Prefilling the surface with opaque white and alpha-
//! blending the source over it pins that background down. Every other
//! target keeps transparency, so its surface starts fully transparent.

use crate::format::TargetFormat;
use image::{imageops, DynamicImage, Rgba, RgbaImage};

const OPAQUE_WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Composite the decoded raster onto a fresh surface at (0, 0).
///
/// The surface matches the source's native dimensions; prefill depends on
/// the target format (white for jpeg, transparent otherwise).
pub fn compose_surface(img: &DynamicImage, target: TargetFormat) -> RgbaImage {
    let (w, h) = (img.width(), img.height());

    let mut surface = if target == TargetFormat::Jpeg {
        RgbaImage::from_pixel(w, h, OPAQUE_WHITE)
    } else {
        RgbaImage::new(w, h)
    };

    imageops::overlay(&mut surface, img, 0, 0);
    surface
}
