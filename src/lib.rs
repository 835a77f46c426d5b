//! # pixelshift
//!
//! Re-encode an image into another common raster format.
//!
//! ## Why this crate?
//!
//! Format conversion sounds like a one-liner until a real file picker is
//! attached to it: users hand over camera RAWs and Photoshop documents that
//! nothing here can encode, 40 MB scans that should be refused before any
//! pixel work, transparent PNGs that turn black when naively re-encoded as
//! JPEG, and filenames like `my photo!!.png` that break download headers.
//! This crate packages the whole flow — validation, preview, a constrained
//! format catalogue, alpha-safe compositing, and a sanitised output name —
//! behind one small state machine a UI layer can drive.
//!
//! ## Pipeline Overview
//!
//! ```text
//! image file
//!  │
//!  ├─ 1. Input    validate size and media type, wrap a data-URL preview
//!  ├─ 2. Decode   bytes → raster at native dimensions (CPU-bound, spawn_blocking)
//!  ├─ 3. Compose  surface prefilled white for JPEG, transparent otherwise
//!  ├─ 4. Encode   surface → jpeg / png / webp / gif / bmp / ico / tiff / svg
//!  └─ 5. Output   encoded bytes + `<stem>_converted.<ext>` filename + stats
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pixelshift::{convert_image, PipelineConfig, SourceImage, TargetFormat};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bytes = std::fs::read("photo.png")?;
//!     let source = SourceImage::new("photo.png", "image/png", bytes);
//!
//!     let config = PipelineConfig::default();
//!     let output = convert_image(&source, TargetFormat::WebP, 0.8, &config).await?;
//!
//!     std::fs::write(&output.file_name, &output.bytes)?;
//!     eprintln!("{} → {} bytes", output.file_name, output.stats.output_bytes);
//!     Ok(())
//! }
//! ```
//!
//! For interactive use — a picker, a format dropdown, a quality slider, a
//! convert button — drive a [`ConversionPipeline`] instead; it owns the
//! selection state, answers UI questions (`can_convert`,
//! `quality_control_visible`), and keeps a single user-visible error slot.
//!
//! ## Format Catalogue
//!
//! | Target | Quality slider | Notes |
//! |--------|----------------|-------|
//! | jpeg   | yes            | surface prefilled opaque white |
//! | webp   | yes            | encoded lossless by the `image` crate |
//! | png, gif, bmp, tiff | no | |
//! | ico    | no             | sources over 256 px are downscaled to fit |
//! | svg    | no             | PNG raster wrapped in an `<svg>` document |
//!
//! Camera RAW and editor-native formats (cr2, nef, arw, dng, psd, ai, eps,
//! heic, exr, apng, jp2, raw) are rejected up front — there is no encoder to
//! hand them to, so the user is told immediately instead of after a doomed
//! decode.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod format;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{PipelineConfig, PipelineConfigBuilder};
pub use convert::{convert_image, convert_image_sync, ConversionPipeline, PipelineState};
pub use error::ConvertError;
pub use format::{TargetFormat, CONVERTIBLE_FORMATS, REJECTED_FORMATS};
pub use output::{ConversionOutput, ConvertStats};
pub use pipeline::input::{Preview, SourceImage};
pub use progress::{ConvertProgress, NoopProgress, ProgressCallback};
