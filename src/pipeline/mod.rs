//! Pipeline stages for image conversion.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. a different raster backend) without touching
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ decode ──▶ compose ──▶ encode ──▶ naming
//! (bytes)   (raster)   (surface)  (target)   (filename)
//! ```
//!
//! 1. [`input`]   — validate the selected file and wrap a data-URL preview
//! 2. [`decode`]  — bytes → raster at native size; runs in `spawn_blocking`
//!    because decoding a 10 MiB image is CPU-bound
//! 3. [`compose`] — allocate the composite surface (white for jpeg,
//!    transparent otherwise) and overlay the raster at (0,0)
//! 4. [`encode`]  — surface → target bytes, with per-format accommodations
//!    (jpeg quality, ico downscale, svg wrapping)
//! 5. [`naming`]  — derive the download-safe output filename

pub mod compose;
pub mod decode;
pub mod encode;
pub mod input;
pub mod naming;
