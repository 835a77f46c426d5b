//! Configuration for the conversion pipeline.
//!
//! All behaviour knobs live in [`PipelineConfig`], built via its
//! [`PipelineConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share one config across a UI session and to diff two runs to
//! understand why their outputs differ.
//!
//! # Design choice: builder over constructor
//! The builder lets callers set only what they care about and rely on
//! documented defaults for the rest; setters clamp instead of erroring so a
//! slider wired straight to `quality` can never poison the config.

use crate::error::ConvertError;
use crate::progress::ProgressCallback;
use std::fmt;

/// Default source-size cap: 10 MiB.
pub const DEFAULT_MAX_SOURCE_BYTES: u64 = 10 * 1024 * 1024;

/// Configuration for image conversion.
///
/// Built via [`PipelineConfig::builder()`] or [`PipelineConfig::default()`].
///
/// # Example
/// ```rust
/// use pixelshift::PipelineConfig;
///
/// let config = PipelineConfig::builder()
///     .default_quality(0.8)
///     .done_delay_ms(0)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct PipelineConfig {
    /// Maximum accepted source size in bytes. Default: 10 MiB.
    ///
    /// Checked before anything else touches the file, so an oversized
    /// upload is refused without decoding a single pixel.
    pub max_source_bytes: u64,

    /// Quality fraction in [0.0, 1.0] used when none is set explicitly.
    /// Default: 0.92.
    ///
    /// Only meaningful for lossy targets (jpeg, webp); ignored otherwise.
    pub default_quality: f32,

    /// Settle delay in milliseconds before the 100% checkpoint fires.
    /// Default: 500.
    ///
    /// A progress bar that jumps 80 → 100 in a frame reads as broken; the
    /// short hold lets the final state register. Set to 0 in tests and
    /// non-interactive callers.
    pub done_delay_ms: u64,

    /// Largest edge accepted by the ico encoder. Default: 256.
    ///
    /// Sources larger than this are downscaled to fit (aspect preserved)
    /// when the target is ico; the encoder itself refuses anything bigger.
    pub ico_max_dimension: u32,

    /// Progress callback. Default: none.
    pub progress: Option<ProgressCallback>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_source_bytes: DEFAULT_MAX_SOURCE_BYTES,
            default_quality: 0.92,
            done_delay_ms: 500,
            ico_max_dimension: 256,
            progress: None,
        }
    }
}

impl fmt::Debug for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineConfig")
            .field("max_source_bytes", &self.max_source_bytes)
            .field("default_quality", &self.default_quality)
            .field("done_delay_ms", &self.done_delay_ms)
            .field("ico_max_dimension", &self.ico_max_dimension)
            .field("progress", &self.progress.as_ref().map(|_| "<dyn ConvertProgress>"))
            .finish()
    }
}

impl PipelineConfig {
    /// Create a new builder for `PipelineConfig`.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`PipelineConfig`].
#[derive(Debug)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    pub fn max_source_bytes(mut self, bytes: u64) -> Self {
        self.config.max_source_bytes = bytes.max(1);
        self
    }

    pub fn default_quality(mut self, q: f32) -> Self {
        self.config.default_quality = q.clamp(0.0, 1.0);
        self
    }

    pub fn done_delay_ms(mut self, ms: u64) -> Self {
        self.config.done_delay_ms = ms;
        self
    }

    pub fn ico_max_dimension(mut self, px: u32) -> Self {
        self.config.ico_max_dimension = px.clamp(16, 256);
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<PipelineConfig, ConvertError> {
        let c = &self.config;
        if !(0.0..=1.0).contains(&c.default_quality) {
            return Err(ConvertError::InvalidConfig(format!(
                "quality must be within 0.0–1.0, got {}",
                c.default_quality
            )));
        }
        if c.max_source_bytes == 0 {
            return Err(ConvertError::InvalidConfig(
                "max_source_bytes must be ≥ 1".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let c = PipelineConfig::default();
        assert_eq!(c.max_source_bytes, 10 * 1024 * 1024);
        assert_eq!(c.done_delay_ms, 500);
        assert_eq!(c.ico_max_dimension, 256);
        assert!((c.default_quality - 0.92).abs() < f32::EPSILON);
        assert!(c.progress.is_none());
    }

    #[test]
    fn quality_setter_clamps() {
        let c = PipelineConfig::builder()
            .default_quality(3.5)
            .build()
            .unwrap();
        assert_eq!(c.default_quality, 1.0);

        let c = PipelineConfig::builder()
            .default_quality(-0.2)
            .build()
            .unwrap();
        assert_eq!(c.default_quality, 0.0);
    }

    #[test]
    fn ico_dimension_setter_clamps_to_encoder_range() {
        let c = PipelineConfig::builder()
            .ico_max_dimension(4096)
            .build()
            .unwrap();
        assert_eq!(c.ico_max_dimension, 256);
    }

    #[test]
    fn debug_impl_elides_the_callback() {
        use crate::progress::NoopProgress;
        use std::sync::Arc;

        let c = PipelineConfig::builder()
            .progress_callback(Arc::new(NoopProgress))
            .build()
            .unwrap();
        let dbg = format!("{c:?}");
        assert!(dbg.contains("<dyn ConvertProgress>"), "got: {dbg}");
    }
}
