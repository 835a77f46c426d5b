//! Conversion entry points.
//!
//! Two ways in, one engine underneath:
//!
//! * [`convert_image`] — the one-shot API: hand over a source, a target
//!   format, and a quality fraction; get back the encoded result. Use this
//!   when the caller already knows everything up front.
//! * [`ConversionPipeline`] — the interactive API: a small state machine a
//!   UI layer drives step by step (pick a file, choose a format, adjust
//!   quality, convert), with a queryable state, a single user-visible error
//!   slot, and retry semantics after every failure.

use crate::config::PipelineConfig;
use crate::error::ConvertError;
use crate::format::{self, TargetFormat};
use crate::output::{ConversionOutput, ConvertStats};
use crate::pipeline::input::{Preview, SourceImage};
use crate::pipeline::{compose, decode, encode, input, naming};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Convert a source image to the target format.
///
/// This is the primary one-shot entry point. The source is *not* validated
/// against a size cap here — validation belongs to the selection step (see
/// [`ConversionPipeline::select_file`]); a caller using this function
/// directly has already committed to its input.
///
/// # Arguments
/// * `source`  — the image to convert
/// * `format`  — target from the convertible catalogue
/// * `quality` — fraction in [0, 1]; meaningful for jpeg/webp only
/// * `config`  — conversion configuration
///
/// # Errors
/// * [`ConvertError::DecodeFailure`] — the bytes are not a decodable image
/// * [`ConvertError::EncodeFailure`] — encoding the composed surface failed
pub async fn convert_image(
    source: &SourceImage,
    format: TargetFormat,
    quality: f32,
    config: &PipelineConfig,
) -> Result<ConversionOutput, ConvertError> {
    match run_stages(source, format, quality, config).await {
        Ok(output) => {
            if let Some(ref cb) = config.progress {
                cb.on_complete(output.bytes.len());
            }
            Ok(output)
        }
        Err(e) => {
            warn!("Conversion of '{}' to {} failed: {}", source.name(), format, e);
            if let Some(ref cb) = config.progress {
                cb.on_error(e.to_string());
            }
            Err(e)
        }
    }
}

/// Synchronous wrapper around [`convert_image`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_image_sync(
    source: &SourceImage,
    format: TargetFormat,
    quality: f32,
    config: &PipelineConfig,
) -> Result<ConversionOutput, ConvertError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| ConvertError::Internal(format!("Failed to create tokio runtime: {e}")))?
        .block_on(convert_image(source, format, quality, config))
}

/// The decode → compose → encode sequence with progress checkpoints.
async fn run_stages(
    source: &SourceImage,
    format: TargetFormat,
    quality: f32,
    config: &PipelineConfig,
) -> Result<ConversionOutput, ConvertError> {
    let total_start = Instant::now();
    info!("Starting conversion: '{}' → {}", source.name(), format);

    // ── Step 1: Decode to a raster at native dimensions ──────────────────
    fire_progress(config, 20, "decoding image");
    let decode_start = Instant::now();
    let img = decode::decode_source(source.bytes_shared()).await?;
    let decode_duration_ms = decode_start.elapsed().as_millis() as u64;

    // ── Steps 2–3: Prefill the surface and composite at (0,0) ────────────
    fire_progress(config, 50, "preparing surface");
    let surface = compose::compose_surface(&img, format);

    // ── Step 4: Encode as the target format ──────────────────────────────
    fire_progress(config, 80, format!("encoding {format}"));
    let encode_start = Instant::now();
    let encoded =
        encode::encode_surface(surface, format, quality, config.ico_max_dimension).await?;
    let encode_duration_ms = encode_start.elapsed().as_millis() as u64;

    // ── Step 5: Settle, then expose the downloadable artifact ────────────
    if config.done_delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(config.done_delay_ms)).await;
    }
    fire_progress(config, 100, "conversion complete");

    let stats = ConvertStats {
        input_bytes: source.size(),
        output_bytes: encoded.bytes.len() as u64,
        decode_duration_ms,
        encode_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Conversion complete: {} → {} bytes in {}ms",
        stats.input_bytes, stats.output_bytes, stats.total_duration_ms
    );

    Ok(ConversionOutput {
        file_name: naming::output_file_name(source.name(), format),
        width: encoded.width,
        height: encoded.height,
        bytes: encoded.bytes,
        format,
        stats,
    })
}

fn fire_progress(config: &PipelineConfig, percent: u8, status: impl Into<String>) {
    if let Some(ref cb) = config.progress {
        cb.on_progress(percent, status.into());
    }
}

// ── Interactive pipeline ─────────────────────────────────────────────────

/// Where the interactive pipeline currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Nothing selected yet.
    Idle,
    /// A valid source is held; no target chosen.
    FileSelected,
    /// Source and convertible target are both set.
    FormatChosen,
    /// A conversion is in flight.
    Converting,
    /// The last conversion produced output.
    Done,
    /// The last action failed; [`ConversionPipeline::error_message`] has the
    /// user-visible text.
    Error,
}

/// The interactive conversion state machine.
///
/// One instance per UI session, explicitly constructed and owned by
/// whatever layer drives it. Operations take `&mut self`, so overlapping
/// calls are unrepresentable — there is exactly one selection and at most
/// one conversion at any time.
///
/// ```text
/// Idle ─select_file→ FileSelected ─choose_format→ FormatChosen
///                                                      │ convert
///                                                      ▼
///                    Error ←(any failure)──── Converting ──→ Done
/// ```
///
/// Every error is recoverable: the selected file survives, and
/// [`clear_error`](Self::clear_error) returns the machine to the most
/// specific valid state the held data supports.
pub struct ConversionPipeline {
    config: PipelineConfig,
    state: PipelineState,
    source: Option<SourceImage>,
    target: Option<TargetFormat>,
    quality: f32,
    last_error: Option<ConvertError>,
}

impl ConversionPipeline {
    /// Create an idle pipeline with the given configuration.
    pub fn new(config: PipelineConfig) -> Self {
        let quality = config.default_quality;
        Self {
            config,
            state: PipelineState::Idle,
            source: None,
            target: None,
            quality,
            last_error: None,
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    pub fn target_format(&self) -> Option<TargetFormat> {
        self.target
    }

    pub fn quality(&self) -> f32 {
        self.quality
    }

    pub fn last_error(&self) -> Option<&ConvertError> {
        self.last_error.as_ref()
    }

    /// The user-visible message slot. One slot, overwritten per error,
    /// cleared on the next valid action.
    pub fn error_message(&self) -> Option<String> {
        self.last_error.as_ref().map(|e| e.to_string())
    }

    /// True when the convert action should be enabled.
    pub fn can_convert(&self) -> bool {
        self.source.is_some() && self.target.is_some()
    }

    /// True when the quality control should be shown: a lossy target is set.
    pub fn quality_control_visible(&self) -> bool {
        self.target.is_some_and(TargetFormat::is_lossy)
    }

    // ── Operations ────────────────────────────────────────────────────────

    /// Select a source file, replacing any previous selection wholesale.
    ///
    /// Validates size (first) and media type, then returns the data-URL
    /// [`Preview`] for a display surface. The preview is built before the
    /// new state is observable, so a caller never renders a selection it
    /// has no preview for. Any previously chosen format is discarded — the
    /// choice is re-made per file.
    ///
    /// On failure the previous selection, if any, is untouched.
    pub async fn select_file(&mut self, file: SourceImage) -> Result<Preview, ConvertError> {
        if let Err(e) = input::validate(&file, self.config.max_source_bytes) {
            return Err(self.fail(e));
        }

        let preview = match input::build_preview(&file).await {
            Ok(p) => p,
            Err(e) => return Err(self.fail(e)),
        };

        info!("Selected '{}' ({} bytes)", file.name(), file.size());
        self.source = Some(file);
        self.target = None;
        self.last_error = None;
        self.state = PipelineState::FileSelected;
        Ok(preview)
    }

    /// Choose a target format by its dropdown identifier.
    ///
    /// * empty identifier — clears the current choice (back to the
    ///   "no format" state); returns `Ok(None)`
    /// * rejected or unknown identifier — records
    ///   [`ConvertError::UnsupportedFormat`] and disables the convert
    ///   action, before any decode work is attempted
    /// * convertible identifier — arms the convert action; check
    ///   [`quality_control_visible`](Self::quality_control_visible) after
    pub fn choose_format(&mut self, id: &str) -> Result<Option<TargetFormat>, ConvertError> {
        if id.trim().is_empty() {
            debug!("Format choice cleared");
            self.target = None;
            self.last_error = None;
            self.settle_state();
            return Ok(None);
        }

        if format::is_rejected(id) {
            self.target = None;
            return Err(self.fail(ConvertError::UnsupportedFormat {
                format: id.trim().to_ascii_lowercase(),
            }));
        }

        match id.parse::<TargetFormat>() {
            Ok(fmt) => {
                debug!("Format chosen: {fmt}");
                self.target = Some(fmt);
                self.last_error = None;
                self.settle_state();
                Ok(Some(fmt))
            }
            Err(e) => {
                self.target = None;
                Err(self.fail(e))
            }
        }
    }

    /// Set the quality fraction, clamped to [0, 1].
    ///
    /// Ignored by the encoder unless the target is lossy.
    pub fn set_quality(&mut self, q: f32) {
        self.quality = q.clamp(0.0, 1.0);
    }

    /// Set quality from a 0–100 slider value.
    pub fn set_quality_percent(&mut self, percent: u8) {
        self.set_quality(f32::from(percent.min(100)) / 100.0);
    }

    /// Run the conversion for the current selection.
    ///
    /// A no-op returning `Ok(None)` unless both a source and a convertible
    /// target are set. On success the machine lands in
    /// [`PipelineState::Done`] and the output carries the derived download
    /// filename. On failure the machine lands in [`PipelineState::Error`]
    /// with the selection intact, so the caller may retry immediately.
    pub async fn convert(&mut self) -> Result<Option<ConversionOutput>, ConvertError> {
        let (Some(source), Some(target)) = (self.source.clone(), self.target) else {
            debug!("convert() without a source and target is a no-op");
            return Ok(None);
        };

        self.state = PipelineState::Converting;
        match convert_image(&source, target, self.quality, &self.config).await {
            Ok(output) => {
                self.last_error = None;
                self.state = PipelineState::Done;
                Ok(Some(output))
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Clear the error slot without discarding the selected file.
    ///
    /// The machine returns to the most specific valid state the held data
    /// supports: `FormatChosen` if a target is still set, else
    /// `FileSelected` if a source is held, else `Idle`.
    pub fn clear_error(&mut self) {
        self.last_error = None;
        self.settle_state();
    }

    /// Full reset to [`PipelineState::Idle`], discarding the selection.
    pub fn reset(&mut self) {
        self.source = None;
        self.target = None;
        self.last_error = None;
        self.quality = self.config.default_quality;
        self.state = PipelineState::Idle;
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Record a failure: message slot overwritten, state → Error.
    fn fail(&mut self, e: ConvertError) -> ConvertError {
        warn!("Pipeline error: {e}");
        self.last_error = Some(e.clone());
        self.state = PipelineState::Error;
        e
    }

    /// Recompute the state from the held data.
    fn settle_state(&mut self) {
        self.state = match (&self.source, &self.target) {
            (Some(_), Some(_)) => PipelineState::FormatChosen,
            (Some(_), None) => PipelineState::FileSelected,
            (None, _) => PipelineState::Idle,
        };
    }
}
