//! Configuration for rendering and summarisation.
//!
//! Every knob lives in one [`Options`] struct built via [`OptionsBuilder`],
//! so a single value can be cloned into the web state, logged, and diffed
//! between runs. Callers set only what they care about and rely on the
//! documented defaults for the rest.

use crate::error::BriefError;
use serde::{Deserialize, Serialize};

/// Runtime options shared by the renderer and the summarisation client.
///
/// # Example
/// ```rust
/// use pagebrief::Options;
///
/// let options = Options::builder()
///     .dpi(150)
///     .model("gpt-4o-mini")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Options {
    /// Rendering DPI used when rasterising each PDF page. Range: 72–400. Default: 150.
    ///
    /// 150 DPI keeps text legible in the browser preview while keeping
    /// per-page PNG sizes small enough to serve instantly.
    pub dpi: u32,

    /// Chat model requested from the summarisation endpoint. Default: "gpt-4o-mini".
    pub model: String,

    /// Sampling temperature for the completion. Default: None (provider default).
    pub temperature: Option<f32>,

    /// Maximum tokens the model may generate for one summary. Default: None.
    pub max_tokens: Option<usize>,

    /// Per-summarisation-call timeout in seconds. Default: 60.
    ///
    /// Without a deadline a stuck endpoint would hang the session handler
    /// (and the user's tab) indefinitely.
    pub api_timeout_secs: u64,

    /// Maximum accepted upload size in bytes. Default: 50 MiB.
    pub upload_limit_bytes: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            dpi: 150,
            model: "gpt-4o-mini".to_string(),
            temperature: None,
            max_tokens: None,
            api_timeout_secs: 60,
            upload_limit_bytes: 50 * 1024 * 1024,
        }
    }
}

impl Options {
    /// Create a new builder for `Options`.
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder {
            options: Self::default(),
        }
    }
}

/// Builder for [`Options`].
#[derive(Debug)]
pub struct OptionsBuilder {
    options: Options,
}

impl OptionsBuilder {
    pub fn dpi(mut self, dpi: u32) -> Self {
        self.options.dpi = dpi.clamp(72, 400);
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.options.model = model.into();
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.options.temperature = Some(t.clamp(0.0, 2.0));
        self
    }

    pub fn max_tokens(mut self, n: usize) -> Self {
        self.options.max_tokens = Some(n);
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.options.api_timeout_secs = secs;
        self
    }

    pub fn upload_limit_bytes(mut self, bytes: usize) -> Self {
        self.options.upload_limit_bytes = bytes;
        self
    }

    /// Build the options, validating constraints.
    pub fn build(self) -> Result<Options, BriefError> {
        let o = &self.options;
        if o.dpi < 72 || o.dpi > 400 {
            return Err(BriefError::InvalidConfig(format!(
                "DPI must be 72–400, got {}",
                o.dpi
            )));
        }
        if o.model.trim().is_empty() {
            return Err(BriefError::InvalidConfig("Model must not be empty".into()));
        }
        if o.api_timeout_secs == 0 {
            return Err(BriefError::InvalidConfig(
                "API timeout must be ≥ 1 second".into(),
            ));
        }
        Ok(self.options)
    }
}
