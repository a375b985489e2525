//! Error types for the pagebrief library.
//!
//! Everything user-triggerable funnels into one [`BriefError`] enum. The web
//! layer converts each variant into a visible message and an HTTP status at
//! the handler boundary; no failure is allowed to take the server down, and
//! none is swallowed silently.

use thiserror::Error;

/// All errors surfaced by the pagebrief library.
#[derive(Debug, Error)]
pub enum BriefError {
    // ── Document errors ───────────────────────────────────────────────────
    /// Uploaded bytes do not start with the PDF magic header.
    #[error("Uploaded file is not a valid PDF.\nFirst bytes: {magic:?}")]
    NotAPdf { magic: [u8; 4] },

    /// The header looked right but pdfium could not parse the document.
    #[error("PDF could not be parsed: {detail}")]
    CorruptDocument { detail: String },

    /// Requested page number is outside the document.
    #[error("Page {page} is out of range (document has {total} pages)")]
    PageOutOfRange { page: usize, total: usize },

    /// pdfium returned an error while rasterising or reading a page.
    #[error("Rendering failed for page {page}: {detail}")]
    RenderFailed { page: usize, detail: String },

    // ── Summarisation errors ──────────────────────────────────────────────
    /// No API credential was supplied; the request is aborted before any
    /// network call is made.
    #[error("An API key is required before requesting a summary.")]
    MissingApiKey,

    /// The summarisation service rejected the credential (401/403).
    #[error("The summarisation service rejected the API key: {detail}")]
    AuthRejected { detail: String },

    /// The summarisation service returned HTTP 429.
    ///
    /// Check `retry_after_secs` for a server-specified delay; the library
    /// never retries on its own — the user may trigger the action again.
    #[error("Rate limited by the summarisation service")]
    RateLimited { retry_after_secs: Option<u64> },

    /// Network failure talking to the summarisation service.
    #[error("Summarisation request failed: {reason}")]
    Transport { reason: String },

    /// The summarisation call exceeded the configured timeout.
    #[error("Summarisation request timed out after {secs}s")]
    ApiTimeout { secs: u64 },

    /// The service answered 200 but the response carried no usable text.
    #[error("Summarisation service returned an empty response")]
    EmptyResponse,

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}
