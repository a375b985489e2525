//! # pagebrief
//!
//! Upload a PDF, preview its pages as rendered images, and request an LLM
//! summary of the selected page's text.
//!
//! The crate is a thin orchestration layer over two external capabilities:
//! pdfium does all PDF parsing, rasterisation, and text extraction, and an
//! OpenAI-compatible chat-completion endpoint produces the summaries. What
//! lives here is the glue: a renderer wrapper, a per-session state object,
//! a summarisation client behind a trait seam, and an axum view.
//!
//! ## Flow
//!
//! ```text
//! upload ──▶ render all pages once ──▶ session (image paths cached)
//!                                         │
//!        page selector ◀── PNG per page ──┘
//!                                         │
//! "요약 실행" ──▶ extract page text ──▶ prompt ──▶ chat completion ──▶ summary
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pagebrief::{Options, OpenAiSummarizer, Session, Summarizer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let options = Options::default();
//!     let bytes = std::fs::read("document.pdf")?;
//!
//!     let session = Session::open(bytes, &options).await?;
//!     println!("{} pages rendered", session.page_count());
//!
//!     let text = session.extract_page_text(1).await?;
//!     let summarizer = OpenAiSummarizer::new(&options)?;
//!     let summary = summarizer
//!         .summarize(&pagebrief::prompts::summary_prompt(&text), "sk-...")
//!         .await?;
//!     println!("{summary}");
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pagebrief` server binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod prompts;
pub mod renderer;
pub mod session;
pub mod summarize;
pub mod web;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{Options, OptionsBuilder};
pub use error::BriefError;
pub use session::{Session, SessionStore};
pub use summarize::{OpenAiSummarizer, Summarizer};
pub use web::router;
pub use web::state::AppState;
