//! Server binary for pagebrief.
//!
//! A thin shim over the library crate that maps CLI flags to [`Options`],
//! builds the router, and serves it.

use anyhow::{Context, Result};
use clap::Parser;
use pagebrief::{AppState, OpenAiSummarizer, Options};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Serve on the default port
  pagebrief

  # Custom port and render density
  pagebrief --port 8080 --dpi 200

  # Point summaries at a different model
  pagebrief --model gpt-4o

NOTES:
  The LLM API key is never read from the environment or configuration:
  it is supplied per session in the browser and forwarded with each
  summarisation request only.

  PDFium must be available as a shared library; set PDFIUM_LIB_PATH or
  install libpdfium where the dynamic loader can find it.
"#;

/// Interactive PDF page preview and per-page summarisation server.
#[derive(Parser, Debug)]
#[command(
    name = "pagebrief",
    version,
    about = "Upload a PDF, preview pages, and summarise the selected page with an LLM",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Port to listen on.
    #[arg(short, long, env = "PAGEBRIEF_PORT", default_value_t = 8501)]
    port: u16,

    /// Rendering DPI (72–400).
    #[arg(long, env = "PAGEBRIEF_DPI", default_value_t = 150,
          value_parser = clap::value_parser!(u32).range(72..=400))]
    dpi: u32,

    /// Chat model requested from the summarisation endpoint.
    #[arg(long, env = "PAGEBRIEF_MODEL", default_value = "gpt-4o-mini")]
    model: String,

    /// Per-summarisation-call timeout in seconds.
    #[arg(long, env = "PAGEBRIEF_API_TIMEOUT", default_value_t = 60)]
    api_timeout: u64,

    /// Maximum upload size in MiB.
    #[arg(long, env = "PAGEBRIEF_UPLOAD_LIMIT_MB", default_value_t = 50)]
    upload_limit_mb: usize,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PAGEBRIEF_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PAGEBRIEF_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    // ── Build state ──────────────────────────────────────────────────────
    let options = Options::builder()
        .dpi(cli.dpi)
        .model(cli.model)
        .api_timeout_secs(cli.api_timeout)
        .upload_limit_bytes(cli.upload_limit_mb * 1024 * 1024)
        .build()
        .context("Invalid configuration")?;

    let summarizer =
        Arc::new(OpenAiSummarizer::new(&options).context("Failed to build summarisation client")?);
    let state = Arc::new(AppState::new(options, summarizer));
    let app = pagebrief::router(state);

    // ── Serve ────────────────────────────────────────────────────────────
    let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("Listening on http://{addr}");
    axum::serve(listener, app)
        .await
        .context("Server terminated unexpectedly")?;

    Ok(())
}
