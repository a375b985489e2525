//! Document rendering and text extraction via pdfium.
//!
//! ## Why spawn_blocking?
//!
//! The `pdfium-render` crate wraps the pdfium C++ library, which uses
//! thread-local state internally and is not safe to call from async contexts.
//! `tokio::task::spawn_blocking` moves the work onto a dedicated thread pool
//! thread so the Tokio workers never stall during CPU-heavy rasterisation.
//!
//! ## Why re-open per call?
//!
//! Every entry point re-parses the document from the caller's byte buffer
//! instead of sharing one open handle. pdfium document handles cannot cross
//! threads, and parse cost is paid once per user action (an upload or a
//! button press), never in a hot path.

use crate::config::Options;
use crate::error::BriefError;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Bytes every well-formed PDF starts with.
const PDF_MAGIC: &[u8; 4] = b"%PDF";

/// Validate the PDF magic header before handing bytes to pdfium.
///
/// Rejecting junk up front yields a meaningful error instead of an opaque
/// pdfium parse failure, and avoids binding the pdfium library at all for
/// obviously invalid uploads.
fn check_magic(bytes: &[u8]) -> Result<(), BriefError> {
    let mut magic = [0u8; 4];
    let len = bytes.len().min(4);
    magic[..len].copy_from_slice(&bytes[..len]);
    if &magic != PDF_MAGIC {
        return Err(BriefError::NotAPdf { magic });
    }
    Ok(())
}

/// Rasterise every page of a PDF into `page_{n}.png` files under `out_dir`.
///
/// Pages are rendered in document order at `options.dpi` and named by
/// 1-based page index. Returns the written paths in page order; the count
/// always equals the document's page count.
///
/// # Errors
/// * [`BriefError::NotAPdf`] — the buffer does not start with `%PDF`
/// * [`BriefError::CorruptDocument`] — pdfium could not parse the buffer
/// * [`BriefError::RenderFailed`] — a page failed to rasterise or encode
pub async fn render_all_pages(
    document: &[u8],
    out_dir: &Path,
    options: &Options,
) -> Result<Vec<PathBuf>, BriefError> {
    check_magic(document)?;

    let bytes = document.to_vec();
    let dir = out_dir.to_path_buf();
    let dpi = options.dpi;

    tokio::task::spawn_blocking(move || render_all_pages_blocking(&bytes, &dir, dpi))
        .await
        .map_err(|e| BriefError::Internal(format!("Render task panicked: {}", e)))?
}

/// Blocking implementation of full-document rendering.
fn render_all_pages_blocking(
    bytes: &[u8],
    out_dir: &Path,
    dpi: u32,
) -> Result<Vec<PathBuf>, BriefError> {
    let pdfium = Pdfium::default();
    let document = open_document(&pdfium, bytes)?;

    let pages = document.pages();
    let total_pages = pages.len() as usize;
    info!("PDF loaded: {} pages", total_pages);

    // Points are 1/72 inch, so dpi/72 scales a page to the requested density.
    let render_config = PdfRenderConfig::new().scale_page_by_factor(dpi as f32 / 72.0);

    let mut paths = Vec::with_capacity(total_pages);

    for (idx, page) in pages.iter().enumerate() {
        let page_num = idx + 1;

        let bitmap =
            page.render_with_config(&render_config)
                .map_err(|e| BriefError::RenderFailed {
                    page: page_num,
                    detail: format!("{:?}", e),
                })?;

        let image = bitmap.as_image();
        let path = out_dir.join(format!("page_{}.png", page_num));
        image.save(&path).map_err(|e| BriefError::RenderFailed {
            page: page_num,
            detail: format!("PNG write failed: {}", e),
        })?;

        debug!(
            "Rendered page {} → {}x{} px → {}",
            page_num,
            image.width(),
            image.height(),
            path.display()
        );
        paths.push(path);
    }

    Ok(paths)
}

/// Extract the plain text of one page (1-based).
///
/// Image-only pages legitimately return an empty string. No layout
/// reconstruction is attempted beyond what pdfium's text API provides.
///
/// # Errors
/// * [`BriefError::PageOutOfRange`] — `page_number` outside `[1, page_count]`
/// * plus the open errors of [`render_all_pages`]
pub async fn extract_page_text(
    document: &[u8],
    page_number: usize,
) -> Result<String, BriefError> {
    check_magic(document)?;

    let bytes = document.to_vec();

    tokio::task::spawn_blocking(move || extract_page_text_blocking(&bytes, page_number))
        .await
        .map_err(|e| BriefError::Internal(format!("Extraction task panicked: {}", e)))?
}

/// Blocking implementation of page text extraction.
fn extract_page_text_blocking(bytes: &[u8], page_number: usize) -> Result<String, BriefError> {
    let pdfium = Pdfium::default();
    let document = open_document(&pdfium, bytes)?;

    let pages = document.pages();
    let total = pages.len() as usize;
    if page_number < 1 || page_number > total {
        return Err(BriefError::PageOutOfRange {
            page: page_number,
            total,
        });
    }

    let page = pages
        .get((page_number - 1) as u16)
        .map_err(|e| BriefError::RenderFailed {
            page: page_number,
            detail: format!("{:?}", e),
        })?;

    let text = page
        .text()
        .map_err(|e| BriefError::RenderFailed {
            page: page_number,
            detail: format!("Text extraction failed: {:?}", e),
        })?
        .all();

    debug!("Extracted {} chars from page {}", text.len(), page_number);
    Ok(text)
}

/// Count the pages of a PDF without rendering anything.
pub async fn page_count(document: &[u8]) -> Result<usize, BriefError> {
    check_magic(document)?;

    let bytes = document.to_vec();

    tokio::task::spawn_blocking(move || {
        let pdfium = Pdfium::default();
        let document = open_document(&pdfium, &bytes)?;
        Ok(document.pages().len() as usize)
    })
    .await
    .map_err(|e| BriefError::Internal(format!("Page-count task panicked: {}", e)))?
}

/// Open a byte buffer as a PDF, mapping pdfium failures to [`BriefError`].
fn open_document<'a>(
    pdfium: &'a Pdfium,
    bytes: &'a [u8],
) -> Result<PdfDocument<'a>, BriefError> {
    pdfium
        .load_pdf_from_byte_slice(bytes, None)
        .map_err(|e| BriefError::CorruptDocument {
            detail: format!("{:?}", e),
        })
}
