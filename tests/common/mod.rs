//! Shared helpers for integration tests: a recording mock summarizer,
//! multipart body construction, and a minimal in-memory PDF builder.

#![allow(dead_code)]

use async_trait::async_trait;
use pagebrief::{AppState, BriefError, Options, Summarizer};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Summarizer double that records every call instead of hitting a network.
pub struct MockSummarizer {
    pub reply: String,
    pub calls: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
    pub keys: Mutex<Vec<String>>,
}

impl MockSummarizer {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            keys: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn recorded_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Summarizer for MockSummarizer {
    async fn summarize(&self, prompt: &str, api_key: &str) -> Result<String, BriefError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.keys.lock().unwrap().push(api_key.to_string());
        Ok(self.reply.clone())
    }
}

/// Build the router plus a handle on its state for store assertions.
pub fn test_app(summarizer: Arc<dyn Summarizer>) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(Options::default(), summarizer));
    (pagebrief::router(Arc::clone(&state)), state)
}

// ── Multipart construction ───────────────────────────────────────────────

pub const BOUNDARY: &str = "pagebrief-test-boundary";

/// Encode one file field named "pdf" as a multipart/form-data body.
pub fn multipart_body(filename: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"pdf\"; \
             filename=\"{filename}\"\r\nContent-Type: application/pdf\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

// ── Minimal PDF builder ──────────────────────────────────────────────────

/// Build a small but well-formed PDF with one text line per page.
///
/// Page texts must avoid `(`, `)` and `\` — they are embedded in literal
/// string operands without escaping.
pub fn pdf_with_pages(page_texts: &[&str]) -> Vec<u8> {
    let n = page_texts.len();
    let mut out: Vec<u8> = Vec::new();
    let mut offsets: Vec<usize> = Vec::new();

    out.extend_from_slice(b"%PDF-1.4\n");

    let mut push_obj = |out: &mut Vec<u8>, offsets: &mut Vec<usize>, body: String| {
        offsets.push(out.len());
        out.extend_from_slice(body.as_bytes());
    };

    let kids: String = (0..n).map(|i| format!("{} 0 R ", 4 + 2 * i)).collect();

    push_obj(
        &mut out,
        &mut offsets,
        "1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n".to_string(),
    );
    push_obj(
        &mut out,
        &mut offsets,
        format!("2 0 obj\n<< /Type /Pages /Kids [ {kids}] /Count {n} >>\nendobj\n"),
    );
    push_obj(
        &mut out,
        &mut offsets,
        "3 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>\nendobj\n".to_string(),
    );

    for (i, text) in page_texts.iter().enumerate() {
        let page_id = 4 + 2 * i;
        let content_id = 5 + 2 * i;

        push_obj(
            &mut out,
            &mut offsets,
            format!(
                "{page_id} 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 200 200] \
                 /Resources << /Font << /F1 3 0 R >> >> /Contents {content_id} 0 R >>\nendobj\n"
            ),
        );

        let stream = format!("BT /F1 12 Tf 20 100 Td ({text}) Tj ET");
        push_obj(
            &mut out,
            &mut offsets,
            format!(
                "{content_id} 0 obj\n<< /Length {} >>\nstream\n{stream}\nendstream\nendobj\n",
                stream.len()
            ),
        );
    }

    let object_count = offsets.len() + 1; // plus the free object 0
    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {object_count}\n").as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {object_count} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n"
        )
        .as_bytes(),
    );

    out
}
