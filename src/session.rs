//! Per-session state: the uploaded document, its rendered pages, and the
//! last summary.
//!
//! A [`Session`] is the explicit context object for one user's interactive
//! lifetime with the tool. Pages are rasterised exactly once, at upload, into
//! a `TempDir` the session owns — so the image files live precisely as long
//! as the session and are removed from disk when it is dropped. No state is
//! shared between sessions.

use crate::config::Options;
use crate::error::BriefError;
use crate::renderer;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

/// One user session: an uploaded PDF and everything derived from it.
pub struct Session {
    /// The uploaded PDF bytes; re-parsed on every text extraction.
    document: Vec<u8>,
    /// Rendered page images in page order, one per document page.
    pages: Vec<PathBuf>,
    /// Most recent summary, replaced on each new summarisation.
    last_summary: Option<String>,
    /// Owns the rendered images; dropped (and deleted) with the session.
    _image_dir: TempDir,
}

impl Session {
    /// Open a session from uploaded PDF bytes, rendering all pages once.
    ///
    /// Fails without creating any state if the bytes are not a parseable
    /// PDF, so a rejected upload leaves no session and no files behind.
    pub async fn open(document: Vec<u8>, options: &Options) -> Result<Self, BriefError> {
        let image_dir = TempDir::new()
            .map_err(|e| BriefError::Internal(format!("Failed to create image dir: {}", e)))?;

        let pages = renderer::render_all_pages(&document, image_dir.path(), options).await?;
        info!("Session opened: {} pages rendered", pages.len());

        Ok(Self {
            document,
            pages,
            last_summary: None,
            _image_dir: image_dir,
        })
    }

    /// Number of pages in the document (equals the rendered image count).
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Path of the rendered image for `page_number` (1-based).
    pub fn image_path(&self, page_number: usize) -> Result<&Path, BriefError> {
        if page_number < 1 || page_number > self.pages.len() {
            return Err(BriefError::PageOutOfRange {
                page: page_number,
                total: self.pages.len(),
            });
        }
        Ok(&self.pages[page_number - 1])
    }

    /// Extract the plain text of `page_number` (1-based), re-parsing the
    /// owned document bytes.
    pub async fn extract_page_text(&self, page_number: usize) -> Result<String, BriefError> {
        renderer::extract_page_text(&self.document, page_number).await
    }

    /// The most recent summary, if any.
    pub fn last_summary(&self) -> Option<&str> {
        self.last_summary.as_deref()
    }

    /// Replace the stored summary with a fresh one.
    pub fn set_summary(&mut self, summary: String) {
        self.last_summary = Some(summary);
    }

    #[cfg(test)]
    fn stub(pages: Vec<PathBuf>, image_dir: TempDir) -> Self {
        Self {
            document: Vec::new(),
            pages,
            last_summary: None,
            _image_dir: image_dir,
        }
    }
}

/// Process-wide map of live sessions, keyed by opaque id.
///
/// Each entry is individually locked so a long-running summarisation in one
/// session never blocks uploads or page views in another.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Arc<RwLock<Session>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session and return its id.
    pub async fn insert(&self, session: Session) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(RwLock::new(session)));
        id
    }

    /// Look up a session by id.
    pub async fn get(&self, id: &Uuid) -> Option<Arc<RwLock<Session>>> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Drop a session (and its rendered images). Returns whether it existed.
    pub async fn remove(&self, id: &Uuid) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stub_session(page_count: usize) -> Session {
        let dir = tempfile::tempdir().unwrap();
        let pages: Vec<PathBuf> = (1..=page_count)
            .map(|n| {
                let p = dir.path().join(format!("page_{}.png", n));
                std::fs::write(&p, b"png").unwrap();
                p
            })
            .collect();
        Session::stub(pages, dir)
    }

    #[test]
    fn image_path_enforces_range() {
        let session = stub_session(3);
        assert!(session.image_path(1).is_ok());
        assert!(session.image_path(3).is_ok());
        assert!(matches!(
            session.image_path(0),
            Err(BriefError::PageOutOfRange { page: 0, total: 3 })
        ));
        assert!(matches!(
            session.image_path(4),
            Err(BriefError::PageOutOfRange { page: 4, total: 3 })
        ));
    }

    #[test]
    fn summary_is_replaced_not_appended() {
        let mut session = stub_session(1);
        assert!(session.last_summary().is_none());
        session.set_summary("first".into());
        session.set_summary("second".into());
        assert_eq!(session.last_summary(), Some("second"));
    }

    #[test]
    fn images_are_deleted_with_the_session() {
        let session = stub_session(2);
        let path = session.image_path(1).unwrap().to_path_buf();
        assert!(path.exists());
        drop(session);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn store_insert_get_remove() {
        let store = SessionStore::new();
        assert!(store.is_empty().await);

        let id = store.insert(stub_session(2)).await;
        assert_eq!(store.len().await, 1);

        let session = store.get(&id).await.expect("session present");
        assert_eq!(session.read().await.page_count(), 2);

        assert!(store.remove(&id).await);
        assert!(!store.remove(&id).await);
        assert!(store.get(&id).await.is_none());
    }

    #[tokio::test]
    async fn ids_are_unique_per_session() {
        let store = SessionStore::new();
        let a = store.insert(stub_session(1)).await;
        let b = store.insert(stub_session(1)).await;
        assert_ne!(a, b);
    }
}
