//! Session state: the selected documents, the active view, and the caches
//! derived from rendering.
//!
//! The session is an explicit object handed to the components that need it,
//! not ambient state. Nothing here persists beyond the process; `reset`
//! returns the session to its initial empty state.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::page::PageGeometry;

use super::store::AnnotationStore;

/// One selected source file. The byte content is opaque to this crate; the
/// rasterizer and the sanitization service are the only consumers.
#[derive(Clone, Debug)]
pub struct Document {
    /// Stable index within the session's selection list
    pub index: usize,
    /// Original file name, used for the multipart upload
    pub name: String,
    pub bytes: Arc<[u8]>,
    /// Resolved lazily on first render
    pub page_count: Option<usize>,
}

/// Process-wide annotation session
#[derive(Debug, Default)]
pub struct Session {
    pub documents: Vec<Document>,
    pub active_document: usize,
    /// Zero-based page of the active document
    pub active_page: usize,
    /// Current render scale (zoom)
    pub scale: f32,
    pub store: AnnotationStore,
    geometry: HashMap<(usize, usize), PageGeometry>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            scale: 1.0,
            ..Self::default()
        }
    }

    /// Append a document to the selection; returns its stable index
    pub fn add_document(&mut self, name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> usize {
        let index = self.documents.len();
        self.documents.push(Document {
            index,
            name: name.into(),
            bytes: bytes.into(),
            page_count: None,
        });
        index
    }

    pub fn document(&self, index: usize) -> Option<&Document> {
        self.documents.get(index)
    }

    pub fn active_document(&self) -> Option<&Document> {
        self.documents.get(self.active_document)
    }

    /// Switch the active view to another (document, page)
    pub fn set_active(&mut self, document: usize, page: usize) {
        self.active_document = document;
        self.active_page = page;
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    /// Record page metadata published by a completed render
    pub fn cache_geometry(&mut self, document: usize, page: usize, geometry: PageGeometry) {
        self.geometry.insert((document, page), geometry);
    }

    /// Cached native page metadata, if the page has been rendered before
    pub fn geometry(&self, document: usize, page: usize) -> Option<&PageGeometry> {
        self.geometry.get(&(document, page))
    }

    pub fn set_page_count(&mut self, document: usize, pages: usize) {
        if let Some(doc) = self.documents.get_mut(document) {
            doc.page_count = Some(pages);
        }
    }

    /// Clear everything: documents, rectangles, caches, and the active view
    pub fn reset(&mut self) {
        self.documents.clear();
        self.store.clear();
        self.geometry.clear();
        self.active_document = 0;
        self.active_page = 0;
        self.scale = 1.0;
    }
}
