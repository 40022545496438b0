//! User-selected files
//!
//! The controller never looks at file contents. It only needs the metadata the
//! browser reports plus an opaque handle it can hand back when the request is
//! assembled.

use serde::Serialize;

/// Metadata reported by the browser for a chosen file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileMeta {
    /// File name including extension
    pub name: String,
    /// Declared MIME type (may be empty)
    pub mime: String,
    /// Size in bytes
    pub size: u64,
}

impl FileMeta {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            size,
        }
    }

    /// Lowercased extension without the dot
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}

/// A file held by a tool controller
///
/// `H` is whatever carries the bytes: `web_sys::File` in the browser, plain
/// byte vectors in tests.
#[derive(Debug, Clone)]
pub struct SelectedFile<H> {
    pub meta: FileMeta,
    pub handle: H,
}

impl<H> SelectedFile<H> {
    pub fn new(meta: FileMeta, handle: H) -> Self {
        Self { meta, handle }
    }

    pub fn name(&self) -> &str {
        &self.meta.name
    }
}
