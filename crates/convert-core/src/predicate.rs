//! File-type predicates applied by drop zones

use crate::file::FileMeta;

/// Which files a drop zone accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypePredicate {
    /// Declared MIME type must match exactly
    ExactMime(&'static str),
    /// Declared MIME type must start with the prefix (e.g. `image/`)
    MimePrefix(&'static str),
    /// Office-style documents: MIME types vary across platforms, so either a
    /// known MIME type or a known extension is enough
    Document {
        mimes: &'static [&'static str],
        extensions: &'static [&'static str],
    },
    /// Accept everything
    Any,
}

impl TypePredicate {
    pub fn accepts(&self, meta: &FileMeta) -> bool {
        match self {
            TypePredicate::ExactMime(mime) => meta.mime == *mime,
            TypePredicate::MimePrefix(prefix) => meta.mime.starts_with(prefix),
            TypePredicate::Document { mimes, extensions } => {
                if mimes.iter().any(|m| meta.mime == *m) {
                    return true;
                }
                match meta.extension() {
                    Some(ext) => extensions.iter().any(|e| *e == ext),
                    None => false,
                }
            }
            TypePredicate::Any => true,
        }
    }

    /// Document checks collapse to `Any`; strict MIME checks are kept
    pub fn relaxed(self) -> Self {
        match self {
            TypePredicate::Document { .. } => TypePredicate::Any,
            other => other,
        }
    }
}
