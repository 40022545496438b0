//! Ordered, reorderable list of selected files
//!
//! The list itself is the source of truth for submission order. Whatever the
//! page renders is a projection of `entries`, so reordering is an index move
//! rather than a read-back from the view.

use crate::error::ConvertError;
use crate::file::SelectedFile;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a gallery entry, never reused by the same gallery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct GalleryEntry<H> {
    pub id: EntryId,
    pub file: SelectedFile<H>,
    /// Thumbnail data URL, filled in whenever the preview read finishes
    pub preview: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Gallery<H> {
    entries: Vec<GalleryEntry<H>>,
    next_id: u64,
    dragging: Option<EntryId>,
}

impl<H> Default for Gallery<H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
            dragging: None,
        }
    }
}

impl<H> Gallery<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a file and return its id
    pub fn push(&mut self, file: SelectedFile<H>) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        self.entries.push(GalleryEntry {
            id,
            file,
            preview: None,
        });
        id
    }

    /// Remove a single entry, leaving the others in place
    pub fn remove(&mut self, id: EntryId) -> Option<SelectedFile<H>> {
        let index = self.position(id)?;
        if self.dragging == Some(id) {
            self.dragging = None;
        }
        Some(self.entries.remove(index).file)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.dragging = None;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn position(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    pub fn get(&self, id: EntryId) -> Option<&GalleryEntry<H>> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entries(&self) -> &[GalleryEntry<H>] {
        &self.entries
    }

    pub fn ids(&self) -> Vec<EntryId> {
        self.entries.iter().map(|e| e.id).collect()
    }

    /// Files in submission order
    pub fn files(&self) -> impl Iterator<Item = &SelectedFile<H>> {
        self.entries.iter().map(|e| &e.file)
    }

    /// Attach a preview; returns false when the entry is gone
    pub fn set_preview(&mut self, id: EntryId, data_url: String) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.preview = Some(data_url);
                true
            }
            None => false,
        }
    }

    /// Move the entry at `from` so that it ends up at index `to`
    pub fn move_to(&mut self, from: usize, to: usize) -> Result<(), ConvertError> {
        let len = self.entries.len();
        if from >= len {
            return Err(ConvertError::IndexOutOfBounds { index: from, len });
        }
        if to >= len {
            return Err(ConvertError::IndexOutOfBounds { index: to, len });
        }
        if from != to {
            let entry = self.entries.remove(from);
            self.entries.insert(to, entry);
        }
        Ok(())
    }

    pub fn begin_drag(&mut self, id: EntryId) -> Result<(), ConvertError> {
        if self.position(id).is_none() {
            return Err(ConvertError::UnknownEntry(id.0));
        }
        self.dragging = Some(id);
        Ok(())
    }

    pub fn dragging(&self) -> Option<EntryId> {
        self.dragging
    }

    /// Live reorder while the dragged entry hovers over `target`.
    ///
    /// Moving right lands the dragged entry just after the target, moving left
    /// just before it. Returns the applied `(from, to)` move, if any.
    pub fn drag_over(&mut self, target: EntryId) -> Option<(usize, usize)> {
        let dragged = self.dragging?;
        if dragged == target {
            return None;
        }
        let from = self.position(dragged)?;
        let to = self.position(target)?;

        // taking the target's index gives "after" when moving right and
        // "before" when moving left
        self.move_to(from, to).ok()?;
        Some((from, to))
    }

    pub fn end_drag(&mut self) -> Option<EntryId> {
        self.dragging.take()
    }
}
