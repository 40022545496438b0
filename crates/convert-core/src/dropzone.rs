//! Drop-zone state and file filtering

use crate::file::SelectedFile;
use crate::predicate::TypePredicate;
use crate::tool::Selection;

/// Drag lifecycle events delivered to a drop zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Enter,
    Over,
    Leave,
    Drop,
    End,
}

impl DragPhase {
    pub fn from_event_type(event_type: &str) -> Option<Self> {
        match event_type {
            "dragenter" => Some(DragPhase::Enter),
            "dragover" => Some(DragPhase::Over),
            "dragleave" => Some(DragPhase::Leave),
            "drop" => Some(DragPhase::Drop),
            "dragend" => Some(DragPhase::End),
            _ => None,
        }
    }
}

/// Presentational state of a drop zone
#[derive(Debug, Clone, Default)]
pub struct DropZone {
    drag_active: bool,
}

impl DropZone {
    pub fn new() -> Self {
        Self::default()
    }

    /// Highlight follows the pointer; it is cleared on leave/drop/end no matter
    /// what happens to the dropped files afterwards.
    pub fn on_drag(&mut self, phase: DragPhase) {
        self.drag_active = matches!(phase, DragPhase::Enter | DragPhase::Over);
    }

    pub fn is_drag_active(&self) -> bool {
        self.drag_active
    }

    pub fn reset(&mut self) {
        self.drag_active = false;
    }
}

/// Result of running a drop or picker selection through a zone's predicate
#[derive(Debug)]
pub enum DropOutcome<H> {
    /// The event carried no files
    Nothing,
    /// Files were offered but none passed the predicate
    Rejected,
    Accepted(Vec<SelectedFile<H>>),
}

/// Keep the files a zone would accept.
///
/// Single-file zones only look at the first file of the event.
pub fn filter<H>(
    selection: Selection,
    predicate: &TypePredicate,
    files: Vec<SelectedFile<H>>,
) -> DropOutcome<H> {
    if files.is_empty() {
        return DropOutcome::Nothing;
    }

    let considered: Vec<_> = match selection {
        Selection::Single => files.into_iter().take(1).collect(),
        Selection::Multiple => files,
    };

    let accepted: Vec<_> = considered
        .into_iter()
        .filter(|f| predicate.accepts(&f.meta))
        .collect();

    if accepted.is_empty() {
        DropOutcome::Rejected
    } else {
        DropOutcome::Accepted(accepted)
    }
}
