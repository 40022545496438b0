//! Browser-independent core of the conversion tool pages
//!
//! Every tool page (compress, merge, image tools, PDF↔JPG, Word↔PDF) is the
//! same flow: pick files, optionally reorder them, post them to an endpoint,
//! show a download link or an error. This crate holds that flow as plain Rust
//! state so it can be tested on the host; the wasm crate only forwards DOM
//! events and renders the resulting views.
//!
//! - `tool`: declarative per-tool descriptions
//! - `gallery`: ordered file list with stable ids and live drag reorder
//! - `controller`: the per-tool state machine
//! - `page`: one or two tools behind tabs, initial tab from the URL fragment

pub mod config;
pub mod controller;
pub mod dropzone;
pub mod error;
pub mod file;
pub mod gallery;
pub mod page;
pub mod predicate;
pub mod request;
pub mod response;
pub mod tool;

pub use config::SiteConfig;
pub use controller::{
    Completion, EntryView, Generation, OptionView, Phase, PreviewTicket, SubmitTicket,
    ToolController, ToolView,
};
pub use dropzone::{DragPhase, DropOutcome, DropZone};
pub use error::ConvertError;
pub use file::{FileMeta, SelectedFile};
pub use gallery::{EntryId, Gallery};
pub use page::{PageController, PageKind, PageView};
pub use predicate::TypePredicate;
pub use request::{ConversionRequest, FormPart, OptionValues, PartValue};
pub use response::{ConversionOutcome, ConversionResponse};
pub use tool::{Labels, OptionField, OptionKind, PreviewKind, Selection, ToolKind, ToolSpec};

/// Format a byte count the way the size labels show it: two decimals at
/// most, trailing zeros dropped (`1.5 KB`, `2 MB`, `0 Bytes`).
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    const K: f64 = 1024.0;

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= K && unit < UNITS.len() - 1 {
        value /= K;
        unit += 1;
    }

    let mut number = format!("{:.2}", value);
    if number.contains('.') {
        number = number.trim_end_matches('0').trim_end_matches('.').to_string();
    }
    format!("{} {}", number, UNITS[unit])
}
