//! Per-tool controller
//!
//! One `ToolController` drives any tool described by a [`ToolSpec`]: drop zone,
//! gallery, option inputs, submission and the result panel. It never touches
//! the DOM or the network; the browser layer feeds it events, performs the
//! async work it asks for and renders [`ToolView`].
//!
//! ## Lifecycle
//!
//! ```text
//! Idle --files--> Ready --submit--> Submitting --ok--> Succeeded
//!   ^               ^                    |                 |
//!   |               +------failure-------+                 |
//!   +------------------------start_over--------------------+
//! ```
//!
//! Every asynchronous operation (preview read, submission) is tagged with the
//! controller's current [`Generation`]. Resets bump the generation so late
//! completions from an abandoned selection are dropped instead of applied.

use crate::config::SiteConfig;
use crate::dropzone::{self, DragPhase, DropOutcome, DropZone};
use crate::error::ConvertError;
use crate::file::SelectedFile;
use crate::format_bytes;
use crate::gallery::{EntryId, Gallery};
use crate::predicate::TypePredicate;
use crate::request::{ConversionRequest, OptionValues};
use crate::response::{self, ConversionOutcome};
use crate::tool::{OptionKind, PreviewKind, ToolKind, ToolSpec};
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Nothing selected
    Idle,
    /// At least one valid file held, submit enabled
    Ready,
    Submitting,
    /// Result panel shown with a download link
    Succeeded,
}

/// Version tag for asynchronous work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Generation(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewTicket {
    pub generation: Generation,
    pub entry: EntryId,
}

/// Handed out by [`ToolController::submit`]; the caller posts `request` and
/// reports back with `generation`.
#[derive(Debug)]
pub struct SubmitTicket<'a, H> {
    pub generation: Generation,
    pub request: ConversionRequest<'a, H>,
}

/// What happened when a submission finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// The result belonged to an abandoned submission and was dropped
    Stale,
    Succeeded { download_url: String },
    /// The caller must show `alert` to the user
    Failed { alert: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryView {
    pub id: EntryId,
    pub name: String,
    pub size: String,
    pub preview: Option<String>,
    pub dragging: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub name: &'static str,
    pub value: String,
}

/// Everything the page needs to render one tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolView {
    pub tool: &'static str,
    pub phase: Phase,
    pub prompt: String,
    pub drop_zone_visible: bool,
    pub drag_active: bool,
    pub gallery_visible: bool,
    pub entries: Vec<EntryView>,
    pub count: usize,
    pub options_visible: bool,
    pub options: Vec<OptionView>,
    pub file_name: Option<String>,
    pub file_size: Option<String>,
    pub preview: Option<String>,
    pub submit_enabled: bool,
    pub submit_label: String,
    pub converter_visible: bool,
    pub result_visible: bool,
    pub download_url: Option<String>,
    pub success_title: &'static str,
}

pub struct ToolController<H> {
    spec: ToolSpec,
    accept: TypePredicate,
    config: SiteConfig,
    drop_zone: DropZone,
    gallery: Gallery<H>,
    options: OptionValues,
    phase: Phase,
    submit_label: String,
    download_url: Option<String>,
    generation: u64,
}

impl<H> ToolController<H> {
    pub fn new(kind: ToolKind, config: &SiteConfig) -> Self {
        let spec = kind.spec();
        let accept = if config.strict_document_types {
            spec.accept
        } else {
            spec.accept.relaxed()
        };
        Self {
            spec,
            accept,
            config: config.clone(),
            drop_zone: DropZone::new(),
            gallery: Gallery::new(),
            options: OptionValues::new(),
            phase: Phase::Idle,
            submit_label: spec.labels.submit.to_string(),
            download_url: None,
            generation: 0,
        }
    }

    pub fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    pub fn kind(&self) -> ToolKind {
        self.spec.kind
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn generation(&self) -> Generation {
        Generation(self.generation)
    }

    pub fn gallery(&self) -> &Gallery<H> {
        &self.gallery
    }

    pub fn files(&self) -> impl Iterator<Item = &SelectedFile<H>> {
        self.gallery.files()
    }

    pub fn file_count(&self) -> usize {
        self.gallery.len()
    }

    pub fn options(&self) -> &OptionValues {
        &self.options
    }

    pub fn submit_label(&self) -> &str {
        &self.submit_label
    }

    pub fn download_url(&self) -> Option<&str> {
        self.download_url.as_deref()
    }

    pub fn on_drag(&mut self, phase: DragPhase) {
        self.drop_zone.on_drag(phase);
    }

    /// Take files from a drop or picker event.
    ///
    /// Returns the ids of newly added entries. A selection with no acceptable
    /// file leaves the state untouched and yields `ConvertError::Rejected`
    /// carrying the alert text.
    pub fn accept_files(
        &mut self,
        files: Vec<SelectedFile<H>>,
    ) -> Result<Vec<EntryId>, ConvertError> {
        if self.phase == Phase::Succeeded {
            return Ok(Vec::new());
        }

        let accepted = match dropzone::filter(self.spec.selection, &self.accept, files) {
            DropOutcome::Nothing => return Ok(Vec::new()),
            DropOutcome::Rejected => {
                warn!(tool = self.spec.kind.id(), "rejected selection");
                return Err(ConvertError::Rejected(self.spec.labels.rejection.to_string()));
            }
            DropOutcome::Accepted(accepted) => accepted,
        };

        if !self.spec.is_multi() {
            self.gallery.clear();
        }
        let ids: Vec<EntryId> = accepted
            .into_iter()
            .map(|file| self.gallery.push(file))
            .collect();

        debug!(
            tool = self.spec.kind.id(),
            added = ids.len(),
            total = self.gallery.len(),
            "files accepted"
        );
        self.sync_phase();
        Ok(ids)
    }

    pub fn remove(&mut self, id: EntryId) -> Result<(), ConvertError> {
        self.gallery
            .remove(id)
            .ok_or(ConvertError::UnknownEntry(id.0))?;
        debug!(tool = self.spec.kind.id(), entry = id.0, "entry removed");
        self.sync_phase();
        Ok(())
    }

    pub fn remove_all(&mut self) {
        self.gallery.clear();
        self.sync_phase();
    }

    pub fn begin_drag(&mut self, id: EntryId) -> Result<(), ConvertError> {
        self.gallery.begin_drag(id)
    }

    /// Live reorder; true when the order changed
    pub fn drag_over(&mut self, target: EntryId) -> bool {
        self.gallery.drag_over(target).is_some()
    }

    pub fn finish_drag(&mut self) {
        if let Some(id) = self.gallery.end_drag() {
            debug!(
                tool = self.spec.kind.id(),
                entry = id.0,
                order = ?self.gallery.ids(),
                "drag finished"
            );
        }
    }

    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), ConvertError> {
        let field = self
            .spec
            .option(name)
            .ok_or_else(|| ConvertError::InvalidOption {
                name: name.to_string(),
                value: value.to_string(),
            })?;
        self.options.set(field.name, value);
        Ok(())
    }

    /// Ask for a thumbnail read; `None` when this tool shows no previews
    pub fn request_preview(&self, id: EntryId) -> Option<PreviewTicket> {
        if self.spec.preview != PreviewKind::Thumbnail || self.gallery.get(id).is_none() {
            return None;
        }
        Some(PreviewTicket {
            generation: self.generation(),
            entry: id,
        })
    }

    /// Apply a finished preview read. Returns false if it arrived too late.
    pub fn preview_ready(&mut self, ticket: PreviewTicket, data_url: String) -> bool {
        if ticket.generation != self.generation() {
            debug!(tool = self.spec.kind.id(), entry = ticket.entry.0, "stale preview dropped");
            return false;
        }
        self.gallery.set_preview(ticket.entry, data_url)
    }

    /// Start a submission.
    ///
    /// `Ok(None)` means nothing happens: no files, or a submission is already
    /// in flight. Invalid option input is reported as an error and the state
    /// does not change.
    pub fn submit(&mut self) -> Result<Option<SubmitTicket<'_, H>>, ConvertError> {
        if self.phase != Phase::Ready || self.gallery.is_empty() {
            return Ok(None);
        }

        let request = ConversionRequest::build(
            &self.spec,
            self.gallery.files(),
            &self.options,
            &self.config,
        )?;

        self.phase = Phase::Submitting;
        self.submit_label = self.spec.labels.progress.to_string();
        debug!(
            tool = self.spec.kind.id(),
            url = %request.url,
            files = self.gallery.len(),
            "submitting"
        );

        Ok(Some(SubmitTicket {
            generation: Generation(self.generation),
            request,
        }))
    }

    /// Report the end of a submission: the response body, or the transport
    /// error that prevented one.
    pub fn complete(
        &mut self,
        generation: Generation,
        body: Result<String, ConvertError>,
    ) -> Completion {
        if generation != self.generation() || self.phase != Phase::Submitting {
            warn!(tool = self.spec.kind.id(), "stale submission result dropped");
            return Completion::Stale;
        }

        let outcome = body.and_then(|b| response::decode(&b));
        match outcome {
            Ok(ConversionOutcome::Succeeded { download_url }) => {
                debug!(tool = self.spec.kind.id(), %download_url, "conversion succeeded");
                self.phase = Phase::Succeeded;
                self.download_url = Some(download_url.clone());
                Completion::Succeeded { download_url }
            }
            Ok(ConversionOutcome::Failed {
                message: Some(message),
            }) => self.fail(format!("{}{}", self.spec.labels.error_prefix, message)),
            Ok(ConversionOutcome::Failed { message: None }) => {
                self.fail(self.spec.labels.generic_failure.to_string())
            }
            Err(e) => {
                warn!(tool = self.spec.kind.id(), error = %e, "submission failed");
                self.fail(self.spec.labels.generic_failure.to_string())
            }
        }
    }

    fn fail(&mut self, alert: String) -> Completion {
        warn!(tool = self.spec.kind.id(), %alert, "conversion failed");
        self.submit_label = self.spec.labels.submit.to_string();
        self.phase = if self.gallery.is_empty() {
            Phase::Idle
        } else {
            Phase::Ready
        };
        Completion::Failed { alert }
    }

    /// Back to the initial state, whatever the current one is
    pub fn start_over(&mut self) {
        self.gallery.clear();
        self.options.clear();
        self.drop_zone.reset();
        self.phase = Phase::Idle;
        self.submit_label = self.spec.labels.submit.to_string();
        self.download_url = None;
        self.generation += 1;
        debug!(tool = self.spec.kind.id(), "reset");
    }

    fn sync_phase(&mut self) {
        if matches!(self.phase, Phase::Idle | Phase::Ready) {
            self.phase = if self.gallery.is_empty() {
                Phase::Idle
            } else {
                Phase::Ready
            };
        }
    }

    pub fn view(&self) -> ToolView {
        let labels = &self.spec.labels;
        let count = self.gallery.len();
        let first = self.gallery.entries().first();
        let multi = self.spec.is_multi();

        let prompt = match (multi, first) {
            (true, Some(_)) => labels.more_prompt.to_string(),
            (false, Some(entry)) if !self.spec.options_panel => entry.file.meta.name.clone(),
            _ => labels.empty_prompt.to_string(),
        };

        let entries = self
            .gallery
            .entries()
            .iter()
            .map(|e| EntryView {
                id: e.id,
                name: e.file.meta.name.clone(),
                size: format_bytes(e.file.meta.size),
                preview: e.preview.clone(),
                dragging: self.gallery.dragging() == Some(e.id),
            })
            .collect();

        let options = self
            .spec
            .options
            .iter()
            .map(|field| {
                let value = match (self.options.get(field.name), field.kind) {
                    (Some(v), _) => v.to_string(),
                    (None, OptionKind::Choice { default, .. }) => default.to_string(),
                    (None, OptionKind::OptionalNumber) => String::new(),
                };
                OptionView {
                    name: field.name,
                    value,
                }
            })
            .collect();

        let single_file = if multi { None } else { first };

        ToolView {
            tool: self.spec.kind.id(),
            phase: self.phase,
            prompt,
            drop_zone_visible: !(self.spec.options_panel && count > 0),
            drag_active: self.drop_zone.is_drag_active(),
            gallery_visible: multi && count > 0,
            entries,
            count,
            options_visible: self.spec.options_panel && count > 0,
            options,
            file_name: single_file.map(|e| e.file.meta.name.clone()),
            file_size: single_file.map(|e| format_bytes(e.file.meta.size)),
            preview: single_file.and_then(|e| e.preview.clone()),
            submit_enabled: count > 0 && self.phase == Phase::Ready,
            submit_label: self.submit_label.clone(),
            converter_visible: self.phase != Phase::Succeeded,
            result_visible: self.phase == Phase::Succeeded,
            download_url: self.download_url.clone(),
            success_title: labels.success_title,
        }
    }
}
