//! Page-level controllers
//!
//! A page hosts one tool, or two tools behind tabs (e.g. Word→PDF and
//! PDF→Word). The result panel is shared by both tabs.

use crate::config::SiteConfig;
use crate::controller::{Phase, ToolController, ToolView};
use crate::error::ConvertError;
use crate::tool::ToolKind;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageKind {
    CompressPdf,
    MergePdf,
    ImageToPdf,
    ImageTools,
    PdfJpg,
    WordPdf,
}

impl PageKind {
    pub const ALL: [PageKind; 6] = [
        PageKind::CompressPdf,
        PageKind::MergePdf,
        PageKind::ImageToPdf,
        PageKind::ImageTools,
        PageKind::PdfJpg,
        PageKind::WordPdf,
    ];

    pub fn id(self) -> &'static str {
        match self {
            PageKind::CompressPdf => "compress-pdf",
            PageKind::MergePdf => "merge-pdf",
            PageKind::ImageToPdf => "image-to-pdf",
            PageKind::ImageTools => "image-tools",
            PageKind::PdfJpg => "pdf-jpg",
            PageKind::WordPdf => "word-pdf",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.id() == id)
    }

    /// Tools on this page; the first one is the default tab
    pub fn modes(self) -> &'static [ToolKind] {
        match self {
            PageKind::CompressPdf => &[ToolKind::CompressPdf],
            PageKind::MergePdf => &[ToolKind::MergePdf],
            PageKind::ImageToPdf => &[ToolKind::ImageToPdf],
            PageKind::ImageTools => &[ToolKind::CompressImage, ToolKind::ResizeImage],
            PageKind::PdfJpg => &[ToolKind::PdfToJpg, ToolKind::ImageToPdf],
            PageKind::WordPdf => &[ToolKind::WordToPdf, ToolKind::PdfToWord],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub page: &'static str,
    pub mode: &'static str,
    pub tabs: Vec<&'static str>,
    pub tools: Vec<ToolView>,
    pub result_visible: bool,
    pub download_url: Option<String>,
    pub success_title: &'static str,
}

pub struct PageController<H> {
    kind: PageKind,
    tools: Vec<ToolController<H>>,
    active: usize,
}

impl<H> PageController<H> {
    /// `hash` is the URL fragment at load time (with or without `#`); it
    /// selects the initial tab when it names one of the page's tools.
    pub fn new(kind: PageKind, hash: &str, config: &SiteConfig) -> Self {
        let tools: Vec<ToolController<H>> = kind
            .modes()
            .iter()
            .map(|&tool| ToolController::new(tool, config))
            .collect();
        let active = mode_from_hash(kind.modes(), hash);
        debug!(page = kind.id(), mode = kind.modes()[active].id(), "page mounted");
        Self {
            kind,
            tools,
            active,
        }
    }

    pub fn kind(&self) -> PageKind {
        self.kind
    }

    pub fn mode(&self) -> ToolKind {
        self.tools[self.active].kind()
    }

    pub fn is_tabbed(&self) -> bool {
        self.tools.len() > 1
    }

    pub fn active(&self) -> &ToolController<H> {
        &self.tools[self.active]
    }

    pub fn active_mut(&mut self) -> &mut ToolController<H> {
        &mut self.tools[self.active]
    }

    pub fn tool(&self, kind: ToolKind) -> Option<&ToolController<H>> {
        self.tools.iter().find(|t| t.kind() == kind)
    }

    pub fn tool_mut(&mut self, kind: ToolKind) -> Option<&mut ToolController<H>> {
        self.tools.iter_mut().find(|t| t.kind() == kind)
    }

    /// Activate another tab. Both sub-flows are reset so nothing selected in
    /// one tab can end up in the other's submission.
    pub fn switch_mode(&mut self, id: &str) -> Result<(), ConvertError> {
        let index = self
            .tools
            .iter()
            .position(|t| t.kind().id() == id)
            .ok_or_else(|| ConvertError::UnknownMode(id.to_string()))?;
        self.active = index;
        for tool in &mut self.tools {
            tool.start_over();
        }
        debug!(page = self.kind.id(), mode = id, "mode switched");
        Ok(())
    }

    /// Reset every sub-flow and show the active tab again
    pub fn start_over(&mut self) {
        for tool in &mut self.tools {
            tool.start_over();
        }
    }

    pub fn view(&self) -> PageView {
        let active = self.active();
        let result_visible = active.phase() == Phase::Succeeded;
        PageView {
            page: self.kind.id(),
            mode: active.kind().id(),
            tabs: self.tools.iter().map(|t| t.kind().id()).collect(),
            tools: self.tools.iter().map(|t| t.view()).collect(),
            result_visible,
            download_url: active.download_url().map(str::to_string),
            success_title: active.spec().labels.success_title,
        }
    }
}

fn mode_from_hash(modes: &[ToolKind], hash: &str) -> usize {
    let fragment = hash.trim_start_matches('#');
    modes
        .iter()
        .position(|m| m.id() == fragment)
        .unwrap_or(0)
}
