//! Declarative descriptions of every conversion tool
//!
//! A single `ToolController` drives all tools; what differs between them
//! (endpoint, accepted types, extra form fields, labels) lives here.

use crate::predicate::TypePredicate;
use serde::{Deserialize, Serialize};

const PDF_MIME: &str = "application/pdf";

const WORD_MIMES: &[&str] = &[
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/msword",
];

/// How many files a tool takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Only the first dropped or picked file counts; a new one replaces it
    Single,
    /// Every valid file is appended to a reorderable gallery
    Multiple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewKind {
    None,
    /// Read the file as a data URL and show it as a thumbnail
    Thumbnail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Radio group; always sent, falls back to `default`
    Choice {
        choices: &'static [&'static str],
        default: &'static str,
    },
    /// Positive whole number; omitted from the request when left blank
    OptionalNumber,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionField {
    pub name: &'static str,
    pub kind: OptionKind,
}

/// User-facing text for one tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    /// Drop-zone heading while nothing is selected
    pub empty_prompt: &'static str,
    /// Drop-zone heading once a gallery has entries
    pub more_prompt: &'static str,
    pub submit: &'static str,
    /// Submit label while the request is in flight
    pub progress: &'static str,
    pub success_title: &'static str,
    /// Alert shown when a drop or pick contains no acceptable file
    pub rejection: &'static str,
    /// Prefix for server-reported errors
    pub error_prefix: &'static str,
    /// Alert shown for transport failures and undecodable responses
    pub generic_failure: &'static str,
}

/// Everything a controller needs to know about a tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolSpec {
    pub kind: ToolKind,
    pub endpoint: &'static str,
    /// Multipart field name for the file part(s)
    pub file_field: &'static str,
    pub selection: Selection,
    pub accept: TypePredicate,
    pub options: &'static [OptionField],
    pub labels: Labels,
    pub preview: PreviewKind,
    /// Single-file tools with an options panel hide the drop zone once a file
    /// is chosen; the others show the file name in the drop zone instead
    pub options_panel: bool,
}

impl ToolSpec {
    pub fn is_multi(&self) -> bool {
        self.selection == Selection::Multiple
    }

    pub fn option(&self, name: &str) -> Option<&OptionField> {
        self.options.iter().find(|o| o.name == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolKind {
    CompressPdf,
    MergePdf,
    CompressImage,
    ResizeImage,
    ImageToPdf,
    PdfToJpg,
    WordToPdf,
    PdfToWord,
}

impl ToolKind {
    pub const ALL: [ToolKind; 8] = [
        ToolKind::CompressPdf,
        ToolKind::MergePdf,
        ToolKind::CompressImage,
        ToolKind::ResizeImage,
        ToolKind::ImageToPdf,
        ToolKind::PdfToJpg,
        ToolKind::WordToPdf,
        ToolKind::PdfToWord,
    ];

    /// Identifier used for tab ids, URL fragments and DOM element prefixes
    pub fn id(self) -> &'static str {
        match self {
            ToolKind::CompressPdf => "compress-pdf",
            ToolKind::MergePdf => "merge-pdf",
            ToolKind::CompressImage => "compress",
            ToolKind::ResizeImage => "resize",
            ToolKind::ImageToPdf => "jpg2pdf",
            ToolKind::PdfToJpg => "pdf2jpg",
            ToolKind::WordToPdf => "word2pdf",
            ToolKind::PdfToWord => "pdf2word",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.id() == id)
    }

    pub fn spec(self) -> ToolSpec {
        match self {
            ToolKind::CompressPdf => ToolSpec {
                kind: self,
                endpoint: "/compress-pdf-action",
                file_field: "file",
                selection: Selection::Single,
                accept: TypePredicate::ExactMime(PDF_MIME),
                options: &[OptionField {
                    name: "level",
                    kind: OptionKind::Choice {
                        choices: &["low", "medium", "high"],
                        default: "medium",
                    },
                }],
                labels: Labels {
                    empty_prompt: "Drag & Drop PDF Here",
                    more_prompt: "Drag & Drop PDF Here",
                    submit: "Compress PDF",
                    progress: "Compressing...",
                    success_title: "PDF Compressed!",
                    rejection: "Please upload a PDF file.",
                    error_prefix: "Error: ",
                    generic_failure: "An error occurred.",
                },
                preview: PreviewKind::None,
                options_panel: true,
            },
            ToolKind::MergePdf => ToolSpec {
                kind: self,
                endpoint: "/merge-pdf-action",
                file_field: "files[]",
                selection: Selection::Multiple,
                accept: TypePredicate::ExactMime(PDF_MIME),
                options: &[],
                labels: Labels {
                    empty_prompt: "Drag & Drop PDFs Here",
                    more_prompt: "Add More PDFs",
                    submit: "Merge PDFs",
                    progress: "Merging...",
                    success_title: "PDFs Merged!",
                    rejection: "Please upload PDF files only.",
                    error_prefix: "Error: ",
                    generic_failure: "An error occurred.",
                },
                preview: PreviewKind::None,
                options_panel: false,
            },
            ToolKind::CompressImage => ToolSpec {
                kind: self,
                endpoint: "/image-tools/compress",
                file_field: "file",
                selection: Selection::Single,
                accept: TypePredicate::MimePrefix("image/"),
                options: &[OptionField {
                    name: "target_size_kb",
                    kind: OptionKind::OptionalNumber,
                }],
                labels: Labels {
                    empty_prompt: "Drag & Drop Image Here",
                    more_prompt: "Drag & Drop Image Here",
                    submit: "Compress Image",
                    progress: "Processing...",
                    success_title: "Image Ready!",
                    rejection: "Please upload an image file.",
                    error_prefix: "Error: ",
                    generic_failure: "Error processing request.",
                },
                preview: PreviewKind::Thumbnail,
                options_panel: true,
            },
            ToolKind::ResizeImage => ToolSpec {
                kind: self,
                endpoint: "/image-tools/resize",
                file_field: "file",
                selection: Selection::Single,
                accept: TypePredicate::MimePrefix("image/"),
                options: &[
                    OptionField {
                        name: "width",
                        kind: OptionKind::OptionalNumber,
                    },
                    OptionField {
                        name: "height",
                        kind: OptionKind::OptionalNumber,
                    },
                    OptionField {
                        name: "target_size_kb",
                        kind: OptionKind::OptionalNumber,
                    },
                ],
                labels: Labels {
                    empty_prompt: "Drag & Drop Image Here",
                    more_prompt: "Drag & Drop Image Here",
                    submit: "Increase Image Size",
                    progress: "Processing...",
                    success_title: "Image Ready!",
                    rejection: "Please upload an image file.",
                    error_prefix: "Error: ",
                    generic_failure: "Error processing request.",
                },
                preview: PreviewKind::Thumbnail,
                options_panel: true,
            },
            ToolKind::ImageToPdf => ToolSpec {
                kind: self,
                endpoint: "/convert",
                file_field: "files[]",
                selection: Selection::Multiple,
                accept: TypePredicate::MimePrefix("image/"),
                options: &[],
                labels: Labels {
                    empty_prompt: "Drag & Drop Images Here",
                    more_prompt: "Add More Images",
                    submit: "Convert to PDF",
                    progress: "Converting...",
                    success_title: "Converted to PDF!",
                    rejection: "Please upload image files (PNG, JPG, JPEG).",
                    error_prefix: "Conversion error: ",
                    generic_failure: "An error occurred during conversion.",
                },
                preview: PreviewKind::Thumbnail,
                options_panel: false,
            },
            ToolKind::PdfToJpg => ToolSpec {
                kind: self,
                endpoint: "/pdf-to-jpg-action",
                file_field: "file",
                selection: Selection::Single,
                accept: TypePredicate::ExactMime(PDF_MIME),
                options: &[],
                labels: Labels {
                    empty_prompt: "Drag & Drop PDF to Extract Images",
                    more_prompt: "Drag & Drop PDF to Extract Images",
                    submit: "Extract Images",
                    progress: "Extracting...",
                    success_title: "Images Extracted!",
                    rejection: "Please upload a PDF file.",
                    error_prefix: "Error: ",
                    generic_failure: "An error occurred.",
                },
                preview: PreviewKind::None,
                options_panel: false,
            },
            ToolKind::WordToPdf => ToolSpec {
                kind: self,
                endpoint: "/word-to-pdf-action",
                file_field: "file",
                selection: Selection::Single,
                accept: TypePredicate::Document {
                    mimes: WORD_MIMES,
                    extensions: &["doc", "docx"],
                },
                options: &[],
                labels: Labels {
                    empty_prompt: "Drag & Drop Word Document",
                    more_prompt: "Drag & Drop Word Document",
                    submit: "Convert to PDF",
                    progress: "Converting...",
                    success_title: "Converted to PDF!",
                    rejection: "Please upload a Word document (.doc, .docx).",
                    error_prefix: "Error: ",
                    generic_failure: "An error occurred.",
                },
                preview: PreviewKind::None,
                options_panel: false,
            },
            ToolKind::PdfToWord => ToolSpec {
                kind: self,
                endpoint: "/pdf-to-word-action",
                file_field: "file",
                selection: Selection::Single,
                accept: TypePredicate::Document {
                    mimes: &[PDF_MIME],
                    extensions: &["pdf"],
                },
                options: &[],
                labels: Labels {
                    empty_prompt: "Drag & Drop PDF File",
                    more_prompt: "Drag & Drop PDF File",
                    submit: "Convert to Word",
                    progress: "Converting...",
                    success_title: "Converted to Word!",
                    rejection: "Please upload a PDF file.",
                    error_prefix: "Error: ",
                    generic_failure: "An error occurred.",
                },
                preview: PreviewKind::None,
                options_panel: false,
            },
        }
    }
}
