//! Element lookup by id convention
//!
//! Every tool section uses ids prefixed with the tool id, e.g. for `resize`:
//! `resize-drop-zone`, `resize-file-input`, `resize-submit`. Option fields
//! are `resize-opt-width` for number inputs and radio groups named
//! `resize-<option>`. Only the drop zone, file input and submit button are
//! required; everything else is looked up and skipped when absent.

use convert_core::{OptionKind, PageKind, ToolKind, ToolSpec};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlAnchorElement, HtmlElement, HtmlImageElement, HtmlInputElement,
};

pub fn part_id(mode: &str, part: &str) -> String {
    format!("{}-{}", mode, part)
}

pub fn option_input_id(mode: &str, option: &str) -> String {
    format!("{}-opt-{}", mode, option)
}

pub fn radio_selector(mode: &str, option: &str) -> String {
    format!("input[type=\"radio\"][name=\"{}-{}\"]", mode, option)
}

pub fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("No document"))
}

fn optional<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
}

fn required<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    optional(document, id).ok_or_else(|| JsValue::from_str(&format!("Missing element #{}", id)))
}

fn query_all<T: JsCast>(document: &Document, selector: &str) -> Result<Vec<T>, JsValue> {
    let nodes = document.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|n| n.dyn_into::<T>().ok())
        .collect())
}

pub fn set_class(el: &Element, class: &str, on: bool) -> Result<(), JsValue> {
    el.class_list().toggle_with_force(class, on).map(|_| ())
}

pub fn set_hidden(el: &Element, hidden: bool) -> Result<(), JsValue> {
    set_class(el, "hidden", hidden)
}

pub fn set_text(el: &Element, text: &str) {
    if el.text_content().as_deref() != Some(text) {
        el.set_text_content(Some(text));
    }
}

/// Elements of one tool section
pub struct ModeElements {
    pub kind: ToolKind,
    pub section: Option<Element>,
    pub drop_zone: HtmlElement,
    pub prompt: Option<Element>,
    pub file_input: HtmlInputElement,
    pub submit: HtmlElement,
    /// Inner `span` of the submit button when it has one (icon + label)
    pub submit_label: Element,
    pub gallery: Option<Element>,
    pub grid: Option<Element>,
    pub count: Option<Element>,
    pub remove_all: Option<Element>,
    pub options: Option<Element>,
    pub file_name: Option<Element>,
    pub file_size: Option<Element>,
    pub preview: Option<HtmlImageElement>,
    pub remove_file: Option<Element>,
    pub number_inputs: Vec<(&'static str, HtmlInputElement)>,
    pub radios: Vec<(&'static str, HtmlInputElement)>,
}

impl ModeElements {
    pub fn locate(document: &Document, spec: &ToolSpec) -> Result<Self, JsValue> {
        let m = spec.kind.id();
        let drop_zone: HtmlElement = required(document, &part_id(m, "drop-zone"))?;
        let submit: HtmlElement = required(document, &part_id(m, "submit"))?;
        let submit_label = submit
            .query_selector("span")?
            .unwrap_or_else(|| submit.clone().into());
        let prompt = drop_zone.query_selector("h3")?;

        let mut number_inputs = Vec::new();
        let mut radios = Vec::new();
        for field in spec.options {
            match field.kind {
                OptionKind::Choice { .. } => {
                    let selector = radio_selector(m, field.name);
                    for radio in query_all::<HtmlInputElement>(document, &selector)? {
                        radios.push((field.name, radio));
                    }
                }
                OptionKind::OptionalNumber => {
                    if let Some(input) = optional(document, &option_input_id(m, field.name)) {
                        number_inputs.push((field.name, input));
                    }
                }
            }
        }

        Ok(Self {
            kind: spec.kind,
            section: document.get_element_by_id(m),
            drop_zone,
            prompt,
            file_input: required(document, &part_id(m, "file-input"))?,
            submit,
            submit_label,
            gallery: optional(document, &part_id(m, "gallery")),
            grid: optional(document, &part_id(m, "gallery-grid")),
            count: optional(document, &part_id(m, "count")),
            remove_all: optional(document, &part_id(m, "remove-all")),
            options: optional(document, &part_id(m, "options")),
            file_name: optional(document, &part_id(m, "file-name")),
            file_size: optional(document, &part_id(m, "file-size")),
            preview: optional(document, &part_id(m, "preview")),
            remove_file: optional(document, &part_id(m, "remove-file")),
            number_inputs,
            radios,
        })
    }
}

/// Elements of a whole page: one section per tool plus the shared result panel
pub struct PageElements {
    pub tabs: Vec<(String, HtmlElement)>,
    pub modes: Vec<ModeElements>,
    pub download_section: Option<Element>,
    pub download_link: Option<HtmlAnchorElement>,
    pub success_title: Option<Element>,
    pub start_over: Option<Element>,
}

impl PageElements {
    pub fn locate(document: &Document, page: PageKind) -> Result<Self, JsValue> {
        let modes = page
            .modes()
            .iter()
            .map(|kind| ModeElements::locate(document, &kind.spec()))
            .collect::<Result<Vec<_>, _>>()?;

        let tabs = query_all::<HtmlElement>(document, ".tab-btn[data-tab]")?
            .into_iter()
            .filter_map(|tab| tab.get_attribute("data-tab").map(|id| (id, tab)))
            .collect();

        Ok(Self {
            tabs,
            modes,
            download_section: optional(document, "download-section"),
            download_link: optional(document, "download-link"),
            success_title: optional(document, "success-title"),
            start_over: optional(document, "start-over"),
        })
    }
}
