//! Rendering of controller views into the DOM
//!
//! Gallery cards are keyed by entry id and reused, so reordering only moves
//! existing nodes. Re-creating the card under the cursor would cancel the
//! browser's drag in progress.

use crate::binder::{attach, Binding, Listener};
use crate::dom::{self, ModeElements};
use convert_core::{EntryId, EntryView, ToolKind, ToolView};
use std::collections::HashSet;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Element, HtmlElement, Node};

impl Binding {
    pub fn render(self: &Rc<Self>) -> Result<(), JsValue> {
        let view = self.page.borrow().view();

        for (mode, tool) in self.elements.modes.iter().zip(&view.tools) {
            self.render_mode(mode, tool, tool.tool == view.mode)?;
        }

        for (id, tab) in &self.elements.tabs {
            dom::set_class(tab, "active", id == view.mode)?;
        }
        if let Some(section) = &self.elements.download_section {
            dom::set_hidden(section, !view.result_visible)?;
        }
        if let Some(link) = &self.elements.download_link {
            match &view.download_url {
                Some(url) => link.set_href(url),
                None => link.remove_attribute("href")?,
            }
        }
        if let Some(title) = &self.elements.success_title {
            dom::set_text(title, view.success_title);
        }
        Ok(())
    }

    fn render_mode(
        self: &Rc<Self>,
        mode: &ModeElements,
        view: &ToolView,
        active: bool,
    ) -> Result<(), JsValue> {
        if let Some(section) = &mode.section {
            dom::set_class(section, "active", active && view.converter_visible)?;
            dom::set_hidden(section, active && !view.converter_visible)?;
        }

        dom::set_hidden(&mode.drop_zone, !view.drop_zone_visible)?;
        dom::set_class(&mode.drop_zone, "drag-over", view.drag_active)?;
        if let Some(prompt) = &mode.prompt {
            dom::set_text(prompt, &view.prompt);
        }

        if let Some(gallery) = &mode.gallery {
            dom::set_hidden(gallery, !view.gallery_visible)?;
        }
        if let Some(count) = &mode.count {
            dom::set_text(count, &view.count.to_string());
        }
        if let Some(grid) = &mode.grid {
            self.sync_cards(mode.kind, grid, &view.entries)?;
        }

        if let Some(options) = &mode.options {
            dom::set_hidden(options, !view.options_visible)?;
        }
        if let Some(el) = &mode.file_name {
            dom::set_text(el, view.file_name.as_deref().unwrap_or(""));
        }
        if let Some(el) = &mode.file_size {
            dom::set_text(el, view.file_size.as_deref().unwrap_or(""));
        }
        if let Some(img) = &mode.preview {
            match &view.preview {
                Some(url) => img.set_src(url),
                None => img.remove_attribute("src")?,
            }
        }

        for option in &view.options {
            for (name, input) in &mode.number_inputs {
                if *name == option.name && input.value() != option.value {
                    input.set_value(&option.value);
                }
            }
            for (name, radio) in &mode.radios {
                if *name == option.name {
                    radio.set_checked(radio.value() == option.value);
                }
            }
        }

        dom::set_class(&mode.submit, "disabled", !view.submit_enabled)?;
        dom::set_text(&mode.submit_label, &view.submit_label);
        Ok(())
    }

    fn sync_cards(
        self: &Rc<Self>,
        kind: ToolKind,
        grid: &Element,
        entries: &[EntryView],
    ) -> Result<(), JsValue> {
        let live: HashSet<EntryId> = entries.iter().map(|e| e.id).collect();
        let mut cards = self.cards.borrow_mut();

        // a card removed from inside one of its own listeners is freed by
        // wasm-bindgen once that listener returns
        cards.retain(|(tool, id), card| {
            let keep = *tool != kind || live.contains(id);
            if !keep {
                card.el.remove();
            }
            keep
        });

        for (index, entry) in entries.iter().enumerate() {
            let card = match cards.get(&(kind, entry.id)) {
                Some(card) => card.el.clone(),
                None => {
                    let card = self.create_card(kind, entry)?;
                    let el = card.el.clone();
                    cards.insert((kind, entry.id), card);
                    el
                }
            };
            if let Some(url) = &entry.preview {
                show_preview(&card, url, &entry.name)?;
            }
            dom::set_class(&card, "dragging", entry.dragging)?;
            if !entry.dragging {
                dom::set_class(&card, "over", false)?;
            }
            // only move cards that are out of place; moving the dragged card
            // during `dragstart` would abort the drag
            let current = grid.children().item(index as u32);
            if current.as_ref() != Some(&card) {
                let reference: Option<&Node> = current.as_ref().map(|el| el.as_ref());
                grid.insert_before(&card, reference)?;
            }
        }
        Ok(())
    }

    fn create_card(self: &Rc<Self>, kind: ToolKind, entry: &EntryView) -> Result<Card, JsValue> {
        let document = dom::document()?;
        let card: HtmlElement = document.create_element("div")?.dyn_into()?;
        card.set_class_name("image-card");
        card.set_draggable(true);
        card.set_attribute("data-entry-id", &entry.id.to_string())?;

        let label = document.create_element("div")?;
        label.set_class_name("card-label");
        let name = document.create_element("span")?;
        name.set_text_content(Some(&entry.name));
        label.append_child(&name)?;
        card.append_child(&label)?;

        let remove = document.create_element("button")?;
        remove.set_class_name("card-remove-btn");
        remove.set_text_content(Some("\u{00d7}"));
        card.append_child(&remove)?;

        let id = entry.id;
        let mut listeners = Vec::with_capacity(7);

        let binding = Rc::clone(self);
        listeners.push(attach(&remove, "click", move |event| {
            event.stop_propagation();
            binding.update(kind, |tool| tool.remove(id));
        })?);

        let binding = Rc::clone(self);
        listeners.push(attach(&card, "dragstart", move |event| {
            if let Some(dt) = event.dyn_ref::<DragEvent>().and_then(|e| e.data_transfer()) {
                dt.set_effect_allowed("move");
                // Firefox will not start a drag without data
                let _ = dt.set_data("text/plain", &id.to_string());
            }
            binding.update(kind, |tool| tool.begin_drag(id));
        })?);

        let binding = Rc::clone(self);
        listeners.push(attach(&card, "dragover", move |event| {
            event.prevent_default();
            if let Some(dt) = event.dyn_ref::<DragEvent>().and_then(|e| e.data_transfer()) {
                dt.set_drop_effect("move");
            }
            let moved = binding
                .page
                .borrow_mut()
                .tool_mut(kind)
                .map(|tool| tool.drag_over(id))
                .unwrap_or(false);
            if moved {
                binding.refresh();
            }
        })?);

        for (name, over) in [("dragenter", true), ("dragleave", false)] {
            listeners.push(attach(&card, name, move |event| {
                let target = event.current_target();
                if let Some(el) = target.and_then(|t| t.dyn_into::<Element>().ok()) {
                    let _ = dom::set_class(&el, "over", over);
                }
            })?);
        }

        for name in ["drop", "dragend"] {
            let binding = Rc::clone(self);
            listeners.push(attach(&card, name, move |event| {
                event.prevent_default();
                event.stop_propagation();
                binding.update(kind, |tool| tool.finish_drag());
            })?);
        }

        Ok(Card {
            el: card.into(),
            _listeners: listeners,
        })
    }
}

/// A rendered gallery card and the listeners bound to it
pub(crate) struct Card {
    pub(crate) el: Element,
    _listeners: Vec<Listener>,
}

/// Swap the name label for the thumbnail once it has been read
fn show_preview(card: &Element, url: &str, alt: &str) -> Result<(), JsValue> {
    if card.query_selector("img")?.is_some() {
        return Ok(());
    }
    let img = dom::document()?.create_element("img")?;
    img.set_attribute("src", url)?;
    img.set_attribute("alt", alt)?;
    card.prepend_with_node_1(&img)?;
    if let Some(label) = card.query_selector(".card-label")? {
        label.remove();
    }
    Ok(())
}
