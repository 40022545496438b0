//! DOM event wiring for a mounted page
//!
//! Page-level listeners are forgotten closures holding an `Rc<Binding>`, so a
//! mounted page lives as long as the document. Gallery card listeners are
//! owned by their card and dropped with it. No `RefCell` borrow is held
//! across an `.await`, an `alert` or a render.

use crate::dom::{self, ModeElements, PageElements};
use crate::files;
use crate::render::Card;
use crate::transport;
use convert_core::{
    Completion, ConvertError, DragPhase, EntryId, PageController, PageKind, SiteConfig, ToolKind,
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Event, EventTarget, File, HtmlInputElement};

const DRAG_EVENTS: [&str; 5] = ["dragenter", "dragover", "dragleave", "drop", "dragend"];

pub struct Binding {
    pub(crate) page: RefCell<PageController<File>>,
    pub(crate) elements: PageElements,
    /// Gallery cards by entry, reused across renders. Dropping a card frees
    /// its listeners.
    pub(crate) cards: RefCell<HashMap<(ToolKind, EntryId), Card>>,
}

pub(crate) type Listener = Closure<dyn FnMut(Event)>;

/// Attach `handler` to `target`; it stays registered while the returned
/// closure is alive
pub(crate) fn attach<F>(target: &EventTarget, event: &str, handler: F) -> Result<Listener, JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Listener::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    Ok(closure)
}

/// Attach `handler` to `target` for the lifetime of the page
pub(crate) fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    attach(target, event, handler)?.forget();
    Ok(())
}

pub(crate) fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

pub(crate) fn log_error(context: &str, err: &JsValue) {
    web_sys::console::error_1(&format!("{}: {}", context, transport::js_message(err)).into());
}

impl Binding {
    pub fn mount(kind: PageKind, hash: &str, config: &SiteConfig) -> Result<Rc<Self>, JsValue> {
        let document = dom::document()?;
        let elements = PageElements::locate(&document, kind)?;
        let binding = Rc::new(Self {
            page: RefCell::new(PageController::new(kind, hash, config)),
            elements,
            cards: RefCell::new(HashMap::new()),
        });
        binding.wire()?;
        binding.render()?;
        web_sys::console::log_1(
            &format!("Mounted {} ({})", kind.id(), binding.page.borrow().mode().id()).into(),
        );
        Ok(binding)
    }

    fn wire(self: &Rc<Self>) -> Result<(), JsValue> {
        for mode in &self.elements.modes {
            self.wire_mode(mode)?;
        }

        for (id, tab) in &self.elements.tabs {
            let binding = Rc::clone(self);
            let id = id.clone();
            listen(tab, "click", move |_| binding.switch_mode(&id))?;
        }

        if let Some(button) = &self.elements.start_over {
            let binding = Rc::clone(self);
            listen(button, "click", move |event| {
                event.prevent_default();
                binding.start_over();
            })?;
        }
        Ok(())
    }

    fn wire_mode(self: &Rc<Self>, mode: &ModeElements) -> Result<(), JsValue> {
        let kind = mode.kind;

        for name in DRAG_EVENTS {
            let binding = Rc::clone(self);
            listen(&mode.drop_zone, name, move |event| {
                event.prevent_default();
                event.stop_propagation();
                binding.on_zone_drag(kind, &event);
            })?;
        }

        let input = mode.file_input.clone();
        listen(&mode.drop_zone, "click", move |_| input.click())?;

        let binding = Rc::clone(self);
        listen(&mode.file_input, "change", move |event| {
            let Some(input) = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            else {
                return;
            };
            let selected = files::from_file_list(input.files());
            // picking the same file twice must fire `change` again
            input.set_value("");
            binding.accept(kind, selected);
        })?;

        let binding = Rc::clone(self);
        listen(&mode.submit, "click", move |event| {
            event.prevent_default();
            binding.submit(kind);
        })?;

        for button in mode.remove_all.iter().chain(mode.remove_file.iter()) {
            let binding = Rc::clone(self);
            listen(button, "click", move |event| {
                event.stop_propagation();
                binding.update(kind, |tool| tool.remove_all());
            })?;
        }

        for (name, input) in &mode.number_inputs {
            let binding = Rc::clone(self);
            let (name, source) = (*name, input.clone());
            listen(input, "input", move |_| {
                binding.set_option(kind, name, &source.value());
            })?;
        }

        for (name, radio) in &mode.radios {
            let binding = Rc::clone(self);
            let (name, source) = (*name, radio.clone());
            listen(radio, "change", move |_| {
                if source.checked() {
                    binding.set_option(kind, name, &source.value());
                }
            })?;
        }
        Ok(())
    }

    /// Apply `f` to one tool's controller, then re-render
    pub(crate) fn update<R>(
        self: &Rc<Self>,
        kind: ToolKind,
        f: impl FnOnce(&mut convert_core::ToolController<File>) -> R,
    ) -> Option<R> {
        let result = self.page.borrow_mut().tool_mut(kind).map(f);
        self.refresh();
        result
    }

    fn on_zone_drag(self: &Rc<Self>, kind: ToolKind, event: &Event) {
        let Some(phase) = DragPhase::from_event_type(&event.type_()) else {
            return;
        };
        if let Some(tool) = self.page.borrow_mut().tool_mut(kind) {
            tool.on_drag(phase);
        }

        if phase == DragPhase::Drop {
            let dropped = event
                .dyn_ref::<DragEvent>()
                .and_then(|e| e.data_transfer())
                .map(|dt| files::from_file_list(dt.files()))
                .unwrap_or_default();
            self.accept(kind, dropped);
        } else {
            self.refresh();
        }
    }

    pub(crate) fn accept(
        self: &Rc<Self>,
        kind: ToolKind,
        selected: Vec<convert_core::SelectedFile<File>>,
    ) {
        let result = self
            .page
            .borrow_mut()
            .tool_mut(kind)
            .map(|tool| tool.accept_files(selected));

        let rejection = match result {
            Some(Ok(ids)) => {
                for id in ids {
                    self.load_preview(kind, id);
                }
                None
            }
            Some(Err(e)) => Some(e.to_string()),
            None => None,
        };
        // the alert blocks; clear the drag highlight first
        self.refresh();
        if let Some(message) = rejection {
            alert(&message);
        }
    }

    fn load_preview(self: &Rc<Self>, kind: ToolKind, id: EntryId) {
        let prepared = {
            let page = self.page.borrow();
            let prepared = page.tool(kind).and_then(|tool| {
                let ticket = tool.request_preview(id)?;
                let file = tool.gallery().get(id)?.file.handle.clone();
                Some((ticket, file))
            });
            prepared
        };
        let Some((ticket, file)) = prepared else {
            return;
        };

        let binding = Rc::clone(self);
        let started = files::read_data_url(&file, move |data_url| {
            let applied = binding
                .page
                .borrow_mut()
                .tool_mut(kind)
                .map(|tool| tool.preview_ready(ticket, data_url))
                .unwrap_or(false);
            if applied {
                binding.refresh();
            }
        });
        if let Err(e) = started {
            log_error("Preview failed", &e);
        }
    }

    fn set_option(self: &Rc<Self>, kind: ToolKind, name: &str, value: &str) {
        if let Some(Err(e)) = self.update(kind, |tool| tool.set_option(name, value)) {
            web_sys::console::warn_1(&e.to_string().into());
        }
    }

    fn submit(self: &Rc<Self>, kind: ToolKind) {
        let prepared = {
            let mut page = self.page.borrow_mut();
            let Some(tool) = page.tool_mut(kind) else {
                return;
            };
            // the ticket borrows the controller; keep only owned parts
            let prepared = match tool.submit() {
                Ok(Some(ticket)) => Ok(Some((
                    ticket.generation,
                    ticket.request.url.clone(),
                    transport::form_data(&ticket.request),
                ))),
                Ok(None) => Ok(None),
                Err(e) => Err(e),
            };
            prepared
        };

        let (generation, url, form) = match prepared {
            Ok(Some(parts)) => parts,
            Ok(None) => return,
            Err(e) => {
                self.refresh();
                alert(&e.to_string());
                return;
            }
        };
        self.refresh();

        let binding = Rc::clone(self);
        wasm_bindgen_futures::spawn_local(async move {
            let body = match form {
                Ok(form) => transport::post_form(&url, &form).await,
                Err(e) => Err(ConvertError::Transport(transport::js_message(&e))),
            };
            let completion = binding
                .page
                .borrow_mut()
                .tool_mut(kind)
                .map(|tool| tool.complete(generation, body));
            binding.refresh();
            if let Some(Completion::Failed { alert: message }) = completion {
                alert(&message);
            }
        });
    }

    pub(crate) fn switch_mode(self: &Rc<Self>, id: &str) {
        let result = self.page.borrow_mut().switch_mode(id);
        if let Err(e) = result {
            web_sys::console::warn_1(&e.to_string().into());
        }
        self.refresh();
    }

    pub(crate) fn start_over(self: &Rc<Self>) {
        self.page.borrow_mut().start_over();
        self.refresh();
    }

    /// Render, logging instead of propagating DOM errors
    pub(crate) fn refresh(self: &Rc<Self>) {
        if let Err(e) = self.render() {
            log_error("Render failed", &e);
        }
    }
}
