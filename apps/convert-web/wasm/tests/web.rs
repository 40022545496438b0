//! Browser tests, run with `wasm-pack test --headless --chrome`

#![cfg(target_arch = "wasm32")]

use convert_core::{FileMeta, PageController, PageKind, SiteConfig, ToolKind};
use convert_wasm::{dom, files, format_bytes, get_version, mount_page, transport, ConvertPage};
use js_sys::{Function, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{
    DataTransfer, DragEvent, DragEventInit, Element, Event, File, HtmlElement, HtmlInputElement,
};

wasm_bindgen_test_configure!(run_in_browser);

fn file_of(name: &str, mime: &str) -> File {
    let parts = js_sys::Array::of1(&JsValue::from_str("%PDF-1.4"));
    let bag = web_sys::FilePropertyBag::new();
    bag.set_type(mime);
    File::new_with_str_sequence_and_options(&parts, name, &bag).unwrap()
}

fn pdf_file(name: &str) -> File {
    file_of(name, "application/pdf")
}

fn element(id: &str) -> Element {
    dom::document().unwrap().get_element_by_id(id).unwrap()
}

fn click(id: &str) {
    element(id).dyn_into::<HtmlElement>().unwrap().click();
}

fn text(id: &str) -> String {
    element(id).text_content().unwrap_or_default()
}

fn has_class(id: &str, class: &str) -> bool {
    element(id).class_list().contains(class)
}

fn transfer(files: &[File]) -> DataTransfer {
    let dt = DataTransfer::new().unwrap();
    for file in files {
        dt.items().add_with_file(file).unwrap();
    }
    dt
}

fn drag_event(kind: &str, files: &[File]) -> DragEvent {
    let init = DragEventInit::new();
    init.set_data_transfer(Some(&transfer(files)));
    DragEvent::new_with_event_init_dict(kind, &init).unwrap()
}

fn drop_files(files: &[File]) {
    let zone = element("merge-pdf-drop-zone");
    zone.dispatch_event(&drag_event("dragenter", &[])).unwrap();
    zone.dispatch_event(&drag_event("drop", files)).unwrap();
}

fn cards() -> Vec<Element> {
    let grid = element("merge-pdf-gallery-grid").children();
    (0..grid.length()).filter_map(|i| grid.item(i)).collect()
}

/// `data-entry-id` of the grid children, in DOM order
fn dom_order() -> Vec<String> {
    cards()
        .iter()
        .filter_map(|card| card.get_attribute("data-entry-id"))
        .collect()
}

fn card_names() -> Vec<String> {
    cards()
        .iter()
        .filter_map(|card| card.query_selector("span").unwrap())
        .filter_map(|span| span.text_content())
        .collect()
}

/// Entry ids of the active tool as the controller holds them
fn view_order(page: &ConvertPage) -> Vec<String> {
    let view = page.view().unwrap();
    let tools = Reflect::get(&view, &"tools".into()).unwrap();
    let tool = Reflect::get_u32(&tools, 0).unwrap();
    let entries: js_sys::Array = Reflect::get(&tool, &"entries".into())
        .unwrap()
        .dyn_into()
        .unwrap();
    entries
        .iter()
        .map(|e| {
            let id = Reflect::get(&e, &"id".into()).unwrap().as_f64().unwrap();
            (id as u64).to_string()
        })
        .collect()
}

/// Replace `window.fetch` with one answering `body`, and record alerts as
/// `message|drag-over state|submit label` at the moment they are raised
fn install_server(body: &str) {
    let window = web_sys::window().unwrap();
    let fetch = Function::new_with_args(
        "",
        &format!("return Promise.resolve(new Response('{}'));", body),
    );
    Reflect::set(&window, &"fetch".into(), &fetch).unwrap();

    let alert = Function::new_with_args(
        "m",
        "const over = document.querySelector('.drag-over') ? 'over' : '';\n\
         const label = document.querySelector('#merge-pdf-submit span').textContent;\n\
         (window.__alerts = window.__alerts || []).push(m + '|' + over + '|' + label);",
    );
    Reflect::set(&window, &"alert".into(), &alert).unwrap();
    Reflect::set(&window, &"__alerts".into(), &js_sys::Array::new()).unwrap();
}

fn alerts() -> Vec<String> {
    let window = web_sys::window().unwrap();
    let list: js_sys::Array = Reflect::get(&window, &"__alerts".into())
        .unwrap()
        .dyn_into()
        .unwrap();
    list.iter().filter_map(|v| v.as_string()).collect()
}

/// Let pending promises and the submission task finish
async fn settle() {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, 50)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

/// Minimal merge page markup
fn install_merge_page() {
    let document = dom::document().unwrap();
    let body = document.body().unwrap();
    body.set_inner_html(
        r#"
        <div id="merge-pdf" class="converter-card active">
          <div id="merge-pdf-drop-zone"><h3></h3></div>
          <input type="file" id="merge-pdf-file-input" multiple>
          <div id="merge-pdf-gallery" class="hidden">
            <span id="merge-pdf-count">0</span>
            <button id="merge-pdf-remove-all"></button>
            <div id="merge-pdf-gallery-grid"></div>
          </div>
          <button id="merge-pdf-submit" class="disabled"><span>Merge PDFs</span></button>
        </div>
        <div id="download-section" class="hidden">
          <h2 id="success-title"></h2>
          <a id="download-link"></a>
          <button id="start-over"></button>
        </div>
        "#,
    );
}

#[wasm_bindgen_test]
fn test_version() {
    assert!(!get_version().is_empty());
}

#[wasm_bindgen_test]
fn test_format_bytes_export() {
    assert_eq!(format_bytes(1536.0), "1.5 KB");
    assert_eq!(format_bytes(-1.0), "0 Bytes");
}

#[wasm_bindgen_test]
fn test_file_meta_from_browser_file() {
    let file = pdf_file("a.pdf");
    assert_eq!(files::meta(&file), FileMeta::new("a.pdf", "application/pdf", 8));
}

#[wasm_bindgen_test]
fn test_form_data_keeps_file_order() {
    let mut page: PageController<File> =
        PageController::new(PageKind::MergePdf, "", &SiteConfig::default());
    let selected = ["one.pdf", "two.pdf"]
        .iter()
        .map(|n| {
            let f = pdf_file(n);
            convert_core::SelectedFile::new(files::meta(&f), f)
        })
        .collect();
    page.active_mut().accept_files(selected).unwrap();

    let ticket = page.active_mut().submit().unwrap().unwrap();
    let form = transport::form_data(&ticket.request).unwrap();
    let parts = form.get_all("files[]");
    assert_eq!(parts.length(), 2);
    let first: File = parts.get(0).dyn_into().unwrap();
    assert_eq!(first.name(), "one.pdf");
}

#[wasm_bindgen_test]
fn test_mount_renders_initial_view() {
    install_merge_page();
    let page = mount_page("merge-pdf").unwrap();
    assert_eq!(page.mode(), ToolKind::MergePdf.id());
    assert!(!page.is_tabbed());

    let document = dom::document().unwrap();
    let submit: HtmlElement = document
        .get_element_by_id("merge-pdf-submit")
        .unwrap()
        .dyn_into()
        .unwrap();
    assert!(submit.class_list().contains("disabled"));
    let gallery = document.get_element_by_id("merge-pdf-gallery").unwrap();
    assert!(gallery.class_list().contains("hidden"));
    let section = document.get_element_by_id("download-section").unwrap();
    assert!(section.class_list().contains("hidden"));
}

#[wasm_bindgen_test]
fn test_mount_unknown_page_fails() {
    assert!(mount_page("split-pdf").is_err());
}

#[wasm_bindgen_test]
fn test_dom_order_follows_drag_reorder() {
    install_merge_page();
    let page = mount_page("merge-pdf").unwrap();
    drop_files(&[pdf_file("one.pdf"), pdf_file("two.pdf"), pdf_file("three.pdf")]);

    assert_eq!(text("merge-pdf-count"), "3");
    assert!(!has_class("merge-pdf-gallery", "hidden"));
    assert!(!has_class("merge-pdf-drop-zone", "drag-over"));
    assert_eq!(card_names(), vec!["one.pdf", "two.pdf", "three.pdf"]);
    assert_eq!(dom_order(), view_order(&page));

    // drag "three" over "one": moving left lands before it
    let grid = cards();
    grid[2].dispatch_event(&Event::new("dragstart").unwrap()).unwrap();
    assert!(grid[2].class_list().contains("dragging"));
    grid[0].dispatch_event(&Event::new("dragover").unwrap()).unwrap();
    grid[0].dispatch_event(&Event::new("drop").unwrap()).unwrap();

    assert_eq!(card_names(), vec!["three.pdf", "one.pdf", "two.pdf"]);
    assert_eq!(dom_order(), view_order(&page));
    assert!(cards().iter().all(|c| !c.class_list().contains("dragging")));
}

#[wasm_bindgen_test]
fn test_card_removal_updates_count() {
    install_merge_page();
    let page = mount_page("merge-pdf").unwrap();
    drop_files(&[pdf_file("a.pdf"), pdf_file("b.pdf"), pdf_file("c.pdf")]);

    let remove: HtmlElement = cards()[1]
        .query_selector(".card-remove-btn")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();
    remove.click();

    assert_eq!(text("merge-pdf-count"), "2");
    assert_eq!(card_names(), vec!["a.pdf", "c.pdf"]);
    assert_eq!(dom_order(), view_order(&page));

    click("merge-pdf-remove-all");
    assert!(cards().is_empty());
    assert!(has_class("merge-pdf-gallery", "hidden"));
    assert!(has_class("merge-pdf-submit", "disabled"));
}

#[wasm_bindgen_test]
fn test_picker_change_resets_input() {
    install_merge_page();
    let _page = mount_page("merge-pdf").unwrap();
    let input: HtmlInputElement = element("merge-pdf-file-input").dyn_into().unwrap();

    input.set_files(Some(&transfer(&[pdf_file("a.pdf")]).files()));
    input.dispatch_event(&Event::new("change").unwrap()).unwrap();

    assert_eq!(text("merge-pdf-count"), "1");
    assert_eq!(input.value(), "");
    assert_eq!(input.files().map(|f| f.length()), Some(0));
}

#[wasm_bindgen_test]
fn test_rejected_drop_alerts_after_highlight_clears() {
    install_merge_page();
    install_server("{}");
    let _page = mount_page("merge-pdf").unwrap();

    drop_files(&[file_of("cat.jpg", "image/jpeg")]);

    assert_eq!(alerts(), vec!["Please upload PDF files only.||Merge PDFs"]);
    assert!(cards().is_empty());
}

#[wasm_bindgen_test]
async fn test_success_shows_download_link() {
    install_merge_page();
    install_server(r#"{"success":true,"download_url":"/files/out.pdf"}"#);
    let _page = mount_page("merge-pdf").unwrap();
    drop_files(&[pdf_file("a.pdf"), pdf_file("b.pdf")]);

    click("merge-pdf-submit");
    assert_eq!(text("merge-pdf-submit"), "Merging...");
    settle().await;

    assert!(!has_class("download-section", "hidden"));
    assert_eq!(
        element("download-link").get_attribute("href").as_deref(),
        Some("/files/out.pdf")
    );
    assert_eq!(text("success-title"), "PDFs Merged!");
    assert!(alerts().is_empty());

    click("start-over");
    assert!(has_class("download-section", "hidden"));
    assert!(element("download-link").get_attribute("href").is_none());
    assert!(cards().is_empty());
    assert_eq!(text("merge-pdf-submit"), "Merge PDFs");
}

#[wasm_bindgen_test]
async fn test_failure_restores_label_before_alert() {
    install_merge_page();
    install_server(r#"{"success":false,"error":"corrupt file"}"#);
    let _page = mount_page("merge-pdf").unwrap();
    drop_files(&[pdf_file("a.pdf")]);

    click("merge-pdf-submit");
    settle().await;

    assert_eq!(alerts(), vec!["Error: corrupt file||Merge PDFs"]);
    assert!(has_class("download-section", "hidden"));
    assert!(!has_class("merge-pdf-submit", "disabled"));
    assert_eq!(card_names(), vec!["a.pdf"]);
}
