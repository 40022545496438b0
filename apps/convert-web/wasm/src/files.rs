//! Browser `File` handles and thumbnail reads

use convert_core::{FileMeta, SelectedFile};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{File, FileList, FileReader};

pub fn meta(file: &File) -> FileMeta {
    FileMeta::new(file.name(), file.type_(), file.size() as u64)
}

/// Files from a picker or a drop, in the order the browser lists them
pub fn from_file_list(list: Option<FileList>) -> Vec<SelectedFile<File>> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|file| SelectedFile::new(meta(&file), file))
        .collect()
}

/// Read `file` as a data URL and hand it to `on_done` once loaded.
/// Failed reads are dropped silently; the card keeps its placeholder.
pub fn read_data_url<F>(file: &File, on_done: F) -> Result<(), JsValue>
where
    F: FnOnce(String) + 'static,
{
    let reader = FileReader::new()?;
    let reader_clone = reader.clone();

    let onload = Closure::once(Box::new(move |_event: web_sys::Event| {
        if let Some(url) = reader_clone.result().ok().and_then(|r| r.as_string()) {
            on_done(url);
        }
    }) as Box<dyn FnOnce(_)>);
    reader.set_onload(Some(onload.as_ref().unchecked_ref()));
    onload.forget();

    reader.read_as_data_url(file)
}
