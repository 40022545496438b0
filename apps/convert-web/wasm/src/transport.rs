//! Multipart submission over `fetch`

use convert_core::{ConversionRequest, ConvertError, PartValue};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, Response};

/// Copy the request parts into a `FormData`, files first, in order.
pub fn form_data(request: &ConversionRequest<'_, File>) -> Result<FormData, JsValue> {
    let form = FormData::new()?;
    for part in &request.parts {
        match &part.value {
            PartValue::File(file) => {
                form.append_with_blob_and_filename(part.name, &file.handle, &file.meta.name)?
            }
            PartValue::Text(text) => form.append_with_str(part.name, text)?,
        }
    }
    Ok(form)
}

/// POST `form` to `url` and return the response body.
///
/// The body is returned whatever the HTTP status: endpoints describe their
/// failures in the JSON body and the controller decides what it means.
pub async fn post_form(url: &str, form: &FormData) -> Result<String, ConvertError> {
    let window = web_sys::window().ok_or_else(|| ConvertError::Transport("No window".into()))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_body(&JsValue::from(form.clone()));

    let request = Request::new_with_str_and_init(url, &opts).map_err(transport_error)?;
    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(transport_error)?;
    let response: Response = response.dyn_into().map_err(transport_error)?;

    let text = JsFuture::from(response.text().map_err(transport_error)?)
        .await
        .map_err(transport_error)?;
    text.as_string()
        .ok_or_else(|| ConvertError::Transport("Response body is not text".into()))
}

/// Best-effort message from a thrown JS value
pub fn js_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

fn transport_error(value: JsValue) -> ConvertError {
    ConvertError::Transport(js_message(&value))
}
