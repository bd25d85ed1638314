use dioxus::prelude::*;

use crate::core::{export, filters};
use crate::session::{use_dataset, use_filters};

#[derive(Clone, Debug, PartialEq)]
enum ExportStatus {
    Idle,
    Working(&'static str),
    Done(String),
    Error(String),
}

/// Download/copy actions for the current filtered view. The payload is
/// rebuilt from the live filter state at click time, so what downloads is
/// exactly what the dashboard shows.
#[component]
pub fn ExportPanel() -> Element {
    let dataset = use_dataset();
    let filters_signal = use_filters();
    let status = use_signal(|| ExportStatus::Idle);
    let busy = use_signal(|| false);

    let feedback = match &status() {
        ExportStatus::Idle => None,
        ExportStatus::Working(label) => {
            Some(("sidebar__export-meta".to_string(), format!("{label}…")))
        }
        ExportStatus::Done(message) => Some((
            "sidebar__export-meta sidebar__export-meta--success".to_string(),
            message.clone(),
        )),
        ExportStatus::Error(err) => Some((
            "sidebar__export-meta sidebar__export-meta--error".to_string(),
            format!("Export failed: {err}"),
        )),
    };

    let csv_handler = {
        let mut status_signal = status;
        let mut busy_signal = busy;
        move |_| {
            if busy_signal() {
                return;
            }
            busy_signal.set(true);
            status_signal.set(ExportStatus::Working("Preparing CSV"));

            let payload = match &dataset().0 {
                Ok(data) => {
                    let view = filters::apply(data, &filters_signal());
                    Ok(export::view_to_csv(&view).into_bytes())
                }
                Err(err) => Err(err.to_string()),
            };

            run_delivery(payload, "csv", "text/csv", false, status_signal, busy_signal);
        }
    };

    let json_handler = {
        let mut status_signal = status;
        let mut busy_signal = busy;
        move |_| {
            if busy_signal() {
                return;
            }
            busy_signal.set(true);
            status_signal.set(ExportStatus::Working("Preparing JSON"));

            let payload = match &dataset().0 {
                Ok(data) => {
                    let view = filters::apply(data, &filters_signal());
                    export::view_to_json(&view)
                        .map(String::into_bytes)
                        .map_err(|err| err.to_string())
                }
                Err(err) => Err(err.to_string()),
            };

            run_delivery(payload, "json", "application/json", true, status_signal, busy_signal);
        }
    };

    rsx! {
        section { class: "sidebar__section sidebar__export",
            h2 { class: "sidebar__heading", "Export Data" }
            p { class: "sidebar__summary", "Download the filtered table for deeper analysis." }
            div { class: "sidebar__export-actions",
                button {
                    r#type: "button",
                    class: "button button--primary",
                    disabled: busy(),
                    onclick: csv_handler,
                    "Download filtered data as CSV"
                }
                button {
                    r#type: "button",
                    class: "button",
                    disabled: busy(),
                    onclick: json_handler,
                    "Export JSON"
                }
            }
            if let Some((class_name, message)) = feedback {
                p { class: "{class_name}", "{message}" }
            }
        }
    }
}

/// Ship the payload through the platform delivery path and record the
/// outcome. JSON also lands on the clipboard, CSV is download-only.
fn run_delivery(
    payload: Result<Vec<u8>, String>,
    extension: &'static str,
    mime: &'static str,
    copy: bool,
    mut status_signal: Signal<ExportStatus>,
    mut busy_signal: Signal<bool>,
) {
    let mut finish = move |outcome: Result<String, String>| {
        match outcome {
            Ok(message) => status_signal.set(ExportStatus::Done(message)),
            Err(err) => status_signal.set(ExportStatus::Error(err)),
        }
        busy_signal.set(false);
    };

    match payload {
        Err(err) => finish(Err(err)),
        Ok(bytes) => {
            let task = async move {
                if copy {
                    if let Ok(text) = String::from_utf8(bytes.clone()) {
                        copy_to_clipboard(text).await?;
                    }
                }
                let filename = export::export_filename(extension);
                let delivery = download_bytes(&filename, mime, bytes).await?;
                Ok(match delivery {
                    Some(path) => format!("Saved to {path}"),
                    None => "Download started".to_string(),
                })
            };

            #[cfg(target_arch = "wasm32")]
            {
                wasm_bindgen_futures::spawn_local(async move {
                    finish(task.await);
                });
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                finish(futures::executor::block_on(task));
            }
        }
    }
}

async fn copy_to_clipboard(payload: String) -> Result<(), String> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;

        let window = web_sys::window().ok_or("window unavailable")?;
        let document = window.document().ok_or("document unavailable")?;
        let body = document.body().ok_or("missing body")?;

        let textarea = document
            .create_element("textarea")
            .map_err(|_| "Unable to create textarea")?
            .dyn_into::<web_sys::HtmlTextAreaElement>()
            .map_err(|_| "Textarea cast failed")?;
        textarea.set_value(&payload);
        let style = textarea.style();
        style.set_property("position", "fixed").ok();
        style.set_property("top", "0").ok();
        style.set_property("left", "0").ok();
        style.set_property("opacity", "0").ok();

        body.append_child(&textarea).ok();
        textarea.select();
        if !document.exec_command("copy").unwrap_or(false) {
            textarea.remove();
            return Err("Clipboard copy blocked".into());
        }
        textarea.remove();
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use arboard::Clipboard;

        let mut clipboard = Clipboard::new().map_err(|err| err.to_string())?;
        clipboard.set_text(payload).map_err(|err| err.to_string())
    }
}

async fn download_bytes(
    filename: &str,
    mime: &str,
    bytes: Vec<u8>,
) -> Result<Option<String>, String> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

        let array = js_sys::Uint8Array::from(bytes.as_slice());
        let parts = js_sys::Array::new();
        parts.push(&array.buffer());

        let opts = BlobPropertyBag::new();
        opts.set_type(mime);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
            .map_err(|_| "Failed to create blob".to_string())?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|_| "Unable to create download".to_string())?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("Document unavailable")?;
        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|_| "Unable to create anchor")?
            .dyn_into()
            .map_err(|_| "Anchor cast failed")?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.style().set_property("display", "none").ok();

        document
            .body()
            .ok_or("Missing body")?
            .append_child(&anchor)
            .ok();
        anchor.click();
        anchor.remove();
        Url::revoke_object_url(&url).ok();

        Ok(None)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::fs;
        use std::io::Write;

        let _ = mime;
        let dir = desktop_export_dir()?;
        fs::create_dir_all(&dir).map_err(|err| err.to_string())?;
        let path = dir.join(filename);
        let mut file = fs::File::create(&path).map_err(|err| err.to_string())?;
        file.write_all(&bytes).map_err(|err| err.to_string())?;
        Ok(Some(path.to_string_lossy().to_string()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn desktop_export_dir() -> Result<std::path::PathBuf, String> {
    let dirs = directories::ProjectDirs::from("com", "Cartridge", "Cartridge")
        .ok_or("Unable to determine export directory")?;
    Ok(dirs.data_dir().join("exports"))
}
