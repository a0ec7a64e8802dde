use dioxus::prelude::*;
use tracing::{info, warn};

use crate::core::{
    export::{build_csv, CsvExport},
    HistoryRecord,
};

#[derive(Clone, Debug, PartialEq)]
enum ExportStatus {
    Idle,
    Working,
    Done(String),
    Error(String),
}

/// "Export as CSV" action. An empty history makes the button a no-op.
#[component]
pub fn SegmentExport(history: Vec<HistoryRecord>) -> Element {
    let status = use_signal(|| ExportStatus::Idle);
    let busy = use_signal(|| false);
    let has_rows = !history.is_empty();
    let button_title = if has_rows {
        "Download the history log"
    } else {
        "No history to export yet"
    };

    let feedback = match &status() {
        ExportStatus::Idle => None,
        ExportStatus::Working => Some((
            "segment-export__meta".to_string(),
            "Preparing CSV…".to_string(),
        )),
        ExportStatus::Done(message) => Some((
            "segment-export__meta segment-export__meta--success".to_string(),
            message.clone(),
        )),
        ExportStatus::Error(err) => Some((
            "segment-export__meta segment-export__meta--error".to_string(),
            err.clone(),
        )),
    };

    let csv_handler = {
        let mut status_signal = status;
        let mut busy_signal = busy;
        move |_| {
            if busy_signal() {
                return;
            }
            let Some(export) = build_csv(&history) else {
                return;
            };
            busy_signal.set(true);
            status_signal.set(ExportStatus::Working);
            spawn(async move {
                let mut status_signal = status_signal;
                let mut busy_signal = busy_signal;
                match perform_csv_export(export).await {
                    Ok(message) => status_signal.set(ExportStatus::Done(message)),
                    Err(err) => {
                        warn!(error = %err, "csv export failed");
                        status_signal.set(ExportStatus::Error(err));
                    }
                }
                busy_signal.set(false);
            });
        }
    };

    rsx! {
        span { class: "segment-export",
            button {
                r#type: "button",
                class: "button button--export",
                disabled: busy() || !has_rows,
                title: "{button_title}",
                onclick: csv_handler,
                "Export as CSV"
            }
            if let Some((class_name, message)) = feedback {
                span { class: "{class_name}", "{message}" }
            }
        }
    }
}

async fn perform_csv_export(export: CsvExport) -> Result<String, String> {
    let filename = export.filename;
    let mime = export.mime;
    let rows = export.body.lines().count().saturating_sub(1);
    let delivery = download_bytes(filename, mime, export.into_bytes()).await?;
    info!(filename, rows, "csv exported");
    Ok(match delivery {
        Some(path) => format!("CSV saved to {path}"),
        None => "CSV download started".to_string(),
    })
}

async fn download_bytes(
    filename: &str,
    mime: &str,
    bytes: Vec<u8>,
) -> Result<Option<String>, String> {
    #[cfg(target_arch = "wasm32")]
    {
        browser_download(filename, mime, &bytes)?;
        Ok(None)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = mime;
        let path = write_export(&desktop_export_dir()?, filename, &bytes)?;
        Ok(Some(path.to_string_lossy().to_string()))
    }
}

/// Hand the bytes to the browser as a download through a detached anchor.
#[cfg(target_arch = "wasm32")]
fn browser_download(filename: &str, mime: &str, bytes: &[u8]) -> Result<(), String> {
    use wasm_bindgen::JsCast;
    use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes).buffer());
    let opts = BlobPropertyBag::new();
    opts.set_type(mime);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
        .map_err(|_| "Could not build the CSV blob".to_string())?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|_| "Could not create a download link".to_string())?;

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or("Document unavailable")?;
    let body = document.body().ok_or("Document has no body")?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|_| "Could not create a download link")?
        .dyn_into()
        .map_err(|_| "Download link is not an anchor")?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|_| "Could not hide the download link")?;
    body.append_child(&anchor)
        .map_err(|_| "Could not attach the download link")?;

    anchor.click();
    anchor.remove();
    Url::revoke_object_url(&url).map_err(|_| "Could not release the download link".to_string())
}

#[cfg(not(target_arch = "wasm32"))]
fn desktop_export_dir() -> Result<std::path::PathBuf, String> {
    let dirs = directories::ProjectDirs::from("com", "CleanRoom", "CleanRoom")
        .ok_or("Unable to determine export directory")?;
    Ok(dirs.data_dir().join("exports"))
}

#[cfg(not(target_arch = "wasm32"))]
fn write_export(
    dir: &std::path::Path,
    filename: &str,
    bytes: &[u8],
) -> Result<std::path::PathBuf, String> {
    std::fs::create_dir_all(dir)
        .map_err(|err| format!("Could not create {}: {err}", dir.display()))?;
    let path = dir.join(filename);
    std::fs::write(&path, bytes)
        .map_err(|err| format!("Could not write {}: {err}", path.display()))?;
    Ok(path)
}
