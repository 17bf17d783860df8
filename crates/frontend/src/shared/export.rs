//! Выгрузка таблиц отчётов: CSV скачивается файлом, PDF печатается
//! через диалог браузера из скрытого iframe.

use contracts::shared::export::{ExportError, ExportTable, Exportable};
use gloo_timers::future::TimeoutFuture;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::{window, Blob, BlobPropertyBag, HtmlAnchorElement, HtmlIFrameElement, Url};

use crate::shared::date_utils::now_local_string;

fn alert(message: &str) {
    if let Some(w) = window() {
        let _ = w.alert_with_message(message);
    }
}

fn table_or_alert<T: Exportable>(data: &[T]) -> Option<ExportTable> {
    match ExportTable::from_rows(data) {
        Ok(table) => Some(table),
        Err(ExportError::NoData) => {
            alert(&ExportError::NoData.to_string());
            None
        }
    }
}

/// Скачать строки как `<file_name>.csv`
pub fn export_to_csv<T: Exportable>(data: &[T], file_name: &str) {
    if let Some(table) = table_or_alert(data) {
        let name = format!("{}.csv", file_name);
        if let Err(e) = download_text(&table.to_csv(), &name, "text/csv;charset=utf-8;") {
            log::error!("CSV export failed: {}", e);
        }
    }
}

/// Открыть диалог печати с таблицей; сохранение как `<file_name>.pdf`
pub fn export_to_pdf<T: Exportable>(data: &[T], title: &str, file_name: &str) {
    let Some(table) = table_or_alert(data) else {
        return;
    };
    let html = table.to_print_html(file_name, title, &now_local_string());
    if let Err(e) = print_html(html) {
        log::error!("PDF export failed: {}", e);
    }
}

fn download_text(content: &str, file_name: &str, mime: &str) -> Result<(), String> {
    let parts = js_sys::Array::new();
    parts.push(&wasm_bindgen::JsValue::from_str(content));

    let props = BlobPropertyBag::new();
    props.set_type(mime);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &props)
        .map_err(|e| format!("Failed to create blob: {:?}", e))?;

    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let document = window()
        .and_then(|w| w.document())
        .ok_or_else(|| "No document".to_string())?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into()
        .map_err(|_| "Element is not an anchor".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    let _ = anchor.set_attribute("style", "display: none");

    let body = document.body().ok_or_else(|| "No body".to_string())?;
    let _ = body.append_child(&anchor);
    anchor.click();
    let _ = body.remove_child(&anchor);
    let _ = Url::revoke_object_url(&url);

    log::info!("Exported {}", file_name);
    Ok(())
}

fn print_html(html: String) -> Result<(), String> {
    let document = window()
        .and_then(|w| w.document())
        .ok_or_else(|| "No document".to_string())?;
    let iframe: HtmlIFrameElement = document
        .create_element("iframe")
        .map_err(|e| format!("Failed to create iframe: {:?}", e))?
        .dyn_into()
        .map_err(|_| "Element is not an iframe".to_string())?;
    let _ = iframe.set_attribute(
        "style",
        "position: fixed; width: 0; height: 0; border: 0; visibility: hidden;",
    );
    iframe.set_srcdoc(&html);

    let body = document.body().ok_or_else(|| "No body".to_string())?;
    body.append_child(&iframe)
        .map_err(|e| format!("Failed to attach iframe: {:?}", e))?;

    spawn_local(async move {
        // srcdoc грузится асинхронно
        TimeoutFuture::new(300).await;
        if let Some(frame_window) = iframe.content_window() {
            let _ = frame_window.focus();
            let _ = frame_window.print();
        }
        // Диалог печати модальный; iframe убирается после его закрытия
        TimeoutFuture::new(1_000).await;
        iframe.remove();
    });
    Ok(())
}
