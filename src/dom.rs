use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

#[inline]
pub fn set_canvas_cursor(canvas: &web::HtmlCanvasElement, cursor: &str) {
    _ = canvas.style().set_property("cursor", cursor);
}

/// Create a fixed-position button overlaid on the render surface.
pub fn create_overlay_button(
    document: &web::Document,
    element_id: &str,
    label: &str,
    top_px: i32,
    left_px: i32,
) -> Result<(), JsValue> {
    let button: web::HtmlElement = document.create_element("button")?.dyn_into()?;
    button.set_id(element_id);
    button.set_text_content(Some(label));
    let style = button.style();
    _ = style.set_property("position", "absolute");
    _ = style.set_property("top", &format!("{top_px}px"));
    _ = style.set_property("left", &format!("{left_px}px"));
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("no body"))?;
    body.append_child(&button)?;
    Ok(())
}
