use crate::constants::{BANNER_FADE_MS, BANNER_VISIBLE_MS};
use crate::core::Rect;
use crate::sched;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn viewport_size() -> (f32, f32) {
    let Some(w) = web::window() else {
        return (0.0, 0.0);
    };
    let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (width as f32, height as f32)
}

#[inline]
pub fn get_html_by_id(document: &web::Document, element_id: &str) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(element_id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

#[inline]
pub fn query_html(document: &web::Document, selector: &str) -> Option<web::HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

pub fn query_all_html(document: &web::Document, selector: &str) -> Vec<web::HtmlElement> {
    let mut out = Vec::new();
    if let Ok(list) = document.query_selector_all(selector) {
        for i in 0..list.length() {
            if let Some(node) = list.item(i) {
                if let Ok(el) = node.dyn_into::<web::HtmlElement>() {
                    out.push(el);
                }
            }
        }
    }
    out
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

#[inline]
pub fn set_style(el: &web::HtmlElement, property: &str, value: &str) {
    _ = el.style().set_property(property, value);
}

/// Screen-space rect of an element, as the pure placement/focus math wants it.
pub fn element_rect(el: &web::HtmlElement) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect {
        left: r.left() as f32,
        top: r.top() as f32,
        width: r.width() as f32,
        height: r.height() as f32,
    }
}

/// Append a stylesheet rule block to the document head.
pub fn inject_style_rules(document: &web::Document, css: &str) {
    let Ok(style) = document.create_element("style") else {
        log::error!("failed to create style element");
        return;
    };
    style.set_text_content(Some(css));
    if let Some(head) = document.head() {
        _ = head.append_child(&style);
    }
}

/// Fixed-position warning banner that fades out after a few seconds. Used
/// for missing capabilities and failed initialization; never blocks.
pub fn show_error_banner(document: &web::Document, message: &str) {
    let Some(body) = document.body() else {
        return;
    };
    let Ok(el) = document.create_element("div") else {
        return;
    };
    let Ok(banner) = el.dyn_into::<web::HtmlElement>() else {
        return;
    };
    _ = banner.set_attribute(
        "style",
        "position: fixed; top: 20px; left: 50%; transform: translateX(-50%); \
         background: rgba(255, 0, 0, 0.8); color: white; padding: 10px 20px; \
         border-radius: 5px; z-index: 1000; font-family: Arial, sans-serif; \
         text-align: center; max-width: 80%;",
    );
    banner.set_text_content(Some(message));
    _ = body.append_child(&banner);

    let fading = banner.clone();
    sched::run_after(BANNER_VISIBLE_MS, move || {
        set_style(&fading, "transition", "opacity 1s");
        set_style(&fading, "opacity", "0");
        sched::run_after(BANNER_FADE_MS, move || fading.remove());
    });
}
