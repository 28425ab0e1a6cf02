use crate::core::{find_spot, Rect};
use crate::dom;
use crate::sched;
use rand::Rng;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

// Reveal timing, shared by both animation paths.
const FADE_IN_MS: f64 = 2000.0;
const HOLD_MS: f64 = 3000.0;
const FADE_OUT_MS: f64 = 3000.0;

/// Ghost messages: hidden elements revealed at random positions around the
/// artwork with a slow blur/scale fade. Uses the Web Animations API when
/// the browser has it, otherwise a CSS-transition fallback.
pub struct MessageRevealer {
    messages: Vec<web::HtmlElement>,
    artwork: web::HtmlElement,
    has_tweening: bool,
}

impl MessageRevealer {
    pub fn new(document: &web::Document, artwork: web::HtmlElement, has_tweening: bool) -> Self {
        let messages = dom::query_all_html(document, ".message");
        if messages.is_empty() {
            log::warn!("no message elements found");
        }
        Self {
            messages,
            artwork,
            has_tweening,
        }
    }

    pub fn reveal(&self) {
        let Some(message) = self.pick() else {
            return;
        };
        let (vw, vh) = dom::viewport_size();
        let artwork_rect = dom::element_rect(&self.artwork);
        let Some((x, y)) = find_spot(&mut rand::thread_rng(), vw, vh, artwork_rect) else {
            log::warn!("could not find suitable position for message");
            return;
        };
        dom::set_style(message, "left", &format!("{x:.0}px"));
        dom::set_style(message, "top", &format!("{y:.0}px"));

        if self.has_tweening {
            animate_reveal(message);
        } else {
            transition_reveal(message);
        }
    }

    fn pick(&self) -> Option<&web::HtmlElement> {
        if self.messages.is_empty() {
            return None;
        }
        let index = rand::thread_rng().gen_range(0..self.messages.len());
        self.messages.get(index)
    }
}

fn keyframe(opacity: f64, scale: f64, blur_px: f64, offset: f64) -> JsValue {
    let frame = js_sys::Object::new();
    _ = js_sys::Reflect::set(&frame, &"opacity".into(), &opacity.into());
    _ = js_sys::Reflect::set(&frame, &"transform".into(), &format!("scale({scale})").into());
    _ = js_sys::Reflect::set(&frame, &"filter".into(), &format!("blur({blur_px}px)").into());
    _ = js_sys::Reflect::set(&frame, &"offset".into(), &offset.into());
    frame.into()
}

/// Web Animations path. The API is duck-typed through `Reflect` so its
/// absence never breaks startup; callers only reach this when the
/// capability probe succeeded.
fn animate_reveal(el: &web::HtmlElement) {
    let total = FADE_IN_MS + HOLD_MS + FADE_OUT_MS;
    let frames = js_sys::Array::new();
    frames.push(&keyframe(0.0, 0.8, 10.0, 0.0));
    frames.push(&keyframe(1.0, 1.0, 0.0, FADE_IN_MS / total));
    frames.push(&keyframe(1.0, 1.0, 0.0, (FADE_IN_MS + HOLD_MS) / total));
    frames.push(&keyframe(0.0, 1.2, 15.0, 1.0));

    let options = js_sys::Object::new();
    _ = js_sys::Reflect::set(&options, &"duration".into(), &total.into());
    _ = js_sys::Reflect::set(&options, &"easing".into(), &"ease-in-out".into());
    _ = js_sys::Reflect::set(&options, &"fill".into(), &"forwards".into());

    let target: &JsValue = el.as_ref();
    match js_sys::Reflect::get(target, &"animate".into()) {
        Ok(f) => {
            let Ok(animate) = f.dyn_into::<js_sys::Function>() else {
                log::error!("animate is not callable");
                return;
            };
            if let Err(e) = animate.call2(target, &frames, &options) {
                log::error!("message animation error: {:?}", e);
            }
        }
        Err(e) => log::error!("animate lookup error: {:?}", e),
    }
}

/// CSS-transition fallback: jump to the hidden state, ease to visible on
/// the next tick, then fade back out after the hold.
fn transition_reveal(el: &web::HtmlElement) {
    dom::set_style(el, "transition", "all 2s ease-in-out");
    dom::set_style(el, "opacity", "0");
    dom::set_style(el, "transform", "translate(-50%, -50%) scale(0.8)");
    dom::set_style(el, "filter", "blur(10px)");

    let showing = el.clone();
    sched::run_after(30, move || {
        dom::set_style(&showing, "opacity", "1");
        dom::set_style(&showing, "transform", "translate(-50%, -50%) scale(1)");
        dom::set_style(&showing, "filter", "blur(0px)");

        let hiding = showing.clone();
        sched::run_after((FADE_IN_MS + HOLD_MS) as i32, move || {
            dom::set_style(&hiding, "opacity", "0");
            dom::set_style(&hiding, "transform", "translate(-50%, -50%) scale(1.2)");
            dom::set_style(&hiding, "filter", "blur(15px)");
        });
    });
}
