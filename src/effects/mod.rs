use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

mod bolt;
mod fog;

pub use bolt::BoltEffect;
pub use fog::FogEffect;

/// Per-frame contract shared by the interchangeable visual back-ends. The
/// director drives whichever instance currently occupies the active slot.
pub trait VisualEffect {
    fn update(&mut self, energy: f32, hue: f32);
    fn resize(&mut self, width: f32, height: f32);
    fn cleanup(&mut self);
}

/// The director's swappable effect slot.
pub type ActiveEffect = Rc<RefCell<Option<Box<dyn VisualEffect>>>>;

/// Optional-capability snapshot, resolved once at startup and injected into
/// the components that degrade without them.
#[derive(Clone, Copy, Debug, Default)]
pub struct CapabilitySet {
    pub has_audio: bool,
    pub has_particle_lib: bool,
    pub has_tweening: bool,
}

pub fn detect_capabilities(document: &web::Document) -> CapabilitySet {
    let Some(window) = web::window() else {
        return CapabilitySet::default();
    };
    let win: &wasm_bindgen::JsValue = window.as_ref();

    let has_audio = js_sys::Reflect::has(win, &"AudioContext".into()).unwrap_or(false)
        || js_sys::Reflect::has(win, &"webkitAudioContext".into()).unwrap_or(false);

    let has_particle_lib = js_sys::Reflect::get(win, &"navigator".into())
        .ok()
        .map(|nav| {
            js_sys::Reflect::get(&nav, &"gpu".into())
                .map(|gpu| !gpu.is_undefined() && !gpu.is_null())
                .unwrap_or(false)
        })
        .unwrap_or(false);

    let has_tweening = document
        .body()
        .map(|body| {
            let el: &wasm_bindgen::JsValue = body.as_ref();
            js_sys::Reflect::has(el, &"animate".into()).unwrap_or(false)
        })
        .unwrap_or(false);

    CapabilitySet {
        has_audio,
        has_particle_lib,
        has_tweening,
    }
}
