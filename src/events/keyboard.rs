use crate::effects::{ActiveEffect, BoltEffect, CapabilitySet, FogEffect, VisualEffect};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EffectKind {
    Bolt,
    Fog,
}

#[derive(Clone)]
pub struct SwapWiring {
    pub document: web::Document,
    pub album_cover: web::HtmlElement,
    pub caps: CapabilitySet,
    pub effect: ActiveEffect,
    pub active_kind: Rc<Cell<EffectKind>>,
}

/// `v` swaps the active back-end between bolts and fog. The director loop
/// never changes; only the slot contents do.
pub fn wire_effect_swap(w: SwapWiring) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        if ev.key() != "v" && ev.key() != "V" {
            return;
        }
        swap_effect(&w);
    }) as Box<dyn FnMut(web::KeyboardEvent)>);
    if let Some(window) = web::window() {
        let _ = window
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn swap_effect(w: &SwapWiring) {
    // Nothing to swap until the first play constructed a back-end.
    if w.effect.borrow().is_none() {
        return;
    }
    match w.active_kind.get() {
        EffectKind::Bolt => {
            if !w.caps.has_particle_lib {
                log::warn!("WebGPU unavailable; keeping energy effect");
                return;
            }
            if let Some(mut old) = w.effect.borrow_mut().take() {
                old.cleanup();
            }
            w.active_kind.set(EffectKind::Fog);
            let w = w.clone();
            spawn_local(async move {
                match FogEffect::new(&w.document, &w.album_cover).await {
                    Some(fog) => {
                        *w.effect.borrow_mut() = Some(Box::new(fog) as Box<dyn VisualEffect>);
                        log::info!("switched to fog effect");
                    }
                    None => {
                        log::error!("fog effect init failed; reverting to energy effect");
                        w.active_kind.set(EffectKind::Bolt);
                        if let Ok(bolt) = BoltEffect::new(&w.document, &w.album_cover) {
                            *w.effect.borrow_mut() =
                                Some(Box::new(bolt) as Box<dyn VisualEffect>);
                        }
                    }
                }
            });
        }
        EffectKind::Fog => {
            if let Some(mut old) = w.effect.borrow_mut().take() {
                old.cleanup();
            }
            match BoltEffect::new(&w.document, &w.album_cover) {
                Ok(bolt) => {
                    *w.effect.borrow_mut() = Some(Box::new(bolt) as Box<dyn VisualEffect>);
                    w.active_kind.set(EffectKind::Bolt);
                    log::info!("switched to energy effect");
                }
                Err(()) => log::error!("energy effect init failed"),
            }
        }
    }
}
