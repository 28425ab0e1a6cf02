#![cfg(target_arch = "wasm32")]

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod audio;
mod clock;
mod constants;
mod core;
mod dom;
mod effects;
mod embers;
mod events;
mod frame;
mod messages;
mod playback;
mod render;
mod sched;

use crate::core::Session;
use crate::effects::ActiveEffect;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("haunt-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let caps = effects::detect_capabilities(&document);
    log::info!(
        "capabilities: audio={} particles={} tweening={}",
        caps.has_audio,
        caps.has_particle_lib,
        caps.has_tweening
    );
    report_missing_capabilities(&document, caps);

    let play_button = dom::get_html_by_id(&document, "playButton")
        .ok_or_else(|| anyhow::anyhow!("missing #playButton"))?;
    let media = document
        .get_element_by_id("audioPlayer")
        .ok_or_else(|| anyhow::anyhow!("missing #audioPlayer"))?
        .dyn_into::<web::HtmlMediaElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let album_cover = dom::query_html(&document, ".album-cover")
        .ok_or_else(|| anyhow::anyhow!("missing .album-cover"))?;
    let distortion_canvas = document
        .get_element_by_id("distortionCanvas")
        .ok_or_else(|| anyhow::anyhow!("missing #distortionCanvas"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    size_distortion_canvas(&distortion_canvas);
    paint_distortion_canvas(&distortion_canvas);

    // Keep the play button dead-centered over the artwork.
    dom::inject_style_rules(
        &document,
        ".album-cover { position: relative; display: flex; \
         justify-content: center; align-items: center; }\n\
         #playButton { position: absolute; top: 50%; left: 50%; \
         transform: translate(-50%, -50%); z-index: 10; margin: 0; padding: 0; }",
    );

    // ---------------- Shared session state ----------------
    let session = Rc::new(RefCell::new(Session::new()));
    let effect: ActiveEffect = Rc::new(RefCell::new(None));
    let graph = Rc::new(RefCell::new(None));
    let clock_spectrum = Rc::new(RefCell::new(None));
    let embers = Rc::new(RefCell::new(embers::EmberField::new(document.clone())));
    let revealer = Rc::new(messages::MessageRevealer::new(
        &document,
        album_cover.clone(),
        caps.has_tweening,
    ));

    playback::wire_play_button(playback::PlaybackWiring {
        document: document.clone(),
        media: media.clone(),
        play_button,
        album_cover: album_cover.clone(),
        session: session.clone(),
        caps,
        effect: effect.clone(),
        graph,
        clock_spectrum: clock_spectrum.clone(),
        revealer,
        effects_loop: Rc::new(RefCell::new(None)),
        breakdown_timer: Rc::new(RefCell::new(None)),
    });

    events::wire_pointer_handlers(&events::PointerWiring {
        document: document.clone(),
        album_cover: album_cover.clone(),
        session: session.clone(),
        embers: embers.clone(),
    });

    events::wire_effect_swap(events::SwapWiring {
        document: document.clone(),
        album_cover: album_cover.clone(),
        caps,
        effect: effect.clone(),
        active_kind: Rc::new(Cell::new(events::EffectKind::Bolt)),
    });

    wire_media_errors(&document, &media);
    wire_window_resize(&window, distortion_canvas, effect.clone());

    // ---------------- Page-lifetime loops ----------------
    let _rotation_loop = frame::start_rotation_loop(session.clone(), album_cover);
    let _ember_loop = embers::start_ember_loop(embers);
    let clock_loop = clock::find_hands(&document)
        .and_then(|hands| clock::start_clock(hands, session.clone(), clock_spectrum));
    let clock_fade = clock::start_clock_fade(&document, session);

    // Interval handles clear their registration on drop; these two run for
    // the page lifetime.
    std::mem::forget(clock_loop);
    std::mem::forget(clock_fade);

    Ok(())
}

fn report_missing_capabilities(document: &web::Document, caps: effects::CapabilitySet) {
    if !caps.has_audio {
        log::warn!("Web Audio API unsupported");
        dom::show_error_banner(
            document,
            "Web Audio API is not supported in this browser. Audio visualization will be disabled.",
        );
    }
    if !caps.has_particle_lib {
        log::warn!("WebGPU unavailable");
        dom::show_error_banner(
            document,
            "WebGPU is not available. Fog effects will be disabled.",
        );
    }
    if !caps.has_tweening {
        log::warn!("Web Animations API unavailable");
        dom::show_error_banner(
            document,
            "Web Animations API is not available. Message effects will be limited.",
        );
    }
}

fn size_distortion_canvas(canvas: &web::HtmlCanvasElement) {
    let (w, h) = dom::viewport_size();
    canvas.set_width(w as u32);
    canvas.set_height(h as u32);
}

fn paint_distortion_canvas(canvas: &web::HtmlCanvasElement) {
    let Ok(Some(obj)) = canvas.get_context("2d") else {
        return;
    };
    let Ok(ctx) = obj.dyn_into::<web::CanvasRenderingContext2d>() else {
        return;
    };
    let w = f64::from(canvas.width());
    let h = f64::from(canvas.height());
    ctx.clear_rect(0.0, 0.0, w, h);
    ctx.set_fill_style_str("rgb(0, 0, 0)");
    ctx.fill_rect(0.0, 0.0, w, h);
}

fn wire_media_errors(document: &web::Document, media: &web::HtmlMediaElement) {
    let document = document.clone();
    let closure = Closure::wrap(Box::new(move || {
        log::error!("audio element error");
        dom::show_error_banner(&document, "Audio playback error. Please try again.");
    }) as Box<dyn FnMut()>);
    let _ = media.add_event_listener_with_callback("error", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_window_resize(
    window: &web::Window,
    distortion_canvas: web::HtmlCanvasElement,
    effect: ActiveEffect,
) {
    let closure = Closure::wrap(Box::new(move || {
        size_distortion_canvas(&distortion_canvas);
        let (w, h) = dom::viewport_size();
        if let Some(active) = effect.borrow_mut().as_mut() {
            active.resize(w, h);
        }
    }) as Box<dyn FnMut()>);
    let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}
