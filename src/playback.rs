use crate::audio::{self, AudioGraph, Spectrum};
use crate::constants::{BREAKDOWN_TICK_MS, FIRST_MESSAGE_DELAY_MS, IDLE_GLOW_BOX_SHADOW};
use crate::core::Session;
use crate::dom;
use crate::effects::{ActiveEffect, BoltEffect, CapabilitySet, VisualEffect};
use crate::frame::{self, FrameContext};
use crate::messages::MessageRevealer;
use crate::sched::{self, IntervalHandle, LoopHandle};
use rand::Rng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Everything the play/pause transitions touch. Cloned into the click
/// closure; all shared state is behind `Rc`.
#[derive(Clone)]
pub struct PlaybackWiring {
    pub document: web::Document,
    pub media: web::HtmlMediaElement,
    pub play_button: web::HtmlElement,
    pub album_cover: web::HtmlElement,
    pub session: Rc<RefCell<Session>>,
    pub caps: CapabilitySet,
    pub effect: ActiveEffect,
    pub graph: Rc<RefCell<Option<AudioGraph>>>,
    pub clock_spectrum: Rc<RefCell<Option<Spectrum>>>,
    pub revealer: Rc<MessageRevealer>,
    pub effects_loop: Rc<RefCell<Option<LoopHandle>>>,
    pub breakdown_timer: Rc<RefCell<Option<IntervalHandle>>>,
}

pub fn wire_play_button(w: PlaybackWiring) {
    let document = w.document.clone();
    dom::add_click_listener(&document, "playButton", move || {
        if w.media.paused() {
            start_playback(w.clone());
        } else {
            stop_playback(&w);
        }
    });
}

fn start_playback(w: PlaybackWiring) {
    // Loading state until the async start settles.
    dom::set_style(&w.play_button, "opacity", "0.5");
    dom::set_style(&w.play_button, "cursor", "wait");

    spawn_local(async move {
        if let Err(e) = initialize_and_play(&w).await {
            log::error!("playback failed: {:?}", e);
            dom::show_error_banner(&w.document, "Failed to start playback. Please try again.");
            w.session.borrow_mut().end_playback();
            _ = w.play_button.class_list().remove_1("playing");
        }
        dom::set_style(&w.play_button, "opacity", "1");
        dom::set_style(&w.play_button, "cursor", "pointer");
    });
}

/// Lazy init of the audio graph, glow layer and effect back-end, then the
/// actual play. Anything that fails here is surfaced and retried on the
/// next click.
async fn initialize_and_play(w: &PlaybackWiring) -> anyhow::Result<()> {
    if w.graph.borrow().is_none() {
        if !w.caps.has_audio {
            anyhow::bail!("Web Audio unsupported");
        }
        match audio::init_audio(&w.media) {
            Ok(graph) => {
                w.clock_spectrum
                    .replace(Some(Spectrum::new(graph.analyser.clone())));
                w.graph.replace(Some(graph));
            }
            Err(()) => {
                dom::show_error_banner(
                    &w.document,
                    "Failed to setup audio visualization. Some features may be limited.",
                );
                anyhow::bail!("audio graph init failed");
            }
        }
    } else if let Some(graph) = w.graph.borrow().as_ref() {
        _ = graph.ctx.resume();
    }

    ensure_glow_background(&w.document, &w.album_cover);
    dom::set_style(&w.album_cover, "position", "relative");
    // Above the effect canvases; no transition so the shake lands raw.
    dom::set_style(&w.album_cover, "z-index", "4");
    dom::set_style(&w.album_cover, "transition", "none");

    if w.effect.borrow().is_none() {
        match BoltEffect::new(&w.document, &w.album_cover) {
            Ok(effect) => {
                *w.effect.borrow_mut() = Some(Box::new(effect) as Box<dyn VisualEffect>);
                log::info!("energy effect initialized");
            }
            Err(()) => {
                dom::show_error_banner(
                    &w.document,
                    "Failed to initialize visual effects. Performance may be limited.",
                );
            }
        }
    }

    let promise = w.media.play().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    JsFuture::from(promise)
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    w.session.borrow_mut().begin_playback();
    _ = w.play_button.class_list().add_1("playing");
    dom::set_style(&w.album_cover, "filter", "none");

    start_effects_loop(w)?;
    start_breakdown_timer(w);

    // First whisper shortly after the music starts.
    let revealer = w.revealer.clone();
    let session = w.session.clone();
    sched::run_after(FIRST_MESSAGE_DELAY_MS, move || {
        if session.borrow().playing {
            revealer.reveal();
        }
    });

    Ok(())
}

fn start_effects_loop(w: &PlaybackWiring) -> anyhow::Result<()> {
    if let Some(stale) = w.effects_loop.borrow_mut().take() {
        stale.cancel();
    }
    let analyser = {
        let graph = w.graph.borrow();
        let graph = graph
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("no audio graph"))?;
        graph.analyser.clone()
    };
    let glow_background = dom::query_html(&w.document, ".album-glow-background")
        .ok_or_else(|| anyhow::anyhow!("missing glow background"))?;
    let frame_ctx = FrameContext {
        session: w.session.clone(),
        spectrum: Spectrum::new(analyser),
        effect: w.effect.clone(),
        album_cover: w.album_cover.clone(),
        glow_background,
        track_title: dom::query_html(&w.document, ".track-title"),
    };
    *w.effects_loop.borrow_mut() = Some(frame::start_effects_loop(Rc::new(RefCell::new(
        frame_ctx,
    ))));
    Ok(())
}

fn start_breakdown_timer(w: &PlaybackWiring) {
    let session = w.session.clone();
    let document = w.document.clone();
    let revealer = w.revealer.clone();
    *w.breakdown_timer.borrow_mut() = sched::start_interval(BREAKDOWN_TICK_MS, move || {
        let level = session.borrow_mut().advance_breakdown();
        // Subtle, so the background color survives the filter.
        if let Some(body) = document.body() {
            dom::set_style(
                &body,
                "filter",
                &format!("hue-rotate({:.1}deg) blur({:.2}px)", level * 20.0, level),
            );
        }
        if rand::thread_rng().gen::<f32>() < level * 0.1 {
            revealer.reveal();
        }
    });
}

fn stop_playback(w: &PlaybackWiring) {
    log::info!("stopping playback");
    _ = w.media.pause();
    _ = w.play_button.class_list().remove_1("playing");
    w.session.borrow_mut().end_playback();

    // Idle loops suspend: cancel rather than leaving no-op chains armed.
    if let Some(handle) = w.effects_loop.borrow_mut().take() {
        handle.cancel();
    }
    w.breakdown_timer.borrow_mut().take();

    dom::set_style(&w.album_cover, "transition", "box-shadow 0.5s ease-out");
    dom::set_style(&w.album_cover, "box-shadow", "none");
    dom::set_style(&w.album_cover, "transform", "none");
    dom::set_style(&w.album_cover, "filter", "none");
    if let Some(glow) = dom::query_html(&w.document, ".album-glow-background") {
        dom::set_style(&glow, "box-shadow", IDLE_GLOW_BOX_SHADOW);
    }
    if let Some(body) = w.document.body() {
        dom::set_style(&body, "filter", "none");
    }
}

/// Create the glow layer behind the artwork once; later plays reuse it.
fn ensure_glow_background(document: &web::Document, album_cover: &web::HtmlElement) {
    if dom::query_html(document, ".album-glow-background").is_some() {
        return;
    }
    let Ok(el) = document.create_element("div") else {
        return;
    };
    let Ok(glow) = el.dyn_into::<web::HtmlElement>() else {
        return;
    };
    glow.set_class_name("album-glow-background");
    _ = glow.set_attribute(
        "style",
        "position: absolute; width: 100%; height: 100%; border-radius: 10px; \
         z-index: 1; box-shadow: 0 0 30px hsla(0, 100%, 50%, 0.3); \
         pointer-events: none; transition: none;",
    );
    if let Some(parent) = album_cover.parent_node() {
        let reference: &web::Node = album_cover.as_ref();
        _ = parent.insert_before(&glow, Some(reference));
    }
}
