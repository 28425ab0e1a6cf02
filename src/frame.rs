use crate::audio::Spectrum;
use crate::constants::{EFFECT_ENERGY_SCALE, SHAKE_MAX_PX};
use crate::core::{
    band_peak, cycle_hue, glow_box_shadow, title_color, title_text_shadow, Session, BASS_BAND,
    KICK_BAND, MID_BAND,
};
use crate::dom;
use crate::effects::ActiveEffect;
use crate::sched;
use rand::Rng;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Visual Director state: everything the per-frame audio-reactive pass
/// touches. One instance lives for the whole page; the loop driving it is
/// restarted on every play and cancelled on pause.
pub struct FrameContext {
    pub session: Rc<RefCell<Session>>,
    pub spectrum: Spectrum,
    pub effect: ActiveEffect,
    pub album_cover: web::HtmlElement,
    pub glow_background: web::HtmlElement,
    pub track_title: Option<web::HtmlElement>,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let data = self.spectrum.sample();
        let kick = band_peak(data, KICK_BAND.0, KICK_BAND.1);
        let bass = band_peak(data, BASS_BAND.0, BASS_BAND.1);
        let mid = band_peak(data, MID_BAND.0, MID_BAND.1);

        let normalized = self.session.borrow_mut().energy.push(kick, bass, mid);
        let hue = cycle_hue(js_sys::Date::now());

        dom::set_style(
            &self.glow_background,
            "box-shadow",
            &glow_box_shadow(hue, normalized),
        );

        // Shake rides on top of the hover tilt; the glow layer gets the
        // tilt alone so the shadow stays anchored.
        let shake = normalized * SHAKE_MAX_PX;
        let mut rng = rand::thread_rng();
        let shake_x = rng.gen::<f32>() * shake - shake / 2.0;
        let shake_y = rng.gen::<f32>() * shake - shake / 2.0;
        let (rot_x, rot_y) = {
            let s = self.session.borrow();
            (s.rotation.current_x, s.rotation.current_y)
        };
        dom::set_style(
            &self.album_cover,
            "transform",
            &format!(
                "translate({shake_x:.2}px, {shake_y:.2}px) rotateX({rot_x:.2}deg) rotateY({rot_y:.2}deg)"
            ),
        );
        dom::set_style(
            &self.glow_background,
            "transform",
            &format!("rotateX({rot_x:.2}deg) rotateY({rot_y:.2}deg)"),
        );

        if let Some(title) = &self.track_title {
            dom::set_style(title, "text-shadow", &title_text_shadow(hue, normalized));
            dom::set_style(title, "color", &title_color(hue, normalized));
        }

        if let Some(effect) = self.effect.borrow_mut().as_mut() {
            effect.update(normalized * EFFECT_ENERGY_SCALE, hue);
        }
    }
}

/// Start the audio-reactive loop; the returned handle is cancelled on pause.
pub fn start_effects_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> sched::LoopHandle {
    sched::start_frame_loop(move || frame_ctx.borrow_mut().frame())
}

/// Page-lifetime tilt interpolation. While audio plays the director owns
/// the artwork transform (it composes the shake), so this loop only writes
/// styles when idle.
pub fn start_rotation_loop(
    session: Rc<RefCell<Session>>,
    album_cover: web::HtmlElement,
) -> sched::LoopHandle {
    sched::start_frame_loop(move || {
        let (playing, rot_x, rot_y) = {
            let mut s = session.borrow_mut();
            s.rotation.step();
            (s.playing, s.rotation.current_x, s.rotation.current_y)
        };
        if playing {
            return;
        }
        let transform = format!("rotateX({rot_x:.2}deg) rotateY({rot_y:.2}deg)");
        dom::set_style(&album_cover, "transform", &transform);
        if let Some(document) = dom::window_document() {
            if let Some(glow) = dom::query_html(&document, ".album-glow-background") {
                dom::set_style(&glow, "transform", &transform);
            }
        }
    })
}
