use crate::audio::Spectrum;
use crate::constants::{
    CLOCK_FADE_AFTER_SECS, CLOCK_GLITCH_DEG, CLOCK_MINUTE_GLITCH_THRESHOLD, CLOCK_TICK_MS,
};
use crate::core::{band_peak, Session};
use crate::dom;
use crate::sched::{self, IntervalHandle};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub struct ClockHands {
    pub second: web::HtmlElement,
    pub minute: web::HtmlElement,
    pub hour: web::HtmlElement,
}

pub fn find_hands(document: &web::Document) -> Option<ClockHands> {
    Some(ClockHands {
        second: dom::query_html(document, ".second-hand")?,
        minute: dom::query_html(document, ".minute-hand")?,
        hour: dom::query_html(document, ".hour-hand")?,
    })
}

/// Fast clock loop. Hands follow wall time; while audio plays, a
/// whole-spectrum peak jitters the second hand (and the minute hand on
/// loud frames) for the glitch look.
pub fn start_clock(
    hands: ClockHands,
    session: Rc<RefCell<Session>>,
    spectrum: Rc<RefCell<Option<Spectrum>>>,
) -> Option<IntervalHandle> {
    sched::start_interval(CLOCK_TICK_MS, move || {
        let now = js_sys::Date::new_0();
        let seconds = now.get_seconds() as f32;
        let minutes = now.get_minutes() as f32;
        let hours = (now.get_hours() % 12) as f32;

        let seconds_deg = (seconds / 60.0) * 360.0 + 90.0;
        let minutes_deg = (minutes / 60.0) * 360.0 + (seconds / 60.0) * 6.0 + 90.0;
        let hours_deg = (hours / 12.0) * 360.0 + (minutes / 60.0) * 30.0 + 90.0;

        let glitch = if session.borrow().playing {
            spectrum.borrow_mut().as_mut().map(|s| {
                let data = s.sample();
                band_peak(data, 0, 128)
            })
        } else {
            None
        };

        match glitch {
            Some(energy) => {
                let offset = energy * CLOCK_GLITCH_DEG;
                rotate(&hands.second, seconds_deg + offset);
                if energy > CLOCK_MINUTE_GLITCH_THRESHOLD {
                    rotate(&hands.minute, minutes_deg + offset * 0.5);
                } else {
                    rotate(&hands.minute, minutes_deg);
                }
            }
            None => {
                rotate(&hands.second, seconds_deg);
                rotate(&hands.minute, minutes_deg);
            }
        }
        rotate(&hands.hour, hours_deg);
    })
}

fn rotate(el: &web::HtmlElement, degrees: f32) {
    dom::set_style(el, "transform", &format!("rotate({degrees:.2}deg)"));
}

/// One-second bookkeeping loop: the clock face fades out after a quarter
/// minute of playback and returns as soon as playback stops.
pub fn start_clock_fade(
    document: &web::Document,
    session: Rc<RefCell<Session>>,
) -> Option<IntervalHandle> {
    let clock = dom::query_html(document, ".clock")?;
    sched::start_interval(1000, move || {
        let mut session = session.borrow_mut();
        if session.playing {
            session.playback_secs += 1;
            if session.playback_secs >= CLOCK_FADE_AFTER_SECS {
                _ = clock.class_list().add_1("fade-out");
            }
        } else {
            session.playback_secs = 0;
            _ = clock.class_list().remove_1("fade-out");
        }
    })
}
