use crate::core::{Ember, EMBER_SPAWN_PROBABILITY};
use crate::dom;
use crate::sched;
use rand::Rng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Cursor-shed spark particles, one DOM node each. Independent of the
/// audio-reactive pipeline apart from the playing gate at spawn time.
pub struct EmberField {
    document: web::Document,
    live: Vec<(Ember, web::HtmlElement)>,
}

impl EmberField {
    pub fn new(document: web::Document) -> Self {
        Self {
            document,
            live: Vec::new(),
        }
    }

    /// Called per pointer-move event; sheds an ember with fixed probability.
    pub fn maybe_spawn(&mut self, x: f32, y: f32) {
        let mut rng = rand::thread_rng();
        if rng.gen::<f32>() >= EMBER_SPAWN_PROBABILITY {
            return;
        }
        let Ok(el) = self.document.create_element("div") else {
            return;
        };
        let Ok(el) = el.dyn_into::<web::HtmlElement>() else {
            return;
        };
        el.set_class_name("ember");
        _ = el.set_attribute(
            "style",
            "position: fixed; left: 0; top: 0; pointer-events: none;",
        );
        if let Some(body) = self.document.body() {
            _ = body.append_child(&el);
        }
        let ember = Ember::spawn(&mut rng, x, y);
        place(&el, &ember);
        self.live.push((ember, el));
    }

    /// Advance all embers one frame, releasing the nodes of spent ones.
    pub fn tick(&mut self) {
        self.live.retain_mut(|(ember, el)| {
            if ember.tick() {
                place(el, ember);
                dom::set_style(el, "opacity", &format!("{:.3}", ember.life));
                true
            } else {
                el.remove();
                false
            }
        });
    }
}

fn place(el: &web::HtmlElement, ember: &Ember) {
    dom::set_style(
        el,
        "transform",
        &format!(
            "translate3d({:.1}px, {:.1}px, 0) scale({:.3})",
            ember.x, ember.y, ember.life
        ),
    );
}

/// Page-lifetime update loop for the ember field.
pub fn start_ember_loop(field: Rc<RefCell<EmberField>>) -> sched::LoopHandle {
    sched::start_frame_loop(move || field.borrow_mut().tick())
}
