use crate::core::Session;
use crate::embers::EmberField;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct PointerWiring {
    pub document: web::Document,
    pub album_cover: web::HtmlElement,
    pub session: Rc<RefCell<Session>>,
    pub embers: Rc<RefCell<EmberField>>,
}

pub fn wire_pointer_handlers(w: &PointerWiring) {
    wire_ember_trail(w);
    wire_album_hover(w);
}

fn listen_mouse(
    target: &web::EventTarget,
    event: &str,
    handler: impl FnMut(web::MouseEvent) + 'static,
) {
    let closure = wasm_bindgen::closure::Closure::wrap(
        Box::new(handler) as Box<dyn FnMut(web::MouseEvent)>
    );
    let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Cursor movement sheds embers anywhere on the page while audio plays.
fn wire_ember_trail(w: &PointerWiring) {
    let session = w.session.clone();
    let embers = w.embers.clone();
    listen_mouse(&w.document, "mousemove", move |ev| {
        if !session.borrow().playing {
            return;
        }
        embers
            .borrow_mut()
            .maybe_spawn(ev.client_x() as f32, ev.client_y() as f32);
    });
}

/// Hovering the artwork steers the 3D tilt targets; the interpolation loop
/// eases toward them.
fn wire_album_hover(w: &PointerWiring) {
    {
        let session = w.session.clone();
        listen_mouse(&w.album_cover, "mouseenter", move |_| {
            session.borrow_mut().rotation.hovering = true;
        });
    }
    {
        let session = w.session.clone();
        listen_mouse(&w.album_cover, "mouseleave", move |_| {
            session.borrow_mut().rotation.leave();
        });
    }
    {
        let session = w.session.clone();
        let album = w.album_cover.clone();
        listen_mouse(&w.album_cover, "mousemove", move |ev| {
            let rect = album.get_bounding_client_rect();
            if rect.width() <= 0.0 || rect.height() <= 0.0 {
                return;
            }
            let u = ((ev.client_x() as f64 - rect.left()) / rect.width()) as f32;
            let v = ((ev.client_y() as f64 - rect.top()) / rect.height()) as f32;
            session.borrow_mut().rotation.point_at(u, v);
        });
    }
}
