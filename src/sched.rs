// Explicit loop ownership: every repeating callback on the page is held by a
// handle that can cancel its next reschedule. Stopping playback cancels the
// loops that only matter while playing instead of leaving no-op chains
// re-arming forever.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Cancellation token for a `requestAnimationFrame` chain.
#[derive(Clone)]
pub struct LoopHandle {
    cancelled: Rc<Cell<bool>>,
}

impl LoopHandle {
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Start a self-rescheduling animation-frame loop. The chain ends at the
/// first frame after `cancel()`; the closure itself is intentionally kept
/// alive for the page lifetime.
pub fn start_frame_loop(mut tick: impl FnMut() + 'static) -> LoopHandle {
    let handle = LoopHandle {
        cancelled: Rc::new(Cell::new(false)),
    };
    let cancelled = handle.cancelled.clone();

    let cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let cb_chain = cb.clone();
    *cb.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if cancelled.get() {
            return;
        }
        tick();
        request_frame(&cb_chain);
    }) as Box<dyn FnMut()>));
    request_frame(&cb);
    handle
}

fn request_frame(cb: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let Some(w) = web::window() {
        if let Some(c) = cb.borrow().as_ref() {
            let _ = w.request_animation_frame(c.as_ref().unchecked_ref());
        }
    }
}

/// A `setInterval` registration cleared when the handle drops.
pub struct IntervalHandle {
    id: i32,
    _closure: Closure<dyn FnMut()>,
}

impl Drop for IntervalHandle {
    fn drop(&mut self) {
        if let Some(w) = web::window() {
            w.clear_interval_with_handle(self.id);
        }
    }
}

pub fn start_interval(period_ms: i32, mut tick: impl FnMut() + 'static) -> Option<IntervalHandle> {
    let window = web::window()?;
    let closure = Closure::wrap(Box::new(move || tick()) as Box<dyn FnMut()>);
    match window.set_interval_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        period_ms,
    ) {
        Ok(id) => Some(IntervalHandle {
            id,
            _closure: closure,
        }),
        Err(e) => {
            log::error!("setInterval error: {:?}", e);
            None
        }
    }
}

/// Fire a callback once after a delay.
pub fn run_after(delay_ms: i32, task: impl FnOnce() + 'static) {
    let Some(window) = web::window() else {
        return;
    };
    let closure = Closure::once_into_js(task);
    let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.unchecked_ref(),
        delay_ms,
    );
}
