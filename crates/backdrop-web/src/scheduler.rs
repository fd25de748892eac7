use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Self-rescheduling `requestAnimationFrame` loop.
///
/// The closure holds a clone of its own slot, which is an `Rc` cycle; `cancel`
/// takes the closure out of the slot to break it.
pub struct FrameLoop {
    window: Window,
    handle: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

impl FrameLoop {
    /// Start requesting frames. `on_frame` returns `false` to stop the loop.
    pub fn start(window: Window, mut on_frame: impl FnMut(f64) -> bool + 'static) -> Self {
        let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let callback: FrameCallback = Rc::new(RefCell::new(None));

        let slot = callback.clone();
        let next_handle = handle.clone();
        let win = window.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
            next_handle.set(None);
            if !on_frame(now) {
                return;
            }
            if let Some(cb) = slot.borrow().as_ref() {
                next_handle.set(request(&win, cb));
            }
        }) as Box<dyn FnMut(f64)>));

        if let Some(cb) = callback.borrow().as_ref() {
            handle.set(request(&window, cb));
        }

        Self {
            window,
            handle,
            callback,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.handle.get().is_some()
    }

    /// Cancel the pending frame and release the callback. Idempotent.
    pub fn cancel(&self) {
        if let Some(id) = self.handle.take() {
            if let Err(err) = self.window.cancel_animation_frame(id) {
                crate::canvas::warn_js("cancelAnimationFrame", &err);
            }
        }
        if let Ok(mut slot) = self.callback.try_borrow_mut() {
            slot.take();
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn request(window: &Window, cb: &Closure<dyn FnMut(f64)>) -> Option<i32> {
    match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
        Ok(id) => Some(id),
        Err(err) => {
            crate::canvas::warn_js("requestAnimationFrame", &err);
            None
        }
    }
}
