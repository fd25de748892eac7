use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

use crate::canvas::warn_js;
use crate::runner::Shared;

type TimerCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Forwards window resize events to the engine and wakes it up when the
/// debounced resize is due. The engine decides what is due; the timer only
/// schedules the check.
pub struct ResizeWatcher {
    window: Window,
    listener: RefCell<Option<Closure<dyn FnMut()>>>,
    timer: Rc<Cell<Option<i32>>>,
    on_timeout: TimerCallback,
}

impl ResizeWatcher {
    pub(crate) fn attach(window: Window, shared: Rc<RefCell<Shared>>) -> Self {
        let timer: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let on_timeout: TimerCallback = Rc::new(RefCell::new(None));

        {
            let shared = shared.clone();
            let win = window.clone();
            let timer = timer.clone();
            let slot = on_timeout.clone();
            *on_timeout.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                timer.set(None);
                let now = now_ms(&win);
                let rearm_at = match shared.try_borrow_mut() {
                    Ok(mut s) => {
                        if let Some(surface) = s.backdrop.flush_resize(now) {
                            s.target.apply_surface(&surface);
                            s.present();
                        }
                        s.backdrop.resize_deadline()
                    }
                    Err(_) => Some(now),
                };
                if let Some(deadline) = rearm_at {
                    arm(&win, &slot, &timer, deadline - now);
                }
            }) as Box<dyn FnMut()>));
        }

        let listener = {
            let win = window.clone();
            let timer = timer.clone();
            let slot = on_timeout.clone();
            Closure::wrap(Box::new(move || {
                let now = now_ms(&win);
                let deadline = match shared.try_borrow_mut() {
                    Ok(mut s) => {
                        let Shared { backdrop, caps, .. } = &mut *s;
                        backdrop.request_resize(now, &*caps)
                    }
                    Err(_) => return,
                };
                if let Some(deadline) = deadline {
                    clear(&win, &timer);
                    arm(&win, &slot, &timer, deadline - now);
                }
            }) as Box<dyn FnMut()>)
        };

        if let Err(err) =
            window.add_event_listener_with_callback("resize", listener.as_ref().unchecked_ref())
        {
            warn_js("addEventListener(resize)", &err);
        }

        Self {
            window,
            listener: RefCell::new(Some(listener)),
            timer,
            on_timeout,
        }
    }

    /// Remove the listener and drop any pending wake-up. Idempotent.
    pub fn detach(&self) {
        if let Some(listener) = self.listener.borrow_mut().take() {
            if let Err(err) = self
                .window
                .remove_event_listener_with_callback("resize", listener.as_ref().unchecked_ref())
            {
                warn_js("removeEventListener(resize)", &err);
            }
        }
        clear(&self.window, &self.timer);
        if let Ok(mut slot) = self.on_timeout.try_borrow_mut() {
            slot.take();
        }
    }
}

impl Drop for ResizeWatcher {
    fn drop(&mut self) {
        self.detach();
    }
}

pub(crate) fn now_ms(window: &Window) -> f64 {
    window.performance().map(|p| p.now()).unwrap_or(0.0)
}

fn arm(window: &Window, slot: &TimerCallback, timer: &Cell<Option<i32>>, delay_ms: f64) {
    let Some(func) = slot
        .borrow()
        .as_ref()
        .map(|cb| cb.as_ref().unchecked_ref::<js_sys::Function>().clone())
    else {
        return;
    };
    // +1 so the wake-up lands at or after the deadline.
    let delay = delay_ms.max(0.0).ceil() as i32 + 1;
    match window.set_timeout_with_callback_and_timeout_and_arguments_0(&func, delay) {
        Ok(id) => timer.set(Some(id)),
        Err(err) => warn_js("setTimeout", &err),
    }
}

fn clear(window: &Window, timer: &Cell<Option<i32>>) {
    if let Some(id) = timer.take() {
        window.clear_timeout_with_handle(id);
    }
}
