use std::cell::RefCell;
use std::rc::Rc;

use backdrop_engine::{replay, Backdrop, BackdropConfig, FrameOutcome};
use web_sys::HtmlCanvasElement;

use crate::canvas::CanvasTarget;
use crate::capabilities::WindowCapabilities;
use crate::resize::ResizeWatcher;
use crate::scheduler::FrameLoop;

/// State shared between the frame loop and the resize callbacks.
pub(crate) struct Shared {
    pub backdrop: Backdrop,
    pub target: CanvasTarget,
    pub caps: WindowCapabilities,
}

impl Shared {
    /// Replay the current draw list onto the canvas.
    pub fn present(&mut self) {
        replay(self.backdrop.draw_list(), &mut self.target);
    }
}

/// Wires a [`Backdrop`] to a canvas element and the browser's frame and
/// resize events.
///
/// The page holds one of these per mounted view (see `lib.rs`); dropping it
/// unmounts.
pub struct BackdropRunner {
    shared: Rc<RefCell<Shared>>,
    frames: Option<FrameLoop>,
    resize: Option<ResizeWatcher>,
    mounted: bool,
}

impl BackdropRunner {
    /// Mount onto `canvas`. Returns `None` when there is no window or 2D
    /// context, in which case nothing is drawn.
    pub fn mount(
        canvas: HtmlCanvasElement,
        config: BackdropConfig,
        reduced_motion: bool,
        seed: u64,
    ) -> Option<Self> {
        let Some(window) = web_sys::window() else {
            log::warn!("backdrop: no window, skipping mount");
            return None;
        };
        let Some(target) = CanvasTarget::acquire(canvas) else {
            log::warn!("backdrop: canvas 2D context unavailable, skipping mount");
            return None;
        };
        let caps =
            WindowCapabilities::new(window.clone(), reduced_motion, config.compact_breakpoint);
        let backdrop = Backdrop::mount(config, &caps, seed);
        let animated = backdrop.path().is_animated();

        let shared = Rc::new(RefCell::new(Shared {
            backdrop,
            target,
            caps,
        }));
        {
            let mut s = shared.borrow_mut();
            let surface = *s.backdrop.surface();
            s.target.apply_surface(&surface);
            s.present();
        }

        let resize = ResizeWatcher::attach(window.clone(), shared.clone());

        let frames = animated.then(|| {
            let shared = shared.clone();
            FrameLoop::start(window, move |now| {
                let Ok(mut s) = shared.try_borrow_mut() else {
                    return true;
                };
                let outcome = s.backdrop.frame(now);
                if outcome == FrameOutcome::Rendered {
                    s.present();
                }
                outcome != FrameOutcome::Stopped
            })
        });

        Some(Self {
            shared,
            frames,
            resize: Some(resize),
            mounted: true,
        })
    }

    /// Stop the loop, detach listeners and tear down the backdrop. Idempotent.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        if let Some(frames) = self.frames.take() {
            frames.cancel();
        }
        if let Some(resize) = self.resize.take() {
            resize.detach();
        }
        match self.shared.try_borrow_mut() {
            Ok(mut s) => s.backdrop.teardown(),
            Err(_) => log::warn!("backdrop: unmount while busy, teardown skipped"),
        }
    }

    /// True while mounted with a live animation loop.
    pub fn is_running(&self) -> bool {
        self.mounted
            && self.frames.as_ref().is_some_and(|f| f.is_scheduled())
            && self
                .shared
                .try_borrow()
                .map(|s| !s.backdrop.is_torn_down())
                .unwrap_or(true)
    }
}

impl Drop for BackdropRunner {
    fn drop(&mut self) {
        self.unmount();
    }
}
