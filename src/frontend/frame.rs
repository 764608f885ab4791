use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::window;

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Self-rescheduling `requestAnimationFrame` loop.
///
/// `on_frame` receives the frame timestamp in milliseconds and returns
/// whether another frame is wanted. Dropping the loop cancels the pending
/// frame synchronously.
pub struct AnimationLoop {
    pending: Rc<Cell<Option<i32>>>,
    callback: Rc<RefCell<Option<FrameCallback>>>,
}

impl AnimationLoop {
    pub fn start(mut on_frame: impl FnMut(f64) -> bool + 'static) -> Option<Self> {
        let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));

        let pending_tick = pending.clone();
        let callback_tick: Weak<RefCell<Option<FrameCallback>>> = Rc::downgrade(&callback);
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
            pending_tick.set(None);
            if !on_frame(timestamp) {
                return;
            }
            if let Some(callback) = callback_tick.upgrade() {
                if let Some(callback) = callback.borrow().as_ref() {
                    pending_tick.set(request_frame(callback));
                }
            }
        }) as Box<dyn FnMut(f64)>));

        let first = callback.borrow().as_ref().and_then(request_frame)?;
        pending.set(Some(first));

        Some(Self { pending, callback })
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        if let (Some(handle), Some(win)) = (self.pending.take(), window()) {
            let _ = win.cancel_animation_frame(handle);
        }
        self.callback.borrow_mut().take();
    }
}

fn request_frame(callback: &FrameCallback) -> Option<i32> {
    window()?
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .ok()
}
