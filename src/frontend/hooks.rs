use crate::count_up::CountUp;
use crate::error::SetupError;
use crate::frontend::frame::AnimationLoop;
use crate::frontend::js_error;
use crate::logging::log_event;
use crate::typewriter::Typewriter;
use crate::visibility::{IntersectionSample, VisibilityTrigger};
use gloo_timers::callback::Timeout;
use js_sys::{Array, Reflect};
use log::Level;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

struct Observation {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl Drop for Observation {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Everything a mounted trigger holds on to. Dropping it releases the
/// observer and any pending wait for the target element.
struct VisibilityWatch {
    _observation: Rc<RefCell<Option<Observation>>>,
    _attach: Option<AnimationLoop>,
}

impl VisibilityWatch {
    fn start(
        node_ref: NodeRef,
        trigger: Rc<RefCell<VisibilityTrigger>>,
        on_visible: Callback<()>,
    ) -> Self {
        let observation: Rc<RefCell<Option<Observation>>> = Rc::default();

        if !observer_supported() {
            fail_open(&trigger, &on_visible, SetupError::ObserverUnavailable);
            return Self {
                _observation: observation,
                _attach: None,
            };
        }

        if let Some(element) = node_ref.cast::<Element>() {
            begin_observing(&element, &trigger, &on_visible, &observation);
            return Self {
                _observation: observation,
                _attach: None,
            };
        }

        // Not in the DOM yet: poll once per frame until it is.
        let attach = {
            let observation = observation.clone();
            AnimationLoop::start(move |_| {
                let Some(element) = node_ref.cast::<Element>() else {
                    return true;
                };
                begin_observing(&element, &trigger, &on_visible, &observation);
                false
            })
        };

        Self {
            _observation: observation,
            _attach: attach,
        }
    }
}

fn observer_supported() -> bool {
    window()
        .map(JsValue::from)
        .and_then(|win| Reflect::has(&win, &JsValue::from_str("IntersectionObserver")).ok())
        .unwrap_or(false)
}

fn fail_open(trigger: &RefCell<VisibilityTrigger>, on_visible: &Callback<()>, reason: SetupError) {
    if trigger.borrow_mut().fail_open() {
        log_event(
            Level::Warn,
            "visibility_fail_open",
            json!({ "reason": reason.to_string() }),
        );
        on_visible.emit(());
    }
}

fn begin_observing(
    element: &Element,
    trigger: &Rc<RefCell<VisibilityTrigger>>,
    on_visible: &Callback<()>,
    slot: &RefCell<Option<Observation>>,
) {
    trigger.borrow_mut().attach();
    match observe(element, trigger.clone(), on_visible.clone()) {
        Ok(observation) => *slot.borrow_mut() = Some(observation),
        Err(err) => fail_open(trigger, on_visible, err),
    }
}

fn observe(
    element: &Element,
    trigger: Rc<RefCell<VisibilityTrigger>>,
    on_visible: Callback<()>,
) -> Result<Observation, SetupError> {
    let threshold = trigger.borrow().threshold();
    let callback: ObserverCallback = Closure::wrap(Box::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let sample =
                    IntersectionSample::new(entry.is_intersecting(), entry.intersection_ratio());
                if trigger.borrow_mut().observe(sample) {
                    observer.disconnect();
                    on_visible.emit(());
                    break;
                }
            }
        },
    ) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
            .map_err(js_error)?;
    observer.observe(element);

    Ok(Observation {
        observer,
        _callback: callback,
    })
}

/// Attach the returned ref to a section; the flag turns `true` once at least
/// `threshold` of it has been on screen and then stays `true`.
#[hook]
pub fn use_visibility_trigger(threshold: f64) -> (NodeRef, bool) {
    let node_ref = use_node_ref();
    let visible = use_state_eq(|| false);

    {
        let node_ref = node_ref.clone();
        let visible = visible.clone();
        use_effect_with((), move |_| {
            let trigger = Rc::new(RefCell::new(VisibilityTrigger::new(threshold)));
            let on_visible = Callback::from(move |()| visible.set(true));
            let watch = VisibilityWatch::start(node_ref, trigger.clone(), on_visible);

            move || {
                trigger.borrow_mut().release();
                drop(watch);
            }
        });
    }

    (node_ref, *visible)
}

/// Counts from 0 to `target` over `duration_ms` the first time `active` is
/// set. Never restarts.
#[hook]
pub fn use_count_up(target: u64, duration_ms: u64, active: bool) -> u64 {
    let displayed = use_state_eq(|| 0u64);
    let started = use_mut_ref(|| false);
    let frames = use_mut_ref(|| None::<AnimationLoop>);

    {
        let displayed = displayed.clone();
        let frames = frames.clone();
        use_effect_with(active, move |active| {
            if *active && !*started.borrow() {
                *started.borrow_mut() = true;
                let mut counter = CountUp::new(target, duration_ms as f64);
                let setter = displayed.clone();
                let animation = AnimationLoop::start(move |now| {
                    counter.activate(now);
                    setter.set(counter.value_at(now));
                    !counter.is_complete(now)
                });
                match animation {
                    Some(animation) => *frames.borrow_mut() = Some(animation),
                    None => displayed.set(target),
                }
            }
            || ()
        });
    }

    use_effect_with((), move |_| {
        move || {
            frames.borrow_mut().take();
        }
    });

    *displayed
}

/// `false` until `delay_ms` after `active` first becomes `true`.
#[hook]
pub fn use_delayed_flag(active: bool, delay_ms: u32) -> bool {
    let flag = use_state_eq(|| false);

    {
        let flag = flag.clone();
        use_effect_with(active, move |active| {
            let timeout = active.then(|| Timeout::new(delay_ms, move || flag.set(true)));
            move || drop(timeout)
        });
    }

    *flag
}

fn schedule_typing(
    writer: Rc<RefCell<Typewriter>>,
    text: UseStateHandle<String>,
    slot: Rc<RefCell<Option<Timeout>>>,
    delay: Duration,
) {
    let next_slot = slot.clone();
    let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
    let timeout = Timeout::new(millis, move || {
        let next_delay = writer.borrow_mut().advance();
        text.set(writer.borrow().visible_text());
        schedule_typing(writer, text, next_slot, next_delay);
    });
    *slot.borrow_mut() = Some(timeout);
}

/// Current text of the hero typing effect. With `animate` off the first
/// phrase is shown in full.
#[hook]
pub fn use_typewriter(phrases: Vec<String>, animate: bool) -> String {
    let text = use_state_eq(String::new);

    {
        let text = text.clone();
        use_effect_with(animate, move |animate| {
            let mut writer = Typewriter::new(phrases);
            let slot: Rc<RefCell<Option<Timeout>>> = Rc::default();

            if *animate {
                let delay = writer.initial_delay();
                schedule_typing(Rc::new(RefCell::new(writer)), text, slot.clone(), delay);
            } else {
                writer.settle();
                text.set(writer.visible_text());
            }

            move || {
                slot.borrow_mut().take();
            }
        });
    }

    (*text).clone()
}
