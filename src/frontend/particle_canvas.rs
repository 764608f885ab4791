use crate::error::SetupError;
use crate::frontend::frame::AnimationLoop;
use crate::frontend::{js_error, viewport_size};
use crate::logging::log_event;
use crate::particles::{Hsla, ParticleField, Surface, DENSE_FIELD_THRESHOLD};
use gloo_events::EventListener;
use log::Level;
use serde_json::json;
use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{window, CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};
use yew::prelude::*;

struct CanvasSurface<'a>(&'a CanvasRenderingContext2d);

impl Surface for CanvasSurface<'_> {
    fn clear(&mut self, width: f64, height: f64) {
        self.0.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Hsla) {
        self.0.begin_path();
        if self.0.arc(x, y, radius, 0.0, TAU).is_ok() {
            self.0.set_fill_style_str(&color.to_string());
            self.0.fill();
        }
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Hsla) {
        self.0.begin_path();
        self.0.move_to(from.0, from.1);
        self.0.line_to(to.0, to.1);
        self.0.set_stroke_style_str(&color.to_string());
        self.0.set_line_width(width);
        self.0.stroke();
    }
}

/// A running field and the browser hooks feeding it. Dropping it stops the
/// field, removes both listeners and cancels the next frame in one go.
struct ParticleRuntime {
    field: Rc<RefCell<ParticleField>>,
    _resize: EventListener,
    _pointer: EventListener,
    _frames: AnimationLoop,
}

impl ParticleRuntime {
    fn mount(canvas_ref: &NodeRef, area_per_particle: f64) -> Result<Self, SetupError> {
        let win = window().ok_or(SetupError::NoWindow)?;
        let canvas = canvas_ref
            .cast::<HtmlCanvasElement>()
            .ok_or(SetupError::ContextUnavailable)?;
        let context = canvas
            .get_context("2d")
            .map_err(js_error)?
            .ok_or(SetupError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SetupError::ContextUnavailable)?;

        let field = Rc::new(RefCell::new(ParticleField::new(area_per_particle)));
        fit_to_viewport(&win, &canvas, &field);

        let resize = {
            let field = field.clone();
            let target = win.clone();
            EventListener::new(&win, "resize", move |_| {
                fit_to_viewport(&target, &canvas, &field);
            })
        };

        let pointer = {
            let field = field.clone();
            EventListener::new(&win, "mousemove", move |event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    field
                        .borrow_mut()
                        .pointer_moved(f64::from(event.client_x()), f64::from(event.client_y()));
                }
            })
        };

        let frames = {
            let field = field.clone();
            AnimationLoop::start(move |_| field.borrow_mut().frame(&mut CanvasSurface(&context)))
                .ok_or(SetupError::NoWindow)?
        };

        log_event(
            Level::Info,
            "particle_field_started",
            json!({ "count": field.borrow().particles().len() }),
        );

        Ok(Self {
            field,
            _resize: resize,
            _pointer: pointer,
            _frames: frames,
        })
    }
}

impl Drop for ParticleRuntime {
    fn drop(&mut self) {
        self.field.borrow_mut().stop();
        log_event(Level::Info, "particle_field_stopped", json!({}));
    }
}

fn fit_to_viewport(win: &Window, canvas: &HtmlCanvasElement, field: &RefCell<ParticleField>) {
    let (width, height) = viewport_size(win);
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);

    let count = field
        .borrow_mut()
        .resize(width, height, &mut rand::thread_rng());
    log_event(
        Level::Debug,
        "particle_field_resized",
        json!({ "count": count, "width": width, "height": height }),
    );
    if count > DENSE_FIELD_THRESHOLD {
        log_event(
            Level::Warn,
            "particle_field_dense",
            json!({ "count": count, "pairs": count * (count - 1) / 2 }),
        );
    }
}

#[derive(Properties, PartialEq)]
pub struct ParticleCanvasProps {
    pub area_per_particle: f64,
}

/// Fixed full-viewport canvas behind the page. Renders an empty canvas and
/// does no work when a 2d context cannot be had.
#[function_component(ParticleCanvas)]
pub fn particle_canvas(props: &ParticleCanvasProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        let area_per_particle = props.area_per_particle;
        use_effect_with((), move |_| {
            let runtime = match ParticleRuntime::mount(&canvas_ref, area_per_particle) {
                Ok(runtime) => Some(runtime),
                Err(err) => {
                    log_event(
                        Level::Debug,
                        "particle_field_unavailable",
                        json!({ "reason": err.to_string() }),
                    );
                    None
                }
            };
            move || drop(runtime)
        });
    }

    html! {
        <canvas ref={canvas_ref} class="particle-canvas" aria-hidden="true" />
    }
}
