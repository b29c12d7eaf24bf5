use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_render::{request_animation_frame, AnimationFrame};
use log::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Math;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use crate::browser;
use crate::starfield::Starfield;

fn random() -> f64 {
    Math::random()
}

fn viewport_size() -> (f64, f64) {
    let Some(window) = web_sys::window() else {
        return (0.0, 0.0);
    };
    let width = window.inner_width().ok().and_then(|value| value.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|value| value.as_f64()).unwrap_or(0.0);
    (width, height)
}

struct Scene {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    field: Starfield,
}

impl Scene {
    fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let (width, height) = viewport_size();
        let scene = Scene {
            canvas,
            context,
            field: Starfield::new(width, height, &mut random),
        };
        scene.size_canvas();
        Ok(scene)
    }

    fn resize(&mut self) {
        let (width, height) = viewport_size();
        self.field.resize(width, height, &mut random);
        self.size_canvas();
    }

    fn size_canvas(&self) {
        self.canvas.set_width(self.field.width() as u32);
        self.canvas.set_height(self.field.height() as u32);
    }

    fn draw(&mut self) {
        let context = &self.context;
        context.clear_rect(0.0, 0.0, self.field.width(), self.field.height());
        if let Err(err) = context.set_global_composite_operation("lighter") {
            warn!("composite operation: {:?}", err);
        }

        self.field.step(&mut random, |star, glow| {
            let (tail_x, tail_y) = star.tail();
            let gradient = context.create_linear_gradient(star.x, star.y, tail_x, tail_y);
            let head = gradient.add_color_stop(0.0, &format!("rgba({}, {})", star.color, glow));
            let tail = gradient.add_color_stop(1.0, &format!("rgba({}, 0)", star.color));
            if head.and(tail).is_err() {
                return;
            }

            context.set_stroke_style_canvas_gradient(&gradient);
            context.set_line_width(star.size);
            context.begin_path();
            context.move_to(star.x, star.y);
            context.line_to(tail_x, tail_y);
            context.stroke();
        });
    }
}

/// Running animation. Dropping it cancels the pending frame and the resize
/// listener.
struct StarfallLoop {
    frame: Rc<RefCell<Option<AnimationFrame>>>,
    _resize: EventListener,
}

impl StarfallLoop {
    fn start(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let scene = Rc::new(RefCell::new(Scene::new(canvas)?));
        let frame = Rc::new(RefCell::new(None));

        let resize = {
            let scene = Rc::clone(&scene);
            EventListener::new(&window, "resize", move |_| scene.borrow_mut().resize())
        };

        schedule_frame(scene, Rc::clone(&frame));
        Ok(StarfallLoop { frame, _resize: resize })
    }
}

fn schedule_frame(scene: Rc<RefCell<Scene>>, frame: Rc<RefCell<Option<AnimationFrame>>>) {
    let slot = Rc::clone(&frame);
    let handle = request_animation_frame(move |_| {
        scene.borrow_mut().draw();
        schedule_frame(scene, slot);
    });
    *frame.borrow_mut() = Some(handle);
}

impl Drop for StarfallLoop {
    fn drop(&mut self) {
        // The pending frame holds the slot itself; taking it breaks the cycle.
        self.frame.borrow_mut().take();
    }
}

#[function_component(Starfall)]
pub fn starfall() -> Html {
    let canvas_ref = use_node_ref();
    let reduced_motion = *use_state(browser::prefers_reduced_motion);

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with_deps(
            move |_| {
                let animation = if reduced_motion {
                    None
                } else {
                    canvas_ref.cast::<HtmlCanvasElement>().and_then(|canvas| {
                        StarfallLoop::start(canvas)
                            .map_err(|err| warn!("starfall disabled: {:?}", err))
                            .ok()
                    })
                };
                move || drop(animation)
            },
            (),
        );
    }

    html! {
        <canvas
            id="starfall"
            ref={canvas_ref}
            aria-hidden="true"
            style={reduced_motion.then_some("display: none;")}
        />
    }
}
