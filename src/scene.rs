//! Browser host: wires the canvas, the text input and the display elements to
//! the emotion state, and drives the frame loop.
//!
//! All state lives in thread-locals and is only touched from the main thread
//! (event listeners, timer callbacks, settled futures, animation frames).

use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, HtmlInputElement, Window, window};

use crate::analyzer::EmotionDescriptor;
use crate::canvas::CanvasSurface;
use crate::config::MotionConfig;
use crate::error::{MotionError, MotionResult};
use crate::gateway::{AnalysisGateway, BrowserSpawner, TimeoutScheduler};
use crate::particles::Viewport;
use crate::remote::HttpAnalyzer;
use crate::state::Backdrop;

type BrowserGateway = AnalysisGateway<HttpAnalyzer, TimeoutScheduler, BrowserSpawner>;

struct Scene {
    canvas: HtmlCanvasElement,
    surface: CanvasSurface,
    backdrop: Backdrop<SmallRng>,
    wave_step: f64,
    name_el: Option<Element>,
    meta_el: Option<Element>,
}

impl Scene {
    /// Match the backing store to the window at device resolution, then rebuild particles.
    fn resize(&mut self, win: &Window) {
        let width = win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let height = win.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let ratio = win.device_pixel_ratio();
        self.canvas.set_width((width * ratio) as u32);
        self.canvas.set_height((height * ratio) as u32);
        self.surface.scale_to_device(ratio);
        self.backdrop.resize(Viewport::new(width, height));
    }

    fn apply(&mut self, descriptor: &EmotionDescriptor) {
        self.backdrop.apply(descriptor);
        let state = &self.backdrop.state;
        if let Some(el) = &self.name_el {
            el.set_text_content(Some(state.emotion.id()));
        }
        if let Some(el) = &self.meta_el {
            el.set_text_content(Some(&state.meta_line()));
        }
    }

    fn tick(&mut self, now: f64) {
        self.backdrop.render(&self.surface, now, self.wave_step);
    }
}

thread_local! {
    static SCENE: RefCell<Option<Scene>> = const { RefCell::new(None) };
    static GATEWAY: RefCell<Option<BrowserGateway>> = const { RefCell::new(None) };
}

fn dom_err(what: &str) -> impl FnOnce(JsValue) -> MotionError + '_ {
    move |err| MotionError::Dom(format!("{what}: {err:?}"))
}

pub fn start(config: MotionConfig) -> MotionResult<()> {
    let win = window().ok_or_else(|| MotionError::Dom("no window".into()))?;
    let doc = win
        .document()
        .ok_or_else(|| MotionError::Dom("no document".into()))?;

    let canvas: HtmlCanvasElement = doc
        .get_element_by_id(&config.canvas_id)
        .ok_or_else(|| MotionError::Dom(format!("no element #{}", config.canvas_id)))?
        .dyn_into()
        .map_err(|_| MotionError::Dom(format!("#{} is not a canvas", config.canvas_id)))?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(dom_err("getContext"))?
        .ok_or_else(|| MotionError::Dom("2d context unavailable".into()))?
        .dyn_into()
        .map_err(|_| MotionError::Dom("context is not a CanvasRenderingContext2d".into()))?;

    let name_el = doc.get_element_by_id(&config.name_id);
    let meta_el = doc.get_element_by_id(&config.meta_id);
    if name_el.is_none() || meta_el.is_none() {
        tracing::warn!(name_id = %config.name_id, meta_id = %config.meta_id, "display elements missing");
    }

    let mut scene = Scene {
        canvas,
        surface: CanvasSurface::new(ctx),
        backdrop: Backdrop::new(Viewport::new(0.0, 0.0), SmallRng::from_entropy()),
        wave_step: config.wave_step,
        name_el,
        meta_el,
    };
    scene.resize(&win);
    SCENE.with(|cell| cell.replace(Some(scene)));

    let gateway = AnalysisGateway::new(
        Rc::new(HttpAnalyzer::new(config.endpoint.clone())),
        TimeoutScheduler,
        BrowserSpawner,
        config.debounce_ms,
    );
    GATEWAY.with(|cell| cell.replace(Some(gateway)));

    // Resize: new backing store and a fresh particle set
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            let Some(win) = window() else { return };
            SCENE.with(|cell| {
                if let Some(scene) = cell.borrow_mut().as_mut() {
                    scene.resize(&win);
                }
            });
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
            .map_err(dom_err("resize listener"))?;
        closure.forget();
    }

    // Text input drives analysis
    match doc
        .get_element_by_id(&config.input_id)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    {
        Some(input) => {
            let source = input.clone();
            let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
                request_analysis(source.value());
            }) as Box<dyn FnMut(_)>);
            input
                .add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())
                .map_err(dom_err("input listener"))?;
            closure.forget();
        }
        None => tracing::warn!(input_id = %config.input_id, "no text input found; only the initial analysis runs"),
    }

    tracing::info!(endpoint = %config.endpoint, debounce_ms = config.debounce_ms, "emotion motion started");
    request_analysis(String::new());
    start_frame_loop();
    Ok(())
}

fn request_analysis(text: String) {
    GATEWAY.with(|cell| {
        if let Some(gateway) = cell.borrow_mut().as_mut() {
            gateway.request(text, |descriptor| {
                SCENE.with(|scene_cell| {
                    if let Some(scene) = scene_cell.borrow_mut().as_mut() {
                        scene.apply(&descriptor);
                    }
                });
            });
        }
    });
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn request_frame(cb: &FrameCallback) {
    if let (Some(w), Some(closure)) = (window(), cb.borrow().as_ref()) {
        let _ = w.request_animation_frame(closure.as_ref().unchecked_ref());
    }
}

fn start_frame_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        SCENE.with(|cell| {
            if let Some(scene) = cell.borrow_mut().as_mut() {
                scene.tick(ts);
            }
        });
        request_frame(&f);
    }) as Box<dyn FnMut(f64)>));
    request_frame(&g);
}
