//! Fireworks canvas engine.
//!
//! Rockets climb from the bottom of the canvas toward a tap (or a random
//! point when auto-launching) and burst into sparks that slow, fall and fade.
//! The physics is frame-stepped: one `requestAnimationFrame` callback runs
//! exactly one [`Simulation::frame`].
//!
//! Layout:
//! - `motion`: points, trail rings, the shared step rule
//! - `rocket` / `spark`: the two entity kinds
//! - `sim`: owned simulation state (object pool + auto-launch clock)
//! - `render`: `Surface` trait and the canvas compositor
//! - `driver`: start / frame / stop lifecycle over a `Host`
//!
//! This file holds the browser glue: [`BrowserHost`] and the JS-facing
//! [`FireworksShow`] handle.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window, window};

pub mod config;
pub mod driver;
pub mod motion;
pub mod render;
pub mod rocket;
pub mod sim;
pub mod spark;

pub use config::{ConfigError, FireworksConfig, Range};
pub use driver::{Driver, Host, HostEvent, Lifecycle};
pub use motion::{Point, Trail, step};
pub use render::{Blend, CanvasSurface, Hsla, Stroke, Surface};
pub use rocket::{ROCKET_TRAIL_LEN, Rocket, RocketStep};
pub use sim::{Simulation, TickSummary, entropy_seed};
pub use spark::{SPARK_TRAIL_LEN, Spark, SparkStep};

type BrowserDriver = Driver<BrowserHost, CanvasSurface>;

// --- Browser host -----------------------------------------------------------

/// `requestAnimationFrame` + DOM listeners. Callbacks hold only a `Weak`
/// reference to the driver, so dropping the driver frees the closures.
pub struct BrowserHost {
    window: Window,
    canvas: HtmlCanvasElement,
    frame_cb: Option<Closure<dyn FnMut(f64)>>,
    tap_cb: Option<Closure<dyn FnMut(MouseEvent)>>,
    resize_cb: Option<Closure<dyn FnMut()>>,
}

impl BrowserHost {
    fn new(
        window: Window,
        canvas: HtmlCanvasElement,
        driver: Weak<RefCell<BrowserDriver>>,
    ) -> Self {
        let d = driver.clone();
        let frame_cb = Closure::wrap(Box::new(move |_ts: f64| {
            if let Some(driver) = d.upgrade() {
                if let Ok(mut driver) = driver.try_borrow_mut() {
                    driver.on_frame();
                }
            }
        }) as Box<dyn FnMut(f64)>);

        let d = driver.clone();
        let tap_cb = Closure::wrap(Box::new(move |evt: MouseEvent| {
            // offset_* is canvas-local, matching the simulation's coordinates.
            let at = Point::new(evt.offset_x() as f64, evt.offset_y() as f64);
            if let Some(driver) = d.upgrade() {
                if let Ok(mut driver) = driver.try_borrow_mut() {
                    driver.on_tap(at);
                }
            }
        }) as Box<dyn FnMut(MouseEvent)>);

        let d = driver;
        let win = window.clone();
        let resize_cb = Closure::wrap(Box::new(move || {
            let (w, h) = viewport_size(&win);
            if let Some(driver) = d.upgrade() {
                if let Ok(mut driver) = driver.try_borrow_mut() {
                    driver.on_resize(w, h);
                }
            }
        }) as Box<dyn FnMut()>);

        Self {
            window,
            canvas,
            frame_cb: Some(frame_cb),
            tap_cb: Some(tap_cb),
            resize_cb: Some(resize_cb),
        }
    }
}

impl Host for BrowserHost {
    type Frame = i32;

    fn schedule_frame(&mut self) -> Option<i32> {
        let cb = self.frame_cb.as_ref()?;
        self.window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .ok()
    }

    fn cancel_frame(&mut self, frame: i32) {
        let _ = self.window.cancel_animation_frame(frame);
    }

    fn listen(&mut self, event: HostEvent) -> bool {
        match event {
            HostEvent::Tap => self.tap_cb.as_ref().is_some_and(|cb| {
                self.canvas
                    .add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
                    .is_ok()
            }),
            HostEvent::Resize => self.resize_cb.as_ref().is_some_and(|cb| {
                self.window
                    .add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())
                    .is_ok()
            }),
        }
    }

    fn unlisten(&mut self, event: HostEvent) {
        match event {
            HostEvent::Tap => {
                if let Some(cb) = &self.tap_cb {
                    let _ = self
                        .canvas
                        .remove_event_listener_with_callback("click", cb.as_ref().unchecked_ref());
                }
            }
            HostEvent::Resize => {
                if let Some(cb) = &self.resize_cb {
                    let _ = self
                        .window
                        .remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
                }
            }
        }
    }
}

fn viewport_size(win: &Window) -> (f64, f64) {
    let w = win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let h = win.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (w, h)
}

// --- WASM Entry --------------------------------------------------------------

/// Handle to a running show. Dropping it (or calling `free()` from JS) stops
/// the loop and removes the listeners.
#[wasm_bindgen]
pub struct FireworksShow {
    driver: Option<Rc<RefCell<BrowserDriver>>>,
}

#[wasm_bindgen]
impl FireworksShow {
    /// Stop scheduling frames and unregister tap/resize listeners.
    pub fn stop(&mut self) {
        if let Some(driver) = self.driver.take() {
            if let Ok(mut d) = driver.try_borrow_mut() {
                d.stop();
                console_log!("fireworks: stopped after {} frames", d.simulation().frames());
            }
        }
    }

    /// Launch one rocket from bottom-centre toward `(x, y)`.
    pub fn launch_at(&self, x: f64, y: f64) {
        if let Some(driver) = &self.driver {
            if let Ok(mut d) = driver.try_borrow_mut() {
                d.launch_at(Point::new(x, y));
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.driver
            .as_ref()
            .and_then(|d| d.try_borrow().ok().map(|d| d.is_running()))
            .unwrap_or(false)
    }
}

impl Drop for FireworksShow {
    fn drop(&mut self) {
        self.stop();
    }
}

#[wasm_bindgen]
pub fn start_fireworks(canvas_id: &str) -> Result<FireworksShow, JsValue> {
    start_show(canvas_id, FireworksConfig::default())
}

/// Like `start_fireworks`, with a (partial) JSON `FireworksConfig`.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_fireworks_with_config(
    canvas_id: &str,
    config_json: &str,
) -> Result<FireworksShow, JsValue> {
    let config = FireworksConfig::from_json(config_json)?;
    start_show(canvas_id, config)
}

fn start_show(canvas_id: &str, config: FireworksConfig) -> Result<FireworksShow, JsValue> {
    config.validate()?;
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas: HtmlCanvasElement = doc
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("no canvas with id `{canvas_id}`")))?
        .dyn_into()?;

    // No 2-D context: stay inert rather than fail the host page.
    let Some(ctx) = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
    else {
        console_log!("fireworks: canvas `{}` has no 2d context, not starting", canvas_id);
        return Ok(FireworksShow { driver: None });
    };

    let (width, height) = viewport_size(&win);
    let mut surface = CanvasSurface::new(canvas.clone(), ctx);
    surface.resize(width, height);
    let sim = Simulation::with_entropy(width, height, config);

    let driver = Rc::new_cyclic(|weak: &Weak<RefCell<BrowserDriver>>| {
        let host = BrowserHost::new(win.clone(), canvas, weak.clone());
        RefCell::new(Driver::new(host, surface, sim))
    });
    driver.borrow_mut().start();
    console_log!("fireworks: started on `{}` at {}x{}", canvas_id, width, height);

    Ok(FireworksShow {
        driver: Some(driver),
    })
}
