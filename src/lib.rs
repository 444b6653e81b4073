//! Tet Fireworks core crate.
//!
//! Canvas fireworks for the lunar-new-year companion app: tap to launch a
//! rocket, or let the auto-launcher fill the sky. The host page calls
//! `start_fireworks(canvas_id)` and keeps the returned handle; calling
//! `stop()` (or freeing the handle) tears the loop down.
//!
//! The prize-wheel angle helpers live here too since the arcade screens
//! share this module.

use wasm_bindgen::prelude::*;

/// `println!`-style logging to the browser console. No-op off wasm32 so the
/// native test suite never touches JS imports.
macro_rules! console_log {
    ($($t:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(&format!($($t)*)));
        #[cfg(not(target_arch = "wasm32"))]
        let _ = format!($($t)*);
    }};
}

pub mod fireworks;
pub mod wheel;

pub use fireworks::{FireworksConfig, FireworksShow, Point, Simulation, start_fireworks};
pub use wheel::{SpinPlan, segment_under_pointer};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
