//! Prize-wheel geometry.
//!
//! Segments are painted clockwise starting at 12 o'clock (the way a CSS
//! `conic-gradient` lays them out), each `360 / n` degrees wide. The wheel
//! is turned clockwise by `rotation` degrees under a fixed pointer at the
//! top. A clockwise turn of `R` brings wheel-local angle `-R (mod 360)` under
//! the pointer, so the winner is the segment containing that angle.

use wasm_bindgen::prelude::*;

/// Full turns added to every spin: `MIN_TURNS..MIN_TURNS + EXTRA_TURNS`.
pub const MIN_TURNS: u32 = 5;
pub const EXTRA_TURNS: u32 = 5;

/// Index of the segment under the top pointer after a clockwise rotation of
/// `rotation_deg`. `None` when there are no segments or the angle is not
/// finite.
pub fn segment_under_pointer(rotation_deg: f64, segments: u32) -> Option<u32> {
    if segments == 0 || !rotation_deg.is_finite() {
        return None;
    }
    let width = 360.0 / segments as f64;
    let local = (-rotation_deg).rem_euclid(360.0);
    let idx = (local / width).floor() as u32;
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    Some(idx.min(segments - 1))
}

/// Centre angle of segment `index` in wheel-local degrees (label placement).
pub fn segment_center(index: u32, segments: u32) -> Option<f64> {
    if segments == 0 || index >= segments {
        return None;
    }
    let width = 360.0 / segments as f64;
    Some(index as f64 * width + width / 2.0)
}

/// A planned spin: where the wheel ends up and which segment wins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpinPlan {
    pub from: f64,
    pub to: f64,
}

impl SpinPlan {
    /// Several full turns plus a random whole-degree offset.
    pub fn new(current_rotation: f64, rng: &mut fastrand::Rng) -> Self {
        let offset = rng.u32(0..360) as f64;
        let turns = (MIN_TURNS + rng.u32(0..EXTRA_TURNS)) as f64;
        Self {
            from: current_rotation,
            to: current_rotation + turns * 360.0 + offset,
        }
    }

    pub fn winner(&self, segments: u32) -> Option<u32> {
        segment_under_pointer(self.to, segments)
    }
}

#[wasm_bindgen]
pub fn wheel_segment_at(rotation_deg: f64, segments: u32) -> Option<u32> {
    segment_under_pointer(rotation_deg, segments)
}

/// Wheel-local angle (degrees) where segment `index`'s label sits.
#[wasm_bindgen]
pub fn wheel_label_angle(index: u32, segments: u32) -> Option<f64> {
    segment_center(index, segments)
}

/// Target rotation (degrees) for the next spin starting at `current_rotation`.
#[wasm_bindgen]
pub fn plan_wheel_spin(current_rotation: f64) -> f64 {
    let mut rng = fastrand::Rng::with_seed(crate::fireworks::entropy_seed());
    SpinPlan::new(current_rotation, &mut rng).to
}
