//! Simulation clock and object pool.
//!
//! A `Simulation` owns every live rocket and spark plus the auto-launch
//! counter and its RNG. One call to [`Simulation::frame`] is one animation
//! frame; [`Simulation::tick`] is the same state transition without drawing.

use super::config::FireworksConfig;
use super::motion::{Point, random_range};
use super::render::{Blend, Surface};
use super::rocket::{Rocket, RocketStep};
use super::spark::{Spark, SparkStep};

/// What happened during one tick. Diagnostic only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub launched: bool,
    pub bursts: usize,
    pub expired: usize,
}

pub struct Simulation {
    config: FireworksConfig,
    rng: fastrand::Rng,
    width: f64,
    height: f64,
    rockets: Vec<Rocket>,
    sparks: Vec<Spark>,
    launch_counter: u32,
    frames: u64,
}

impl Simulation {
    pub fn new(width: f64, height: f64, config: FireworksConfig, seed: u64) -> Self {
        Self {
            config,
            rng: fastrand::Rng::with_seed(seed),
            width,
            height,
            rockets: Vec::new(),
            sparks: Vec::new(),
            launch_counter: 0,
            frames: 0,
        }
    }

    /// Seeded from OS / browser entropy.
    pub fn with_entropy(width: f64, height: f64, config: FireworksConfig) -> Self {
        Self::new(width, height, config, entropy_seed())
    }

    pub fn rockets(&self) -> &[Rocket] {
        &self.rockets
    }
    pub fn sparks(&self) -> &[Spark] {
        &self.sparks
    }
    pub fn launch_counter(&self) -> u32 {
        self.launch_counter
    }
    pub fn frames(&self) -> u64 {
        self.frames
    }
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Bottom-centre of the viewport, where tap launches start.
    pub fn launch_origin(&self) -> Point {
        Point::new(self.width / 2.0, self.height)
    }

    /// Tap path: launch one rocket from bottom-centre toward `target`.
    pub fn launch(&mut self, target: Point) {
        let origin = self.launch_origin();
        self.launch_from(origin, target);
    }

    pub fn launch_from(&mut self, origin: Point, target: Point) {
        let rocket = Rocket::new(origin, target, &self.config, &mut self.rng);
        self.rockets.push(rocket);
    }

    /// Live entities keep their logical coordinates.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// One animation frame: fade, auto-launch, draw, then advance.
    pub fn frame(&mut self, surface: &mut impl Surface) -> TickSummary {
        surface.fade(self.config.fade_alpha);
        surface.set_blend(Blend::Additive);

        let launched = self.auto_launch();
        for rocket in &self.rockets {
            surface.stroke(&rocket.stroke());
        }
        for spark in &self.sparks {
            surface.stroke(&spark.stroke());
        }
        let mut summary = self.advance();
        summary.launched = launched;
        summary
    }

    /// Same state transition as [`frame`](Self::frame) without drawing.
    pub fn tick(&mut self) -> TickSummary {
        let launched = self.auto_launch();
        let mut summary = self.advance();
        summary.launched = launched;
        summary
    }

    fn auto_launch(&mut self) -> bool {
        self.launch_counter += 1;
        if self.launch_counter <= self.config.auto_launch_frames {
            return false;
        }
        self.launch_counter = 0;
        if self.rng.f64() >= self.config.auto_launch_chance {
            return false;
        }
        let jitter = self.config.auto_launch_jitter;
        let origin = Point::new(
            self.width / 2.0 + random_range(&mut self.rng, -jitter, jitter),
            self.height,
        );
        let target = Point::new(
            random_range(&mut self.rng, 0.0, self.width),
            random_range(&mut self.rng, 0.0, self.height / 2.0),
        );
        self.launch_from(origin, target);
        true
    }

    fn advance(&mut self) -> TickSummary {
        self.frames += 1;
        let mut bursts = Vec::new();
        self.rockets.retain_mut(|rocket| match rocket.advance() {
            RocketStep::Continue => true,
            RocketStep::Burst { at, hue } => {
                bursts.push((at, hue));
                false
            }
        });

        for &(at, hue) in &bursts {
            for _ in 0..self.config.spark_count {
                let spark = Spark::new(at, hue, &self.config, &mut self.rng);
                self.sparks.push(spark);
            }
        }

        // Sparks spawned this frame get their first step immediately.
        let before = self.sparks.len();
        self.sparks.retain_mut(|spark| spark.advance() == SparkStep::Alive);

        TickSummary {
            launched: false,
            bursts: bursts.len(),
            expired: before - self.sparks.len(),
        }
    }
}

/// 64-bit seed from `getrandom`; falls back to the performance clock.
pub fn entropy_seed() -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(_) => fallback_seed(),
    }
}

#[cfg(target_arch = "wasm32")]
fn fallback_seed() -> u64 {
    let now = web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0);
    (now * 1000.0) as u64 ^ 0x9E37_79B9_7F4A_7C15
}

#[cfg(not(target_arch = "wasm32"))]
fn fallback_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
        ^ 0x9E37_79B9_7F4A_7C15
}
