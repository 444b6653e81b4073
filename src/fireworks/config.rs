//! Tunable physics / render constants for the fireworks engine.
//!
//! Defaults reproduce the look of the Tet app's fireworks screen. With the
//! `serde` feature the whole struct can be supplied from JS; missing fields
//! fall back to the defaults.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Half-open `[min, max)` range for a random draw.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FireworksConfig {
    // --- Rocket ---
    pub rocket_speed: f64,        // initial px per frame
    pub rocket_acceleration: f64, // speed multiplier per frame, > 1
    pub rocket_brightness: Range, // HSL lightness %
    // --- Burst / Spark ---
    pub spark_count: usize,
    pub spark_speed: Range,
    pub spark_friction: f64, // speed multiplier per frame, in (0, 1)
    pub spark_gravity: f64,  // px added to y per frame
    pub spark_hue_spread: f64,
    pub spark_brightness: Range,
    pub spark_decay: Range, // alpha lost per frame
    // --- Compositor ---
    pub fade_alpha: f64, // lower = longer trails
    // --- Auto launch ---
    pub auto_launch_frames: u32, // attempt once the counter exceeds this
    pub auto_launch_chance: f64,
    pub auto_launch_jitter: f64, // +/- px around bottom-centre
}

impl Default for FireworksConfig {
    fn default() -> Self {
        Self {
            rocket_speed: 2.0,
            rocket_acceleration: 1.05,
            rocket_brightness: Range::new(50.0, 70.0),
            spark_count: 80,
            spark_speed: Range::new(1.0, 10.0),
            spark_friction: 0.95,
            spark_gravity: 0.04,
            spark_hue_spread: 20.0,
            spark_brightness: Range::new(50.0, 80.0),
            spark_decay: Range::new(0.015, 0.03),
            fade_alpha: 0.15,
            auto_launch_frames: 40,
            auto_launch_chance: 0.7,
            auto_launch_jitter: 200.0,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    /// A scalar field is NaN/infinite or outside its allowed interval.
    OutOfRange {
        field: &'static str,
        value: f64,
    },
    /// A `Range` field is non-finite or has `min > max`.
    BadRange {
        field: &'static str,
        range: Range,
    },
    NoSparks,
    #[cfg(feature = "serde_json")]
    Json(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::OutOfRange { field, value } => {
                write!(f, "config field `{field}` out of range: {value}")
            }
            ConfigError::BadRange { field, range } => {
                write!(
                    f,
                    "config range `{field}` invalid: [{}, {})",
                    range.min, range.max
                )
            }
            ConfigError::NoSparks => write!(f, "config field `spark_count` must be at least 1"),
            #[cfg(feature = "serde_json")]
            ConfigError::Json(e) => write!(f, "invalid fireworks config json: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(feature = "serde_json")]
            ConfigError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for wasm_bindgen::JsValue {
    fn from(e: ConfigError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

impl FireworksConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let check = |field: &'static str, value: f64, ok: bool| {
            if value.is_finite() && ok {
                Ok(())
            } else {
                Err(ConfigError::OutOfRange { field, value })
            }
        };
        check("rocket_speed", self.rocket_speed, self.rocket_speed > 0.0)?;
        check(
            "rocket_acceleration",
            self.rocket_acceleration,
            self.rocket_acceleration > 1.0,
        )?;
        check(
            "spark_friction",
            self.spark_friction,
            self.spark_friction > 0.0 && self.spark_friction < 1.0,
        )?;
        check(
            "spark_gravity",
            self.spark_gravity,
            self.spark_gravity >= 0.0,
        )?;
        check(
            "spark_hue_spread",
            self.spark_hue_spread,
            self.spark_hue_spread >= 0.0,
        )?;
        check(
            "fade_alpha",
            self.fade_alpha,
            (0.0..=1.0).contains(&self.fade_alpha),
        )?;
        check(
            "auto_launch_chance",
            self.auto_launch_chance,
            (0.0..=1.0).contains(&self.auto_launch_chance),
        )?;
        check(
            "auto_launch_jitter",
            self.auto_launch_jitter,
            self.auto_launch_jitter >= 0.0,
        )?;

        let ranges = [
            ("rocket_brightness", self.rocket_brightness),
            ("spark_speed", self.spark_speed),
            ("spark_brightness", self.spark_brightness),
            ("spark_decay", self.spark_decay),
        ];
        for (field, range) in ranges {
            if !range.is_valid() {
                return Err(ConfigError::BadRange { field, range });
            }
        }
        // A spark must always fade out.
        if self.spark_decay.min <= 0.0 {
            return Err(ConfigError::BadRange {
                field: "spark_decay",
                range: self.spark_decay,
            });
        }
        if self.spark_count == 0 {
            return Err(ConfigError::NoSparks);
        }
        Ok(())
    }

    /// Parse and validate a (possibly partial) JSON config.
    #[cfg(feature = "serde_json")]
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let cfg: FireworksConfig = serde_json::from_str(s).map_err(ConfigError::Json)?;
        cfg.validate()?;
        Ok(cfg)
    }
}
