use super::config::FireworksConfig;
use super::motion::{Point, Trail, random_range, step};
use super::render::{Hsla, Stroke};

pub const SPARK_TRAIL_LEN: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SparkStep {
    Alive,
    Expired,
}

/// One ember of a burst. Slows by friction, falls by gravity, fades by `decay`.
#[derive(Clone, Debug)]
pub struct Spark {
    pos: Point,
    angle: f64,
    speed: f64,
    friction: f64,
    gravity: f64,
    trail: Trail<SPARK_TRAIL_LEN>,
    hue: f64,
    brightness: f64,
    alpha: f64,
    decay: f64,
}

impl Spark {
    pub fn new(
        origin: Point,
        parent_hue: f64,
        cfg: &FireworksConfig,
        rng: &mut fastrand::Rng,
    ) -> Self {
        let spread = cfg.spark_hue_spread;
        Self {
            pos: origin,
            angle: random_range(rng, 0.0, std::f64::consts::TAU),
            speed: random_range(rng, cfg.spark_speed.min, cfg.spark_speed.max),
            friction: cfg.spark_friction,
            gravity: cfg.spark_gravity,
            trail: Trail::filled(origin),
            hue: random_range(rng, parent_hue - spread, parent_hue + spread),
            brightness: random_range(rng, cfg.spark_brightness.min, cfg.spark_brightness.max),
            alpha: 1.0,
            decay: random_range(rng, cfg.spark_decay.min, cfg.spark_decay.max),
        }
    }

    /// Fix the per-instance random draws (heading, speed, decay).
    pub fn with_motion(mut self, angle: f64, speed: f64, decay: f64) -> Self {
        self.angle = angle;
        self.speed = speed;
        self.decay = decay;
        self
    }

    pub fn advance(&mut self) -> SparkStep {
        self.trail.push(self.pos);
        self.speed *= self.friction;
        self.pos = step(self.pos, self.angle, self.speed, self.gravity);
        self.alpha -= self.decay;

        if self.alpha <= self.decay {
            SparkStep::Expired
        } else {
            SparkStep::Alive
        }
    }

    pub fn stroke(&self) -> Stroke {
        Stroke {
            from: self.trail.oldest().unwrap_or(self.pos),
            to: self.pos,
            color: Hsla::new(self.hue, self.brightness, self.alpha),
        }
    }

    pub fn position(&self) -> Point {
        self.pos
    }
    pub fn angle(&self) -> f64 {
        self.angle
    }
    pub fn speed(&self) -> f64 {
        self.speed
    }
    pub fn hue(&self) -> f64 {
        self.hue
    }
    pub fn brightness(&self) -> f64 {
        self.brightness
    }
    pub fn alpha(&self) -> f64 {
        self.alpha
    }
    pub fn decay(&self) -> f64 {
        self.decay
    }
    pub fn trail(&self) -> &Trail<SPARK_TRAIL_LEN> {
        &self.trail
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spark(origin: Point, hue: f64) -> Spark {
        let mut rng = fastrand::Rng::with_seed(11);
        Spark::new(origin, hue, &FireworksConfig::default(), &mut rng)
    }

    #[test]
    fn decay_of_two_percent_expires_on_tick_49() {
        // ceil(1.0 / 0.02) - 1 = 49
        let mut s = spark(Point::new(0.0, 0.0), 120.0).with_motion(0.0, 5.0, 0.02);
        let mut last_alpha = s.alpha();
        for tick in 1..=48 {
            assert_eq!(s.advance(), SparkStep::Alive, "expired early on tick {tick}");
            assert!(s.alpha() < last_alpha);
            assert!((last_alpha - s.alpha() - 0.02).abs() < 1e-9);
            last_alpha = s.alpha();
        }
        assert_eq!(s.advance(), SparkStep::Expired);
        assert!(s.alpha() <= s.decay());
    }

    #[test]
    fn speed_decays_and_gravity_pulls_down() {
        // Heading straight right: any y change comes from gravity alone.
        let mut s = spark(Point::new(0.0, 0.0), 0.0).with_motion(0.0, 8.0, 0.015);
        let mut last_speed = s.speed();
        for tick in 1..=20 {
            let before = s.position();
            s.advance();
            assert!(s.speed() < last_speed);
            assert!((s.speed() - last_speed * 0.95).abs() < 1e-12);
            let dy = s.position().y - before.y;
            assert!((dy - 0.04).abs() < 1e-12, "tick {tick}: dy {dy}");
            assert!(s.position().x > before.x);
            assert_eq!(s.trail().len(), SPARK_TRAIL_LEN);
            last_speed = s.speed();
        }
    }

    #[test]
    fn random_draws_respect_configured_ranges() {
        let mut rng = fastrand::Rng::with_seed(99);
        let cfg = FireworksConfig::default();
        for _ in 0..500 {
            let s = Spark::new(Point::new(5.0, 5.0), 200.0, &cfg, &mut rng);
            assert!((180.0..220.0).contains(&s.hue()));
            assert!((1.0..10.0).contains(&s.speed()));
            assert!((50.0..80.0).contains(&s.brightness()));
            assert!((0.015..0.03).contains(&s.decay()));
            assert!((0.0..std::f64::consts::TAU).contains(&s.angle()));
            assert_eq!(s.alpha(), 1.0);
        }
    }

    #[test]
    fn stroke_fades_with_alpha() {
        let origin = Point::new(30.0, 40.0);
        let mut s = spark(origin, 10.0).with_motion(1.0, 3.0, 0.025);
        s.advance();
        let stroke = s.stroke();
        assert_eq!(stroke.from, origin);
        assert_eq!(stroke.to, s.position());
        assert!((stroke.color.alpha - 0.975).abs() < 1e-12);
    }
}
