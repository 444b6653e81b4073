use super::config::FireworksConfig;
use super::motion::{Point, Trail, random_range, step};
use super::render::{Hsla, Stroke};

pub const ROCKET_TRAIL_LEN: usize = 3;

/// Outcome of one rocket tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RocketStep {
    Continue,
    /// Target reached: the rocket is finished and `at`/`hue` seed a burst.
    Burst { at: Point, hue: f64 },
}

/// Ascending flare travelling from a launch point toward its target.
#[derive(Clone, Debug)]
pub struct Rocket {
    launch: Point,
    target: Point,
    pos: Point,
    distance_to_target: f64,
    distance_traveled: f64,
    angle: f64,
    speed: f64,
    acceleration: f64,
    trail: Trail<ROCKET_TRAIL_LEN>,
    hue: f64,
    brightness: f64,
    /// Cosmetic halo radius cycling 1..8; never affects physics.
    target_radius: f64,
}

impl Rocket {
    pub fn new(
        launch: Point,
        target: Point,
        cfg: &FireworksConfig,
        rng: &mut fastrand::Rng,
    ) -> Self {
        Self {
            launch,
            target,
            pos: launch,
            distance_to_target: launch.distance_to(target),
            distance_traveled: 0.0,
            angle: launch.angle_to(target),
            speed: cfg.rocket_speed,
            acceleration: cfg.rocket_acceleration,
            trail: Trail::filled(launch),
            hue: random_range(rng, 0.0, 360.0),
            brightness: random_range(rng, cfg.rocket_brightness.min, cfg.rocket_brightness.max),
            target_radius: 1.0,
        }
    }

    pub fn advance(&mut self) -> RocketStep {
        self.trail.push(self.pos);

        if self.target_radius < 8.0 {
            self.target_radius += 0.3;
        } else {
            self.target_radius = 1.0;
        }

        self.speed *= self.acceleration;
        self.distance_traveled = self.launch.distance_to(self.pos);

        if self.distance_traveled >= self.distance_to_target {
            RocketStep::Burst {
                at: self.target,
                hue: self.hue,
            }
        } else {
            self.pos = step(self.pos, self.angle, self.speed, 0.0);
            RocketStep::Continue
        }
    }

    /// Streak from the oldest trail point to the current position.
    pub fn stroke(&self) -> Stroke {
        Stroke {
            from: self.trail.oldest().unwrap_or(self.pos),
            to: self.pos,
            color: Hsla::new(self.hue, self.brightness, 1.0),
        }
    }

    pub fn launch(&self) -> Point {
        self.launch
    }
    pub fn target(&self) -> Point {
        self.target
    }
    pub fn position(&self) -> Point {
        self.pos
    }
    pub fn distance_to_target(&self) -> f64 {
        self.distance_to_target
    }
    pub fn distance_traveled(&self) -> f64 {
        self.distance_traveled
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
    pub fn target_radius(&self) -> f64 {
        self.target_radius
    }
    pub fn trail(&self) -> &Trail<ROCKET_TRAIL_LEN> {
        &self.trail
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rocket(launch: Point, target: Point) -> Rocket {
        let mut rng = fastrand::Rng::with_seed(42);
        Rocket::new(launch, target, &FireworksConfig::default(), &mut rng)
    }

    #[test]
    fn zero_distance_rocket_bursts_on_first_advance() {
        let p = Point::new(200.0, 600.0);
        let mut r = rocket(p, p);
        match r.advance() {
            RocketStep::Burst { at, hue } => {
                assert_eq!(at, p);
                assert_eq!(hue, r.hue());
            }
            RocketStep::Continue => panic!("expected burst"),
        }
    }

    #[test]
    fn distance_and_speed_are_monotonic_until_burst() {
        let mut r = rocket(Point::new(50.0, 700.0), Point::new(400.0, 80.0));
        let mut last_dist = r.distance_traveled();
        let mut last_speed = r.speed();
        let mut ticks = 0;
        while r.advance() == RocketStep::Continue {
            assert!(r.distance_traveled() >= last_dist);
            assert!(r.speed() > last_speed);
            assert_eq!(r.trail().len(), ROCKET_TRAIL_LEN);
            last_dist = r.distance_traveled();
            last_speed = r.speed();
            ticks += 1;
            assert!(ticks < 1000, "rocket never burst");
        }
        assert!(r.distance_traveled() >= r.distance_to_target());
    }

    #[test]
    fn vertical_climb_matches_geometric_progression() {
        // speed_k = 2 * 1.05^k; position after n moves = 500 - sum_{k=1..n} speed_k
        let launch = Point::new(100.0, 500.0);
        let mut r = rocket(launch, Point::new(100.0, 0.0));
        let closed_form = |n: i32| 2.0 * 1.05 * (1.05f64.powi(n) - 1.0) / 0.05;

        let mut burst_tick = None;
        for tick in 1..=200 {
            match r.advance() {
                RocketStep::Continue => {
                    let climbed = launch.y - r.position().y;
                    assert!(
                        (climbed - closed_form(tick)).abs() < 1e-6,
                        "tick {tick}: climbed {climbed}, expected {}",
                        closed_form(tick)
                    );
                    // Distance is measured before the move, i.e. n - 1 steps.
                    assert!((r.distance_traveled() - closed_form(tick - 1)).abs() < 1e-6);
                }
                RocketStep::Burst { at, .. } => {
                    assert_eq!(at, Point::new(100.0, 0.0));
                    burst_tick = Some(tick);
                    break;
                }
            }
        }
        // First n with sum_{k=1..n-1} >= 500 is n = 54.
        assert_eq!(burst_tick, Some(54));
        assert!(closed_form(52) < 500.0 && closed_form(53) >= 500.0);
    }

    #[test]
    fn trail_starts_at_launch_and_stroke_reaches_current_position() {
        let launch = Point::new(10.0, 300.0);
        let mut r = rocket(launch, Point::new(10.0, 0.0));
        assert!(r.trail().iter().all(|p| *p == launch));
        r.advance();
        r.advance();
        let s = r.stroke();
        assert_eq!(s.from, launch);
        assert_eq!(s.to, r.position());
        assert_eq!(s.color.alpha, 1.0);
    }

    #[test]
    fn random_attributes_are_in_range() {
        let mut rng = fastrand::Rng::with_seed(3);
        let cfg = FireworksConfig::default();
        for _ in 0..200 {
            let r = Rocket::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0), &cfg, &mut rng);
            assert!((0.0..360.0).contains(&r.hue()));
            assert!((50.0..70.0).contains(&r.brightness()));
        }
    }

    #[test]
    fn target_radius_cycles_between_one_and_eight() {
        let mut r = rocket(Point::new(0.0, 10_000.0), Point::new(0.0, 0.0));
        let mut wrapped = false;
        for _ in 0..40 {
            let before = r.target_radius();
            r.advance();
            assert!(r.target_radius() >= 1.0 && r.target_radius() < 8.3);
            if r.target_radius() < before {
                wrapped = true;
                assert_eq!(r.target_radius(), 1.0);
            }
        }
        assert!(wrapped);
    }
}
