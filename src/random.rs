//! Randomized configurations and identifier synthesis.
//! The process-wide RNG is seeded once from the system clock so restarts don't
//! replay the same sequence; tests and `--seed` pin it instead.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::model::{ColorValue, Config, ShapeType};

pub const COLORS: [&str; 6] = ["#ffffff", "#e74c3c", "#3498db", "#2ecc71", "#f1c40f", "#9b59b6"];
pub const SHAPES: [&str; 5] = ["circle", "edge", "triangle", "polygon", "star"];
pub const DIRECTIONS: [&str; 9] = [
    "none",
    "top",
    "top-right",
    "right",
    "bottom-right",
    "bottom",
    "bottom-left",
    "left",
    "top-left",
];
pub const HOVER_MODES: [&str; 3] = ["grab", "bubble", "repulse"];
pub const CLICK_MODES: [&str; 4] = ["push", "remove", "bubble", "repulse"];

/// Builds a configuration with independently sampled appearance and behavior.
/// Fields not sampled keep their default values.
pub fn random_config<R: Rng + ?Sized>(rng: &mut R) -> Config {
    let mut config = Config::default();
    let p = &mut config.particles;

    p.number.value = rng.gen_range(50..200);
    p.color.value = ColorValue::Single(pick(rng, &COLORS));
    p.shape.kind = ShapeType::Single(pick(rng, &SHAPES));

    p.size.value = f64::from(rng.gen_range(1..=10u32));
    p.size.random = rng.gen_bool(0.5);

    p.opacity.value = rng.gen_range(0.1..1.0);
    p.opacity.random = rng.gen_bool(0.5);

    p.movement.speed = f64::from(rng.gen_range(1..=10u32));
    p.movement.direction = pick(rng, &DIRECTIONS);
    p.movement.random = rng.gen_bool(0.5);
    p.movement.straight = rng.gen_bool(0.5);

    p.line_linked.enable = rng.gen_bool(0.5);
    if p.line_linked.enable {
        p.line_linked.distance = f64::from(rng.gen_range(100..400u32));
        p.line_linked.opacity = rng.gen_range(0.1..1.0);
        p.line_linked.width = f64::from(rng.gen_range(1..=5u32));
    }

    let events = &mut config.interactivity.events;
    events.onhover.enable = rng.gen_bool(0.5);
    events.onhover.mode = pick(rng, &HOVER_MODES);
    events.onclick.enable = rng.gen_bool(0.5);
    events.onclick.mode = pick(rng, &CLICK_MODES);

    config
}

fn pick<R: Rng + ?Sized>(rng: &mut R, choices: &[&str]) -> String {
    choices[rng.gen_range(0..choices.len())].to_string()
}

/// Shared RNG handing out random configurations and snippet identifiers.
pub struct ConfigRandomizer {
    rng: Mutex<StdRng>,
}

impl ConfigRandomizer {
    /// Seeds from the current time.
    pub fn from_clock() -> Self {
        Self::with_seed(clock_seed())
    }

    /// Deterministic stream for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn random_config(&self) -> Config {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        random_config(&mut *rng)
    }

    /// A fresh snippet configuration id: `particles-<non-negative i64>`.
    pub fn synthesize_id(&self) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        format!("particles-{}", rng.gen_range(0..i64::MAX))
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: usize = 1000;

    #[test]
    fn test_random_config_respects_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..SAMPLES {
            let config = random_config(&mut rng);
            let p = &config.particles;
            assert!((50..200).contains(&p.number.value), "number {}", p.number.value);
            assert!((1.0..=10.0).contains(&p.size.value), "size {}", p.size.value);
            assert!((0.1..1.0).contains(&p.opacity.value), "opacity {}", p.opacity.value);
            assert!((1.0..=10.0).contains(&p.movement.speed), "speed {}", p.movement.speed);
            assert!(DIRECTIONS.contains(&p.movement.direction.as_str()));
            assert!(HOVER_MODES.contains(&config.interactivity.events.onhover.mode.as_str()));
            assert!(CLICK_MODES.contains(&config.interactivity.events.onclick.mode.as_str()));
        }
    }

    #[test]
    fn test_random_config_draws_from_palettes() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..SAMPLES {
            let config = random_config(&mut rng);
            match &config.particles.color.value {
                ColorValue::Single(c) => assert!(COLORS.contains(&c.as_str())),
                other => panic!("unexpected color {:?}", other),
            }
            match &config.particles.shape.kind {
                ShapeType::Single(s) => assert!(SHAPES.contains(&s.as_str())),
                other => panic!("unexpected shape {:?}", other),
            }
        }
    }

    #[test]
    fn test_line_linking_randomized_only_when_enabled() {
        let mut rng = StdRng::seed_from_u64(3);
        let default_links = Config::default().particles.line_linked;
        let (mut enabled, mut disabled) = (0, 0);
        for _ in 0..SAMPLES {
            let links = random_config(&mut rng).particles.line_linked;
            if links.enable {
                enabled += 1;
                assert!((100.0..400.0).contains(&links.distance));
                assert!((0.1..1.0).contains(&links.opacity));
                assert!((1.0..=5.0).contains(&links.width));
            } else {
                disabled += 1;
                assert_eq!(links.distance, default_links.distance);
                assert_eq!(links.width, default_links.width);
            }
        }
        assert!(enabled > 0 && disabled > 0);
    }

    #[test]
    fn test_seeded_randomizer_is_reproducible() {
        let a = ConfigRandomizer::with_seed(42);
        let b = ConfigRandomizer::with_seed(42);
        assert_eq!(a.random_config(), b.random_config());
        assert_eq!(a.synthesize_id(), b.synthesize_id());
    }

    #[test]
    fn test_synthesized_ids_vary() {
        let randomizer = ConfigRandomizer::with_seed(1);
        let first = randomizer.synthesize_id();
        let second = randomizer.synthesize_id();
        assert!(first.starts_with("particles-"));
        assert_ne!(first, second);
    }
}
