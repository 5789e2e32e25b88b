//! Named, hand-tuned configurations.
//! Each preset starts from the default document and adjusts the fields that
//! give it its look, so untouched modes keep their schema defaults.
//! Unknown names fall back to the default configuration.

use crate::model::Config;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    /// Dense, slow white flakes drifting downwards.
    Snow,
    /// Twinkling stars with faint links.
    NightSky,
    /// The classic linked dots with hover grab.
    SpacyDots,
    /// Large blue animated bubbles.
    Bubbles,
}

impl Preset {
    pub const ALL: [Preset; 4] = [Preset::Snow, Preset::NightSky, Preset::SpacyDots, Preset::Bubbles];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Snow => "snow",
            Preset::NightSky => "nightsky",
            Preset::SpacyDots => "spacydots",
            Preset::Bubbles => "bubbles",
        }
    }

    pub fn from_name(name: &str) -> Option<Preset> {
        Preset::ALL.into_iter().find(|p| p.name() == name)
    }

    pub fn config(self) -> Config {
        let mut config = Config::default();
        match self {
            Preset::Snow => apply_snow(&mut config),
            Preset::NightSky => apply_nightsky(&mut config),
            Preset::SpacyDots => apply_spacydots(&mut config),
            Preset::Bubbles => apply_bubbles(&mut config),
        }
        config
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Returns the named preset, or the default configuration for any other name.
pub fn preset(name: &str) -> Config {
    match Preset::from_name(name) {
        Some(p) => p.config(),
        None => Config::default(),
    }
}

// *************** Preset tuning ***************

fn apply_snow(config: &mut Config) {
    let p = &mut config.particles;
    p.number.value = 400;
    p.opacity.random = true;
    p.size.value = 3.0;
    p.line_linked.enable = false;
    p.movement.speed = 2.0;
    p.movement.direction = "bottom".to_string();
    p.movement.random = true;

    let events = &mut config.interactivity.events;
    events.onhover.enable = false;
    events.onclick.mode = "repulse".to_string();
}

fn apply_nightsky(config: &mut Config) {
    let p = &mut config.particles;
    p.number.value = 160;
    p.opacity.value = 0.8;
    p.opacity.random = true;
    p.opacity.anim.enable = true;
    p.size.value = 3.0;
    p.line_linked.distance = 100.0;
    p.line_linked.opacity = 0.2;
    p.movement.speed = 1.0;
    p.movement.random = true;

    let interactivity = &mut config.interactivity;
    interactivity.events.onhover.mode = "bubble".to_string();
    interactivity.modes.bubble.distance = 250.0;
    interactivity.modes.bubble.size = 5.0;
    interactivity.modes.bubble.duration = 2.0;
}

fn apply_spacydots(config: &mut Config) {
    let p = &mut config.particles;
    p.number.value = 120;
    p.size.value = 3.0;
    p.movement.speed = 3.0;

    let interactivity = &mut config.interactivity;
    interactivity.events.onhover.mode = "grab".to_string();
    interactivity.modes.grab.distance = 140.0;
    interactivity.modes.grab.line_linked.opacity = 1.0;
    interactivity.modes.push.particles_nb = 4;
}

fn apply_bubbles(config: &mut Config) {
    let p = &mut config.particles;
    p.number.value = 50;
    p.color.value = "#4285f4".into();
    p.opacity.random = true;
    p.opacity.anim.enable = true;
    p.opacity.anim.speed = 3.0;
    p.size.value = 15.0;
    p.size.anim.enable = true;
    p.size.anim.speed = 5.0;
    p.line_linked.enable = false;
    p.movement.speed = 3.0;
    p.movement.random = true;

    let interactivity = &mut config.interactivity;
    interactivity.events.onhover.mode = "bubble".to_string();
    interactivity.events.onclick.mode = "repulse".to_string();
    interactivity.modes.bubble.distance = 250.0;
    interactivity.modes.bubble.size = 0.0;
    interactivity.modes.bubble.duration = 2.0;
    interactivity.modes.bubble.opacity = 0.0;
    interactivity.modes.bubble.speed = 3.0;
    interactivity.modes.repulse.distance = 400.0;
    interactivity.modes.repulse.duration = 0.4;
}
