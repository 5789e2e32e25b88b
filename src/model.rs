//! Configuration model.
//! Mirrors the JSON document particles.js expects from `particlesJS.load`.
//! Every field is always present in the serialized output: the library reads
//! the whole tree without null checks, so unused modes still carry values.

use serde::{Deserialize, Serialize};

use crate::error::Result;

// *************** Open-typed values ***************

/// A particle color: one value, or a list the library picks from per particle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    Single(String),
    Multiple(Vec<String>),
}

/// A particle shape name: one shape, or a list the library picks from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShapeType {
    Single(String),
    Multiple(Vec<String>),
}

impl From<&str> for ColorValue {
    fn from(value: &str) -> Self {
        ColorValue::Single(value.to_string())
    }
}

impl From<&str> for ShapeType {
    fn from(value: &str) -> Self {
        ShapeType::Single(value.to_string())
    }
}

/// Splits "a,b,c" into a list, keeping a plain value as a single entry.
pub(crate) fn split_list(value: &str) -> Option<Vec<String>> {
    if !value.contains(',') {
        return None;
    }
    Some(
        value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

// *************** particles ***************

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NumberDensity {
    pub enable: bool,
    pub value_area: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Number {
    pub value: u32,
    pub density: NumberDensity,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub value: ColorValue,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeStroke {
    pub width: f64,
    pub color: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapePolygon {
    pub nb_sides: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeImage {
    pub src: String,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    #[serde(rename = "type")]
    pub kind: ShapeType,
    pub stroke: ShapeStroke,
    pub polygon: ShapePolygon,
    pub image: ShapeImage,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OpacityAnimation {
    pub enable: bool,
    pub speed: f64,
    pub opacity_min: f64,
    pub sync: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Opacity {
    pub value: f64,
    pub random: bool,
    pub anim: OpacityAnimation,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SizeAnimation {
    pub enable: bool,
    pub speed: f64,
    pub size_min: f64,
    pub sync: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub value: f64,
    pub random: bool,
    pub anim: SizeAnimation,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineLinked {
    pub enable: bool,
    pub distance: f64,
    pub color: String,
    pub opacity: f64,
    pub width: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveAttract {
    pub enable: bool,
    #[serde(rename = "rotateX")]
    pub rotate_x: f64,
    #[serde(rename = "rotateY")]
    pub rotate_y: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Move {
    pub enable: bool,
    pub speed: f64,
    pub direction: String,
    pub random: bool,
    pub straight: bool,
    pub out_mode: String,
    pub bounce: bool,
    pub attract: MoveAttract,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Particles {
    pub number: Number,
    pub color: Color,
    pub shape: Shape,
    pub opacity: Opacity,
    pub size: Size,
    pub line_linked: LineLinked,
    #[serde(rename = "move")]
    pub movement: Move,
}

// *************** interactivity ***************

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventMode {
    pub enable: bool,
    pub mode: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Events {
    pub onhover: EventMode,
    pub onclick: EventMode,
    pub resize: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrabLineLinked {
    pub opacity: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrabMode {
    pub distance: f64,
    pub line_linked: GrabLineLinked,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BubbleMode {
    pub distance: f64,
    pub size: f64,
    pub duration: f64,
    pub opacity: f64,
    pub speed: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RepulseMode {
    pub distance: f64,
    pub duration: f64,
}

/// Shared by `push` and `remove`: how many particles the click adds or takes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CountMode {
    pub particles_nb: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Modes {
    pub grab: GrabMode,
    pub bubble: BubbleMode,
    pub repulse: RepulseMode,
    pub push: CountMode,
    pub remove: CountMode,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Interactivity {
    pub detect_on: String,
    pub events: Events,
    pub modes: Modes,
}

// *************** root ***************

/// A complete particles.js configuration document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub particles: Particles,
    pub interactivity: Interactivity,
    pub retina_detect: bool,
}

impl Config {
    /// Encodes the configuration as compact JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            particles: Particles {
                number: Number {
                    value: 80,
                    density: NumberDensity {
                        enable: true,
                        value_area: 800.0,
                    },
                },
                color: Color {
                    value: "#ffffff".into(),
                },
                shape: Shape {
                    kind: "circle".into(),
                    stroke: ShapeStroke {
                        width: 0.0,
                        color: "#000000".to_string(),
                    },
                    polygon: ShapePolygon { nb_sides: 5 },
                    image: ShapeImage {
                        src: String::new(),
                        width: 100.0,
                        height: 100.0,
                    },
                },
                opacity: Opacity {
                    value: 0.5,
                    random: false,
                    anim: OpacityAnimation {
                        enable: false,
                        speed: 1.0,
                        opacity_min: 0.1,
                        sync: false,
                    },
                },
                size: Size {
                    value: 5.0,
                    random: true,
                    anim: SizeAnimation {
                        enable: false,
                        speed: 40.0,
                        size_min: 0.1,
                        sync: false,
                    },
                },
                line_linked: LineLinked {
                    enable: true,
                    distance: 150.0,
                    color: "#ffffff".to_string(),
                    opacity: 0.4,
                    width: 1.0,
                },
                movement: Move {
                    enable: true,
                    speed: 6.0,
                    direction: "none".to_string(),
                    random: false,
                    straight: false,
                    out_mode: "out".to_string(),
                    bounce: false,
                    attract: MoveAttract {
                        enable: false,
                        rotate_x: 600.0,
                        rotate_y: 1200.0,
                    },
                },
            },
            interactivity: Interactivity {
                detect_on: "canvas".to_string(),
                events: Events {
                    onhover: EventMode {
                        enable: true,
                        mode: "repulse".to_string(),
                    },
                    onclick: EventMode {
                        enable: true,
                        mode: "push".to_string(),
                    },
                    resize: true,
                },
                modes: Modes {
                    grab: GrabMode {
                        distance: 400.0,
                        line_linked: GrabLineLinked { opacity: 1.0 },
                    },
                    bubble: BubbleMode {
                        distance: 400.0,
                        size: 40.0,
                        duration: 2.0,
                        opacity: 8.0,
                        speed: 3.0,
                    },
                    repulse: RepulseMode {
                        distance: 200.0,
                        duration: 0.4,
                    },
                    push: CountMode { particles_nb: 4 },
                    remove: CountMode { particles_nb: 2 },
                },
            },
            retina_detect: true,
        }
    }
}

// *************** Tests ***************
