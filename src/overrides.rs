//! Parameter overrides.
//! Maps loosely typed `key=value` parameters (shortcode attributes, query
//! strings) onto a configuration. The policy is lenient: unknown keys and
//! values that don't coerce to the field's type are skipped, never rejected.

use log::debug;
use std::collections::HashMap;

use crate::model::{ColorValue, Config, ShapeType, split_list};
use crate::presets::preset;

pub const PRESET_KEY: &str = "preset";

/// How a raw parameter value is coerced before it reaches its setter.
#[derive(Clone, Copy)]
enum Setter {
    Text(fn(&mut Config, &str)),
    Integer(fn(&mut Config, u32)),
    Float(fn(&mut Config, f64)),
}

struct Override {
    key: &'static str,
    setter: Setter,
}

const OVERRIDES: &[Override] = &[
    Override {
        key: "number",
        setter: Setter::Integer(|c, v| c.particles.number.value = v),
    },
    Override {
        key: "color",
        setter: Setter::Text(|c, v| {
            c.particles.color.value = match split_list(v) {
                Some(list) => ColorValue::Multiple(list),
                None => ColorValue::Single(v.to_string()),
            }
        }),
    },
    Override {
        key: "shape",
        setter: Setter::Text(|c, v| {
            c.particles.shape.kind = match split_list(v) {
                Some(list) => ShapeType::Multiple(list),
                None => ShapeType::Single(v.to_string()),
            }
        }),
    },
    Override {
        key: "size",
        setter: Setter::Float(|c, v| c.particles.size.value = v),
    },
    Override {
        key: "speed",
        setter: Setter::Float(|c, v| c.particles.movement.speed = v),
    },
    Override {
        key: "direction",
        setter: Setter::Text(|c, v| c.particles.movement.direction = v.to_string()),
    },
    Override {
        key: "opacity",
        setter: Setter::Float(|c, v| c.particles.opacity.value = v),
    },
    Override {
        key: "lineColor",
        setter: Setter::Text(|c, v| c.particles.line_linked.color = v.to_string()),
    },
    Override {
        key: "lineWidth",
        setter: Setter::Float(|c, v| c.particles.line_linked.width = v),
    },
    Override {
        key: "lineDistance",
        setter: Setter::Float(|c, v| c.particles.line_linked.distance = v),
    },
    Override {
        key: "hoverMode",
        setter: Setter::Text(|c, v| c.interactivity.events.onhover.mode = v.to_string()),
    },
    Override {
        key: "clickMode",
        setter: Setter::Text(|c, v| c.interactivity.events.onclick.mode = v.to_string()),
    },
];

/// Keys the snippet generator consumes itself; not counted as unknown here.
const PASSTHROUGH_KEYS: &[&str] = &["id", "config"];

/// What happened to each parameter during an override pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OverrideReport {
    pub applied: Vec<String>,
    /// Recognized keys whose value failed type coercion.
    pub rejected: Vec<String>,
    pub unknown: Vec<String>,
}

impl OverrideReport {
    pub fn skipped(&self) -> usize {
        self.rejected.len() + self.unknown.len()
    }
}

/// Returns `base` with every recognized, type-compatible parameter applied.
/// A non-empty `preset` replaces the base before the other keys are applied.
pub fn apply_overrides(base: &Config, params: &HashMap<String, String>) -> Config {
    apply_overrides_with_report(base, params).0
}

pub fn apply_overrides_with_report(
    base: &Config,
    params: &HashMap<String, String>,
) -> (Config, OverrideReport) {
    let mut report = OverrideReport::default();

    let mut config = match params.get(PRESET_KEY).filter(|p| !p.is_empty()) {
        Some(name) => {
            report.applied.push(PRESET_KEY.to_string());
            preset(name)
        }
        None => base.clone(),
    };

    // Table order, not map order, so results don't depend on hashing.
    for entry in OVERRIDES {
        let Some(raw) = params.get(entry.key) else {
            continue;
        };
        if apply_one(&mut config, entry.setter, raw) {
            report.applied.push(entry.key.to_string());
        } else {
            debug!("Skipping parameter {}={:?}: value does not coerce", entry.key, raw);
            report.rejected.push(entry.key.to_string());
        }
    }

    let mut unknown: Vec<String> = params
        .keys()
        .filter(|k| {
            k.as_str() != PRESET_KEY
                && !PASSTHROUGH_KEYS.contains(&k.as_str())
                && !OVERRIDES.iter().any(|o| o.key == k.as_str())
        })
        .cloned()
        .collect();
    unknown.sort();
    for key in &unknown {
        debug!("Ignoring unrecognized parameter {}", key);
    }
    report.unknown = unknown;

    if report.skipped() > 0 {
        debug!(
            "Applied {} override(s), skipped {} ({} rejected, {} unknown)",
            report.applied.len(),
            report.skipped(),
            report.rejected.len(),
            report.unknown.len()
        );
    }

    (config, report)
}

fn apply_one(config: &mut Config, setter: Setter, raw: &str) -> bool {
    match setter {
        Setter::Text(set) => {
            set(config, raw);
            true
        }
        Setter::Integer(set) => match raw.parse::<u32>() {
            Ok(v) => {
                set(config, v);
                true
            }
            Err(_) => false,
        },
        Setter::Float(set) => match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => {
                set(config, v);
                true
            }
            _ => false,
        },
    }
}
