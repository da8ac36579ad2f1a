use std::{ops::RangeInclusive, path::PathBuf};

use anyhow::Context;

use crate::geometry::POINTER_TOP;

/// Tunables for how a spin looks. None of these change which entry wins.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpinConfig {
    pub min_turns: u32,
    pub max_turns: u32,
    /// seconds
    pub min_duration: f64,
    /// seconds
    pub max_duration: f64,
    /// degrees trimmed from each side of a painted segment
    pub padding: f64,
    /// how far from the middle of the winning segment the pointer may land, `0..=1`
    pub jitter: f64,
    pub pointer_angle: f64,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            min_turns: 3,
            max_turns: 8,
            min_duration: 4.0,
            max_duration: 6.0,
            padding: 1.0,
            jitter: 0.8,
            pointer_angle: POINTER_TOP,
        }
    }
}

impl SpinConfig {
    pub fn turns(&self) -> RangeInclusive<u32> {
        self.min_turns.min(self.max_turns)..=self.max_turns.max(self.min_turns)
    }

    /// Non-finite bounds fall back to the defaults so a spin always ends.
    pub fn durations(&self) -> RangeInclusive<f64> {
        let default = Self::default();
        let min = finite_or(self.min_duration, default.min_duration).max(0.0);
        let max = finite_or(self.max_duration, default.max_duration).max(min);
        min..=max
    }

    pub fn jitter(&self) -> f64 {
        finite_or(self.jitter, Self::default().jitter).clamp(0.0, 1.0)
    }

    pub fn padding(&self) -> f64 {
        finite_or(self.padding, Self::default().padding).max(0.0)
    }

    pub fn pointer_angle(&self) -> f64 {
        finite_or(self.pointer_angle, POINTER_TOP)
    }

    /// Overrides the defaults with any `WHEEL_*` variables found in the env.
    pub fn load_from_env() -> anyhow::Result<Self> {
        Self::load_from(|key| std::env::var(key).ok())
    }

    fn load_from(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get_env = |key: &str, default: u32| -> anyhow::Result<u32> {
            match lookup(key) {
                Some(value) => value
                    .trim()
                    .parse()
                    .with_context(|| format!("invalid value for `{key}`: '{value}'")),
                None => Ok(default),
            }
        };

        let get_finite = |key: &str, default: f64| -> anyhow::Result<f64> {
            let value = match lookup(key) {
                Some(value) => value
                    .trim()
                    .parse::<f64>()
                    .with_context(|| format!("invalid value for `{key}`: '{value}'"))?,
                None => return Ok(default),
            };
            if !value.is_finite() {
                anyhow::bail!("`{key}` must be a finite number, got '{value}'")
            }
            Ok(value)
        };

        let default = Self::default();
        Ok(Self {
            min_turns: get_env("WHEEL_MIN_TURNS", default.min_turns)?,
            max_turns: get_env("WHEEL_MAX_TURNS", default.max_turns)?,
            min_duration: get_finite("WHEEL_MIN_DURATION", default.min_duration)?,
            max_duration: get_finite("WHEEL_MAX_DURATION", default.max_duration)?,
            padding: get_finite("WHEEL_PADDING", default.padding)?,
            jitter: get_finite("WHEEL_JITTER", default.jitter)?,
            pointer_angle: default.pointer_angle,
        })
    }
}

fn finite_or(value: f64, default: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        default
    }
}

#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    pub spin: SpinConfig,
    pub themes_file: Option<PathBuf>,
}

impl EnvConfig {
    pub fn load_from_env() -> anyhow::Result<Self> {
        Ok(Self {
            spin: SpinConfig::load_from_env()?,
            themes_file: std::env::var_os("WHEEL_THEMES").map(PathBuf::from),
        })
    }
}
