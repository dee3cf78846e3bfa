//! Game settings and physics tuning
//!
//! `Settings` comes from `config.txt`: whitespace-separated `label value`
//! pairs read in a fixed order. Labels are free-form; only position matters.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Config file failures
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("unable to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("config ended before a value for `{label}`")]
    MissingValue { label: &'static str },

    #[error("`{value}` is not a valid value for `{label}`")]
    InvalidValue { label: &'static str, value: String },

    #[error("`{label}` is out of range")]
    OutOfRange { label: &'static str },
}

/// Scale and animation settings from the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// NPC sprite scale
    pub scale: f32,
    /// Player animation frames per second
    pub character_frame_rate: u32,
    /// Player sprite scale, per axis
    pub character_width_scale: f32,
    pub character_height_scale: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scale: 1.0,
            character_frame_rate: 10,
            character_width_scale: 1.0,
            character_height_scale: 1.0,
        }
    }
}

impl Settings {
    /// Parse config text
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut tokens = text.split_whitespace();
        let scale = parse_scale("scale", next_value(&mut tokens, "scale")?)?;
        let character_frame_rate = parse_positive::<u32>(
            "character_frame_rate",
            next_value(&mut tokens, "character_frame_rate")?,
        )?;
        let character_width_scale = parse_scale(
            "character_width_scale",
            next_value(&mut tokens, "character_width_scale")?,
        )?;
        let character_height_scale = parse_scale(
            "character_height_scale",
            next_value(&mut tokens, "character_height_scale")?,
        )?;

        Ok(Self {
            scale,
            character_frame_rate,
            character_width_scale,
            character_height_scale,
        })
    }

    /// Read and parse a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::parse(&text)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Seconds per player animation frame
    pub fn character_frame_seconds(&self) -> f32 {
        1.0 / self.character_frame_rate.max(1) as f32
    }
}

/// Skip the label token and return the value token after it
fn next_value<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    label: &'static str,
) -> Result<&'a str, ConfigError> {
    tokens.next().ok_or(ConfigError::MissingValue { label })?;
    tokens.next().ok_or(ConfigError::MissingValue { label })
}

/// Positive, finite scale factor no larger than `MAX_SCALE`
fn parse_scale(label: &'static str, value: &str) -> Result<f32, ConfigError> {
    let scale = parse_positive::<f32>(label, value)?;
    if !scale.is_finite() || scale > MAX_SCALE {
        return Err(ConfigError::OutOfRange { label });
    }
    Ok(scale)
}

fn parse_positive<T>(label: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    let parsed: T = value.parse().map_err(|_| ConfigError::InvalidValue {
        label,
        value: value.to_string(),
    })?;
    if parsed.partial_cmp(&T::default()) != Some(std::cmp::Ordering::Greater) {
        return Err(ConfigError::OutOfRange { label });
    }
    Ok(parsed)
}

/// Physics and combat constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    pub gravity: f32,
    pub terminal_velocity: f32,
    pub player_speed: f32,
    pub jump_speed: f32,
    pub npc_speed: f32,
    pub knockback_speed: f32,
    pub struck_duration: f32,
    pub weapon_reach: i32,
    pub ai_interval: f32,
    pub tap_margin: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            terminal_velocity: TERMINAL_VELOCITY,
            player_speed: PLAYER_SPEED_X,
            jump_speed: JUMP_SPEED,
            npc_speed: NPC_SPEED_X,
            knockback_speed: KNOCKBACK_SPEED,
            struck_duration: STRUCK_DURATION,
            weapon_reach: WEAPON_REACH,
            ai_interval: AI_INTERVAL,
            tap_margin: TAP_MARGIN,
        }
    }
}
