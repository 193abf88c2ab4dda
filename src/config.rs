//! Configuration loading from balloon.toml
//!
//! ```toml
//! [style]
//! corner_radius = 8.0
//! insets = [8.0, 8.0, 8.0, 8.0]   # top, left, bottom, right
//! color = [0.3, 0.69, 0.31, 1.0]
//! pin_size = 8.0
//! pin_direction = "vertical"
//!
//! [entrance]
//! animation = "slide"
//! slide_direction = "reverse"
//! target_animation = "sway"
//! duration = 0.6
//! spring = true
//!
//! [exit]
//! animation = "fade"
//! duration = 0.4
//! ```

use std::path::Path;

use balloon_ui::EdgeInsets;
use serde::Deserialize;
use thiserror::Error;

use crate::error::BalloonError;
use crate::types::{
    AnimationStyle, BalloonConfig, EffectDirection, EntranceConfig, ExitConfig, PinDirection,
    StyleConfig, TargetAnimationStyle, DEFAULT_COLOR,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unknown {field} value '{value}'")]
    UnknownValue { field: &'static str, value: String },
    #[error(transparent)]
    Invalid(#[from] BalloonError),
}

/// Root of the configuration file
#[derive(Debug, Clone, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    style: StyleSection,
    #[serde(default)]
    entrance: EntranceSection,
    #[serde(default)]
    exit: ExitSection,
}

/// Frame and pin style
#[derive(Debug, Clone, Deserialize)]
struct StyleSection {
    #[serde(default = "default_corner_radius")]
    corner_radius: f32,
    /// [top, left, bottom, right]
    #[serde(default = "default_insets")]
    insets: [f32; 4],
    #[serde(default = "default_color")]
    color: [f32; 4],
    #[serde(default = "default_pin_size")]
    pin_size: f32,
    /// "none", "vertical", "horizontal", "top", "bottom", "left", "right"
    #[serde(default = "default_pin_direction")]
    pin_direction: String,
}

impl Default for StyleSection {
    fn default() -> Self {
        Self {
            corner_radius: default_corner_radius(),
            insets: default_insets(),
            color: default_color(),
            pin_size: default_pin_size(),
            pin_direction: default_pin_direction(),
        }
    }
}

fn default_corner_radius() -> f32 {
    8.0
}
fn default_insets() -> [f32; 4] {
    [8.0; 4]
}
fn default_color() -> [f32; 4] {
    DEFAULT_COLOR
}
fn default_pin_size() -> f32 {
    8.0
}
fn default_pin_direction() -> String {
    "vertical".to_string()
}

/// Inflate animation
#[derive(Debug, Clone, Deserialize)]
struct EntranceSection {
    /// "none", "pop", "pop-shift", "fade", "fade-shift", "revolution",
    /// "revolution-shift", "slide"
    #[serde(default = "default_entrance_animation")]
    animation: String,
    /// "none", "pop", "blink", "rotation", "sway"
    #[serde(default = "default_target_animation")]
    target_animation: String,
    /// Used by "slide": "auto", "reverse", "top", "bottom", "left", "right"
    #[serde(default = "default_slide_direction")]
    slide_direction: String,
    #[serde(default = "default_entrance_duration")]
    duration: f32,
    #[serde(default = "default_spring")]
    spring: bool,
}

impl Default for EntranceSection {
    fn default() -> Self {
        Self {
            animation: default_entrance_animation(),
            target_animation: default_target_animation(),
            slide_direction: default_slide_direction(),
            duration: default_entrance_duration(),
            spring: default_spring(),
        }
    }
}

/// Deflate animation
#[derive(Debug, Clone, Deserialize)]
struct ExitSection {
    #[serde(default = "default_exit_animation")]
    animation: String,
    #[serde(default = "default_slide_direction")]
    slide_direction: String,
    #[serde(default = "default_exit_duration")]
    duration: f32,
    #[serde(default = "default_spring")]
    spring: bool,
}

impl Default for ExitSection {
    fn default() -> Self {
        Self {
            animation: default_exit_animation(),
            slide_direction: default_slide_direction(),
            duration: default_exit_duration(),
            spring: default_spring(),
        }
    }
}

fn default_entrance_animation() -> String {
    "pop-shift".to_string()
}
fn default_exit_animation() -> String {
    "pop-shift".to_string()
}
fn default_target_animation() -> String {
    "pop".to_string()
}
fn default_slide_direction() -> String {
    "auto".to_string()
}
fn default_entrance_duration() -> f32 {
    0.6
}
fn default_exit_duration() -> f32 {
    0.4
}
fn default_spring() -> bool {
    true
}

fn parse_animation(
    field: &'static str,
    name: &str,
    slide: &str,
) -> Result<AnimationStyle, ConfigError> {
    let slide: EffectDirection = slide.parse().map_err(|_| ConfigError::UnknownValue {
        field: "slide_direction",
        value: slide.to_string(),
    })?;
    AnimationStyle::from_name(name, slide).map_err(|e| ConfigError::UnknownValue {
        field,
        value: e.0,
    })
}

impl TryFrom<FileConfig> for BalloonConfig {
    type Error = ConfigError;

    fn try_from(file: FileConfig) -> Result<Self, Self::Error> {
        let style = file.style;
        let pin_direction: PinDirection =
            style
                .pin_direction
                .parse()
                .map_err(|_| ConfigError::UnknownValue {
                    field: "pin_direction",
                    value: style.pin_direction.clone(),
                })?;
        let [top, left, bottom, right] = style.insets;

        let target_animation: TargetAnimationStyle = file
            .entrance
            .target_animation
            .parse()
            .map_err(|_| ConfigError::UnknownValue {
                field: "target_animation",
                value: file.entrance.target_animation.clone(),
            })?;

        let config = BalloonConfig {
            style: StyleConfig {
                corner_radius: style.corner_radius,
                insets: EdgeInsets::new(top, left, bottom, right),
                color: style.color,
                pin_size: style.pin_size,
            },
            pin_direction,
            entrance: EntranceConfig {
                animation: parse_animation(
                    "entrance animation",
                    &file.entrance.animation,
                    &file.entrance.slide_direction,
                )?,
                target_animation,
                duration: file.entrance.duration,
                spring: file.entrance.spring,
            },
            exit: ExitConfig {
                animation: parse_animation(
                    "exit animation",
                    &file.exit.animation,
                    &file.exit.slide_direction,
                )?,
                duration: file.exit.duration,
                spring: file.exit.spring,
            },
        };
        config.validate()?;
        Ok(config)
    }
}

impl BalloonConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(content)?;
        Self::try_from(file)
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        log::info!("Loaded balloon config from {}", path.display());
        Ok(config)
    }

    /// Load from default path (balloon.toml in current directory)
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load("balloon.toml")
    }
}
