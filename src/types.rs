//! Core types for balloon configuration

use std::fmt;
use std::str::FromStr;

use balloon_ui::{Color, Direction, EdgeInsets};

use crate::error::BalloonError;

/// Where the pin sits relative to the balloon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PinDirection {
    /// Do not show the pin
    None,
    /// Semi auto (▲ or ▼), picked from the target's position
    #[default]
    Vertical,
    /// Semi auto (◀ or ▶), picked from the target's position
    Horizontal,
    /// Pin on the top edge, pointing up (▲)
    Top,
    /// Pin on the bottom edge, pointing down (▼)
    Bottom,
    /// Pin on the left edge, pointing left (◀)
    Left,
    /// Pin on the right edge, pointing right (▶)
    Right,
}

impl PinDirection {
    /// The concrete side for explicit directions
    pub fn fixed(self) -> Option<Direction> {
        match self {
            Self::Top => Some(Direction::Top),
            Self::Bottom => Some(Direction::Bottom),
            Self::Left => Some(Direction::Left),
            Self::Right => Some(Direction::Right),
            Self::None | Self::Vertical | Self::Horizontal => None,
        }
    }
}

/// Direction of a slide effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EffectDirection {
    /// Slide toward the side the pin sits on
    #[default]
    Auto,
    /// Slide toward the side opposite the pin
    Reverse,
    /// Slide toward the given side
    Explicit(Direction),
}

impl EffectDirection {
    /// Resolve against the balloon's laid-out pin side
    pub fn resolve(self, pin_side: Direction) -> Direction {
        match self {
            Self::Auto => pin_side,
            Self::Reverse => pin_side.opposite(),
            Self::Explicit(direction) => direction,
        }
    }
}

/// Entrance/exit animation of the balloon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationStyle {
    /// No animation
    None,
    /// Scale from nothing
    Pop,
    /// Pop, followed by a short shift toward the target while the pin appears
    #[default]
    PopShift,
    /// Opacity fade
    Fade,
    /// Fade while shifting toward the target
    FadeShift,
    /// Scale along the axis perpendicular to the pin
    Revolution,
    /// Revolution followed by a shift toward the target
    RevolutionShift,
    /// Slide in from, or out to, the host's edge
    Slide(EffectDirection),
}

/// Effect played on the target view while the balloon inflates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetAnimationStyle {
    None,
    #[default]
    Pop,
    Blink,
    Rotation,
    Sway,
}

/// Balloon frame and pin style
#[derive(Debug, Clone, PartialEq)]
pub struct StyleConfig {
    /// Frame corner radius
    pub corner_radius: f32,
    /// Spacing between the frame and the content
    pub insets: EdgeInsets,
    /// Fill color of the frame and the pin
    pub color: Color,
    /// Pin height; the pin base is twice as long
    pub pin_size: f32,
}

/// Default balloon green
pub const DEFAULT_COLOR: Color = [76.0 / 255.0, 175.0 / 255.0, 80.0 / 255.0, 1.0];

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            corner_radius: 8.0,
            insets: EdgeInsets::uniform(8.0),
            color: DEFAULT_COLOR,
            pin_size: 8.0,
        }
    }
}

/// How the balloon inflates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntranceConfig {
    pub animation: AnimationStyle,
    pub target_animation: TargetAnimationStyle,
    /// Duration in seconds
    pub duration: f32,
    pub spring: bool,
}

impl Default for EntranceConfig {
    fn default() -> Self {
        Self {
            animation: AnimationStyle::PopShift,
            target_animation: TargetAnimationStyle::Pop,
            duration: 0.6,
            spring: true,
        }
    }
}

/// How the balloon deflates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExitConfig {
    pub animation: AnimationStyle,
    /// Duration in seconds
    pub duration: f32,
    pub spring: bool,
}

impl Default for ExitConfig {
    fn default() -> Self {
        Self {
            animation: AnimationStyle::PopShift,
            duration: 0.4,
            spring: true,
        }
    }
}

/// Complete balloon configuration
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BalloonConfig {
    pub style: StyleConfig,
    pub pin_direction: PinDirection,
    pub entrance: EntranceConfig,
    pub exit: ExitConfig,
}

impl BalloonConfig {
    /// Check durations and sizes
    pub fn validate(&self) -> Result<(), BalloonError> {
        let entrance_animated = self.entrance.animation != AnimationStyle::None
            || self.entrance.target_animation != TargetAnimationStyle::None;
        if entrance_animated {
            check_duration("entrance", self.entrance.duration)?;
        }
        if self.exit.animation != AnimationStyle::None {
            check_duration("exit", self.exit.duration)?;
        }

        let style = &self.style;
        let insets = [
            style.insets.top,
            style.insets.left,
            style.insets.bottom,
            style.insets.right,
        ];
        if !is_non_negative(style.corner_radius)
            || !is_non_negative(style.pin_size)
            || !insets.iter().all(|v| is_non_negative(*v))
        {
            return Err(BalloonError::Configuration(
                "corner radius, pin size and insets must be finite and non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

fn is_non_negative(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

fn check_duration(which: &str, duration: f32) -> Result<(), BalloonError> {
    if duration.is_finite() && duration > 0.0 {
        Ok(())
    } else {
        Err(BalloonError::Configuration(format!(
            "{} duration must be positive, got {}",
            which, duration
        )))
    }
}

/// Lifecycle of a balloon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BalloonState {
    #[default]
    Hidden,
    Showing,
    Shown,
    Hiding,
}

impl fmt::Display for BalloonState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Hidden => "hidden",
            Self::Showing => "showing",
            Self::Shown => "shown",
            Self::Hiding => "hiding",
        };
        f.write_str(name)
    }
}

/// Error for names that do not match any variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownName(pub String);

fn parse_direction(name: &str) -> Option<Direction> {
    match name {
        "top" => Some(Direction::Top),
        "bottom" => Some(Direction::Bottom),
        "left" => Some(Direction::Left),
        "right" => Some(Direction::Right),
        _ => None,
    }
}

impl FromStr for PinDirection {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "vertical" => Ok(Self::Vertical),
            "horizontal" => Ok(Self::Horizontal),
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(UnknownName(s.to_string())),
        }
    }
}

impl FromStr for EffectDirection {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.to_lowercase();
        match name.as_str() {
            "auto" => Ok(Self::Auto),
            "reverse" => Ok(Self::Reverse),
            other => parse_direction(other)
                .map(Self::Explicit)
                .ok_or_else(|| UnknownName(s.to_string())),
        }
    }
}

impl FromStr for TargetAnimationStyle {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "pop" => Ok(Self::Pop),
            "blink" => Ok(Self::Blink),
            "rotation" => Ok(Self::Rotation),
            "sway" => Ok(Self::Sway),
            _ => Err(UnknownName(s.to_string())),
        }
    }
}

impl AnimationStyle {
    /// Parse a kebab-case style name; `slide` takes its direction separately
    pub fn from_name(name: &str, slide: EffectDirection) -> Result<Self, UnknownName> {
        match name.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "pop" => Ok(Self::Pop),
            "pop-shift" => Ok(Self::PopShift),
            "fade" => Ok(Self::Fade),
            "fade-shift" => Ok(Self::FadeShift),
            "revolution" => Ok(Self::Revolution),
            "revolution-shift" => Ok(Self::RevolutionShift),
            "slide" => Ok(Self::Slide(slide)),
            _ => Err(UnknownName(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let config = BalloonConfig::default();
        assert_eq!(config.style.corner_radius, 8.0);
        assert_eq!(config.style.insets, EdgeInsets::uniform(8.0));
        assert_eq!(config.style.pin_size, 8.0);
        assert_eq!(config.pin_direction, PinDirection::Vertical);
        assert_eq!(config.entrance.duration, 0.6);
        assert!(config.entrance.spring);
        assert_eq!(config.exit.duration, 0.4);
        assert!(config.exit.spring);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_effect_direction_resolution() {
        assert_eq!(EffectDirection::Auto.resolve(Direction::Left), Direction::Left);
        assert_eq!(EffectDirection::Reverse.resolve(Direction::Left), Direction::Right);
        assert_eq!(
            EffectDirection::Explicit(Direction::Bottom).resolve(Direction::Left),
            Direction::Bottom
        );
    }

    #[test]
    fn test_non_positive_duration_is_rejected() {
        let mut config = BalloonConfig::default();
        config.entrance.duration = 0.0;
        assert!(matches!(config.validate(), Err(BalloonError::Configuration(_))));

        config.entrance.duration = 0.6;
        config.exit.duration = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duration_ignored_without_animation() {
        let mut config = BalloonConfig::default();
        config.entrance = EntranceConfig {
            animation: AnimationStyle::None,
            target_animation: TargetAnimationStyle::None,
            duration: 0.0,
            spring: false,
        };
        config.exit.animation = AnimationStyle::None;
        config.exit.duration = -1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_negative_pin_size_is_rejected() {
        let mut config = BalloonConfig::default();
        config.style.pin_size = -2.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Horizontal".parse::<PinDirection>(), Ok(PinDirection::Horizontal));
        assert_eq!(
            "left".parse::<EffectDirection>(),
            Ok(EffectDirection::Explicit(Direction::Left))
        );
        assert_eq!("sway".parse::<TargetAnimationStyle>(), Ok(TargetAnimationStyle::Sway));
        assert_eq!(
            AnimationStyle::from_name("revolution-shift", EffectDirection::Auto),
            Ok(AnimationStyle::RevolutionShift)
        );
        assert_eq!(
            AnimationStyle::from_name("slide", EffectDirection::Reverse),
            Ok(AnimationStyle::Slide(EffectDirection::Reverse))
        );
        assert!(AnimationStyle::from_name("wobble", EffectDirection::Auto).is_err());
    }
}
