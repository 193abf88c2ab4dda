//! # balloon
//!
//! A speech-bubble popup that points at a target view.
//!
//! ## Features
//! - Pin on any side, or picked automatically from the target's position
//! - Placement kept on screen with the pin still pointing at the target
//! - Entrance and exit animations (pop, fade, revolution, slide, with or without spring)
//! - Effects played on the target while the balloon inflates
//! - Label content with a title, wrapped body text and a row of buttons
//! - TOML configuration
//!
//! ## Example
//!
//! ```no_run
//! use balloon::{BalloonContainer, BalloonLabelContent, ButtonKind, PinDirection};
//! use balloon_ui::{Rect, ViewTree};
//!
//! let mut tree = ViewTree::new();
//! let screen = tree.add_view("screen", Rect::new(0.0, 0.0, 320.0, 480.0));
//! let button = tree.add_view("button", Rect::new(140.0, 100.0, 40.0, 30.0));
//! tree.add_child(screen, button);
//!
//! let label = BalloonLabelContent::new()
//!     .with_title("Saved")
//!     .with_text("Your changes are stored on this device.")
//!     .add_button("OK", ButtonKind::Close, None);
//!
//! let mut balloon = BalloonContainer::from_content(label)
//!     .with_pin_direction(PinDirection::Vertical);
//! balloon.show(&mut tree, button, None, None).unwrap();
//!
//! // once per frame
//! balloon.update(&mut tree, 1.0 / 60.0);
//! ```

mod config;
mod container;
mod content;
mod error;
mod label;
mod layout;
mod recipes;
mod render;
mod types;

pub use config::ConfigError;
pub use container::{BalloonContainer, Completion};
pub use content::{BalloonContent, ButtonHit, ButtonKind, ViewContent, DEFAULT_CONTENT_SIZE};
pub use error::BalloonError;
pub use label::{BalloonLabelContent, ButtonHandler, LabelLayout, DEFAULT_TEXT_COLOR};
pub use layout::{layout, resolve_direction, Placement, FRAME_MARGIN, MAX_WIDTH_RATIO, PIN_SPACING};
pub use recipes::BalloonViews;
pub use render::BalloonRenderer;
pub use types::{
    AnimationStyle, BalloonConfig, BalloonState, EffectDirection, EntranceConfig, ExitConfig,
    PinDirection, StyleConfig, TargetAnimationStyle, UnknownName, DEFAULT_COLOR,
};
