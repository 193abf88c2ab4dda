//! # balloon-ui
//!
//! Headless view primitives and GPU renderers used by the balloon widget.
//!
//! ## Features
//! - Retained view tree with frames, decomposed transforms and opacity
//! - Coordinate conversion between views of the same tree
//! - Frame-driven animation sequences with eased and spring curves
//! - Text measurement (glyphon's cosmic-text shaping or fixed monospace metrics)
//! - Tessellation of rounded frames and pins, drawn with wgpu
//! - Text drawing with glyphon
//!
//! ## Example
//!
//! ```no_run
//! use balloon_ui::{Curve, Phase, Property, Rect, Sequence, Transform, ViewTree};
//!
//! let mut tree = ViewTree::new();
//! let view = tree.add_view("badge", Rect::new(0.0, 0.0, 40.0, 40.0));
//!
//! let mut pop = Sequence::new().then(
//!     Phase::new(0.3, Curve::Spring { damping: 0.6 })
//!         .set(view, Property::Transform(Transform::scale(0.0, 0.0)))
//!         .animate(view, Property::Transform(Transform::IDENTITY)),
//! );
//! pop.start(&mut tree);
//! pop.update(&mut tree, 1.0 / 60.0);
//! ```

pub mod animation;
pub mod geometry;
pub mod renderer;
pub mod shape;
pub mod text;
pub mod transform;
pub mod view;

pub use animation::{Curve, Phase, Property, Sequence, SequenceStatus, Step};
pub use geometry::{Color, Direction, EdgeInsets, Point, Rect, Size};
pub use renderer::{RenderError, ShapeRenderer, TextAlign, TextRenderer, TextRun};
pub use shape::{Shape, ShapeVertex};
pub use text::{CosmicMeasurer, Font, FontWeight, MonospaceMeasurer, TextMeasurer};
pub use transform::{Affine, Transform};
pub use view::{ViewId, ViewTree};
