//! Balloon placement relative to a target rectangle
//!
//! Placement is computed in the host view's coordinate space. The pin side
//! decides which side of the balloon faces the target: a `Top` pin sits on
//! the balloon's top edge, so the balloon appears below the target.

use balloon_ui::{Direction, Point, Rect, Size};

use crate::types::{PinDirection, StyleConfig};

/// Gap between the target and the pin tip
pub const PIN_SPACING: f32 = 4.0;
/// Minimum gap between the balloon and the host's edges on the cross axis
pub const FRAME_MARGIN: f32 = 8.0;
/// Share of the host width content may use when it has no explicit max width
pub const MAX_WIDTH_RATIO: f32 = 0.8;

/// Resolve a pin request against the target's position.
///
/// `Vertical` picks `Top` when the target center is at or above the screen
/// center and `Bottom` otherwise; `Horizontal` picks `Left` at or left of the
/// center and `Right` otherwise. `None` stays unresolved.
pub fn resolve_direction(
    pin: PinDirection,
    target_center: Point,
    screen_center: Point,
) -> Option<Direction> {
    match pin {
        PinDirection::None => None,
        PinDirection::Vertical => Some(if target_center.y <= screen_center.y {
            Direction::Top
        } else {
            Direction::Bottom
        }),
        PinDirection::Horizontal => Some(if target_center.x <= screen_center.x {
            Direction::Left
        } else {
            Direction::Right
        }),
        fixed => fixed.fixed(),
    }
}

/// Resolved geometry of a balloon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Resolved pin direction, `None` when the pin is hidden
    pub direction: Option<Direction>,
    /// Side used for layout and directional effects; `Top` when the pin is hidden
    pub side: Direction,
    /// Balloon frame in host coordinates
    pub frame: Rect,
    /// Pin frame in balloon coordinates
    pub pin_frame: Rect,
    /// Content frame in balloon coordinates
    pub content_frame: Rect,
    /// Cross-axis correction applied to keep the balloon on screen
    pub cross_shift: f32,
}

impl Placement {
    /// Center of the pin along the balloon edge it sits on
    pub fn pin_cross_position(&self) -> f32 {
        let center = self.pin_frame.center();
        if self.side.is_vertical() {
            center.x
        } else {
            center.y
        }
    }
}

/// Minimal shift keeping `[center - extent/2, center + extent/2]` inside
/// `[lo + margin, hi - margin]`. When the span cannot fit, the span is
/// centered on the host range instead.
fn cross_shift(center: f32, extent: f32, lo: f32, hi: f32) -> f32 {
    if extent + 2.0 * FRAME_MARGIN > hi - lo {
        return (lo + hi) / 2.0 - center;
    }
    let min = center - extent / 2.0;
    let max = center + extent / 2.0;
    if min < lo + FRAME_MARGIN {
        lo + FRAME_MARGIN - min
    } else if max > hi - FRAME_MARGIN {
        hi - FRAME_MARGIN - max
    } else {
        0.0
    }
}

/// Compute where the balloon goes.
///
/// `target` and `host_bounds` share the host's coordinate space and
/// `content` is the content slot's laid-out size.
pub fn layout(
    target: Rect,
    host_bounds: Rect,
    content: Size,
    style: &StyleConfig,
    pin: PinDirection,
) -> Placement {
    let target_center = target.center();
    let direction = resolve_direction(pin, target_center, host_bounds.center());
    let side = direction.unwrap_or(Direction::Top);

    let frame_size = content.inset_by(style.insets);
    let content_frame = Rect::new(style.insets.left, style.insets.top, content.width, content.height);

    let p = style.pin_size;
    let r = style.corner_radius;
    let overlap = p / 2.0 - 1.0;

    let (center, pin_center, pin_size, shift) = if side.is_vertical() {
        let along = target.height() / 2.0 + p + PIN_SPACING + frame_size.height / 2.0;
        let shift = cross_shift(
            target_center.x,
            frame_size.width,
            host_bounds.min_x(),
            host_bounds.max_x(),
        );
        let pin_x = (frame_size.width / 2.0 - shift)
            .max(r + p)
            .min(frame_size.width - r - p);

        if side == Direction::Top {
            (
                target_center.offset(shift, along),
                Point::new(pin_x, -overlap),
                Size::new(2.0 * p, p),
                shift,
            )
        } else {
            (
                target_center.offset(shift, -along),
                Point::new(pin_x, frame_size.height + overlap),
                Size::new(2.0 * p, p),
                shift,
            )
        }
    } else {
        let along = target.width() / 2.0 + p + PIN_SPACING + frame_size.width / 2.0;
        let shift = cross_shift(
            target_center.y,
            frame_size.height,
            host_bounds.min_y(),
            host_bounds.max_y(),
        );
        let pin_y = (frame_size.height / 2.0 - shift)
            .max(r + p)
            .min(frame_size.height - r - p);

        if side == Direction::Left {
            (
                target_center.offset(along, shift),
                Point::new(-overlap, pin_y),
                Size::new(p, 2.0 * p),
                shift,
            )
        } else {
            (
                target_center.offset(-along, shift),
                Point::new(frame_size.width + overlap, pin_y),
                Size::new(p, 2.0 * p),
                shift,
            )
        }
    };

    let placement = Placement {
        direction,
        side,
        frame: Rect::centered(center, frame_size),
        pin_frame: Rect::centered(pin_center, pin_size),
        content_frame,
        cross_shift: shift,
    };

    log::debug!(
        "balloon layout: pin={:?} side={:?} frame={:?} shift={}",
        pin,
        side,
        placement.frame,
        shift
    );

    placement
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOST: Rect = Rect {
        origin: Point { x: 0.0, y: 0.0 },
        size: Size {
            width: 320.0,
            height: 480.0,
        },
    };

    fn content() -> Size {
        Size::new(100.0, 60.0)
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_vertical_resolves_by_target_height() {
        let center = HOST.center();
        assert_eq!(
            resolve_direction(PinDirection::Vertical, Point::new(160.0, 100.0), center),
            Some(Direction::Top)
        );
        assert_eq!(
            resolve_direction(PinDirection::Vertical, Point::new(160.0, 400.0), center),
            Some(Direction::Bottom)
        );
        // ties go to Top
        assert_eq!(
            resolve_direction(PinDirection::Vertical, center, center),
            Some(Direction::Top)
        );
    }

    #[test]
    fn test_horizontal_resolves_by_target_x() {
        let center = HOST.center();
        assert_eq!(
            resolve_direction(PinDirection::Horizontal, Point::new(10.0, 400.0), center),
            Some(Direction::Left)
        );
        assert_eq!(
            resolve_direction(PinDirection::Horizontal, Point::new(300.0, 10.0), center),
            Some(Direction::Right)
        );
        assert_eq!(
            resolve_direction(PinDirection::Horizontal, center, center),
            Some(Direction::Left)
        );
    }

    #[test]
    fn test_explicit_and_none_directions() {
        let p = Point::new(0.0, 0.0);
        let c = HOST.center();
        assert_eq!(resolve_direction(PinDirection::Right, p, c), Some(Direction::Right));
        assert_eq!(resolve_direction(PinDirection::Bottom, p, c), Some(Direction::Bottom));
        assert_eq!(resolve_direction(PinDirection::None, p, c), None);
    }

    #[test]
    fn test_target_above_center_places_balloon_below() {
        let target = Rect::new(140.0, 100.0, 40.0, 20.0);
        let style = StyleConfig::default();
        let placement = layout(target, HOST, content(), &style, PinDirection::Vertical);

        assert_eq!(placement.direction, Some(Direction::Top));
        assert_eq!(placement.frame.size, Size::new(116.0, 76.0));
        // 10 (half target) + 8 (pin) + 4 (spacing) + 38 (half frame)
        assert!(approx(placement.frame.center().y, 110.0 + 60.0));
        assert!(approx(placement.frame.center().x, 160.0));
        assert!(placement.frame.min_y() > target.max_y());
        // pin centered, overlapping the frame's top edge by one unit
        assert!(approx(placement.pin_frame.center().x, 58.0));
        assert!(approx(placement.pin_frame.center().y, -3.0));
        assert_eq!(placement.pin_frame.size, Size::new(16.0, 8.0));
        assert_eq!(placement.content_frame, Rect::new(8.0, 8.0, 100.0, 60.0));
    }

    #[test]
    fn test_target_below_center_places_balloon_above() {
        let target = Rect::new(140.0, 400.0, 40.0, 20.0);
        let style = StyleConfig::default();
        let placement = layout(target, HOST, content(), &style, PinDirection::Vertical);

        assert_eq!(placement.direction, Some(Direction::Bottom));
        assert!(placement.frame.max_y() < target.min_y());
        assert!(approx(placement.pin_frame.center().y, 76.0 + 3.0));
    }

    #[test]
    fn test_horizontal_sides() {
        let style = StyleConfig::default();
        let left_target = Rect::new(20.0, 200.0, 30.0, 30.0);
        let placement = layout(left_target, HOST, content(), &style, PinDirection::Horizontal);
        assert_eq!(placement.direction, Some(Direction::Left));
        assert!(placement.frame.min_x() > left_target.max_x());
        assert_eq!(placement.pin_frame.size, Size::new(8.0, 16.0));
        assert!(approx(placement.pin_frame.center().x, -3.0));

        let right_target = Rect::new(270.0, 200.0, 30.0, 30.0);
        let placement = layout(right_target, HOST, content(), &style, PinDirection::Horizontal);
        assert_eq!(placement.direction, Some(Direction::Right));
        assert!(placement.frame.max_x() < right_target.min_x());
        assert!(approx(placement.pin_frame.center().x, 116.0 + 3.0));
    }

    #[test]
    fn test_hidden_pin_lays_out_as_top() {
        let target = Rect::new(140.0, 400.0, 40.0, 20.0);
        let style = StyleConfig::default();
        let placement = layout(target, HOST, content(), &style, PinDirection::None);
        assert_eq!(placement.direction, None);
        assert_eq!(placement.side, Direction::Top);
        assert!(placement.frame.min_y() > target.max_y());
    }

    #[test]
    fn test_cross_axis_clamped_near_left_edge() {
        let target = Rect::new(0.0, 100.0, 20.0, 20.0);
        let style = StyleConfig::default();
        let placement = layout(target, HOST, content(), &style, PinDirection::Top);

        assert!(approx(placement.frame.min_x(), FRAME_MARGIN));
        // the pin moves toward the target but stays clear of the corner
        let pin_x = placement.pin_cross_position();
        assert!(approx(pin_x, style.corner_radius + style.pin_size));
        assert!(pin_x < placement.frame.width() / 2.0);
    }

    #[test]
    fn test_cross_axis_clamped_near_right_edge() {
        let target = Rect::new(300.0, 100.0, 20.0, 20.0);
        let style = StyleConfig::default();
        let placement = layout(target, HOST, content(), &style, PinDirection::Top);
        assert!(approx(placement.frame.max_x(), HOST.max_x() - FRAME_MARGIN));
        // pin still points at the target center (x = 310)
        let pin_world = placement.frame.min_x() + placement.pin_cross_position();
        assert!(pin_world > placement.frame.center().x);
    }

    #[test]
    fn test_pin_follows_target_after_small_shift() {
        let target = Rect::new(40.0, 100.0, 20.0, 20.0);
        let style = StyleConfig::default();
        let placement = layout(target, HOST, content(), &style, PinDirection::Top);
        let pin_world = placement.frame.min_x() + placement.pin_cross_position();
        assert!(approx(pin_world, target.center().x));
    }

    #[test]
    fn test_frame_stays_inside_margin_everywhere() {
        let style = StyleConfig::default();
        let margin_bounds = Rect::new(
            FRAME_MARGIN,
            FRAME_MARGIN,
            HOST.width() - 2.0 * FRAME_MARGIN,
            HOST.height() - 2.0 * FRAME_MARGIN,
        );
        for step in 0..=32 {
            let x = step as f32 * 10.0 - 10.0;
            for pin in [PinDirection::Top, PinDirection::Bottom] {
                let target = Rect::new(x, 200.0, 20.0, 20.0);
                let p = layout(target, HOST, content(), &style, pin);
                assert!(p.frame.min_x() >= margin_bounds.min_x() - 1e-3, "x={}", x);
                assert!(p.frame.max_x() <= margin_bounds.max_x() + 1e-3, "x={}", x);
            }
            let y = step as f32 * 15.0 - 10.0;
            for pin in [PinDirection::Left, PinDirection::Right] {
                let target = Rect::new(150.0, y, 20.0, 20.0);
                let p = layout(target, HOST, content(), &style, pin);
                assert!(p.frame.min_y() >= margin_bounds.min_y() - 1e-3, "y={}", y);
                assert!(p.frame.max_y() <= margin_bounds.max_y() + 1e-3, "y={}", y);
            }
        }
    }

    #[test]
    fn test_pin_range_holds_for_all_targets() {
        let style = StyleConfig::default();
        let lo = style.corner_radius + style.pin_size;
        for step in 0..=40 {
            let x = step as f32 * 9.0 - 20.0;
            let target = Rect::new(x, 50.0, 10.0, 10.0);
            let p = layout(target, HOST, content(), &style, PinDirection::Top);
            let pin = p.pin_cross_position();
            assert!(pin >= lo - 1e-3);
            assert!(pin <= p.frame.width() - lo + 1e-3);
        }
    }

    #[test]
    fn test_oversized_frame_is_centered() {
        let style = StyleConfig::default();
        let wide = Size::new(400.0, 60.0);
        let target = Rect::new(10.0, 100.0, 20.0, 20.0);
        let p = layout(target, HOST, wide, &style, PinDirection::Top);
        assert!(approx(p.frame.center().x, HOST.center().x));
    }
}
