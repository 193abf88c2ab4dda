//! Entrance, exit and target animation recipes
//!
//! Each recipe is a [`Sequence`] built against the container's views. The
//! container starts the sequence and ticks it from its own `update`.

use std::f32::consts::TAU;

use balloon_ui::{Curve, Direction, Phase, Property, Rect, Sequence, Transform, ViewId, ViewTree};

use crate::types::{AnimationStyle, EntranceConfig, ExitConfig, TargetAnimationStyle};

/// Distance the balloon travels toward the target in the shifting styles
pub const SHIFT: f32 = 16.0;
/// Scale used for a fully deflated balloon
pub const COLLAPSED_SCALE: f32 = 1e-6;
/// Spring damping of the plain pop entrance
pub const POP_DAMPING: f32 = 0.6;
/// Spring damping of every other entrance
pub const DEFAULT_DAMPING: f32 = 0.75;
/// Overshoot scale of a springy deflate
const EXIT_OVERSHOOT: f32 = 1.1;
const SWAY_ANGLE: f32 = TAU * 20.0 / 360.0;

/// Views a recipe animates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalloonViews {
    pub root: ViewId,
    pub frame: ViewId,
    pub pin: ViewId,
    pub content: ViewId,
}

/// Geometry a recipe needs from the laid-out balloon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecipeContext {
    /// Side used for directional effects
    pub side: Direction,
    /// Balloon frame in host coordinates
    pub frame: Rect,
    /// Host bounds
    pub host: Rect,
    pub pin_size: f32,
}

impl RecipeContext {
    /// Translation moving the balloon away from the target
    fn shift(&self) -> Transform {
        shift_toward(self.side, SHIFT)
    }

    /// Translation of the pin before it snaps onto the frame
    fn pin_shift(&self) -> Transform {
        shift_toward(self.side, self.pin_size)
    }

    /// Translation carrying the balloon fully past the host edge on `side`
    fn slide_offset(&self, side: Direction) -> Transform {
        let p = self.pin_size;
        match side {
            Direction::Top => Transform::translation(0.0, -(self.frame.max_y() - self.host.min_y() + p)),
            Direction::Bottom => Transform::translation(0.0, self.host.max_y() - self.frame.min_y() + p),
            Direction::Left => Transform::translation(-(self.frame.max_x() - self.host.min_x() + p), 0.0),
            Direction::Right => Transform::translation(self.host.max_x() - self.frame.min_x() + p, 0.0),
        }
    }

    /// Scale collapsing the axis perpendicular to the pin to `amount`
    fn revolution_scale(&self, amount: f32) -> Transform {
        if self.side.is_vertical() {
            Transform::scale(amount, 1.0)
        } else {
            Transform::scale(1.0, amount)
        }
    }
}

fn shift_toward(side: Direction, amount: f32) -> Transform {
    match side {
        Direction::Top => Transform::translation(0.0, amount),
        Direction::Bottom => Transform::translation(0.0, -amount),
        Direction::Left => Transform::translation(amount, 0.0),
        Direction::Right => Transform::translation(-amount, 0.0),
    }
}

/// Build the inflate sequence. `None` yields an empty sequence.
pub fn entrance(views: &BalloonViews, ctx: &RecipeContext, config: &EntranceConfig) -> Sequence {
    let d = config.duration;
    let spring = Curve::spring_or_critical(config.spring, DEFAULT_DAMPING);
    let root = views.root;
    let identity = Property::Transform(Transform::IDENTITY);

    match config.animation {
        AnimationStyle::None => Sequence::new(),
        AnimationStyle::Pop => Sequence::new().then(
            Phase::new(d, Curve::spring_or_critical(config.spring, POP_DAMPING))
                .set(root, Property::Transform(Transform::scale(0.0, 0.0)))
                .animate(root, identity),
        ),
        AnimationStyle::PopShift => {
            shifted_inflate(views, ctx, d, spring, Transform::scale(0.0, 0.0))
        }
        AnimationStyle::RevolutionShift => {
            shifted_inflate(views, ctx, d, spring, ctx.revolution_scale(0.0))
        }
        AnimationStyle::Fade => Sequence::new().then(
            Phase::new(d, Curve::EaseInOut)
                .set(root, Property::Alpha(0.0))
                .animate(root, Property::Alpha(1.0)),
        ),
        AnimationStyle::FadeShift => Sequence::new().then(
            Phase::new(d, spring)
                .set(root, Property::Transform(ctx.shift()))
                .set(root, Property::Alpha(0.0))
                .animate(root, Property::Alpha(1.0))
                .animate(root, identity),
        ),
        AnimationStyle::Revolution => Sequence::new().then(
            Phase::new(d, spring)
                .set(root, Property::Transform(ctx.revolution_scale(0.0)))
                .animate(root, identity),
        ),
        AnimationStyle::Slide(direction) => Sequence::new().then(
            Phase::new(d, spring)
                .set(root, Property::Transform(ctx.slide_offset(direction.resolve(ctx.side))))
                .animate(root, identity),
        ),
    }
}

/// Grow from `collapsed` at the shifted position, then drop the pin in and
/// settle onto the target together
fn shifted_inflate(
    views: &BalloonViews,
    ctx: &RecipeContext,
    d: f32,
    curve: Curve,
    collapsed: Transform,
) -> Sequence {
    let shift = ctx.shift();
    let start = Transform {
        translate_x: shift.translate_x,
        translate_y: shift.translate_y,
        ..collapsed
    };
    let identity = Property::Transform(Transform::IDENTITY);

    Sequence::new()
        .then(
            Phase::new(d * 2.0 / 3.0, curve)
                .set(views.root, Property::Transform(start))
                .set(views.pin, Property::Alpha(0.0))
                .animate(views.root, Property::Transform(shift)),
        )
        .then(
            Phase::new(d / 3.0, curve)
                .set(views.pin, Property::Alpha(1.0))
                .set(views.pin, Property::Transform(ctx.pin_shift()))
                .animate(views.pin, identity)
                .animate(views.root, identity),
        )
}

/// Build the deflate sequence. `None` yields an empty sequence.
pub fn exit(views: &BalloonViews, ctx: &RecipeContext, config: &ExitConfig) -> Sequence {
    let d = config.duration;
    let root = views.root;
    let curve = Curve::EaseInOut;

    let collapse = |overshoot: Transform, collapsed: Transform| {
        if config.spring {
            Sequence::new()
                .then(Phase::new(d / 3.0, curve).animate(root, Property::Transform(overshoot)))
                .then(Phase::new(d * 2.0 / 3.0, curve).animate(root, Property::Transform(collapsed)))
        } else {
            Sequence::new().then(Phase::new(d, curve).animate(root, Property::Transform(collapsed)))
        }
    };

    match config.animation {
        AnimationStyle::None => Sequence::new(),
        AnimationStyle::Pop | AnimationStyle::PopShift => collapse(
            Transform::scale(EXIT_OVERSHOOT, EXIT_OVERSHOOT),
            Transform::scale(COLLAPSED_SCALE, COLLAPSED_SCALE),
        ),
        AnimationStyle::Revolution | AnimationStyle::RevolutionShift => collapse(
            ctx.revolution_scale(EXIT_OVERSHOOT),
            ctx.revolution_scale(COLLAPSED_SCALE),
        ),
        AnimationStyle::Fade | AnimationStyle::FadeShift => {
            Sequence::new().then(Phase::new(d, curve).animate(root, Property::Alpha(0.0)))
        }
        AnimationStyle::Slide(direction) => Sequence::new().then(
            Phase::new(d, curve).animate(
                root,
                Property::Transform(ctx.slide_offset(direction.resolve(ctx.side))),
            ),
        ),
    }
}

/// Build the effect played on the target while the balloon inflates.
///
/// Values are taken relative to the target's current alpha and transform,
/// and every recipe returns the target to them.
pub fn target(
    tree: &ViewTree,
    target: ViewId,
    style: TargetAnimationStyle,
    duration: f32,
) -> Sequence {
    let d = duration;
    let base = tree.transform(target);
    let at = |transform: Transform| Property::Transform(transform);

    match style {
        TargetAnimationStyle::None => Sequence::new(),
        TargetAnimationStyle::Blink => {
            let alpha = tree.alpha(target);
            Sequence::new()
                .then(Phase::new(d / 2.0, Curve::EaseInOut).animate(target, Property::Alpha(alpha * 0.5)))
                .then(Phase::new(d / 2.0, Curve::EaseInOut).animate(target, Property::Alpha(alpha)))
        }
        TargetAnimationStyle::Pop => Sequence::new()
            .then(Phase::new(d / 4.0, Curve::EaseInOut).animate(target, at(base.scaled(1.2, 1.2))))
            .then(Phase::new(d / 2.0, Curve::EaseInOut).animate(target, at(base.scaled(0.8, 0.8))))
            .then(Phase::new(d / 2.0, Curve::EaseInOut).animate(target, at(base))),
        TargetAnimationStyle::Rotation => Sequence::new()
            .then(
                Phase::new(d * 4.0 / 11.0, Curve::EaseIn)
                    .set(target, at(base.rotated(TAU)))
                    .animate(target, at(base.rotated(TAU * 2.0 / 3.0))),
            )
            .then(Phase::new(d * 3.0 / 11.0, Curve::Linear).animate(target, at(base.rotated(TAU / 3.0))))
            .then(Phase::new(d * 4.0 / 11.0, Curve::EaseOut).animate(target, at(base))),
        TargetAnimationStyle::Sway => {
            let turned = base.rotated(TAU);
            Sequence::new()
                .then(
                    Phase::new(d / 3.0, Curve::EaseInOut)
                        .set(target, at(turned))
                        .animate(target, at(turned.rotated(-SWAY_ANGLE))),
                )
                .then(Phase::new(d / 3.0, Curve::EaseInOut).animate(target, at(turned.rotated(SWAY_ANGLE))))
                .then(Phase::new(d / 3.0, Curve::EaseInOut).animate(target, at(turned)))
                .then(Phase::instant().set(target, at(base)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use balloon_ui::SequenceStatus;

    fn setup() -> (ViewTree, BalloonViews, ViewId) {
        let mut tree = ViewTree::new();
        let host = tree.add_view("host", Rect::new(0.0, 0.0, 320.0, 480.0));
        let root = tree.add_view("balloon", Rect::new(100.0, 150.0, 116.0, 76.0));
        let frame = tree.add_view("frame", Rect::new(0.0, 0.0, 116.0, 76.0));
        let pin = tree.add_view("pin", Rect::new(50.0, -7.0, 16.0, 8.0));
        let content = tree.add_view("content", Rect::new(8.0, 8.0, 100.0, 60.0));
        let target = tree.add_view("target", Rect::new(140.0, 100.0, 40.0, 30.0));
        tree.add_child(host, root);
        tree.add_child(host, target);
        tree.add_child(root, frame);
        tree.add_child(root, pin);
        tree.add_child(frame, content);
        (tree, BalloonViews { root, frame, pin, content }, target)
    }

    fn ctx(side: Direction) -> RecipeContext {
        RecipeContext {
            side,
            frame: Rect::new(100.0, 150.0, 116.0, 76.0),
            host: Rect::new(0.0, 0.0, 320.0, 480.0),
            pin_size: 8.0,
        }
    }

    fn entrance_config(animation: AnimationStyle) -> EntranceConfig {
        EntranceConfig {
            animation,
            ..EntranceConfig::default()
        }
    }

    fn run_to_end(tree: &mut ViewTree, seq: &mut Sequence) -> usize {
        let mut frames = 0;
        let mut status = seq.start(tree);
        while status == SequenceStatus::Running {
            status = seq.update(tree, 1.0 / 60.0);
            frames += 1;
            assert!(frames < 10_000, "sequence never settled");
        }
        frames
    }

    #[test]
    fn test_every_entrance_settles_at_identity() {
        let styles = [
            AnimationStyle::None,
            AnimationStyle::Pop,
            AnimationStyle::PopShift,
            AnimationStyle::Fade,
            AnimationStyle::FadeShift,
            AnimationStyle::Revolution,
            AnimationStyle::RevolutionShift,
            AnimationStyle::Slide(crate::types::EffectDirection::Auto),
            AnimationStyle::Slide(crate::types::EffectDirection::Reverse),
        ];
        for style in styles {
            for spring in [true, false] {
                let (mut tree, views, _) = setup();
                let config = EntranceConfig {
                    spring,
                    ..entrance_config(style)
                };
                let mut seq = entrance(&views, &ctx(Direction::Top), &config);
                run_to_end(&mut tree, &mut seq);
                assert!(tree.transform(views.root).approx_identity(1e-4), "{:?}", style);
                assert!(tree.transform(views.pin).approx_identity(1e-4), "{:?}", style);
                assert_eq!(tree.alpha(views.root), 1.0, "{:?}", style);
                assert_eq!(tree.alpha(views.pin), 1.0, "{:?}", style);
            }
        }
    }

    #[test]
    fn test_pop_shift_hides_pin_until_second_phase() {
        let (mut tree, views, _) = setup();
        let mut seq = entrance(&views, &ctx(Direction::Top), &entrance_config(AnimationStyle::PopShift));
        seq.start(&mut tree);

        let start = tree.transform(views.root);
        assert_eq!(start.scale_x, 0.0);
        assert_eq!(start.translate_y, SHIFT);
        assert_eq!(tree.alpha(views.pin), 0.0);

        // past 2/3 of 0.6s the pin is visible and shifted toward the frame
        seq.update(&mut tree, 0.401);
        assert_eq!(tree.alpha(views.pin), 1.0);
        assert!(tree.transform(views.pin).translate_y > 0.0);
    }

    fn peak_scale(spring: bool) -> f32 {
        let (mut tree, views, _) = setup();
        let config = EntranceConfig {
            spring,
            ..entrance_config(AnimationStyle::Pop)
        };
        let mut seq = entrance(&views, &ctx(Direction::Top), &config);
        let mut peak: f32 = 0.0;
        let mut status = seq.start(&mut tree);
        while status == SequenceStatus::Running {
            status = seq.update(&mut tree, 1.0 / 60.0);
            peak = peak.max(tree.transform(views.root).scale_x);
        }
        peak
    }

    #[test]
    fn test_pop_only_overshoots_with_spring() {
        assert!(peak_scale(true) > 1.01);
        assert!(peak_scale(false) <= 1.0);
    }

    #[test]
    fn test_shift_points_away_from_target() {
        assert_eq!(ctx(Direction::Top).shift(), Transform::translation(0.0, SHIFT));
        assert_eq!(ctx(Direction::Bottom).shift(), Transform::translation(0.0, -SHIFT));
        assert_eq!(ctx(Direction::Left).shift(), Transform::translation(SHIFT, 0.0));
        assert_eq!(ctx(Direction::Right).shift(), Transform::translation(-SHIFT, 0.0));
        assert_eq!(ctx(Direction::Left).pin_shift(), Transform::translation(8.0, 0.0));
    }

    #[test]
    fn test_slide_offsets_clear_the_host() {
        let c = ctx(Direction::Top);
        for side in [Direction::Top, Direction::Bottom, Direction::Left, Direction::Right] {
            let t = c.slide_offset(side);
            let moved = c.frame.offset(t.translate_x, t.translate_y);
            let outside = moved.max_y() <= c.host.min_y()
                || moved.min_y() >= c.host.max_y()
                || moved.max_x() <= c.host.min_x()
                || moved.min_x() >= c.host.max_x();
            assert!(outside, "{:?} -> {:?}", side, moved);
        }
        assert_eq!(c.slide_offset(Direction::Top).translate_y, -(226.0 + 8.0));
        assert_eq!(c.slide_offset(Direction::Right).translate_x, 320.0 - 100.0 + 8.0);
    }

    #[test]
    fn test_revolution_scales_perpendicular_axis() {
        assert_eq!(ctx(Direction::Top).revolution_scale(0.0), Transform::scale(0.0, 1.0));
        assert_eq!(ctx(Direction::Right).revolution_scale(0.0), Transform::scale(1.0, 0.0));
    }

    #[test]
    fn test_exit_collapses_or_fades() {
        let (mut tree, views, _) = setup();
        let config = ExitConfig::default();
        let mut seq = exit(&views, &ctx(Direction::Top), &config);
        seq.start(&mut tree);
        seq.update(&mut tree, 0.4 / 3.0);
        assert!((tree.transform(views.root).scale_x - EXIT_OVERSHOOT).abs() < 1e-3);
        run_to_end(&mut tree, &mut seq);
        assert_eq!(tree.transform(views.root).scale_x, COLLAPSED_SCALE);

        let (mut tree, views, _) = setup();
        let config = ExitConfig {
            animation: AnimationStyle::FadeShift,
            ..ExitConfig::default()
        };
        let mut seq = exit(&views, &ctx(Direction::Top), &config);
        run_to_end(&mut tree, &mut seq);
        assert_eq!(tree.alpha(views.root), 0.0);
    }

    #[test]
    fn test_exit_without_spring_is_single_phase() {
        let (_, views, _) = setup();
        let config = ExitConfig {
            spring: false,
            ..ExitConfig::default()
        };
        let seq = exit(&views, &ctx(Direction::Left), &config);
        assert_eq!(seq.pending_phases(), 1);
        assert!((seq.remaining() - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_target_recipes_restore_base() {
        for style in [
            TargetAnimationStyle::Pop,
            TargetAnimationStyle::Blink,
            TargetAnimationStyle::Rotation,
            TargetAnimationStyle::Sway,
        ] {
            let (mut tree, _, target_view) = setup();
            let base = Transform::rotation(0.3).scaled(2.0, 2.0);
            tree.set_transform(target_view, base);
            tree.set_alpha(target_view, 0.8);

            let mut seq = target(&tree, target_view, style, 0.6);
            run_to_end(&mut tree, &mut seq);
            assert!(tree.transform(target_view).approx_eq(&base, 1e-4), "{:?}", style);
            assert!((tree.alpha(target_view) - 0.8).abs() < 1e-6, "{:?}", style);
        }
    }

    #[test]
    fn test_target_pop_timing() {
        let (tree, _, target_view) = setup();
        let seq = target(&tree, target_view, TargetAnimationStyle::Pop, 0.6);
        assert_eq!(seq.pending_phases(), 3);
        assert!((seq.remaining() - 0.75).abs() < 1e-6);

        let seq = target(&tree, target_view, TargetAnimationStyle::Rotation, 1.1);
        assert!((seq.remaining() - 1.1).abs() < 1e-5);
    }

    #[test]
    fn test_blink_halves_alpha() {
        let (mut tree, _, target_view) = setup();
        let mut seq = target(&tree, target_view, TargetAnimationStyle::Blink, 0.6);
        seq.start(&mut tree);
        seq.update(&mut tree, 0.3);
        assert!((tree.alpha(target_view) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_no_target_effect_is_empty() {
        let (tree, _, target_view) = setup();
        let seq = target(&tree, target_view, TargetAnimationStyle::None, 0.6);
        assert_eq!(seq.pending_phases(), 0);
    }
}
