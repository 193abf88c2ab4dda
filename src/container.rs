//! The balloon container
//!
//! A [`BalloonContainer`] owns a small subtree of views (the balloon root,
//! its rounded frame, the pin and the content area) inside a caller's
//! [`ViewTree`]. `show` attaches the subtree to a host view next to a
//! target, `hide` plays the exit and detaches it again. Animations advance
//! only when the caller ticks [`BalloonContainer::update`].

use balloon_ui::{
    Color, CosmicMeasurer, Direction, EdgeInsets, Point, Rect, Sequence, SequenceStatus,
    TextMeasurer, Transform, ViewId, ViewTree,
};

use crate::content::{BalloonContent, ButtonHit, ButtonKind, ViewContent};
use crate::error::BalloonError;
use crate::layout::{layout, Placement, MAX_WIDTH_RATIO};
use crate::recipes::{self, BalloonViews, RecipeContext};
use crate::types::{
    BalloonConfig, BalloonState, EntranceConfig, ExitConfig, PinDirection, StyleConfig,
};

/// Called once an entrance or exit settles
pub type Completion = Box<dyn FnOnce(bool)>;

struct TargetEffect {
    view: ViewId,
    sequence: Sequence,
}

/// Speech-bubble popup pointing at a target view
pub struct BalloonContainer<C: BalloonContent = ViewContent> {
    config: BalloonConfig,
    content: C,
    measurer: Option<Box<dyn TextMeasurer>>,
    views: Option<BalloonViews>,
    host: Option<ViewId>,
    placement: Option<Placement>,
    state: BalloonState,
    recipe: Option<Sequence>,
    target_effect: Option<TargetEffect>,
    completion: Option<Completion>,
}

impl Default for BalloonContainer<ViewContent> {
    fn default() -> Self {
        Self::new()
    }
}

impl BalloonContainer<ViewContent> {
    /// Create a balloon with an empty 100x60 content area
    pub fn new() -> Self {
        Self::from_content(ViewContent::default())
    }
}

impl<C: BalloonContent> BalloonContainer<C> {
    pub fn from_content(content: C) -> Self {
        Self {
            config: BalloonConfig::default(),
            content,
            measurer: None,
            views: None,
            host: None,
            placement: None,
            state: BalloonState::Hidden,
            recipe: None,
            target_effect: None,
            completion: None,
        }
    }

    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        self.config.style.corner_radius = radius;
        self
    }

    /// Spacing between the frame and the content
    pub fn with_insets(mut self, insets: EdgeInsets) -> Self {
        self.config.style.insets = insets;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.config.style.color = color;
        self
    }

    pub fn with_pin_size(mut self, size: f32) -> Self {
        self.config.style.pin_size = size;
        self
    }

    pub fn with_pin_direction(mut self, direction: PinDirection) -> Self {
        self.config.pin_direction = direction;
        self
    }

    pub fn with_style(mut self, style: StyleConfig) -> Self {
        self.config.style = style;
        self
    }

    pub fn with_entrance(mut self, entrance: EntranceConfig) -> Self {
        self.config.entrance = entrance;
        self
    }

    pub fn with_exit(mut self, exit: ExitConfig) -> Self {
        self.config.exit = exit;
        self
    }

    /// Replace the whole configuration, e.g. one loaded from a file
    pub fn with_config(mut self, config: BalloonConfig) -> Self {
        self.config = config;
        self
    }

    /// Measurer used to size text content; font shaping is used when unset
    pub fn with_measurer(mut self, measurer: impl TextMeasurer + 'static) -> Self {
        self.measurer = Some(Box::new(measurer));
        self
    }

    /// Build a hidden balloon around `content` with this balloon's
    /// configuration and measurer. Views, placement and running animations
    /// are not carried over; use [`set_content`](Self::set_content) to swap
    /// the content of a balloon already in use.
    pub fn with_content<D: BalloonContent>(self, content: D) -> BalloonContainer<D> {
        if self.state != BalloonState::Hidden {
            log::warn!(
                "Rebuilding a {} balloon around new content; its views stay in the tree",
                self.state
            );
        }
        BalloonContainer {
            config: self.config,
            measurer: self.measurer,
            ..BalloonContainer::from_content(content)
        }
    }

    /// Replace the content of a hidden balloon and return the old one.
    /// The next `show` detaches the old content view and lays out the new content.
    pub fn set_content(&mut self, content: C) -> Result<C, BalloonError> {
        self.expect_state("replace content", BalloonState::Hidden)?;
        Ok(std::mem::replace(&mut self.content, content))
    }

    /// Replace the configuration of a hidden balloon
    pub fn set_config(&mut self, config: BalloonConfig) -> Result<(), BalloonError> {
        self.expect_state("configure", BalloonState::Hidden)?;
        self.config = config;
        Ok(())
    }

    pub fn config(&self) -> &BalloonConfig {
        &self.config
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut C {
        &mut self.content
    }

    pub fn state(&self) -> BalloonState {
        self.state
    }

    /// Resolved pin direction of the current placement
    pub fn direction(&self) -> Option<Direction> {
        self.placement.and_then(|p| p.direction)
    }

    /// Geometry of the current placement, while attached
    pub fn placement(&self) -> Option<&Placement> {
        self.placement.as_ref()
    }

    /// Root view of the balloon, once created by the first `show`
    pub fn view(&self) -> Option<ViewId> {
        self.views.map(|v| v.root)
    }

    pub fn views(&self) -> Option<&BalloonViews> {
        self.views.as_ref()
    }

    /// View the balloon is attached to
    pub fn host(&self) -> Option<ViewId> {
        self.host
    }

    /// Check if any timeline is still running
    pub fn is_animating(&self) -> bool {
        self.recipe.is_some() || self.target_effect.is_some()
    }

    fn expect_state(
        &self,
        operation: &'static str,
        expected: BalloonState,
    ) -> Result<(), BalloonError> {
        if self.state == expected {
            Ok(())
        } else {
            log::warn!("Rejected {} while balloon is {}", operation, self.state);
            Err(BalloonError::InvalidState {
                operation,
                state: self.state,
            })
        }
    }

    fn ensure_views(&mut self, tree: &mut ViewTree) -> BalloonViews {
        if let Some(views) = self.views {
            return views;
        }
        let root = tree.add_view("balloon", Rect::ZERO);
        let frame = tree.add_view("balloon.frame", Rect::ZERO);
        let pin = tree.add_view("balloon.pin", Rect::ZERO);
        let content = tree.add_view("balloon.content", Rect::ZERO);
        tree.add_child(root, frame);
        tree.add_child(root, pin);
        tree.add_child(frame, content);

        let views = BalloonViews {
            root,
            frame,
            pin,
            content,
        };
        self.views = Some(views);
        views
    }

    /// Attach the balloon to `host` (the root of the target's tree when
    /// `None`) next to `target` and play the entrance.
    ///
    /// `on_complete(true)` runs once the entrance settles, synchronously
    /// when there is no entrance animation. On error nothing is changed.
    pub fn show(
        &mut self,
        tree: &mut ViewTree,
        target: ViewId,
        host: Option<ViewId>,
        on_complete: Option<Completion>,
    ) -> Result<(), BalloonError> {
        self.expect_state("show", BalloonState::Hidden)?;
        self.config.validate()?;
        self.content.validate()?;

        if tree.parent(target).is_none() {
            log::warn!("Cannot show balloon: target {:?} is detached", target);
            return Err(BalloonError::DetachedTarget);
        }
        let host = host.unwrap_or_else(|| tree.root(target));
        let Some(target_rect) = tree.frame_in(target, host) else {
            log::warn!("Cannot show balloon: host {:?} is unrelated to target", host);
            return Err(BalloonError::UnrelatedHost);
        };

        let views = self.ensure_views(tree);
        if let Some(mut stale) = self.target_effect.take() {
            stale.sequence.finish(tree);
        }

        let host_bounds = tree.bounds(host);
        let measurer = self
            .measurer
            .get_or_insert_with(|| Box::new(CosmicMeasurer::new()) as Box<dyn TextMeasurer>);
        let content_size = self
            .content
            .layout(host_bounds.width() * MAX_WIDTH_RATIO, measurer.as_mut());

        let placement = layout(
            target_rect,
            host_bounds,
            content_size,
            &self.config.style,
            self.config.pin_direction,
        );

        tree.add_child(host, views.root);
        tree.set_frame(views.root, placement.frame);
        tree.set_frame(views.frame, Rect::from_size(placement.frame.size));
        tree.set_frame(views.content, placement.content_frame);
        tree.set_frame(views.pin, placement.pin_frame);
        tree.set_transform(views.root, Transform::IDENTITY);
        tree.set_alpha(views.root, 1.0);
        tree.set_transform(views.pin, Transform::IDENTITY);
        tree.set_alpha(views.pin, 1.0);
        tree.set_hidden(views.pin, placement.direction.is_none());

        tree.remove_children(views.content);
        if let Some(view) = self.content.view() {
            tree.set_frame(view, Rect::from_size(content_size));
            tree.add_child(views.content, view);
        }

        let ctx = RecipeContext {
            side: placement.side,
            frame: placement.frame,
            host: host_bounds,
            pin_size: self.config.style.pin_size,
        };
        let mut entrance = recipes::entrance(&views, &ctx, &self.config.entrance);
        let mut effect = recipes::target(
            tree,
            target,
            self.config.entrance.target_animation,
            self.config.entrance.duration,
        );

        log::info!(
            "Showing balloon at {:?} ({:?}, pin {:?})",
            placement.frame,
            self.config.entrance.animation,
            placement.direction
        );

        self.host = Some(host);
        self.placement = Some(placement);
        self.state = BalloonState::Showing;
        self.completion = on_complete;

        if effect.start(tree) == SequenceStatus::Running {
            self.target_effect = Some(TargetEffect {
                view: target,
                sequence: effect,
            });
        }
        if entrance.start(tree) == SequenceStatus::Running {
            self.recipe = Some(entrance);
        } else {
            self.settle(tree);
        }
        Ok(())
    }

    /// Play the exit and detach the balloon.
    /// `on_complete(true)` runs once it is detached.
    pub fn hide(
        &mut self,
        tree: &mut ViewTree,
        on_complete: Option<Completion>,
    ) -> Result<(), BalloonError> {
        self.expect_state("hide", BalloonState::Shown)?;
        let (Some(views), Some(placement), Some(host)) = (self.views, self.placement, self.host)
        else {
            return Err(BalloonError::InvalidState {
                operation: "hide",
                state: self.state,
            });
        };

        let ctx = RecipeContext {
            side: placement.side,
            frame: placement.frame,
            host: tree.bounds(host),
            pin_size: self.config.style.pin_size,
        };
        let mut exit = recipes::exit(&views, &ctx, &self.config.exit);

        log::info!("Hiding balloon ({:?})", self.config.exit.animation);
        self.state = BalloonState::Hiding;
        self.completion = on_complete;

        if exit.start(tree) == SequenceStatus::Running {
            self.recipe = Some(exit);
        } else {
            self.settle(tree);
        }
        Ok(())
    }

    /// Advance running animations by `dt` seconds
    pub fn update(&mut self, tree: &mut ViewTree, dt: f32) -> BalloonState {
        if let Some(effect) = self.target_effect.as_mut() {
            if effect.sequence.update(tree, dt) == SequenceStatus::Finished {
                log::debug!("Target effect on {:?} finished", effect.view);
                self.target_effect = None;
            }
        }

        if let Some(recipe) = self.recipe.as_mut() {
            if recipe.update(tree, dt) == SequenceStatus::Finished {
                self.recipe = None;
                self.settle(tree);
            }
        }
        self.state
    }

    /// Jump every running animation to its end
    pub fn skip_animation(&mut self, tree: &mut ViewTree) {
        if let Some(mut effect) = self.target_effect.take() {
            effect.sequence.finish(tree);
        }
        if let Some(mut recipe) = self.recipe.take() {
            recipe.finish(tree);
            self.settle(tree);
        }
    }

    /// Route a tap, in host coordinates, to the content's buttons.
    ///
    /// Close buttons start hiding the balloon before their callback runs.
    /// Taps are ignored unless the balloon is fully shown.
    pub fn handle_tap(&mut self, tree: &mut ViewTree, point: Point) -> Option<ButtonHit> {
        if self.state != BalloonState::Shown {
            log::debug!("Ignoring tap while balloon is {}", self.state);
            return None;
        }
        let views = self.views?;
        let host = self.host?;
        let local = tree.convert_point(point, host, views.content)?;
        let hit = self.content.hit_button(local)?;

        if hit.kind == ButtonKind::Close {
            if let Err(e) = self.hide(tree, None) {
                log::warn!("Close button could not hide balloon: {}", e);
            }
        }
        self.content.activate(hit.index);
        Some(hit)
    }

    /// Finish the entrance or exit that just ran out
    fn settle(&mut self, tree: &mut ViewTree) {
        match self.state {
            BalloonState::Showing => {
                self.state = BalloonState::Shown;
                log::debug!("Balloon shown");
            }
            BalloonState::Hiding => {
                if let Some(views) = self.views {
                    tree.remove_from_parent(views.root);
                    tree.set_transform(views.root, Transform::IDENTITY);
                    tree.set_alpha(views.root, 1.0);
                    tree.set_transform(views.pin, Transform::IDENTITY);
                    tree.set_alpha(views.pin, 1.0);
                }
                self.host = None;
                self.placement = None;
                self.state = BalloonState::Hidden;
                log::debug!("Balloon hidden");
            }
            BalloonState::Hidden | BalloonState::Shown => return,
        }

        if let Some(completion) = self.completion.take() {
            completion(true);
        }
    }
}
