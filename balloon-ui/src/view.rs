//! Retained view tree
//!
//! Views live in an arena owned by [`ViewTree`] and are addressed by
//! [`ViewId`]. A view has a frame in its parent's coordinate space, a
//! transform applied around its center, an opacity and a hidden flag.
//! Views are never freed; detached views simply have no parent.

use crate::geometry::{Point, Rect};
use crate::transform::{Affine, Transform};

/// Handle to a view inside a [`ViewTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(usize);

impl ViewId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Node {
    name: String,
    frame: Rect,
    transform: Transform,
    alpha: f32,
    hidden: bool,
    parent: Option<ViewId>,
    children: Vec<ViewId>,
}

/// Arena of views forming one or more trees
#[derive(Debug, Default)]
pub struct ViewTree {
    nodes: Vec<Node>,
}

impl ViewTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached view with the given frame
    pub fn add_view(&mut self, name: impl Into<String>, frame: Rect) -> ViewId {
        let id = ViewId(self.nodes.len());
        self.nodes.push(Node {
            name: name.into(),
            frame,
            transform: Transform::IDENTITY,
            alpha: 1.0,
            hidden: false,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Number of views in the arena
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node(&self, id: ViewId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: ViewId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn name(&self, id: ViewId) -> &str {
        &self.node(id).name
    }

    /// Attach `child` as the topmost child of `parent`, detaching it first if needed
    pub fn add_child(&mut self, parent: ViewId, child: ViewId) {
        if parent == child || self.is_ancestor(child, parent) {
            log::warn!(
                "refusing to attach '{}' under its own descendant '{}'",
                self.name(child),
                self.name(parent)
            );
            return;
        }
        self.remove_from_parent(child);
        self.node_mut(parent).children.push(child);
        self.node_mut(child).parent = Some(parent);
    }

    /// Detach a view from its parent; no-op when already detached
    pub fn remove_from_parent(&mut self, id: ViewId) {
        if let Some(parent) = self.node_mut(id).parent.take() {
            self.node_mut(parent).children.retain(|c| *c != id);
        }
    }

    /// Detach every child of a view
    pub fn remove_children(&mut self, id: ViewId) {
        let children = std::mem::take(&mut self.node_mut(id).children);
        for child in children {
            self.node_mut(child).parent = None;
        }
    }

    pub fn parent(&self, id: ViewId) -> Option<ViewId> {
        self.node(id).parent
    }

    pub fn children(&self, id: ViewId) -> &[ViewId] {
        &self.node(id).children
    }

    /// Topmost ancestor of a view (the view itself when detached)
    pub fn root(&self, id: ViewId) -> ViewId {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// Check whether `ancestor` is a strict ancestor of `id`
    pub fn is_ancestor(&self, ancestor: ViewId, id: ViewId) -> bool {
        let mut current = self.parent(id);
        while let Some(view) = current {
            if view == ancestor {
                return true;
            }
            current = self.parent(view);
        }
        false
    }

    pub fn frame(&self, id: ViewId) -> Rect {
        self.node(id).frame
    }

    pub fn set_frame(&mut self, id: ViewId, frame: Rect) {
        self.node_mut(id).frame = frame;
    }

    /// The view's own coordinate space: its size at the origin
    pub fn bounds(&self, id: ViewId) -> Rect {
        Rect::from_size(self.node(id).frame.size)
    }

    pub fn transform(&self, id: ViewId) -> Transform {
        self.node(id).transform
    }

    pub fn set_transform(&mut self, id: ViewId, transform: Transform) {
        self.node_mut(id).transform = transform;
    }

    pub fn alpha(&self, id: ViewId) -> f32 {
        self.node(id).alpha
    }

    pub fn set_alpha(&mut self, id: ViewId, alpha: f32) {
        self.node_mut(id).alpha = alpha;
    }

    pub fn is_hidden(&self, id: ViewId) -> bool {
        self.node(id).hidden
    }

    pub fn set_hidden(&mut self, id: ViewId, hidden: bool) {
        self.node_mut(id).hidden = hidden;
    }

    /// Check whether the view and all its ancestors are visible
    pub fn is_visible(&self, id: ViewId) -> bool {
        let mut current = Some(id);
        while let Some(view) = current {
            if self.is_hidden(view) {
                return false;
            }
            current = self.parent(view);
        }
        true
    }

    /// Product of the view's opacity with all its ancestors'
    pub fn effective_alpha(&self, id: ViewId) -> f32 {
        let mut alpha = 1.0;
        let mut current = Some(id);
        while let Some(view) = current {
            alpha *= self.alpha(view);
            current = self.parent(view);
        }
        alpha
    }

    /// Origin of the view's own coordinate space, expressed in its root's space.
    /// Transforms are not taken into account.
    pub fn origin_in_root(&self, id: ViewId) -> Point {
        let mut origin = Point::ZERO;
        let mut current = Some(id);
        while let Some(view) = current {
            let parent = self.parent(view);
            if parent.is_some() {
                let frame = self.frame(view);
                origin = origin.offset(frame.x(), frame.y());
            }
            current = parent;
        }
        origin
    }

    /// Matrix mapping the view's local coordinates into its root's coordinates,
    /// including every transform on the way
    pub fn to_root_affine(&self, id: ViewId) -> Affine {
        let mut affine = Affine::IDENTITY;
        let mut current = Some(id);
        while let Some(view) = current {
            let parent = self.parent(view);
            if parent.is_some() {
                affine = self.local_affine(view).compose(&affine);
            }
            current = parent;
        }
        affine
    }

    /// Matrix mapping the view's local coordinates into its parent's
    fn local_affine(&self, id: ViewId) -> Affine {
        let node = self.node(id);
        let half = Point::new(node.frame.width() / 2.0, node.frame.height() / 2.0);
        let linear = Affine::from(node.transform);
        let spun = linear.apply(half);
        Affine {
            tx: linear.tx + node.frame.x() + half.x - (spun.x - linear.tx),
            ty: linear.ty + node.frame.y() + half.y - (spun.y - linear.ty),
            ..linear
        }
    }

    /// Convert a rectangle from `from`'s coordinate space to `to`'s.
    /// Returns `None` when the two views belong to different trees.
    pub fn convert_rect(&self, rect: Rect, from: ViewId, to: ViewId) -> Option<Rect> {
        if self.root(from) != self.root(to) {
            return None;
        }
        let from_origin = self.origin_in_root(from);
        let to_origin = self.origin_in_root(to);
        Some(rect.offset(from_origin.x - to_origin.x, from_origin.y - to_origin.y))
    }

    /// Convert a point from `from`'s coordinate space to `to`'s
    pub fn convert_point(&self, point: Point, from: ViewId, to: ViewId) -> Option<Point> {
        self.convert_rect(Rect { origin: point, size: Default::default() }, from, to)
            .map(|r| r.origin)
    }

    /// A view's frame expressed in `to`'s coordinate space.
    /// Returns `None` when the view has no parent or lives in another tree.
    pub fn frame_in(&self, id: ViewId, to: ViewId) -> Option<Rect> {
        let parent = self.parent(id)?;
        self.convert_rect(self.frame(id), parent, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> (ViewTree, ViewId, ViewId, ViewId) {
        let mut tree = ViewTree::new();
        let root = tree.add_view("root", Rect::new(0.0, 0.0, 320.0, 480.0));
        let panel = tree.add_view("panel", Rect::new(20.0, 40.0, 200.0, 200.0));
        let button = tree.add_view("button", Rect::new(10.0, 10.0, 50.0, 20.0));
        tree.add_child(root, panel);
        tree.add_child(panel, button);
        (tree, root, panel, button)
    }

    #[test]
    fn test_root_and_ancestry() {
        let (tree, root, panel, button) = sample_tree();
        assert_eq!(tree.root(button), root);
        assert!(tree.is_ancestor(root, button));
        assert!(tree.is_ancestor(panel, button));
        assert!(!tree.is_ancestor(button, panel));
    }

    #[test]
    fn test_frame_in_converts_between_spaces() {
        let (tree, root, panel, button) = sample_tree();
        assert_eq!(
            tree.frame_in(button, root),
            Some(Rect::new(30.0, 50.0, 50.0, 20.0))
        );
        assert_eq!(tree.frame_in(button, panel), Some(tree.frame(button)));
        assert_eq!(tree.frame_in(root, root), None);
    }

    #[test]
    fn test_convert_rect_rejects_foreign_trees() {
        let (mut tree, root, _, _) = sample_tree();
        let other = tree.add_view("other", Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(tree.convert_rect(Rect::ZERO, root, other).is_none());
    }

    #[test]
    fn test_reparent_and_detach() {
        let (mut tree, root, panel, button) = sample_tree();
        tree.add_child(root, button);
        assert_eq!(tree.parent(button), Some(root));
        assert!(tree.children(panel).is_empty());

        tree.remove_from_parent(button);
        assert_eq!(tree.parent(button), None);
        assert_eq!(tree.children(root), &[panel]);
    }

    #[test]
    fn test_to_root_affine_without_transforms_matches_origin() {
        let (tree, _, _, button) = sample_tree();
        let p = tree.to_root_affine(button).apply(Point::new(1.0, 2.0));
        assert_eq!(p, Point::new(31.0, 52.0));
    }

    #[test]
    fn test_to_root_affine_scales_around_center() {
        let (mut tree, _, panel, _) = sample_tree();
        tree.set_transform(panel, Transform::scale(0.5, 0.5));
        let affine = tree.to_root_affine(panel);
        // the panel's center (100, 100) stays at (120, 140)
        assert_eq!(affine.apply(Point::new(100.0, 100.0)), Point::new(120.0, 140.0));
        assert_eq!(affine.apply(Point::new(0.0, 0.0)), Point::new(70.0, 90.0));
    }

    #[test]
    fn test_cycle_is_refused() {
        let _ = env_logger::builder().is_test(true).try_init();
        let (mut tree, root, panel, _) = sample_tree();
        tree.add_child(panel, root);
        assert_eq!(tree.parent(root), None);
    }

    #[test]
    fn test_effective_alpha_and_visibility() {
        let (mut tree, _, panel, button) = sample_tree();
        tree.set_alpha(panel, 0.5);
        tree.set_alpha(button, 0.5);
        assert_eq!(tree.effective_alpha(button), 0.25);

        tree.set_hidden(panel, true);
        assert!(!tree.is_visible(button));
    }
}
