//! Frame-driven animation sequences
//!
//! A [`Sequence`] is an ordered list of [`Phase`]s. Each phase first applies
//! its instant `set` steps, then tweens its `animate` steps from whatever
//! values the views hold at that moment to the requested targets over the
//! phase duration, shaped by a [`Curve`]. Phases run back to back; time left
//! over at the end of one phase flows into the next.

use std::collections::VecDeque;

use crate::transform::Transform;
use crate::view::{ViewId, ViewTree};

/// Timing curve of a phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curve {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Damped spring settling within the phase duration.
    /// `damping` is the damping ratio: 1.0 is critically damped, lower values overshoot.
    Spring { damping: f32 },
}

impl Curve {
    /// Spring with `damping` when `bouncy` is set, a critically damped spring otherwise
    pub fn spring_or_critical(bouncy: bool, damping: f32) -> Self {
        Self::Spring {
            damping: if bouncy { damping } else { 1.0 },
        }
    }

    /// Map linear progress (0.0 to 1.0) to curve progress.
    /// Springs may overshoot 1.0 before settling; every curve ends exactly at 1.0.
    pub fn apply(self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t * t,
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
            Self::Spring { damping } => spring_response(damping, t),
        }
    }

    /// Check if this curve can produce values above 1.0
    pub fn can_overshoot(self) -> bool {
        matches!(self, Self::Spring { damping } if damping < 1.0)
    }
}

/// Step response of a unit-mass spring whose envelope decays to 0.1% at t = 1
fn spring_response(damping: f32, t: f32) -> f32 {
    // ln(1000)
    const SETTLE: f32 = 6.907_755;
    let zeta = damping.clamp(0.05, 1.0);
    let omega = SETTLE / zeta;
    let decay = (-zeta * omega * t).exp();

    if zeta >= 1.0 {
        return 1.0 - decay * (1.0 + omega * t);
    }

    let omega_d = omega * (1.0 - zeta * zeta).sqrt();
    let (sin, cos) = (omega_d * t).sin_cos();
    1.0 - decay * (cos + zeta * omega / omega_d * sin)
}

/// An animatable view property with its value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Property {
    Alpha(f32),
    Transform(Transform),
}

impl Property {
    fn read(&self, tree: &ViewTree, view: ViewId) -> Property {
        match self {
            Self::Alpha(_) => Self::Alpha(tree.alpha(view)),
            Self::Transform(_) => Self::Transform(tree.transform(view)),
        }
    }

    fn write(&self, tree: &mut ViewTree, view: ViewId) {
        match *self {
            Self::Alpha(alpha) => tree.set_alpha(view, alpha.clamp(0.0, 1.0)),
            Self::Transform(transform) => tree.set_transform(view, transform),
        }
    }

    fn interpolate(&self, to: &Property, t: f32) -> Property {
        match (self, to) {
            (Self::Alpha(a), Self::Alpha(b)) => Self::Alpha(a + (b - a) * t),
            (Self::Transform(a), Self::Transform(b)) => Self::Transform(a.lerp(b, t)),
            _ => *to,
        }
    }
}

/// A property change applied to one view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub view: ViewId,
    pub property: Property,
}

/// One timed segment of a sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Phase {
    duration: f32,
    curve: Curve,
    setup: Vec<Step>,
    tweens: Vec<Step>,
}

impl Phase {
    /// Create a phase lasting `duration` seconds
    pub fn new(duration: f32, curve: Curve) -> Self {
        Self {
            duration: duration.max(0.0),
            curve,
            setup: Vec::new(),
            tweens: Vec::new(),
        }
    }

    /// A zero-length phase that only applies `set` steps
    pub fn instant() -> Self {
        Self::new(0.0, Curve::Linear)
    }

    /// Apply a value immediately when the phase starts
    pub fn set(mut self, view: ViewId, property: Property) -> Self {
        self.setup.push(Step { view, property });
        self
    }

    /// Tween a property to a value over the phase
    pub fn animate(mut self, view: ViewId, property: Property) -> Self {
        self.tweens.push(Step { view, property });
        self
    }
}

#[derive(Debug)]
struct ActivePhase {
    phase: Phase,
    from: Vec<Property>,
    elapsed: f32,
}

impl ActivePhase {
    fn apply_progress(&self, tree: &mut ViewTree, progress: f32) {
        let eased = self.phase.curve.apply(progress);
        for (step, from) in self.phase.tweens.iter().zip(&self.from) {
            from.interpolate(&step.property, eased).write(tree, step.view);
        }
    }

    fn apply_end(&self, tree: &mut ViewTree) {
        for step in &self.phase.tweens {
            step.property.write(tree, step.view);
        }
    }
}

/// Progress report of a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceStatus {
    Running,
    Finished,
}

/// Ordered list of phases driven by [`Sequence::update`]
#[derive(Debug, Default)]
pub struct Sequence {
    pending: VecDeque<Phase>,
    active: Option<ActivePhase>,
    started: bool,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a phase
    pub fn then(mut self, phase: Phase) -> Self {
        self.pending.push_back(phase);
        self
    }

    /// Number of phases not yet started
    pub fn pending_phases(&self) -> usize {
        self.pending.len()
    }

    /// Total duration of the phases not yet started plus the remainder of the active one
    pub fn remaining(&self) -> f32 {
        let active = self
            .active
            .as_ref()
            .map(|a| (a.phase.duration - a.elapsed).max(0.0))
            .unwrap_or(0.0);
        active + self.pending.iter().map(|p| p.duration).sum::<f32>()
    }

    pub fn is_finished(&self) -> bool {
        self.started && self.active.is_none() && self.pending.is_empty()
    }

    /// Begin the first phase. Zero-length phases complete immediately.
    pub fn start(&mut self, tree: &mut ViewTree) -> SequenceStatus {
        self.started = true;
        self.advance(tree, 0.0)
    }

    /// Advance the sequence by `dt` seconds
    pub fn update(&mut self, tree: &mut ViewTree, dt: f32) -> SequenceStatus {
        if !self.started {
            self.started = true;
        }
        self.advance(tree, dt.max(0.0))
    }

    /// Jump to the end, applying every remaining setup and target value
    pub fn finish(&mut self, tree: &mut ViewTree) {
        self.started = true;
        loop {
            if let Some(active) = self.active.take() {
                active.apply_end(tree);
            }
            if !self.activate_next(tree) {
                break;
            }
        }
    }

    fn advance(&mut self, tree: &mut ViewTree, dt: f32) -> SequenceStatus {
        let mut remaining = dt;
        loop {
            if self.active.is_none() && !self.activate_next(tree) {
                return SequenceStatus::Finished;
            }
            let Some(active) = self.active.as_mut() else {
                return SequenceStatus::Finished;
            };

            active.elapsed += remaining;
            if active.elapsed < active.phase.duration {
                let progress = active.elapsed / active.phase.duration;
                active.apply_progress(tree, progress);
                return SequenceStatus::Running;
            }

            remaining = active.elapsed - active.phase.duration;
            active.apply_end(tree);
            self.active = None;
        }
    }

    fn activate_next(&mut self, tree: &mut ViewTree) -> bool {
        let Some(phase) = self.pending.pop_front() else {
            return false;
        };
        for step in &phase.setup {
            step.property.write(tree, step.view);
        }
        let from = phase
            .tweens
            .iter()
            .map(|step| step.property.read(tree, step.view))
            .collect();
        self.active = Some(ActivePhase {
            phase,
            from,
            elapsed: 0.0,
        });
        true
    }
}
