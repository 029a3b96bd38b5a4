//! Show/hide lifecycle arbitration with delay timers.
//!
//! Timers are plain deadlines drained by an explicit `poll(now)` pump driven
//! from the host loop; nothing fires in the background. At most one deadline
//! is ever armed: arming either kind first cancels both kinds, so a hide
//! request always supersedes a pending show and vice versa, and no stale
//! timer can fire after being superseded.

use std::time::{Duration, Instant};

use crate::geometry::{NodeId, Point};

/// Lifecycle of one tooltip instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisibilityState {
    #[default]
    Hidden,
    PendingShow,
    Visible,
    PendingHide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    Show,
    Hide,
}

/// A pending deadline for a deferred commit.
#[derive(Debug, Clone, Copy)]
pub struct PendingTimer {
    pub kind: TimerKind,
    pub fire_at: Instant,
}

/// What a show/hide request requires of the caller right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Commit synchronously.
    CommitNow,
    /// A deadline was armed; commit when `poll` reports it due.
    Deferred,
    /// The machine is disposed; nothing to do.
    Ignored,
}

/// Arbitrates show/hide requests for one tooltip instance.
#[derive(Debug, Default)]
pub struct DelayMachine {
    state: VisibilityState,
    timer: Option<PendingTimer>,
    disposed: bool,
    /// Target/pointer captured at request time, promoted on commit.
    pending_target: Option<NodeId>,
    pending_pointer: Option<Point>,
    current_target: Option<NodeId>,
    current_pointer: Option<Point>,
}

impl DelayMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> VisibilityState {
        self.state
    }

    /// Whether the tooltip is currently shown. A pending hide still counts
    /// as shown until its commit runs.
    pub fn is_visible(&self) -> bool {
        matches!(
            self.state,
            VisibilityState::Visible | VisibilityState::PendingHide
        )
    }

    /// The trigger the visible tooltip is anchored to.
    pub fn current_target(&self) -> Option<NodeId> {
        self.current_target
    }

    pub fn current_pointer(&self) -> Option<Point> {
        self.current_pointer
    }

    /// The target a decided-but-uncommitted show is for, falling back to the
    /// currently shown target.
    pub fn requested_target(&self) -> Option<NodeId> {
        self.pending_target.or(self.current_target)
    }

    /// The armed deadline, if any.
    pub fn pending_timer(&self) -> Option<PendingTimer> {
        self.timer
    }

    /// A show request supersedes any outstanding timer of either kind.
    ///
    /// Re-entry while already shown commits immediately regardless of the
    /// configured delay.
    pub fn request_show(
        &mut self,
        target: NodeId,
        pointer: Option<Point>,
        delay: Duration,
        now: Instant,
    ) -> Decision {
        if self.disposed {
            return Decision::Ignored;
        }
        self.timer = None;
        self.pending_target = Some(target);
        self.pending_pointer = pointer;

        if self.is_visible() || delay.is_zero() {
            return Decision::CommitNow;
        }
        self.state = VisibilityState::PendingShow;
        self.timer = Some(PendingTimer {
            kind: TimerKind::Show,
            fire_at: now + delay,
        });
        Decision::Deferred
    }

    /// A hide request supersedes any outstanding timer of either kind.
    pub fn request_hide(&mut self, delay: Duration, now: Instant) -> Decision {
        if self.disposed {
            return Decision::Ignored;
        }
        self.timer = None;
        if delay.is_zero() {
            return Decision::CommitNow;
        }
        self.state = if self.is_visible() {
            VisibilityState::PendingHide
        } else {
            // A hide that superseded a pending show: the tooltip was never
            // shown, but the deferred commit still runs (as a no-op).
            VisibilityState::Hidden
        };
        self.timer = Some(PendingTimer {
            kind: TimerKind::Hide,
            fire_at: now + delay,
        });
        Decision::Deferred
    }

    /// Return the due timer kind, if the armed deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<TimerKind> {
        if self.disposed {
            return None;
        }
        match self.timer {
            Some(timer) if timer.fire_at <= now => {
                self.timer = None;
                Some(timer.kind)
            }
            _ => None,
        }
    }

    /// Transition into visibility. Returns true when this is a transition
    /// from a non-shown state, i.e. when `after_show` should fire.
    pub fn commit_show(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        let became_visible = !self.is_visible();
        self.state = VisibilityState::Visible;
        self.current_target = self.pending_target.take().or(self.current_target);
        self.current_pointer = self.pending_pointer.take().or(self.current_pointer);
        became_visible
    }

    /// A decided show did not materialize (no content, or the geometry is
    /// gone). Rolls a pending show back to hidden; an already shown tooltip
    /// stays shown.
    pub fn abort_show(&mut self) {
        self.pending_target = None;
        self.pending_pointer = None;
        if !self.is_visible() {
            self.state = VisibilityState::Hidden;
        } else {
            self.state = VisibilityState::Visible;
        }
    }

    /// Transition to hidden. Returns true when the tooltip was actually
    /// shown, i.e. when `after_hide` should fire.
    pub fn commit_hide(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        let was_visible = self.is_visible();
        self.state = VisibilityState::Hidden;
        self.current_target = None;
        self.current_pointer = None;
        was_visible
    }

    /// Cancel both timers and refuse all further work. Idempotent; late
    /// timer callbacks after this degrade to no-ops.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.timer = None;
        self.state = VisibilityState::Hidden;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}
