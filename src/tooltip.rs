//! A tooltip instance: explicit composition of the listener registry, delay
//! state machine, scroll guard, and coordinator subscription.
//!
//! The instance never renders anything. It consumes raw input events and
//! coordination signals, drives the show/hide lifecycle, and exposes the
//! resolved placement, styling selectors, and pixel position for the host's
//! rendering layer to apply.

use std::time::{Duration, Instant};

use crate::config::{self, EffectiveConfig, Theme, TooltipProps, TriggerAttrs};
use crate::coordinator::{GlobalCoordinator, Signal, Subscription};
use crate::geometry::{GeometryProvider, NodeId, Point};
use crate::machine::{Decision, DelayMachine, TimerKind, VisibilityState};
use crate::position::{self, Placement};
use crate::registry::{InputEvent, ListenerRegistry, Trigger, TriggerAction};
use crate::scroll::ScrollGuard;

/// Window-level event names with built-in handling.
pub const WINDOW_SCROLL: &str = "scroll";
pub const WINDOW_RESIZE: &str = "resize";

type Callback = Box<dyn FnMut()>;

pub struct Tooltip {
    /// Host node id of the rendered tooltip box.
    node: NodeId,
    props: TooltipProps,
    registry: ListenerRegistry,
    machine: DelayMachine,
    guard: ScrollGuard,
    subscription: Option<Subscription>,
    /// Snapshot of the last scanned trigger set, reused on rebuild signals.
    triggers: Vec<Trigger>,
    /// Styling and delays resolved at the last show request.
    resolved: Option<EffectiveConfig>,
    /// Content resolved at the last show request.
    content: Option<String>,
    final_place: Placement,
    position: Option<Point>,
    after_show: Option<Callback>,
    after_hide: Option<Callback>,
}

impl std::fmt::Debug for Tooltip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tooltip")
            .field("node", &self.node)
            .field("group", &self.props.group)
            .field("state", &self.machine.state())
            .field("place", &self.final_place)
            .field("position", &self.position)
            .finish()
    }
}

impl Tooltip {
    pub fn new(node: NodeId, props: TooltipProps) -> Self {
        let final_place = props.place;
        Self {
            node,
            props,
            registry: ListenerRegistry::new(),
            machine: DelayMachine::new(),
            guard: ScrollGuard::new(),
            subscription: None,
            triggers: Vec::new(),
            resolved: None,
            content: None,
            final_place,
            position: None,
            after_show: None,
            after_hide: None,
        }
    }

    /// Lifecycle callback fired on each transition into visibility.
    pub fn after_show(mut self, callback: impl FnMut() + 'static) -> Self {
        self.after_show = Some(Box::new(callback));
        self
    }

    /// Lifecycle callback fired on each transition out of visibility.
    pub fn after_hide(mut self, callback: impl FnMut() + 'static) -> Self {
        self.after_hide = Some(Box::new(callback));
        self
    }

    /// Subscribe to the coordinator and bind the scanned triggers.
    pub fn mount(&mut self, coordinator: &mut GlobalCoordinator, triggers: &[Trigger]) {
        self.subscription = Some(coordinator.subscribe());
        self.bind(triggers);
    }

    /// (Re)bind against a fresh scan of the host surface. Idempotent.
    pub fn bind(&mut self, triggers: &[Trigger]) {
        self.triggers = triggers.to_vec();
        self.registry.bind(&self.props, &self.triggers);
    }

    /// Tear everything down: cancel timers, unbind listeners, unsubscribe.
    /// Safe to call repeatedly.
    pub fn dispose(&mut self, coordinator: &mut GlobalCoordinator) {
        self.machine.dispose();
        self.registry.unbind();
        self.guard.disarm();
        if let Some(subscription) = self.subscription.take() {
            coordinator.unsubscribe(subscription.id());
        }
    }

    /// Route a raw input event from the host.
    ///
    /// Events whose target is not one of this instance's bound triggers, or
    /// whose name matches neither side of the trigger's event pair, are
    /// ignored.
    pub fn handle_event(&mut self, event: &InputEvent, geo: &dyn GeometryProvider, now: Instant) {
        match self.registry.dispatch(event) {
            Some(TriggerAction::Show) => {
                self.request_show(event.target, event.pointer, geo, now);
            }
            Some(TriggerAction::Hide) => self.request_hide(None, geo, now),
            Some(TriggerAction::Toggle) => {
                if self.machine.is_visible()
                    && self.machine.current_target() == Some(event.target)
                {
                    self.request_hide(None, geo, now);
                } else {
                    self.request_show(event.target, event.pointer, geo, now);
                }
            }
            None => {}
        }
    }

    /// Route a window-level event: scroll while armed forces a hide, and the
    /// configured dismissal event hides unconditionally.
    pub fn handle_window_event(&mut self, name: &str, geo: &dyn GeometryProvider, now: Instant) {
        if name == WINDOW_SCROLL {
            if self.guard.on_scroll() {
                self.request_hide(None, geo, now);
            }
            return;
        }
        if self.registry.matches_global_off(name) {
            self.request_hide(None, geo, now);
        }
    }

    /// Window resize: re-run discovery and binding over a fresh scan, if the
    /// instance is configured to.
    pub fn handle_resize(&mut self, triggers: &[Trigger]) {
        if self.props.resize_rebuild {
            self.bind(triggers);
        }
    }

    /// Fire any due show/hide deadline.
    pub fn process_timers(&mut self, geo: &dyn GeometryProvider, now: Instant) {
        while let Some(kind) = self.machine.poll(now) {
            match kind {
                TimerKind::Show => self.commit_show(geo),
                TimerKind::Hide => self.commit_hide(),
            }
        }
    }

    /// Drain and apply coordination signals. Show/hide signals are filtered
    /// by trigger-set membership; rebuild reuses the last trigger snapshot
    /// (call [`bind`](Self::bind) first if the host surface changed).
    pub fn process_signals(&mut self, geo: &dyn GeometryProvider, now: Instant) {
        let Some(subscription) = &self.subscription else {
            return;
        };
        for signal in subscription.drain() {
            match signal {
                Signal::Rebuild => {
                    self.registry.bind(&self.props, &self.triggers);
                }
                Signal::Show { target } => {
                    // Foreign targets and already-shown instances ignore the
                    // synthesized show.
                    if self.registry.is_member(target) && !self.machine.is_visible() {
                        self.request_show(target, None, geo, now);
                    }
                }
                Signal::Hide { target } => self.request_hide(Some(target), geo, now),
            }
        }
    }

    // ── Show/hide paths ──────────────────────────────────────────────

    fn request_show(
        &mut self,
        target: NodeId,
        pointer: Option<Point>,
        geo: &dyn GeometryProvider,
        now: Instant,
    ) {
        let Some(attrs) = self.attrs_for(target) else {
            return;
        };
        let cfg = EffectiveConfig::resolve(&self.props, attrs);
        self.content = config::resolve_content(&self.props, attrs).map(str::to_string);
        let delay = cfg.delay_show;
        self.resolved = Some(cfg);

        match self.machine.request_show(target, pointer, delay, now) {
            Decision::CommitNow => self.commit_show(geo),
            Decision::Deferred | Decision::Ignored => {}
        }
    }

    /// `membership` carries the signalled target for cross-instance hides;
    /// those are dropped unless the target is ours and the tooltip is shown.
    fn request_hide(
        &mut self,
        membership: Option<NodeId>,
        _geo: &dyn GeometryProvider,
        now: Instant,
    ) {
        if let Some(target) = membership {
            if !self.registry.is_member(target) || !self.machine.is_visible() {
                return;
            }
        }
        let delay = self
            .resolved
            .as_ref()
            .map(|cfg| cfg.delay_hide)
            .unwrap_or(Duration::from_millis(self.props.delay_hide_ms));

        match self.machine.request_hide(delay, now) {
            Decision::CommitNow => self.commit_hide(),
            Decision::Deferred | Decision::Ignored => {}
        }
    }

    fn commit_show(&mut self, geo: &dyn GeometryProvider) {
        let (place, offset, scroll_hide) = match &self.resolved {
            Some(cfg) => (cfg.place, cfg.offset, cfg.scroll_hide),
            None => {
                self.machine.abort_show();
                return;
            }
        };
        // No content, no tooltip.
        if self.content.as_deref().is_none_or(str::is_empty) {
            self.machine.abort_show();
            return;
        }
        let target = match self.machine.requested_target() {
            Some(target) => target,
            None => {
                self.machine.abort_show();
                return;
            }
        };
        // Geometry gone between request and commit: suppress the show.
        let (Some(trigger_rect), Some(tip_rect)) =
            (geo.bounding_box(target), geo.bounding_box(self.node))
        else {
            self.machine.abort_show();
            return;
        };

        let (final_place, pos) =
            position::resolve(trigger_rect, tip_rect, place, offset, geo.viewport());
        self.final_place = final_place;
        self.position = Some(pos);

        let became_visible = self.machine.commit_show();
        if scroll_hide {
            self.guard.arm();
        } else {
            self.guard.disarm();
        }
        if became_visible {
            tracing::debug!(node = self.node, trigger = target, place = final_place.as_str(), "show");
            if let Some(callback) = self.after_show.as_mut() {
                callback();
            }
        }
    }

    fn commit_hide(&mut self) {
        let was_visible = self.machine.commit_hide();
        self.guard.disarm();
        if was_visible {
            tracing::debug!(node = self.node, "hide");
            if let Some(callback) = self.after_hide.as_mut() {
                callback();
            }
        }
    }

    fn attrs_for(&self, id: NodeId) -> Option<&TriggerAttrs> {
        self.triggers
            .iter()
            .find(|trigger| trigger.id == id)
            .map(|trigger| &trigger.attrs)
    }

    // ── State exposed to the rendering layer ─────────────────────────

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn props(&self) -> &TooltipProps {
        &self.props
    }

    pub fn state(&self) -> VisibilityState {
        self.machine.state()
    }

    pub fn is_visible(&self) -> bool {
        self.machine.is_visible()
    }

    /// Placement after any overflow reversal.
    pub fn place(&self) -> Placement {
        self.final_place
    }

    pub fn theme(&self) -> Theme {
        self.resolved
            .as_ref()
            .map(|cfg| cfg.theme)
            .unwrap_or(self.props.theme)
    }

    pub fn border(&self) -> bool {
        self.resolved
            .as_ref()
            .map(|cfg| cfg.border)
            .unwrap_or(self.props.border)
    }

    /// Selector class list for the styling layer.
    pub fn class_list(&self) -> String {
        match &self.resolved {
            Some(cfg) => cfg.class_list(self.is_visible(), self.final_place),
            None => EffectiveConfig::resolve(&self.props, &TriggerAttrs::default())
                .class_list(self.is_visible(), self.final_place),
        }
    }

    /// Top-left pixel position computed at the last commit.
    pub fn position(&self) -> Option<Point> {
        self.position
    }

    /// The trigger the tooltip is currently anchored to.
    pub fn current_target(&self) -> Option<NodeId> {
        self.machine.current_target()
    }
}
