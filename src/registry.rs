//! Trigger discovery and listener bookkeeping.
//!
//! The host scans its surface for nodes carrying the tip marker and hands
//! them over as [`Trigger`] values; the registry filters them by group key,
//! decides which event pair each one listens on and in which phase, and
//! routes raw input events back to show/hide actions. It never owns the
//! nodes: re-binding tears down the previous bookkeeping first, so a rebind
//! after a host mutation is always safe.

use std::collections::HashMap;

use crate::config::{TooltipProps, TriggerAttrs};
use crate::geometry::{NodeId, Point};

/// Default pointer event pair bound when a trigger declares no custom event.
pub const POINTER_ENTER: &str = "mouseenter";
pub const POINTER_LEAVE: &str = "mouseleave";

/// A trigger element as scanned from the host surface.
#[derive(Debug, Clone, Default)]
pub struct Trigger {
    pub id: NodeId,
    pub attrs: TriggerAttrs,
}

impl Trigger {
    pub fn new(id: NodeId, attrs: TriggerAttrs) -> Self {
        Self { id, attrs }
    }
}

/// A raw input event routed in from the host.
#[derive(Debug, Clone)]
pub struct InputEvent {
    pub name: String,
    pub target: NodeId,
    pub pointer: Option<Point>,
}

impl InputEvent {
    pub fn new(name: impl Into<String>, target: NodeId) -> Self {
        Self {
            name: name.into(),
            target,
            pointer: None,
        }
    }

    pub fn at(mut self, pointer: Point) -> Self {
        self.pointer = Some(pointer);
        self
    }
}

/// Listener bookkeeping for one bound trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub show_event: String,
    /// `None` for a custom show event with no declared off event; that
    /// event then toggles.
    pub hide_event: Option<String>,
    /// Whether the host should register listeners in the capturing phase.
    pub capture: bool,
    pub custom: bool,
}

/// What a routed event asks of the tooltip instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerAction {
    Show,
    Hide,
    Toggle,
}

/// Tracks which triggers this instance listens on and how.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    bound: HashMap<NodeId, Binding>,
    global_off: Option<String>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discover and bind the triggers belonging to this instance's group.
    ///
    /// Triggers already bound are re-bound from scratch, so calling this
    /// repeatedly (e.g. on a rebuild signal) never stacks listeners.
    /// Returns the number of bound triggers.
    pub fn bind(&mut self, props: &TooltipProps, triggers: &[Trigger]) -> usize {
        self.bound.clear();
        for trigger in triggers {
            if !group_matches(props.group.as_deref(), trigger.attrs.group.as_deref()) {
                continue;
            }
            self.bound.insert(trigger.id, make_binding(props, &trigger.attrs));
        }
        self.global_off = props.global_event_off.clone();
        tracing::debug!(
            group = props.group.as_deref().unwrap_or("<unmarked>"),
            count = self.bound.len(),
            "bound triggers"
        );
        self.bound.len()
    }

    /// Symmetric teardown, including the window-level dismissal event.
    pub fn unbind(&mut self) {
        self.bound.clear();
        self.global_off = None;
    }

    /// Whether a node belongs to this instance's current trigger set.
    pub fn is_member(&self, id: NodeId) -> bool {
        self.bound.contains_key(&id)
    }

    pub fn binding(&self, id: NodeId) -> Option<&Binding> {
        self.bound.get(&id)
    }

    pub fn len(&self) -> usize {
        self.bound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }

    /// Whether a window-level event name is this instance's dismissal event.
    pub fn matches_global_off(&self, name: &str) -> bool {
        self.global_off.as_deref() == Some(name)
    }

    /// Map a raw input event to the action it requests, if the event's
    /// target is bound here and the name matches its event pair.
    pub fn dispatch(&self, event: &InputEvent) -> Option<TriggerAction> {
        let binding = self.bound.get(&event.target)?;
        match &binding.hide_event {
            None if event.name == binding.show_event => Some(TriggerAction::Toggle),
            Some(off) if event.name == *off => Some(TriggerAction::Hide),
            _ if event.name == binding.show_event => Some(TriggerAction::Show),
            _ => None,
        }
    }
}

/// The attribute selector a DOM-backed host would use for this group, with
/// the key embedded literally (backslashes and quotes escaped).
pub fn selector(group: Option<&str>) -> String {
    match group {
        None => "[data-tip]:not([data-for])".to_string(),
        Some(key) => {
            let escaped = key.replace('\\', "\\\\").replace('"', "\\\"");
            format!("[data-tip][data-for=\"{escaped}\"]")
        }
    }
}

/// An instance with no group key only owns unmarked-group triggers.
fn group_matches(instance: Option<&str>, trigger: Option<&str>) -> bool {
    match (instance, trigger) {
        (None, None) => true,
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn make_binding(props: &TooltipProps, attrs: &TriggerAttrs) -> Binding {
    let custom_event = attrs.event.as_deref().or(props.event.as_deref());
    match custom_event {
        Some(event) => Binding {
            show_event: event.to_string(),
            hide_event: attrs
                .event_off
                .as_deref()
                .or(props.event_off.as_deref())
                .map(str::to_string),
            capture: attrs.capture_mode(props.is_capture),
            custom: true,
        },
        None => Binding {
            show_event: POINTER_ENTER.to_string(),
            hide_event: Some(POINTER_LEAVE.to_string()),
            capture: attrs.capture_mode(props.is_capture),
            custom: false,
        },
    }
}
