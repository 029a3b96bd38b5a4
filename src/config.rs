//! Instance defaults, per-trigger attribute overrides, and their overlay.
//!
//! A tooltip instance carries `TooltipProps` defaults; every trigger element
//! may carry string-valued `TriggerAttrs` overrides read off the host node.
//! The effective configuration for one show event is the overlay of the two,
//! and trigger attributes win whenever present.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::position::{Offset, Placement};

/// Color theme selector passed through to the styling layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Success,
    Warning,
    Error,
    Info,
    Light,
}

impl Theme {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "success" => Some(Self::Success),
            "warning" => Some(Self::Warning),
            "error" => Some(Self::Error),
            "info" => Some(Self::Info),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Info => "info",
            Self::Light => "light",
        }
    }
}

/// Instance-level defaults, loadable from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TooltipProps {
    /// Group key linking triggers to this instance (`None` = unmarked group).
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub place: Placement,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub offset: Offset,
    #[serde(default)]
    pub border: bool,
    #[serde(default)]
    pub delay_show_ms: u64,
    #[serde(default)]
    pub delay_hide_ms: u64,
    #[serde(default)]
    pub extra_class: String,
    /// Instance-level content. Wins over a trigger's own `tip` attribute.
    #[serde(default)]
    pub content: Option<String>,
    /// Custom show event name used for triggers that don't declare their own.
    #[serde(default)]
    pub event: Option<String>,
    /// Custom hide event name paired with `event`.
    #[serde(default)]
    pub event_off: Option<String>,
    /// Window-level event name that hides the tooltip unconditionally.
    #[serde(default)]
    pub global_event_off: Option<String>,
    /// Default capture mode for listeners on triggers without an override.
    #[serde(default)]
    pub is_capture: bool,
    /// Re-run trigger discovery and binding on window resize.
    #[serde(default = "default_true")]
    pub resize_rebuild: bool,
    /// Hide on page scroll while visible.
    #[serde(default = "default_true")]
    pub scroll_hide: bool,
}

fn default_true() -> bool {
    true
}

impl Default for TooltipProps {
    fn default() -> Self {
        Self {
            group: None,
            place: Placement::default(),
            theme: Theme::default(),
            offset: Offset::default(),
            border: false,
            delay_show_ms: 0,
            delay_hide_ms: 0,
            extra_class: String::new(),
            content: None,
            event: None,
            event_off: None,
            global_event_off: None,
            is_capture: false,
            resize_rebuild: true,
            scroll_hide: true,
        }
    }
}

/// Raw string attributes read from a trigger element, unparsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerAttrs {
    /// Group key (`data-for`).
    pub group: Option<String>,
    /// Tooltip content carried by the trigger itself (`data-tip`).
    pub tip: Option<String>,
    pub place: Option<String>,
    pub theme: Option<String>,
    /// JSON offset string, e.g. `{"x": 10, "y": -5}`.
    pub offset: Option<String>,
    pub border: Option<String>,
    pub delay_show: Option<String>,
    pub delay_hide: Option<String>,
    pub extra_class: Option<String>,
    pub scroll_hide: Option<String>,
    /// Custom show event name (`data-event`).
    pub event: Option<String>,
    /// Custom hide event name (`data-event-off`).
    pub event_off: Option<String>,
    /// Capture-mode override (`data-iscapture`).
    pub is_capture: Option<String>,
}

impl TriggerAttrs {
    /// Capture mode: attribute override wins, then the instance default.
    pub fn capture_mode(&self, default: bool) -> bool {
        self.is_capture
            .as_deref()
            .map(|s| s == "true")
            .unwrap_or(default)
    }
}

/// Fully resolved configuration for one show event.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveConfig {
    pub place: Placement,
    pub theme: Theme,
    pub offset: Offset,
    pub border: bool,
    pub delay_show: Duration,
    pub delay_hide: Duration,
    pub extra_class: String,
    pub scroll_hide: bool,
}

impl EffectiveConfig {
    /// Overlay trigger attributes onto instance props.
    ///
    /// Attributes win whenever present. Unrecognized placement/theme strings
    /// fall back to the prop value; an unparsable delay counts as zero and a
    /// malformed offset as `{0, 0}`. All of those log a warning instead of
    /// surfacing an error.
    pub fn resolve(props: &TooltipProps, attrs: &TriggerAttrs) -> Self {
        let place = attrs
            .place
            .as_deref()
            .and_then(|s| {
                let parsed = Placement::from_str(s);
                if parsed.is_none() {
                    tracing::warn!("{}", Error::UnknownPlacement(s.to_string()));
                }
                parsed
            })
            .unwrap_or(props.place);

        let theme = attrs
            .theme
            .as_deref()
            .and_then(|s| {
                let parsed = Theme::from_str(s);
                if parsed.is_none() {
                    tracing::warn!("{}", Error::UnknownTheme(s.to_string()));
                }
                parsed
            })
            .unwrap_or(props.theme);

        Self {
            place,
            theme,
            offset: attrs
                .offset
                .as_deref()
                .map(Offset::parse_or_zero)
                .unwrap_or(props.offset),
            border: attrs
                .border
                .as_deref()
                .map(|s| s == "true")
                .unwrap_or(props.border),
            delay_show: Duration::from_millis(
                parse_delay(attrs.delay_show.as_deref()).unwrap_or(props.delay_show_ms),
            ),
            delay_hide: Duration::from_millis(
                parse_delay(attrs.delay_hide.as_deref()).unwrap_or(props.delay_hide_ms),
            ),
            extra_class: attrs
                .extra_class
                .clone()
                .unwrap_or_else(|| props.extra_class.clone()),
            scroll_hide: attrs
                .scroll_hide
                .as_deref()
                .map(|s| s == "true")
                .unwrap_or(props.scroll_hide),
        }
    }

    /// Compose the selector class list for the styling layer.
    pub fn class_list(&self, visible: bool, place: Placement) -> String {
        let mut classes = String::from("tooltip");
        if visible {
            classes.push_str(" show");
        }
        if self.border {
            classes.push_str(" border");
        }
        classes.push_str(" place-");
        classes.push_str(place.as_str());
        classes.push_str(" type-");
        classes.push_str(self.theme.as_str());
        if !self.extra_class.is_empty() {
            classes.push(' ');
            classes.push_str(&self.extra_class);
        }
        classes
    }
}

/// A delay attribute that doesn't parse counts as no delay.
fn parse_delay(raw: Option<&str>) -> Option<u64> {
    let raw = raw?;
    match raw.trim().parse::<u64>() {
        Ok(ms) => Some(ms),
        Err(_) => {
            tracing::warn!("unparsable delay {raw:?}, treating as 0");
            Some(0)
        }
    }
}

/// Content for a show event: instance content wins over the trigger's `tip`
/// attribute; empty strings count as absent.
pub fn resolve_content<'a>(props: &'a TooltipProps, attrs: &'a TriggerAttrs) -> Option<&'a str> {
    props
        .content
        .as_deref()
        .filter(|s| !s.is_empty())
        .or_else(|| attrs.tip.as_deref().filter(|s| !s.is_empty()))
}
