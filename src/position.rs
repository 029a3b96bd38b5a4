//! Tooltip placement: candidate position, viewport clamping, and
//! edge-overflow reversal.
//!
//! The calculator is a pure function of rectangles. It never fails: when the
//! requested side overflows the viewport it asks for one retry on the
//! mirrored side, and when neither side has room it falls back to a clamped
//! position instead of looping.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::{Point, Rect};

/// Side of the trigger the tooltip is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

impl Placement {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "top" => Some(Self::Top),
            "bottom" => Some(Self::Bottom),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// The opposite side, used for overflow reversal.
    pub fn mirrored(&self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Vertical placements anchor along y; the cross axis is x.
    fn is_vertical(&self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Pixel offset added to the candidate position before clamping.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
}

impl Offset {
    /// Parse a JSON offset string such as `{"x": 10, "y": -5}`.
    pub fn parse(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|_| Error::MalformedOffset(raw.to_string()))
    }

    /// Parse, degrading to a zero offset on malformed input.
    pub fn parse_or_zero(raw: &str) -> Self {
        match Self::parse(raw) {
            Ok(offset) => offset,
            Err(e) => {
                tracing::warn!("{e}, using zero offset");
                Self::default()
            }
        }
    }
}

/// Outcome of a single placement step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Computed {
    /// Final placement and top-left position for the tooltip box.
    Fit { place: Placement, position: Point },
    /// The requested side overflows and the mirrored side has room.
    Retry { place: Placement },
}

/// Candidate top-left: centered on the trigger along the cross axis,
/// abutting it along the main axis, plus the configured offset.
fn candidate(trigger: Rect, tip: Rect, place: Placement, offset: Offset) -> Point {
    let mut pos = match place {
        Placement::Top => Point::new(
            trigger.center_x() - tip.width / 2.0,
            trigger.top - tip.height,
        ),
        Placement::Bottom => {
            Point::new(trigger.center_x() - tip.width / 2.0, trigger.bottom())
        }
        Placement::Left => Point::new(
            trigger.left - tip.width,
            trigger.center_y() - tip.height / 2.0,
        ),
        Placement::Right => {
            Point::new(trigger.right(), trigger.center_y() - tip.height / 2.0)
        }
    };
    pos.x += offset.x;
    pos.y += offset.y;
    pos
}

/// Whether the trigger has room for the tooltip box on the given side.
/// Exact edge contact counts as fitting.
fn side_has_room(trigger: Rect, tip: Rect, place: Placement, viewport: Rect) -> bool {
    match place {
        Placement::Top => trigger.top - tip.height >= viewport.top,
        Placement::Bottom => trigger.bottom() + tip.height <= viewport.bottom(),
        Placement::Left => trigger.left - tip.width >= viewport.left,
        Placement::Right => trigger.right() + tip.width <= viewport.right(),
    }
}

/// Clamp `v` so a span of `size` starting at `v` stays inside `[start, end]`.
/// When the span is larger than the range, the start edge wins.
fn clamp_span(v: f32, start: f32, end: f32, size: f32) -> f32 {
    v.min(end - size).max(start)
}

/// One placement step for the requested side.
///
/// The returned position is clamped on the cross axis unconditionally and on
/// the main axis only when the side overflows and no reversal is possible.
pub fn compute(
    trigger: Rect,
    tip: Rect,
    place: Placement,
    offset: Offset,
    viewport: Rect,
) -> Computed {
    let cand = candidate(trigger, tip, place, offset);

    let mut position = if place.is_vertical() {
        Point::new(
            clamp_span(cand.x, viewport.left, viewport.right(), tip.width),
            cand.y,
        )
    } else {
        Point::new(
            cand.x,
            clamp_span(cand.y, viewport.top, viewport.bottom(), tip.height),
        )
    };

    let overflows = match place {
        Placement::Top => position.y < viewport.top,
        Placement::Bottom => position.y + tip.height > viewport.bottom(),
        Placement::Left => position.x < viewport.left,
        Placement::Right => position.x + tip.width > viewport.right(),
    };

    if overflows {
        let mirror = place.mirrored();
        if side_has_room(trigger, tip, mirror, viewport) {
            return Computed::Retry { place: mirror };
        }
        // Neither side fits: keep the requested placement, clamped.
        if place.is_vertical() {
            position.y = clamp_span(position.y, viewport.top, viewport.bottom(), tip.height);
        } else {
            position.x = clamp_span(position.x, viewport.left, viewport.right(), tip.width);
        }
    }

    Computed::Fit { place, position }
}

/// Full placement with the single-retry reversal policy applied.
pub fn resolve(
    trigger: Rect,
    tip: Rect,
    place: Placement,
    offset: Offset,
    viewport: Rect,
) -> (Placement, Point) {
    match compute(trigger, tip, place, offset, viewport) {
        Computed::Fit { place, position } => (place, position),
        Computed::Retry { place: flipped } => {
            match compute(trigger, tip, flipped, offset, viewport) {
                Computed::Fit { place, position } => (place, position),
                // A retry is only emitted when the mirrored side has room,
                // so the second pass fits. One retry only: if it ever did
                // not, clamp on the mirrored side rather than flip again.
                Computed::Retry { .. } => {
                    let cand = candidate(trigger, tip, flipped, offset);
                    let position = Point::new(
                        clamp_span(cand.x, viewport.left, viewport.right(), tip.width),
                        clamp_span(cand.y, viewport.top, viewport.bottom(), tip.height),
                    );
                    (flipped, position)
                }
            }
        }
    }
}
