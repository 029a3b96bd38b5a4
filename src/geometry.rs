//! Rectangle math and the host geometry interface.

/// Host-assigned identifier for a UI node (trigger element or tooltip box).
pub type NodeId = u64;

/// A point in screen coordinates (pixels, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.left + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.top + self.height / 2.0
    }
}

/// Read-only geometry queries answered by the host rendering surface.
///
/// The placement algorithm only ever sees rectangles, so it can be exercised
/// with synthetic geometry in tests and driven by any renderer in production.
pub trait GeometryProvider {
    /// The visible viewport, in the same coordinate space as all node rects.
    fn viewport(&self) -> Rect;

    /// Current bounding box of a node, or `None` if the node is gone.
    fn bounding_box(&self, node: NodeId) -> Option<Rect>;
}
