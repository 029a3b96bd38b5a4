//! Shared test helpers: synthetic geometry, triggers, and timelines.

use std::collections::HashMap;
use std::time::Duration;

use hovertip::{GeometryProvider, NodeId, Rect, Trigger, TriggerAttrs};
use tracing_subscriber::EnvFilter;

/// Opt-in log output while debugging a test: `RUST_LOG=hovertip=debug`.
#[allow(dead_code)]
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Node id used for the rendered tooltip box in tests.
#[allow(dead_code)]
pub const TIP_NODE: NodeId = 100;

/// Geometry backed by a plain map, so placement and lifecycle logic run
/// against synthetic rectangles with no rendering surface.
#[derive(Debug, Default)]
pub struct FakeGeometry {
    viewport: Rect,
    boxes: HashMap<NodeId, Rect>,
}

#[allow(dead_code)]
impl FakeGeometry {
    pub fn new(viewport: Rect) -> Self {
        Self {
            viewport,
            boxes: HashMap::new(),
        }
    }

    pub fn with_box(mut self, node: NodeId, rect: Rect) -> Self {
        self.boxes.insert(node, rect);
        self
    }

    pub fn set_box(&mut self, node: NodeId, rect: Rect) {
        self.boxes.insert(node, rect);
    }

    pub fn remove_box(&mut self, node: NodeId) {
        self.boxes.remove(&node);
    }
}

impl GeometryProvider for FakeGeometry {
    fn viewport(&self) -> Rect {
        self.viewport
    }

    fn bounding_box(&self, node: NodeId) -> Option<Rect> {
        self.boxes.get(&node).copied()
    }
}

/// 500x500 viewport, 20x20 trigger at (100, 100) with node id 1, 60x30
/// tooltip box. Most placement assertions are worked out against this scene.
#[allow(dead_code)]
pub fn standard_scene() -> FakeGeometry {
    FakeGeometry::new(Rect::new(0.0, 0.0, 500.0, 500.0))
        .with_box(1, Rect::new(100.0, 100.0, 20.0, 20.0))
        .with_box(TIP_NODE, Rect::new(0.0, 0.0, 60.0, 30.0))
}

/// A trigger carrying content and an optional group key.
#[allow(dead_code)]
pub fn tip_trigger(id: NodeId, group: Option<&str>) -> Trigger {
    Trigger::new(
        id,
        TriggerAttrs {
            group: group.map(str::to_string),
            tip: Some("tip text".to_string()),
            ..Default::default()
        },
    )
}

#[allow(dead_code)]
pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}
