//! hovertip
//!
//! The behavioral core of a floating tooltip: anchored positioning with
//! edge-overflow reversal, a show/hide state machine with delays and
//! debounce, trigger discovery and listener bookkeeping, and page-wide
//! coordination between instances. Rendering, styling, and event capture
//! stay in the host; this crate turns geometry and raw events into "what to
//! show, where, and when".

pub mod config;
pub mod coordinator;
pub mod error;
pub mod geometry;
pub mod machine;
pub mod position;
pub mod registry;
pub mod scroll;
pub mod tooltip;

pub use config::{EffectiveConfig, Theme, TooltipProps, TriggerAttrs};
pub use coordinator::{GlobalCoordinator, Signal};
pub use error::{Error, Result};
pub use geometry::{GeometryProvider, NodeId, Point, Rect};
pub use position::{Offset, Placement};
pub use registry::{InputEvent, Trigger};
pub use tooltip::Tooltip;
