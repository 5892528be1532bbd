//! timeline-rs: headless layout core for Gantt-style timelines.
//!
//! The crate owns the visible time window of a timeline, maps it onto a
//! viewport, and plans which calendar ticks to show. Rendering stays with the
//! host: everything here returns plain geometry.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod telemetry;
pub mod ticks;

pub use api::{TimelineEngine, TimelineEngineConfig};
pub use error::{TimelineError, TimelineResult};
