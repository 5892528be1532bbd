pub mod primitives;
pub mod projection;
pub mod range_controller;
pub mod types;

pub use projection::{BarProjection, Projection};
pub use range_controller::{MIN_ZOOM_FACTOR, RangeController, zoom_range};
pub use types::{TimeRange, Viewport};
