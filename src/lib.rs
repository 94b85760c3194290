//! vitals-chart: layout and interaction engine for vital-sign line charts.
//!
//! The crate maps labelled numeric readings into pixel geometry, emits a
//! backend-agnostic draw frame, and drives hover/click selection of the
//! rendered point markers.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartOptions};
pub use error::{ChartError, ChartResult};
