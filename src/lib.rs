//! bar-chart-rs: line and candlestick charts for price bars.
//!
//! Series wrap caller-owned rows through accessor closures, a per-paint
//! coordinate mapper turns data into pixels, and renderers draw onto any
//! backend implementing [`render::DrawingContext`]. A simple moving average
//! feeds the overlay line.

pub mod api;
pub mod core;
pub mod error;
pub mod feed;
pub mod render;
pub mod telemetry;

pub use api::{ChartSurface, SurfaceConfig};
pub use error::{ChartError, ChartResult};
