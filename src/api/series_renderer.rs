use std::any::Any;

use serde::{Deserialize, Serialize};

use crate::core::{AxisPadding, PlotArea};
use crate::error::ChartResult;
use crate::render::DrawingContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesKind {
    Line,
    Candlestick,
}

/// Outcome of painting one series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaintReport {
    pub kind: SeriesKind,
    /// Polyline vertices for lines, bars for candlesticks.
    pub items_drawn: usize,
}

/// Where a bound renderer draws and how it pads its ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotBinding {
    pub area: PlotArea,
    pub padding: AxisPadding,
}

/// A series plus the routine that paints it.
///
/// Each renderer derives its own coordinate mapping on every paint; series on
/// the same surface do not share a scale.
pub trait SeriesRenderer: Any {
    fn kind(&self) -> SeriesKind;

    /// Called by the surface when the series is added and on every resize.
    fn bind(&mut self, binding: PlotBinding);

    fn binding(&self) -> Option<PlotBinding>;

    fn paint(&self, context: &mut dyn DrawingContext) -> ChartResult<PaintReport>;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}
