use std::any::Any;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::core::{CoordinateMapper, DataSeries, Series, project_polyline};
use crate::error::{ChartError, ChartResult};
use crate::render::DrawingContext;

use super::{LineStyle, PaintReport, PlotBinding, SeriesKind, SeriesRenderer};

/// Draws a series as one connected polyline in ascending index order.
///
/// Fewer than two points draw nothing: no path is begun and no stroke is
/// issued, and the report counts zero vertices.
#[derive(Debug, Clone)]
pub struct LineRenderer<S> {
    series: S,
    style: LineStyle,
    binding: Option<PlotBinding>,
}

impl<S: Series> LineRenderer<S> {
    #[must_use]
    pub fn new(series: S) -> Self {
        Self {
            series,
            style: LineStyle::default(),
            binding: None,
        }
    }

    pub fn with_style(mut self, style: LineStyle) -> ChartResult<Self> {
        self.style = style.validate()?;
        Ok(self)
    }

    #[must_use]
    pub fn style(&self) -> LineStyle {
        self.style
    }

    #[must_use]
    pub fn series(&self) -> &S {
        &self.series
    }

    pub fn series_mut(&mut self) -> &mut S {
        &mut self.series
    }

    /// Mapping the next paint would use; `None` when unbound or empty.
    pub fn mapper(&self) -> ChartResult<Option<CoordinateMapper>> {
        match self.binding {
            Some(binding) => {
                CoordinateMapper::for_series(&self.series, binding.area, binding.padding)
            }
            None => Ok(None),
        }
    }
}

impl<R> LineRenderer<DataSeries<R>> {
    pub fn set_data(&mut self, rows: impl Into<Arc<[R]>>) {
        let rows = rows.into();
        debug!(rows = rows.len(), "replaced line series data");
        self.series.set_data(rows);
    }
}

impl<S: Series + 'static> SeriesRenderer for LineRenderer<S> {
    fn kind(&self) -> SeriesKind {
        SeriesKind::Line
    }

    fn bind(&mut self, binding: PlotBinding) {
        self.binding = Some(binding);
    }

    fn binding(&self) -> Option<PlotBinding> {
        self.binding
    }

    fn paint(&self, context: &mut dyn DrawingContext) -> ChartResult<PaintReport> {
        let binding = self.binding.ok_or_else(|| {
            ChartError::InvalidData("line series is not bound to a surface".to_owned())
        })?;
        let mut report = PaintReport {
            kind: SeriesKind::Line,
            items_drawn: 0,
        };

        let Some(mapper) =
            CoordinateMapper::for_series(&self.series, binding.area, binding.padding)?
        else {
            trace!("line series is empty; nothing to draw");
            return Ok(report);
        };

        let points = project_polyline(&self.series, &mapper)?;
        let [first, rest @ ..] = points.as_slice() else {
            return Ok(report);
        };
        if rest.is_empty() {
            trace!("line series has a single point; no stroke");
            return Ok(report);
        }

        context.set_stroke_color(self.style.color);
        context.set_line_width(self.style.line_width_px);
        context.begin_path();
        context.move_to(first.x, first.y);
        for point in rest {
            context.line_to(point.x, point.y);
        }
        context.stroke()?;

        report.items_drawn = points.len();
        trace!(points = report.items_drawn, "painted line series");
        Ok(report)
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
