use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{AxisPadding, PlotArea, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{DrawingContext, Rect};

use super::{PaintReport, PlotBinding, SeriesRenderer};

/// Surface bootstrap configuration.
///
/// Serializable so host applications can persist chart placement alongside
/// their own settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceConfig {
    pub viewport: Viewport,
    /// Strip on the left reserved for axis labels.
    #[serde(default = "default_left_margin_px")]
    pub left_margin_px: f64,
    #[serde(default)]
    pub padding: AxisPadding,
}

impl SurfaceConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            left_margin_px: default_left_margin_px(),
            padding: AxisPadding::default(),
        }
    }

    #[must_use]
    pub fn with_left_margin(mut self, left_margin_px: f64) -> Self {
        self.left_margin_px = left_margin_px;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: AxisPadding) -> Self {
        self.padding = padding;
        self
    }

    pub fn plot_area(self) -> ChartResult<PlotArea> {
        PlotArea::new(self.viewport, self.left_margin_px)
    }

    pub fn validate(self) -> ChartResult<Self> {
        self.plot_area()?;
        self.padding.validate()?;
        Ok(self)
    }

    pub fn to_json_pretty(self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))?;
        config.validate()
    }
}

fn default_left_margin_px() -> f64 {
    50.0
}

/// Typed handle to a renderer added to a [`ChartSurface`].
pub struct SeriesHandle<T> {
    index: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> SeriesHandle<T> {
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl<T> Clone for SeriesHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SeriesHandle<T> {}

impl<T> fmt::Debug for SeriesHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SeriesHandle").field(&self.index).finish()
    }
}

/// Result of one full redraw, one report per series in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedrawReport {
    pub series: Vec<PaintReport>,
}

impl RedrawReport {
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.series.iter().map(|report| report.items_drawn).sum()
    }
}

/// A drawing context plus the series painted onto it.
///
/// Series can be added but not removed; build a new surface to start over.
/// Every [`redraw`](Self::redraw) clears the whole surface first, then paints
/// series in the order they were added.
pub struct ChartSurface<C: DrawingContext> {
    config: SurfaceConfig,
    area: PlotArea,
    context: C,
    series: Vec<Box<dyn SeriesRenderer>>,
}

impl<C: DrawingContext> ChartSurface<C> {
    pub fn new(context: C, config: SurfaceConfig) -> ChartResult<Self> {
        let config = config.validate()?;
        let area = config.plot_area()?;
        debug!(
            width = config.viewport.width,
            height = config.viewport.height,
            left_margin = config.left_margin_px,
            "created chart surface"
        );
        Ok(Self {
            config,
            area,
            context,
            series: Vec::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> SurfaceConfig {
        self.config
    }

    #[must_use]
    pub fn plot_area(&self) -> PlotArea {
        self.area
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Binds `renderer` to this surface's plot area and appends it.
    pub fn add_series<T: SeriesRenderer>(&mut self, mut renderer: T) -> SeriesHandle<T> {
        renderer.bind(self.binding());
        let index = self.series.len();
        debug!(index, kind = ?renderer.kind(), "added series");
        self.series.push(Box::new(renderer));
        SeriesHandle {
            index,
            _marker: PhantomData,
        }
    }

    /// Mutable access to a previously added renderer, e.g. to swap its data.
    pub fn series_mut<T: SeriesRenderer>(&mut self, handle: SeriesHandle<T>) -> Option<&mut T> {
        let renderer: &mut dyn Any = self.series.get_mut(handle.index)?.as_any_mut();
        renderer.downcast_mut::<T>()
    }

    /// Changes the surface size and rebinds every series.
    pub fn resize(&mut self, viewport: Viewport) -> ChartResult<()> {
        let config = SurfaceConfig {
            viewport,
            ..self.config
        }
        .validate()?;
        self.area = config.plot_area()?;
        self.config = config;
        let binding = self.binding();
        for renderer in &mut self.series {
            renderer.bind(binding);
        }
        debug!(
            width = viewport.width,
            height = viewport.height,
            "resized chart surface"
        );
        Ok(())
    }

    /// Clears the surface and repaints every series.
    ///
    /// Stops at the first failing series; whatever was already drawn stays on
    /// the surface until the next redraw clears it.
    pub fn redraw(&mut self) -> ChartResult<RedrawReport> {
        self.context.clear_rect(Rect::new(
            0.0,
            0.0,
            self.area.width,
            self.area.height,
        ))?;

        let mut report = RedrawReport::default();
        for (index, renderer) in self.series.iter().enumerate() {
            match renderer.paint(&mut self.context) {
                Ok(paint) => report.series.push(paint),
                Err(err) => {
                    warn!(index, error = %err, "series paint failed; aborting redraw");
                    return Err(err);
                }
            }
        }

        debug!(
            series = report.series.len(),
            items = report.total_items(),
            "redraw complete"
        );
        Ok(report)
    }

    #[must_use]
    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    #[must_use]
    pub fn into_context(self) -> C {
        self.context
    }

    fn binding(&self) -> PlotBinding {
        PlotBinding {
            area: self.area,
            padding: self.config.padding,
        }
    }
}
