use std::any::Any;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::core::{
    CandleDirection, CandleGeometry, CandleLayout, CoordinateMapper, OhlcDataSeries, OhlcSeries,
    layout_candles,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{DrawingContext, Rect};

use super::{CandleStyle, PaintReport, PlotBinding, SeriesKind, SeriesRenderer};

/// Draws an OHLC series as fixed-pitch candles, newest bar at the right edge.
#[derive(Debug, Clone)]
pub struct CandlestickRenderer<S> {
    series: S,
    style: CandleStyle,
    layout: CandleLayout,
    binding: Option<PlotBinding>,
}

impl<S: OhlcSeries> CandlestickRenderer<S> {
    #[must_use]
    pub fn new(series: S) -> Self {
        Self {
            series,
            style: CandleStyle::default(),
            layout: CandleLayout::default(),
            binding: None,
        }
    }

    pub fn with_style(mut self, style: CandleStyle) -> ChartResult<Self> {
        self.style = style.validate()?;
        self.layout = CandleLayout::new(self.style.body_width_px)?;
        Ok(self)
    }

    #[must_use]
    pub fn style(&self) -> CandleStyle {
        self.style
    }

    #[must_use]
    pub fn layout(&self) -> CandleLayout {
        self.layout
    }

    #[must_use]
    pub fn series(&self) -> &S {
        &self.series
    }

    pub fn series_mut(&mut self) -> &mut S {
        &mut self.series
    }

    /// Geometry the next paint would draw, rightmost bar first.
    pub fn geometry(&self) -> ChartResult<Vec<CandleGeometry>> {
        let Some(binding) = self.binding else {
            return Ok(Vec::new());
        };
        match CoordinateMapper::for_ohlc(&self.series, binding.area, binding.padding)? {
            Some(mapper) => layout_candles(&self.series, &mapper, self.layout),
            None => Ok(Vec::new()),
        }
    }

    fn paint_candle(
        &self,
        context: &mut dyn DrawingContext,
        candle: &CandleGeometry,
    ) -> ChartResult<()> {
        context.set_stroke_color(self.style.wick_color);
        context.begin_path();
        context.move_to(candle.wick_x, candle.wick_top);
        context.line_to(candle.wick_x, candle.wick_bottom);
        context.close_path();
        context.stroke()?;

        let (fill, stroke) = match candle.direction {
            CandleDirection::Up => (self.style.up_fill_color, self.style.up_stroke_color),
            CandleDirection::Down => (self.style.down_fill_color, self.style.down_stroke_color),
        };
        let body = Rect::new(
            candle.left,
            candle.body_top,
            candle.body_width,
            candle.body_height,
        );
        context.set_fill_color(fill);
        context.set_stroke_color(stroke);
        context.fill_rect(body)?;
        context.stroke_rect(body)
    }
}

impl<R> CandlestickRenderer<OhlcDataSeries<R>> {
    pub fn set_data(&mut self, rows: impl Into<Arc<[R]>>) {
        let rows = rows.into();
        debug!(rows = rows.len(), "replaced candlestick series data");
        self.series.set_data(rows);
    }
}

impl<S: OhlcSeries + 'static> SeriesRenderer for CandlestickRenderer<S> {
    fn kind(&self) -> SeriesKind {
        SeriesKind::Candlestick
    }

    fn bind(&mut self, binding: PlotBinding) {
        self.binding = Some(binding);
    }

    fn binding(&self) -> Option<PlotBinding> {
        self.binding
    }

    fn paint(&self, context: &mut dyn DrawingContext) -> ChartResult<PaintReport> {
        if self.binding.is_none() {
            return Err(ChartError::InvalidData(
                "candlestick series is not bound to a surface".to_owned(),
            ));
        }

        let candles = self.geometry()?;
        context.set_line_width(self.style.line_width_px);
        for candle in &candles {
            self.paint_candle(context, candle)?;
        }

        trace!(
            bars = candles.len(),
            series_len = self.series.len(),
            "painted candlestick series"
        );
        Ok(PaintReport {
            kind: SeriesKind::Candlestick,
            items_drawn: candles.len(),
        })
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
