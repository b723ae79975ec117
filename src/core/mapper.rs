//! Data-space to pixel-space mapping.
//!
//! A [`CoordinateMapper`] is rebuilt on every paint from the series it maps
//! and the plot area it targets. It holds no state beyond that snapshot, so a
//! resize or a data swap takes effect on the next redraw.

use serde::{Deserialize, Serialize};

use crate::core::{LinearScale, OhlcSeries, PixelPoint, Series, ValueRange, Viewport};
use crate::error::{ChartError, ChartResult};

/// Drawable region of a surface. X pixels run from `left_margin` to `width`;
/// the strip left of the margin is reserved for axis labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub width: f64,
    pub height: f64,
    pub left_margin: f64,
}

impl PlotArea {
    pub fn new(viewport: Viewport, left_margin: f64) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        let width = f64::from(viewport.width);
        if !left_margin.is_finite() || left_margin < 0.0 || left_margin >= width {
            return Err(ChartError::InvalidData(format!(
                "left margin must be finite and in [0, {width})"
            )));
        }

        Ok(Self {
            width,
            height: f64::from(viewport.height),
            left_margin,
        })
    }

    #[must_use]
    pub fn usable_width(self) -> f64 {
        self.width - self.left_margin
    }
}

/// Fractions of the raw span added to each end of an axis range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisPadding {
    pub value: f64,
    pub time: f64,
}

impl Default for AxisPadding {
    fn default() -> Self {
        Self {
            value: 0.10,
            time: 0.01,
        }
    }
}

impl AxisPadding {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.value.is_finite() || !self.time.is_finite() || self.value < 0.0 || self.time < 0.0
        {
            return Err(ChartError::InvalidData(
                "axis padding fractions must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Scans `[0, len)` once and returns the min/max of `low_of`/`high_of`.
///
/// Returns `Ok(None)` for an empty index range.
fn scan_range(
    len: usize,
    low_field: &'static str,
    high_field: &'static str,
    low_of: impl Fn(usize) -> f64,
    high_of: impl Fn(usize) -> f64,
) -> ChartResult<Option<ValueRange>> {
    let mut range: Option<ValueRange> = None;
    for index in 0..len {
        let low = finite(low_of(index), low_field, index)?;
        let high = finite(high_of(index), high_field, index)?;
        range = Some(match range {
            Some(r) => r.including(low).including(high),
            None => ValueRange::new(low.min(high), low.max(high)),
        });
    }
    Ok(range)
}

fn finite(value: f64, field: &'static str, index: usize) -> ChartResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ChartError::NonFiniteValue { field, index })
    }
}

/// Raw (unpadded) value range of a plain series: min/max of Y.
pub fn value_range<S: Series + ?Sized>(series: &S) -> ChartResult<Option<ValueRange>> {
    scan_range(series.len(), "y", "y", |i| series.y(i), |i| series.y(i))
}

/// Raw (unpadded) value range of an OHLC series: min Low, max High.
pub fn ohlc_value_range<S: OhlcSeries + ?Sized>(series: &S) -> ChartResult<Option<ValueRange>> {
    scan_range(series.len(), "low", "high", |i| series.low(i), |i| series.high(i))
}

/// Raw time range `[X(first), X(last)]`; rows are assumed sorted by X.
pub fn time_range<S: Series + ?Sized>(series: &S) -> ChartResult<Option<ValueRange>> {
    let len = series.len();
    if len == 0 {
        return Ok(None);
    }
    let first = finite(series.x(0), "x", 0)?;
    let last = finite(series.x(len - 1), "x", len - 1)?;
    Ok(Some(ValueRange::new(first, last)))
}

/// Affine data-to-pixel transform for one series on one plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    area: PlotArea,
    x_range: ValueRange,
    y_range: ValueRange,
    x_scale: LinearScale,
    y_scale: LinearScale,
}

impl CoordinateMapper {
    /// Builds the mapper from raw ranges: pads, guards zero spans, then fits
    /// X into `[left_margin, width]` and Y into `[height, 0]`.
    pub fn from_ranges(
        raw_x: ValueRange,
        raw_y: ValueRange,
        area: PlotArea,
        padding: AxisPadding,
    ) -> ChartResult<Self> {
        let padding = padding.validate()?;
        let x_range = raw_x.padded(padding.time).non_degenerate();
        let y_range = raw_y.padded(padding.value).non_degenerate();

        let x_scale = LinearScale::new(x_range, area.left_margin, area.width)?;
        let y_scale = LinearScale::new(y_range, area.height, 0.0)?;

        Ok(Self {
            area,
            x_range,
            y_range,
            x_scale,
            y_scale,
        })
    }

    /// Mapper for a plain series (value axis from Y). `None` when empty.
    pub fn for_series<S: Series + ?Sized>(
        series: &S,
        area: PlotArea,
        padding: AxisPadding,
    ) -> ChartResult<Option<Self>> {
        let (Some(raw_x), Some(raw_y)) = (time_range(series)?, value_range(series)?) else {
            return Ok(None);
        };
        Self::from_ranges(raw_x, raw_y, area, padding).map(Some)
    }

    /// Mapper for an OHLC series (value axis from Low/High). `None` when empty.
    pub fn for_ohlc<S: OhlcSeries + ?Sized>(
        series: &S,
        area: PlotArea,
        padding: AxisPadding,
    ) -> ChartResult<Option<Self>> {
        let (Some(raw_x), Some(raw_y)) = (time_range(series)?, ohlc_value_range(series)?) else {
            return Ok(None);
        };
        Self::from_ranges(raw_x, raw_y, area, padding).map(Some)
    }

    #[must_use]
    pub fn area(&self) -> PlotArea {
        self.area
    }

    /// Padded time range.
    #[must_use]
    pub fn x_range(&self) -> ValueRange {
        self.x_range
    }

    /// Padded value range.
    #[must_use]
    pub fn y_range(&self) -> ValueRange {
        self.y_range
    }

    #[must_use]
    pub fn x_pixels_per_unit(&self) -> f64 {
        self.x_scale.pixels_per_unit()
    }

    /// Magnitude of the value-axis scale; pixel Y decreases as value grows.
    #[must_use]
    pub fn y_pixels_per_unit(&self) -> f64 {
        -self.y_scale.pixels_per_unit()
    }

    pub fn map_x(&self, x: f64) -> ChartResult<f64> {
        self.x_scale.domain_to_pixel(x)
    }

    pub fn map_y(&self, y: f64) -> ChartResult<f64> {
        self.y_scale.domain_to_pixel(y)
    }

    pub fn map_point(&self, x: f64, y: f64) -> ChartResult<PixelPoint> {
        Ok(PixelPoint::new(self.map_x(x)?, self.map_y(y)?))
    }

    /// Inverse of [`Self::map_y`].
    pub fn value_at_pixel(&self, pixel_y: f64) -> ChartResult<f64> {
        self.y_scale.pixel_to_domain(pixel_y)
    }
}
