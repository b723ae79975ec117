//! Fixed-pitch candlestick layout.
//!
//! Bars are placed right to left starting from the newest (highest index)
//! row. Each bar occupies `pitch` pixels: a body of `body_width` plus a gap.
//! Horizontal placement ignores X values entirely; only the value axis goes
//! through the mapper. Layout stops at the first bar whose left edge would
//! cross the left margin, so older bars are dropped rather than squeezed.

use serde::{Deserialize, Serialize};

use crate::core::{CoordinateMapper, OhlcSeries};
use crate::error::{ChartError, ChartResult};

/// Horizontal bar geometry shared by every candle in a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleLayout {
    body_width: f64,
}

impl Default for CandleLayout {
    fn default() -> Self {
        Self { body_width: 4.0 }
    }
}

impl CandleLayout {
    pub fn new(body_width: f64) -> ChartResult<Self> {
        if !body_width.is_finite() || body_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "body width must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self { body_width })
    }

    #[must_use]
    pub fn body_width(self) -> f64 {
        self.body_width
    }

    /// Wick offset from the bar's left edge.
    #[must_use]
    pub fn wick_offset(self) -> f64 {
        (self.body_width / 2.0).ceil()
    }

    /// Horizontal distance between consecutive bars' left edges.
    #[must_use]
    pub fn pitch(self) -> f64 {
        self.body_width + (self.body_width * 0.5).max(1.0)
    }

    /// Left edge of the `slot`-th bar counted from the right (0 = newest).
    #[must_use]
    pub fn bar_left(self, surface_width: f64, slot: usize) -> f64 {
        surface_width - self.pitch() * (slot as f64 + 1.0)
    }

    /// Number of bars that fit between `left_margin` and `surface_width`.
    #[must_use]
    pub fn capacity(self, surface_width: f64, left_margin: f64) -> usize {
        let room = surface_width - left_margin;
        if room < self.pitch() {
            return 0;
        }
        (room / self.pitch()).floor() as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandleDirection {
    /// Close at or above open.
    Up,
    Down,
}

impl CandleDirection {
    #[must_use]
    pub fn classify(open: f64, close: f64) -> Self {
        if close >= open { Self::Up } else { Self::Down }
    }
}

/// Pixel geometry of one laid-out candle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleGeometry {
    /// Row index in the series.
    pub index: usize,
    pub left: f64,
    pub wick_x: f64,
    pub wick_top: f64,
    pub wick_bottom: f64,
    pub body_top: f64,
    pub body_height: f64,
    pub body_width: f64,
    pub direction: CandleDirection,
}

/// Lays out candles newest-first until the plot area is full.
///
/// Every index down to 0 is eligible; the returned vector is ordered from
/// the rightmost bar to the leftmost.
pub fn layout_candles<S: OhlcSeries + ?Sized>(
    series: &S,
    mapper: &CoordinateMapper,
    layout: CandleLayout,
) -> ChartResult<Vec<CandleGeometry>> {
    let area = mapper.area();
    let len = series.len();
    let mut out = Vec::with_capacity(len.min(layout.capacity(area.width, area.left_margin)));

    for (slot, index) in (0..len).rev().enumerate() {
        let left = layout.bar_left(area.width, slot);
        if left < area.left_margin {
            break;
        }

        let open = checked(series.open(index), "open", index)?;
        let high = checked(series.high(index), "high", index)?;
        let low = checked(series.low(index), "low", index)?;
        let close = checked(series.close(index), "close", index)?;

        let body_top = mapper.map_y(open.max(close))?;
        let body_bottom = mapper.map_y(open.min(close))?;

        out.push(CandleGeometry {
            index,
            left,
            wick_x: left + layout.wick_offset(),
            wick_top: mapper.map_y(high)?,
            wick_bottom: mapper.map_y(low)?,
            body_top,
            body_height: body_bottom - body_top,
            body_width: layout.body_width(),
            direction: CandleDirection::classify(open, close),
        });
    }

    Ok(out)
}

fn checked(value: f64, field: &'static str, index: usize) -> ChartResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ChartError::NonFiniteValue { field, index })
    }
}
