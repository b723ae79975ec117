use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Closed numeric interval over one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub low: f64,
    pub high: f64,
}

impl ValueRange {
    #[must_use]
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.high - self.low
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }

    /// Widens the range to cover `value`.
    #[must_use]
    pub fn including(self, value: f64) -> Self {
        Self::new(self.low.min(value), self.high.max(value))
    }

    /// Extends both ends by `fraction` of the span. A zero span stays zero.
    #[must_use]
    pub fn padded(self, fraction: f64) -> Self {
        let pad = self.span() * fraction;
        Self::new(self.low - pad, self.high + pad)
    }

    /// Replaces a zero span with a unit span centered on the value.
    #[must_use]
    pub fn non_degenerate(self) -> Self {
        if self.span() == 0.0 {
            Self::new(self.low - 0.5, self.high + 0.5)
        } else {
            self
        }
    }
}

/// Affine map from a data domain onto a pixel interval.
///
/// `pixel_start` corresponds to the domain start. Passing a pixel interval in
/// decreasing order flips the axis, which is how value axes grow upward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    pixel_start: f64,
    pixel_end: f64,
}

impl LinearScale {
    pub fn new(domain: ValueRange, pixel_start: f64, pixel_end: f64) -> ChartResult<Self> {
        if !domain.low.is_finite() || !domain.high.is_finite() || domain.span() == 0.0 {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !pixel_start.is_finite() || !pixel_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale pixel range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start: domain.low,
            domain_end: domain.high,
            pixel_start,
            pixel_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> ValueRange {
        ValueRange::new(self.domain_start, self.domain_end)
    }

    /// Pixels per domain unit; negative for a flipped axis.
    #[must_use]
    pub fn pixels_per_unit(self) -> f64 {
        (self.pixel_end - self.pixel_start) / (self.domain_end - self.domain_start)
    }

    pub fn domain_to_pixel(self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        Ok(self.pixel_start + (value - self.domain_start) * self.pixels_per_unit())
    }

    pub fn pixel_to_domain(self, pixel: f64) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        Ok(self.domain_start + (pixel - self.pixel_start) / self.pixels_per_unit())
    }
}
