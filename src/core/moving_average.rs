use tracing::trace;

use crate::core::{OhlcSeries, Series};
use crate::error::{ChartError, ChartResult};

/// Simple moving average with a fixed trailing window.
///
/// Output has one slot per input index. The first `window` slots are `None`
/// (warm-up). Slot `i >= window` holds the mean of the `window` values at
/// indices `[i - window, i)`, so the newest value is never read. A window at
/// least as long as the input leaves every slot `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovingAverage {
    window: usize,
}

impl MovingAverage {
    pub fn new(window: usize) -> ChartResult<Self> {
        if window == 0 {
            return Err(ChartError::InvalidWindow { window });
        }
        Ok(Self { window })
    }

    #[must_use]
    pub fn window(self) -> usize {
        self.window
    }

    /// Averages the series' Y accessor.
    pub fn compute<S: Series + ?Sized>(self, series: &S) -> ChartResult<Vec<Option<f64>>> {
        self.rolling_mean(series.len(), "y", |i| series.y(i))
    }

    /// Averages the close accessor of an OHLC series.
    pub fn compute_closes<S: OhlcSeries + ?Sized>(
        self,
        series: &S,
    ) -> ChartResult<Vec<Option<f64>>> {
        self.rolling_mean(series.len(), "close", |i| series.close(i))
    }

    pub fn compute_values(self, values: &[f64]) -> ChartResult<Vec<Option<f64>>> {
        self.rolling_mean(values.len(), "value", |i| values[i])
    }

    fn rolling_mean(
        self,
        len: usize,
        field: &'static str,
        value_at: impl Fn(usize) -> f64,
    ) -> ChartResult<Vec<Option<f64>>> {
        let mut out = vec![None; len];
        if self.window >= len {
            trace!(window = self.window, len, "window covers the whole series");
            return Ok(out);
        }

        // The newest value never feeds a slot, so it is not read.
        let values = (0..len - 1)
            .map(|index| {
                let v = value_at(index);
                if v.is_finite() {
                    Ok(v)
                } else {
                    Err(ChartError::NonFiniteValue { field, index })
                }
            })
            .collect::<ChartResult<Vec<f64>>>()?;

        let divisor = self.window as f64;
        let mut sum: f64 = values[..self.window].iter().sum();
        for index in self.window..len {
            out[index] = Some(sum / divisor);
            if let Some(next) = values.get(index) {
                sum += next - values[index - self.window];
            }
        }

        Ok(out)
    }
}
