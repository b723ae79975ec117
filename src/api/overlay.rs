//! Interop with the secondary overlay graph.
//!
//! The overlay widget takes rows shaped `[x, close, sma]`, where `sma` is
//! `null` during the moving-average warm-up. The same averages can also be
//! drawn on a [`ChartSurface`](super::ChartSurface) as their own line series.

use serde::{Deserialize, Serialize};

use crate::core::{DataPoint, DataSeries, Series};
use crate::error::{ChartError, ChartResult};

/// `[x, close, sma]` row; serializes as a JSON array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayRow(pub f64, pub f64, pub Option<f64>);

fn check_lengths(series_len: usize, averages_len: usize) -> ChartResult<()> {
    if series_len != averages_len {
        return Err(ChartError::InvalidData(format!(
            "moving average length {averages_len} does not match series length {series_len}"
        )));
    }
    Ok(())
}

/// Zips a series' X/Y with per-index averages.
///
/// For bar series Y is the close, which gives the widget's expected shape.
pub fn overlay_rows<S: Series + ?Sized>(
    series: &S,
    averages: &[Option<f64>],
) -> ChartResult<Vec<OverlayRow>> {
    check_lengths(series.len(), averages.len())?;
    Ok(averages
        .iter()
        .enumerate()
        .map(|(index, average)| OverlayRow(series.x(index), series.y(index), *average))
        .collect())
}

/// Builds a line series of the defined averages, placed at the source X.
pub fn moving_average_series<S: Series + ?Sized>(
    source: &S,
    averages: &[Option<f64>],
) -> ChartResult<DataSeries<DataPoint>> {
    check_lengths(source.len(), averages.len())?;
    let points: Vec<DataPoint> = averages
        .iter()
        .enumerate()
        .filter_map(|(index, average)| average.map(|value| DataPoint::new(source.x(index), value)))
        .collect();
    Ok(DataSeries::from_rows(points))
}

/// Overlay rows as a JSON array of arrays.
pub fn overlay_rows_to_json(rows: &[OverlayRow]) -> ChartResult<String> {
    serde_json::to_string(rows)
        .map_err(|e| ChartError::InvalidData(format!("failed to serialize overlay rows: {e}")))
}
