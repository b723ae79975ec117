use crate::core::{CoordinateMapper, PixelPoint, Series};
use crate::error::{ChartError, ChartResult};

/// Maps every point of `series` in ascending index order.
///
/// The result feeds a single connected polyline. It is returned even for one
/// point; whether that gets stroked is the renderer's call.
pub fn project_polyline<S: Series + ?Sized>(
    series: &S,
    mapper: &CoordinateMapper,
) -> ChartResult<Vec<PixelPoint>> {
    let len = series.len();
    let mut points = Vec::with_capacity(len);
    for index in 0..len {
        let x = series.x(index);
        if !x.is_finite() {
            return Err(ChartError::NonFiniteValue { field: "x", index });
        }
        let y = series.y(index);
        if !y.is_finite() {
            return Err(ChartError::NonFiniteValue { field: "y", index });
        }
        points.push(mapper.map_point(x, y)?);
    }
    Ok(points)
}
