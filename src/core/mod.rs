pub mod candlestick;
pub mod line_series;
pub mod mapper;
pub mod moving_average;
pub mod scale;
pub mod series;
pub mod types;

pub use candlestick::{CandleDirection, CandleGeometry, CandleLayout, layout_candles};
pub use line_series::project_polyline;
pub use mapper::{
    AxisPadding, CoordinateMapper, PlotArea, ohlc_value_range, time_range, value_range,
};
pub use moving_average::MovingAverage;
pub use scale::{LinearScale, ValueRange};
pub use series::{
    DataSeries, DefaultLineAccessors, DefaultOhlcAccessors, LengthFn, LineAccessors,
    LineSeriesOptions, OhlcAccessors, OhlcDataSeries, OhlcSeries, OhlcSeriesOptions, Series,
    ValueFn,
};
pub use types::{Bar, DataPoint, PixelPoint, Viewport};
