mod candlestick_renderer;
mod line_renderer;
mod overlay;
mod render_style;
mod series_renderer;
mod surface;

pub use candlestick_renderer::CandlestickRenderer;
pub use line_renderer::LineRenderer;
pub use overlay::{OverlayRow, moving_average_series, overlay_rows, overlay_rows_to_json};
pub use render_style::{CandleStyle, LineStyle};
pub use series_renderer::{PaintReport, PlotBinding, SeriesKind, SeriesRenderer};
pub use surface::{ChartSurface, RedrawReport, SeriesHandle, SurfaceConfig};
