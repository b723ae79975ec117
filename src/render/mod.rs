mod primitives;
mod recording;

pub use primitives::{Color, Rect};
pub use recording::{DrawCommand, RecordingContext};

use crate::error::ChartResult;

/// Minimal immediate-mode 2D drawing contract, modelled on the HTML canvas.
///
/// Renderers drive it directly; any backend that can clear, build a path,
/// stroke it and fill/stroke rectangles can host a chart. Path building never
/// fails; errors surface when a path or rectangle is committed.
pub trait DrawingContext {
    /// Resets a rectangle to the backend's blank state.
    fn clear_rect(&mut self, rect: Rect) -> ChartResult<()>;

    fn begin_path(&mut self);

    fn close_path(&mut self);

    fn move_to(&mut self, x: f64, y: f64);

    /// Extends the current subpath; starts one if there is none.
    fn line_to(&mut self, x: f64, y: f64);

    /// Strokes the current path with the stroke color and line width.
    fn stroke(&mut self) -> ChartResult<()>;

    fn fill_rect(&mut self, rect: Rect) -> ChartResult<()>;

    fn stroke_rect(&mut self, rect: Rect) -> ChartResult<()>;

    fn set_fill_color(&mut self, color: Color);

    fn set_stroke_color(&mut self, color: Color);

    fn set_line_width(&mut self, width: f64);
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::CairoCanvas;
