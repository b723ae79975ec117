use crate::core::PixelPoint;
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, DrawingContext, Rect};

/// One committed drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    ClearRect(Rect),
    StrokePath {
        subpaths: Vec<Vec<PixelPoint>>,
        closed: bool,
        color: Color,
        line_width: f64,
    },
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        color: Color,
        line_width: f64,
    },
}

/// Headless drawing context that records committed operations.
///
/// Used by tests and by callers that want the draw list instead of pixels.
/// Non-finite geometry is rejected at commit time.
#[derive(Debug, Clone)]
pub struct RecordingContext {
    commands: Vec<DrawCommand>,
    subpaths: Vec<Vec<PixelPoint>>,
    closed: bool,
    fill_color: Color,
    stroke_color: Color,
    line_width: f64,
}

impl Default for RecordingContext {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            subpaths: Vec::new(),
            closed: false,
            fill_color: Color::BLACK,
            stroke_color: Color::BLACK,
            line_width: 1.0,
        }
    }
}

impl RecordingContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drops recorded commands; pen state is kept.
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    #[must_use]
    pub fn stroke_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::StrokePath { .. }))
            .count()
    }

    /// Fill colors of every `fill_rect`, in call order.
    #[must_use]
    pub fn fill_colors(&self) -> Vec<Color> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::FillRect { color, .. } => Some(*color),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn filled_rects(&self) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::FillRect { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect()
    }

    fn current_subpath(&mut self) -> &mut Vec<PixelPoint> {
        if self.subpaths.is_empty() {
            self.subpaths.push(Vec::new());
        }
        let last = self.subpaths.len() - 1;
        &mut self.subpaths[last]
    }
}

impl DrawingContext for RecordingContext {
    fn clear_rect(&mut self, rect: Rect) -> ChartResult<()> {
        rect.validate()?;
        self.commands.push(DrawCommand::ClearRect(rect));
        Ok(())
    }

    fn begin_path(&mut self) {
        self.subpaths.clear();
        self.closed = false;
    }

    fn close_path(&mut self) {
        self.closed = true;
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.subpaths.push(vec![PixelPoint::new(x, y)]);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.current_subpath().push(PixelPoint::new(x, y));
    }

    fn stroke(&mut self) -> ChartResult<()> {
        if self
            .subpaths
            .iter()
            .flatten()
            .any(|point| !point.x.is_finite() || !point.y.is_finite())
        {
            return Err(ChartError::InvalidData(
                "path coordinates must be finite".to_owned(),
            ));
        }
        self.stroke_color.validate()?;
        self.commands.push(DrawCommand::StrokePath {
            subpaths: self.subpaths.clone(),
            closed: self.closed,
            color: self.stroke_color,
            line_width: self.line_width,
        });
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect) -> ChartResult<()> {
        rect.validate()?;
        self.fill_color.validate()?;
        self.commands.push(DrawCommand::FillRect {
            rect,
            color: self.fill_color,
        });
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect) -> ChartResult<()> {
        rect.validate()?;
        self.stroke_color.validate()?;
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            color: self.stroke_color,
            line_width: self.line_width,
        });
        Ok(())
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }
}
