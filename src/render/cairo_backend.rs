use std::io::Write;

use cairo::{Context, Format, ImageSurface, Operator};

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, DrawingContext, Rect};

/// [`DrawingContext`] over a cairo context.
///
/// Cairo keeps a single source color, so fill and stroke colors are tracked
/// here and applied right before each fill/stroke. Canvas rectangle calls do
/// not touch the path under construction; the pending path is saved and
/// restored around them.
#[derive(Debug)]
pub struct CairoCanvas {
    surface: Option<ImageSurface>,
    context: Context,
    fill_color: Color,
    stroke_color: Color,
    line_width: f64,
    background: Option<Color>,
}

impl CairoCanvas {
    /// Creates an offscreen ARGB32 canvas.
    pub fn offscreen(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        let context = Context::new(&surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        let mut canvas = Self::on_context(context);
        canvas.surface = Some(surface);
        Ok(canvas)
    }

    /// Wraps an external context, e.g. from a GTK draw callback.
    #[must_use]
    pub fn on_context(context: Context) -> Self {
        Self {
            surface: None,
            context,
            fill_color: Color::BLACK,
            stroke_color: Color::BLACK,
            line_width: 1.0,
            background: None,
        }
    }

    /// Paint cleared rectangles with `color` instead of leaving them
    /// transparent.
    #[must_use]
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo"
    }

    #[must_use]
    pub fn context(&self) -> &Context {
        &self.context
    }

    #[must_use]
    pub fn surface(&self) -> Option<&ImageSurface> {
        self.surface.as_ref()
    }

    /// Encodes the offscreen surface as PNG.
    pub fn write_png<W: Write>(&self, writer: &mut W) -> ChartResult<()> {
        let surface = self.surface.as_ref().ok_or_else(|| {
            ChartError::Backend("canvas wraps an external context; no surface to encode".to_owned())
        })?;
        surface.flush();
        surface
            .write_to_png(writer)
            .map_err(|err| ChartError::Backend(format!("failed to encode png: {err}")))
    }

    fn with_pending_path_preserved(
        &mut self,
        draw: impl FnOnce(&Context) -> Result<(), cairo::Error>,
        what: &str,
    ) -> ChartResult<()> {
        let pending = self
            .context
            .copy_path()
            .map_err(|err| map_backend_error("failed to copy path", err))?;
        self.context.new_path();
        let result = draw(&self.context);
        self.context.new_path();
        self.context.append_path(&pending);
        result.map_err(|err| map_backend_error(what, err))
    }
}

impl DrawingContext for CairoCanvas {
    fn clear_rect(&mut self, rect: Rect) -> ChartResult<()> {
        rect.validate()?;
        let background = self.background;
        self.with_pending_path_preserved(
            |context| {
                context.save()?;
                match background {
                    Some(color) => apply_color(context, color),
                    None => context.set_operator(Operator::Clear),
                }
                context.rectangle(rect.x, rect.y, rect.width, rect.height);
                context.fill()?;
                context.restore()
            },
            "failed to clear rectangle",
        )
    }

    fn begin_path(&mut self) {
        self.context.new_path();
    }

    fn close_path(&mut self) {
        self.context.close_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.context.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        if self.context.has_current_point().unwrap_or(false) {
            self.context.line_to(x, y);
        } else {
            self.context.move_to(x, y);
        }
    }

    fn stroke(&mut self) -> ChartResult<()> {
        self.stroke_color.validate()?;
        apply_color(&self.context, self.stroke_color);
        self.context.set_line_width(self.line_width);
        self.context
            .stroke_preserve()
            .map_err(|err| map_backend_error("failed to stroke path", err))
    }

    fn fill_rect(&mut self, rect: Rect) -> ChartResult<()> {
        rect.validate()?;
        self.fill_color.validate()?;
        let color = self.fill_color;
        self.with_pending_path_preserved(
            |context| {
                apply_color(context, color);
                context.rectangle(rect.x, rect.y, rect.width, rect.height);
                context.fill()
            },
            "failed to fill rectangle",
        )
    }

    fn stroke_rect(&mut self, rect: Rect) -> ChartResult<()> {
        rect.validate()?;
        self.stroke_color.validate()?;
        let (color, line_width) = (self.stroke_color, self.line_width);
        self.with_pending_path_preserved(
            |context| {
                apply_color(context, color);
                context.set_line_width(line_width);
                context.rectangle(rect.x, rect.y, rect.width, rect.height);
                context.stroke()
            },
            "failed to stroke rectangle",
        )
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

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Backend(format!("{prefix}: {err}"))
}
