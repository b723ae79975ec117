use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Colors and widths used by the candlestick renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandleStyle {
    pub body_width_px: f64,
    pub up_fill_color: Color,
    pub up_stroke_color: Color,
    pub down_fill_color: Color,
    pub down_stroke_color: Color,
    /// Wick stroke; kept distinct from either body stroke.
    pub wick_color: Color,
    pub line_width_px: f64,
}

impl Default for CandleStyle {
    fn default() -> Self {
        Self {
            body_width_px: 4.0,
            up_fill_color: Color::rgb8(127, 255, 127),
            up_stroke_color: Color::rgb8(0, 127, 0),
            down_fill_color: Color::rgb8(255, 127, 127),
            down_stroke_color: Color::rgb8(127, 0, 0),
            wick_color: Color::rgb8(80, 80, 80),
            line_width_px: 1.0,
        }
    }
}

impl CandleStyle {
    pub fn validate(self) -> ChartResult<Self> {
        for color in [
            self.up_fill_color,
            self.up_stroke_color,
            self.down_fill_color,
            self.down_stroke_color,
            self.wick_color,
        ] {
            color.validate()?;
        }
        validate_width(self.body_width_px, "candle body width")?;
        validate_width(self.line_width_px, "candle line width")?;
        Ok(self)
    }
}

/// Stroke used by the line renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineStyle {
    pub color: Color,
    pub line_width_px: f64,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            line_width_px: 1.0,
        }
    }
}

impl LineStyle {
    pub fn validate(self) -> ChartResult<Self> {
        self.color.validate()?;
        validate_width(self.line_width_px, "line width")?;
        Ok(self)
    }
}

fn validate_width(value: f64, what: &str) -> ChartResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ChartError::InvalidData(format!(
            "{what} must be finite and > 0"
        )));
    }
    Ok(())
}
