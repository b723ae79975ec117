#![cfg(feature = "cairo-backend")]

use bar_chart::api::{CandlestickRenderer, LineRenderer, SurfaceConfig};
use bar_chart::core::{Bar, DataSeries, OhlcDataSeries, Viewport};
use bar_chart::render::{CairoCanvas, Color};
use bar_chart::{ChartError, ChartSurface};
use cairo::{Context, Format, ImageSurface};

fn bars() -> Vec<Bar> {
    vec![
        Bar::new(1.0, 10.0, 12.0, 9.0, 11.0),
        Bar::new(2.0, 11.0, 13.0, 10.0, 9.0),
        Bar::new(3.0, 9.0, 10.0, 8.0, 9.5),
    ]
}

#[test]
fn cairo_canvas_rejects_invalid_surface_size() {
    let err = CairoCanvas::offscreen(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn cairo_canvas_renders_candles_and_line_to_png() {
    let canvas = CairoCanvas::offscreen(400, 150)
        .expect("canvas")
        .with_background(Color::WHITE);
    assert_eq!(canvas.backend_name(), "cairo");

    let mut chart =
        ChartSurface::new(canvas, SurfaceConfig::new(Viewport::new(400, 150))).expect("surface");
    chart.add_series(CandlestickRenderer::new(OhlcDataSeries::from_rows(bars())));
    chart.add_series(LineRenderer::new(DataSeries::from_rows(bars())));

    let report = chart.redraw().expect("redraw");
    assert_eq!(report.total_items(), 6);

    let mut png = Vec::new();
    chart.context().write_png(&mut png).expect("png");
    assert!(png.starts_with(b"\x89PNG"));
}

#[test]
fn cairo_canvas_can_draw_on_external_context() {
    let surface = ImageSurface::create(Format::ARgb32, 300, 120).expect("surface");
    let context = Context::new(&surface).expect("context");

    let mut chart = ChartSurface::new(
        CairoCanvas::on_context(context),
        SurfaceConfig::new(Viewport::new(300, 120)),
    )
    .expect("surface");
    chart.add_series(LineRenderer::new(DataSeries::from_rows(vec![1.0, 3.0, 2.0])));
    chart.redraw().expect("redraw");

    let canvas = chart.into_context();
    assert!(canvas.surface().is_none());
    assert!(matches!(
        canvas.write_png(&mut Vec::new()),
        Err(ChartError::Backend(_))
    ));
}
