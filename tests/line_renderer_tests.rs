use approx::assert_abs_diff_eq;
use bar_chart::ChartError;
use bar_chart::api::{LineRenderer, LineStyle, PlotBinding, SeriesKind, SeriesRenderer};
use bar_chart::core::{AxisPadding, DataPoint, DataSeries, LineSeriesOptions, PlotArea, Viewport};
use bar_chart::render::{Color, DrawCommand, RecordingContext};

fn bound<R: 'static>(series: DataSeries<R>) -> LineRenderer<DataSeries<R>> {
    let mut renderer = LineRenderer::new(series);
    renderer.bind(PlotBinding {
        area: PlotArea::new(Viewport::new(150, 100), 50.0).expect("area"),
        padding: AxisPadding::default(),
    });
    renderer
}

#[test]
fn empty_series_draws_nothing() {
    let renderer = bound(DataSeries::<f64>::from_rows(Vec::new()));
    let mut context = RecordingContext::new();

    let report = renderer.paint(&mut context).expect("paint");
    assert_eq!(report.kind, SeriesKind::Line);
    assert_eq!(report.items_drawn, 0);
    assert!(context.commands().is_empty());
}

#[test]
fn single_point_draws_nothing_and_does_not_fail() {
    let renderer = bound(DataSeries::from_rows(vec![42.0]));
    let mut context = RecordingContext::new();

    let report = renderer.paint(&mut context).expect("paint");
    assert_eq!(report.items_drawn, 0);
    assert_eq!(context.stroke_count(), 0);
}

#[test]
fn polyline_visits_points_in_index_order() {
    let renderer = bound(DataSeries::from_rows(vec![1.0, 2.0, 3.0, 4.0, 5.0]));
    let mut context = RecordingContext::new();

    let report = renderer.paint(&mut context).expect("paint");
    assert_eq!(report.items_drawn, 5);
    assert_eq!(context.stroke_count(), 1);

    let DrawCommand::StrokePath {
        subpaths,
        closed,
        color,
        line_width,
    } = &context.commands()[0]
    else {
        panic!("expected a stroked path");
    };
    assert!(!closed);
    assert_eq!(*color, Color::BLACK);
    assert_eq!(*line_width, 1.0);
    assert_eq!(subpaths.len(), 1);

    let path = &subpaths[0];
    assert_eq!(path.len(), 5);
    for pair in path.windows(2) {
        assert!(pair[0].x < pair[1].x);
        assert!(pair[0].y > pair[1].y, "rising values move up the surface");
    }
    assert_abs_diff_eq!(path[2].y, 50.0, epsilon = 1e-9);
}

#[test]
fn custom_style_is_applied_to_stroke() {
    let style = LineStyle {
        color: Color::rgb8(0, 0, 192),
        line_width_px: 2.5,
    };
    let mut renderer = LineRenderer::new(DataSeries::from_rows(vec![1.0, 3.0]))
        .with_style(style)
        .expect("style");
    renderer.bind(PlotBinding {
        area: PlotArea::new(Viewport::new(150, 100), 50.0).expect("area"),
        padding: AxisPadding::default(),
    });
    let mut context = RecordingContext::new();
    renderer.paint(&mut context).expect("paint");

    assert!(matches!(
        context.commands(),
        [DrawCommand::StrokePath { color, line_width, .. }]
            if *color == style.color && *line_width == 2.5
    ));
}

#[test]
fn invalid_style_is_rejected() {
    let style = LineStyle {
        color: Color::BLACK,
        line_width_px: 0.0,
    };
    assert!(LineRenderer::new(DataSeries::from_rows(vec![1.0])).with_style(style).is_err());
}

#[test]
fn painting_unbound_renderer_fails() {
    let renderer = LineRenderer::new(DataSeries::from_rows(vec![1.0, 2.0]));
    let mut context = RecordingContext::new();

    let err = renderer.paint(&mut context).expect_err("unbound");
    assert!(matches!(err, ChartError::InvalidData(_)));
    assert!(renderer.mapper().expect("mapper").is_none());
}

#[test]
fn non_finite_accessor_output_is_propagated() {
    let mut series = DataSeries::new(
        LineSeriesOptions::new()
            .with_y(|_rows: &[DataPoint], _index: usize| f64::NAN),
    );
    series.set_data(vec![DataPoint::new(0.0, 1.0), DataPoint::new(1.0, 2.0)]);
    let renderer = bound(series);
    let mut context = RecordingContext::new();

    let err = renderer.paint(&mut context).expect_err("nan");
    assert!(matches!(
        err,
        ChartError::NonFiniteValue { field: "y", index: 0 }
    ));
    assert_eq!(context.stroke_count(), 0);
}

#[test]
fn set_data_replaces_rows_for_next_paint() {
    let mut renderer = bound(DataSeries::from_rows(vec![1.0]));
    let mut context = RecordingContext::new();
    assert_eq!(renderer.paint(&mut context).expect("paint").items_drawn, 0);

    renderer.set_data(vec![1.0, 2.0, 3.0]);
    assert_eq!(renderer.paint(&mut context).expect("paint").items_drawn, 3);
}
