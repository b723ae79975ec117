use approx::assert_abs_diff_eq;
use bar_chart::ChartError;
use bar_chart::api::{CandleStyle, CandlestickRenderer, PlotBinding, SeriesKind, SeriesRenderer};
use bar_chart::core::{
    AxisPadding, Bar, CandleDirection, CandleLayout, OhlcDataSeries, PlotArea, Viewport,
};
use bar_chart::render::{DrawCommand, RecordingContext};

fn bound(bars: Vec<Bar>, width: u32, height: u32) -> CandlestickRenderer<OhlcDataSeries<Bar>> {
    let mut renderer = CandlestickRenderer::new(OhlcDataSeries::from_rows(bars));
    renderer.bind(PlotBinding {
        area: PlotArea::new(Viewport::new(width, height), 50.0).expect("area"),
        padding: AxisPadding::default(),
    });
    renderer
}

fn two_bars() -> Vec<Bar> {
    vec![
        Bar::new(1.0, 10.0, 12.0, 9.0, 11.0),
        Bar::new(2.0, 11.0, 13.0, 10.0, 9.0),
    ]
}

#[test]
fn layout_pitch_and_wick_offset_follow_body_width() {
    let layout = CandleLayout::default();
    assert_eq!(layout.body_width(), 4.0);
    assert_eq!(layout.pitch(), 6.0);
    assert_eq!(layout.wick_offset(), 2.0);

    let narrow = CandleLayout::new(1.0).expect("layout");
    assert_eq!(narrow.pitch(), 2.0, "gap never drops below one pixel");
    assert_eq!(narrow.wick_offset(), 1.0);

    let odd = CandleLayout::new(5.0).expect("layout");
    assert_eq!(odd.pitch(), 7.5);
    assert_eq!(odd.wick_offset(), 3.0);

    assert!(CandleLayout::new(0.0).is_err());
    assert!(CandleLayout::new(f64::NAN).is_err());
}

#[test]
fn direction_treats_unchanged_close_as_up() {
    assert_eq!(CandleDirection::classify(10.0, 11.0), CandleDirection::Up);
    assert_eq!(CandleDirection::classify(10.0, 10.0), CandleDirection::Up);
    assert_eq!(CandleDirection::classify(10.0, 9.0), CandleDirection::Down);
}

#[test]
fn oldest_bar_is_drawn_and_newest_sits_at_right_edge() {
    let renderer = bound(two_bars(), 200, 100);

    let geometry = renderer.geometry().expect("geometry");
    assert_eq!(geometry.len(), 2);

    let newest = geometry[0];
    assert_eq!(newest.index, 1);
    assert_eq!(newest.left, 194.0);
    assert_eq!(newest.wick_x, 196.0);
    assert_eq!(newest.direction, CandleDirection::Down);
    assert_abs_diff_eq!(newest.wick_top, 100.0 - 4.4 * 100.0 / 4.8, epsilon = 1e-9);

    let oldest = geometry[1];
    assert_eq!(oldest.index, 0);
    assert_eq!(oldest.left, 188.0);
    assert_eq!(oldest.direction, CandleDirection::Up);
    assert_abs_diff_eq!(oldest.body_top, 50.0, epsilon = 1e-9);
    assert_abs_diff_eq!(oldest.body_height, 100.0 / 4.8, epsilon = 1e-9);
    assert_eq!(oldest.body_width, 4.0);
}

#[test]
fn bodies_are_filled_by_direction() {
    let renderer = bound(two_bars(), 200, 100);
    let mut context = RecordingContext::new();

    let report = renderer.paint(&mut context).expect("paint");
    assert_eq!(report.kind, SeriesKind::Candlestick);
    assert_eq!(report.items_drawn, 2);

    let style = CandleStyle::default();
    assert_eq!(
        context.fill_colors(),
        vec![style.down_fill_color, style.up_fill_color]
    );
}

#[test]
fn wick_is_stroked_before_body_in_its_own_color() {
    let renderer = bound(vec![Bar::new(1.0, 10.0, 12.0, 9.0, 11.0)], 200, 100);
    let mut context = RecordingContext::new();
    renderer.paint(&mut context).expect("paint");

    let style = CandleStyle::default();
    let commands = context.commands();
    assert_eq!(commands.len(), 3);

    let DrawCommand::StrokePath {
        subpaths,
        closed,
        color,
        ..
    } = &commands[0]
    else {
        panic!("expected the wick first");
    };
    assert!(*closed);
    assert_eq!(*color, style.wick_color);
    assert_ne!(style.wick_color, style.up_stroke_color);
    assert_ne!(style.wick_color, style.down_stroke_color);
    assert_eq!(subpaths[0].len(), 2);
    assert_eq!(subpaths[0][0].x, subpaths[0][1].x);

    assert!(matches!(
        commands[1],
        DrawCommand::FillRect { color, .. } if color == style.up_fill_color
    ));
    assert!(matches!(
        commands[2],
        DrawCommand::StrokeRect { color, .. } if color == style.up_stroke_color
    ));
}

#[test]
fn bars_that_do_not_fit_are_dropped_from_the_left() {
    let bars: Vec<Bar> = (0..100)
        .map(|i| {
            let base = 100.0 + f64::from(i);
            Bar::new(f64::from(i), base, base + 2.0, base - 2.0, base + 1.0)
        })
        .collect();
    let renderer = bound(bars, 110, 100);
    let mut context = RecordingContext::new();

    let report = renderer.paint(&mut context).expect("paint");
    assert_eq!(report.items_drawn, 10);

    let geometry = renderer.geometry().expect("geometry");
    let indices: Vec<usize> = geometry.iter().map(|candle| candle.index).collect();
    assert_eq!(indices, (90..100).rev().collect::<Vec<_>>());
    assert_eq!(geometry.last().map(|candle| candle.left), Some(50.0));
    assert!(geometry.iter().all(|candle| candle.left >= 50.0));
}

#[test]
fn custom_body_width_changes_pitch() {
    let mut renderer = CandlestickRenderer::new(OhlcDataSeries::from_rows(two_bars()))
        .with_style(CandleStyle {
            body_width_px: 10.0,
            ..CandleStyle::default()
        })
        .expect("style");
    renderer.bind(PlotBinding {
        area: PlotArea::new(Viewport::new(200, 100), 50.0).expect("area"),
        padding: AxisPadding::default(),
    });

    assert_eq!(renderer.layout().pitch(), 15.0);
    let lefts: Vec<f64> = renderer
        .geometry()
        .expect("geometry")
        .iter()
        .map(|candle| candle.left)
        .collect();
    assert_eq!(lefts, vec![185.0, 170.0]);
}

#[test]
fn empty_series_draws_nothing() {
    let renderer = bound(Vec::new(), 200, 100);
    let mut context = RecordingContext::new();

    let report = renderer.paint(&mut context).expect("paint");
    assert_eq!(report.items_drawn, 0);
    assert!(context.commands().is_empty());
}

#[test]
fn non_finite_price_is_reported() {
    let renderer = bound(
        vec![
            Bar::new(1.0, 10.0, 12.0, 9.0, 11.0),
            Bar::new(2.0, 11.0, f64::INFINITY, 10.0, 9.0),
        ],
        200,
        100,
    );
    let mut context = RecordingContext::new();

    let err = renderer.paint(&mut context).expect_err("inf high");
    assert!(matches!(
        err,
        ChartError::NonFiniteValue { field: "high", index: 1 }
    ));
}

#[test]
fn set_data_replaces_bars() {
    let mut renderer = bound(two_bars(), 200, 100);
    renderer.set_data(vec![Bar::new(5.0, 1.0, 2.0, 0.5, 1.5)]);

    let geometry = renderer.geometry().expect("geometry");
    assert_eq!(geometry.len(), 1);
    assert_eq!(geometry[0].index, 0);
    assert_eq!(geometry[0].left, 194.0);
}
