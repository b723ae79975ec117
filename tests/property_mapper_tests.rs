use bar_chart::core::{
    AxisPadding, Bar, CoordinateMapper, DataPoint, DataSeries, OhlcDataSeries, PlotArea, Viewport,
};
use proptest::prelude::*;

fn area() -> PlotArea {
    PlotArea::new(Viewport::new(1200, 600), 50.0).expect("valid area")
}

proptest! {
    #[test]
    fn padded_value_range_contains_every_y(
        values in prop::collection::vec(-1_000_000.0f64..1_000_000.0, 2..120)
    ) {
        let series = DataSeries::from_rows(values.clone());
        let mapper = CoordinateMapper::for_series(&series, area(), AxisPadding::default())
            .expect("mapper")
            .expect("non-empty");

        let range = mapper.y_range();
        for value in values {
            prop_assert!(range.contains(value));
        }
    }

    #[test]
    fn padded_value_range_contains_every_high_and_low(
        raw in prop::collection::vec((-1_000.0f64..1_000.0, 0.0f64..50.0, 0.0f64..1.0, 0.0f64..1.0), 2..80)
    ) {
        let bars: Vec<Bar> = raw
            .iter()
            .enumerate()
            .map(|(i, (low, span, open_f, close_f))| {
                let high = low + span;
                Bar::new(i as f64, low + span * open_f, high, *low, low + span * close_f)
            })
            .collect();
        let series = OhlcDataSeries::from_rows(bars.clone());
        let mapper = CoordinateMapper::for_ohlc(&series, area(), AxisPadding::default())
            .expect("mapper")
            .expect("non-empty");

        let range = mapper.y_range();
        for bar in bars {
            prop_assert!(range.contains(bar.low));
            prop_assert!(range.contains(bar.high));
        }
    }

    #[test]
    fn increasing_x_maps_to_non_decreasing_pixels(
        start in -1_000_000.0f64..1_000_000.0,
        steps in prop::collection::vec(0.001f64..1_000.0, 1..150),
        y in -100.0f64..100.0
    ) {
        let mut x = start;
        let mut points = vec![DataPoint::new(x, y)];
        for step in steps {
            x += step;
            points.push(DataPoint::new(x, y));
        }
        let series = DataSeries::from_rows(points.clone());
        let mapper = CoordinateMapper::for_series(&series, area(), AxisPadding::default())
            .expect("mapper")
            .expect("non-empty");

        let mut previous = f64::NEG_INFINITY;
        for point in points {
            let pixel = mapper.map_x(point.x).expect("map");
            prop_assert!(pixel.is_finite());
            prop_assert!(pixel >= previous);
            previous = pixel;
        }
    }
}
