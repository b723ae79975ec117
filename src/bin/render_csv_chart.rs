//! Renders a CSV bar export to PNG: a candlestick chart with its moving
//! average overlaid, and a close-price line chart.
//!
//! ```text
//! render_csv_chart <bars.csv> [--out PREFIX] [--width PX] [--height PX]
//!                  [--window N] [--keep-last N] [--overlay-json PATH]
//! ```

#[cfg(feature = "cairo-backend")]
use std::path::PathBuf;

#[cfg(feature = "cairo-backend")]
const DEFAULT_WIDTH: u32 = 1000;
#[cfg(feature = "cairo-backend")]
const DEFAULT_HEIGHT: u32 = 150;
#[cfg(feature = "cairo-backend")]
const DEFAULT_WINDOW: usize = 20;
#[cfg(feature = "cairo-backend")]
const DEFAULT_KEEP_LAST: usize = 198;

#[cfg(feature = "cairo-backend")]
#[derive(Debug)]
struct CliArgs {
    csv_path: PathBuf,
    out_prefix: PathBuf,
    width: u32,
    height: u32,
    window: usize,
    keep_last: usize,
    overlay_json: Option<PathBuf>,
}

#[cfg(feature = "cairo-backend")]
fn main() {
    let _ = bar_chart::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cairo-backend"))]
fn main() {
    eprintln!("this tool requires feature `cairo-backend`");
    std::process::exit(1);
}

#[cfg(feature = "cairo-backend")]
fn run() -> Result<(), String> {
    use std::fs::{self, File};
    use std::sync::Arc;

    use bar_chart::api::{
        CandlestickRenderer, ChartSurface, LineRenderer, LineStyle, SurfaceConfig,
        moving_average_series, overlay_rows, overlay_rows_to_json,
    };
    use bar_chart::core::{Bar, DataSeries, MovingAverage, OhlcDataSeries, Viewport};
    use bar_chart::feed::{CsvBarOptions, read_bars_from_path};
    use bar_chart::render::{CairoCanvas, Color};

    let args = parse_args()?;
    let bars: Arc<[Bar]> = read_bars_from_path(
        &args.csv_path,
        CsvBarOptions::default().keep_last(args.keep_last),
    )
    .map_err(|err| format!("failed to read `{}`: {err}", args.csv_path.display()))?
    .into();

    let config = SurfaceConfig::new(Viewport::new(args.width, args.height));
    let candles = OhlcDataSeries::from_rows(Arc::clone(&bars));
    let averages = MovingAverage::new(args.window)
        .and_then(|sma| sma.compute_closes(&candles))
        .map_err(|err| err.to_string())?;
    let overlay = moving_average_series(&candles, &averages).map_err(|err| err.to_string())?;

    let canvas = new_canvas(args.width, args.height)?;
    let mut candle_chart = ChartSurface::new(canvas, config).map_err(|err| err.to_string())?;
    candle_chart.add_series(CandlestickRenderer::new(candles.clone()));
    candle_chart.add_series(
        LineRenderer::new(overlay)
            .with_style(LineStyle {
                color: Color::rgb8(0, 0, 192),
                ..LineStyle::default()
            })
            .map_err(|err| err.to_string())?,
    );
    let report = candle_chart.redraw().map_err(|err| err.to_string())?;
    eprintln!("candles: {} items drawn", report.total_items());
    write_png(candle_chart.context(), &args.out_prefix, "candles")?;

    let canvas = new_canvas(args.width, args.height)?;
    let mut line_chart = ChartSurface::new(canvas, config).map_err(|err| err.to_string())?;
    line_chart.add_series(LineRenderer::new(DataSeries::from_rows(Arc::clone(&bars))));
    line_chart.redraw().map_err(|err| err.to_string())?;
    write_png(line_chart.context(), &args.out_prefix, "lines")?;

    if let Some(path) = args.overlay_json {
        let rows = overlay_rows(&candles, &averages).map_err(|err| err.to_string())?;
        let json = overlay_rows_to_json(&rows).map_err(|err| err.to_string())?;
        fs::write(&path, json)
            .map_err(|err| format!("failed to write `{}`: {err}", path.display()))?;
    }

    fn new_canvas(width: u32, height: u32) -> Result<CairoCanvas, String> {
        let width = i32::try_from(width).map_err(|_| "width too large".to_owned())?;
        let height = i32::try_from(height).map_err(|_| "height too large".to_owned())?;
        CairoCanvas::offscreen(width, height)
            .map(|canvas| canvas.with_background(Color::WHITE))
            .map_err(|err| err.to_string())
    }

    fn write_png(
        canvas: &CairoCanvas,
        prefix: &std::path::Path,
        suffix: &str,
    ) -> Result<(), String> {
        let path = PathBuf::from(format!("{}-{suffix}.png", prefix.display()));
        let mut file = File::create(&path)
            .map_err(|err| format!("failed to create `{}`: {err}", path.display()))?;
        canvas.write_png(&mut file).map_err(|err| err.to_string())?;
        eprintln!("wrote {}", path.display());
        Ok(())
    }

    Ok(())
}

#[cfg(feature = "cairo-backend")]
fn parse_args() -> Result<CliArgs, String> {
    let mut csv_path: Option<PathBuf> = None;
    let mut out_prefix = PathBuf::from("chart");
    let mut width = DEFAULT_WIDTH;
    let mut height = DEFAULT_HEIGHT;
    let mut window = DEFAULT_WINDOW;
    let mut keep_last = DEFAULT_KEEP_LAST;
    let mut overlay_json = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = |flag: &str| {
            args.next()
                .ok_or_else(|| format!("missing value for {flag}"))
        };
        match arg.as_str() {
            "--out" => out_prefix = PathBuf::from(value("--out")?),
            "--width" => width = parse_number(&value("--width")?, "--width")?,
            "--height" => height = parse_number(&value("--height")?, "--height")?,
            "--window" => window = parse_number(&value("--window")?, "--window")?,
            "--keep-last" => keep_last = parse_number(&value("--keep-last")?, "--keep-last")?,
            "--overlay-json" => overlay_json = Some(PathBuf::from(value("--overlay-json")?)),
            other if other.starts_with("--") => return Err(format!("unknown flag: {other}")),
            other => csv_path = Some(PathBuf::from(other)),
        }
    }

    Ok(CliArgs {
        csv_path: csv_path.ok_or_else(|| "missing csv path".to_owned())?,
        out_prefix,
        width,
        height,
        window,
        keep_last,
        overlay_json,
    })
}

#[cfg(feature = "cairo-backend")]
fn parse_number<T: std::str::FromStr>(raw: &str, flag: &str) -> Result<T, String> {
    raw.parse()
        .map_err(|_| format!("invalid value for {flag}: `{raw}`"))
}
