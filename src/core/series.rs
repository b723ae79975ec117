//! Accessor-based series over caller-owned rows.
//!
//! A series never assumes a row layout. It keeps a shared handle to the rows
//! plus a set of accessor closures that pull numbers out of `(rows, index)`.
//! Rows are held behind `Arc<[R]>` so one bar sequence can back several series
//! (for example a candlestick series and the line feeding a moving average).
//!
//! Accessors are not checked ahead of time. A row that lacks a usable field
//! should yield `NaN`; the mapping layer reports it as
//! [`ChartError::NonFiniteValue`](crate::error::ChartError::NonFiniteValue)
//! at the point of use.

use std::fmt;
use std::sync::Arc;

use crate::core::{Bar, DataPoint};

/// `rows -> number of addressable rows`.
pub type LengthFn<R> = Arc<dyn Fn(&[R]) -> usize + Send + Sync>;

/// `(rows, index) -> value`.
pub type ValueFn<R> = Arc<dyn Fn(&[R], usize) -> f64 + Send + Sync>;

/// Read-only X/Y view used by line rendering, range scanning and the moving
/// average.
pub trait Series {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn x(&self, index: usize) -> f64;

    fn y(&self, index: usize) -> f64;
}

/// Series that additionally exposes open/high/low/close per index.
pub trait OhlcSeries: Series {
    fn open(&self, index: usize) -> f64;
    fn high(&self, index: usize) -> f64;
    fn low(&self, index: usize) -> f64;
    fn close(&self, index: usize) -> f64;
}

fn slice_length<R>() -> LengthFn<R> {
    Arc::new(|rows: &[R]| rows.len())
}

/// Resolved accessors of a [`DataSeries`].
pub struct LineAccessors<R> {
    pub length: LengthFn<R>,
    pub x: ValueFn<R>,
    pub y: ValueFn<R>,
}

impl<R> Clone for LineAccessors<R> {
    fn clone(&self) -> Self {
        Self {
            length: Arc::clone(&self.length),
            x: Arc::clone(&self.x),
            y: Arc::clone(&self.y),
        }
    }
}

/// Row types that ship built-in X/Y accessors.
pub trait DefaultLineAccessors: Sized + 'static {
    fn default_line_accessors() -> LineAccessors<Self>;
}

/// Plain numeric rows: X is the index position, Y is the value itself.
impl DefaultLineAccessors for f64 {
    fn default_line_accessors() -> LineAccessors<Self> {
        LineAccessors {
            length: slice_length(),
            x: Arc::new(|_rows: &[f64], index: usize| index as f64),
            y: Arc::new(|rows: &[f64], index: usize| rows[index]),
        }
    }
}

impl DefaultLineAccessors for DataPoint {
    fn default_line_accessors() -> LineAccessors<Self> {
        LineAccessors {
            length: slice_length(),
            x: Arc::new(|rows: &[DataPoint], index: usize| rows[index].x),
            y: Arc::new(|rows: &[DataPoint], index: usize| rows[index].y),
        }
    }
}

/// Bars plot their close over `BarDate`.
impl DefaultLineAccessors for Bar {
    fn default_line_accessors() -> LineAccessors<Self> {
        LineAccessors {
            length: slice_length(),
            x: Arc::new(|rows: &[Bar], index: usize| rows[index].bar_date),
            y: Arc::new(|rows: &[Bar], index: usize| rows[index].close),
        }
    }
}

/// Optional accessor overrides for a [`DataSeries`].
pub struct LineSeriesOptions<R> {
    pub length: Option<LengthFn<R>>,
    pub x: Option<ValueFn<R>>,
    pub y: Option<ValueFn<R>>,
}

impl<R> Default for LineSeriesOptions<R> {
    fn default() -> Self {
        Self {
            length: None,
            x: None,
            y: None,
        }
    }
}

impl<R> LineSeriesOptions<R> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_length(mut self, length: impl Fn(&[R]) -> usize + Send + Sync + 'static) -> Self {
        self.length = Some(Arc::new(length));
        self
    }

    #[must_use]
    pub fn with_x(mut self, x: impl Fn(&[R], usize) -> f64 + Send + Sync + 'static) -> Self {
        self.x = Some(Arc::new(x));
        self
    }

    #[must_use]
    pub fn with_y(mut self, y: impl Fn(&[R], usize) -> f64 + Send + Sync + 'static) -> Self {
        self.y = Some(Arc::new(y));
        self
    }

    /// Merges these overrides over `previous`; `defaults` is consulted only
    /// when nothing was configured before.
    pub fn resolve(
        self,
        previous: Option<LineAccessors<R>>,
        defaults: impl FnOnce() -> LineAccessors<R>,
    ) -> LineAccessors<R> {
        self.apply_over(previous.unwrap_or_else(defaults))
    }

    fn apply_over(self, base: LineAccessors<R>) -> LineAccessors<R> {
        LineAccessors {
            length: self.length.unwrap_or(base.length),
            x: self.x.unwrap_or(base.x),
            y: self.y.unwrap_or(base.y),
        }
    }
}

/// X/Y series over shared rows.
pub struct DataSeries<R> {
    rows: Arc<[R]>,
    accessors: LineAccessors<R>,
}

impl<R> Clone for DataSeries<R> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
            accessors: self.accessors.clone(),
        }
    }
}

impl<R> fmt::Debug for DataSeries<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataSeries")
            .field("rows", &self.rows.len())
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl<R: DefaultLineAccessors> DataSeries<R> {
    /// Creates an empty series; unset options fall back to the row type's
    /// built-in accessors.
    #[must_use]
    pub fn new(options: LineSeriesOptions<R>) -> Self {
        Self::with_accessors(options.resolve(None, R::default_line_accessors))
    }

    #[must_use]
    pub fn from_rows(rows: impl Into<Arc<[R]>>) -> Self {
        let mut series = Self::new(LineSeriesOptions::default());
        series.set_data(rows);
        series
    }
}

impl<R> DataSeries<R> {
    /// Creates an empty series for row types without built-in accessors.
    #[must_use]
    pub fn with_accessors(accessors: LineAccessors<R>) -> Self {
        Self {
            rows: Arc::from(Vec::new()),
            accessors,
        }
    }

    /// Applies accessor overrides. Fields left `None` keep their current value.
    pub fn configure(&mut self, options: LineSeriesOptions<R>) {
        self.accessors = options.apply_over(self.accessors.clone());
    }

    /// Replaces the row sequence. Rows are not inspected.
    pub fn set_data(&mut self, rows: impl Into<Arc<[R]>>) {
        self.rows = rows.into();
    }

    #[must_use]
    pub fn rows(&self) -> &Arc<[R]> {
        &self.rows
    }

    #[must_use]
    pub fn accessors(&self) -> &LineAccessors<R> {
        &self.accessors
    }
}

impl<R> Series for DataSeries<R> {
    /// Whatever the length accessor reports; it need not equal the number
    /// of stored rows (e.g. one row holding a whole column).
    fn len(&self) -> usize {
        (self.accessors.length)(&self.rows)
    }

    fn x(&self, index: usize) -> f64 {
        (self.accessors.x)(&self.rows, index)
    }

    fn y(&self, index: usize) -> f64 {
        (self.accessors.y)(&self.rows, index)
    }
}

/// Resolved accessors of an [`OhlcDataSeries`].
pub struct OhlcAccessors<R> {
    pub length: LengthFn<R>,
    pub x: ValueFn<R>,
    pub open: ValueFn<R>,
    pub high: ValueFn<R>,
    pub low: ValueFn<R>,
    pub close: ValueFn<R>,
}

impl<R> Clone for OhlcAccessors<R> {
    fn clone(&self) -> Self {
        Self {
            length: Arc::clone(&self.length),
            x: Arc::clone(&self.x),
            open: Arc::clone(&self.open),
            high: Arc::clone(&self.high),
            low: Arc::clone(&self.low),
            close: Arc::clone(&self.close),
        }
    }
}

/// Row types that ship built-in OHLC accessors.
pub trait DefaultOhlcAccessors: Sized + 'static {
    fn default_ohlc_accessors() -> OhlcAccessors<Self>;
}

impl DefaultOhlcAccessors for Bar {
    fn default_ohlc_accessors() -> OhlcAccessors<Self> {
        OhlcAccessors {
            length: slice_length(),
            x: Arc::new(|rows: &[Bar], index: usize| rows[index].bar_date),
            open: Arc::new(|rows: &[Bar], index: usize| rows[index].open),
            high: Arc::new(|rows: &[Bar], index: usize| rows[index].high),
            low: Arc::new(|rows: &[Bar], index: usize| rows[index].low),
            close: Arc::new(|rows: &[Bar], index: usize| rows[index].close),
        }
    }
}

/// Optional accessor overrides for an [`OhlcDataSeries`].
pub struct OhlcSeriesOptions<R> {
    pub length: Option<LengthFn<R>>,
    pub x: Option<ValueFn<R>>,
    pub open: Option<ValueFn<R>>,
    pub high: Option<ValueFn<R>>,
    pub low: Option<ValueFn<R>>,
    pub close: Option<ValueFn<R>>,
}

impl<R> Default for OhlcSeriesOptions<R> {
    fn default() -> Self {
        Self {
            length: None,
            x: None,
            open: None,
            high: None,
            low: None,
            close: None,
        }
    }
}

impl<R> OhlcSeriesOptions<R> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_length(mut self, length: impl Fn(&[R]) -> usize + Send + Sync + 'static) -> Self {
        self.length = Some(Arc::new(length));
        self
    }

    #[must_use]
    pub fn with_x(mut self, x: impl Fn(&[R], usize) -> f64 + Send + Sync + 'static) -> Self {
        self.x = Some(Arc::new(x));
        self
    }

    #[must_use]
    pub fn with_open(mut self, open: impl Fn(&[R], usize) -> f64 + Send + Sync + 'static) -> Self {
        self.open = Some(Arc::new(open));
        self
    }

    #[must_use]
    pub fn with_high(mut self, high: impl Fn(&[R], usize) -> f64 + Send + Sync + 'static) -> Self {
        self.high = Some(Arc::new(high));
        self
    }

    #[must_use]
    pub fn with_low(mut self, low: impl Fn(&[R], usize) -> f64 + Send + Sync + 'static) -> Self {
        self.low = Some(Arc::new(low));
        self
    }

    #[must_use]
    pub fn with_close(
        mut self,
        close: impl Fn(&[R], usize) -> f64 + Send + Sync + 'static,
    ) -> Self {
        self.close = Some(Arc::new(close));
        self
    }

    /// Merges these overrides over `previous`; `defaults` is consulted only
    /// when nothing was configured before.
    pub fn resolve(
        self,
        previous: Option<OhlcAccessors<R>>,
        defaults: impl FnOnce() -> OhlcAccessors<R>,
    ) -> OhlcAccessors<R> {
        self.apply_over(previous.unwrap_or_else(defaults))
    }

    fn apply_over(self, base: OhlcAccessors<R>) -> OhlcAccessors<R> {
        OhlcAccessors {
            length: self.length.unwrap_or(base.length),
            x: self.x.unwrap_or(base.x),
            open: self.open.unwrap_or(base.open),
            high: self.high.unwrap_or(base.high),
            low: self.low.unwrap_or(base.low),
            close: self.close.unwrap_or(base.close),
        }
    }
}

/// OHLC series over shared rows. `y` reads the close accessor, so the same
/// series can feed a moving average or a close-price line.
pub struct OhlcDataSeries<R> {
    rows: Arc<[R]>,
    accessors: OhlcAccessors<R>,
}

impl<R> Clone for OhlcDataSeries<R> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
            accessors: self.accessors.clone(),
        }
    }
}

impl<R> fmt::Debug for OhlcDataSeries<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OhlcDataSeries")
            .field("rows", &self.rows.len())
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl<R: DefaultOhlcAccessors> OhlcDataSeries<R> {
    #[must_use]
    pub fn new(options: OhlcSeriesOptions<R>) -> Self {
        Self::with_accessors(options.resolve(None, R::default_ohlc_accessors))
    }

    #[must_use]
    pub fn from_rows(rows: impl Into<Arc<[R]>>) -> Self {
        let mut series = Self::new(OhlcSeriesOptions::default());
        series.set_data(rows);
        series
    }
}

impl<R> OhlcDataSeries<R> {
    #[must_use]
    pub fn with_accessors(accessors: OhlcAccessors<R>) -> Self {
        Self {
            rows: Arc::from(Vec::new()),
            accessors,
        }
    }

    pub fn configure(&mut self, options: OhlcSeriesOptions<R>) {
        self.accessors = options.apply_over(self.accessors.clone());
    }

    pub fn set_data(&mut self, rows: impl Into<Arc<[R]>>) {
        self.rows = rows.into();
    }

    #[must_use]
    pub fn rows(&self) -> &Arc<[R]> {
        &self.rows
    }

    #[must_use]
    pub fn accessors(&self) -> &OhlcAccessors<R> {
        &self.accessors
    }
}

impl<R> Series for OhlcDataSeries<R> {
    fn len(&self) -> usize {
        (self.accessors.length)(&self.rows)
    }

    fn x(&self, index: usize) -> f64 {
        (self.accessors.x)(&self.rows, index)
    }

    fn y(&self, index: usize) -> f64 {
        self.close(index)
    }
}

impl<R> OhlcSeries for OhlcDataSeries<R> {
    fn open(&self, index: usize) -> f64 {
        (self.accessors.open)(&self.rows, index)
    }

    fn high(&self, index: usize) -> f64 {
        (self.accessors.high)(&self.rows, index)
    }

    fn low(&self, index: usize) -> f64 {
        (self.accessors.low)(&self.rows, index)
    }

    fn close(&self, index: usize) -> f64 {
        (self.accessors.close)(&self.rows, index)
    }
}
