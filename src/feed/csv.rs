//! Bar rows from headerless CSV exports.
//!
//! Each record is `MM/DD/YYYY,open,high,low,close`, fields optionally quoted.
//! Dates become midnight UTC in epoch milliseconds.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use tracing::debug;

use crate::core::Bar;
use crate::error::{ChartError, ChartResult};

const DATE_FORMAT: &str = "%m/%d/%Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CsvBarOptions {
    pub has_headers: bool,
    /// Keep only the newest `n` bars.
    pub keep_last: Option<usize>,
}

impl CsvBarOptions {
    #[must_use]
    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    #[must_use]
    pub fn keep_last(mut self, count: usize) -> Self {
        self.keep_last = Some(count);
        self
    }
}

pub fn read_bars<R: Read>(reader: R, options: CsvBarOptions) -> ChartResult<Vec<Bar>> {
    let mut csv_reader = ::csv::ReaderBuilder::new()
        .has_headers(options.has_headers)
        .trim(::csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut bars = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |position| position.line());
        bars.push(parse_record(&record, line)?);
    }

    if let Some(count) = options.keep_last {
        let skip = bars.len().saturating_sub(count);
        bars.drain(..skip);
    }

    debug!(count = bars.len(), "read bars from csv");
    Ok(bars)
}

pub fn read_bars_from_path(path: impl AsRef<Path>, options: CsvBarOptions) -> ChartResult<Vec<Bar>> {
    let file = File::open(path.as_ref())?;
    read_bars(file, options)
}

fn parse_record(record: &::csv::StringRecord, line: u64) -> ChartResult<Bar> {
    if record.len() < 5 {
        return Err(ChartError::Feed(format!(
            "line {line}: expected 5 fields, found {}",
            record.len()
        )));
    }

    let date = NaiveDate::parse_from_str(&record[0], DATE_FORMAT).map_err(|err| {
        ChartError::Feed(format!("line {line}: invalid date `{}`: {err}", &record[0]))
    })?;
    let bar_date = date
        .and_hms_opt(0, 0, 0)
        .map(|midnight| midnight.and_utc().timestamp_millis() as f64)
        .ok_or_else(|| ChartError::Feed(format!("line {line}: date out of range")))?;

    let number = |column: usize, name: &str| -> ChartResult<f64> {
        record[column].parse::<f64>().map_err(|err| {
            ChartError::Feed(format!(
                "line {line}: invalid {name} `{}`: {err}",
                &record[column]
            ))
        })
    };

    Ok(Bar::new(
        bar_date,
        number(1, "open")?,
        number(2, "high")?,
        number(3, "low")?,
        number(4, "close")?,
    ))
}
