//! Optional data-source helpers that sit outside the charting core.
//!
//! Nothing in `core`, `api` or `render` depends on this module.

pub mod cache;
pub mod csv;

pub use cache::{BarCache, BarQuery};
pub use self::csv::{CsvBarOptions, read_bars, read_bars_from_path};

use chrono::DateTime;

/// Formats epoch seconds as `YYYY-MM-DD HH:MM` (UTC), the overlay widget's
/// axis label format. Returns `None` when out of range or non-finite.
#[must_use]
pub fn format_bar_date(epoch_seconds: f64) -> Option<String> {
    if !epoch_seconds.is_finite() {
        return None;
    }
    let secs = epoch_seconds.floor();
    let nanos = ((epoch_seconds - secs) * 1e9) as u32;
    DateTime::from_timestamp(secs as i64, nanos)
        .map(|time| time.format("%Y-%m-%d %H:%M").to_string())
}
