use std::sync::Arc;

use bar_chart::ChartError;
use bar_chart::core::Bar;
use bar_chart::feed::{BarCache, BarQuery, CsvBarOptions, format_bar_date, read_bars};

const EXPORT: &str = "\
01/02/2020,10.5,12,9.75,11
01/03/2020, 11 ,13,10,9
\"01/06/2020\",9,10,8,9.5
";

#[test]
fn csv_records_become_midnight_utc_bars() {
    let bars = read_bars(EXPORT.as_bytes(), CsvBarOptions::default()).expect("bars");

    assert_eq!(bars.len(), 3);
    assert_eq!(bars[0], Bar::new(1_577_923_200_000.0, 10.5, 12.0, 9.75, 11.0));
    assert_eq!(bars[1].open, 11.0, "fields are trimmed");
    assert_eq!(bars[2].bar_date - bars[1].bar_date, 3.0 * 86_400_000.0);
}

#[test]
fn keep_last_retains_newest_rows() {
    let bars = read_bars(EXPORT.as_bytes(), CsvBarOptions::default().keep_last(2)).expect("bars");
    assert_eq!(bars.len(), 2);
    assert_eq!(bars[0].close, 9.0);

    let all = read_bars(EXPORT.as_bytes(), CsvBarOptions::default().keep_last(10)).expect("bars");
    assert_eq!(all.len(), 3);
}

#[test]
fn header_row_can_be_skipped() {
    let input = format!("Date,Open,High,Low,Close\n{EXPORT}");
    let bars = read_bars(input.as_bytes(), CsvBarOptions::default().with_headers(true))
        .expect("bars");
    assert_eq!(bars.len(), 3);
}

#[test]
fn malformed_rows_name_their_line() {
    let bad_date = read_bars("2020-01-02,1,2,0,1\n".as_bytes(), CsvBarOptions::default())
        .expect_err("iso date");
    assert!(matches!(&bad_date, ChartError::Feed(message) if message.starts_with("line 1:")));

    let short = read_bars(
        "01/02/2020,1,2,0,1\n01/03/2020,1,2\n".as_bytes(),
        CsvBarOptions::default(),
    )
    .expect_err("short row");
    assert!(matches!(&short, ChartError::Feed(message) if message.contains("line 2")));

    let bad_number = read_bars("01/02/2020,1,x,0,1\n".as_bytes(), CsvBarOptions::default())
        .expect_err("bad high");
    assert!(matches!(&bad_number, ChartError::Feed(message) if message.contains("high")));
}

#[test]
fn bar_dates_format_as_minutes_in_utc() {
    assert_eq!(
        format_bar_date(1_577_923_200.0).as_deref(),
        Some("2020-01-02 00:00")
    );
    assert_eq!(
        format_bar_date(1_577_923_200.0 + 13.0 * 3600.0 + 7.0 * 60.0 + 30.0).as_deref(),
        Some("2020-01-02 13:07")
    );
    assert_eq!(format_bar_date(f64::NAN), None);
}

#[test]
fn query_key_is_colon_separated() {
    let query = BarQuery::new(42, "1h", 200, 7);
    assert_eq!(query.to_string(), "42:1h:200:7");
}

#[test]
fn cache_stores_and_replaces_entries() {
    let mut cache = BarCache::new();
    let query = BarQuery::new(1, "1d", 100, 1);
    assert!(cache.is_empty());

    let first: Arc<[Bar]> = vec![Bar::new(1.0, 1.0, 1.0, 1.0, 1.0)].into();
    assert!(cache.insert(query.clone(), Arc::clone(&first)).is_none());
    assert!(cache.get(&query).is_some_and(|bars| Arc::ptr_eq(&bars, &first)));

    let previous = cache.insert(query.clone(), Vec::<Bar>::new());
    assert!(previous.is_some_and(|bars| Arc::ptr_eq(&bars, &first)));
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get(&query).map(|bars| bars.len()), Some(0));
}

#[test]
fn cache_evicts_oldest_insert_when_full() {
    let mut cache = BarCache::with_capacity_limit(2);
    let a = BarQuery::new(1, "1d", 100, 1);
    let b = BarQuery::new(2, "1d", 100, 1);
    let c = BarQuery::new(3, "1d", 100, 1);

    cache.insert(a.clone(), Vec::<Bar>::new());
    cache.insert(b.clone(), Vec::<Bar>::new());
    cache.insert(a.clone(), Vec::<Bar>::new());
    cache.insert(c.clone(), Vec::<Bar>::new());

    assert_eq!(cache.len(), 2);
    assert!(cache.get(&b).is_none(), "re-inserting `a` made `b` the oldest");
    assert!(cache.get(&a).is_some());
    assert!(cache.get(&c).is_some());
}

#[test]
fn cache_invalidation() {
    let mut cache = BarCache::new();
    cache.insert(BarQuery::new(1, "1d", 100, 1), Vec::<Bar>::new());
    cache.insert(BarQuery::new(1, "1h", 100, 1), Vec::<Bar>::new());
    cache.insert(BarQuery::new(2, "1d", 100, 1), Vec::<Bar>::new());

    assert!(cache.invalidate(&BarQuery::new(2, "1d", 100, 1)));
    assert!(!cache.invalidate(&BarQuery::new(2, "1d", 100, 1)));
    assert_eq!(cache.invalidate_market(1), 2);
    assert!(cache.is_empty());

    cache.insert(BarQuery::new(3, "1d", 100, 1), Vec::<Bar>::new());
    cache.clear();
    assert_eq!(cache.len(), 0);
}
