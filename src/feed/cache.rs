use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::Bar;

/// Parameters of one bar request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BarQuery {
    pub market_id: u64,
    pub interval: String,
    pub bars: u32,
    pub span: u32,
}

impl BarQuery {
    #[must_use]
    pub fn new(market_id: u64, interval: impl Into<String>, bars: u32, span: u32) -> Self {
        Self {
            market_id,
            interval: interval.into(),
            bars,
            span,
        }
    }
}

/// `market:interval:bars:span`
impl fmt::Display for BarQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.market_id, self.interval, self.bars, self.span
        )
    }
}

/// Bar sequences keyed by query, owned by the application.
///
/// Entries are shared as `Arc<[Bar]>` so they can be handed straight to
/// `set_data`. With a capacity set, the oldest insertion is evicted first.
#[derive(Debug, Clone, Default)]
pub struct BarCache {
    entries: IndexMap<BarQuery, Arc<[Bar]>>,
    capacity: Option<usize>,
}

impl BarCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity_limit(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
            capacity: Some(capacity.max(1)),
        }
    }

    #[must_use]
    pub fn get(&self, query: &BarQuery) -> Option<Arc<[Bar]>> {
        self.entries.get(query).cloned()
    }

    /// Stores `bars`, returning the previous entry for the same query.
    pub fn insert(&mut self, query: BarQuery, bars: impl Into<Arc<[Bar]>>) -> Option<Arc<[Bar]>> {
        let bars = bars.into();
        debug!(key = %query, count = bars.len(), "cache bars");
        let previous = self.entries.shift_remove(&query);
        self.entries.insert(query, bars);
        if let Some(capacity) = self.capacity {
            while self.entries.len() > capacity {
                if let Some((evicted, _)) = self.entries.shift_remove_index(0) {
                    debug!(key = %evicted, "evicted cached bars");
                }
            }
        }
        previous
    }

    pub fn invalidate(&mut self, query: &BarQuery) -> bool {
        self.entries.shift_remove(query).is_some()
    }

    /// Drops every entry for `market_id`; returns how many were removed.
    pub fn invalidate_market(&mut self, market_id: u64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|query, _| query.market_id != market_id);
        let removed = before - self.entries.len();
        debug!(market_id, removed, "invalidated market");
        removed
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
