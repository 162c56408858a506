use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::ports::telemetry::{Statistic, StatisticsSink};

#[derive(Debug, Clone, Copy, Default)]
struct DurationTotals {
    count: u64,
    total: Duration,
}

/// Statistics sink keeping everything in process memory.
///
/// Used as the default backend and by tests; snapshot accessors expose the
/// recorded values without draining them.
#[derive(Default)]
pub struct InMemoryStatisticsSink {
    counters: Mutex<HashMap<Statistic, u64>>,
    durations: Mutex<HashMap<(Statistic, bool), DurationTotals>>,
    samples: Mutex<HashMap<Statistic, Vec<u64>>>,
}

impl InMemoryStatisticsSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a counter
    pub fn counter(&self, statistic: Statistic) -> u64 {
        self.counters
            .lock()
            .unwrap()
            .get(&statistic)
            .copied()
            .unwrap_or(0)
    }

    /// Accumulated duration recorded for a statistic
    pub fn total_duration(&self, statistic: Statistic, rate_limited: bool) -> Duration {
        self.durations
            .lock()
            .unwrap()
            .get(&(statistic, rate_limited))
            .map(|t| t.total)
            .unwrap_or(Duration::ZERO)
    }

    /// Number of duration records for a statistic
    pub fn duration_count(&self, statistic: Statistic, rate_limited: bool) -> u64 {
        self.durations
            .lock()
            .unwrap()
            .get(&(statistic, rate_limited))
            .map(|t| t.count)
            .unwrap_or(0)
    }

    /// All quantile samples recorded for a statistic
    pub fn samples(&self, statistic: Statistic) -> Vec<u64> {
        self.samples
            .lock()
            .unwrap()
            .get(&statistic)
            .cloned()
            .unwrap_or_default()
    }

    /// All non-zero counters as (symbol, value) pairs, sorted by symbol
    pub fn counter_snapshot(&self) -> Vec<(&'static str, u64)> {
        let mut entries: Vec<_> = self
            .counters
            .lock()
            .unwrap()
            .iter()
            .map(|(statistic, value)| (statistic.symbol(), *value))
            .collect();
        entries.sort_by_key(|(symbol, _)| *symbol);
        entries
    }
}

impl StatisticsSink for InMemoryStatisticsSink {
    fn increment_counter(&self, statistic: Statistic, count: u64) {
        *self.counters.lock().unwrap().entry(statistic).or_insert(0) += count;
    }

    fn record_duration(&self, statistic: Statistic, rate_limited: bool, duration: Duration) {
        let mut durations = self.durations.lock().unwrap();
        let totals = durations.entry((statistic, rate_limited)).or_default();
        totals.count += 1;
        totals.total += duration;
    }

    fn add_quantile_sample(&self, statistic: Statistic, value: u64) {
        self.samples
            .lock()
            .unwrap()
            .entry(statistic)
            .or_default()
            .push(value);
    }
}
