mod audit;
mod statistics_sink;

pub use audit::{AuditSpan, AuditSpanSource};
pub use statistics_sink::{Statistic, StatisticsSink};
