mod in_memory_stats;
mod tracing_audit;

pub use in_memory_stats::InMemoryStatisticsSink;
pub use tracing_audit::{NoopAuditSpanSource, TracingAuditSpanSource};
