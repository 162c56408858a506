use crate::domain::errors::StoreResult;

/// A tracing context bracketing one logical operation.
///
/// Spans are diagnostic only; dropping the span ends it. They never alter
/// control flow.
pub trait AuditSpan: Send {
    /// Name of the operation this span brackets
    fn operation(&self) -> &str;
}

/// Port for the audit/tracing span source.
///
/// The facade exposes this as a pass-through for the surrounding layer and
/// does not interpret the spans it creates.
pub trait AuditSpanSource: Send + Sync + 'static {
    /// Start a span for an operation over up to two paths
    fn create_span(
        &self,
        operation: &str,
        path1: Option<&str>,
        path2: Option<&str>,
    ) -> StoreResult<Box<dyn AuditSpan>>;
}
