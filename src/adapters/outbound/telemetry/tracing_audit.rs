use tracing::{debug_span, Span};

use crate::{
    domain::errors::StoreResult,
    ports::telemetry::{AuditSpan, AuditSpanSource},
};

struct TracingAuditSpan {
    operation: String,
    // Kept alive for the lifetime of the operation it brackets
    _span: Span,
}

impl AuditSpan for TracingAuditSpan {
    fn operation(&self) -> &str {
        &self.operation
    }
}

/// Audit span source backed by tracing debug spans
pub struct TracingAuditSpanSource;

impl AuditSpanSource for TracingAuditSpanSource {
    fn create_span(
        &self,
        operation: &str,
        path1: Option<&str>,
        path2: Option<&str>,
    ) -> StoreResult<Box<dyn AuditSpan>> {
        let span = debug_span!("store_operation", operation, path1 = ?path1, path2 = ?path2);
        Ok(Box::new(TracingAuditSpan {
            operation: operation.to_string(),
            _span: span,
        }))
    }
}

struct NoopAuditSpan {
    operation: String,
}

impl AuditSpan for NoopAuditSpan {
    fn operation(&self) -> &str {
        &self.operation
    }
}

/// Span source that records nothing
pub struct NoopAuditSpanSource;

impl AuditSpanSource for NoopAuditSpanSource {
    fn create_span(
        &self,
        operation: &str,
        _path1: Option<&str>,
        _path2: Option<&str>,
    ) -> StoreResult<Box<dyn AuditSpan>> {
        Ok(Box::new(NoopAuditSpan {
            operation: operation.to_string(),
        }))
    }
}
