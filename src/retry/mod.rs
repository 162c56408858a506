mod invoker;

pub use invoker::{RetryInvoker, RetryPolicy};
