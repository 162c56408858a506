mod delete;
mod timed;

pub use delete::*;
pub use timed::TimedResult;
