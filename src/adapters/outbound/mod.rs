pub mod limits;
pub mod retry;
pub mod storage;
pub mod telemetry;
