pub mod file_logger;
pub mod http_planner;
pub mod multi_logger;
pub mod noop_logger;
pub mod tracing_logger;

pub use file_logger::*;
pub use http_planner::*;
pub use multi_logger::*;
pub use noop_logger::*;
pub use tracing_logger::*;
