pub mod configurator;
pub mod counters;
pub mod grid;

// Re-export all public types for convenience
pub use configurator::*;
pub use counters::*;
pub use grid::*;
