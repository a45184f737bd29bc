pub mod colors;
pub mod frame;
pub mod playback;
pub mod session;
pub mod stats;
pub mod trace;

pub use colors::*;
pub use frame::*;
pub use playback::*;
pub use session::*;
pub use stats::StatsDiscrepancy;
pub use trace::*;
