pub mod layout;
pub mod logger;
pub mod planning;
pub mod replay;

pub use layout::*;
pub use logger::*;
pub use planning::*;
pub use replay::*;
