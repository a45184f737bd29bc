pub mod layout_service;
pub mod replay_service;

pub use layout_service::*;
pub use replay_service::*;
