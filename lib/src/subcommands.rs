pub use recommend::*;
pub use train::*;

pub mod recommend;
pub mod train;
