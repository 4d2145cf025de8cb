mod bracket;
mod error;
mod pool;
mod range;
pub mod shared;

pub use bracket::*;
pub use error::*;
pub use pool::*;
pub use range::*;
pub use shared::{IdHandle, SharedPool};
