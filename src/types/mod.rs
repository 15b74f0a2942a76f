mod context;
mod frequency;
mod gains;
mod kernel;
mod time;

pub use context::*;
pub use frequency::*;
pub use gains::*;
pub use kernel::*;
pub use time::*;
