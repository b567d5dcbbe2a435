mod context;
mod global;
mod source;

pub use context::*;
pub use global::*;
pub use source::*;
