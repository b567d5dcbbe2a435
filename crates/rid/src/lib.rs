#![doc = include_str!("../README.md")]

mod checksum;
mod encoding;
mod error;
mod generator;
mod id;
mod machine;
mod process;
mod seed;
#[cfg(feature = "serde")]
pub mod serde;
mod time;

pub use crate::checksum::*;
pub use crate::encoding::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::machine::*;
pub use crate::process::*;
pub use crate::seed::*;
pub use crate::time::*;
