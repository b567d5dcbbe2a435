mod base32;
mod numeral;

pub use base32::*;
pub use numeral::*;

/// Size of a raw ID in bytes.
pub const RAW_LEN: usize = 12;
