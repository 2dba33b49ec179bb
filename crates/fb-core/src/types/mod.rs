//! Domain types shared by the SDK seam and the command layer.

pub mod enums;
pub mod json_util;
pub mod orders;

pub use enums::*;
pub use orders::*;
