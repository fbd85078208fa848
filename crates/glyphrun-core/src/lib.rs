pub mod math;
pub mod text;

mod canvas;
mod error;

pub use self::canvas::*;
pub use self::error::*;
