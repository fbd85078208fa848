mod font;
mod font_db;
mod measure;
mod placement;
mod scale;
mod shaping;

pub use self::font::*;
pub use self::font_db::*;
pub use self::measure::*;
pub use self::placement::*;
pub use self::scale::*;
pub use self::shaping::*;

/// Reexported so feature and script tags can be named without depending on
/// `ttf-parser` directly.
pub use ttf_parser::Tag;
