//! Reexports [`glam`] and adds a [`Rect`] type.

mod rect;

pub use glam::*;

pub use self::rect::*;
