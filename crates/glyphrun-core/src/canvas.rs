use crate::math::DVec2;
use crate::text::{CanvasOrientation, Direction, PlacedGlyph};

/// How glyph outlines are painted, as in PDF's `Tr` operator.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum RenderMode {
    #[default]
    Fill,
    Stroke,
    FillStroke,
    Invisible,
}

/// A page that text runs are drawn onto.
///
/// The canvas owns font selection and the actual drawing operators; text is
/// handed over one positioned glyph at a time, between [`Canvas::begin_text`]
/// and [`Canvas::end_text`].
pub trait Canvas {
    /// Name and size of the currently selected font.
    fn current_font(&self) -> (&str, f64);

    fn orientation(&self) -> CanvasOrientation;

    fn begin_text(&mut self, origin: DVec2, direction: Direction);

    fn text_render_mode(&self) -> RenderMode;

    fn set_text_render_mode(&mut self, mode: RenderMode);

    /// Draws one glyph. `text` is the source text of the glyph's cluster,
    /// which may be empty, a single character, or several characters for a
    /// ligature.
    fn draw_glyph(&mut self, glyph: &PlacedGlyph, text: &str);

    fn end_text(&mut self);
}
