use std::fmt;
use std::sync::Arc;

use glyphrun_core::math::{DVec2, Rect};
use glyphrun_core::text::{
    measure_width, place, text_bounds, CanvasOrientation, FontRegistry, MemoryFontSource,
    ScaleContext, ShapeOptions, ShapeResult, TextShaper,
};
use glyphrun_core::{Canvas, Error, ErrorKind, RenderMode, Result};

use crate::text::{default_font_database, DefaultTextShaper};
use crate::ShapeCache;

/// Options for drawing one run of text.
#[derive(Debug, Clone, Default)]
pub struct DrawOptions {
    pub shape: ShapeOptions,
    /// Render mode used for this run only; the canvas' previous mode is
    /// restored afterwards.
    pub render_mode: Option<RenderMode>,
}

/// Shapes, measures and draws runs of text in a single font and size.
pub struct Typesetter {
    pub font_db: Box<dyn FontRegistry>,
    pub text_shaper: Box<dyn TextShaper>,
    pub scale: ScaleContext,
}

impl Typesetter {
    pub fn new<R: FontRegistry + 'static>(font_db: R) -> Typesetter {
        Typesetter {
            font_db: Box::new(font_db),
            text_shaper: Box::new(DefaultTextShaper::new()),
            scale: ScaleContext::default(),
        }
    }

    /// A typesetter knowing the fonts in `fonts`, followed by system fonts when
    /// the `fontdb` feature is enabled.
    pub fn with_fonts(fonts: MemoryFontSource) -> Typesetter {
        Typesetter::new(default_font_database(fonts))
    }

    pub fn shape(
        &mut self,
        font: &str,
        size: f64,
        text: &str,
        options: &ShapeOptions,
    ) -> Result<ShapeResult> {
        if !self.font_db.is_outline_format(font)? {
            return Err(Error::new(
                ErrorKind::UnsupportedFontKind,
                format!("font {font:?} is not an outline font"),
            ));
        }

        let program = self.font_db.resolve(font)?;
        self.text_shaper
            .shape(program, text, size, options, self.scale)
    }

    /// Like [`Typesetter::shape`], reusing results from `cache`.
    pub fn shape_cached(
        &mut self,
        cache: &mut ShapeCache,
        font: &str,
        size: f64,
        text: &str,
        options: &ShapeOptions,
    ) -> Result<Arc<ShapeResult>> {
        let scale = self.scale;
        cache.get_or_try_insert(font, size, text, options, scale, || {
            self.shape(font, size, text, options)
        })
    }

    /// Advance width of `text` in points.
    pub fn string_width(
        &mut self,
        font: &str,
        size: f64,
        text: &str,
        options: &ShapeOptions,
    ) -> Result<f64> {
        let shape = self.shape(font, size, text, options)?;
        Ok(measure_width(&shape))
    }

    /// Box spanning the advance width of `text` drawn at `origin`, and the
    /// font's ascender and descender.
    pub fn string_bounds(
        &mut self,
        font: &str,
        size: f64,
        text: &str,
        origin: DVec2,
        orientation: CanvasOrientation,
        options: &ShapeOptions,
    ) -> Result<Rect> {
        let shape = self.shape(font, size, text, options)?;
        let metrics = *self.font_db.resolve(font)?.metrics();
        Ok(text_bounds(&shape, &metrics, size, origin, orientation))
    }

    /// Draws `text` at `origin` with the canvas' current font and size.
    ///
    /// Returns the pen position after the run.
    pub fn draw_string<C: Canvas + ?Sized>(
        &mut self,
        canvas: &mut C,
        origin: DVec2,
        text: &str,
        options: &DrawOptions,
    ) -> Result<DVec2> {
        let shape = {
            let (font, size) = canvas.current_font();
            self.shape(font, size, text, &options.shape)?
        };

        Ok(draw_shaped(canvas, &shape, text, origin, options.render_mode))
    }
}

impl fmt::Debug for Typesetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Typesetter")
            .field("scale", &self.scale)
            .finish_non_exhaustive()
    }
}

/// Draws an already shaped run. `text` must be the text `shape` was shaped
/// from.
///
/// Returns the pen position after the run.
pub fn draw_shaped<C: Canvas + ?Sized>(
    canvas: &mut C,
    shape: &ShapeResult,
    text: &str,
    origin: DVec2,
    render_mode: Option<RenderMode>,
) -> DVec2 {
    debug_assert_eq!(
        text.chars().count(),
        shape.char_len(),
        "shape result used with different text"
    );

    let run = place(shape, origin, canvas.orientation());

    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(idx, _)| idx)
        .chain(std::iter::once(text.len()))
        .collect();
    let last = bounds.len() - 1;

    canvas.begin_text(origin, shape.direction());

    let prev_mode = render_mode.map(|mode| {
        let prev = canvas.text_render_mode();
        canvas.set_text_render_mode(mode);
        prev
    });

    for (glyph, chars) in run.glyphs.iter().zip(shape.cluster_ranges()) {
        let start = bounds[chars.start.min(last)];
        let end = bounds[chars.end.min(last)];
        canvas.draw_glyph(glyph, text.get(start..end).unwrap_or(""));
    }

    if let Some(prev) = prev_mode {
        canvas.set_text_render_mode(prev);
    }

    canvas.end_text();

    run.pen
}
