use crate::math::DVec2;
use crate::text::ShapeResult;

/// Which way the y axis of a drawing target grows.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum CanvasOrientation {
    /// Origin at the bottom, y grows upward (the PDF default).
    #[default]
    BottomUp,
    /// Origin at the top, y grows downward.
    TopDown,
}

/// A glyph with its absolute pen position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedGlyph {
    pub glyph_id: u16,
    pub cluster: usize,
    pub pos: DVec2,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlacedRun {
    pub glyphs: Vec<PlacedGlyph>,
    /// Pen position after the last glyph's advance.
    pub pen: DVec2,
}

#[derive(Debug, Clone, Copy, Default)]
struct PenState {
    x_advance: i64,
    y_advance: i64,
}

/// Computes absolute positions for every glyph of `shape`, starting at
/// `origin`.
///
/// Engine offsets are y-up, so on a [`CanvasOrientation::TopDown`] canvas
/// vertical advances and offsets are subtracted instead of added.
pub fn place(shape: &ShapeResult, origin: DVec2, orientation: CanvasOrientation) -> PlacedRun {
    let scale = shape.scale();
    let y_sign = match orientation {
        CanvasOrientation::BottomUp => 1.0,
        CanvasOrientation::TopDown => -1.0,
    };

    let mut pen = PenState::default();
    let mut glyphs = Vec::with_capacity(shape.len());

    for record in shape.records() {
        let dx = scale.from_engine(pen.x_advance + i64::from(record.x_offset));
        let dy = scale.from_engine(pen.y_advance + i64::from(record.y_offset));

        glyphs.push(PlacedGlyph {
            glyph_id: record.glyph_id,
            cluster: record.cluster,
            pos: DVec2::new(origin.x + dx, origin.y + y_sign * dy),
        });

        pen.x_advance += i64::from(record.x_advance);
        pen.y_advance += i64::from(record.y_advance);
    }

    let pen = DVec2::new(
        origin.x + scale.from_engine(pen.x_advance),
        origin.y + y_sign * scale.from_engine(pen.y_advance),
    );

    PlacedRun { glyphs, pen }
}
