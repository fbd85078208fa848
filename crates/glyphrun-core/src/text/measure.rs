use crate::math::{DVec2, Rect};
use crate::text::{CanvasOrientation, FontMetrics, ShapeResult};

/// Total horizontal advance of `shape`, in points.
///
/// Measure the same shape result that will be drawn, otherwise the width and
/// the drawn run can disagree.
pub fn measure_width(shape: &ShapeResult) -> f64 {
    let sum: i64 = shape
        .records()
        .iter()
        .map(|v| i64::from(v.x_advance))
        .sum();

    shape.scale().from_engine(sum)
}

/// Bounding box of a run drawn at `origin`: the advance width horizontally,
/// and the font's ascender and descender vertically.
///
/// Uses font-wide metrics, not glyph ink bounds, so accents above the
/// ascender or tails below the descender can stick out.
pub fn text_bounds(
    shape: &ShapeResult,
    metrics: &FontMetrics,
    size: f64,
    origin: DVec2,
    orientation: CanvasOrientation,
) -> Rect {
    let width = measure_width(shape);
    let ascender = metrics.to_points(metrics.ascender.into(), size);
    let descender = metrics.to_points(metrics.descender.into(), size);

    let (top, bottom) = match orientation {
        CanvasOrientation::BottomUp => (origin.y + ascender, origin.y + descender),
        CanvasOrientation::TopDown => (origin.y - ascender, origin.y - descender),
    };

    Rect::from_corners(
        DVec2::new(origin.x, bottom),
        DVec2::new(origin.x + width, top),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{Direction, GlyphShapeRecord, ScaleContext};

    fn shape(advances: &[i32]) -> ShapeResult {
        let records = advances
            .iter()
            .enumerate()
            .map(|(idx, &x_advance)| GlyphShapeRecord {
                glyph_id: 1,
                cluster: idx,
                x_advance,
                y_advance: 0,
                x_offset: 0,
                y_offset: 0,
            })
            .collect();

        ShapeResult::new(
            records,
            ScaleContext::default(),
            Direction::LeftToRight,
            advances.len(),
        )
    }

    #[test]
    fn empty_width_is_zero() {
        assert_eq!(measure_width(&ShapeResult::default()), 0.0);
    }

    #[test]
    fn sums_advances() {
        let shape = shape(&[149_500, 149_500, 65_000]);
        assert!((measure_width(&shape) - 36.4).abs() < 1e-9);
    }

    #[test]
    fn width_is_bit_identical_across_calls() {
        let shape = shape(&[123_457, 98_765, 1, 33_333]);
        assert_eq!(
            measure_width(&shape).to_bits(),
            measure_width(&shape).to_bits()
        );
    }

    #[test]
    fn bounds_follow_orientation() {
        let metrics = FontMetrics {
            ascender: 800,
            descender: -200,
            line_gap: 0,
            units_per_em: 1000,
        };
        let shape = shape(&[100_000, 100_000]);

        let origin = DVec2::new(5.0, 50.0);

        let up = text_bounds(&shape, &metrics, 10.0, origin, CanvasOrientation::BottomUp);
        assert_eq!(up.min, DVec2::new(5.0, 48.0));
        assert_eq!(up.max, DVec2::new(25.0, 58.0));

        let down = text_bounds(&shape, &metrics, 10.0, origin, CanvasOrientation::TopDown);
        assert_eq!(down.min, DVec2::new(5.0, 42.0));
        assert_eq!(down.max, DVec2::new(25.0, 52.0));
    }
}
