use std::str::FromStr;

use glyphrun_core::text::{
    Direction, FontProgram, GlyphShapeRecord, ScaleContext, ShapeOptions, ShapeResult, TextShaper,
};
use glyphrun_core::{Error, ErrorKind, Result};
use rustybuzz::{Face, Feature, Language, Script, UnicodeBuffer};

/// Shapes text with rustybuzz.
///
/// Every call builds its own rustybuzz face and buffer, so a single shaper can
/// be shared between threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustybuzzShaper;

impl RustybuzzShaper {
    pub fn new() -> RustybuzzShaper {
        RustybuzzShaper
    }
}

impl TextShaper for RustybuzzShaper {
    fn shape(
        &self,
        program: &FontProgram,
        text: &str,
        size: f64,
        options: &ShapeOptions,
        scale: ScaleContext,
    ) -> Result<ShapeResult> {
        if !program.is_outline() {
            return Err(Error::new(
                ErrorKind::UnsupportedFontKind,
                format!("can't shape with a {:?} font", program.format()),
            ));
        }

        let engine_size = scale.to_engine_size(size)?;

        if text.is_empty() {
            let direction = options.direction.unwrap_or_default();
            return Ok(ShapeResult::new(Vec::new(), scale, direction, 0));
        }

        let face = Face::from_face(program.ttfp_face().clone());
        let units_per_em = face.units_per_em() as u16;

        let mut buffer = UnicodeBuffer::new();
        buffer.push_str(text);

        if let Some(tag) = options.script {
            match Script::from_iso15924_tag(tag) {
                Some(script) => buffer.set_script(script),
                None => log::debug!("Ignoring unknown script tag {}", tag),
            }
        }

        if let Some(direction) = options.direction {
            buffer.set_direction(match direction {
                Direction::LeftToRight => rustybuzz::Direction::LeftToRight,
                Direction::RightToLeft => rustybuzz::Direction::RightToLeft,
            });
        }

        if let Some(language) = &options.language {
            match Language::from_str(language) {
                Ok(language) => buffer.set_language(language),
                Err(e) => log::debug!("Ignoring language {:?}: {}", language, e),
            }
        }

        buffer.guess_segment_properties();

        let direction = match buffer.direction() {
            rustybuzz::Direction::RightToLeft => Direction::RightToLeft,
            _ => Direction::LeftToRight,
        };

        log::trace!(
            "Shaping {:?} at {}pt (engine size {}, {:?})",
            text,
            size,
            engine_size,
            direction
        );

        let features: Vec<Feature> = options
            .features
            .iter()
            .map(|v| Feature::new(v.tag, u32::from(v.enabled), ..))
            .collect();

        let glyphs = rustybuzz::shape(&face, &features, buffer);

        let char_starts: Vec<usize> = text.char_indices().map(|(idx, _)| idx).collect();
        let to_engine = |units: i32| scale.units_to_engine(units, engine_size, units_per_em);

        let it = glyphs.glyph_infos().iter().zip(glyphs.glyph_positions());
        let records = it
            .map(|(info, pos)| GlyphShapeRecord {
                glyph_id: info.glyph_id as u16,
                cluster: char_starts.partition_point(|&v| v < info.cluster as usize),
                x_advance: to_engine(pos.x_advance),
                y_advance: to_engine(pos.y_advance),
                x_offset: to_engine(pos.x_offset),
                y_offset: to_engine(pos.y_offset),
            })
            .collect::<Vec<_>>();

        log::debug!("Shaped {} chars into {} glyphs", char_starts.len(), records.len());

        Ok(ShapeResult::new(records, scale, direction, char_starts.len()))
    }
}
