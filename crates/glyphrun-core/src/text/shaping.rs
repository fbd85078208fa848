use std::ops::Range;

use smallvec::SmallVec;
use ttf_parser::Tag;

use crate::text::{FontProgram, ScaleContext};
use crate::Result;

/// One shaped glyph. Advances and offsets are engine units at the
/// [`ScaleContext`] of the [`ShapeResult`] holding the record.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct GlyphShapeRecord {
    pub glyph_id: u16,
    /// Index of the first source character of this glyph's cluster.
    pub cluster: usize,
    pub x_advance: i32,
    pub y_advance: i32,
    pub x_offset: i32,
    pub y_offset: i32,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum Direction {
    #[default]
    LeftToRight,
    RightToLeft,
}

/// A single OpenType feature switched on or off for the whole run.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct FeatureToggle {
    pub tag: Tag,
    pub enabled: bool,
}

/// Options for shaping one run of text.
///
/// Direction and script are guessed from the text unless set explicitly.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Default)]
pub struct ShapeOptions {
    pub features: SmallVec<[FeatureToggle; 4]>,
    pub direction: Option<Direction>,
    /// ISO 15924 script tag, e.g. `Latn`.
    pub script: Option<Tag>,
    /// BCP 47 language tag, e.g. `en`.
    pub language: Option<String>,
}

impl ShapeOptions {
    pub fn new() -> ShapeOptions {
        ShapeOptions::default()
    }

    /// Switches an OpenType feature such as `liga` or `kern`. Tags the font
    /// or engine doesn't know are ignored.
    pub fn with_feature(mut self, tag: &[u8; 4], enabled: bool) -> Self {
        let tag = Tag::from_bytes(tag);
        self.features.retain(|v| v.tag != tag);
        self.features.push(FeatureToggle { tag, enabled });
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn with_script(mut self, tag: &[u8; 4]) -> Self {
        self.script = Some(Tag::from_bytes(tag));
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// Glyphs produced by shaping one run of text, in visual order.
///
/// A shape result belongs to the exact text, font, size and options it was
/// shaped from. Nothing checks that association later: measuring or drawing
/// it for other text gives meaningless output.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Default)]
pub struct ShapeResult {
    records: Vec<GlyphShapeRecord>,
    scale: ScaleContext,
    direction: Direction,
    char_len: usize,
}

impl ShapeResult {
    pub fn new(
        records: Vec<GlyphShapeRecord>,
        scale: ScaleContext,
        direction: Direction,
        char_len: usize,
    ) -> ShapeResult {
        ShapeResult {
            records,
            scale,
            direction,
            char_len,
        }
    }

    pub fn records(&self) -> &[GlyphShapeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn scale(&self) -> ScaleContext {
        self.scale
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Number of characters in the shaped text.
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    /// Characters covered by the cluster starting at `cluster`: everything up
    /// to the next cluster start, or to the end of the text.
    pub fn cluster_range(&self, cluster: usize) -> Range<usize> {
        let end = self
            .records
            .iter()
            .map(|v| v.cluster)
            .filter(|&v| v > cluster)
            .min()
            .unwrap_or(self.char_len);

        cluster..end.max(cluster)
    }

    /// [`ShapeResult::cluster_range`] for every record, in record order.
    pub fn cluster_ranges(&self) -> Vec<Range<usize>> {
        let mut starts: Vec<usize> = self.records.iter().map(|v| v.cluster).collect();
        starts.sort_unstable();
        starts.dedup();

        self.records
            .iter()
            .map(|record| {
                let next = starts.partition_point(|&v| v <= record.cluster);
                let end = starts.get(next).copied().unwrap_or(self.char_len);
                record.cluster..end.max(record.cluster)
            })
            .collect()
    }
}

/// A text shaping engine.
///
/// Implementations must not keep per-font state between calls: every call
/// builds its own engine objects from `program`.
pub trait TextShaper: Send + Sync + 'static {
    fn shape(
        &self,
        program: &FontProgram,
        text: &str,
        size: f64,
        options: &ShapeOptions,
        scale: ScaleContext,
    ) -> Result<ShapeResult>;
}
