use std::fmt;
use std::sync::Arc;

use ttf_parser::Face;

use crate::{Error, ErrorKind, Result};

/// Font bytes shared between a font source and the programs loaded from it.
pub type FontData = Arc<dyn AsRef<[u8]> + Send + Sync>;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct FontId {
    pub source_id: usize,
    pub opaque_id: u64,
}

impl FontId {
    pub const DUMMY: FontId = FontId {
        source_id: usize::MAX,
        opaque_id: u64::MAX,
    };
}

self_cell::self_cell! {
    struct FaceRef {
        owner: FontData,
        #[covariant]
        dependent: Face,
    }
}

/// A parsed font program: the raw bytes of one face together with the parsed
/// tables.
///
/// Font programs are read-only and can be shared between threads.
pub struct FontProgram {
    id: FontId,
    face_ref: FaceRef,
    face_index: u32,
    format: FontFormat,
    metrics: FontMetrics,
}

impl FontProgram {
    pub fn new(id: FontId, data: FontData, face_index: u32) -> Result<FontProgram> {
        if is_type1((*data).as_ref()) {
            return Err(Error::new(
                ErrorKind::UnsupportedFontKind,
                "PostScript Type 1 fonts can't be shaped",
            ));
        }

        let face_ref = FaceRef::try_new(data, |data| Face::parse((**data).as_ref(), face_index))
            .map_err(|e| Error::wrap(ErrorKind::InvalidFont, e))?;
        let face = face_ref.borrow_dependent();

        let format = FontFormat::from_ttfp_face(face);
        let metrics = FontMetrics::from_ttfp_face(face);

        Ok(FontProgram {
            id,
            face_ref,
            face_index,
            format,
            metrics,
        })
    }

    /// Parses a font program which doesn't belong to any font source.
    pub fn from_data(data: FontData, face_index: u32) -> Result<FontProgram> {
        FontProgram::new(FontId::DUMMY, data, face_index)
    }

    pub fn id(&self) -> FontId {
        self.id
    }

    pub fn data(&self) -> &FontData {
        self.face_ref.borrow_owner()
    }

    pub fn ttfp_face(&self) -> &Face {
        self.face_ref.borrow_dependent()
    }

    pub fn face_index(&self) -> u32 {
        self.face_index
    }

    pub fn format(&self) -> FontFormat {
        self.format
    }

    /// Whether glyphs are defined by scalable outlines, which is what the
    /// shaper requires.
    pub fn is_outline(&self) -> bool {
        self.format.is_outline()
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }
}

impl fmt::Debug for FontProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontProgram")
            .field("id", &self.id)
            .field("face_index", &self.face_index)
            .field("format", &self.format)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

// PFA files start with a PostScript comment, PFB files with a segment header.
fn is_type1(data: &[u8]) -> bool {
    data.starts_with(b"%!PS-AdobeFont")
        || data.starts_with(b"%!FontType1")
        || data.starts_with(&[0x80, 0x01])
}

/// How glyphs are stored in a font program.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum FontFormat {
    /// TrueType outlines (`glyf`).
    TrueType,
    /// PostScript outlines (`CFF `).
    Cff,
    /// PostScript outlines (`CFF2`).
    Cff2,
    /// Only bitmap strikes (`CBDT`, `sbix`).
    Bitmap,
    /// No glyph data the parser recognizes.
    Unknown,
}

impl FontFormat {
    fn from_ttfp_face(face: &Face<'_>) -> FontFormat {
        let tables = face.tables();

        if tables.glyf.is_some() {
            FontFormat::TrueType
        } else if tables.cff.is_some() {
            FontFormat::Cff
        } else if tables.cff2.is_some() {
            FontFormat::Cff2
        } else if tables.cbdt.is_some() || tables.sbix.is_some() {
            FontFormat::Bitmap
        } else {
            FontFormat::Unknown
        }
    }

    pub fn is_outline(self) -> bool {
        matches!(
            self,
            FontFormat::TrueType | FontFormat::Cff | FontFormat::Cff2
        )
    }
}

/// Font-wide vertical metrics, in font design units.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub struct FontMetrics {
    pub ascender: i16,
    pub descender: i16,
    pub line_gap: i16,
    pub units_per_em: u16,
}

impl FontMetrics {
    fn from_ttfp_face(face: &Face<'_>) -> FontMetrics {
        FontMetrics {
            ascender: face.ascender(),
            descender: face.descender(),
            line_gap: face.line_gap(),
            units_per_em: face.units_per_em(),
        }
    }

    /// Converts a value in design units to points at the given font size.
    pub fn to_points(&self, units: i32, size: f64) -> f64 {
        if self.units_per_em == 0 {
            return 0.0;
        }

        f64::from(units) * size / f64::from(self.units_per_em)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_formats() {
        assert!(FontFormat::TrueType.is_outline());
        assert!(FontFormat::Cff.is_outline());
        assert!(FontFormat::Cff2.is_outline());
        assert!(!FontFormat::Bitmap.is_outline());
        assert!(!FontFormat::Unknown.is_outline());
    }

    #[test]
    fn garbage_is_an_invalid_font() {
        let data: FontData = Arc::new(vec![0u8, 1, 2, 3]);
        let error = FontProgram::from_data(data, 0).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidFont);
    }

    #[test]
    fn type1_fonts_are_unsupported() {
        let pfa = b"%!PS-AdobeFont-1.0: Times-Roman 001.007\n".to_vec();
        let pfb = vec![0x80, 0x01, 0x1a, 0x00, 0x00, 0x00, b'%', b'!'];
        let font_type1 = b"%!FontType1-1.0: Courier\n".to_vec();

        for data in [pfa, pfb, font_type1] {
            let error = FontProgram::from_data(Arc::new(data), 0).unwrap_err();
            assert_eq!(error.kind(), ErrorKind::UnsupportedFontKind);
        }
    }

    #[test]
    fn metrics_to_points() {
        let metrics = FontMetrics {
            ascender: 800,
            descender: -200,
            line_gap: 0,
            units_per_em: 1000,
        };
        assert_eq!(metrics.to_points(800, 26.0), 20.8);
        assert_eq!(metrics.to_points(-200, 10.0), -2.0);
    }
}
