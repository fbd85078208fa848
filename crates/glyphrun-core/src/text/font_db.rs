use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::text::{FontData, FontId, FontProgram};
use crate::{Error, ErrorKind, Result};

/// Something that knows how to find fonts by name and load their programs.
pub trait FontSource: Send + Sync + 'static {
    fn query(&self, name: &str) -> Option<u64>;

    fn load(&mut self, id: FontId) -> Result<FontProgram>;
}

/// Maps symbolic font names to font programs.
pub trait FontRegistry {
    fn resolve(&mut self, name: &str) -> Result<&FontProgram>;

    /// Whether the named font is an outline font, which is required for
    /// shaping.
    fn is_outline_format(&mut self, name: &str) -> Result<bool> {
        self.resolve(name).map(FontProgram::is_outline)
    }
}

/// Font programs registered by hand under symbolic names.
#[derive(Default)]
pub struct MemoryFontSource {
    fonts: Vec<(String, FontData, u32)>,
}

impl MemoryFontSource {
    pub fn new() -> MemoryFontSource {
        MemoryFontSource::default()
    }

    /// Registers a face of a font file's contents. A later registration under
    /// the same name shadows earlier ones.
    pub fn register(&mut self, name: impl Into<String>, data: FontData, face_index: u32) {
        self.fonts.push((name.into(), data, face_index));
    }

    pub fn register_bytes(&mut self, name: impl Into<String>, data: Vec<u8>) {
        self.register(name, Arc::new(data), 0);
    }

    pub fn register_file(
        &mut self,
        name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<()> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| {
            Error::from(e).with_context(format!("failed to read {}", path.display()))
        })?;
        self.register_bytes(name, data);
        Ok(())
    }
}

impl FontSource for MemoryFontSource {
    fn query(&self, name: &str) -> Option<u64> {
        self.fonts
            .iter()
            .rposition(|(v, _, _)| v == name)
            .map(|idx| idx as u64)
    }

    fn load(&mut self, id: FontId) -> Result<FontProgram> {
        let (_, data, face_index) = usize::try_from(id.opaque_id)
            .ok()
            .and_then(|idx| self.fonts.get(idx))
            .ok_or_else(|| Error::new(ErrorKind::UnknownFont, "invalid font id"))?;

        FontProgram::new(id, Arc::clone(data), *face_index)
    }
}

impl fmt::Debug for MemoryFontSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.fonts.iter().map(|(name, _, index)| (name, index)))
            .finish()
    }
}

/// A list of font sources, queried in order, with a cache of loaded programs.
#[derive(Default)]
pub struct FontDatabase {
    sources: Vec<Box<dyn FontSource>>,
    loaded_programs: HashMap<FontId, FontProgram>,
    cached_failures: HashMap<FontId, ErrorKind>,
}

impl FontDatabase {
    pub fn new() -> FontDatabase {
        FontDatabase::default()
    }

    pub fn add_source<S: FontSource>(&mut self, source: S) {
        self.sources.push(Box::new(source))
    }

    pub fn query(&self, name: &str) -> Option<FontId> {
        for (source_id, source) in self.sources.iter().enumerate() {
            if let Some(opaque_id) = source.query(name) {
                return Some(FontId {
                    source_id,
                    opaque_id,
                });
            }
        }

        None
    }

    pub fn load(&mut self, id: FontId) -> Result<&FontProgram> {
        if let Some(&kind) = self.cached_failures.get(&id) {
            // unsupported fonts keep failing with the same kind, so callers can
            // tell them apart from broken ones
            let kind = match kind {
                ErrorKind::UnsupportedFontKind => kind,
                _ => ErrorKind::CachedFailure,
            };
            return Err(Error::new(kind, "cached failure"));
        }

        let source = self
            .sources
            .get_mut(id.source_id)
            .ok_or_else(|| Error::new(ErrorKind::UnknownFont, "invalid font id"))?;

        let program = match source.load(id) {
            Ok(v) => v,
            Err(e) => {
                log::error!("Font failed to load: {}", e);
                self.cached_failures.insert(id, e.kind());
                return Err(e);
            }
        };

        log::debug!("Loaded font {:?} ({:?})", id, program.format());

        self.loaded_programs.insert(id, program);
        Ok(&self.loaded_programs[&id])
    }

    pub fn get(&self, id: FontId) -> Option<&FontProgram> {
        self.loaded_programs.get(&id)
    }

    pub fn get_or_load(&mut self, id: FontId) -> Result<&FontProgram> {
        if self.loaded_programs.contains_key(&id) {
            Ok(&self.loaded_programs[&id])
        } else {
            self.load(id)
        }
    }
}

impl FontRegistry for FontDatabase {
    fn resolve(&mut self, name: &str) -> Result<&FontProgram> {
        let id = self
            .query(name)
            .ok_or_else(|| Error::new(ErrorKind::UnknownFont, format!("unknown font {name:?}")))?;

        self.get_or_load(id)
    }
}

impl fmt::Debug for FontDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontDatabase")
            .field("loaded_programs", &self.loaded_programs)
            .field("cached_failures", &self.cached_failures)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_names_fail() {
        let mut db = FontDatabase::new();
        db.add_source(MemoryFontSource::new());

        let error = db.resolve("cmunrm").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UnknownFont);
    }

    #[test]
    fn later_registrations_shadow_earlier_ones() {
        let mut source = MemoryFontSource::new();
        source.register_bytes("serif", vec![1]);
        source.register_bytes("mono", vec![2]);
        source.register_bytes("serif", vec![3]);

        assert_eq!(source.query("serif"), Some(2));
        assert_eq!(source.query("mono"), Some(1));
        assert_eq!(source.query("sans"), None);
    }

    #[test]
    fn failures_are_cached() {
        let mut source = MemoryFontSource::new();
        source.register_bytes("broken", vec![0, 1, 2, 3]);

        let mut db = FontDatabase::new();
        db.add_source(source);

        assert_eq!(db.resolve("broken").unwrap_err().kind(), ErrorKind::InvalidFont);
        assert_eq!(
            db.resolve("broken").unwrap_err().kind(),
            ErrorKind::CachedFailure
        );
    }

    #[test]
    fn unsupported_kind_survives_caching() {
        let mut source = MemoryFontSource::new();
        source.register_bytes("times", b"%!PS-AdobeFont-1.0: Times-Roman".to_vec());

        let mut db = FontDatabase::new();
        db.add_source(source);

        for _ in 0..2 {
            let error = db.is_outline_format("times").unwrap_err();
            assert_eq!(error.kind(), ErrorKind::UnsupportedFontKind);
        }
    }

    #[test]
    fn missing_files_are_io_errors() {
        let mut source = MemoryFontSource::new();
        let error = source
            .register_file("missing", "/nonexistent/font/file.ttf")
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Io);
    }
}
