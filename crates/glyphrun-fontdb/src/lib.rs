use std::path::Path;

use glyphrun_core::text::{FontId, FontProgram, FontSource};
use glyphrun_core::{Error, ErrorKind, Result};

/// Fonts installed on the system, looked up by family name.
///
/// Font files and in-memory fonts can be added on top of the system fonts.
pub struct SystemFontSource(FontDbSource);

impl SystemFontSource {
    pub fn new() -> SystemFontSource {
        let mut source = FontDbSource::default();
        source.db.load_system_fonts();
        log::debug!("Found {} system font faces", source.db.len());
        SystemFontSource(source)
    }

    /// A source that only knows fonts added explicitly.
    pub fn empty() -> SystemFontSource {
        SystemFontSource(FontDbSource::default())
    }

    pub fn load_font_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.0.db.load_font_file(path)?;
        Ok(())
    }

    pub fn load_font_data(&mut self, data: Vec<u8>) {
        self.0.db.load_font_data(data);
    }
}

impl Default for SystemFontSource {
    fn default() -> Self {
        SystemFontSource::new()
    }
}

impl FontSource for SystemFontSource {
    fn query(&self, name: &str) -> Option<u64> {
        self.0.query(name)
    }

    fn load(&mut self, id: FontId) -> Result<FontProgram> {
        self.0.load(id)
    }
}

struct FontDbSource {
    db: fontdb::Database,
}

impl Default for FontDbSource {
    fn default() -> Self {
        FontDbSource {
            db: fontdb::Database::new(),
        }
    }
}

impl FontSource for FontDbSource {
    fn query(&self, name: &str) -> Option<u64> {
        self.db
            .query(&fontdb::Query {
                families: &[fontdb_family(name)],
                ..Default::default()
            })
            .map(fontdb_id_to_u64)
    }

    fn load(&mut self, id: FontId) -> Result<FontProgram> {
        let (data, face_index) = unsafe {
            self.db
                .make_shared_face_data(fontdb_id_from_u64(id.opaque_id))
                .ok_or_else(|| Error::new(ErrorKind::UnknownFont, "failed to load font"))?
        };

        FontProgram::new(id, data, face_index)
    }
}

fn fontdb_family(name: &str) -> fontdb::Family<'_> {
    match name {
        "serif" => fontdb::Family::Serif,
        "sans-serif" => fontdb::Family::SansSerif,
        "cursive" => fontdb::Family::Cursive,
        "fantasy" => fontdb::Family::Fantasy,
        "monospace" => fontdb::Family::Monospace,
        name => fontdb::Family::Name(name),
    }
}

fn fontdb_id_to_u64(id: fontdb::ID) -> u64 {
    unsafe { std::mem::transmute(id) }
}

fn fontdb_id_from_u64(id: u64) -> fontdb::ID {
    unsafe { std::mem::transmute(id) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_knows_no_fonts() {
        let source = SystemFontSource::empty();
        assert_eq!(source.query("cmunrm"), None);
        assert_eq!(source.query("serif"), None);
    }

    #[test]
    fn missing_font_files_are_io_errors() {
        let mut source = SystemFontSource::empty();
        let error = source
            .load_font_file("/nonexistent/font/file.ttf")
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Io);
    }

    #[test]
    fn generic_families() {
        assert_eq!(fontdb_family("serif"), fontdb::Family::Serif);
        assert_eq!(fontdb_family("monospace"), fontdb::Family::Monospace);
        assert_eq!(fontdb_family("cmunrm"), fontdb::Family::Name("cmunrm"));
    }
}
