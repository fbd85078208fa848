pub use glyphrun_core::*;

mod cache;
mod typesetter;

pub use self::cache::ShapeCache;
pub use self::typesetter::{draw_shaped, DrawOptions, Typesetter};

pub mod text {
    pub use glyphrun_core::text::*;
    use glyphrun_core::Result;
    #[cfg(feature = "fontdb")]
    pub use glyphrun_fontdb::SystemFontSource;
    #[cfg(feature = "rustybuzz")]
    pub use glyphrun_rustybuzz::RustybuzzShaper;

    #[derive(Debug, Default)]
    pub struct DefaultTextShaper {
        #[cfg(feature = "rustybuzz")]
        inner: glyphrun_rustybuzz::RustybuzzShaper,
    }

    impl DefaultTextShaper {
        pub fn new() -> DefaultTextShaper {
            DefaultTextShaper::default()
        }
    }

    impl TextShaper for DefaultTextShaper {
        #[cfg(feature = "rustybuzz")]
        fn shape(
            &self,
            program: &FontProgram,
            text: &str,
            size: f64,
            options: &ShapeOptions,
            scale: ScaleContext,
        ) -> Result<ShapeResult> {
            self.inner.shape(program, text, size, options, scale)
        }

        #[cfg(not(feature = "rustybuzz"))]
        fn shape(
            &self,
            _program: &FontProgram,
            _text: &str,
            _size: f64,
            _options: &ShapeOptions,
            _scale: ScaleContext,
        ) -> Result<ShapeResult> {
            Err(glyphrun_core::Error::new(
                glyphrun_core::ErrorKind::Other,
                "no text shaper enabled",
            ))
        }
    }

    /// A font database preloaded with the default sources: fonts registered
    /// by hand come first, then system fonts.
    pub fn default_font_database(fonts: MemoryFontSource) -> FontDatabase {
        let mut db = FontDatabase::new();
        db.add_source(fonts);
        #[cfg(feature = "fontdb")]
        db.add_source(glyphrun_fontdb::SystemFontSource::new());
        db
    }
}
