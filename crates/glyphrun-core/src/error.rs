use std::error::Error as StdError;
use std::fmt::{self, Debug, Display};

/// An alias for [`Result<T>`](std::result::Result) with [`Error`] as the error
/// type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A list of various error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A generic error that doesn't fall under any other category.
    Other,

    /// A cached failure, which means an error has already been reported in a
    /// previous operation.
    CachedFailure,
    /// Failed to parse a font program.
    InvalidFont,
    /// Font size is not a positive finite number, or doesn't fit the engine
    /// scale.
    InvalidFontSize,
    /// No font source knows the requested font.
    UnknownFont,
    /// The font is not an outline font (e.g. a bitmap-only font), so it can't
    /// be shaped.
    UnsupportedFontKind,
    /// A generic IO error.
    Io,
}

/// A general purpose error type.
pub struct Error {
    repr: Box<Repr>,
}

struct Repr {
    kind: ErrorKind,
    message: String,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    /// Creates an [`Error`] with the provided [`ErrorKind`] and a text message.
    pub fn new<T: Display>(kind: ErrorKind, message: T) -> Error {
        Error {
            repr: Box::new(Repr {
                kind,
                message: message.to_string(),
                source: None,
            }),
        }
    }

    /// Wraps a foreign error into this type, additionally providing an
    /// [`ErrorKind`] for it.
    pub fn wrap<E: StdError + Send + Sync + 'static>(kind: ErrorKind, source: E) -> Error {
        Error::new(kind, source.to_string()).with_source(source)
    }

    /// Specifies a source error for this one.
    pub fn with_source<E: StdError + Send + Sync + 'static>(mut self, source: E) -> Error {
        self.repr.source = Some(Box::new(source));
        self
    }

    /// Creates a new error, which has the same [`ErrorKind`] as `self`, `self`
    /// as source, but a different message.
    ///
    /// This is intended for providing additional context, for example the name
    /// of the font which caused an error.
    pub fn with_context<T: Display>(self, context: T) -> Error {
        Error {
            repr: Box::new(Repr {
                kind: self.repr.kind,
                message: context.to_string(),
                source: Some(Box::new(self)),
            }),
        }
    }

    /// Returns the corresponding [`ErrorKind`] for this error.
    pub fn kind(&self) -> ErrorKind {
        self.repr.kind
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.repr.message)
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr.source {
            Some(source) => {
                write!(f, "{}, caused by: {:?}", self.repr.message, source)
            }
            None => {
                write!(f, "{}", self.repr.message)
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.repr.source.as_ref().map(|v| (&**v) as &dyn StdError)
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Error {
        Error::wrap(ErrorKind::Io, error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_keeps_kind_and_chains_source() {
        let error = Error::new(ErrorKind::UnsupportedFontKind, "bitmap-only font")
            .with_context("failed to shape text with font \"Emoji\"");

        assert_eq!(error.kind(), ErrorKind::UnsupportedFontKind);
        assert_eq!(
            error.to_string(),
            "failed to shape text with font \"Emoji\""
        );

        let source = error.source().map(|v| v.to_string());
        assert_eq!(source.as_deref(), Some("bitmap-only font"));
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.ttf");
        let error = Error::from(io);
        assert_eq!(error.kind(), ErrorKind::Io);
    }
}
