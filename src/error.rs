use std::fmt;

use thiserror::Error as ThisError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unknown or malformed field in the input document.
    Schema,
    EmptyDocument,
    TypeMismatch,
    Minifier,
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::Schema => "schema",
            ErrorKind::EmptyDocument => "empty document",
            ErrorKind::TypeMismatch => "type mismatch",
            ErrorKind::Minifier => "minifier",
            ErrorKind::Io => "io",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
    pub location: Option<Location>,
}

impl Error {
    pub fn schema(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Schema,
            message: message.into(),
            location: None,
        }
    }

    pub fn empty_document() -> Self {
        Self {
            kind: ErrorKind::EmptyDocument,
            message: "input document is empty".to_string(),
            location: None,
        }
    }

    pub fn type_mismatch(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::TypeMismatch,
            message: message.into(),
            location: None,
        }
    }

    pub fn minifier(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Minifier,
            message: message.into(),
            location: None,
        }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Io,
            message: message.into(),
            location: None,
        }
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::io(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        let location = err.location().map(|loc| Location {
            offset: loc.index(),
            line: loc.line(),
            column: loc.column(),
        });
        Error {
            kind: ErrorKind::Schema,
            message: err.to_string(),
            location,
        }
    }
}

#[cfg(feature = "lua-check")]
impl From<mlua::Error> for Error {
    fn from(err: mlua::Error) -> Self {
        Error::minifier(err.to_string())
    }
}
