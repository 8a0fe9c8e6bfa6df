use std::{
    fmt, io, num,
    path::{Path, PathBuf},
    str,
};

/// Coarse classification of a failed load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A file is missing or unreadable.
    Io,
    /// A file was read but its content is malformed.
    Format,
    /// A material library was required but not configured or not reachable.
    Config,
}

/// The three vertex pools a corner indexes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Position,
    TexCoord,
    Normal,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Attribute::Position => "position",
            Attribute::TexCoord => "texture coordinate",
            Attribute::Normal => "normal",
        })
    }
}

/// What is wrong with a single line.
#[derive(thiserror::Error, Debug)]
pub enum FormatError {
    #[error("Line is {length} bytes long, the limit is {limit}.")]
    LineTooLong { length: usize, limit: usize },
    #[error("Line is not valid UTF-8.")]
    InvalidEncoding(#[source] str::Utf8Error),
    #[error("Unknown keyword \"{0}\".")]
    UnknownKeyword(String),
    #[error("\"{directive}\" expects {expected} operands, found {found}.")]
    MissingOperand {
        directive: String,
        expected: usize,
        found: usize,
    },
    #[error("Failed to parse float \"{token}\".")]
    InvalidFloat {
        token: String,
        #[source]
        source: num::ParseFloatError,
    },
    #[error("Failed to parse index in corner \"{token}\".")]
    InvalidIndex {
        token: String,
        #[source]
        source: num::ParseIntError,
    },
    #[error("Corner \"{0}\" references index 0.")]
    ZeroIndex(String),
    #[error("Faces must have exactly 3 corners, found {0}.")]
    UnsupportedPolygon(usize),
    #[error("Face mixes corners with and without a {0}.")]
    MixedAttributes(Attribute),
    #[error("The {attribute} index {index} is out of range, {len} defined.")]
    IndexOutOfRange {
        attribute: Attribute,
        index: u32,
        len: usize,
    },
    #[error("\"{0}\" appears before any \"newmtl\".")]
    NoActiveMaterial(String),
}

impl FormatError {
    pub(super) fn missing(directive: &str, expected: usize, found: usize) -> Self {
        FormatError::MissingOperand {
            directive: directive.into(),
            expected,
            found,
        }
    }
}

/// A failed geometry or material load, naming the file and line.
#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("Could not read \"{}\".", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Format error in \"{}\" at line {line}.", .path.display())]
    Format {
        path: PathBuf,
        line: usize,
        #[source]
        source: FormatError,
    },
    #[error("\"{}\" requests a material library at line {line}, but no material file was configured.", .path.display())]
    MaterialNotConfigured { path: PathBuf, line: usize },
    #[error("Failed to load the material library requested by \"{}\" at line {line}.", .path.display())]
    Material {
        path: PathBuf,
        line: usize,
        #[source]
        source: Box<ParseError>,
    },
}

impl ParseError {
    pub(super) fn io(path: &Path, source: io::Error) -> Self {
        ParseError::Io {
            path: path.into(),
            source,
        }
    }

    pub(super) fn format(path: &Path, line: usize, source: FormatError) -> Self {
        ParseError::Format {
            path: path.into(),
            line,
            source,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ParseError::Io { .. } => ErrorCategory::Io,
            ParseError::Format { .. } => ErrorCategory::Format,
            ParseError::MaterialNotConfigured { .. } => ErrorCategory::Config,
            // an unreachable material file is a configuration problem, bad content is not
            ParseError::Material { source, .. } => match source.category() {
                ErrorCategory::Io => ErrorCategory::Config,
                category => category,
            },
        }
    }

    /// The file the error was raised in.
    pub fn path(&self) -> &Path {
        match self {
            ParseError::Io { path, .. }
            | ParseError::Format { path, .. }
            | ParseError::MaterialNotConfigured { path, .. }
            | ParseError::Material { path, .. } => path,
        }
    }

    /// 1-based line of the offending directive, if the error has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::Io { .. } => None,
            ParseError::Format { line, .. }
            | ParseError::MaterialNotConfigured { line, .. }
            | ParseError::Material { line, .. } => Some(*line),
        }
    }

    /// The line-level cause, following nested material errors.
    pub fn format_error(&self) -> Option<&FormatError> {
        match self {
            ParseError::Format { source, .. } => Some(source),
            ParseError::Material { source, .. } => source.format_error(),
            _ => None,
        }
    }
}
