use thiserror::Error;

/// Errors reading the text form of a file layout
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterchangeError {
    /// No `<FileLayout>` root element
    #[error("Missing <FileLayout> root element")]
    MissingRoot,

    /// A `File` element lacks a required attribute
    #[error("Missing attribute {attribute} in {element}")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },

    /// A coordinate is not a non-negative integer
    #[error("Invalid {attribute} coordinate for {file}: {value:?}")]
    InvalidCoordinate {
        file: String,
        attribute: &'static str,
        value: String,
    },

    /// The same file name appears twice
    #[error("Duplicate file entry: {0}")]
    DuplicateFile(String),
}

/// Errors setting up a content validator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidatorError {
    /// The reference image header cannot be read
    #[error("Cannot read image header of {path}: {message}")]
    Unreadable { path: String, message: String },
}

/// Top-level errors at the filesystem and persistence edges
#[derive(Debug, Error)]
pub enum SeriesError {
    /// Filesystem error on a path
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed layout text
    #[error("Layout error: {0}")]
    Interchange(#[from] InterchangeError),

    /// Validator could not be created
    #[error("Validator error: {0}")]
    Validator(#[from] ValidatorError),

    /// Report serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SeriesError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        SeriesError::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}
