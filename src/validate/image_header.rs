//! Validator that compares image headers against the reference file.

use std::path::Path;

use image::ImageReader;
use tracing::trace;

use crate::error::ValidatorError;

use super::SeriesValidator;

/// Accepts a candidate when its image header decodes and its pixel
/// dimensions equal those of the reference file.
///
/// Only the header is read; pixel data is never decoded. The format is sniffed
/// from the file content, so a mis-named file is still recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeaderValidator {
    width: u32,
    height: u32,
}

impl ImageHeaderValidator {
    /// Read the reference header and build a validator for its series.
    ///
    /// # Errors
    ///
    /// Returns [`ValidatorError::Unreadable`] if the reference file cannot be
    /// opened or its format is not recognized.
    pub fn for_reference(reference: &Path) -> Result<Self, ValidatorError> {
        let (width, height) = read_dimensions(reference)?;
        Ok(Self { width, height })
    }

    /// Plane dimensions every candidate has to match.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl SeriesValidator for ImageHeaderValidator {
    fn is_valid(&self, candidate: &Path) -> bool {
        match read_dimensions(candidate) {
            Ok(dimensions) => dimensions == (self.width, self.height),
            Err(e) => {
                trace!("Rejecting {}: {}", candidate.display(), e);
                false
            }
        }
    }
}

/// Read `(width, height)` from an image header.
fn read_dimensions(path: &Path) -> Result<(u32, u32), ValidatorError> {
    let unreadable = |message: String| ValidatorError::Unreadable {
        path: path.display().to_string(),
        message,
    };

    ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| unreadable(e.to_string()))?
        .into_dimensions()
        .map_err(|e| unreadable(e.to_string()))
}

// =============================================================================
// Tests
// =============================================================================
