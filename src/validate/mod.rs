//! Content validity checks for series candidates.
//!
//! Directory discovery only looks at filenames. A [`SeriesValidator`] lets the
//! image-reading layer reject files that match the naming pattern but cannot be
//! read as part of the same series.
//!
//! Any `Fn(&Path) -> bool` closure is a validator, which keeps tests and
//! callers with their own readers simple. [`ImageHeaderValidator`] is the
//! built-in implementation backed by the `image` crate.

mod image_header;

use std::path::Path;

pub use image_header::ImageHeaderValidator;

/// Decides whether a candidate file belongs to the series.
pub trait SeriesValidator {
    /// Return `true` to keep `candidate` in the series.
    fn is_valid(&self, candidate: &Path) -> bool;
}

impl<F> SeriesValidator for F
where
    F: Fn(&Path) -> bool,
{
    fn is_valid(&self, candidate: &Path) -> bool {
        self(candidate)
    }
}
