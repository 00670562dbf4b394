//! Directory series discovery.
//!
//! Starting from one reference file, collects the sibling files that share
//! its naming pattern: same non-numeric blocks (case-insensitive), same
//! number of numeric blocks, and by default the same extension.
//!
//! # Ordering
//!
//! Candidates are returned in canonical order, independent of the order the
//! filesystem lists them in:
//!
//! 1. numeric blocks, compared element-wise
//! 2. non-numeric blocks
//! 3. the raw filename

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::validate::SeriesValidator;

use super::options::SeriesOptions;
use super::tokenizer::FilenameTokens;

// =============================================================================
// SeriesFile
// =============================================================================

/// A file taking part in a series, with its tokenized stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesFile {
    path: PathBuf,
    name: String,
    extension: Option<String>,
    tokens: FilenameTokens,
}

impl SeriesFile {
    /// Build from a path. Returns `None` if the file name is missing or not UTF-8.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let name = path.file_name()?.to_str()?.to_string();
        let stem = path.file_stem()?.to_str()?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);
        let tokens = FilenameTokens::parse(stem);

        Some(Self {
            path,
            name,
            extension,
            tokens,
        })
    }

    /// Full path as given.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name including extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lower-cased extension, if any.
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    /// Tokenized stem.
    pub fn tokens(&self) -> &FilenameTokens {
        &self.tokens
    }

    /// Canonical series order (see module docs).
    pub fn canonical_cmp(&self, other: &SeriesFile) -> Ordering {
        self.tokens
            .numbers()
            .cmp(other.tokens.numbers())
            .then_with(|| self.tokens.texts().cmp(other.tokens.texts()))
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.path.cmp(&other.path))
    }

    /// Whether `self` follows the naming pattern of `reference`.
    pub fn matches_pattern(&self, reference: &SeriesFile, options: &SeriesOptions) -> bool {
        if !self.tokens.same_texts(&reference.tokens) {
            return false;
        }

        if options.match_extension && self.extension != reference.extension {
            return false;
        }

        if let Some(free) = options.trailing_limit() {
            let fixed = reference.tokens.len().saturating_sub(free);
            if self.tokens.numbers()[..fixed] != reference.tokens.numbers()[..fixed] {
                return false;
            }
        }

        true
    }
}

// =============================================================================
// Discovery
// =============================================================================

/// Sort candidates into canonical order and drop duplicate paths.
pub fn sort_canonical(files: &mut Vec<SeriesFile>) {
    files.sort_by(SeriesFile::canonical_cmp);
    files.dedup_by(|a, b| a.path == b.path);
}

/// Keep the files of `paths` that follow the reference's naming pattern.
///
/// Purely name-based; no filesystem access. The result is in canonical order.
pub fn select_candidates<I>(
    reference: &SeriesFile,
    paths: I,
    options: &SeriesOptions,
) -> Vec<SeriesFile>
where
    I: IntoIterator<Item = PathBuf>,
{
    let mut files: Vec<SeriesFile> = paths
        .into_iter()
        .filter_map(SeriesFile::from_path)
        .filter(|file| file.matches_pattern(reference, options))
        .collect();

    sort_canonical(&mut files);
    files
}

/// Scan the reference's directory for the files of its series.
///
/// Returns an empty list when the reference is not an existing file or its
/// directory cannot be listed. When a validator is given, the first
/// `options.validity_check_cap` candidates other than the reference are
/// checked with it; later candidates are accepted unchecked.
pub fn discover_series(
    reference: &Path,
    options: &SeriesOptions,
    validator: Option<&dyn SeriesValidator>,
) -> Vec<SeriesFile> {
    if !reference.is_file() {
        debug!("Reference {} is not a file", reference.display());
        return Vec::new();
    }

    let Some(reference_file) = SeriesFile::from_path(reference) else {
        debug!("Reference {} has no usable file name", reference.display());
        return Vec::new();
    };

    let directory = match reference.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let entries = match fs::read_dir(&directory) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Cannot list {}: {}", directory.display(), e);
            return Vec::new();
        }
    };

    let paths = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file());

    let candidates = select_candidates(&reference_file, paths, options);
    debug!(
        "Found {} candidate(s) for {} in {}",
        candidates.len(),
        reference_file.name(),
        directory.display()
    );

    match validator {
        Some(validator) => apply_validator(&reference_file, candidates, validator, options),
        None => candidates,
    }
}

/// Drop candidates the validator rejects, checking at most the cap.
fn apply_validator(
    reference: &SeriesFile,
    candidates: Vec<SeriesFile>,
    validator: &dyn SeriesValidator,
    options: &SeriesOptions,
) -> Vec<SeriesFile> {
    let mut checked = 0;

    candidates
        .into_iter()
        .filter(|file| {
            if file.name == reference.name {
                return true;
            }
            if checked >= options.validity_check_cap {
                return true;
            }
            checked += 1;

            let valid = validator.is_valid(&file.path);
            if !valid {
                trace!("Validator rejected {}", file.path.display());
            }
            valid
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
