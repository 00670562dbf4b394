//! Series evaluation: from one reference file to a [`LayoutSet`].
//!
//! ```text
//! reference ──▶ discovery ──▶ axis guess ──▶ delimited builder
//!                             (delimiters,         │
//!                              cardinality)        ▼
//!                                      required > candidates?
//!                                          │ yes        │ no
//!                                          ▼            ▼
//!                                 positional builder   keep
//! ```
//!
//! Two thresholds are evaluated independently:
//!
//! - `required_files > candidate_count` switches to the positional builder.
//! - `required_files > 2 * candidate_count` raises
//!   [`SeriesEvaluation::too_many_missing_files`], an informational flag a
//!   caller may use to ask for confirmation. It never blocks a result.
//!
//! Evaluation never fails. A missing reference or an empty directory produces
//! an empty [`LayoutSet`].

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::validate::SeriesValidator;

use super::discovery::{discover_series, select_candidates, SeriesFile};
use super::guess::{guess_axes, AxisAssignment};
use super::layout::{build_delimited, build_positional, LayoutSet, SeriesSizes};
use super::options::SeriesOptions;

/// Builder that produced the final layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LayoutStrategy {
    /// Coordinates taken from filename values.
    Delimited,
    /// Coordinates enumerated in canonical file order.
    Positional,
}

/// Outcome of one evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesEvaluation {
    /// One layout per series group; empty when no series was found.
    pub layouts: LayoutSet,

    /// Discovered axis sizes.
    pub sizes: SeriesSizes,

    /// Files a complete grid of `sizes` would contain.
    pub required_files: usize,

    /// Files that matched the reference pattern.
    pub candidate_count: usize,

    /// `required_files > 2 * candidate_count`.
    pub too_many_missing_files: bool,

    /// Builder used for `layouts`.
    pub strategy: LayoutStrategy,
}

impl SeriesEvaluation {
    fn empty() -> Self {
        Self {
            layouts: LayoutSet::default(),
            sizes: SeriesSizes::default(),
            required_files: 0,
            candidate_count: 0,
            too_many_missing_files: false,
            strategy: LayoutStrategy::Delimited,
        }
    }

    /// Whether a series was found at all.
    pub fn is_series(&self) -> bool {
        !self.layouts.is_empty()
    }

    /// Grid positions without a file.
    pub fn missing_files(&self) -> usize {
        self.required_files.saturating_sub(self.candidate_count)
    }
}

// =============================================================================
// SeriesEvaluator
// =============================================================================

/// Evaluates reference files against their directories.
///
/// Holds no state between calls: each [`evaluate`](Self::evaluate) lists the
/// directory again and starts from scratch.
pub struct SeriesEvaluator<'v> {
    options: SeriesOptions,
    validator: Option<&'v dyn SeriesValidator>,
}

impl<'v> SeriesEvaluator<'v> {
    /// Create an evaluator without content validation.
    pub fn new(options: SeriesOptions) -> Self {
        Self {
            options,
            validator: None,
        }
    }

    /// Check candidates with `validator` (up to the configured cap).
    pub fn with_validator(mut self, validator: &'v dyn SeriesValidator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Options in use.
    pub fn options(&self) -> &SeriesOptions {
        &self.options
    }

    /// Discover the series of `reference` on disk and build its layouts.
    pub fn evaluate(&self, reference: &Path) -> SeriesEvaluation {
        let candidates = discover_series(reference, &self.options, self.validator);
        let Some(reference) = SeriesFile::from_path(reference) else {
            return SeriesEvaluation::empty();
        };
        evaluate_candidates(&reference, &candidates, &self.options)
    }
}

impl std::fmt::Debug for SeriesEvaluator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeriesEvaluator")
            .field("options", &self.options)
            .field("validator", &self.validator.is_some())
            .finish()
    }
}

// =============================================================================
// Entry points
// =============================================================================

/// Evaluate the series of `reference` on disk.
///
/// Shorthand for [`SeriesEvaluator`] with an optional validator.
pub fn evaluate_files(
    reference: &Path,
    options: &SeriesOptions,
    validator: Option<&dyn SeriesValidator>,
) -> SeriesEvaluation {
    let evaluator = SeriesEvaluator::new(options.clone());
    match validator {
        Some(validator) => evaluator.with_validator(validator).evaluate(reference),
        None => evaluator.evaluate(reference),
    }
}

/// Evaluate a series from file names without touching the filesystem.
///
/// `names` plays the role of the directory listing; names not following the
/// reference pattern are dropped as discovery would. The reference itself is
/// only used as a pattern and does not need to be among `names`.
pub fn evaluate_names<I, P>(
    reference: &Path,
    names: I,
    options: &SeriesOptions,
) -> SeriesEvaluation
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    let Some(reference) = SeriesFile::from_path(reference) else {
        return SeriesEvaluation::empty();
    };
    let candidates = select_candidates(&reference, names.into_iter().map(Into::into), options);
    evaluate_candidates(&reference, &candidates, options)
}

/// Guess axes over `candidates` and build layouts, choosing the builder.
pub fn evaluate_candidates(
    reference: &SeriesFile,
    candidates: &[SeriesFile],
    options: &SeriesOptions,
) -> SeriesEvaluation {
    if candidates.is_empty() {
        return SeriesEvaluation::empty();
    }

    let assignment = guess_axes(reference, candidates, &options.delimiters, options.tiling);
    let (delimited, sizes) = build_delimited(candidates, &assignment);

    let candidate_count = candidates.len();
    let required_files = sizes.required_files();
    let too_many_missing_files = required_files > candidate_count.saturating_mul(2);

    let (layouts, strategy) = if required_files > candidate_count {
        let positional = build_positional(candidates, &assignment, &sizes);
        (positional, LayoutStrategy::Positional)
    } else {
        (delimited, LayoutStrategy::Delimited)
    };

    log_outcome(reference, &assignment, required_files, candidate_count, strategy);

    SeriesEvaluation {
        layouts,
        sizes,
        required_files,
        candidate_count,
        too_many_missing_files,
        strategy,
    }
}

fn log_outcome(
    reference: &SeriesFile,
    assignment: &AxisAssignment,
    required_files: usize,
    candidate_count: usize,
    strategy: LayoutStrategy,
) {
    debug!(
        "Series of {}: axes {:?}, {} required / {} found, {:?} layout",
        reference.name(),
        assignment.axes(),
        required_files,
        candidate_count,
        strategy
    );
}

// =============================================================================
// Tests
// =============================================================================
