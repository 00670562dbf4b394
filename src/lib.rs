//! # plane-series
//!
//! Rebuilds multi-dimensional microscopy datasets from directories of
//! single-plane image files.
//!
//! Acquisition software often writes one file per focal plane, channel, time
//! point or tile, and encodes the coordinate in the file name
//! (`cells_Z012_C1_T003.tif`). Given any one of those files, this library
//! finds its siblings, works out which number in the name belongs to which
//! axis, and produces a layout mapping each file to its
//! `(X, Y, Z, Channel, Time)` coordinate.
//!
//! ## Features
//!
//! - **Delimiter matching**: configurable per-axis suffixes such as `_Z` or `_CH`
//! - **Cardinality heuristic**: unlabeled numbers are assigned by how many values they take
//! - **Positional fallback**: sparse numbering is compacted into a contiguous grid
//! - **Series groups**: independent scenes in one directory become separate layouts
//! - **Content validation**: optional image header checks on candidates
//! - **Persistence**: layouts round-trip through a small XML text form
//!
//! ## Architecture
//!
//! - [`series`] - tokenizer, discovery, axis guessing, layout builders, evaluation
//! - [`validate`] - content validity checks for candidates
//! - [`config`] - CLI and configuration types
//! - [`error`] - error types
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use plane_series::{encode_layout, SeriesEvaluator, SeriesOptions};
//!
//! let evaluator = SeriesEvaluator::new(SeriesOptions::default().with_tiling(false));
//! let evaluation = evaluator.evaluate(Path::new("stack/cells_Z000_C0.tif"));
//!
//! println!("sizes: {}", evaluation.sizes.index);
//! for layout in &evaluation.layouts {
//!     println!("{}", encode_layout(layout));
//! }
//! ```

pub mod config;
pub mod error;
pub mod series;
pub mod validate;

// Re-export commonly used types
pub use config::{Cli, Command, InferConfig, InspectConfig, OutputFormat};
pub use error::{InterchangeError, SeriesError, ValidatorError};
pub use series::{
    decode_layout, encode_layout, evaluate_files, evaluate_names, Axis, AxisAssignment,
    AxisSource, DelimiterSet, DimensionSize, FileLayout, FilenameTokens, Index, LayoutSet,
    LayoutStrategy, SeriesEvaluation, SeriesEvaluator, SeriesFile, SeriesOptions, SeriesSizes,
    DEFAULT_VALIDITY_CHECK_CAP,
};
pub use validate::{ImageHeaderValidator, SeriesValidator};
