//! File series inference.
//!
//! Microscopes often write one file per plane: `cells_Z003_C1_T12.tif`. This
//! module rebuilds the multi-dimensional dataset from such a directory.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            SeriesEvaluator              │
//! │  (chooses builder, confidence signal)   │
//! └────────────────────┬────────────────────┘
//!                      │
//!          ┌───────────┼────────────────┐
//!          ▼           ▼                ▼
//! ┌──────────────┐ ┌──────────┐ ┌──────────────────┐
//! │  discovery   │ │  guess   │ │      layout      │
//! │ (siblings,   │ │ (axis per│ │ (delimited and   │
//! │  validator)  │ │  number) │ │  positional)     │
//! └──────┬───────┘ └────┬─────┘ └──────────────────┘
//!        └──────┬───────┘
//!               ▼
//! ┌─────────────────────────────────────────┐
//! │     tokenizer  ·  delimiters  ·  axis   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//! use plane_series::series::{SeriesEvaluator, SeriesOptions};
//!
//! let evaluator = SeriesEvaluator::new(SeriesOptions::default());
//! let result = evaluator.evaluate(Path::new("data/cells_Z000_C0.tif"));
//!
//! for (group, layout) in result.layouts.iter().enumerate() {
//!     println!("group {group}: {} planes, extent {}", layout.len(), layout.extent());
//! }
//! if result.too_many_missing_files {
//!     println!("many planes are missing; check the delimiters");
//! }
//! ```

mod axis;
mod delimiters;
mod discovery;
mod evaluate;
mod guess;
mod interchange;
mod layout;
mod options;
mod tokenizer;

pub use axis::{Axis, Index};
pub use delimiters::{
    DelimiterSet, DEFAULT_CHANNEL_DELIMITERS, DEFAULT_GROUP_DELIMITERS, DEFAULT_TIME_DELIMITERS,
    DEFAULT_X_DELIMITERS, DEFAULT_Y_DELIMITERS, DEFAULT_Z_DELIMITERS,
};
pub use discovery::{discover_series, select_candidates, sort_canonical, SeriesFile};
pub use evaluate::{
    evaluate_candidates, evaluate_files, evaluate_names, LayoutStrategy, SeriesEvaluation,
    SeriesEvaluator,
};
pub use guess::{
    assign_by_cardinality, assign_by_delimiters, distinct_value_counts, guess_axes, AssignedAxis,
    AxisAssignment, AxisSource, CARDINALITY_PRIORITY, DELIMITER_PRIORITY,
};
pub use interchange::{decode_layout, encode_layout};
pub use layout::{
    build_delimited, build_positional, compute_sizes, DimensionSize, FileLayout, LayoutSet,
    SeriesSizes,
};
pub use options::{SeriesOptions, DEFAULT_VALIDITY_CHECK_CAP};
pub use tokenizer::FilenameTokens;
