//! Options for one series evaluation.

use serde::{Deserialize, Serialize};

use super::delimiters::DelimiterSet;

/// Default number of candidates checked by a content validator.
pub const DEFAULT_VALIDITY_CHECK_CAP: usize = 10;

/// Everything an evaluation reads besides the reference path.
///
/// Owned by the caller and passed by reference into each evaluation; nothing
/// here is process-wide state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesOptions {
    /// Per-axis filename suffixes.
    pub delimiters: DelimiterSet,

    /// Allow X/Y (tile) axes to be inferred.
    pub tiling: bool,

    /// Only accept siblings with the reference's extension.
    pub match_extension: bool,

    /// When positive, only the last N numeric blocks may differ from the
    /// reference. `None` or `Some(0)` lets every block vary.
    pub max_trailing_counters: Option<usize>,

    /// How many candidates the validator is asked about; the rest are
    /// accepted unchecked.
    pub validity_check_cap: usize,
}

impl Default for SeriesOptions {
    fn default() -> Self {
        Self {
            delimiters: DelimiterSet::default(),
            tiling: false,
            match_extension: true,
            max_trailing_counters: None,
            validity_check_cap: DEFAULT_VALIDITY_CHECK_CAP,
        }
    }
}

impl SeriesOptions {
    /// Set the delimiters.
    pub fn with_delimiters(mut self, delimiters: DelimiterSet) -> Self {
        self.delimiters = delimiters;
        self
    }

    /// Enable or disable tile axis inference.
    pub fn with_tiling(mut self, tiling: bool) -> Self {
        self.tiling = tiling;
        self
    }

    /// Enable or disable extension matching.
    pub fn with_extension_matching(mut self, match_extension: bool) -> Self {
        self.match_extension = match_extension;
        self
    }

    /// Restrict variation to the last `count` numeric blocks.
    pub fn with_max_trailing_counters(mut self, count: usize) -> Self {
        self.max_trailing_counters = Some(count);
        self
    }

    /// Set how many candidates are passed to the validator.
    pub fn with_validity_check_cap(mut self, cap: usize) -> Self {
        self.validity_check_cap = cap;
        self
    }

    /// The effective trailing-counter restriction, if any.
    pub(crate) fn trailing_limit(&self) -> Option<usize> {
        self.max_trailing_counters.filter(|&n| n > 0)
    }
}
