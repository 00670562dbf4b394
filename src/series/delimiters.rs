//! Per-axis filename delimiters.
//!
//! A delimiter is a suffix of the non-numeric text that precedes a number in
//! a filename, e.g. `_Z` in `cells_Z004.tif`. Matching is case-insensitive, so
//! suffixes are stored upper-cased.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::axis::Axis;

/// Default X delimiters.
pub const DEFAULT_X_DELIMITERS: &str = "_X;-X";

/// Default Y delimiters.
pub const DEFAULT_Y_DELIMITERS: &str = "_Y;-Y";

/// Default Z delimiters.
pub const DEFAULT_Z_DELIMITERS: &str = "_Z;_S;-Z";

/// Default channel delimiters.
pub const DEFAULT_CHANNEL_DELIMITERS: &str = "_C;_CH;_W;-C";

/// Default time delimiters.
pub const DEFAULT_TIME_DELIMITERS: &str = "_T;_TP;-T";

/// Default series-group delimiters (none).
pub const DEFAULT_GROUP_DELIMITERS: &str = "";

/// Recognized suffixes for every axis.
///
/// This is a plain value: callers evaluating several series concurrently give
/// each evaluation its own copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelimiterSet {
    suffixes: BTreeMap<Axis, Vec<String>>,
}

impl Default for DelimiterSet {
    fn default() -> Self {
        let mut set = Self::empty();
        set.set(Axis::X, DEFAULT_X_DELIMITERS);
        set.set(Axis::Y, DEFAULT_Y_DELIMITERS);
        set.set(Axis::Z, DEFAULT_Z_DELIMITERS);
        set.set(Axis::Channel, DEFAULT_CHANNEL_DELIMITERS);
        set.set(Axis::Time, DEFAULT_TIME_DELIMITERS);
        set.set(Axis::SeriesGroup, DEFAULT_GROUP_DELIMITERS);
        set
    }
}

impl DelimiterSet {
    /// A set that recognizes nothing; every axis falls back to the size heuristic.
    pub fn empty() -> Self {
        Self {
            suffixes: Axis::ALL.iter().map(|&axis| (axis, Vec::new())).collect(),
        }
    }

    /// Replace the suffixes of one axis from a semicolon separated list.
    pub fn set(&mut self, axis: Axis, list: &str) {
        self.suffixes.insert(axis, parse_list(list));
    }

    /// Builder form of [`DelimiterSet::set`].
    pub fn with(mut self, axis: Axis, list: &str) -> Self {
        self.set(axis, list);
        self
    }

    /// Upper-cased suffixes recognized for an axis, in configured order.
    pub fn suffixes(&self, axis: Axis) -> &[String] {
        self.suffixes.get(&axis).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `text` ends with one of the axis suffixes (case-insensitive).
    pub fn matches(&self, axis: Axis, text: &str) -> bool {
        let upper = text.to_uppercase();
        self.suffixes(axis)
            .iter()
            .any(|suffix| upper.ends_with(suffix.as_str()))
    }

    /// Semicolon form of the axis suffixes, e.g. `"_Z;_S;-Z"`.
    pub fn to_list(&self, axis: Axis) -> String {
        self.suffixes(axis).join(";")
    }
}

/// Split a semicolon list, trimming entries and dropping empty ones.
///
/// Empty entries are dropped because an empty suffix would match every
/// position.
fn parse_list(list: &str) -> Vec<String> {
    list.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_uppercase)
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
