//! Axis guessing for numeric filename blocks.
//!
//! Every numeric block of the reference filename is assigned at most one axis,
//! in two passes:
//!
//! 1. **Delimiters.** The text preceding the block is tested against the
//!    configured suffixes of each axis in [`DELIMITER_PRIORITY`] order. The
//!    first axis not already claimed by an earlier block wins.
//! 2. **Cardinality.** Remaining blocks are ranked by how many distinct values
//!    they take across all candidates, largest first, and handed the unclaimed
//!    axes in [`CARDINALITY_PRIORITY`] order. Z stacks are usually the longest
//!    axis, then time series, then channels.
//!
//! X and Y take part in neither pass unless tiling is enabled. Blocks left
//! without an axis are ignored by the layout builders.

use std::collections::BTreeSet;

use serde::Serialize;

use super::axis::Axis;
use super::delimiters::DelimiterSet;
use super::discovery::SeriesFile;

/// Axis order tried when matching delimiters.
pub const DELIMITER_PRIORITY: [Axis; 6] = [
    Axis::X,
    Axis::Y,
    Axis::Z,
    Axis::Channel,
    Axis::Time,
    Axis::SeriesGroup,
];

/// Axis order handed out to blocks of decreasing cardinality.
pub const CARDINALITY_PRIORITY: [Axis; 5] = [Axis::Z, Axis::Time, Axis::Channel, Axis::Y, Axis::X];

// =============================================================================
// Assignment
// =============================================================================

/// How an axis was attached to a numeric block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AxisSource {
    /// A configured delimiter preceded the block.
    Delimiter,
    /// The block was ranked by its number of distinct values.
    Cardinality,
}

/// An axis attached to a numeric block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AssignedAxis {
    pub axis: Axis,
    pub source: AxisSource,
}

/// Axis per numeric block of the reference filename; `None` is unassigned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AxisAssignment {
    positions: Vec<Option<AssignedAxis>>,
}

impl AxisAssignment {
    /// An assignment with every block unassigned.
    pub fn unassigned(len: usize) -> Self {
        Self {
            positions: vec![None; len],
        }
    }

    /// Number of numeric blocks covered.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether there are no numeric blocks.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Axis at a block position.
    pub fn axis_at(&self, position: usize) -> Option<Axis> {
        self.get(position).map(|assigned| assigned.axis)
    }

    /// Assignment details at a block position.
    pub fn get(&self, position: usize) -> Option<AssignedAxis> {
        self.positions.get(position).copied().flatten()
    }

    /// Block position holding `axis`, if any.
    pub fn position_of(&self, axis: Axis) -> Option<usize> {
        self.positions
            .iter()
            .position(|assigned| assigned.is_some_and(|a| a.axis == axis))
    }

    /// Whether some block holds `axis`.
    pub fn contains(&self, axis: Axis) -> bool {
        self.position_of(axis).is_some()
    }

    /// Assigned blocks in filename order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, AssignedAxis)> + '_ {
        self.positions
            .iter()
            .enumerate()
            .filter_map(|(position, assigned)| assigned.map(|a| (position, a)))
    }

    /// Axis per block, `None` for unassigned.
    pub fn axes(&self) -> Vec<Option<Axis>> {
        self.positions.iter().map(|a| a.map(|a| a.axis)).collect()
    }

    fn assign(&mut self, position: usize, axis: Axis, source: AxisSource) {
        self.positions[position] = Some(AssignedAxis { axis, source });
    }
}

// =============================================================================
// Guessing
// =============================================================================

/// Run both passes for `reference` over the candidate set.
pub fn guess_axes(
    reference: &SeriesFile,
    candidates: &[SeriesFile],
    delimiters: &DelimiterSet,
    tiling: bool,
) -> AxisAssignment {
    let mut assignment = assign_by_delimiters(reference, delimiters, tiling);
    assign_by_cardinality(&mut assignment, candidates, tiling);
    assignment
}

/// Pass A: match the text before each numeric block against the delimiters.
pub fn assign_by_delimiters(
    reference: &SeriesFile,
    delimiters: &DelimiterSet,
    tiling: bool,
) -> AxisAssignment {
    let tokens = reference.tokens();
    let mut assignment = AxisAssignment::unassigned(tokens.len());

    for position in 0..tokens.len() {
        let Some(text) = tokens.text_before(position) else {
            continue;
        };

        let matched = DELIMITER_PRIORITY
            .iter()
            .copied()
            .filter(|axis| tiling || !axis.is_tile())
            .filter(|&axis| !assignment.contains(axis))
            .find(|&axis| delimiters.matches(axis, text));

        if let Some(axis) = matched {
            assignment.assign(position, axis, AxisSource::Delimiter);
        }
    }

    assignment
}

/// Pass B: hand unclaimed axes to unassigned blocks by distinct-value count.
pub fn assign_by_cardinality(
    assignment: &mut AxisAssignment,
    candidates: &[SeriesFile],
    tiling: bool,
) {
    let counts = distinct_value_counts(candidates, assignment.len());

    let mut open: Vec<usize> = (0..assignment.len())
        .filter(|&position| assignment.get(position).is_none())
        .collect();
    // Stable: equal counts keep filename order
    open.sort_by(|a, b| counts[*b].cmp(&counts[*a]));

    let axes = CARDINALITY_PRIORITY
        .iter()
        .copied()
        .filter(|axis| tiling || !axis.is_tile())
        .filter(|&axis| !assignment.contains(axis))
        .collect::<Vec<_>>();

    for (position, axis) in open.into_iter().zip(axes) {
        assignment.assign(position, axis, AxisSource::Cardinality);
    }
}

/// Number of distinct values seen at each numeric block position.
pub fn distinct_value_counts(candidates: &[SeriesFile], len: usize) -> Vec<usize> {
    let mut seen = vec![BTreeSet::new(); len];

    for file in candidates {
        for (values, &number) in seen.iter_mut().zip(file.tokens().numbers()) {
            values.insert(number);
        }
    }

    seen.iter().map(BTreeSet::len).collect()
}

// =============================================================================
// Tests
// =============================================================================
