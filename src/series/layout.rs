//! File layouts and the two layout builders.
//!
//! A [`FileLayout`] maps every file of one dataset to its `(X, Y, Z, C, T)`
//! coordinate. A [`LayoutSet`] holds one layout per series group; without a
//! group axis it holds exactly one.
//!
//! # Builders
//!
//! - [`build_delimited`] reads each coordinate straight from the filename
//!   number assigned to its axis, re-based so the smallest value is zero.
//! - [`build_positional`] ignores the values and walks the files in
//!   canonical order through a mixed-radix counter sized by the axis sizes.
//!   It is used when the values leave gaps the file count cannot fill.
//!
//! Neither builder allocates more layouts than there are files. A group
//! range wider than the file count cannot be a complete series, so those
//! layouts are kept only where files landed.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use super::axis::{Axis, Index};
use super::discovery::SeriesFile;
use super::guess::{AxisAssignment, AxisSource};

// =============================================================================
// FileLayout
// =============================================================================

/// Filename to coordinate map for one addressable dataset.
///
/// Keys are unique; iteration is in path order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileLayout {
    files: BTreeMap<PathBuf, Index>,
}

impl FileLayout {
    /// An empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the coordinate of a file.
    ///
    /// Returns the previous coordinate if the file was already present.
    pub fn insert(&mut self, path: impl Into<PathBuf>, index: Index) -> Option<Index> {
        self.files.insert(path.into(), index)
    }

    /// Coordinate of a file.
    pub fn get(&self, path: &Path) -> Option<Index> {
        self.files.get(path).copied()
    }

    /// Whether the layout holds `path`.
    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    /// The file stored at a coordinate.
    ///
    /// When several files share a coordinate the first in path order is
    /// returned.
    pub fn file_at(&self, index: Index) -> Option<&Path> {
        self.files
            .iter()
            .find(|(_, &i)| i == index)
            .map(|(path, _)| path.as_path())
    }

    /// Number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the layout has no files.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Files and coordinates in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, Index)> + '_ {
        self.files.iter().map(|(path, &index)| (path.as_path(), index))
    }

    /// Per-axis `max + 1` over all coordinates; `Index::zero()` when empty.
    pub fn extent(&self) -> Index {
        self.files.values().fold(Index::zero(), |acc, index| {
            Index::new(
                acc.x.max(index.x + 1),
                acc.y.max(index.y + 1),
                acc.z.max(index.z + 1),
                acc.c.max(index.c + 1),
                acc.t.max(index.t + 1),
            )
        })
    }

    /// Number of distinct coordinates used.
    pub fn distinct_indices(&self) -> usize {
        let mut indices: Vec<Index> = self.files.values().copied().collect();
        indices.sort_unstable();
        indices.dedup();
        indices.len()
    }
}

impl FromIterator<(PathBuf, Index)> for FileLayout {
    fn from_iter<I: IntoIterator<Item = (PathBuf, Index)>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// LayoutSet
// =============================================================================

/// One [`FileLayout`] per series group, in group order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LayoutSet {
    layouts: Vec<FileLayout>,
}

impl LayoutSet {
    /// `count` empty layouts.
    pub fn with_groups(count: usize) -> Self {
        Self {
            layouts: vec![FileLayout::new(); count],
        }
    }

    /// Number of layouts.
    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    /// Whether there are no layouts ("not a series").
    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    /// Layout of a group.
    pub fn get(&self, group: usize) -> Option<&FileLayout> {
        self.layouts.get(group)
    }

    /// Layouts in group order.
    pub fn iter(&self) -> std::slice::Iter<'_, FileLayout> {
        self.layouts.iter()
    }

    /// Files across all layouts.
    pub fn total_files(&self) -> usize {
        self.layouts.iter().map(FileLayout::len).sum()
    }

    /// Whether any layout holds `path`.
    pub fn contains(&self, path: &Path) -> bool {
        self.layouts.iter().any(|layout| layout.contains(path))
    }

    /// Consume into the layouts.
    pub fn into_layouts(self) -> Vec<FileLayout> {
        self.layouts
    }

    fn insert(&mut self, group: usize, path: &Path, index: Index) {
        if let Some(layout) = self.layouts.get_mut(group) {
            layout.insert(path, index);
        }
    }

    /// Assemble group layouts collected by group number.
    ///
    /// With at most `file_count` groups every group gets a layout, empty or
    /// not. A wider range keeps only the populated groups, in group order.
    fn from_groups(
        groups: usize,
        file_count: usize,
        grouped: BTreeMap<usize, FileLayout>,
    ) -> Self {
        if groups > file_count {
            return Self::from(grouped.into_values().collect::<Vec<_>>());
        }

        let mut set = Self::with_groups(groups);
        for (group, layout) in grouped {
            if let Some(slot) = set.layouts.get_mut(group) {
                *slot = layout;
            }
        }
        set
    }
}

impl From<Vec<FileLayout>> for LayoutSet {
    fn from(layouts: Vec<FileLayout>) -> Self {
        Self { layouts }
    }
}

impl<'a> IntoIterator for &'a LayoutSet {
    type Item = &'a FileLayout;
    type IntoIter = std::slice::Iter<'a, FileLayout>;

    fn into_iter(self) -> Self::IntoIter {
        self.layouts.iter()
    }
}

// =============================================================================
// Sizes
// =============================================================================

/// Cardinality discovered for one assigned axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DimensionSize {
    pub axis: Axis,
    /// `max - min + 1` over the values at the axis' filename block.
    pub size: usize,
    pub source: AxisSource,
    /// Numeric block of the reference filename holding this axis.
    pub position: usize,
}

/// Axis sizes of an evaluated series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesSizes {
    /// Size per coordinate axis; unassigned axes are 1.
    pub index: Index,
    /// Number of series groups (1 without a group axis).
    pub groups: usize,
    /// Assigned axes in filename order.
    pub dimensions: Vec<DimensionSize>,
}

impl Default for SeriesSizes {
    fn default() -> Self {
        Self {
            index: Index::ones(),
            groups: 1,
            dimensions: Vec::new(),
        }
    }
}

impl SeriesSizes {
    /// Files a complete grid would need: product of sizes times groups.
    pub fn required_files(&self) -> usize {
        self.index.product().saturating_mul(self.groups)
    }

    /// Size of one axis (group count for [`Axis::SeriesGroup`]).
    pub fn size_of(&self, axis: Axis) -> usize {
        self.index.get(axis).unwrap_or(self.groups)
    }
}

// =============================================================================
// Delimited builder
// =============================================================================

/// Minimum and maximum value at each numeric block position.
fn value_ranges(files: &[SeriesFile], len: usize) -> Vec<Option<(u64, u64)>> {
    let mut ranges = vec![None; len];

    for file in files {
        for (range, &value) in ranges.iter_mut().zip(file.tokens().numbers()) {
            *range = Some(match *range {
                Some((lo, hi)) => (value.min(lo), value.max(hi)),
                None => (value, value),
            });
        }
    }

    ranges
}

/// Axis sizes implied by the assignment: `max - min + 1` per assigned block.
pub fn compute_sizes(files: &[SeriesFile], assignment: &AxisAssignment) -> SeriesSizes {
    let ranges = value_ranges(files, assignment.len());
    let mut sizes = SeriesSizes::default();

    for (position, assigned) in assignment.iter() {
        let Some((lo, hi)) = ranges[position] else {
            continue;
        };
        let size = usize::try_from(hi - lo)
            .unwrap_or(usize::MAX)
            .saturating_add(1);

        match assigned.axis {
            Axis::SeriesGroup => sizes.groups = size,
            axis => sizes.index.set(axis, size),
        }

        sizes.dimensions.push(DimensionSize {
            axis: assigned.axis,
            size,
            source: assigned.source,
            position,
        });
    }

    sizes
}

/// Build layouts from filename values.
///
/// Each coordinate is the value at the block assigned to that axis minus the
/// smallest value seen there. A group block selects the layout. Unassigned
/// blocks do not contribute. Files whose block count differs from the
/// assignment are skipped.
///
/// One layout per group value in the group range, unless the range is wider
/// than the file count; then only populated groups get a layout.
pub fn build_delimited(
    files: &[SeriesFile],
    assignment: &AxisAssignment,
) -> (LayoutSet, SeriesSizes) {
    let sizes = compute_sizes(files, assignment);
    let ranges = value_ranges(files, assignment.len());
    let mut grouped: BTreeMap<usize, FileLayout> = BTreeMap::new();

    for file in files {
        let numbers = file.tokens().numbers();
        if numbers.len() != assignment.len() {
            continue;
        }

        let mut index = Index::zero();
        let mut group = 0;

        for (position, assigned) in assignment.iter() {
            let minimum = ranges[position].map_or(0, |(lo, _)| lo);
            let offset = usize::try_from(numbers[position] - minimum).unwrap_or(usize::MAX);

            match assigned.axis {
                Axis::SeriesGroup => group = offset,
                axis => index.set(axis, offset),
            }
        }

        grouped.entry(group).or_default().insert(file.path(), index);
    }

    if sizes.groups > files.len() {
        debug!(
            "{} series groups for {} files; keeping populated groups only",
            sizes.groups,
            files.len()
        );
    }
    let layouts = LayoutSet::from_groups(sizes.groups, files.len(), grouped);

    (layouts, sizes)
}

// =============================================================================
// Positional builder
// =============================================================================

/// Mixed-radix counter over the assigned axes.
///
/// Digits follow filename block order: the last block varies fastest.
#[derive(Debug, Clone)]
struct Odometer {
    digits: Vec<(Axis, usize)>,
    values: Vec<usize>,
    wrapped: bool,
}

impl Odometer {
    fn new(assignment: &AxisAssignment, sizes: &SeriesSizes) -> Self {
        let digits: Vec<(Axis, usize)> = assignment
            .iter()
            .map(|(_, assigned)| (assigned.axis, sizes.size_of(assigned.axis).max(1)))
            .collect();
        let values = vec![0; digits.len()];

        Self {
            digits,
            values,
            wrapped: false,
        }
    }

    /// Current coordinate and group.
    fn position(&self) -> (Index, usize) {
        let mut index = Index::zero();
        let mut group = 0;

        for (&(axis, _), &value) in self.digits.iter().zip(&self.values) {
            match axis {
                Axis::SeriesGroup => group = value,
                axis => index.set(axis, value),
            }
        }

        (index, group)
    }

    /// Advance by one, carrying into slower digits.
    fn increment(&mut self) {
        for (value, &(_, radix)) in self.values.iter_mut().zip(&self.digits).rev() {
            *value += 1;
            if *value < radix {
                return;
            }
            *value = 0;
        }
        self.wrapped = true;
    }
}

/// Build layouts by enumerating coordinates in canonical file order.
///
/// Files are sorted canonically and assigned successive counter positions.
/// When the counter wraps around before the files run out, the remaining
/// files are left out; with fewer files than positions the tail of the grid
/// stays empty.
pub fn build_positional(
    files: &[SeriesFile],
    assignment: &AxisAssignment,
    sizes: &SeriesSizes,
) -> LayoutSet {
    let mut ordered: Vec<&SeriesFile> = files.iter().collect();
    ordered.sort_by(|a, b| a.canonical_cmp(b));

    // The group digit moves by at most one per file, so it never reaches
    // past the file count
    let reachable = sizes.groups.min(files.len()).max(1);
    let mut layouts = LayoutSet::with_groups(reachable);
    let mut odometer = Odometer::new(assignment, sizes);

    for file in ordered {
        if odometer.wrapped {
            break;
        }

        let (index, group) = odometer.position();
        layouts.insert(group, file.path(), index);
        odometer.increment();
    }

    layouts
}

// =============================================================================
// Tests
// =============================================================================
