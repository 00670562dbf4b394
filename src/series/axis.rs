//! Axes and coordinate tuples for file series.
//!
//! A file series addresses every plane file by a five component [`Index`]
//! `(X, Y, Z, Channel, Time)`. X and Y are tile positions within a plane and
//! only take part when tiling is enabled. [`Axis::SeriesGroup`] is not a
//! coordinate: it splits the files into independent layouts.

use std::fmt;
use std::ops::{Add, Div, Mul, Rem, Sub};

use serde::{Deserialize, Serialize};

// =============================================================================
// Axis
// =============================================================================

/// Semantic axis a numeric filename token can be assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Tile column within a plane.
    X,
    /// Tile row within a plane.
    Y,
    /// Focal plane.
    Z,
    /// Channel.
    Channel,
    /// Time point.
    Time,
    /// Partition of the files into independent layouts (e.g. scenes).
    SeriesGroup,
}

impl Axis {
    /// The five addressable axes, in `Index` component order.
    pub const COORDINATES: [Axis; 5] = [Axis::X, Axis::Y, Axis::Z, Axis::Channel, Axis::Time];

    /// Every axis, including the partition axis.
    pub const ALL: [Axis; 6] = [
        Axis::X,
        Axis::Y,
        Axis::Z,
        Axis::Channel,
        Axis::Time,
        Axis::SeriesGroup,
    ];

    /// Whether this axis is one of the five `Index` components.
    pub const fn is_coordinate(&self) -> bool {
        !matches!(self, Axis::SeriesGroup)
    }

    /// Whether this axis is a tile axis (only inferred when tiling is enabled).
    pub const fn is_tile(&self) -> bool {
        matches!(self, Axis::X | Axis::Y)
    }

    /// Short label used in reports and the interchange format.
    pub const fn label(&self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
            Axis::Channel => "C",
            Axis::Time => "T",
            Axis::SeriesGroup => "G",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Index
// =============================================================================

/// A `(X, Y, Z, Channel, Time)` coordinate.
///
/// The same type doubles as a size vector (per-axis cardinalities), which is
/// what the component-wise operators are for. They do no overflow or
/// division-by-zero checks beyond what the integer operators do.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Index {
    pub x: usize,
    pub y: usize,
    pub z: usize,
    pub c: usize,
    pub t: usize,
}

impl Index {
    /// Create an index from its five components.
    pub const fn new(x: usize, y: usize, z: usize, c: usize, t: usize) -> Self {
        Self { x, y, z, c, t }
    }

    /// The origin `(0, 0, 0, 0, 0)`.
    pub const fn zero() -> Self {
        Self::new(0, 0, 0, 0, 0)
    }

    /// All components set to one: the size vector of a single plane.
    pub const fn ones() -> Self {
        Self::new(1, 1, 1, 1, 1)
    }

    /// Get the component for an axis.
    ///
    /// Returns `None` for [`Axis::SeriesGroup`], which is not a component.
    pub const fn get(&self, axis: Axis) -> Option<usize> {
        match axis {
            Axis::X => Some(self.x),
            Axis::Y => Some(self.y),
            Axis::Z => Some(self.z),
            Axis::Channel => Some(self.c),
            Axis::Time => Some(self.t),
            Axis::SeriesGroup => None,
        }
    }

    /// Set the component for an axis. Setting [`Axis::SeriesGroup`] is a no-op.
    pub fn set(&mut self, axis: Axis, value: usize) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
            Axis::Z => self.z = value,
            Axis::Channel => self.c = value,
            Axis::Time => self.t = value,
            Axis::SeriesGroup => {}
        }
    }

    /// Product of all components (number of planes in a size vector).
    pub fn product(&self) -> usize {
        self.x
            .saturating_mul(self.y)
            .saturating_mul(self.z)
            .saturating_mul(self.c)
            .saturating_mul(self.t)
    }

    /// Whether every component of `self` is strictly below the matching size.
    pub fn fits_within(&self, sizes: &Index) -> bool {
        self.x < sizes.x
            && self.y < sizes.y
            && self.z < sizes.z
            && self.c < sizes.c
            && self.t < sizes.t
    }

    fn zip_with(self, rhs: Index, op: impl Fn(usize, usize) -> usize) -> Index {
        Index::new(
            op(self.x, rhs.x),
            op(self.y, rhs.y),
            op(self.z, rhs.z),
            op(self.c, rhs.c),
            op(self.t, rhs.t),
        )
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {}, {})",
            self.x, self.y, self.z, self.c, self.t
        )
    }
}

impl Add for Index {
    type Output = Index;

    fn add(self, rhs: Index) -> Index {
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl Sub for Index {
    type Output = Index;

    fn sub(self, rhs: Index) -> Index {
        self.zip_with(rhs, |a, b| a - b)
    }
}

impl Mul for Index {
    type Output = Index;

    fn mul(self, rhs: Index) -> Index {
        self.zip_with(rhs, |a, b| a * b)
    }
}

impl Div for Index {
    type Output = Index;

    fn div(self, rhs: Index) -> Index {
        self.zip_with(rhs, |a, b| a / b)
    }
}

impl Rem for Index {
    type Output = Index;

    fn rem(self, rhs: Index) -> Index {
        self.zip_with(rhs, |a, b| a % b)
    }
}

// =============================================================================
// Tests
// =============================================================================
