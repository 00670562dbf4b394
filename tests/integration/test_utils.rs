//! Test utilities for integration tests.
//!
//! Helpers for creating directories of plane files.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use image::{GrayImage, Luma};
use tempfile::TempDir;

use plane_series::{FileLayout, Index, LayoutSet};

// =============================================================================
// Series Directory
// =============================================================================

/// A temporary directory holding plane files.
pub struct SeriesDir {
    dir: TempDir,
}

impl SeriesDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Full path of a file in the directory.
    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Create an empty file.
    pub fn touch(&self, name: &str) -> PathBuf {
        let path = self.file(name);
        fs::write(&path, b"").expect("write file");
        path
    }

    /// Create empty files for all names.
    pub fn touch_all<I, S>(&self, names: I) -> Vec<PathBuf>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names.into_iter().map(|n| self.touch(n.as_ref())).collect()
    }

    /// Write a small grayscale PNG.
    pub fn png(&self, name: &str, width: u32, height: u32) -> PathBuf {
        let path = self.file(name);
        GrayImage::from_pixel(width, height, Luma([200u8]))
            .save(&path)
            .expect("write png");
        path
    }
}

// =============================================================================
// Name Generators
// =============================================================================

/// `prefix_Z{z}_C{c}.tif` for every z < `z` and c < `c`.
pub fn zc_names(prefix: &str, z: usize, c: usize) -> Vec<String> {
    (0..z)
        .flat_map(|zi| (0..c).map(move |ci| format!("{prefix}_Z{zi}_C{ci}.tif")))
        .collect()
}

// =============================================================================
// Assertions
// =============================================================================

/// Every index in the layout is distinct.
pub fn assert_unique_indices(layout: &FileLayout) {
    let indices: BTreeSet<Index> = layout.iter().map(|(_, index)| index).collect();
    assert_eq!(
        indices.len(),
        layout.len(),
        "layout has files sharing a coordinate"
    );
}

/// All file paths across all layouts, with duplicates detected.
pub fn all_paths(layouts: &LayoutSet) -> BTreeSet<PathBuf> {
    let mut paths = BTreeSet::new();
    for layout in layouts {
        for (path, _) in layout.iter() {
            assert!(
                paths.insert(path.to_path_buf()),
                "{} appears in more than one layout",
                path.display()
            );
        }
    }
    paths
}
