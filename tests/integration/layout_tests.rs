//! Layout inference integration tests.
//!
//! Tests verify:
//! - Delimited names reproduce the generating coordinates
//! - Tile axes are only inferred with tiling enabled
//! - Unlabeled numbers are ranked Z before Time before Channel
//! - Sparse numbering falls back to the positional layout
//! - Series groups split into separate layouts, on both builders
//! - Repeated evaluation gives identical results

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use plane_series::series::{build_delimited, discover_series, guess_axes, SeriesFile};
use plane_series::{
    evaluate_files, Axis, AxisSource, DelimiterSet, Index, LayoutStrategy, SeriesEvaluator,
    SeriesOptions,
};

use super::test_utils::{all_paths, assert_unique_indices, zc_names, SeriesDir};

// =============================================================================
// Delimited Layouts
// =============================================================================

#[test]
fn test_delimited_names_round_trip() {
    let dir = SeriesDir::new();
    dir.touch_all(zc_names("img", 5, 3));

    let evaluation = evaluate_files(&dir.file("img_Z0_C0.tif"), &SeriesOptions::default(), None);

    assert_eq!(evaluation.strategy, LayoutStrategy::Delimited);
    assert_eq!(evaluation.sizes.index, Index::new(1, 1, 5, 3, 1));
    assert_eq!(evaluation.layouts.len(), 1);

    let layout = evaluation.layouts.get(0).unwrap();
    assert_eq!(layout.len(), 15);
    for z in 0..5 {
        for c in 0..3 {
            let path = dir.file(&format!("img_Z{z}_C{c}.tif"));
            assert_eq!(layout.get(&path), Some(Index::new(0, 0, z, c, 0)));
            assert_eq!(layout.file_at(Index::new(0, 0, z, c, 0)), Some(path.as_path()));
        }
    }
}

#[test]
fn test_reference_in_middle_of_series() {
    let dir = SeriesDir::new();
    dir.touch_all(zc_names("img", 4, 2));

    let evaluation = evaluate_files(&dir.file("img_Z2_C1.tif"), &SeriesOptions::default(), None);

    assert_eq!(evaluation.sizes.index, Index::new(1, 1, 4, 2, 1));
    assert_eq!(evaluation.layouts.total_files(), 8);
}

#[test]
fn test_time_and_channel_delimiters() {
    let dir = SeriesDir::new();
    for t in 0..3 {
        for c in 0..2 {
            dir.touch(&format!("live_t{t:03}_ch{c}.tif"));
        }
    }

    let evaluation = evaluate_files(
        &dir.file("live_t000_ch0.tif"),
        &SeriesOptions::default(),
        None,
    );

    assert_eq!(evaluation.sizes.index, Index::new(1, 1, 1, 2, 3));
    assert!(evaluation
        .sizes
        .dimensions
        .iter()
        .all(|d| d.source == AxisSource::Delimiter));
    let layout = evaluation.layouts.get(0).unwrap();
    assert_eq!(
        layout.get(&dir.file("live_t002_ch1.tif")),
        Some(Index::new(0, 0, 0, 1, 2))
    );
}

#[test]
fn test_custom_delimiters() {
    let dir = SeriesDir::new();
    for z in 0..2 {
        for w in 0..3 {
            dir.touch(&format!("scan.plane{z}.wave{w}.tif"));
        }
    }

    let delimiters = DelimiterSet::default()
        .with(Axis::Z, ".plane")
        .with(Axis::Channel, ".wave");
    let options = SeriesOptions::default().with_delimiters(delimiters);
    let evaluation = evaluate_files(&dir.file("scan.plane0.wave0.tif"), &options, None);

    assert_eq!(evaluation.sizes.size_of(Axis::Z), 2);
    assert_eq!(evaluation.sizes.size_of(Axis::Channel), 3);
}

// =============================================================================
// Tiling
// =============================================================================

#[test]
fn test_tile_delimiters_ignored_by_default() {
    let dir = SeriesDir::new();
    for x in 0..2 {
        for y in 0..3 {
            dir.touch(&format!("mosaic_X{x}_Y{y}.tif"));
        }
    }
    let reference = dir.file("mosaic_X0_Y0.tif");

    let plain = evaluate_files(&reference, &SeriesOptions::default(), None);
    assert_eq!(plain.sizes.index.x, 1);
    assert_eq!(plain.sizes.index.y, 1);
    assert!(plain
        .sizes
        .dimensions
        .iter()
        .all(|d| !d.axis.is_tile()));

    let tiled = evaluate_files(&reference, &SeriesOptions::default().with_tiling(true), None);
    assert_eq!(tiled.sizes.index, Index::new(2, 3, 1, 1, 1));
    assert_eq!(
        tiled.layouts.get(0).unwrap().get(&dir.file("mosaic_X1_Y2.tif")),
        Some(Index::new(1, 2, 0, 0, 0))
    );
}

// =============================================================================
// Cardinality Heuristic
// =============================================================================

#[test]
fn test_unlabeled_numbers_ranked_by_cardinality() {
    let dir = SeriesDir::new();
    for a in 0..5 {
        for b in 0..2 {
            dir.touch(&format!("img_{a}_{b}.tif"));
        }
    }

    let evaluation = evaluate_files(&dir.file("img_0_0.tif"), &SeriesOptions::default(), None);

    assert_eq!(evaluation.sizes.size_of(Axis::Z), 5);
    assert_eq!(evaluation.sizes.size_of(Axis::Time), 2);
    assert!(evaluation
        .sizes
        .dimensions
        .iter()
        .all(|d| d.source == AxisSource::Cardinality));
}

#[test]
fn test_three_unlabeled_numbers() {
    let dir = SeriesDir::new();
    for a in 0..2 {
        for b in 0..4 {
            for c in 0..3 {
                dir.touch(&format!("{a}-{b}-{c}.tif"));
            }
        }
    }

    let evaluation = evaluate_files(&dir.file("0-0-0.tif"), &SeriesOptions::default(), None);

    // 4 values -> Z, 3 values -> Time, 2 values -> Channel
    assert_eq!(evaluation.sizes.index, Index::new(1, 1, 4, 2, 3));
    assert_eq!(
        evaluation.layouts.get(0).unwrap().get(&dir.file("1-3-2.tif")),
        Some(Index::new(0, 0, 3, 1, 2))
    );
}

// =============================================================================
// Positional Fallback
// =============================================================================

#[test]
fn test_sparse_numbering_uses_positional_layout() {
    let dir = SeriesDir::new();
    for z in [0, 5, 10] {
        for c in 0..2 {
            dir.touch(&format!("img_Z{z}_C{c}.tif"));
        }
    }
    let reference = dir.file("img_Z0_C0.tif");
    let options = SeriesOptions::default();

    let evaluation = evaluate_files(&reference, &options, None);

    assert_eq!(evaluation.strategy, LayoutStrategy::Positional);
    assert_eq!(evaluation.required_files, 22);
    assert_eq!(evaluation.candidate_count, 6);
    assert!(evaluation.too_many_missing_files);

    let layout = evaluation.layouts.get(0).unwrap();
    assert_eq!(layout.len(), evaluation.candidate_count);
    assert_unique_indices(layout);
    assert!(layout
        .iter()
        .all(|(_, index)| index.fits_within(&evaluation.sizes.index)));
    assert_eq!(
        layout.get(&dir.file("img_Z10_C1.tif")),
        Some(Index::new(0, 0, 2, 1, 0))
    );

    // The value-based layout differs from the one returned
    let candidates = discover_series(&reference, &options, None);
    let reference_file = SeriesFile::from_path(&reference).unwrap();
    let assignment = guess_axes(&reference_file, &candidates, &options.delimiters, false);
    let (delimited, _) = build_delimited(&candidates, &assignment);
    assert_ne!(delimited, evaluation.layouts);
    assert_eq!(
        delimited.get(0).unwrap().get(&dir.file("img_Z10_C1.tif")),
        Some(Index::new(0, 0, 10, 1, 0))
    );
}

#[test]
fn test_missing_plane_below_confidence_threshold() {
    let dir = SeriesDir::new();
    dir.touch_all(zc_names("img", 3, 2));
    std::fs::remove_file(dir.file("img_Z1_C1.tif")).unwrap();

    let evaluation = evaluate_files(&dir.file("img_Z0_C0.tif"), &SeriesOptions::default(), None);

    assert_eq!(evaluation.required_files, 6);
    assert_eq!(evaluation.candidate_count, 5);
    assert_eq!(evaluation.missing_files(), 1);
    assert!(!evaluation.too_many_missing_files);
    assert_eq!(evaluation.strategy, LayoutStrategy::Positional);
    assert_eq!(evaluation.layouts.total_files(), 5);
    assert_unique_indices(evaluation.layouts.get(0).unwrap());
}

// =============================================================================
// Series Groups
// =============================================================================

#[test]
fn test_series_group_partition() {
    let dir = SeriesDir::new();
    let mut expected = Vec::new();
    for scene in 1..=2 {
        for z in 0..3 {
            for c in 0..2 {
                expected.push(dir.touch(&format!("slide_scene{scene}_Z{z}_C{c}.tif")));
            }
        }
    }

    let delimiters = DelimiterSet::default().with(Axis::SeriesGroup, "_scene");
    let options = SeriesOptions::default().with_delimiters(delimiters);
    let evaluation = evaluate_files(&dir.file("slide_scene1_Z0_C0.tif"), &options, None);

    assert_eq!(evaluation.strategy, LayoutStrategy::Delimited);
    assert_eq!(evaluation.sizes.groups, 2);
    assert_eq!(evaluation.layouts.len(), 2);

    for layout in &evaluation.layouts {
        assert_eq!(layout.len(), 6);
        assert_unique_indices(layout);
    }

    let union = all_paths(&evaluation.layouts);
    assert_eq!(union, expected.into_iter().collect());

    assert_eq!(
        evaluation
            .layouts
            .get(1)
            .unwrap()
            .get(&dir.file("slide_scene2_Z2_C1.tif")),
        Some(Index::new(0, 0, 2, 1, 0))
    );
}

#[test]
fn test_series_group_partition_with_positional_layout() {
    let dir = SeriesDir::new();
    for well in 0..2 {
        for z in [0, 2, 4] {
            dir.touch(&format!("plate_pos{well}_Z{z}.tif"));
        }
    }

    let delimiters = DelimiterSet::default().with(Axis::SeriesGroup, "_pos");
    let options = SeriesOptions::default().with_delimiters(delimiters);
    let evaluation = evaluate_files(&dir.file("plate_pos0_Z0.tif"), &options, None);

    assert_eq!(evaluation.strategy, LayoutStrategy::Positional);
    assert_eq!(evaluation.sizes.groups, 2);
    assert_eq!(evaluation.sizes.index.z, 5);
    assert_eq!(evaluation.layouts.len(), evaluation.sizes.groups);

    let on_disk: BTreeSet<PathBuf> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(all_paths(&evaluation.layouts), on_disk);
    for layout in &evaluation.layouts {
        assert_unique_indices(layout);
    }

    // Canonical order walks Z fastest, filling group 0 before group 1
    let expected = [
        ("plate_pos0_Z0.tif", 0, 0),
        ("plate_pos0_Z2.tif", 0, 1),
        ("plate_pos0_Z4.tif", 0, 2),
        ("plate_pos1_Z0.tif", 0, 3),
        ("plate_pos1_Z2.tif", 0, 4),
        ("plate_pos1_Z4.tif", 1, 0),
    ];
    for (name, group, z) in expected {
        let layout = evaluation.layouts.get(group).unwrap();
        assert_eq!(
            layout.get(&dir.file(name)),
            Some(Index::new(0, 0, z, 0, 0)),
            "{name}"
        );
    }
}

#[test]
fn test_wide_group_numbers_do_not_fail() {
    let dir = SeriesDir::new();
    dir.touch_all([
        "run_scene20240101_Z0.tif",
        "run_scene20240315_Z0.tif",
        "run_scene99999999999999999999_Z0.tif",
    ]);

    let delimiters = DelimiterSet::default().with(Axis::SeriesGroup, "_scene");
    let options = SeriesOptions::default().with_delimiters(delimiters);
    let evaluation = evaluate_files(&dir.file("run_scene20240101_Z0.tif"), &options, None);

    assert_eq!(evaluation.strategy, LayoutStrategy::Positional);
    assert!(evaluation.too_many_missing_files);
    assert!(evaluation.layouts.len() <= evaluation.candidate_count);
    assert_eq!(all_paths(&evaluation.layouts).len(), 3);
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_evaluation_is_idempotent() {
    let dir = SeriesDir::new();
    dir.touch_all(zc_names("img", 4, 3));
    dir.touch_all(["img_Z7_C0.tif", "noise.txt", "img_Z0.tif"]);

    let evaluator = SeriesEvaluator::new(SeriesOptions::default());
    let reference = dir.file("img_Z0_C0.tif");

    let first = evaluator.evaluate(&reference);
    let second = evaluator.evaluate(&reference);

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_single_file_series() {
    let dir = SeriesDir::new();
    let only = dir.touch("overview.tif");

    let evaluation = evaluate_files(&only, &SeriesOptions::default(), None);

    assert!(evaluation.is_series());
    assert_eq!(evaluation.sizes.index, Index::ones());
    assert_eq!(
        evaluation.layouts.get(0).unwrap().get(&only),
        Some(Index::zero())
    );
}
