//! Layout persistence integration tests.
//!
//! Tests verify:
//! - Evaluated layouts survive a write/read cycle through a file
//! - Group layouts are persisted independently
//! - Malformed documents are rejected

use std::fs;

use plane_series::{
    decode_layout, encode_layout, evaluate_files, Axis, DelimiterSet, Index, InterchangeError,
    SeriesOptions,
};

use super::test_utils::{zc_names, SeriesDir};

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_evaluated_layout_survives_file_round_trip() {
    let dir = SeriesDir::new();
    dir.touch_all(zc_names("img", 3, 2));

    let evaluation = evaluate_files(&dir.file("img_Z0_C0.tif"), &SeriesOptions::default(), None);
    let layout = evaluation.layouts.get(0).unwrap();

    let saved = dir.file("layout_0.xml");
    fs::write(&saved, encode_layout(layout)).unwrap();
    let restored = decode_layout(&fs::read_to_string(&saved).unwrap()).unwrap();

    assert_eq!(&restored, layout);
    assert_eq!(restored.extent(), Index::new(1, 1, 3, 2, 1));
    for (path, _) in restored.iter() {
        assert!(path.is_file(), "{} should exist", path.display());
    }
}

#[test]
fn test_group_layouts_persist_separately() {
    let dir = SeriesDir::new();
    for well in 0..2 {
        dir.touch_all((0..3).map(|z| format!("plate_pos{well}_Z{z}.tif")));
    }

    let delimiters = DelimiterSet::default().with(Axis::SeriesGroup, "_pos");
    let options = SeriesOptions::default().with_delimiters(delimiters);
    let evaluation = evaluate_files(&dir.file("plate_pos0_Z0.tif"), &options, None);
    assert_eq!(evaluation.layouts.len(), 2);

    for (group, layout) in evaluation.layouts.iter().enumerate() {
        let text = encode_layout(layout);
        assert!(text.contains(&format!("plate_pos{group}_Z2.tif")));
        assert!(!text.contains(&format!("plate_pos{}_Z", 1 - group)));

        let restored = decode_layout(&text).unwrap();
        assert_eq!(&restored, layout);
    }
}

#[test]
fn test_names_needing_escapes() {
    let dir = SeriesDir::new();
    dir.touch_all(["r&d_Z0.tif", "r&d_Z1.tif"]);

    let evaluation = evaluate_files(&dir.file("r&d_Z0.tif"), &SeriesOptions::default(), None);
    let layout = evaluation.layouts.get(0).unwrap();
    let text = encode_layout(layout);

    assert!(text.contains("r&amp;d_Z1.tif"));
    assert_eq!(&decode_layout(&text).unwrap(), layout);
}

// =============================================================================
// Malformed Documents
// =============================================================================

#[test]
fn test_document_without_root_rejected() {
    let dir = SeriesDir::new();
    let saved = dir.file("broken.xml");
    fs::write(&saved, "<Layout><File Name=\"a.tif\" /></Layout>").unwrap();

    let result = decode_layout(&fs::read_to_string(&saved).unwrap());
    assert_eq!(result, Err(InterchangeError::MissingRoot));
}

#[test]
fn test_negative_coordinate_rejected() {
    let text = concat!(
        "<FileLayout>\n",
        "  <File Name=\"a.tif\" X=\"0\" Y=\"0\" Z=\"-1\" C=\"0\" T=\"0\" />\n",
        "</FileLayout>\n",
    );

    match decode_layout(text) {
        Err(InterchangeError::InvalidCoordinate {
            file,
            attribute,
            value,
        }) => {
            assert_eq!(file, "a.tif");
            assert_eq!(attribute, "Z");
            assert_eq!(value, "-1");
        }
        other => panic!("expected invalid coordinate, got {other:?}"),
    }
}
