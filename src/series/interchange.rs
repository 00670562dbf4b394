//! Text form of a [`FileLayout`].
//!
//! A layout is persisted as a small XML document with one element per file,
//! so it can be reloaded without running inference again:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <FileLayout>
//!   <File Name="img_Z0_C1.tif" X="0" Y="0" Z="0" C="1" T="0" />
//! </FileLayout>
//! ```
//!
//! Entries are written in path order. Decoding accepts attributes in any
//! order and ignores unknown ones.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::InterchangeError;

use super::axis::{Axis, Index};
use super::layout::FileLayout;

const ROOT_ELEMENT: &str = "FileLayout";

fn file_element_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"<File(\s[^>]*?)?/?>").expect("file element pattern is valid")
    })
}

fn attribute_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"([A-Za-z_][\w.-]*)\s*=\s*"([^"]*)""#).expect("attribute pattern is valid")
    })
}

// =============================================================================
// Encoding
// =============================================================================

/// Serialize a layout to its XML text form.
pub fn encode_layout(layout: &FileLayout) -> String {
    let entries: String = layout
        .iter()
        .map(|(path, index)| {
            format!(
                "  <File Name=\"{}\" X=\"{}\" Y=\"{}\" Z=\"{}\" C=\"{}\" T=\"{}\" />\n",
                escape(&path.to_string_lossy()),
                index.x,
                index.y,
                index.z,
                index.c,
                index.t
            )
        })
        .collect();

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<{ROOT_ELEMENT}>\n{entries}</{ROOT_ELEMENT}>\n"
    )
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

// =============================================================================
// Decoding
// =============================================================================

/// Parse a layout from its XML text form.
///
/// # Errors
///
/// - [`InterchangeError::MissingRoot`] if there is no `<FileLayout>` element
/// - [`InterchangeError::MissingAttribute`] if a `File` lacks a name or coordinate
/// - [`InterchangeError::InvalidCoordinate`] if a coordinate is not a non-negative integer
/// - [`InterchangeError::DuplicateFile`] if a name appears twice
pub fn decode_layout(text: &str) -> Result<FileLayout, InterchangeError> {
    if !text.contains(&format!("<{ROOT_ELEMENT}")) {
        return Err(InterchangeError::MissingRoot);
    }

    let mut layout = FileLayout::new();

    for element in file_element_pattern().captures_iter(text) {
        let body = element.get(1).map_or("", |m| m.as_str());
        let attributes: HashMap<&str, &str> = attribute_pattern()
            .captures_iter(body)
            .filter_map(|c| Some((c.get(1)?.as_str(), c.get(2)?.as_str())))
            .collect();

        let name = attributes
            .get("Name")
            .map(|raw| unescape(raw))
            .ok_or_else(|| InterchangeError::MissingAttribute {
                element: element[0].to_string(),
                attribute: "Name",
            })?;

        let mut index = Index::zero();
        for axis in Axis::COORDINATES {
            let label = axis.label();
            let raw = attributes
                .get(label)
                .ok_or_else(|| InterchangeError::MissingAttribute {
                    element: element[0].to_string(),
                    attribute: label,
                })?;
            let value = raw
                .trim()
                .parse::<usize>()
                .map_err(|_| InterchangeError::InvalidCoordinate {
                    file: name.clone(),
                    attribute: label,
                    value: raw.to_string(),
                })?;
            index.set(axis, value);
        }

        if layout.insert(PathBuf::from(&name), index).is_some() {
            return Err(InterchangeError::DuplicateFile(name));
        }
    }

    Ok(layout)
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

// =============================================================================
// Tests
// =============================================================================
