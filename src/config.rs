//! Configuration management for plane-series.
//!
//! This module provides the CLI and configuration system. It supports:
//! - Command-line arguments via clap
//! - Environment variables with `PLANE_SERIES_` prefix
//! - Sensible defaults for all optional settings
//!
//! # Example
//!
//! ```ignore
//! use plane_series::config::{Cli, Command};
//!
//! let cli = Cli::parse();
//! match cli.into_command() {
//!     Command::Infer(config) => { /* evaluate config.reference */ }
//!     Command::Inspect(config) => { /* decode config.layout */ }
//! }
//! ```
//!
//! # Environment Variables
//!
//! - `PLANE_SERIES_DELIMITERS_X` - X (tile column) delimiters (default: `_X;-X`)
//! - `PLANE_SERIES_DELIMITERS_Y` - Y (tile row) delimiters (default: `_Y;-Y`)
//! - `PLANE_SERIES_DELIMITERS_Z` - Z delimiters (default: `_Z;_S;-Z`)
//! - `PLANE_SERIES_DELIMITERS_C` - Channel delimiters (default: `_C;_CH;_W;-C`)
//! - `PLANE_SERIES_DELIMITERS_T` - Time delimiters (default: `_T;_TP;-T`)
//! - `PLANE_SERIES_DELIMITERS_GROUP` - Series group delimiters (default: none)
//! - `PLANE_SERIES_TILING` - Infer X/Y tile axes (default: false)
//! - `PLANE_SERIES_MAX_TRAILING_COUNTERS` - Only the last N numbers may vary
//! - `PLANE_SERIES_VALIDITY_CHECK_CAP` - Candidates checked by `--check-images` (default: 10)

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::series::{
    Axis, DelimiterSet, SeriesOptions, DEFAULT_CHANNEL_DELIMITERS, DEFAULT_GROUP_DELIMITERS,
    DEFAULT_TIME_DELIMITERS, DEFAULT_VALIDITY_CHECK_CAP, DEFAULT_X_DELIMITERS,
    DEFAULT_Y_DELIMITERS, DEFAULT_Z_DELIMITERS,
};

// =============================================================================
// CLI Arguments
// =============================================================================

/// plane-series - Rebuild multi-dimensional datasets from per-plane image files.
#[derive(Parser, Debug, Clone)]
#[command(name = "plane-series")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Take the selected subcommand.
    pub fn into_command(self) -> Command {
        self.command
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Infer the layout of the file series a reference file belongs to.
    Infer(InferConfig),

    /// Show a previously saved layout file.
    Inspect(InspectConfig),
}

/// Output encoding for inferred layouts.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One `<FileLayout>` document per layout.
    #[default]
    Xml,
    /// The full evaluation report as JSON.
    Json,
}

// =============================================================================
// Infer Configuration
// =============================================================================

/// Options for `plane-series infer`.
#[derive(Args, Debug, Clone)]
pub struct InferConfig {
    /// Any file of the series; its directory is scanned for siblings.
    pub reference: PathBuf,

    // =========================================================================
    // Delimiters
    // =========================================================================
    /// Semicolon separated X (tile column) suffixes.
    #[arg(long, default_value = DEFAULT_X_DELIMITERS, env = "PLANE_SERIES_DELIMITERS_X")]
    pub delimiters_x: String,

    /// Semicolon separated Y (tile row) suffixes.
    #[arg(long, default_value = DEFAULT_Y_DELIMITERS, env = "PLANE_SERIES_DELIMITERS_Y")]
    pub delimiters_y: String,

    /// Semicolon separated Z suffixes.
    #[arg(long, default_value = DEFAULT_Z_DELIMITERS, env = "PLANE_SERIES_DELIMITERS_Z")]
    pub delimiters_z: String,

    /// Semicolon separated channel suffixes.
    #[arg(long, default_value = DEFAULT_CHANNEL_DELIMITERS, env = "PLANE_SERIES_DELIMITERS_C")]
    pub delimiters_c: String,

    /// Semicolon separated time suffixes.
    #[arg(long, default_value = DEFAULT_TIME_DELIMITERS, env = "PLANE_SERIES_DELIMITERS_T")]
    pub delimiters_t: String,

    /// Semicolon separated series group suffixes.
    ///
    /// Files are split into one layout per group value.
    #[arg(
        long,
        default_value = DEFAULT_GROUP_DELIMITERS,
        env = "PLANE_SERIES_DELIMITERS_GROUP"
    )]
    pub delimiters_group: String,

    // =========================================================================
    // Discovery
    // =========================================================================
    /// Infer X/Y tile axes (large stitched acquisitions).
    #[arg(long, default_value_t = false, env = "PLANE_SERIES_TILING")]
    pub tiling: bool,

    /// Accept siblings with any extension.
    #[arg(long, default_value_t = false)]
    pub any_extension: bool,

    /// Only the last N numbers in the file name may differ from the reference.
    #[arg(long, env = "PLANE_SERIES_MAX_TRAILING_COUNTERS")]
    pub max_trailing_counters: Option<usize>,

    /// Check image headers of candidates against the reference.
    #[arg(long, default_value_t = false)]
    pub check_images: bool,

    /// Number of candidates checked by `--check-images`.
    #[arg(
        long,
        default_value_t = DEFAULT_VALIDITY_CHECK_CAP,
        env = "PLANE_SERIES_VALIDITY_CHECK_CAP"
    )]
    pub validity_check_cap: usize,

    // =========================================================================
    // Output
    // =========================================================================
    /// Output encoding.
    #[arg(long, value_enum, default_value_t = OutputFormat::Xml)]
    pub format: OutputFormat,

    /// Write one `layout_<group>.xml` per layout into this directory instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl InferConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.reference.as_os_str().is_empty() {
            return Err("A reference file is required".to_string());
        }

        if self.check_images && self.validity_check_cap == 0 {
            return Err("validity_check_cap must be greater than 0 with --check-images".to_string());
        }

        for (axis, list) in self.delimiter_lists() {
            if list.split(';').any(|entry| !entry.is_empty() && entry.trim().is_empty()) {
                return Err(format!(
                    "{} delimiters contain a whitespace-only entry: {:?}",
                    axis, list
                ));
            }
        }

        Ok(())
    }

    /// Delimiter lists as given, per axis.
    pub fn delimiter_lists(&self) -> [(Axis, &str); 6] {
        [
            (Axis::X, self.delimiters_x.as_str()),
            (Axis::Y, self.delimiters_y.as_str()),
            (Axis::Z, self.delimiters_z.as_str()),
            (Axis::Channel, self.delimiters_c.as_str()),
            (Axis::Time, self.delimiters_t.as_str()),
            (Axis::SeriesGroup, self.delimiters_group.as_str()),
        ]
    }

    /// Build the delimiter set from the per-axis lists.
    pub fn delimiters(&self) -> DelimiterSet {
        self.delimiter_lists()
            .into_iter()
            .fold(DelimiterSet::empty(), |set, (axis, list)| set.with(axis, list))
    }

    /// Build evaluation options.
    pub fn series_options(&self) -> SeriesOptions {
        let mut options = SeriesOptions::default()
            .with_delimiters(self.delimiters())
            .with_tiling(self.tiling)
            .with_extension_matching(!self.any_extension)
            .with_validity_check_cap(self.validity_check_cap);
        options.max_trailing_counters = self.max_trailing_counters;
        options
    }
}

// =============================================================================
// Inspect Configuration
// =============================================================================

/// Options for `plane-series inspect`.
#[derive(Args, Debug, Clone)]
pub struct InspectConfig {
    /// Layout file written by `infer`.
    pub layout: PathBuf,

    /// List every file with its coordinate.
    #[arg(short, long, default_value_t = false)]
    pub list: bool,
}

impl InspectConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.layout.as_os_str().is_empty() {
            return Err("A layout file is required".to_string());
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
