//! plane-series - Rebuild multi-dimensional datasets from per-plane image files.
//!
//! This binary evaluates a file series and prints or saves its layouts.

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use plane_series::{
    config::{Cli, Command, InferConfig, InspectConfig, OutputFormat},
    decode_layout, encode_layout, ImageHeaderValidator, SeriesError, SeriesEvaluation,
    SeriesEvaluator, SeriesValidator,
};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.into_command() {
        Command::Infer(config) => run_infer(config),
        Command::Inspect(config) => run_inspect(config),
    }
}

// =============================================================================
// Infer Command
// =============================================================================

fn run_infer(config: InferConfig) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let options = config.series_options();

    info!("Reference: {}", config.reference.display());
    info!(
        "Tiling: {}, extension matching: {}",
        if options.tiling { "on" } else { "off" },
        if options.match_extension { "on" } else { "off" }
    );

    let validator = if config.check_images {
        match ImageHeaderValidator::for_reference(&config.reference) {
            Ok(validator) => Some(validator),
            Err(e) => {
                error!("{}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        None
    };

    let mut evaluator = SeriesEvaluator::new(options);
    if let Some(ref validator) = validator {
        evaluator = evaluator.with_validator(validator as &dyn SeriesValidator);
    }

    let evaluation = evaluator.evaluate(&config.reference);

    if !evaluation.is_series() {
        error!("No file series found for {}", config.reference.display());
        return ExitCode::FAILURE;
    }

    report(&evaluation);

    let result = match (&config.output, config.format) {
        (Some(dir), _) => write_layouts(dir, &evaluation),
        (None, OutputFormat::Xml) => {
            for layout in &evaluation.layouts {
                print!("{}", encode_layout(layout));
            }
            Ok(())
        }
        (None, OutputFormat::Json) => print_json(&evaluation),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log the evaluation summary.
fn report(evaluation: &SeriesEvaluation) {
    info!("Candidates: {}", evaluation.candidate_count);
    for dimension in &evaluation.sizes.dimensions {
        info!(
            "  {} = {} (number #{}, {:?})",
            dimension.axis, dimension.size, dimension.position, dimension.source
        );
    }
    info!(
        "Layouts: {} ({:?}), required files: {}",
        evaluation.layouts.len(),
        evaluation.strategy,
        evaluation.required_files
    );

    if evaluation.too_many_missing_files {
        warn!(
            "{} of {} planes are missing; consider adjusting the delimiters",
            evaluation.missing_files(),
            evaluation.required_files
        );
    }
}

fn print_json(evaluation: &SeriesEvaluation) -> Result<(), SeriesError> {
    let json = serde_json::to_string_pretty(evaluation)?;
    println!("{}", json);
    Ok(())
}

/// Write `layout_<group>.xml` files into `dir`.
fn write_layouts(dir: &Path, evaluation: &SeriesEvaluation) -> Result<(), SeriesError> {
    fs::create_dir_all(dir).map_err(|e| SeriesError::io(dir, e))?;

    for (group, layout) in evaluation.layouts.iter().enumerate() {
        let path = dir.join(format!("layout_{group}.xml"));
        fs::write(&path, encode_layout(layout)).map_err(|e| SeriesError::io(&path, e))?;
        info!("Wrote {} ({} files)", path.display(), layout.len());
    }

    Ok(())
}

// =============================================================================
// Inspect Command
// =============================================================================

fn run_inspect(config: InspectConfig) -> ExitCode {
    init_logging(false);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let layout = match fs::read_to_string(&config.layout)
        .map_err(|e| SeriesError::io(&config.layout, e))
        .and_then(|text| decode_layout(&text).map_err(SeriesError::from))
    {
        Ok(layout) => layout,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("Layout: {}", config.layout.display());
    println!("  Files:  {}", layout.len());
    println!("  Extent: {} (x, y, z, c, t)", layout.extent());
    if layout.distinct_indices() != layout.len() {
        println!(
            "  Note:   {} files share a coordinate",
            layout.len() - layout.distinct_indices()
        );
    }

    if config.list {
        println!();
        for (path, index) in layout.iter() {
            println!("  {}  {}", index, path.display());
        }
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "plane_series=debug"
    } else {
        "plane_series=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
