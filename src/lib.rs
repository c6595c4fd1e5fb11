//! Labelport: annotation export for image labelling tools.
//!
//! Labelport turns the annotations an editor holds for one image into the
//! interchange formats training pipelines expect: COCO, Pascal VOC, YOLO,
//! CSV and YAML, with plain JSON as the lossless default.
//!
//! # Modules
//!
//! - [`ir`]: Annotation model and the per-format writers
//! - [`export`]: Format dispatch, export artifacts and export reports
//! - [`validation`]: Annotation set validation and error reporting
//! - [`error`]: Error types for labelport operations
//!
//! # Example
//!
//! ```
//! use labelport::ir::{Annotation, AnnotationSet, BBox};
//!
//! let set = AnnotationSet::new("cat.jpg")
//!     .with_annotation(Annotation::bbox("cat", BBox::new(100.0, 100.0, 200.0, 200.0)));
//!
//! let artifact = labelport::export(&set, "yolo");
//! assert_eq!(artifact.content, "0 0.200000 0.200000 0.200000 0.200000\n");
//! assert_eq!(artifact.extension, "txt");
//! ```

pub mod error;
pub mod export;
pub mod ir;
pub mod validation;

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

pub use error::LabelportError;
pub use export::{
    build_export_report, export, export_with, try_export, ExportArtifact, ExportOptions,
    ExportReport, Format,
};

/// The labelport CLI application.
#[derive(Parser)]
#[command(name = "labelport")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Export an annotation set to another format.
    Export(ExportArgs),
    /// Validate an annotation set for errors and warnings.
    Validate(ValidateArgs),
    /// List the supported export formats.
    Formats,
}

/// Arguments for the export subcommand.
#[derive(clap::Args)]
struct ExportArgs {
    /// Annotation set JSON file.
    input: PathBuf,

    /// Target format (json, coco, voc, yolo, csv, yaml). Unknown names export JSON.
    #[arg(long, short, default_value = "json", env = "LABELPORT_FORMAT")]
    format: String,

    /// Write the export here instead of stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Image width in pixels.
    #[arg(long, requires = "height", env = "LABELPORT_IMAGE_WIDTH")]
    width: Option<u32>,

    /// Image height in pixels.
    #[arg(long, requires = "width", env = "LABELPORT_IMAGE_HEIGHT")]
    height: Option<u32>,

    /// Read width and height from this image file.
    #[arg(long, conflicts_with_all = ["width", "height"])]
    image: Option<PathBuf>,

    /// Write polygons as COCO segmentations.
    #[arg(long)]
    include_polygons: bool,

    /// Also write the YOLO class names, one per line, to this file.
    #[arg(long, value_name = "PATH")]
    classes: Option<PathBuf>,

    /// Emit the data URI instead of the raw content.
    #[arg(long)]
    data_uri: bool,

    /// Export report written to stderr.
    #[arg(long, value_enum, default_value_t = ReportMode::Text)]
    report: ReportMode,
}

/// How the export report is shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ReportMode {
    Text,
    Json,
    None,
}

/// Arguments for the validate subcommand.
#[derive(clap::Args)]
struct ValidateArgs {
    /// Annotation set JSON file to validate.
    input: PathBuf,

    /// Treat warnings as errors (exit non-zero if any warnings).
    #[arg(long)]
    strict: bool,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Run the labelport CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), LabelportError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Export(args)) => run_export(args),
        Some(Commands::Validate(args)) => run_validate(args),
        Some(Commands::Formats) => {
            print!("{}", formats_table());
            Ok(())
        }
        None => {
            // No subcommand: just print a help hint and exit successfully
            println!("labelport {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Annotation export for image labelling tools.");
            println!();
            println!("Run 'labelport --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the export subcommand.
fn run_export(args: ExportArgs) -> Result<(), LabelportError> {
    let set = ir::io_json::read_annotation_set(&args.input)?;
    let format = Format::from_name_or_default(&args.format);

    let image_size = match (&args.image, args.width, args.height) {
        (Some(path), _, _) => Some(ir::io_image::read_image_size(path)?),
        (None, Some(width), Some(height)) => Some(ir::ImageSize::new(width, height)),
        _ => None,
    };

    let options = ExportOptions {
        image_size,
        include_polygons: args.include_polygons,
    };

    let artifact = try_export(&set, format, &options)?;
    let body = if args.data_uri {
        format!("{}\n", artifact.url)
    } else {
        artifact.content
    };

    match &args.output {
        Some(path) => std::fs::write(path, body)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(body.as_bytes())?;
            stdout.flush()?;
        }
    }

    if let Some(path) = &args.classes {
        if format == Format::Yolo {
            std::fs::write(path, ir::io_yolo::to_classes_txt_string(&set))?;
        } else {
            log::warn!("--classes only applies to the yolo format, ignoring it for {}", format);
        }
    }

    let report = build_export_report(&set, format, &options);
    match args.report {
        ReportMode::Text => eprint!("{}", report),
        ReportMode::Json => {
            let json = serde_json::to_string_pretty(&report).map_err(LabelportError::JsonWrite)?;
            eprintln!("{}", json);
        }
        ReportMode::None => {}
    }

    Ok(())
}

/// Execute the validate subcommand.
fn run_validate(args: ValidateArgs) -> Result<(), LabelportError> {
    let set = ir::io_json::read_annotation_set(&args.input)?;

    let opts = validation::ValidateOptions {
        strict: args.strict,
    };
    let report = validation::validate_annotation_set(&set, &opts);

    match args.output.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&report.to_json_value())
                .map_err(LabelportError::JsonWrite)?;
            println!("{}", json);
        }
        _ => {
            // Default text output
            print!("{}", report);
        }
    }

    // Determine exit status
    let has_errors = report.error_count() > 0;
    let has_warnings = report.warning_count() > 0;

    if has_errors || (opts.strict && has_warnings) {
        Err(LabelportError::ValidationFailed {
            error_count: report.error_count(),
            warning_count: report.warning_count(),
            report,
        })
    } else {
        Ok(())
    }
}

/// Renders the dispatch table shown by `labelport formats`.
fn formats_table() -> String {
    let mut table = format!(
        "{:<8} {:<8} {:<20} {}\n",
        "FORMAT", "ALIASES", "MIME TYPE", "EXTENSION"
    );
    for format in Format::ALL {
        let aliases = if format.aliases().is_empty() {
            "-".to_string()
        } else {
            format.aliases().join(",")
        };
        table.push_str(&format!(
            "{:<8} {:<8} {:<20} {}\n",
            format.name(),
            aliases,
            format.mime_type(),
            format.extension()
        ));
    }
    table
}
