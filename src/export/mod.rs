//! Export dispatch: format names, artifacts and export reports.
//!
//! [`export`] is the single entry point an editor needs. It picks an encoder
//! from the format name, never fails, and returns an [`ExportArtifact`] that
//! carries the content together with everything needed to offer it as a
//! download (MIME type, file extension, data URI).
//!
//! Unknown format names fall back to plain JSON. Callers that want to see
//! encoder errors use [`try_export`] instead.

pub mod report;

pub use report::{ExportCounts, ExportIssue, ExportIssueCode, ExportReport, ExportSeverity};

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

use crate::error::LabelportError;
use crate::ir::io_yolo::PLACEHOLDER_IMAGE_SIZE;
use crate::ir::{
    io_coco_json, io_csv, io_json, io_voc_xml, io_yaml, io_yolo, Annotation, AnnotationKind,
    AnnotationSet, CategoryIndex, ImageSize,
};

/// Characters left unescaped in data URIs, matching `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// An export target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Pretty-printed dump of the annotation set.
    #[default]
    Json,
    /// COCO detection JSON.
    Coco,
    /// Pascal VOC XML.
    Voc,
    /// YOLO label lines.
    Yolo,
    /// Flat CSV, one row per box.
    Csv,
    /// YAML document with every annotation.
    Yaml,
}

impl Format {
    /// Every format in dispatch-table order.
    pub const ALL: [Format; 6] = [
        Format::Json,
        Format::Coco,
        Format::Voc,
        Format::Yolo,
        Format::Csv,
        Format::Yaml,
    ];

    /// Canonical name of the format.
    pub fn name(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Coco => "coco",
            Format::Voc => "voc",
            Format::Yolo => "yolo",
            Format::Csv => "csv",
            Format::Yaml => "yaml",
        }
    }

    /// Additional names accepted for the format.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Format::Yaml => &["yml"],
            _ => &[],
        }
    }

    /// MIME type of the exported content.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Format::Json | Format::Coco => "application/json",
            Format::Voc => "application/xml",
            Format::Yolo => "text/plain",
            Format::Csv => "text/csv",
            Format::Yaml => "application/x-yaml",
        }
    }

    /// File extension (without the dot) for the exported content.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Json | Format::Coco => "json",
            Format::Voc => "xml",
            Format::Yolo => "txt",
            Format::Csv => "csv",
            Format::Yaml => "yaml",
        }
    }

    /// Parses a format name, falling back to [`Format::Json`] for unknown names.
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            log::warn!("unknown export format '{}', falling back to json", name);
            Format::Json
        })
    }
}

impl FromStr for Format {
    type Err = LabelportError;

    /// Matches canonical names and aliases exactly; `"COCO"` is not `coco`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::ALL
            .into_iter()
            .find(|format| format.name() == s || format.aliases().contains(&s))
            .ok_or_else(|| LabelportError::UnsupportedFormat(s.to_string()))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Options shared by every encoder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Pixel size of the annotated image, if known.
    ///
    /// COCO and VOC write it into the image entry; YOLO normalizes against it.
    pub image_size: Option<ImageSize>,
    /// Write polygon annotations into COCO as segmentations.
    pub include_polygons: bool,
}

impl ExportOptions {
    /// Sets the image size.
    pub fn with_image_size(mut self, image_size: ImageSize) -> Self {
        self.image_size = Some(image_size);
        self
    }

    /// Enables or disables polygon output for COCO.
    pub fn with_polygons(mut self, include_polygons: bool) -> Self {
        self.include_polygons = include_polygons;
        self
    }

    /// The image size if it is known and has no zero side.
    pub fn resolved_image_size(&self) -> Option<ImageSize> {
        self.image_size.filter(|size| !size.is_empty())
    }
}

/// The result of one export call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportArtifact {
    /// Encoded content.
    pub content: String,
    /// MIME type of `content`.
    pub mime_type: &'static str,
    /// File extension without the dot.
    pub extension: &'static str,
    /// `content` as a `data:` URI.
    pub url: String,
}

impl ExportArtifact {
    fn new(format: Format, content: String) -> Self {
        let url = data_uri(format.mime_type(), &content);
        Self {
            content,
            mime_type: format.mime_type(),
            extension: format.extension(),
            url,
        }
    }

    /// Suggested download name for an image stem, e.g. `photo` -> `photo.xml`.
    pub fn file_name(&self, stem: &str) -> String {
        format!("{}.{}", stem, self.extension)
    }
}

/// Builds `data:<mime>;charset=utf-8,<percent-encoded content>`.
pub fn data_uri(mime_type: &str, content: &str) -> String {
    format!(
        "data:{};charset=utf-8,{}",
        mime_type,
        utf8_percent_encode(content, URI_COMPONENT)
    )
}

/// Exports an annotation set to the named format with default options.
///
/// Never fails: unknown format names and encoder errors both produce the
/// JSON export.
pub fn export(set: &AnnotationSet, format: &str) -> ExportArtifact {
    export_with(set, Format::from_name_or_default(format), &ExportOptions::default())
}

/// Exports an annotation set with explicit options. Never fails.
pub fn export_with(set: &AnnotationSet, format: Format, options: &ExportOptions) -> ExportArtifact {
    match try_export(set, format, options) {
        Ok(artifact) => artifact,
        Err(err) => {
            log::error!("{} export failed, falling back to json: {}", format, err);
            let content = io_json::to_json_string(set).unwrap_or_else(|err| {
                log::error!("json export failed: {}", err);
                String::from("{}")
            });
            ExportArtifact::new(Format::Json, content)
        }
    }
}

/// Exports an annotation set, surfacing encoder errors.
pub fn try_export(
    set: &AnnotationSet,
    format: Format,
    options: &ExportOptions,
) -> Result<ExportArtifact, LabelportError> {
    let content = encode(set, format, options)?;
    Ok(ExportArtifact::new(format, content))
}

fn encode(
    set: &AnnotationSet,
    format: Format,
    options: &ExportOptions,
) -> Result<String, LabelportError> {
    match format {
        Format::Json => io_json::to_json_string(set).map_err(LabelportError::JsonWrite),
        Format::Coco => {
            io_coco_json::to_coco_string(set, options).map_err(LabelportError::JsonWrite)
        }
        Format::Voc => io_voc_xml::to_voc_xml_string(set, options).map_err(|source| {
            LabelportError::TextRender {
                format: "voc",
                source,
            }
        }),
        Format::Yolo => io_yolo::to_yolo_string(set, options).map_err(|source| {
            LabelportError::TextRender {
                format: "yolo",
                source,
            }
        }),
        Format::Csv => io_csv::to_csv_string(set),
        Format::Yaml => io_yaml::to_yaml_string(set).map_err(LabelportError::YamlWrite),
    }
}

// ============================================================================
// Export report
// ============================================================================

/// What an encoder does with one annotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Fate {
    Written,
    NotSupported,
    MissingGeometry,
}

/// Build a report describing what exporting `set` to `format` keeps and drops.
///
/// This function examines the set and target format to determine:
/// - Input/output counts
/// - What information will be lost (warnings)
/// - What policy decisions apply (info notes)
pub fn build_export_report(
    set: &AnnotationSet,
    format: Format,
    options: &ExportOptions,
) -> ExportReport {
    let mut report = ExportReport::new(format.name());
    let index = CategoryIndex::from_set(set);

    report.input = ExportCounts {
        annotations: set.annotations.len(),
        categories: index.len(),
    };

    if matches!(format, Format::Json | Format::Yaml) {
        report.output = report.input.clone();
        return report;
    }

    let fates: Vec<Fate> = set
        .annotations
        .iter()
        .map(|ann| fate(ann, format, options))
        .collect();

    let written: Vec<&Annotation> = set
        .annotations
        .iter()
        .zip(&fates)
        .filter(|(_, fate)| **fate == Fate::Written)
        .map(|(ann, _)| ann)
        .collect();

    // COCO and YOLO write the full category table; VOC and CSV only name
    // the labels of written boxes.
    let output_categories = match format {
        Format::Coco | Format::Yolo => index.len(),
        _ => written
            .iter()
            .map(|ann| ann.label_or_unknown())
            .collect::<HashSet<_>>()
            .len(),
    };
    report.output = ExportCounts {
        annotations: written.len(),
        categories: output_categories,
    };

    let not_supported: Vec<&Annotation> = set
        .annotations
        .iter()
        .zip(&fates)
        .filter(|(_, fate)| **fate == Fate::NotSupported)
        .map(|(ann, _)| ann)
        .collect();
    if !not_supported.is_empty() {
        report.add(ExportIssue::warning(
            ExportIssueCode::SkippedNonBbox,
            format!(
                "{} annotation(s) of kind(s) {} are not written by {}",
                not_supported.len(),
                kind_list(&not_supported),
                format
            ),
        ));
    }

    let missing = fates
        .iter()
        .filter(|fate| **fate == Fate::MissingGeometry)
        .count();
    if missing > 0 {
        report.add(ExportIssue::warning(
            ExportIssueCode::SkippedMissingGeometry,
            format!(
                "{} annotation(s) have no usable geometry and will be skipped",
                missing
            ),
        ));
    }

    let size_known = options.resolved_image_size().is_some();
    match format {
        Format::Coco | Format::Voc if !size_known => {
            report.add(ExportIssue::info(
                ExportIssueCode::ImageSizeUnresolved,
                "image size is unknown; width and height are written as 0",
            ));
        }
        Format::Yolo if !size_known => {
            report.add(ExportIssue::warning(
                ExportIssueCode::YoloPlaceholderImageSize,
                format!(
                    "image size is unknown; coordinates are normalized against {}x{}",
                    PLACEHOLDER_IMAGE_SIZE.width, PLACEHOLDER_IMAGE_SIZE.height
                ),
            ));
        }
        _ => {}
    }

    if matches!(format, Format::Coco | Format::Yolo) && !index.is_empty() {
        report.add(ExportIssue::info(
            ExportIssueCode::CategoryIdsFirstOccurrence,
            format!(
                "{} ids follow first-occurrence order of labels and change if annotations are reordered",
                if format == Format::Coco {
                    "category"
                } else {
                    "class"
                }
            ),
        ));
    }

    report
}

fn fate(annotation: &Annotation, format: Format, options: &ExportOptions) -> Fate {
    match annotation.kind {
        Some(AnnotationKind::BBox) => {
            if annotation.export_bbox().is_some() {
                Fate::Written
            } else {
                Fate::MissingGeometry
            }
        }
        Some(AnnotationKind::Polygon) if format == Format::Coco && options.include_polygons => {
            if annotation.export_polygon().is_some() {
                Fate::Written
            } else {
                Fate::MissingGeometry
            }
        }
        _ => Fate::NotSupported,
    }
}

fn kind_list(annotations: &[&Annotation]) -> String {
    let mut kinds: Vec<&str> = Vec::new();
    for ann in annotations {
        let kind = ann.kind_or_unknown();
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    kinds
        .iter()
        .map(|kind| format!("'{}'", kind))
        .collect::<Vec<_>>()
        .join(", ")
}
