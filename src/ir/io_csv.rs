//! Flat CSV writer.
//!
//! One row per box with the header `image,label,type,x,y,width,height`.
//! Values containing commas, quotes or line breaks are quoted per RFC 4180 by
//! the `csv` crate; everything else is written bare.

use super::model::AnnotationSet;
use crate::error::LabelportError;

/// Column names of the CSV header row.
pub const CSV_HEADER: [&str; 7] = ["image", "label", "type", "x", "y", "width", "height"];

/// Writes the `bbox` annotations of a set as CSV.
///
/// Lines end with `\n`. Coordinates use the shortest form that round-trips
/// (`100`, `12.5`).
pub fn to_csv_string(set: &AnnotationSet) -> Result<String, LabelportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    csv_writer
        .write_record(CSV_HEADER)
        .map_err(LabelportError::CsvWrite)?;

    for (annotation, bbox) in set.bboxes() {
        let record = [
            set.image.clone(),
            annotation.label_or_unknown().to_string(),
            annotation.kind_or_unknown().to_string(),
            bbox.x.to_string(),
            bbox.y.to_string(),
            bbox.width.to_string(),
            bbox.height.to_string(),
        ];
        csv_writer
            .write_record(&record)
            .map_err(LabelportError::CsvWrite)?;
    }

    let bytes = csv_writer
        .into_inner()
        .map_err(|e| LabelportError::Io(e.into_error()))?;

    Ok(String::from_utf8(bytes)?)
}
