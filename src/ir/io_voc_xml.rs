//! Pascal VOC XML writer.
//!
//! Emits one `<annotation>` document for the set's image. VOC stores boxes as
//! integer corner coordinates, so `xmax`/`ymax` are computed from the box
//! origin plus its size and every coordinate is rounded.

use std::fmt::Write as _;

use super::model::AnnotationSet;
use crate::export::ExportOptions;

const VOC_FOLDER: &str = "Annotations";
const VOC_DATABASE: &str = "labelport";
const VOC_DEPTH: u32 = 3;

/// Writes an annotation set as a Pascal VOC XML string.
///
/// Only `bbox` annotations become `<object>` elements. `<size>` carries the
/// image size from `options`, or zeros when it is unknown.
pub fn to_voc_xml_string(
    set: &AnnotationSet,
    options: &ExportOptions,
) -> Result<String, std::fmt::Error> {
    let (width, height) = options
        .resolved_image_size()
        .map(|size| (size.width, size.height))
        .unwrap_or((0, 0));

    let mut xml = String::new();

    writeln!(xml, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
    writeln!(xml, "<annotation>")?;
    writeln!(xml, "  <folder>{}</folder>", VOC_FOLDER)?;
    writeln!(xml, "  <filename>{}</filename>", xml_escape(&set.image))?;
    writeln!(xml, "  <source>")?;
    writeln!(xml, "    <database>{}</database>", VOC_DATABASE)?;
    writeln!(xml, "  </source>")?;
    writeln!(xml, "  <size>")?;
    writeln!(xml, "    <width>{}</width>", width)?;
    writeln!(xml, "    <height>{}</height>", height)?;
    writeln!(xml, "    <depth>{}</depth>", VOC_DEPTH)?;
    writeln!(xml, "  </size>")?;
    writeln!(xml, "  <segmented>0</segmented>")?;

    for (annotation, bbox) in set.bboxes() {
        writeln!(xml, "  <object>")?;
        writeln!(
            xml,
            "    <name>{}</name>",
            xml_escape(annotation.label_or_unknown())
        )?;
        writeln!(xml, "    <pose>Unspecified</pose>")?;
        writeln!(xml, "    <truncated>0</truncated>")?;
        writeln!(xml, "    <difficult>0</difficult>")?;
        writeln!(xml, "    <bndbox>")?;
        writeln!(xml, "      <xmin>{}</xmin>", round_half_up(bbox.xmin()))?;
        writeln!(xml, "      <ymin>{}</ymin>", round_half_up(bbox.ymin()))?;
        writeln!(xml, "      <xmax>{}</xmax>", round_half_up(bbox.xmax()))?;
        writeln!(xml, "      <ymax>{}</ymax>", round_half_up(bbox.ymax()))?;
        writeln!(xml, "    </bndbox>")?;
        writeln!(xml, "  </object>")?;
    }

    write!(xml, "</annotation>")?;

    Ok(xml)
}

/// Rounds to the nearest integer with ties towards positive infinity.
///
/// `f64::round` sends `-2.5` to `-3`; annotation tools round it to `-2`.
/// Non-finite input saturates (NaN becomes 0).
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

fn xml_escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
