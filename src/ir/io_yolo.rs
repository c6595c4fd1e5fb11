//! YOLO label writer.
//!
//! Produces the body of a YOLO `labels/*.txt` file for one image: one
//! `class cx cy w h` line per box, with centre and size normalized to the
//! image dimensions and written at 6 decimal places.

use std::fmt::Write as _;

use super::categories::CategoryIndex;
use super::model::{AnnotationSet, ImageSize};
use crate::export::ExportOptions;

/// Image size assumed when the caller does not supply one.
///
/// Normalizing against a made-up size yields wrong coordinates for any
/// image that is not 1000×1000; callers should pass the real size through
/// [`ExportOptions::image_size`].
pub const PLACEHOLDER_IMAGE_SIZE: ImageSize = ImageSize {
    width: 1000,
    height: 1000,
};

/// Writes the YOLO label lines for an annotation set.
///
/// Class indices are 0-based over every distinct label of the set in
/// first-occurrence order. Non-`bbox` annotations are skipped.
pub fn to_yolo_string(
    set: &AnnotationSet,
    options: &ExportOptions,
) -> Result<String, std::fmt::Error> {
    let image_size = options.resolved_image_size().unwrap_or_else(|| {
        log::warn!(
            "yolo: no image size for '{}', normalizing against {}x{}",
            set.image,
            PLACEHOLDER_IMAGE_SIZE.width,
            PLACEHOLDER_IMAGE_SIZE.height
        );
        PLACEHOLDER_IMAGE_SIZE
    });

    let index = CategoryIndex::from_set(set);
    let mut out = String::new();

    for (annotation, bbox) in set.bboxes() {
        let Some(class) = index.class_index(annotation.label_or_unknown()) else {
            continue;
        };

        let (cx, cy, w, h) = bbox.to_normalized_cxcywh(image_size);
        writeln!(out, "{} {:.6} {:.6} {:.6} {:.6}", class, cx, cy, w, h)?;
    }

    Ok(out)
}

/// Writes the class names in class-index order, one per line.
///
/// This is the `classes.txt` companion of a YOLO label file.
pub fn to_classes_txt_string(set: &AnnotationSet) -> String {
    let index = CategoryIndex::from_set(set);
    let mut out = String::new();
    for name in index.names() {
        out.push_str(name);
        out.push('\n');
    }
    out
}
