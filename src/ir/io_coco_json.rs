//! COCO JSON writer.
//!
//! Produces a single-image COCO detection file. COCO bounding boxes use
//! `[x, y, width, height]` with `(x, y)` the top-left corner, which is the
//! same layout as [`BBox`], so boxes are written unchanged.
//!
//! # Output policy
//!
//! - One image entry with id 1. Its width/height come from
//!   [`ExportOptions::image_size`] and are `0` when the size is unknown.
//! - One category per distinct label (first-occurrence order), ids from 1,
//!   all under the `"object"` supercategory.
//! - Only `bbox` annotations are written unless polygons are requested.
//!   Annotation ids are sequential over the written entries.

use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use serde::Serialize;

use super::bbox::BBox;
use super::categories::CategoryIndex;
use super::coord::{polygon_area, Point};
use super::ids::{AnnotationId, CategoryId};
use super::model::{Annotation, AnnotationSet};
use crate::export::ExportOptions;

/// Description written into the COCO `info` block.
pub const DATASET_DESCRIPTION: &str = "Annotation dataset exported by labelport";

const DATASET_VERSION: &str = "1.0";
const SUPERCATEGORY: &str = "object";
const IMAGE_ID: u64 = 1;

// ============================================================================
// COCO Schema Types (internal to this module)
// ============================================================================

#[derive(Debug, Serialize)]
struct CocoDataset<'a> {
    info: CocoInfo,
    images: Vec<CocoImage<'a>>,
    annotations: Vec<CocoAnnotation>,
    categories: Vec<CocoCategory<'a>>,
}

#[derive(Debug, Serialize)]
struct CocoInfo {
    description: &'static str,
    version: &'static str,
    year: i32,
    date_created: String,
}

#[derive(Debug, Serialize)]
struct CocoImage<'a> {
    id: u64,
    file_name: &'a str,
    width: u32,
    height: u32,
}

#[derive(Debug, Serialize)]
struct CocoCategory<'a> {
    id: CategoryId,
    name: &'a str,
    supercategory: &'static str,
}

#[derive(Debug, Serialize)]
struct CocoAnnotation {
    id: AnnotationId,
    image_id: u64,
    category_id: CategoryId,
    /// COCO bbox format: [x, y, width, height] with (x,y) as top-left corner
    bbox: [f64; 4],
    area: f64,
    /// Flattened polygon rings; empty for plain boxes.
    segmentation: Vec<Vec<f64>>,
    iscrowd: u8,
}

// ============================================================================
// Public API
// ============================================================================

/// Writes an annotation set as a pretty-printed COCO JSON string.
///
/// The `info.date_created` field carries the current UTC time, so two calls
/// never produce byte-identical output.
pub fn to_coco_string(
    set: &AnnotationSet,
    options: &ExportOptions,
) -> Result<String, serde_json::Error> {
    to_coco_string_at(set, options, Utc::now())
}

/// Like [`to_coco_string`] with an explicit creation time.
pub fn to_coco_string_at(
    set: &AnnotationSet,
    options: &ExportOptions,
    created: DateTime<Utc>,
) -> Result<String, serde_json::Error> {
    let index = CategoryIndex::from_set(set);
    let coco = set_to_coco(set, &index, options, created);
    serde_json::to_string_pretty(&coco)
}

// ============================================================================
// Conversion: AnnotationSet -> COCO
// ============================================================================

fn set_to_coco<'a>(
    set: &'a AnnotationSet,
    index: &'a CategoryIndex,
    options: &ExportOptions,
    created: DateTime<Utc>,
) -> CocoDataset<'a> {
    let info = CocoInfo {
        description: DATASET_DESCRIPTION,
        version: DATASET_VERSION,
        year: created.year(),
        date_created: created.to_rfc3339_opts(SecondsFormat::Millis, true),
    };

    let (width, height) = options
        .resolved_image_size()
        .map(|size| (size.width, size.height))
        .unwrap_or((0, 0));

    let images = vec![CocoImage {
        id: IMAGE_ID,
        file_name: &set.image,
        width,
        height,
    }];

    let categories = index
        .categories()
        .map(|(id, name)| CocoCategory {
            id,
            name,
            supercategory: SUPERCATEGORY,
        })
        .collect();

    let mut annotations = Vec::new();
    let mut next_id = AnnotationId::new(1);

    for (position, annotation) in set.annotations.iter().enumerate() {
        let Some(shape) = coco_shape(annotation, options) else {
            log::debug!(
                "coco: skipping annotation #{} of kind '{}'",
                position + 1,
                annotation.kind_or_unknown()
            );
            continue;
        };

        let Some(category_id) = index.category_id(annotation.label_or_unknown()) else {
            continue;
        };

        annotations.push(CocoAnnotation {
            id: next_id,
            image_id: IMAGE_ID,
            category_id,
            bbox: [shape.bbox.x, shape.bbox.y, shape.bbox.width, shape.bbox.height],
            area: shape.area,
            segmentation: shape.segmentation,
            iscrowd: 0,
        });
        next_id = next_id.next();
    }

    CocoDataset {
        info,
        images,
        annotations,
        categories,
    }
}

struct CocoShape {
    bbox: BBox,
    area: f64,
    segmentation: Vec<Vec<f64>>,
}

fn coco_shape(annotation: &Annotation, options: &ExportOptions) -> Option<CocoShape> {
    if let Some(bbox) = annotation.export_bbox() {
        return Some(CocoShape {
            bbox: *bbox,
            area: bbox.area(),
            segmentation: Vec::new(),
        });
    }

    if !options.include_polygons {
        return None;
    }

    let points = annotation.export_polygon()?;
    Some(CocoShape {
        bbox: BBox::enclosing(points)?,
        area: polygon_area(points),
        segmentation: vec![flatten_points(points)],
    })
}

fn flatten_points(points: &[Point]) -> Vec<f64> {
    points.iter().flat_map(|p| [p.x(), p.y()]).collect()
}

// ============================================================================
// Tests
// ============================================================================
