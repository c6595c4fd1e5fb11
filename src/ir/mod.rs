//! Annotation model and format writers for labelport.
//!
//! The model mirrors what an annotation editor holds for a single image: an
//! [`AnnotationSet`] with an image name, an optional tool name and an ordered
//! list of [`Annotation`]s. Every export format is produced from this model
//! by one `io_*` module.
//!
//! # Design Principles
//!
//! 1. **Permissive Construction**: the model accepts whatever the editor
//!    produced. Missing labels, unknown kinds and malformed geometry are
//!    representable, so validation can report them and exporters can skip
//!    them instead of failing.
//!
//! 2. **Derived Categories**: categories are never stored. [`CategoryIndex`]
//!    derives them from labels in first-occurrence order for each export.
//!
//! 3. **Lossless JSON**: unknown fields are carried through, so the JSON
//!    export parses back to an equal set.
//!
//! # Example
//!
//! ```
//! use labelport::ir::{Annotation, AnnotationSet, BBox};
//!
//! let set = AnnotationSet::new("image.jpg")
//!     .with_tool("object_detection")
//!     .with_annotation(Annotation::bbox("person", BBox::new(10.0, 20.0, 90.0, 180.0)));
//!
//! assert_eq!(set.bboxes().count(), 1);
//! ```

mod bbox;
mod categories;
mod coord;
mod ids;
pub mod io_coco_json;
pub mod io_csv;
pub mod io_image;
pub mod io_json;
pub mod io_voc_xml;
pub mod io_yaml;
pub mod io_yolo;
mod model;

// Re-export core types for convenient access
pub use bbox::BBox;
pub use categories::CategoryIndex;
pub use coord::{polygon_area, Point};
pub use ids::{AnnotationId, CategoryId, ClassIndex};
pub use model::{
    Annotation, AnnotationKind, AnnotationSet, ExtraFields, ImageSize, DEFAULT_CONFIDENCE,
    UNKNOWN_LABEL,
};
