//! Plain JSON reading and writing of annotation sets.
//!
//! This is both the input format of the CLI and the default export format:
//! a pretty-printed dump of the set exactly as the editor holds it. It is the
//! only lossless format; parsing an export back yields an equal set.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::model::AnnotationSet;
use crate::error::LabelportError;

/// Reads an annotation set from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or is not a JSON object.
/// Malformed individual annotations do not cause an error.
pub fn read_annotation_set(path: &Path) -> Result<AnnotationSet, LabelportError> {
    let file = File::open(path).map_err(LabelportError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| LabelportError::AnnotationSetParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads an annotation set from a JSON string.
pub fn from_json_str(json: &str) -> Result<AnnotationSet, serde_json::Error> {
    serde_json::from_str(json)
}

/// Reads an annotation set from a JSON byte slice.
///
/// Useful for fuzzing and processing raw bytes without UTF-8 validation overhead.
pub fn from_json_slice(bytes: &[u8]) -> Result<AnnotationSet, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Writes an annotation set as pretty-printed JSON (2-space indent).
pub fn to_json_string(set: &AnnotationSet) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Annotation, BBox, Point};

    fn sample_set() -> AnnotationSet {
        AnnotationSet::new("image001.jpg")
            .with_tool("object_detection")
            .with_annotation(
                Annotation::bbox("person", BBox::new(10.0, 20.0, 90.0, 180.0)).with_confidence(0.95),
            )
            .with_annotation(Annotation::polygon(
                "road",
                [
                    Point::new(0.0, 400.0),
                    Point::new(640.0, 400.0),
                    Point::new(640.0, 480.0),
                ],
            ))
    }

    #[test]
    fn test_json_roundtrip() {
        let original = sample_set();

        let json = to_json_string(&original).expect("serialization failed");
        let restored = from_json_str(&json).expect("deserialization failed");

        assert_eq!(restored, original);
    }

    #[test]
    fn test_json_format() {
        let json = to_json_string(&sample_set()).expect("serialization failed");

        assert!(json.contains("\"image\": \"image001.jpg\""));
        assert!(json.contains("\"type\": \"bbox\""));
        assert!(json.contains("\"annotations\": ["));
        // Absent optionals stay absent.
        assert!(!json.contains("null"));
    }

    #[test]
    fn test_from_slice_rejects_non_object() {
        assert!(from_json_slice(b"\"just a string\"").is_err());
        assert!(from_json_slice(b"{\"image\": \"a.jpg\"}").is_ok());
    }

    #[test]
    fn test_read_annotation_set_reports_path() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("broken.json");
        std::fs::write(&path, "{not json").expect("write file");

        let err = read_annotation_set(&path).unwrap_err();
        match err {
            LabelportError::AnnotationSetParse { path: err_path, .. } => assert_eq!(err_path, path),
            other => panic!("expected AnnotationSetParse, got {other:?}"),
        }
    }
}
