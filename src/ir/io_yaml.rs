//! YAML writer.
//!
//! Unlike the detection formats, the YAML export keeps every annotation
//! regardless of kind. Defaults are filled in for missing fields so each entry
//! has an `id`, `type`, `label` and `confidence`.

use serde::Serialize;

use super::bbox::BBox;
use super::coord::{serialize_number, Point};
use super::model::AnnotationSet;

#[derive(Debug, Serialize)]
struct YamlDocument<'a> {
    image: &'a str,
    tool: &'a str,
    annotations: Vec<YamlAnnotation<'a>>,
}

#[derive(Debug, Serialize)]
struct YamlAnnotation<'a> {
    id: usize,
    #[serde(rename = "type")]
    kind: &'a str,
    label: &'a str,
    #[serde(serialize_with = "serialize_number")]
    confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    bbox: Option<&'a BBox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    points: Option<&'a [Point]>,
}

/// Writes an annotation set as a YAML document.
pub fn to_yaml_string(set: &AnnotationSet) -> Result<String, serde_yaml::Error> {
    let annotations = set
        .annotations
        .iter()
        .enumerate()
        .map(|(idx, annotation)| YamlAnnotation {
            id: idx + 1,
            kind: annotation.kind_or_unknown(),
            label: annotation.label_or_unknown(),
            confidence: annotation.confidence_or_default(),
            bbox: annotation.bbox.as_ref(),
            points: annotation.points.as_deref(),
        })
        .collect();

    let document = YamlDocument {
        image: &set.image,
        tool: set.tool_or_unknown(),
        annotations,
    };

    serde_yaml::to_string(&document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Annotation;
    use serde_yaml::Value;

    fn sample_set() -> AnnotationSet {
        AnnotationSet::new("img1.jpg")
            .with_annotation(Annotation::bbox("cat", BBox::new(10.0, 20.0, 30.0, 40.0)).with_confidence(0.5))
            .with_annotation(Annotation::polygon(
                "lake",
                [Point::new(0.0, 0.0), Point::new(9.0, 0.0), Point::new(9.0, 9.0)],
            ))
            .with_annotation(Annotation::default())
    }

    fn parse(yaml: &str) -> Value {
        serde_yaml::from_str(yaml).expect("output is valid YAML")
    }

    #[test]
    fn top_level_fields() {
        let yaml = to_yaml_string(&sample_set()).unwrap();
        assert!(yaml.starts_with("image: img1.jpg\ntool: unknown\nannotations:\n"));

        let doc = parse(&yaml);
        assert_eq!(doc["image"], Value::from("img1.jpg"));
        assert_eq!(doc["tool"], Value::from("unknown"));
    }

    #[test]
    fn every_annotation_is_kept_with_defaults() {
        let doc = parse(&to_yaml_string(&sample_set()).unwrap());
        let annotations = doc["annotations"].as_sequence().unwrap();
        assert_eq!(annotations.len(), 3);

        let ids: Vec<u64> = annotations
            .iter()
            .map(|a| a["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let empty = &annotations[2];
        assert_eq!(empty["type"], Value::from("unknown"));
        assert_eq!(empty["label"], Value::from("unknown"));
        assert_eq!(empty["confidence"].as_f64(), Some(1.0));
        assert!(empty.get("bbox").is_none());
        assert!(empty.get("points").is_none());
    }

    #[test]
    fn geometry_blocks() {
        let doc = parse(&to_yaml_string(&sample_set()).unwrap());
        let bbox = &doc["annotations"][0]["bbox"];
        assert_eq!(bbox["x"].as_f64(), Some(10.0));
        assert_eq!(bbox["height"].as_f64(), Some(40.0));
        assert_eq!(doc["annotations"][0]["confidence"].as_f64(), Some(0.5));

        let points = doc["annotations"][1]["points"].as_sequence().unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[1][0].as_f64(), Some(9.0));
        assert_eq!(points[1][1].as_f64(), Some(0.0));
    }

    #[test]
    fn special_characters_survive() {
        let set = AnnotationSet::new("weird: name #1.jpg")
            .with_tool("- tool")
            .with_annotation(Annotation::bbox("a: b", BBox::default()));
        let doc = parse(&to_yaml_string(&set).unwrap());
        assert_eq!(doc["image"], Value::from("weird: name #1.jpg"));
        assert_eq!(doc["tool"], Value::from("- tool"));
        assert_eq!(doc["annotations"][0]["label"], Value::from("a: b"));
    }
}
