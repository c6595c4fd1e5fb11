//! Annotation set model shared by every exporter.
//!
//! An [`AnnotationSet`] is what an annotation editor holds for one image: the
//! image name, the tool that produced it, and an ordered list of shapes. The
//! model is deliberately permissive. Unknown JSON fields are carried through
//! untouched, and a known field whose value has the wrong shape is kept as raw
//! JSON instead of its typed form, so one bad entry never prevents the rest of
//! the set from being exported and the JSON export still reproduces it.

use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use super::bbox::BBox;
use super::coord::{serialize_number, Point};

/// Raw JSON fields carried alongside the typed ones.
///
/// Holds fields this crate does not interpret plus known fields whose value
/// could not be read. An entry here takes precedence over the typed field of
/// the same name when the set is written back as JSON.
pub type ExtraFields = BTreeMap<String, Value>;

/// Label (and kind name) used when an annotation has none.
pub const UNKNOWN_LABEL: &str = "unknown";

/// Confidence used when an annotation has none.
pub const DEFAULT_CONFIDENCE: f64 = 1.0;

/// All annotations drawn on a single image.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnnotationSet {
    /// Image file name the annotations belong to.
    pub image: String,

    /// Annotation tool that produced the set (e.g. "object_detection").
    pub tool: Option<String>,

    /// Annotations in editor order.
    pub annotations: Vec<Annotation>,

    /// Raw fields, written back verbatim by the JSON export.
    pub extra: ExtraFields,
}

impl AnnotationSet {
    /// Creates an empty set for the given image.
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            ..Default::default()
        }
    }

    /// Sets the tool name.
    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = Some(tool.into());
        self
    }

    /// Appends an annotation.
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// The tool name, or `"unknown"` when absent or empty.
    pub fn tool_or_unknown(&self) -> &str {
        non_empty_or_unknown(self.tool.as_deref())
    }

    /// Iterates over bbox-type annotations that actually carry a box.
    pub fn bboxes(&self) -> impl Iterator<Item = (&Annotation, &BBox)> {
        self.annotations
            .iter()
            .filter_map(|ann| ann.export_bbox().map(|bbox| (ann, bbox)))
    }
}

/// A single annotation shape.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Annotation {
    /// Shape kind, serialized as `type`.
    pub kind: Option<AnnotationKind>,

    /// Class label.
    ///
    /// A numeric or `true` label in the input is read as its text form
    /// (`7` becomes `"7"`) and its raw value stays in `extra`.
    pub label: Option<String>,

    /// Confidence score (e.g. from model predictions).
    pub confidence: Option<f64>,

    /// Bounding box for `bbox` annotations.
    pub bbox: Option<BBox>,

    /// Vertices for `polygon` annotations.
    pub points: Option<Vec<Point>>,

    /// Raw fields, written back verbatim by the JSON export.
    pub extra: ExtraFields,
}

impl Annotation {
    /// Creates a `bbox` annotation.
    pub fn bbox(label: impl Into<String>, bbox: BBox) -> Self {
        Self {
            kind: Some(AnnotationKind::BBox),
            label: Some(label.into()),
            bbox: Some(bbox),
            ..Default::default()
        }
    }

    /// Creates a `polygon` annotation.
    pub fn polygon(label: impl Into<String>, points: impl IntoIterator<Item = Point>) -> Self {
        Self {
            kind: Some(AnnotationKind::Polygon),
            label: Some(label.into()),
            points: Some(points.into_iter().collect()),
            ..Default::default()
        }
    }

    /// Adds a confidence score to the annotation.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self.extra.remove("confidence");
        self
    }

    /// Returns true if the annotation is declared as `bbox`.
    pub fn is_bbox(&self) -> bool {
        matches!(self.kind, Some(AnnotationKind::BBox))
    }

    /// Returns true if the annotation is declared as `polygon`.
    pub fn is_polygon(&self) -> bool {
        matches!(self.kind, Some(AnnotationKind::Polygon))
    }

    /// The label, or `"unknown"` when absent or empty.
    pub fn label_or_unknown(&self) -> &str {
        non_empty_or_unknown(self.label.as_deref())
    }

    /// The kind name, or `"unknown"` when absent or empty.
    pub fn kind_or_unknown(&self) -> &str {
        non_empty_or_unknown(self.kind.as_ref().map(AnnotationKind::as_str))
    }

    /// The confidence, or 1.0 when absent.
    pub fn confidence_or_default(&self) -> f64 {
        self.confidence.unwrap_or(DEFAULT_CONFIDENCE)
    }

    /// The box a detection format should write, if any.
    ///
    /// Only `bbox` annotations qualify; a `bbox` annotation without a box
    /// yields `None` and is skipped by the encoders.
    pub fn export_bbox(&self) -> Option<&BBox> {
        if self.is_bbox() {
            self.bbox.as_ref()
        } else {
            None
        }
    }

    /// The vertices of a usable polygon (at least three points), if any.
    pub fn export_polygon(&self) -> Option<&[Point]> {
        if !self.is_polygon() {
            return None;
        }
        self.points
            .as_deref()
            .filter(|points| points.len() >= 3)
    }
}

/// The kind of shape an annotation describes.
///
/// Kinds other than `bbox` and `polygon` are kept verbatim so they survive
/// JSON and YAML export.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AnnotationKind {
    BBox,
    Polygon,
    Other(String),
}

impl AnnotationKind {
    /// The wire name of the kind.
    pub fn as_str(&self) -> &str {
        match self {
            AnnotationKind::BBox => "bbox",
            AnnotationKind::Polygon => "polygon",
            AnnotationKind::Other(name) => name,
        }
    }
}

impl From<String> for AnnotationKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            "bbox" => AnnotationKind::BBox,
            "polygon" => AnnotationKind::Polygon,
            _ => AnnotationKind::Other(name),
        }
    }
}

impl From<&str> for AnnotationKind {
    fn from(name: &str) -> Self {
        AnnotationKind::from(name.to_string())
    }
}

impl From<AnnotationKind> for String {
    fn from(kind: AnnotationKind) -> Self {
        match kind {
            AnnotationKind::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pixel dimensions of the annotated image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    /// Creates a new image size.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns true if either side is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

fn non_empty_or_unknown(value: Option<&str>) -> &str {
    match value {
        Some(value) if !value.is_empty() => value,
        _ => UNKNOWN_LABEL,
    }
}

// ============================================================================
// JSON representation
// ============================================================================

/// The fields of one JSON object, consumed key by key.
///
/// Whatever is not taken ends up in the `extra` map of the model type.
struct RawFields(ExtraFields);

impl RawFields {
    fn from_deserializer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        ExtraFields::deserialize(deserializer).map(Self)
    }

    /// Removes and parses `key`; a value of the wrong shape stays behind.
    fn take<T: DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        let value = self.0.remove(key)?;
        match T::deserialize(&value) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                log::debug!("keeping malformed '{key}' field as raw JSON: {err}");
                self.0.insert(key.to_string(), value);
                None
            }
        }
    }

    /// Reads a label the way editors treat it: any truthy scalar is a name.
    fn take_label(&mut self) -> Option<String> {
        match self.0.get("label")? {
            Value::String(_) => {}
            Value::Number(number) if number.as_f64() != Some(0.0) => {
                return Some(number.to_string())
            }
            Value::Bool(true) => return Some("true".to_string()),
            _ => return None,
        }
        self.take("label")
    }

    fn into_extra(self) -> ExtraFields {
        self.0
    }
}

/// Writes `value` under `key` unless a raw value of that name is carried.
fn serialize_typed<M, T>(
    map: &mut M,
    extra: &ExtraFields,
    key: &'static str,
    value: Option<&T>,
) -> Result<(), M::Error>
where
    M: SerializeMap,
    T: Serialize + ?Sized,
{
    match value {
        Some(value) if !extra.contains_key(key) => map.serialize_entry(key, value),
        _ => Ok(()),
    }
}

fn serialize_extra<M: SerializeMap>(map: &mut M, extra: &ExtraFields) -> Result<(), M::Error> {
    for (key, value) in extra {
        map.serialize_entry(key, value)?;
    }
    Ok(())
}

/// A confidence score written like any other editor number.
struct Score(f64);

impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_number(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for AnnotationSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = RawFields::from_deserializer(deserializer)?;
        Ok(Self {
            image: fields.take("image").unwrap_or_default(),
            tool: fields.take("tool"),
            annotations: fields.take("annotations").unwrap_or_default(),
            extra: fields.into_extra(),
        })
    }
}

impl Serialize for AnnotationSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        serialize_typed(&mut map, &self.extra, "image", Some(&self.image))?;
        serialize_typed(&mut map, &self.extra, "tool", self.tool.as_ref())?;
        serialize_typed(&mut map, &self.extra, "annotations", Some(&self.annotations))?;
        serialize_extra(&mut map, &self.extra)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for Annotation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = RawFields::from_deserializer(deserializer)?;
        Ok(Self {
            kind: fields.take("type"),
            label: fields.take_label(),
            confidence: fields.take("confidence"),
            bbox: fields.take("bbox"),
            points: fields.take("points"),
            extra: fields.into_extra(),
        })
    }
}

impl Serialize for Annotation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extra = &self.extra;
        let mut map = serializer.serialize_map(None)?;
        serialize_typed(&mut map, extra, "type", self.kind.as_ref())?;
        serialize_typed(&mut map, extra, "label", self.label.as_ref())?;
        serialize_typed(&mut map, extra, "confidence", self.confidence.map(Score).as_ref())?;
        serialize_typed(&mut map, extra, "bbox", self.bbox.as_ref())?;
        serialize_typed(&mut map, extra, "points", self.points.as_ref())?;
        serialize_extra(&mut map, extra)?;
        map.end()
    }
}
