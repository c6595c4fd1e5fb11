#![allow(dead_code)]

use std::collections::BTreeSet;

use labelport::ir::{Annotation, AnnotationKind, AnnotationSet, BBox, Point};
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Distinct labels in first-occurrence order, with missing labels as "unknown".
pub fn distinct_labels(set: &AnnotationSet) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut labels = Vec::new();
    for ann in &set.annotations {
        let label = ann.label_or_unknown().to_string();
        if seen.insert(label.clone()) {
            labels.push(label);
        }
    }
    labels
}

/// Number of annotations the detection formats write.
pub fn bbox_count(set: &AnnotationSet) -> usize {
    set.bboxes().count()
}

// Quarter-pixel values survive a JSON round trip exactly.
fn quarter_strategy(max: u32) -> impl Strategy<Value = f64> {
    (0u32..=max * 4).prop_map(|q| q as f64 / 4.0)
}

fn image_name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,8}\\.(jpg|png)",
        Just("street, north.jpg".to_string()),
        Just("a&b <1>.jpg".to_string()),
        Just("ünïcode.jpg".to_string()),
    ]
}

fn label_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        4 => prop::sample::select(vec!["cat", "dog", "person", "car"]).prop_map(|s| Some(s.to_string())),
        1 => Just(None),
        1 => Just(Some(String::new())),
        1 => prop::sample::select(vec!["a,b", "say \"hi\"", "x: y", "<tag>", "straße"])
            .prop_map(|s| Some(s.to_string())),
    ]
}

fn kind_strategy() -> impl Strategy<Value = Option<AnnotationKind>> {
    prop_oneof![
        4 => Just(Some(AnnotationKind::BBox)),
        2 => Just(Some(AnnotationKind::Polygon)),
        1 => Just(Some(AnnotationKind::Other("keypoint".to_string()))),
        1 => Just(None),
    ]
}

pub fn arb_bbox() -> BoxedStrategy<BBox> {
    (
        quarter_strategy(2000),
        quarter_strategy(2000),
        quarter_strategy(1000),
        quarter_strategy(1000),
    )
        .prop_map(|(x, y, width, height)| BBox::new(x, y, width, height))
        .boxed()
}

pub fn arb_points(max: usize) -> BoxedStrategy<Vec<Point>> {
    proptest::collection::vec(
        (quarter_strategy(2000), quarter_strategy(2000)).prop_map(|(x, y)| Point::new(x, y)),
        0..=max,
    )
    .boxed()
}

/// Annotations whose geometry usually matches their kind but sometimes does not.
pub fn arb_annotation() -> BoxedStrategy<Annotation> {
    (
        kind_strategy(),
        label_strategy(),
        proptest::option::of((0u32..=1000).prop_map(|c| c as f64 / 1000.0)),
        proptest::option::weighted(0.8, arb_bbox()),
        proptest::option::weighted(0.3, arb_points(6)),
    )
        .prop_map(|(kind, label, confidence, bbox, points)| {
            let (bbox, points) = match kind {
                Some(AnnotationKind::BBox) => (bbox, None),
                Some(AnnotationKind::Polygon) => (None, points.or_else(|| Some(Vec::new()))),
                _ => (bbox, points),
            };
            Annotation {
                kind,
                label,
                confidence,
                bbox,
                points,
                ..Default::default()
            }
        })
        .boxed()
}

pub fn arb_annotation_set(max_anns: usize) -> BoxedStrategy<AnnotationSet> {
    (
        image_name_strategy(),
        proptest::option::of(prop::sample::select(vec!["object_detection", "segmentation"])),
        proptest::collection::vec(arb_annotation(), 0..=max_anns),
    )
        .prop_map(|(image, tool, annotations)| AnnotationSet {
            image,
            tool: tool.map(str::to_string),
            annotations,
            ..Default::default()
        })
        .boxed()
}
