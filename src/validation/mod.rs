//! Annotation set validation for labelport.
//!
//! Export never fails on bad input; it skips what it cannot write. This
//! module finds those entries up front:
//! - Missing or unrecognized kinds and labels
//! - Missing or malformed geometry (boxes, polygon points)
//! - Out-of-range confidence scores
//!
//! Boxes are not checked against the image bounds.

mod report;

pub use report::{IssueCode, IssueContext, Severity, ValidationIssue, ValidationReport};

use crate::ir::{Annotation, AnnotationKind, AnnotationSet};

/// Options for validation behavior.
#[derive(Clone, Debug, Default)]
pub struct ValidateOptions {
    /// If true, treat warnings as errors.
    pub strict: bool,
}

/// Validates an annotation set and returns a report of all issues found.
pub fn validate_annotation_set(set: &AnnotationSet, _opts: &ValidateOptions) -> ValidationReport {
    let mut report = ValidationReport::new();

    if set.image.trim().is_empty() {
        report.add(ValidationIssue::warning(
            IssueCode::EmptyImageName,
            "Empty image name",
            IssueContext::AnnotationSet,
        ));
    }

    for (index, annotation) in set.annotations.iter().enumerate() {
        validate_annotation(annotation, IssueContext::Annotation { index }, &mut report);
    }

    report
}

/// Validates a single annotation.
fn validate_annotation(
    annotation: &Annotation,
    context: IssueContext,
    report: &mut ValidationReport,
) {
    match &annotation.kind {
        None => report.add(ValidationIssue::warning(
            IssueCode::MissingKind,
            "Missing type; the annotation is only kept by json and yaml",
            context.clone(),
        )),
        Some(AnnotationKind::Other(name)) => report.add(ValidationIssue::warning(
            IssueCode::UnknownKind,
            format!(
                "Unknown type '{}'; the annotation is only kept by json and yaml",
                name
            ),
            context.clone(),
        )),
        Some(AnnotationKind::BBox) => validate_bbox(annotation, &context, report),
        Some(AnnotationKind::Polygon) => validate_polygon(annotation, &context, report),
    }

    if annotation.label.as_deref().map_or(true, str::is_empty) {
        report.add(ValidationIssue::warning(
            IssueCode::MissingLabel,
            "Missing label; exported as 'unknown'",
            context.clone(),
        ));
    }

    if let Some(confidence) = annotation.confidence {
        if !(0.0..=1.0).contains(&confidence) {
            report.add(ValidationIssue::warning(
                IssueCode::ConfidenceOutOfRange,
                format!("Confidence {} is outside [0, 1]", confidence),
                context,
            ));
        }
    }
}

fn validate_bbox(annotation: &Annotation, context: &IssueContext, report: &mut ValidationReport) {
    let Some(bbox) = &annotation.bbox else {
        report.add(ValidationIssue::error(
            IssueCode::MissingBBox,
            "Type 'bbox' without a well-formed bbox; skipped by every detection format",
            context.clone(),
        ));
        return;
    };

    if !bbox.is_finite() {
        report.add(ValidationIssue::error(
            IssueCode::BBoxNotFinite,
            format!(
                "Non-finite bbox ({}, {}, {}, {})",
                bbox.x, bbox.y, bbox.width, bbox.height
            ),
            context.clone(),
        ));
        return; // Skip further bbox checks if values are invalid
    }

    if !bbox.has_positive_size() {
        report.add(ValidationIssue::warning(
            IssueCode::InvalidBBoxSize,
            format!("Zero or negative size {}x{}", bbox.width, bbox.height),
            context.clone(),
        ));
    }
}

fn validate_polygon(
    annotation: &Annotation,
    context: &IssueContext,
    report: &mut ValidationReport,
) {
    let Some(points) = &annotation.points else {
        report.add(ValidationIssue::error(
            IssueCode::MissingPoints,
            "Type 'polygon' without a well-formed point list",
            context.clone(),
        ));
        return;
    };

    if points.len() < 3 {
        report.add(ValidationIssue::error(
            IssueCode::TooFewPoints,
            format!("Polygon has {} point(s), at least 3 are needed", points.len()),
            context.clone(),
        ));
    }

    if let Some(position) = points.iter().position(|p| !p.is_finite()) {
        report.add(ValidationIssue::error(
            IssueCode::PointNotFinite,
            format!("Point {} has non-finite coordinates", position),
            context.clone(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{BBox, Point};

    fn triangle() -> Annotation {
        Annotation::polygon(
            "road",
            [Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(0.0, 3.0)],
        )
    }

    fn valid_set() -> AnnotationSet {
        AnnotationSet::new("image.jpg")
            .with_tool("object_detection")
            .with_annotation(
                Annotation::bbox("person", BBox::new(10.0, 20.0, 90.0, 180.0)).with_confidence(0.9),
            )
            .with_annotation(triangle())
    }

    fn validate(set: &AnnotationSet) -> ValidationReport {
        validate_annotation_set(set, &ValidateOptions::default())
    }

    #[test]
    fn test_valid_set() {
        let report = validate(&valid_set());
        assert!(
            report.is_clean(),
            "Expected no issues, got: {:?}",
            report.issues
        );
    }

    #[test]
    fn test_empty_image_name() {
        let mut set = valid_set();
        set.image = "  ".into();

        let report = validate(&set);
        assert_eq!(report.warning_count(), 1);
        assert!(report.has_code(IssueCode::EmptyImageName));
    }

    #[test]
    fn test_missing_and_unknown_kind() {
        let set = AnnotationSet::new("a.jpg")
            .with_annotation(Annotation {
                label: Some("x".into()),
                ..Default::default()
            })
            .with_annotation(Annotation {
                kind: Some(AnnotationKind::from("keypoint")),
                label: Some("x".into()),
                ..Default::default()
            });

        let report = validate(&set);
        assert!(report.has_code(IssueCode::MissingKind));
        assert!(report.has_code(IssueCode::UnknownKind));
        assert_eq!(report.error_count(), 0);
    }

    #[test]
    fn test_missing_label() {
        let mut set = valid_set();
        set.annotations[0].label = None;
        set.annotations[1].label = Some(String::new());

        let report = validate(&set);
        assert_eq!(report.warning_count(), 2);
        assert!(report.has_code(IssueCode::MissingLabel));
    }

    #[test]
    fn test_missing_bbox() {
        let mut set = valid_set();
        set.annotations[0].bbox = None;

        let report = validate(&set);
        assert_eq!(report.error_count(), 1);
        assert!(report.has_code(IssueCode::MissingBBox));
    }

    #[test]
    fn test_bbox_not_finite() {
        let mut set = valid_set();
        set.annotations[0].bbox = Some(BBox::new(f64::NAN, 20.0, 90.0, 180.0));

        let report = validate(&set);
        assert!(report.has_code(IssueCode::BBoxNotFinite));
        assert!(!report.has_code(IssueCode::InvalidBBoxSize));
    }

    #[test]
    fn test_bbox_invalid_size() {
        let mut set = valid_set();
        set.annotations[0].bbox = Some(BBox::new(10.0, 20.0, 0.0, -5.0));

        let report = validate(&set);
        assert_eq!(report.warning_count(), 1);
        assert!(report.has_code(IssueCode::InvalidBBoxSize));
    }

    #[test]
    fn test_polygon_issues() {
        let mut set = valid_set();
        set.annotations[1].points = None;
        set = set.with_annotation(Annotation::polygon(
            "line",
            [Point::new(0.0, 0.0), Point::new(f64::INFINITY, 1.0)],
        ));

        let report = validate(&set);
        assert!(report.has_code(IssueCode::MissingPoints));
        assert!(report.has_code(IssueCode::TooFewPoints));
        assert!(report.has_code(IssueCode::PointNotFinite));
        assert_eq!(report.error_count(), 3);
    }

    #[test]
    fn test_confidence_out_of_range() {
        let mut set = valid_set();
        set.annotations[0].confidence = Some(1.5);
        set.annotations[1].confidence = Some(f64::NAN);

        let report = validate(&set);
        assert_eq!(
            report
                .issues
                .iter()
                .filter(|i| i.code == IssueCode::ConfidenceOutOfRange)
                .count(),
            2
        );
    }

    #[test]
    fn test_issue_context_points_at_annotation() {
        let mut set = valid_set();
        set.annotations[1].label = None;

        let report = validate(&set);
        let issue = &report.issues[0];
        assert!(matches!(issue.context, IssueContext::Annotation { index: 1 }));
        assert!(issue.to_string().contains("annotation #1"));
    }

    #[test]
    fn test_report_json_shape() {
        let mut set = valid_set();
        set.annotations[0].bbox = None;

        let json = validate(&set).to_json_value();
        assert_eq!(json["error_count"], 1);
        assert_eq!(json["warning_count"], 0);
        assert_eq!(json["issues"][0]["severity"], "error");
        assert_eq!(json["issues"][0]["code"], "MissingBBox");
        assert_eq!(json["issues"][0]["context"]["scope"], "annotation");
        assert_eq!(json["issues"][0]["context"]["index"], 0);
    }
}
