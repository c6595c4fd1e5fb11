//! Bounding boxes in the editor's XYWH pixel layout.

use serde::{Deserialize, Serialize};

use super::coord::{serialize_number, Point};
use super::model::ImageSize;

/// An axis-aligned bounding box: top-left corner plus size, in pixels.
///
/// This is the layout annotation editors produce and COCO consumes
/// directly. Like the rest of the model it does NOT enforce a positive size;
/// validation reports malformed boxes instead of rejecting them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    #[serde(serialize_with = "serialize_number")]
    pub x: f64,
    #[serde(serialize_with = "serialize_number")]
    pub y: f64,
    #[serde(serialize_with = "serialize_number")]
    pub width: f64,
    #[serde(serialize_with = "serialize_number")]
    pub height: f64,
}

impl BBox {
    /// Creates a new bounding box from its top-left corner and size.
    #[inline]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a bounding box from explicit corner coordinates.
    #[inline]
    pub fn from_xyxy(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self::new(xmin, ymin, xmax - xmin, ymax - ymin)
    }

    /// The smallest box containing every point, or `None` for no points.
    pub fn enclosing(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let (mut xmin, mut ymin) = (first.x(), first.y());
        let (mut xmax, mut ymax) = (xmin, ymin);

        for point in &points[1..] {
            xmin = xmin.min(point.x());
            ymin = ymin.min(point.y());
            xmax = xmax.max(point.x());
            ymax = ymax.max(point.y());
        }

        Some(Self::from_xyxy(xmin, ymin, xmax, ymax))
    }

    #[inline]
    pub fn xmin(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn ymin(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn xmax(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn ymax(&self) -> f64 {
        self.y + self.height
    }

    /// Returns the centre point `(cx, cy)`.
    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Returns `width * height`.
    ///
    /// May be negative if exactly one side is negative.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Returns true if all four values are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    /// Returns true if both sides are strictly positive.
    #[inline]
    pub fn has_positive_size(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Converts to normalized `(cx, cy, w, h)` relative to the image size.
    ///
    /// No clamping is applied; boxes outside the image produce values
    /// outside `[0, 1]`.
    pub fn to_normalized_cxcywh(&self, image: ImageSize) -> (f64, f64, f64, f64) {
        let (image_w, image_h) = (image.width as f64, image.height as f64);
        let (cx, cy) = self.center();
        (
            cx / image_w,
            cy / image_h,
            self.width / image_w,
            self.height / image_h,
        )
    }
}
