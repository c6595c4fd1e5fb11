//! Polygon vertices and polygon geometry helpers.

use serde::{Deserialize, Serialize, Serializer};

/// A polygon vertex in pixel coordinates.
///
/// Serialized as a two-element array `[x, y]`, which is how annotation
/// editors store polygon points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point(
    #[serde(serialize_with = "serialize_number")] pub f64,
    #[serde(serialize_with = "serialize_number")] pub f64,
);

impl Point {
    /// Creates a new point.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self(x, y)
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.1
    }

    /// Returns true if both coordinates are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.is_finite() && self.1.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self(x, y)
    }
}

/// Largest magnitude below which every whole `f64` is an exact integer.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Writes whole numbers without a fractional part (`10`, not `10.0`).
///
/// Editor JSON stores pixel values as plain numbers; this keeps a parsed and
/// re-written set textually close to its input.
pub(crate) fn serialize_number<S: Serializer>(
    value: &f64,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// Area enclosed by a polygon, using the shoelace formula.
///
/// Returns 0 for fewer than three vertices. Orientation does not matter.
pub fn polygon_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let twice_area: f64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.x() * b.y() - b.x() * a.y())
        .sum();

    twice_area.abs() / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_serializes_as_pair() {
        let json = serde_json::to_string(&Point::new(1.5, 2.0)).unwrap();
        assert_eq!(json, "[1.5,2]");

        let parsed: Point = serde_json::from_str("[3, 4]").unwrap();
        assert_eq!(parsed, Point::new(3.0, 4.0));
    }

    #[test]
    fn test_whole_numbers_written_without_fraction() {
        let json = serde_json::to_value(Point::new(-3.0, 1e20)).unwrap();
        assert_eq!(json, serde_json::json!([-3, 1e20]));
        assert!(json[0].is_i64());
        assert!(json[1].is_f64());

        let nan = serde_json::to_string(&Point::new(f64::NAN, 0.25)).unwrap();
        assert_eq!(nan, "[null,0.25]");
    }

    #[test]
    fn test_point_is_finite() {
        assert!(Point::new(10.0, 20.0).is_finite());
        assert!(!Point::new(f64::NAN, 20.0).is_finite());
        assert!(!Point::new(10.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_polygon_area() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        assert!((polygon_area(&square) - 1.0).abs() < 1e-12);

        let triangle = [Point::new(0.0, 0.0), Point::new(2.0, 0.0), Point::new(1.0, 2.0)];
        assert!((polygon_area(&triangle) - 2.0).abs() < 1e-12);

        // Clockwise winding gives the same area.
        let reversed: Vec<Point> = triangle.iter().rev().copied().collect();
        assert!((polygon_area(&reversed) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_polygon_area_degenerate() {
        assert_eq!(polygon_area(&[]), 0.0);
        assert_eq!(polygon_area(&[Point::new(0.0, 0.0), Point::new(5.0, 5.0)]), 0.0);
    }
}
