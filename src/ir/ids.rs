//! Newtype IDs for the numeric identifiers assigned during export.
//!
//! COCO wants 1-based category and annotation ids while YOLO wants 0-based
//! class indices. Keeping them as distinct types stops one from leaking into
//! the other format by accident.

use serde::Serialize;
use std::fmt;

/// A 1-based category identifier (COCO `category_id`).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CategoryId(pub u64);

impl CategoryId {
    /// Creates a new CategoryId.
    #[inline]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying u64 value.
    #[inline]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CategoryId({})", self.0)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A 1-based identifier for an emitted annotation.
///
/// Assigned sequentially over the annotations a format actually writes, so
/// skipped annotations never leave gaps.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct AnnotationId(pub u64);

impl AnnotationId {
    /// Creates a new AnnotationId.
    #[inline]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying u64 value.
    #[inline]
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Returns the id that follows this one.
    #[inline]
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Debug for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnnotationId({})", self.0)
    }
}

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A 0-based YOLO class index.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ClassIndex(pub usize);

impl ClassIndex {
    /// Returns the underlying index.
    #[inline]
    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl fmt::Debug for ClassIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassIndex({})", self.0)
    }
}

impl fmt::Display for ClassIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_equality() {
        assert_eq!(CategoryId(1), CategoryId(1));
        assert_ne!(CategoryId(1), CategoryId(2));
    }

    #[test]
    fn test_annotation_id_next() {
        let first = AnnotationId::new(1);
        assert_eq!(first.next(), AnnotationId(2));
        assert_eq!(first.next().next().as_u64(), 3);
    }

    #[test]
    fn test_display_is_bare_number() {
        assert_eq!(CategoryId(7).to_string(), "7");
        assert_eq!(ClassIndex(0).to_string(), "0");
        assert_eq!(format!("{:?}", AnnotationId(3)), "AnnotationId(3)");
    }
}
