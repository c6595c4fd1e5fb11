//! Category extraction shared by the COCO and YOLO encoders.
//!
//! Categories are never stored on an [`AnnotationSet`]; they are derived
//! from the distinct labels in first-occurrence order. Ids are therefore
//! stable within one export call but shift if annotations are reordered.

use std::collections::HashMap;

use super::ids::{CategoryId, ClassIndex};
use super::model::{Annotation, AnnotationSet};

/// Distinct labels of an annotation set, in first-occurrence order.
#[derive(Clone, Debug, Default)]
pub struct CategoryIndex {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl CategoryIndex {
    /// Builds the index over every annotation of the set, whatever its kind.
    ///
    /// Missing or empty labels are indexed as `"unknown"`.
    pub fn from_set(set: &AnnotationSet) -> Self {
        Self::from_annotations(&set.annotations)
    }

    /// Builds the index over the given annotations.
    pub fn from_annotations<'a>(annotations: impl IntoIterator<Item = &'a Annotation>) -> Self {
        let mut index = Self::default();
        for annotation in annotations {
            index.insert(annotation.label_or_unknown());
        }
        index
    }

    fn insert(&mut self, label: &str) {
        if !self.positions.contains_key(label) {
            self.positions.insert(label.to_string(), self.names.len());
            self.names.push(label.to_string());
        }
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if no labels were found.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Labels in first-occurrence order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Iterates over `(CategoryId, name)` pairs with 1-based ids.
    pub fn categories(&self) -> impl Iterator<Item = (CategoryId, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(idx, name)| (CategoryId::new(idx as u64 + 1), name.as_str()))
    }

    /// The 1-based COCO category id for `label`.
    pub fn category_id(&self, label: &str) -> Option<CategoryId> {
        self.positions
            .get(label)
            .map(|&pos| CategoryId::new(pos as u64 + 1))
    }

    /// The 0-based YOLO class index for `label`.
    pub fn class_index(&self, label: &str) -> Option<ClassIndex> {
        self.positions.get(label).map(|&pos| ClassIndex(pos))
    }
}
