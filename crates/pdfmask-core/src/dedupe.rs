//! Proximity deduplication of text detections.
//!
//! Some PDF generators draw the same label more than once at (almost) the
//! same place, for bold effects or because layers overlap. Counting such a
//! page naively counts the label twice. A detection is treated as a repeat
//! when its center lies close to the center of an occurrence already kept
//! under the same label.
//!
//! The clustering is greedy: the first occurrence seen becomes the
//! representative, later ones within the threshold are dropped, and the
//! representative never moves. A chain of detections each near its
//! predecessor but not near the first is therefore split into several
//! occurrences.

use std::collections::HashMap;

use crate::geometry::BBox;

/// Default center distance (in points) under which two detections of the
/// same label are considered the same occurrence.
pub const DEFAULT_DEDUP_THRESHOLD: f64 = 5.0;

/// Returns whether `new_box` repeats any box in `existing`.
///
/// True when the Euclidean distance between the center of `new_box` and the
/// center of some existing box is strictly less than `threshold`.
pub fn is_duplicate(new_box: &BBox, existing: &[BBox], threshold: f64) -> bool {
    let center = new_box.center();
    existing
        .iter()
        .any(|b| center.distance(&b.center()) < threshold)
}

/// One recognized text occurrence on a page.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Detection {
    pub label: String,
    pub bbox: BBox,
}

impl Detection {
    pub fn new(label: impl Into<String>, bbox: BBox) -> Self {
        Self {
            label: label.into(),
            bbox,
        }
    }
}

/// Number of distinct occurrences of one label.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

/// Deduplicated detections grouped by label.
///
/// Labels keep the order in which they were first seen; occurrences keep
/// the order in which they were accepted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectionSet {
    groups: Vec<(String, Vec<BBox>)>,
    index: HashMap<String, usize>,
}

impl DetectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a detection unless it repeats a kept occurrence of its label.
    ///
    /// Returns `true` when the detection was kept as a new occurrence.
    pub fn insert(&mut self, detection: Detection, threshold: f64) -> bool {
        let slot = match self.index.get(&detection.label) {
            Some(&i) => i,
            None => {
                self.index
                    .insert(detection.label.clone(), self.groups.len());
                self.groups.push((detection.label, Vec::new()));
                self.groups.len() - 1
            }
        };

        let kept = &mut self.groups[slot].1;
        if is_duplicate(&detection.bbox, kept, threshold) {
            return false;
        }
        kept.push(detection.bbox);
        true
    }

    /// Kept occurrences of `label`, in acceptance order.
    pub fn occurrences(&self, label: &str) -> &[BBox] {
        self.index
            .get(label)
            .map(|&i| self.groups[i].1.as_slice())
            .unwrap_or(&[])
    }

    /// Iterate over `(label, occurrences)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[BBox])> {
        self.groups
            .iter()
            .map(|(label, boxes)| (label.as_str(), boxes.as_slice()))
    }

    /// Labels in first-seen order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(label, _)| label.as_str())
    }

    /// Per-label occurrence counts, in first-seen order.
    pub fn counts(&self) -> Vec<LabelCount> {
        self.groups
            .iter()
            .map(|(label, boxes)| LabelCount {
                label: label.clone(),
                count: boxes.len(),
            })
            .collect()
    }

    /// Total number of kept occurrences across all labels.
    pub fn total(&self) -> usize {
        self.groups.iter().map(|(_, boxes)| boxes.len()).sum()
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
