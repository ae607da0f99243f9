//! Counting labelled words inside regions of interest.
//!
//! Words come from a host text extractor (one entry per word with its box).
//! A word belongs to a region when its center falls inside the region; its
//! label is the trimmed text. Repeated renderings of the same word are
//! collapsed with [`crate::dedupe`].

use std::collections::BTreeMap;

use crate::dedupe::{DEFAULT_DEDUP_THRESHOLD, Detection, DetectionSet};
use crate::geometry::BBox;

/// A word extracted from a page.
///
/// The serde shape matches the JSON emitted by word extractors:
/// `{"page": 1, "text": "P1", "x0": .., "top": .., "x1": .., "bottom": ..}`.
/// `page` is 1-based and defaults to 1 when absent.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Word {
    #[cfg_attr(feature = "serde", serde(default = "first_page"))]
    pub page: usize,
    pub text: String,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub bbox: BBox,
}

#[cfg(feature = "serde")]
fn first_page() -> usize {
    1
}

impl Word {
    pub fn new(page: usize, text: impl Into<String>, bbox: BBox) -> Self {
        Self {
            page,
            text: text.into(),
            bbox,
        }
    }
}

/// Options for [`count_words`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CountOptions {
    /// Center distance below which two occurrences of a label are merged.
    /// Default: [`DEFAULT_DEDUP_THRESHOLD`].
    pub threshold: f64,
    /// Only count words whose label equals this, ignoring case.
    pub label_filter: Option<String>,
}

impl Default for CountOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_DEDUP_THRESHOLD,
            label_filter: None,
        }
    }
}

impl CountOptions {
    fn accepts(&self, label: &str) -> bool {
        match &self.label_filter {
            Some(wanted) => label.to_lowercase() == wanted.trim().to_lowercase(),
            None => true,
        }
    }
}

/// Whether the word's center lies inside any of `regions`.
///
/// An empty region list means the whole page is of interest.
pub fn word_in_regions(word: &Word, regions: &[BBox]) -> bool {
    if regions.is_empty() {
        return true;
    }
    let center = word.bbox.center();
    regions.iter().any(|r| r.contains_point(&center))
}

/// Deduplicate and group the words of one page that fall inside `regions`.
///
/// Words with blank text are skipped. A word inside several overlapping
/// regions is still considered once. The `page` field of the words is not
/// inspected; see [`count_words_by_page`] for multi-page input.
pub fn count_words(words: &[Word], regions: &[BBox], options: &CountOptions) -> DetectionSet {
    let mut set = DetectionSet::new();
    for word in words {
        let label = word.text.trim();
        if label.is_empty() || !options.accepts(label) {
            continue;
        }
        if !word_in_regions(word, regions) {
            continue;
        }
        set.insert(Detection::new(label, word.bbox), options.threshold);
    }
    set
}

/// Detections of a single page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageDetections {
    /// 1-based page number.
    pub page: usize,
    pub detections: DetectionSet,
}

/// Split `words` by page and run [`count_words`] on each page.
///
/// Deduplication never crosses pages. Pages are returned in ascending
/// order; pages with no words are absent.
pub fn count_words_by_page(
    words: &[Word],
    regions: &[BBox],
    options: &CountOptions,
) -> Vec<PageDetections> {
    let mut by_page: BTreeMap<usize, Vec<Word>> = BTreeMap::new();
    for word in words {
        by_page.entry(word.page).or_default().push(word.clone());
    }

    by_page
        .into_iter()
        .map(|(page, page_words)| PageDetections {
            page,
            detections: count_words(&page_words, regions, options),
        })
        .collect()
}
