//! Words to count, extracted from a PDF or read from a JSON word list.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use pdfmask_core::{BBox, Word};
use pdfplumber::WordOptions;

use crate::cli::Size;
use crate::page_range::PageSelection;
use crate::shared::{extract_page, open_extractor, read_words, resolve_pages};

/// The words of one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageWords {
    /// 1-based page number.
    pub page: usize,
    /// Visible page size; known only for PDF input.
    pub size: Option<Size>,
    pub words: Vec<Word>,
}

/// Whether `path` starts with a PDF header.
fn looks_like_pdf(path: &Path) -> bool {
    let Ok(file) = File::open(path) else {
        return false;
    };
    let mut head = Vec::with_capacity(5);
    if file.take(5).read_to_end(&mut head).is_err() {
        return false;
    }
    head == b"%PDF-"
}

/// Words of the selected pages, in page order.
///
/// A PDF yields every selected page, including pages without words. A JSON
/// word list (or `-` for stdin) yields only the pages that have words.
pub fn load(path: &Path, pages: Option<&PageSelection>) -> Result<Vec<PageWords>, i32> {
    if path != Path::new("-") && looks_like_pdf(path) {
        from_pdf(path, pages)
    } else {
        from_json(path, pages)
    }
}

fn from_pdf(path: &Path, pages: Option<&PageSelection>) -> Result<Vec<PageWords>, i32> {
    let pdf = open_extractor(path)?;
    let indices = resolve_pages(pages, pdf.page_count())?;
    let options = WordOptions::default();

    let mut result = Vec::with_capacity(indices.len());
    for idx in indices {
        let page = extract_page(&pdf, idx)?;
        let words: Vec<Word> = page
            .extract_words(&options)
            .into_iter()
            .map(|w| {
                let bbox = BBox::new(w.bbox.x0, w.bbox.top, w.bbox.x1, w.bbox.bottom);
                Word::new(idx + 1, w.text, bbox)
            })
            .collect();
        tracing::debug!(page = idx + 1, words = words.len(), "extracted words");
        result.push(PageWords {
            page: idx + 1,
            size: Some(Size {
                width: page.width(),
                height: page.height(),
            }),
            words,
        });
    }
    Ok(result)
}

fn from_json(path: &Path, pages: Option<&PageSelection>) -> Result<Vec<PageWords>, i32> {
    let mut by_page: BTreeMap<usize, Vec<Word>> = BTreeMap::new();
    for word in read_words(path)? {
        by_page.entry(word.page).or_default().push(word);
    }
    Ok(by_page
        .into_iter()
        .filter(|(page, _)| pages.is_none_or(|sel| sel.contains(*page)))
        .map(|(page, words)| PageWords {
            page,
            size: None,
            words,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn pdf_header_is_detected() {
        let mut pdf = tempfile::NamedTempFile::new().unwrap();
        pdf.write_all(b"%PDF-1.5\n%...").unwrap();
        assert!(looks_like_pdf(pdf.path()));

        let mut json = tempfile::NamedTempFile::new().unwrap();
        json.write_all(b"[]").unwrap();
        assert!(!looks_like_pdf(json.path()));
        assert!(!looks_like_pdf(Path::new("/nonexistent/plan.pdf")));
    }

    #[test]
    fn json_words_are_grouped_and_filtered() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"[
                {"page": 2, "text": "B", "x0": 0, "top": 0, "x1": 5, "bottom": 5},
                {"text": "A", "x0": 0, "top": 0, "x1": 5, "bottom": 5},
                {"page": 3, "text": "C", "x0": 0, "top": 0, "x1": 5, "bottom": 5}
            ]"#,
        )
        .unwrap();

        let all = load(file.path(), None).unwrap();
        let pages: Vec<usize> = all.iter().map(|p| p.page).collect();
        assert_eq!(pages, vec![1, 2, 3]);
        assert!(all.iter().all(|p| p.size.is_none()));

        let selection: PageSelection = "2-".parse().unwrap();
        let some = load(file.path(), Some(&selection)).unwrap();
        let pages: Vec<usize> = some.iter().map(|p| p.page).collect();
        assert_eq!(pages, vec![2, 3]);
    }
}
