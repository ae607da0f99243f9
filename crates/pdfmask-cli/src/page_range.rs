use std::str::FromStr;

/// A set of 1-based pages written like `1,3-5,8-`.
///
/// `N-` is open ended and runs to the last page. The selection can be
/// tested page by page without knowing the document length, or resolved
/// against a page count into 0-based indices.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSelection {
    spans: Vec<(usize, Option<usize>)>,
}

impl PageSelection {
    /// Exactly one 1-based page.
    pub fn single(page: usize) -> Result<Self, String> {
        if page == 0 {
            return Err("page 0 is invalid (pages start at 1)".to_string());
        }
        Ok(Self {
            spans: vec![(page, Some(page))],
        })
    }

    /// Whether 1-based `page` is selected.
    pub fn contains(&self, page: usize) -> bool {
        self.spans
            .iter()
            .any(|&(start, end)| page >= start && end.is_none_or(|end| page <= end))
    }

    /// Sorted, deduplicated 0-based indices of the selected pages.
    ///
    /// Explicit page numbers past `page_count` are an error.
    pub fn resolve(&self, page_count: usize) -> Result<Vec<usize>, String> {
        let mut pages = Vec::new();
        for &(start, end) in &self.spans {
            if start > page_count {
                return Err(format!(
                    "page {start} exceeds document page count ({page_count})"
                ));
            }
            let last = match end {
                Some(end) if end > page_count => {
                    return Err(format!(
                        "page {end} exceeds document page count ({page_count})"
                    ));
                }
                Some(end) => end,
                None => page_count,
            };
            pages.extend((start..=last).map(|p| p - 1));
        }
        pages.sort_unstable();
        pages.dedup();
        Ok(pages)
    }
}

fn page_number(text: &str) -> Result<usize, String> {
    let text = text.trim();
    let page: usize = text
        .parse()
        .map_err(|_| format!("invalid page number: '{text}'"))?;
    if page == 0 {
        return Err("page 0 is invalid (pages start at 1)".to_string());
    }
    Ok(page)
}

impl FromStr for PageSelection {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut spans = Vec::new();
        for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let span = match part.split_once('-') {
                Some((start, end)) if end.trim().is_empty() => (page_number(start)?, None),
                Some((start, end)) => {
                    let (start, end) = (page_number(start)?, page_number(end)?);
                    if end < start {
                        return Err(format!("descending page range: '{part}'"));
                    }
                    (start, Some(end))
                }
                None => {
                    let page = page_number(part)?;
                    (page, Some(page))
                }
            };
            spans.push(span);
        }
        if spans.is_empty() {
            return Err("empty page range".to_string());
        }
        Ok(Self { spans })
    }
}
