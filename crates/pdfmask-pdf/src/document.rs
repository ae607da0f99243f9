//! Loading a PDF, reading page boxes and metadata, painting regions, saving.

use std::collections::HashSet;
use std::path::Path;

use lopdf::{Dictionary, Object, ObjectId, Stream};
use pdfmask_core::{BBox, subtract_many};

use crate::error::PdfBackendError;
use crate::page_geometry::{NativeRect, PageGeometry};
use crate::paint::{self, Rgb};

/// Visible size and boxes of one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageInfo {
    /// 0-based page index.
    pub index: usize,
    /// Visible width in points, after rotation and cropping.
    pub width: f64,
    /// Visible height in points, after rotation and cropping.
    pub height: f64,
    /// Normalized `/Rotate` value.
    pub rotation: i32,
    /// Raw MediaBox array values.
    pub media_box: BBox,
    /// Raw CropBox array values, if the page or an ancestor has one.
    pub crop_box: Option<BBox>,
}

/// Entries of the document `/Info` dictionary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<String>,
    pub mod_date: Option<String>,
}

impl DocumentMetadata {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.subject.is_none()
            && self.creator.is_none()
            && self.producer.is_none()
            && self.creation_date.is_none()
            && self.mod_date.is_none()
    }
}

/// An editable PDF document.
///
/// Painting never removes existing content: masked text stays in the
/// content stream underneath an opaque rectangle.
pub struct PdfDocument {
    inner: lopdf::Document,
    page_ids: Vec<ObjectId>,
    isolated: HashSet<ObjectId>,
}

impl PdfDocument {
    /// Open a PDF file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PdfBackendError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Parse a PDF from memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PdfBackendError> {
        let inner = lopdf::Document::load_mem(bytes)
            .map_err(|e| PdfBackendError::Parse(format!("failed to parse PDF: {e}")))?;
        if inner.is_encrypted() {
            return Err(PdfBackendError::Encrypted);
        }
        let page_ids: Vec<ObjectId> = inner.get_pages().values().copied().collect();
        Ok(Self {
            inner,
            page_ids,
            isolated: HashSet::new(),
        })
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    fn page_id(&self, index: usize) -> Result<ObjectId, PdfBackendError> {
        self.page_ids
            .get(index)
            .copied()
            .ok_or(PdfBackendError::PageOutOfRange {
                index,
                count: self.page_ids.len(),
            })
    }

    /// Boxes and visible size of the page at `index` (0-based).
    pub fn page_info(&self, index: usize) -> Result<PageInfo, PdfBackendError> {
        let page_id = self.page_id(index)?;
        let media_box = match resolve_inherited(&self.inner, page_id, b"MediaBox")? {
            Some(obj) => box_from_object(obj, "MediaBox")?,
            None => {
                return Err(PdfBackendError::Parse(
                    "MediaBox not found on page or ancestors".into(),
                ));
            }
        };
        let crop_box = resolve_inherited(&self.inner, page_id, b"CropBox")?
            .map(|obj| box_from_object(obj, "CropBox"))
            .transpose()?;
        let rotation = match resolve_inherited(&self.inner, page_id, b"Rotate")? {
            Some(obj) => {
                let raw = obj.as_i64().map_err(|e| {
                    PdfBackendError::Parse(format!("Rotate is not an integer: {e}"))
                })?;
                i32::try_from(raw.rem_euclid(360))
                    .map_err(|e| PdfBackendError::Parse(format!("Rotate out of range: {e}")))?
            }
            None => 0,
        };

        let geometry = PageGeometry::new(media_box, crop_box, rotation);
        Ok(PageInfo {
            index,
            width: geometry.width(),
            height: geometry.height(),
            rotation: geometry.rotation(),
            media_box,
            crop_box,
        })
    }

    /// Coordinate mapping of the page at `index`.
    pub fn geometry(&self, index: usize) -> Result<PageGeometry, PdfBackendError> {
        let info = self.page_info(index)?;
        Ok(PageGeometry::new(info.media_box, info.crop_box, info.rotation))
    }

    /// Document metadata from the trailer's `/Info` dictionary.
    ///
    /// A missing or malformed `/Info` yields empty metadata.
    pub fn metadata(&self) -> DocumentMetadata {
        let info = match self.inner.trailer.get(b"Info") {
            Ok(Object::Reference(id)) => self.inner.get_dictionary(*id).ok(),
            Ok(Object::Dictionary(dict)) => Some(dict),
            _ => None,
        };
        let Some(info) = info else {
            return DocumentMetadata::default();
        };
        let field = |key: &[u8]| text_entry(&self.inner, info, key);
        DocumentMetadata {
            title: field(b"Title"),
            author: field(b"Author"),
            subject: field(b"Subject"),
            creator: field(b"Creator"),
            producer: field(b"Producer"),
            creation_date: field(b"CreationDate"),
            mod_date: field(b"ModDate"),
        }
    }

    /// Paint opaque rectangles over `regions` (display space) on a page.
    ///
    /// Empty boxes are skipped. Returns the number of rectangles painted.
    pub fn fill_regions(
        &mut self,
        index: usize,
        regions: &[BBox],
        color: Rgb,
    ) -> Result<usize, PdfBackendError> {
        let rects = self.native_rects(index, regions)?;
        if rects.is_empty() {
            return Ok(0);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(page = index + 1, rects = rects.len(), %color, "filling regions");
        let ops = paint::fill_operations(&rects, color);
        self.append_to_page(index, paint::encode(ops)?)?;
        Ok(rects.len())
    }

    /// Stroke the outline of `regions` (display space) on a page.
    ///
    /// Empty boxes are skipped. Returns the number of rectangles drawn.
    pub fn outline_regions(
        &mut self,
        index: usize,
        regions: &[BBox],
        color: Rgb,
        line_width: f64,
    ) -> Result<usize, PdfBackendError> {
        let rects = self.native_rects(index, regions)?;
        if rects.is_empty() {
            return Ok(0);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(page = index + 1, rects = rects.len(), %color, line_width, "outlining regions");
        let ops = paint::stroke_operations(&rects, color, line_width);
        self.append_to_page(index, paint::encode(ops)?)?;
        Ok(rects.len())
    }

    /// Cover everything on the page except `keep` with `color`.
    ///
    /// Returns the covered boxes in display space. With no kept regions the
    /// whole page is covered.
    pub fn mask_outside(
        &mut self,
        index: usize,
        keep: &[BBox],
        color: Rgb,
    ) -> Result<Vec<BBox>, PdfBackendError> {
        let page = self.geometry(index)?.page_bbox();
        let covered = subtract_many(&page, keep);
        self.fill_regions(index, &covered, color)?;
        Ok(covered)
    }

    fn native_rects(&self, index: usize, regions: &[BBox]) -> Result<Vec<NativeRect>, PdfBackendError> {
        let geometry = self.geometry(index)?;
        Ok(regions
            .iter()
            .filter(|r| !r.is_empty())
            .map(|r| geometry.to_native_rect(r))
            .collect())
    }

    /// Append a content stream to a page.
    ///
    /// The page's existing content is wrapped in `q`/`Q` once so that any
    /// graphics state it leaves behind (transforms, clipping) does not
    /// apply to what is appended.
    fn append_to_page(&mut self, index: usize, content: Vec<u8>) -> Result<(), PdfBackendError> {
        let page_id = self.page_id(index)?;
        self.isolate_page_content(page_id)?;
        self.inner.add_page_contents(page_id, content)?;
        Ok(())
    }

    fn isolate_page_content(&mut self, page_id: ObjectId) -> Result<(), PdfBackendError> {
        if !self.isolated.insert(page_id) {
            return Ok(());
        }
        let existing = self.inner.get_page_contents(page_id);
        if existing.is_empty() {
            return Ok(());
        }

        let open = self
            .inner
            .add_object(Stream::new(Dictionary::new(), b"q\n".to_vec()));
        let close = self
            .inner
            .add_object(Stream::new(Dictionary::new(), b"\nQ\n".to_vec()));

        let mut contents: Vec<Object> = Vec::with_capacity(existing.len() + 2);
        contents.push(Object::Reference(open));
        contents.extend(existing.into_iter().map(Object::Reference));
        contents.push(Object::Reference(close));

        let page = self
            .inner
            .get_object_mut(page_id)
            .and_then(Object::as_dict_mut)?;
        page.set("Contents", contents);
        Ok(())
    }

    /// Compress streams and write the document to `path`.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<(), PdfBackendError> {
        self.inner.compress();
        self.inner.save(path)?;
        Ok(())
    }

    /// Compress streams and serialize the document.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>, PdfBackendError> {
        self.inner.compress();
        let mut buf = Vec::new();
        self.inner.save_to(&mut buf)?;
        Ok(buf)
    }
}

/// Look up `key` on the page, then on its `/Parent` chain.
fn resolve_inherited<'a>(
    doc: &'a lopdf::Document,
    page_id: ObjectId,
    key: &[u8],
) -> Result<Option<&'a Object>, PdfBackendError> {
    let mut current = page_id;
    // Bounds the walk on malformed trees whose /Parent links form a cycle.
    for _ in 0..64 {
        let dict = doc
            .get_dictionary(current)
            .map_err(|e| PdfBackendError::Parse(format!("failed to get page dictionary: {e}")))?;
        if let Ok(value) = dict.get(key) {
            let value = match value {
                Object::Reference(id) => doc.get_object(*id)?,
                other => other,
            };
            return Ok(Some(value));
        }
        match dict.get(b"Parent") {
            Ok(parent) => {
                current = parent
                    .as_reference()
                    .map_err(|e| PdfBackendError::Parse(format!("invalid /Parent reference: {e}")))?;
            }
            Err(_) => return Ok(None),
        }
    }
    Err(PdfBackendError::Parse("page tree /Parent chain too deep".into()))
}

fn box_from_object(obj: &Object, name: &str) -> Result<BBox, PdfBackendError> {
    let array = obj
        .as_array()
        .map_err(|e| PdfBackendError::Parse(format!("{name} is not an array: {e}")))?;
    let [a, b, c, d] = array.as_slice() else {
        return Err(PdfBackendError::Parse(format!(
            "expected 4-element array for {name}, got {}",
            array.len()
        )));
    };
    let (x0, y0, x1, y1) = (number(a)?, number(b)?, number(c)?, number(d)?);
    Ok(BBox::from_corners(x0, y0, x1, y1))
}

fn number(obj: &Object) -> Result<f64, PdfBackendError> {
    match obj {
        Object::Integer(i) => Ok(*i as f64),
        Object::Real(f) => Ok(*f as f64),
        _ => Err(PdfBackendError::Parse(format!("expected number, got {obj:?}"))),
    }
}

/// Decode a text string entry: UTF-16BE with BOM, else UTF-8, else Latin-1.
fn text_entry(doc: &lopdf::Document, dict: &Dictionary, key: &[u8]) -> Option<String> {
    let obj = match dict.get(key).ok()? {
        Object::Reference(id) => doc.get_object(*id).ok()?,
        other => other,
    };
    match obj {
        Object::String(bytes, _) => Some(decode_text(bytes)),
        Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
        _ => None,
    }
}

fn decode_text(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
