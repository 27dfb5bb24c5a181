use crate::error::ExtractError;
use crate::extraction::{ImageCandidate, PageText, PdfExtractor};
use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::debug;

/// PDF extraction backend built on [`lopdf`].
///
/// Reads the document fully in memory. Text comes from lopdf's content-stream
/// interpreter; images are collected by walking each page's resource
/// dictionary for image XObjects.
pub struct LopdfExtractor;

impl LopdfExtractor {
    pub fn new() -> Self {
        LopdfExtractor
    }

    fn load(&self, pdf_bytes: &[u8]) -> Result<Document, ExtractError> {
        let doc = Document::load_mem(pdf_bytes)
            .map_err(|e| ExtractError::UnreadablePdf(e.to_string()))?;
        if doc.is_encrypted() {
            return Err(ExtractError::EncryptedPdf);
        }
        if doc.get_pages().is_empty() {
            return Err(ExtractError::UnreadablePdf("document has no pages".into()));
        }
        Ok(doc)
    }
}

impl Default for LopdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for LopdfExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageText>, ExtractError> {
        let doc = self.load(pdf_bytes)?;
        let pages = doc.get_pages();

        let mut out = Vec::with_capacity(pages.len());
        for &page_number in pages.keys() {
            // A single broken page should not sink the document; scanned or
            // image-only pages legitimately carry no text.
            let text = match doc.extract_text(&[page_number]) {
                Ok(text) => text,
                Err(e) => {
                    debug!(page = page_number, error = %e, "page text extraction failed");
                    String::new()
                }
            };
            out.push(PageText {
                page_number: page_number as usize,
                text,
            });
        }
        Ok(out)
    }

    fn scan_images(&self, pdf_bytes: &[u8]) -> Result<Vec<ImageCandidate>, ExtractError> {
        let doc = self.load(pdf_bytes)?;

        let mut candidates = Vec::new();
        for (&page_number, &page_id) in &doc.get_pages() {
            collect_page_images(&doc, page_id, page_number as usize, &mut candidates);
        }
        Ok(candidates)
    }

    fn backend_name(&self) -> &str {
        "lopdf"
    }
}

/// Follow an indirect reference, returning the object itself when it is
/// direct or the reference dangles.
fn deref<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        other => other,
    }
}

/// Look up a key on the page dictionary, walking up the page tree via
/// /Parent when the page itself does not carry it.
fn resolve_inherited<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut current_id = page_id;
    loop {
        let dict = doc.get_object(current_id).and_then(|o| o.as_dict()).ok()?;
        if let Ok(value) = dict.get(key) {
            return Some(value);
        }
        current_id = dict.get(b"Parent").and_then(|p| p.as_reference()).ok()?;
    }
}

fn collect_page_images(
    doc: &Document,
    page_id: ObjectId,
    page_number: usize,
    out: &mut Vec<ImageCandidate>,
) {
    let Some(resources) = resolve_inherited(doc, page_id, b"Resources") else {
        return;
    };
    let Ok(resources) = deref(doc, resources).as_dict() else {
        return;
    };
    let Ok(xobjects) = resources.get(b"XObject") else {
        return;
    };
    let Ok(xobjects) = deref(doc, xobjects).as_dict() else {
        return;
    };

    for (name, entry) in xobjects.iter() {
        let Ok(stream) = deref(doc, entry).as_stream() else {
            continue;
        };
        let dict = &stream.dict;
        let is_image = matches!(dict.get(b"Subtype"), Ok(Object::Name(n)) if n == b"Image");
        if !is_image {
            continue;
        }

        let width = dict_u32(doc, dict, b"Width").unwrap_or(0);
        let height = dict_u32(doc, dict, b"Height").unwrap_or(0);
        let filter = image_filter(doc, dict);
        // /F on a stream means the bytes live in an external file.
        let external = dict.has(b"F");

        debug!(
            page = page_number,
            name = %String::from_utf8_lossy(name),
            width,
            height,
            filter = filter.as_deref().unwrap_or("none"),
            external,
            "found image xobject"
        );

        out.push(ImageCandidate {
            page_number,
            width,
            height,
            data: if external {
                Vec::new()
            } else {
                stream.content.clone()
            },
            filter,
            external,
        });
    }
}

fn dict_u32(doc: &Document, dict: &Dictionary, key: &[u8]) -> Option<u32> {
    match deref(doc, dict.get(key).ok()?) {
        Object::Integer(i) => u32::try_from(*i).ok(),
        Object::Real(f) => Some(*f as u32),
        _ => None,
    }
}

/// The stream filter that determines the stored image encoding.
///
/// With chained filters (e.g. FlateDecode then DCTDecode) the last one
/// names the image codec, so that is the one reported.
fn image_filter(doc: &Document, dict: &Dictionary) -> Option<String> {
    match deref(doc, dict.get(b"Filter").ok()?) {
        Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
        Object::Array(items) => items.iter().rev().find_map(|item| match deref(doc, item) {
            Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
            _ => None,
        }),
        _ => None,
    }
}
