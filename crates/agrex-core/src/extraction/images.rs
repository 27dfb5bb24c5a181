use crate::extraction::ImageCandidate;
use crate::model::{MapImage, MapImageSource, MapPayload};
use crate::warnings::{ExtractionWarning, WarningKind};
use image::ImageFormat;
use tracing::{debug, warn};

/// Images under this dimension are icons, logos and legend glyphs.
pub const MIN_MAP_DIMENSION: u32 = 100;

/// Pick the field map among the document's images.
///
/// Which image is "the map" is heuristic, so the whole decision lives here:
/// qualifying candidates are at least [`MIN_MAP_DIMENSION`] on both axes;
/// embedded streams beat external references, images on the located
/// sections' pages beat stray ones, and the largest stored stream wins the
/// remaining ties.
///
/// Returns the record-level metadata, the stored bytes for export when the
/// winner is embedded, and any warnings raised along the way.
pub fn select_map(
    candidates: Vec<ImageCandidate>,
    section_span: Option<(usize, usize)>,
) -> (Option<MapImage>, Option<MapPayload>, Vec<ExtractionWarning>) {
    let mut warnings = Vec::new();

    let chosen = candidates
        .into_iter()
        .filter(|c| c.width >= MIN_MAP_DIMENSION && c.height >= MIN_MAP_DIMENSION)
        .max_by_key(|c| (!c.external, in_span(c.page_number, section_span), c.data.len()));

    let Some(chosen) = chosen else {
        let message = "no embedded map image found in document".to_string();
        warn!("{message}");
        warnings.push(ExtractionWarning::new(WarningKind::MissingMapImage, message));
        return (Some(MapImage::none()), None, warnings);
    };

    debug!(
        page = chosen.page_number,
        width = chosen.width,
        height = chosen.height,
        size = chosen.data.len(),
        external = chosen.external,
        "selected map image candidate"
    );

    if chosen.external {
        let map = MapImage {
            source: MapImageSource::Referenced,
            format: chosen.filter.as_deref().and_then(filter_format),
            width: Some(chosen.width),
            height: Some(chosen.height),
            size_bytes: None,
        };
        return (Some(map), None, warnings);
    }

    // A DCT stream must open with the JPEG start-of-image marker; anything
    // else means the stream is damaged even though the XObject looked right.
    if chosen.filter.as_deref() == Some("DCTDecode") && !chosen.data.starts_with(&[0xFF, 0xD8]) {
        let message = format!(
            "map image stream on page {} declares DCTDecode but has no JPEG signature",
            chosen.page_number
        );
        warn!("{message}");
        warnings.push(ExtractionWarning::new(
            WarningKind::CorruptImageStream,
            message,
        ));
        return (None, None, warnings);
    }

    let format = match chosen.filter.as_deref() {
        Some("DCTDecode") => Some("jpeg".to_string()),
        Some("JPXDecode") => Some("jp2".to_string()),
        other => sniff_format(&chosen.data).or_else(|| {
            // Flate-compressed raw samples carry no magic bytes; the
            // vendor's own exports call these png.
            matches!(other, Some("FlateDecode")).then(|| "png".to_string())
        }),
    };

    let map = MapImage {
        source: MapImageSource::Embedded,
        format: format.clone(),
        width: Some(chosen.width),
        height: Some(chosen.height),
        size_bytes: Some(chosen.data.len() as u64),
    };
    let payload = MapPayload {
        extension: format.unwrap_or_else(|| "bin".to_string()),
        data: chosen.data,
    };
    (Some(map), Some(payload), warnings)
}

fn in_span(page: usize, span: Option<(usize, usize)>) -> bool {
    span.is_some_and(|(start, end)| page >= start && page <= end)
}

/// Stored-encoding name for a stream filter, for candidates whose bytes are
/// not available to sniff.
fn filter_format(filter: &str) -> Option<String> {
    match filter {
        "DCTDecode" => Some("jpeg".to_string()),
        "JPXDecode" => Some("jp2".to_string()),
        "FlateDecode" => Some("png".to_string()),
        _ => None,
    }
}

/// Identify the stored encoding from magic bytes, without decoding pixels.
fn sniff_format(data: &[u8]) -> Option<String> {
    match image::guess_format(data) {
        Ok(ImageFormat::Jpeg) => Some("jpeg".to_string()),
        Ok(ImageFormat::Png) => Some("png".to_string()),
        Ok(other) => Some(format!("{other:?}").to_lowercase()),
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(page: usize, dim: u32, data: Vec<u8>, filter: Option<&str>) -> ImageCandidate {
        ImageCandidate {
            page_number: page,
            width: dim,
            height: dim,
            data,
            filter: filter.map(|f| f.to_string()),
            external: false,
        }
    }

    fn jpeg_bytes(len: usize) -> Vec<u8> {
        let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0];
        data.resize(len, 0xAB);
        data
    }

    const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_no_candidates_is_not_an_error() {
        let (map, payload, warnings) = select_map(Vec::new(), None);
        let map = map.unwrap();
        assert_eq!(map.source, MapImageSource::None);
        assert_eq!(map.format, None);
        assert!(payload.is_none());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::MissingMapImage);
    }

    #[test]
    fn test_small_images_are_icons() {
        let icons = vec![
            candidate(1, 32, jpeg_bytes(400), Some("DCTDecode")),
            candidate(1, 99, jpeg_bytes(4000), Some("DCTDecode")),
        ];
        let (map, _, warnings) = select_map(icons, None);
        assert_eq!(map.unwrap().source, MapImageSource::None);
        assert_eq!(warnings[0].kind, WarningKind::MissingMapImage);
    }

    #[test]
    fn test_largest_stream_wins() {
        let candidates = vec![
            candidate(2, 400, jpeg_bytes(1_000), Some("DCTDecode")),
            candidate(2, 600, jpeg_bytes(50_000), Some("DCTDecode")),
        ];
        let (map, payload, warnings) = select_map(candidates, None);
        assert!(warnings.is_empty());
        let map = map.unwrap();
        assert_eq!(map.source, MapImageSource::Embedded);
        assert_eq!(map.width, Some(600));
        assert_eq!(map.size_bytes, Some(50_000));
        assert_eq!(payload.unwrap().data.len(), 50_000);
    }

    #[test]
    fn test_section_pages_beat_size() {
        let candidates = vec![
            candidate(2, 400, jpeg_bytes(1_000), Some("DCTDecode")),
            candidate(9, 600, jpeg_bytes(50_000), Some("DCTDecode")),
        ];
        let (map, _, _) = select_map(candidates, Some((1, 3)));
        assert_eq!(map.unwrap().size_bytes, Some(1_000));
    }

    #[test]
    fn test_embedded_beats_referenced() {
        let mut referenced = candidate(2, 800, Vec::new(), Some("DCTDecode"));
        referenced.external = true;
        let candidates = vec![referenced, candidate(2, 400, jpeg_bytes(1_000), Some("DCTDecode"))];
        let (map, payload, _) = select_map(candidates, None);
        assert_eq!(map.unwrap().source, MapImageSource::Embedded);
        assert!(payload.is_some());
    }

    #[test]
    fn test_referenced_only() {
        let mut referenced = candidate(2, 800, Vec::new(), Some("DCTDecode"));
        referenced.external = true;
        let (map, payload, warnings) = select_map(vec![referenced], None);
        assert!(warnings.is_empty());
        let map = map.unwrap();
        assert_eq!(map.source, MapImageSource::Referenced);
        assert_eq!(map.format.as_deref(), Some("jpeg"));
        assert_eq!(map.size_bytes, None);
        assert!(payload.is_none());
    }

    #[test]
    fn test_corrupt_dct_stream() {
        let bad = candidate(2, 400, vec![0x00, 0x01, 0x02, 0x03], Some("DCTDecode"));
        let (map, payload, warnings) = select_map(vec![bad], None);
        assert!(map.is_none());
        assert!(payload.is_none());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::CorruptImageStream);
    }

    #[test]
    fn test_jpeg_format_and_payload_extension() {
        let (map, payload, _) = select_map(
            vec![candidate(2, 400, jpeg_bytes(2_000), Some("DCTDecode"))],
            None,
        );
        assert_eq!(map.unwrap().format.as_deref(), Some("jpeg"));
        assert_eq!(payload.unwrap().extension, "jpeg");
    }

    #[test]
    fn test_png_sniffed_without_filter() {
        let mut data = PNG_MAGIC.to_vec();
        data.resize(900, 0);
        let (map, _, _) = select_map(vec![candidate(2, 400, data, None)], None);
        assert_eq!(map.unwrap().format.as_deref(), Some("png"));
    }

    #[test]
    fn test_flate_samples_reported_as_png() {
        let data = vec![0x78, 0x9C, 0x00, 0x00]; // zlib header, no image magic
        let (map, _, _) = select_map(vec![candidate(2, 400, data, Some("FlateDecode"))], None);
        assert_eq!(map.unwrap().format.as_deref(), Some("png"));
    }

    #[test]
    fn test_jp2_filter() {
        let (map, payload, _) = select_map(
            vec![candidate(2, 400, vec![0u8; 500], Some("JPXDecode"))],
            None,
        );
        assert_eq!(map.unwrap().format.as_deref(), Some("jp2"));
        assert_eq!(payload.unwrap().extension, "jp2");
    }
}
