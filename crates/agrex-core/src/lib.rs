pub mod assemble;
pub mod error;
pub mod extraction;
pub mod model;
pub mod parsing;
pub mod sections;
pub mod warnings;

use error::ExtractError;
use extraction::{images, PdfExtractor};
use model::{ExtractionResult, MapImage};
use sections::SectionKind;
use tracing::{debug, warn};
use warnings::{ExtractionWarning, WarningKind};

/// Main API entry point: extract one structured record from a PDF report.
///
/// Stages run in fixed order: page text extraction, section location,
/// per-section parsing, map image resolution, assembly. Absent optional
/// sections become null fields on the record; anomalies inside a present
/// section are absorbed as warnings. Only unreadable input, a missing
/// required section or a malformed required field abort the call.
pub fn extract_report(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    source_file: &str,
) -> Result<ExtractionResult, ExtractError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    let total_pages = pages.len();
    debug!(
        total_pages,
        backend = extractor.backend_name(),
        "extracted page text"
    );

    if pages.iter().all(|p| p.text.trim().is_empty()) {
        return Err(ExtractError::NoExtractableContent);
    }

    let (section_map, mut warnings) = sections::locate_sections(&pages)?;

    let report = match section_map.get(SectionKind::Report) {
        Some(section) => parsing::report::parse_report(section),
        None => return Err(ExtractError::MissingRequiredSection("report")),
    };
    let field = match section_map.get(SectionKind::Field) {
        Some(section) => parsing::field::parse_field(section)?,
        None => return Err(ExtractError::MissingRequiredSection("field")),
    };

    let weed_analysis = match section_map.get(SectionKind::WeedAnalysis) {
        Some(section) => {
            let (weed, mut row_warnings) = parsing::stress::parse_stress(section);
            warnings.append(&mut row_warnings);
            Some(weed)
        }
        None => None,
    };

    let additional_info = section_map
        .get(SectionKind::AdditionalInfo)
        .and_then(parsing::notes::parse_notes);

    // Image scanning is best effort: a damaged image dictionary must not
    // take down an otherwise clean text extraction.
    let (map_image, map_payload) = match extractor.scan_images(pdf_bytes) {
        Ok(candidates) => {
            let (map, payload, mut image_warnings) =
                images::select_map(candidates, section_map.page_span());
            warnings.append(&mut image_warnings);
            (map, payload)
        }
        Err(e) => {
            let message = format!("image scan failed: {e}");
            warn!("{message}");
            warnings.push(ExtractionWarning::new(WarningKind::MissingMapImage, message));
            (Some(MapImage::none()), None)
        }
    };

    let (record, mut assembly_warnings) = assemble::assemble(
        source_file,
        total_pages,
        report,
        field,
        weed_analysis,
        additional_info,
        map_image,
    );
    warnings.append(&mut assembly_warnings);

    Ok(ExtractionResult {
        record,
        warnings,
        map_payload,
    })
}
