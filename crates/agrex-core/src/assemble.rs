//! Final record assembly.
//!
//! Merges the per-section results into one [`ExtractedRecord`], stamps the
//! run metadata and applies the cross-field coherence checks. Nothing here
//! can fail; anomalies surface as warnings on the result.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::warn;

use crate::model::{
    ExtractedRecord, FieldInfo, MapImage, ReportInfo, RunMetadata, WeedAnalysis,
};
use crate::warnings::{ExtractionWarning, WarningKind};

/// Allowed deviation of the stress percentage sum from 100 before a
/// mismatch is reported.
pub const TOTALS_TOLERANCE: Decimal = Decimal::ONE;

pub fn assemble(
    source_file: &str,
    total_pages: usize,
    report: ReportInfo,
    field: FieldInfo,
    weed_analysis: Option<WeedAnalysis>,
    additional_info: Option<String>,
    map_image: Option<MapImage>,
) -> (ExtractedRecord, Vec<ExtractionWarning>) {
    let mut warnings = Vec::new();

    if let Some(weed) = &weed_analysis {
        if let Some(warning) = check_percentage_sum(weed) {
            warn!("{warning}");
            warnings.push(warning);
        }
    }

    let record = ExtractedRecord {
        metadata: RunMetadata {
            source_file: source_file.to_string(),
            extracted_at: Utc::now(),
            total_pages,
            extractor_version: env!("CARGO_PKG_VERSION").to_string(),
        },
        report,
        field,
        weed_analysis,
        additional_info,
        map_image,
    };
    (record, warnings)
}

/// Stress percentages across all levels are expected to cover the whole
/// field, so their sum should land near 100. A deviation is a property of
/// the source document, not a parse failure.
fn check_percentage_sum(weed: &WeedAnalysis) -> Option<ExtractionWarning> {
    if weed.stress_levels.is_empty() {
        return None;
    }
    let sum: Decimal = weed.stress_levels.iter().map(|l| l.percentage).sum();
    let deviation = (sum - Decimal::ONE_HUNDRED).abs();
    if deviation > TOTALS_TOLERANCE {
        return Some(ExtractionWarning::new(
            WarningKind::TotalsMismatch,
            format!("stress level percentages sum to {sum}, expected about 100"),
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Provenance, Severity, StressLevel};
    use rust_decimal_macros::dec;

    fn level(pct: Decimal) -> StressLevel {
        StressLevel {
            level: "Fine".to_string(),
            severity: Severity::Healthy,
            percentage: pct,
            area_hectares: Decimal::ZERO,
        }
    }

    fn weed(levels: Vec<StressLevel>) -> WeedAnalysis {
        WeedAnalysis {
            total_stress_area_hectares: Decimal::ZERO,
            total_stress_percent: Decimal::ZERO,
            totals_source: Provenance::Derived,
            stress_levels: levels,
        }
    }

    #[test]
    fn test_metadata_is_stamped() {
        let (record, _) = assemble(
            "report.pdf",
            3,
            ReportInfo::default(),
            FieldInfo {
                crop: "maize".to_string(),
                growing_stage: String::new(),
                area_hectares: dec!(2.5),
            },
            None,
            None,
            None,
        );
        assert_eq!(record.metadata.source_file, "report.pdf");
        assert_eq!(record.metadata.total_pages, 3);
        assert_eq!(record.metadata.extractor_version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_sum_near_100_passes() {
        let weed = weed(vec![level(dec!(60.5)), level(dec!(40))]);
        assert!(check_percentage_sum(&weed).is_none());
    }

    #[test]
    fn test_sum_at_tolerance_edge_passes() {
        let weed = weed(vec![level(dec!(99)), level(dec!(2))]);
        assert!(check_percentage_sum(&weed).is_none());
    }

    #[test]
    fn test_sum_far_from_100_warns() {
        let weed = weed(vec![level(dec!(80))]);
        let warning = check_percentage_sum(&weed).unwrap();
        assert_eq!(warning.kind, WarningKind::TotalsMismatch);
        assert!(warning.message.contains("80"));
    }

    #[test]
    fn test_empty_table_does_not_warn() {
        assert!(check_percentage_sum(&weed(Vec::new())).is_none());
    }

    #[test]
    fn test_assemble_surfaces_mismatch_warning() {
        let (record, warnings) = assemble(
            "report.pdf",
            1,
            ReportInfo::default(),
            FieldInfo {
                crop: String::new(),
                growing_stage: String::new(),
                area_hectares: Decimal::ZERO,
            },
            Some(weed(vec![level(dec!(42))])),
            None,
            None,
        );
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::TotalsMismatch);
        assert!(record.weed_analysis.is_some());
    }
}
