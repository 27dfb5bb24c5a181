use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Survey date as printed in the report header.
///
/// Agremo reports carry dates in several shapes (`01-01-2024`, `2024-06-15`,
/// `June 2024`, sometimes free text). A date is normalized to ISO only when
/// the day/month order is unambiguous; everything else is preserved verbatim
/// rather than coerced to a possibly wrong date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SurveyDate {
    Iso(NaiveDate),
    Raw(String),
}

impl fmt::Display for SurveyDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurveyDate::Iso(d) => write!(f, "{d}"),
            SurveyDate::Raw(s) => write!(f, "{s}"),
        }
    }
}

/// Report-level metadata from the document header.
///
/// String fields default to `""` when the corresponding label is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportInfo {
    /// Analytics provider, normally "Agremo".
    pub provider: String,
    /// Report type, e.g. "Crop Monitoring".
    #[serde(rename = "type")]
    pub report_type: String,
    pub survey_date: Option<SurveyDate>,
    /// Analysis performed, e.g. "Weed Detection".
    pub analysis_name: String,
}

/// Field attributes from the "Field Information" section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldInfo {
    /// Crop name, lowercased ("maize", "winter wheat").
    pub crop: String,
    /// Growth stage as printed, `""` when not stated.
    pub growing_stage: String,
    pub area_hectares: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Healthy,
    Low,
    Moderate,
    High,
    Unknown,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Healthy => write!(f, "healthy"),
            Severity::Low => write!(f, "low"),
            Severity::Moderate => write!(f, "moderate"),
            Severity::High => write!(f, "high"),
            Severity::Unknown => write!(f, "unknown"),
        }
    }
}

/// One row of the weed/stress analysis table, in source document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressLevel {
    /// Level label as printed in the report ("Fine", "High Weed Pressure").
    pub level: String,
    pub severity: Severity,
    /// Share of the field at this level, 0..=100.
    pub percentage: Decimal,
    /// Affected area; zero when the row does not state one.
    pub area_hectares: Decimal,
}

/// Where the analysis totals came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Read from an explicit totals line in the report.
    Parsed,
    /// Summed over the individual stress rows.
    Derived,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeedAnalysis {
    pub total_stress_area_hectares: Decimal,
    pub total_stress_percent: Decimal,
    pub totals_source: Provenance,
    pub stress_levels: Vec<StressLevel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapImageSource {
    /// Image stream embedded in the PDF.
    Embedded,
    /// External file reference; no bytes available.
    Referenced,
    /// No usable map imagery found.
    None,
}

/// Metadata for the field map image selected from the report.
///
/// The raw bytes are not part of the record; they travel separately in
/// [`ExtractionResult::map_payload`] so the serialized record stays small.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapImage {
    pub source: MapImageSource,
    pub format: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub size_bytes: Option<u64>,
}

impl MapImage {
    pub fn none() -> MapImage {
        MapImage {
            source: MapImageSource::None,
            format: None,
            width: None,
            height: None,
            size_bytes: None,
        }
    }
}

/// Provenance of a single extraction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    pub source_file: String,
    pub extracted_at: DateTime<Utc>,
    pub total_pages: usize,
    pub extractor_version: String,
}

/// Everything extracted from one Agremo report. Immutable once assembled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedRecord {
    pub metadata: RunMetadata,
    pub report: ReportInfo,
    pub field: FieldInfo,
    pub weed_analysis: Option<WeedAnalysis>,
    pub additional_info: Option<String>,
    pub map_image: Option<MapImage>,
}

/// Stored bytes of the selected map image, for callers that export it.
#[derive(Debug, Clone)]
pub struct MapPayload {
    /// File extension matching the stored encoding ("jpeg", "png", ...).
    pub extension: String,
    pub data: Vec<u8>,
}

/// Successful outcome of one extraction call.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    pub record: ExtractedRecord,
    /// Non-fatal anomalies, in order of detection.
    pub warnings: Vec<crate::warnings::ExtractionWarning>,
    /// Present only when an embedded map image was selected.
    pub map_payload: Option<MapPayload>,
}
