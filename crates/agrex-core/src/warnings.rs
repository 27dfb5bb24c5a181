use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-fatal finding recorded while extracting a report.
///
/// Warnings never abort a run. They accumulate in order of detection and are
/// returned alongside the record so callers can decide what to surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionWarning {
    pub kind: WarningKind,
    pub message: String,
}

impl ExtractionWarning {
    pub fn new(kind: WarningKind, message: impl Into<String>) -> ExtractionWarning {
        ExtractionWarning {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ExtractionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// A section marker matched again outside the section's own segment.
    DuplicateSection,
    /// A severity label not covered by the vocabulary.
    UnknownSeverity,
    /// Stress percentages do not add up to 100 within tolerance.
    TotalsMismatch,
    /// No usable map imagery in the document.
    MissingMapImage,
    /// An image stream declared one format but carried other bytes.
    CorruptImageStream,
    /// A table row that could not be parsed and was skipped.
    MalformedRow,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WarningKind::DuplicateSection => "duplicate_section",
            WarningKind::UnknownSeverity => "unknown_severity",
            WarningKind::TotalsMismatch => "totals_mismatch",
            WarningKind::MissingMapImage => "missing_map_image",
            WarningKind::CorruptImageStream => "corrupt_image_stream",
            WarningKind::MalformedRow => "malformed_row",
        };
        write!(f, "{name}")
    }
}
