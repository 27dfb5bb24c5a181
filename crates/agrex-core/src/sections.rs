use crate::error::ExtractError;
use crate::extraction::PageText;
use crate::warnings::{ExtractionWarning, WarningKind};
use tracing::warn;

/// The section kinds an Agremo report can carry.
///
/// Report and field are required; the other two are optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Report,
    Field,
    WeedAnalysis,
    AdditionalInfo,
}

impl SectionKind {
    pub const ALL: [SectionKind; 4] = [
        SectionKind::Report,
        SectionKind::Field,
        SectionKind::WeedAnalysis,
        SectionKind::AdditionalInfo,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SectionKind::Report => "report",
            SectionKind::Field => "field",
            SectionKind::WeedAnalysis => "weed_analysis",
            SectionKind::AdditionalInfo => "additional_info",
        }
    }

    /// Ordered header phrases that identify this section.
    ///
    /// Vendor PDFs reflow text between versions, so recognition is a list of
    /// candidate phrases matched against normalized lines, never a fixed
    /// line or coordinate.
    fn markers(&self) -> &'static [&'static str] {
        match self {
            SectionKind::Report => &["agremo", "crop monitoring", "drone report"],
            SectionKind::Field => &["field information", "field info", "field area"],
            SectionKind::WeedAnalysis => {
                &["weed analysis", "weed stress", "stress levels", "stress analysis"]
            }
            SectionKind::AdditionalInfo => {
                &["additional info", "additional comments", "comments", "notes"]
            }
        }
    }

    fn index(&self) -> usize {
        match self {
            SectionKind::Report => 0,
            SectionKind::Field => 1,
            SectionKind::WeedAnalysis => 2,
            SectionKind::AdditionalInfo => 3,
        }
    }
}

/// A labeled span of report text with its page range.
#[derive(Debug, Clone)]
pub struct Section {
    pub kind: SectionKind,
    pub page_start: usize,
    pub page_end: usize,
    pub lines: Vec<String>,
}

/// The sections located in one document.
#[derive(Debug, Clone, Default)]
pub struct SectionMap {
    sections: Vec<Section>,
}

impl SectionMap {
    pub fn get(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Smallest page range covering every located section.
    pub fn page_span(&self) -> Option<(usize, usize)> {
        let start = self.sections.iter().map(|s| s.page_start).min()?;
        let end = self.sections.iter().map(|s| s.page_end).max()?;
        Some((start, end))
    }
}

/// Partition page text into labeled sections.
///
/// Each kind's first marker hit wins and opens a segment that runs to the
/// next matched header (or end of document). A later hit for an already
/// located kind is only suspicious when it falls outside that kind's own
/// segment; headers routinely restate their own markers on adjacent lines.
pub fn locate_sections(
    pages: &[PageText],
) -> Result<(SectionMap, Vec<ExtractionWarning>), ExtractError> {
    let mut raw: Vec<(usize, &str)> = Vec::new();
    for page in pages {
        for line in page.lines() {
            raw.push((page.page_number, line));
        }
    }
    let norm: Vec<String> = raw.iter().map(|(_, line)| normalize(line)).collect();

    // Every marker hit, in document order. Joining adjacent lines catches a
    // marker split by a line or page break.
    let mut hits: Vec<(SectionKind, usize)> = Vec::new();
    for (i, line) in norm.iter().enumerate() {
        for kind in SectionKind::ALL {
            if marker_hits(kind, line) {
                hits.push((kind, i));
            } else if let Some(next) = norm.get(i + 1) {
                if !marker_hits(kind, next) && marker_hits(kind, &format!("{line} {next}")) {
                    hits.push((kind, i));
                }
            }
        }
    }

    let mut first: [Option<usize>; 4] = [None; 4];
    for &(kind, i) in &hits {
        if first[kind.index()].is_none() {
            first[kind.index()] = Some(i);
        }
    }

    if first[SectionKind::Report.index()].is_none() {
        return Err(ExtractError::MissingRequiredSection("report"));
    }
    if first[SectionKind::Field.index()].is_none() {
        return Err(ExtractError::MissingRequiredSection("field"));
    }

    // Segment boundaries are the winning match lines, sorted.
    let mut boundaries: Vec<usize> = first.iter().flatten().copied().collect();
    boundaries.sort_unstable();
    boundaries.dedup();

    let mut ranges: [Option<(usize, usize)>; 4] = [None; 4];
    for kind in SectionKind::ALL {
        if let Some(start) = first[kind.index()] {
            let end = boundaries
                .iter()
                .copied()
                .find(|&b| b > start)
                .unwrap_or(raw.len());
            ranges[kind.index()] = Some((start, end));
        }
    }

    let mut sections = Vec::new();
    for kind in SectionKind::ALL {
        let Some((start, end)) = ranges[kind.index()] else {
            continue;
        };
        sections.push(Section {
            kind,
            page_start: raw[start].0,
            page_end: raw[end - 1].0,
            lines: raw[start..end].iter().map(|(_, l)| l.to_string()).collect(),
        });
    }

    let mut warnings = Vec::new();
    for &(kind, i) in &hits {
        let Some((start, end)) = ranges[kind.index()] else {
            continue;
        };
        if i >= start && i < end {
            continue;
        }
        let message = format!(
            "section marker for '{}' matched again on page {}; keeping the first occurrence",
            kind.name(),
            raw[i].0
        );
        warn!("{message}");
        warnings.push(ExtractionWarning::new(WarningKind::DuplicateSection, message));
    }

    Ok((SectionMap { sections }, warnings))
}

fn marker_hits(kind: SectionKind, normalized: &str) -> bool {
    kind.markers().iter().any(|m| normalized.contains(m))
}

/// Lowercase with runs of whitespace collapsed to single spaces.
pub fn normalize(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
