use crate::model::{Provenance, Severity, StressLevel, WeedAnalysis};
use crate::parsing::severity;
use crate::parsing::values::parse_decimal;
use crate::sections::{normalize, Section};
use crate::warnings::{ExtractionWarning, WarningKind};
use rust_decimal::Decimal;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowUnit {
    Percent,
    Hectares,
}

/// One section line, tokenized into a label and its numeric values.
#[derive(Debug)]
struct ScanLine {
    norm: String,
    label: String,
    values: Vec<(Decimal, Option<RowUnit>)>,
}

/// Parse the weed/stress analysis table.
///
/// Tolerates rows split across a page break (label line followed by a
/// numbers line), varying column order (header row, unit suffixes, or
/// percentage-then-area by default) and percentages with or without `%`.
/// Totals prefer an explicit summary line; without one they are the sums
/// over the parsed rows, flagged as derived.
pub fn parse_stress(section: &Section) -> (WeedAnalysis, Vec<ExtractionWarning>) {
    let scans: Vec<ScanLine> = section.lines.iter().map(|l| scan_line(l)).collect();

    let mut rows: Vec<StressLevel> = Vec::new();
    let mut warnings: Vec<ExtractionWarning> = Vec::new();
    let mut order = [RowUnit::Percent, RowUnit::Hectares];
    let mut parsed_pct: Option<Decimal> = None;
    let mut parsed_area: Option<Decimal> = None;

    let mut i = 0;
    while i < scans.len() {
        let scan = &scans[i];

        if scan.values.is_empty() && scan.label.is_empty() {
            i += 1;
            continue;
        }

        if is_totals(scan) {
            let (pct, area) = totals_values(scan);
            if parsed_pct.is_none() {
                parsed_pct = pct;
            }
            if parsed_area.is_none() {
                parsed_area = area;
            }
            i += 1;
            continue;
        }

        if scan.values.is_empty() {
            // Label-only line: a column header, structural text, or the
            // first half of a row split by a line/page break.
            if let Some(o) = header_order(&scan.norm) {
                order = o;
            } else if !is_structural(&scan.norm) {
                if let Some(next) = scans.get(i + 1) {
                    if next.label.is_empty() && !next.values.is_empty() && !is_totals(next) {
                        if let Some(row) =
                            build_row(&scan.label, &next.values, order, &mut warnings)
                        {
                            rows.push(row);
                        }
                        i += 2;
                        continue;
                    }
                }
            }
            i += 1;
            continue;
        }

        if scan.label.is_empty() {
            let message = format!(
                "stress table line '{}' has values but no level label; skipped",
                scan.norm
            );
            warn!("{message}");
            warnings.push(ExtractionWarning::new(WarningKind::MalformedRow, message));
            i += 1;
            continue;
        }

        if let Some(row) = build_row(&scan.label, &scan.values, order, &mut warnings) {
            rows.push(row);
        }
        i += 1;
    }

    let derived_pct: Decimal = rows.iter().map(|r| r.percentage).sum();
    let derived_area: Decimal = rows.iter().map(|r| r.area_hectares).sum();
    let totals_source = if parsed_pct.is_some() || parsed_area.is_some() {
        Provenance::Parsed
    } else {
        Provenance::Derived
    };

    let analysis = WeedAnalysis {
        total_stress_area_hectares: parsed_area.unwrap_or(derived_area),
        total_stress_percent: parsed_pct.unwrap_or(derived_pct),
        totals_source,
        stress_levels: rows,
    };
    (analysis, warnings)
}

fn build_row(
    label: &str,
    values: &[(Decimal, Option<RowUnit>)],
    order: [RowUnit; 2],
    warnings: &mut Vec<ExtractionWarning>,
) -> Option<StressLevel> {
    let (pct, area) = assign_values(values, order);

    let Some(percentage) = pct else {
        let message = format!("stress row '{label}' carries no percentage; skipped");
        warn!("{message}");
        warnings.push(ExtractionWarning::new(WarningKind::MalformedRow, message));
        return None;
    };
    if percentage < Decimal::ZERO || percentage > Decimal::ONE_HUNDRED {
        let message =
            format!("stress row '{label}' percentage {percentage} outside 0..=100; skipped");
        warn!("{message}");
        warnings.push(ExtractionWarning::new(WarningKind::MalformedRow, message));
        return None;
    }
    let area_hectares = area.unwrap_or(Decimal::ZERO);
    if area_hectares < Decimal::ZERO {
        let message = format!("stress row '{label}' area {area_hectares} is negative; skipped");
        warn!("{message}");
        warnings.push(ExtractionWarning::new(WarningKind::MalformedRow, message));
        return None;
    }

    let severity = severity::classify(label);
    if severity == Severity::Unknown {
        let message = format!("unrecognized stress level label '{label}'");
        warn!("{message}");
        warnings.push(ExtractionWarning::new(WarningKind::UnknownSeverity, message));
    }

    Some(StressLevel {
        level: label.to_string(),
        severity,
        percentage,
        area_hectares,
    })
}

/// Unit-tagged values bind to their slot; untagged ones fill what is left
/// in column order.
fn assign_values(
    values: &[(Decimal, Option<RowUnit>)],
    order: [RowUnit; 2],
) -> (Option<Decimal>, Option<Decimal>) {
    let mut pct = None;
    let mut area = None;
    for (v, unit) in values {
        match unit {
            Some(RowUnit::Percent) if pct.is_none() => pct = Some(*v),
            Some(RowUnit::Hectares) if area.is_none() => area = Some(*v),
            _ => {}
        }
    }
    let mut untagged = values.iter().filter(|(_, u)| u.is_none()).map(|(v, _)| *v);
    for slot in order {
        match slot {
            RowUnit::Percent => {
                if pct.is_none() {
                    pct = untagged.next();
                }
            }
            RowUnit::Hectares => {
                if area.is_none() {
                    area = untagged.next();
                }
            }
        }
    }
    (pct, area)
}

fn is_totals(scan: &ScanLine) -> bool {
    if scan.values.is_empty() {
        return false;
    }
    if scan.norm.contains("total") {
        return true;
    }
    // The "<area> ha = <pct>% ..." summary shape.
    let has_pct = scan
        .values
        .iter()
        .any(|(_, u)| *u == Some(RowUnit::Percent));
    let has_area = scan
        .values
        .iter()
        .any(|(_, u)| *u == Some(RowUnit::Hectares));
    scan.norm.contains('=') && has_pct && has_area
}

fn totals_values(scan: &ScanLine) -> (Option<Decimal>, Option<Decimal>) {
    // "total area weed stress: 0.5" style lines put the area first.
    let order = if scan.norm.contains("area") && !scan.norm.contains('%') {
        [RowUnit::Hectares, RowUnit::Percent]
    } else {
        [RowUnit::Percent, RowUnit::Hectares]
    };
    assign_values(&scan.values, order)
}

/// Column order from a header row naming both the percentage and area
/// columns, e.g. "Level   Area (ha)   %".
fn header_order(norm: &str) -> Option<[RowUnit; 2]> {
    let mut pct_pos = None;
    let mut area_pos = None;
    for (i, token) in norm.split_whitespace().enumerate() {
        let token = token.trim_matches(|c: char| !c.is_alphanumeric() && c != '%');
        if pct_pos.is_none() && (token.contains('%') || token.starts_with("percent")) {
            pct_pos = Some(i);
        }
        if area_pos.is_none()
            && (token == "ha" || token.starts_with("area") || token.starts_with("hectare"))
        {
            area_pos = Some(i);
        }
    }
    match (pct_pos, area_pos) {
        (Some(p), Some(a)) if p < a => Some([RowUnit::Percent, RowUnit::Hectares]),
        (Some(_), Some(_)) => Some([RowUnit::Hectares, RowUnit::Percent]),
        _ => None,
    }
}

/// Lines restating the section's own heading are structure, not row labels.
fn is_structural(norm: &str) -> bool {
    ["weed analysis", "weed stress", "stress levels", "stress analysis", "severity"]
        .iter()
        .any(|m| norm.contains(m))
}

fn scan_line(line: &str) -> ScanLine {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let mut label_parts: Vec<&str> = Vec::new();
    let mut values: Vec<(Decimal, Option<RowUnit>)> = Vec::new();

    let mut i = 0;
    while i < tokens.len() {
        let token = clean_token(tokens[i]);
        if token.is_empty() {
            i += 1;
            continue;
        }
        if let Some((value, mut unit)) = numeric_token(token) {
            // A bare unit may trail as its own token: "80 %", "2.0 ha".
            if unit.is_none() {
                if let Some(&next) = tokens.get(i + 1) {
                    if let Some(u) = unit_token(clean_token(next)) {
                        unit = Some(u);
                        i += 1;
                    }
                }
            }
            values.push((value, unit));
        } else if values.is_empty() {
            label_parts.push(token);
        }
        i += 1;
    }

    ScanLine {
        norm: normalize(line),
        label: label_parts.join(" "),
        values,
    }
}

fn clean_token(token: &str) -> &str {
    token.trim_matches(|c: char| matches!(c, '(' | ')' | '[' | ']' | ',' | ';' | ':' | '|'))
}

fn numeric_token(token: &str) -> Option<(Decimal, Option<RowUnit>)> {
    let lower = token.to_lowercase();
    if let Some(rest) = lower.strip_suffix('%') {
        return parse_decimal(rest).map(|d| (d, Some(RowUnit::Percent)));
    }
    for suffix in ["hectares", "hectare", "ha"] {
        if let Some(rest) = lower.strip_suffix(suffix) {
            if !rest.is_empty() {
                return parse_decimal(rest).map(|d| (d, Some(RowUnit::Hectares)));
            }
        }
    }
    parse_decimal(&lower).map(|d| (d, None))
}

fn unit_token(token: &str) -> Option<RowUnit> {
    match token.to_lowercase().as_str() {
        "%" => Some(RowUnit::Percent),
        "ha" | "hectare" | "hectares" => Some(RowUnit::Hectares),
        _ => None,
    }
}
