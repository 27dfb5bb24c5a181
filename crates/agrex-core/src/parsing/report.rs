use crate::model::ReportInfo;
use crate::parsing::extract_after_label;
use crate::parsing::values::{is_date_shaped, parse_survey_date};
use crate::sections::Section;

/// Parse report-level metadata from the header section.
///
/// Every field is optional here: labels are tried in order and a miss leaves
/// the field empty rather than failing the parse. The header is the part of
/// these reports that drifts the most between vendor versions.
pub fn parse_report(section: &Section) -> ReportInfo {
    let mut info = ReportInfo::default();

    for line in &section.lines {
        let line = line.trim();
        let lower = line.to_lowercase();

        if info.provider.is_empty() {
            if let Some(v) = extract_after_label(line, "provider") {
                info.provider = v;
            } else if lower.contains("agremo") {
                info.provider = "Agremo".to_string();
            }
        }

        if info.report_type.is_empty() {
            if let Some(v) = extract_after_label(line, "report type") {
                info.report_type = v;
            } else if let Some(v) = extract_after_label(line, "type") {
                info.report_type = v;
            } else if lower.contains("crop monitoring") {
                info.report_type = "Crop Monitoring".to_string();
            }
        }

        if info.survey_date.is_none() {
            if let Some(v) = extract_after_label(line, "survey date") {
                info.survey_date = Some(parse_survey_date(&v));
            }
        }

        if info.analysis_name.is_empty() {
            if let Some(v) = extract_after_label(line, "analysis name") {
                info.analysis_name = v;
            } else if let Some(v) = extract_after_label(line, "analysis") {
                info.analysis_name = v;
            } else if lower.contains("weed detection") {
                info.analysis_name = "Weed Detection".to_string();
            }
        }
    }

    // No labeled date: fall back to the first date-shaped token in the header.
    if info.survey_date.is_none() {
        'scan: for line in &section.lines {
            for token in line.split_whitespace() {
                let token = token.trim_end_matches([',', ';']);
                if is_date_shaped(token) {
                    info.survey_date = Some(parse_survey_date(token));
                    break 'scan;
                }
            }
        }
    }

    info
}
