use crate::sections::Section;

const MARKER_LABELS: [&str; 4] = ["additional info", "additional comments", "comments", "notes"];

/// Free text of the notes section, with the marker line stripped.
///
/// Returns `None` when nothing but the marker is present; the record then
/// carries a null instead of an empty string.
pub fn parse_notes(section: &Section) -> Option<String> {
    let mut collected: Vec<&str> = Vec::new();
    for (i, line) in section.lines.iter().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if i == 0 {
            // The marker line sometimes carries the first words of the note
            // ("Additional info: sprayed last week").
            if let Some(rest) = strip_marker(trimmed) {
                if !rest.is_empty() {
                    collected.push(rest);
                }
                continue;
            }
        }
        collected.push(trimmed);
    }
    if collected.is_empty() {
        None
    } else {
        Some(collected.join("\n"))
    }
}

fn strip_marker(line: &str) -> Option<&str> {
    let lower = line.to_lowercase();
    for label in MARKER_LABELS {
        if let Some(pos) = lower.find(label) {
            let after = &line[pos + label.len()..];
            return Some(after.trim_start_matches(':').trim());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::SectionKind;

    fn section(lines: &[&str]) -> Section {
        Section {
            kind: SectionKind::AdditionalInfo,
            page_start: 1,
            page_end: 1,
            lines: lines.iter().map(|l| l.to_string()).collect(),
        }
    }

    #[test]
    fn test_marker_line_is_dropped() {
        let notes = parse_notes(&section(&[
            "Additional info",
            "Sprayed on 2024-01-05",
            "Wind 3 m/s during flight",
        ]));
        assert_eq!(
            notes.as_deref(),
            Some("Sprayed on 2024-01-05\nWind 3 m/s during flight")
        );
    }

    #[test]
    fn test_note_on_marker_line() {
        let notes = parse_notes(&section(&["Additional info: field edge overlap"]));
        assert_eq!(notes.as_deref(), Some("field edge overlap"));
    }

    #[test]
    fn test_marker_only_is_none() {
        assert!(parse_notes(&section(&["Additional comments", "   "])).is_none());
    }

    #[test]
    fn test_blank_lines_skipped() {
        let notes = parse_notes(&section(&["Notes", "", "first", "", "second"]));
        assert_eq!(notes.as_deref(), Some("first\nsecond"));
    }
}
