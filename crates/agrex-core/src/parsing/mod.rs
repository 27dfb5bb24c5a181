pub mod field;
pub mod notes;
pub mod report;
pub mod severity;
pub mod stress;
pub mod values;

/// Extract a value appearing after a label (case-insensitive; the label
/// itself is given in lowercase).
///
/// Handles patterns like "Label: value" or "Label    value" (tab/space
/// separated). Truncates at the next large whitespace gap (3+ spaces) so a
/// trailing column from layout-preserving extraction is not captured.
pub fn extract_after_label(line: &str, label: &str) -> Option<String> {
    let lower = line.to_lowercase();
    let idx = lower.find(label)?;
    let after = &line[idx + label.len()..];
    // Skip colon and whitespace
    let trimmed = after.trim_start_matches(|c: char| c == ':' || c.is_whitespace());
    if trimmed.is_empty() {
        return None;
    }
    let value = if let Some(gap_pos) = trimmed.find("   ") {
        trimmed[..gap_pos].trim()
    } else {
        trimmed.trim()
    };
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
