use crate::model::Severity;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Known vendor level labels and their severity classes, in display order.
///
/// This is an open vocabulary: labels outside it classify as `Unknown` so
/// new vendor wording degrades gracefully instead of failing an extraction.
pub static VOCABULARY: &[(&str, Severity)] = &[
    ("fine", Severity::Healthy),
    ("healthy", Severity::Healthy),
    ("no stress", Severity::Healthy),
    ("low", Severity::Low),
    ("low weed pressure", Severity::Low),
    ("slight", Severity::Low),
    ("moderate", Severity::Moderate),
    ("medium", Severity::Moderate),
    ("moderate weed pressure", Severity::Moderate),
    ("high", Severity::High),
    ("high weed pressure", Severity::High),
    ("severe", Severity::High),
    ("critical", Severity::High),
];

static LOOKUP: LazyLock<HashMap<&'static str, Severity>> =
    LazyLock::new(|| VOCABULARY.iter().copied().collect());

/// Classify a free-text stress level label.
pub fn classify(label: &str) -> Severity {
    let key = label.trim().to_lowercase();
    LOOKUP
        .get(key.as_str())
        .copied()
        .unwrap_or(Severity::Unknown)
}
