use agrex_core::model::ExtractedRecord;
use serde_json::json;

/// Wire envelope for a successful extraction.
pub fn success(record: &ExtractedRecord) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({
        "success": true,
        "extractedData": record,
    }))
}

/// Wire envelope for a failed extraction.
pub fn failure(reason: &str) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({
        "success": false,
        "error": reason,
    }))
}
