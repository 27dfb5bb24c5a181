#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("unreadable PDF: {0}")]
    UnreadablePdf(String),

    #[error("PDF is encrypted and cannot be read without a password")]
    EncryptedPdf,

    #[error("no extractable text content found in PDF")]
    NoExtractableContent,

    #[error("required section '{0}' not found in report")]
    MissingRequiredSection(&'static str),

    #[error("malformed '{section}' section: {reason}")]
    MalformedField {
        section: &'static str,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
