use agrex_core::error::ExtractError;

/// Errors surfaced by the command line frontend.
///
/// Input validation failures live here; everything that happens inside the
/// pipeline arrives wrapped as [`CliError::Extract`].
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("unsupported file type: {0} (only PDF files are accepted)")]
    NotAPdf(String),

    #[error("file too large: {size} bytes (limit is {limit} bytes)")]
    FileTooLarge { size: u64, limit: u64 },

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
