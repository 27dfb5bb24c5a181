pub mod extract;
pub mod inspect;
pub mod levels;

use crate::error::CliError;
use std::path::Path;

/// Validate and read a PDF input file.
///
/// Rejections here are caller mistakes rather than extraction failures:
/// missing file, wrong extension, oversized input.
pub fn read_input(path: &Path, max_file_size: u64) -> Result<Vec<u8>, CliError> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    let is_pdf = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    if !is_pdf {
        return Err(CliError::NotAPdf(path.display().to_string()));
    }
    let size = std::fs::metadata(path)?.len();
    if size > max_file_size {
        return Err(CliError::FileTooLarge {
            size,
            limit: max_file_size,
        });
    }
    Ok(std::fs::read(path)?)
}
