use agrex_core::extraction::lopdf_backend::LopdfExtractor;
use agrex_core::model::ExtractionResult;
use std::path::{Path, PathBuf};

use crate::commands::read_input;
use crate::error::CliError;
use crate::output;

pub fn run(
    input_file: PathBuf,
    output_format: &str,
    output_file: Option<PathBuf>,
    save_map: Option<PathBuf>,
    max_file_size: u64,
) -> Result<(), CliError> {
    let extraction = match extract(&input_file, max_file_size) {
        Ok(extraction) => extraction,
        Err(e) if output_format == "json" => {
            // The wire contract puts failures on stdout as a JSON envelope.
            println!("{}", output::json::failure(&e.to_string())?);
            std::process::exit(1);
        }
        Err(e) => return Err(e),
    };

    if let Some(dir) = &save_map {
        save_map_payload(&extraction, dir)?;
    }

    match &output_file {
        Some(path) => {
            std::fs::write(path, output::json::success(&extraction.record)?)?;
            eprintln!("Extraction result written to {}", path.display());
            for w in &extraction.warnings {
                eprintln!("  warning: {w}");
            }
        }
        None => match output_format {
            "json" => println!("{}", output::json::success(&extraction.record)?),
            _ => output::table::print(&extraction.record, &extraction.warnings),
        },
    }

    Ok(())
}

fn extract(input_file: &Path, max_file_size: u64) -> Result<ExtractionResult, CliError> {
    let pdf_bytes = read_input(input_file, max_file_size)?;
    let extractor = LopdfExtractor::new();
    let source_file = input_file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input_file.display().to_string());
    Ok(agrex_core::extract_report(
        &pdf_bytes,
        &extractor,
        &source_file,
    )?)
}

fn save_map_payload(extraction: &ExtractionResult, dir: &Path) -> Result<(), CliError> {
    match &extraction.map_payload {
        Some(payload) => {
            std::fs::create_dir_all(dir)?;
            let path = dir.join(format!("field_map.{}", payload.extension));
            std::fs::write(&path, &payload.data)?;
            eprintln!("Map image written to {}", path.display());
        }
        None => eprintln!("No embedded map image to save."),
    }
    Ok(())
}
