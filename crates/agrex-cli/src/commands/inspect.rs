use agrex_core::extraction::lopdf_backend::LopdfExtractor;
use agrex_core::extraction::PdfExtractor;
use agrex_core::sections;
use std::path::PathBuf;

use crate::commands::read_input;
use crate::error::CliError;

/// Print what each pipeline stage sees, without building a record.
///
/// Useful when a report extracts with nulls or fails and the question is
/// whether the text layer, the markers or the parsers are at fault.
pub fn run(input_file: PathBuf, max_file_size: u64) -> Result<(), CliError> {
    let pdf_bytes = read_input(&input_file, max_file_size)?;
    let extractor = LopdfExtractor::new();

    let pages = extractor.extract_pages(&pdf_bytes)?;
    println!("Backend: {}", extractor.backend_name());
    println!("Pages: {}\n", pages.len());
    for page in &pages {
        println!(
            "  page {:>3}  {:>6} chars  {:>4} lines",
            page.page_number,
            page.text.chars().count(),
            page.text.lines().count()
        );
    }
    println!();

    match sections::locate_sections(&pages) {
        Ok((map, warnings)) => {
            println!("Sections:");
            for section in map.iter() {
                println!(
                    "  {:<16} pages {}-{}  {} line(s)",
                    section.kind.name(),
                    section.page_start,
                    section.page_end,
                    section.lines.len()
                );
            }
            for w in &warnings {
                println!("  warning: {w}");
            }
        }
        Err(e) => println!("Section location failed: {e}"),
    }
    println!();

    let images = extractor.scan_images(&pdf_bytes)?;
    println!("Images: {}", images.len());
    for img in &images {
        let kind = if img.external { "external" } else { "embedded" };
        println!(
            "  page {:>3}  {:>5} x {:<5}  {:>8} bytes  {:<10} {}",
            img.page_number,
            img.width,
            img.height,
            img.data.len(),
            img.filter.as_deref().unwrap_or("-"),
            kind
        );
    }

    Ok(())
}
