use crate::error::CliError;
use agrex_core::parsing::severity::VOCABULARY;

pub fn run() -> Result<(), CliError> {
    println!("Known stress level labels:\n");
    let max_name = VOCABULARY
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or(10);
    for &(label, severity) in VOCABULARY {
        println!("  {:<width$}  -> {}", label, severity, width = max_name);
    }
    println!();
    println!("Any other label is kept verbatim and mapped to severity 'unknown'.");
    Ok(())
}
