use agrex_core::model::{ExtractedRecord, MapImageSource, Provenance};
use agrex_core::warnings::ExtractionWarning;

pub fn print(record: &ExtractedRecord, warnings: &[ExtractionWarning]) {
    println!("=== Report ===\n");
    println!("  Provider:       {}", dash(&record.report.provider));
    println!("  Type:           {}", dash(&record.report.report_type));
    let date = record.report.survey_date.as_ref().map(|d| d.to_string());
    println!("  Survey date:    {}", dash(date.as_deref().unwrap_or("")));
    println!("  Analysis:       {}", dash(&record.report.analysis_name));
    println!();

    println!("=== Field ===\n");
    println!("  Crop:           {}", dash(&record.field.crop));
    println!("  Growing stage:  {}", dash(&record.field.growing_stage));
    println!("  Area:           {} ha", record.field.area_hectares);
    println!();

    match &record.weed_analysis {
        Some(weed) => {
            println!("=== Weed analysis ===\n");
            let max_name = weed
                .stress_levels
                .iter()
                .map(|l| l.level.len())
                .max()
                .unwrap_or(10);
            for level in &weed.stress_levels {
                let pct = format!("{}%", level.percentage);
                let area = format!("{} ha", level.area_hectares);
                println!(
                    "  {:<name_w$}  {:>8}  {:>10}  [{}]",
                    level.level,
                    pct,
                    area,
                    level.severity,
                    name_w = max_name
                );
            }
            if !weed.stress_levels.is_empty() {
                println!();
            }
            let source = match weed.totals_source {
                Provenance::Parsed => "parsed",
                Provenance::Derived => "derived",
            };
            println!(
                "  Total under stress: {}% / {} ha ({})",
                weed.total_stress_percent, weed.total_stress_area_hectares, source
            );
            println!();
        }
        None => println!("No weed analysis section found.\n"),
    }

    if let Some(notes) = &record.additional_info {
        println!("=== Additional info ===\n");
        for line in notes.lines() {
            println!("  {line}");
        }
        println!();
    }

    match &record.map_image {
        Some(map) if map.source != MapImageSource::None => {
            let source = match map.source {
                MapImageSource::Embedded => "embedded",
                MapImageSource::Referenced => "referenced",
                MapImageSource::None => "none",
            };
            println!("=== Map image ===\n");
            println!("  Source:  {source}");
            println!("  Format:  {}", dash(map.format.as_deref().unwrap_or("")));
            if let (Some(w), Some(h)) = (map.width, map.height) {
                println!("  Size:    {w} x {h} px");
            }
            if let Some(bytes) = map.size_bytes {
                println!("  Stored:  {bytes} bytes");
            }
            println!();
        }
        _ => println!("No map image found.\n"),
    }

    if !warnings.is_empty() {
        println!("Warnings:");
        for w in warnings {
            println!("  - {w}");
        }
        println!();
    }

    println!(
        "Source: {} ({} page(s), extractor v{})",
        record.metadata.source_file, record.metadata.total_pages, record.metadata.extractor_version
    );
}

fn dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
