use crate::error::ExtractError;
use crate::model::FieldInfo;
use crate::parsing::extract_after_label;
use crate::parsing::values::parse_area;
use crate::sections::Section;
use rust_decimal::Decimal;

/// Parse field attributes from the "Field Information" section.
///
/// Crop and growing stage are optional. The area is required and must parse
/// as a non-negative number; anything else fails the call with a reported
/// `MalformedField` error.
pub fn parse_field(section: &Section) -> Result<FieldInfo, ExtractError> {
    let mut crop = String::new();
    let mut growing_stage = String::new();
    let mut area: Option<Decimal> = None;
    let mut bad_area: Option<String> = None;

    for line in &section.lines {
        let line = line.trim();

        if crop.is_empty() {
            if let Some(v) = extract_after_label(line, "crop") {
                let v = v.to_lowercase();
                // Summary rows print "Total" in the crop column.
                if v != "total" {
                    crop = v;
                }
            }
        }

        if growing_stage.is_empty() {
            if let Some(v) = extract_after_label(line, "growing stage")
                .or_else(|| extract_after_label(line, "stage"))
            {
                growing_stage = v;
            }
        }

        if area.is_none() {
            if let Some(v) = extract_after_label(line, "field area")
                .or_else(|| extract_after_label(line, "area"))
            {
                match parse_area(&v) {
                    Some(a) if a >= Decimal::ZERO => area = Some(a),
                    _ => bad_area = Some(v),
                }
            }
        }
    }

    let Some(area_hectares) = area else {
        let reason = match bad_area {
            Some(v) => format!("area value '{v}' is not a non-negative number"),
            None => "no area value found".to_string(),
        };
        return Err(ExtractError::MalformedField {
            section: "field",
            reason,
        });
    };

    Ok(FieldInfo {
        crop,
        growing_stage,
        area_hectares,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::SectionKind;
    use rust_decimal_macros::dec;

    fn field_section(lines: &[&str]) -> Section {
        Section {
            kind: SectionKind::Field,
            page_start: 1,
            page_end: 1,
            lines: lines.iter().map(|l| l.to_string()).collect(),
        }
    }

    #[test]
    fn test_full_field_block() {
        let section = field_section(&[
            "Field Information",
            "Crop: Maize",
            "Growing stage: Vegetative",
            "Field area: 2.5 ha",
        ]);
        let field = parse_field(&section).unwrap();
        assert_eq!(field.crop, "maize");
        assert_eq!(field.growing_stage, "Vegetative");
        assert_eq!(field.area_hectares, dec!(2.5));
    }

    #[test]
    fn test_area_unit_variants() {
        let field = parse_field(&field_section(&["Field area: 12,75 Hectares"])).unwrap();
        assert_eq!(field.area_hectares, dec!(12.75));
    }

    #[test]
    fn test_crop_is_lowercased_and_total_rejected() {
        let field = parse_field(&field_section(&[
            "Crop: Total",
            "Crop: Winter Wheat",
            "Area: 4 ha",
        ]))
        .unwrap();
        assert_eq!(field.crop, "winter wheat");
    }

    #[test]
    fn test_missing_area_is_malformed() {
        let err = parse_field(&field_section(&["Crop: Maize"])).unwrap_err();
        match err {
            ExtractError::MalformedField { section, .. } => assert_eq!(section, "field"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_area_is_malformed() {
        let err = parse_field(&field_section(&["Field area: unknown"])).unwrap_err();
        match err {
            ExtractError::MalformedField { section, reason } => {
                assert_eq!(section, "field");
                assert!(reason.contains("unknown"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_negative_area_is_malformed() {
        let err = parse_field(&field_section(&["Field area: -2.5 ha"])).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedField { .. }));
    }

    #[test]
    fn test_missing_crop_left_empty() {
        let field = parse_field(&field_section(&["Field area: 1 ha"])).unwrap();
        assert_eq!(field.crop, "");
        assert_eq!(field.growing_stage, "");
    }
}
