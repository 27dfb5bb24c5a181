use crate::model::SurveyDate;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a decimal number, tolerating a decimal comma.
pub fn parse_decimal(s: &str) -> Option<Decimal> {
    let normalized = s.trim().replace(',', ".");
    Decimal::from_str(&normalized).ok()
}

/// Parse a percentage token: "80", "80%", "80 %", "79.5%".
pub fn parse_percent(s: &str) -> Option<Decimal> {
    let s = s.trim();
    let s = s.strip_suffix('%').unwrap_or(s);
    parse_decimal(s)
}

/// Parse an area token: "2.5", "2.5 ha", "2.5 Hectare", "2,5 hectares".
pub fn parse_area(s: &str) -> Option<Decimal> {
    let lower = s.trim().to_lowercase();
    let stripped = lower
        .strip_suffix("hectares")
        .or_else(|| lower.strip_suffix("hectare"))
        .or_else(|| lower.strip_suffix("ha"))
        .unwrap_or(&lower);
    parse_decimal(stripped)
}

/// Parse a survey date token, normalizing to ISO only when unambiguous.
///
/// Accepted as ISO: `YYYY-MM-DD`, and `A-B-YYYY` (also `/` or `.` separated)
/// when the day/month order is decidable, i.e. A == B or exactly one of the
/// two exceeds 12. Anything else, including calendar-invalid dates, is
/// preserved verbatim — never silently coerced to a wrong date.
pub fn parse_survey_date(s: &str) -> SurveyDate {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return SurveyDate::Iso(date);
    }
    if let Some(date) = parse_day_month_year(s) {
        return SurveyDate::Iso(date);
    }
    SurveyDate::Raw(s.to_string())
}

fn parse_day_month_year(s: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = s.split(['-', '/', '.']).collect();
    if parts.len() != 3 || parts[2].len() != 4 {
        return None;
    }
    let nums: Vec<u32> = parts
        .iter()
        .map(|p| p.trim().parse().ok())
        .collect::<Option<_>>()?;

    let (a, b) = (nums[0], nums[1]);
    let (day, month) = if a == b {
        (a, b)
    } else if a > 12 && b <= 12 {
        (a, b)
    } else if b > 12 && a <= 12 {
        (b, a)
    } else {
        return None;
    };
    NaiveDate::from_ymd_opt(nums[2] as i32, month, day)
}

/// True when a token has a day-month-year or ISO shape worth trying as a
/// date: three numeric parts, one of them a 4-digit year.
pub fn is_date_shaped(token: &str) -> bool {
    let parts: Vec<&str> = token.trim().split(['-', '/', '.']).collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
        && parts.iter().any(|p| p.len() == 4)
}
