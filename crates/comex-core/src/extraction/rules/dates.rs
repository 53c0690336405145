//! Date extraction and normalization.

use chrono::NaiveDate;

use super::patterns::{DATE_LABELED, DATE_LONG, DATE_NUMERIC};
use super::{ExtractionMatch, RuleExtractor};

/// Extractor for the labeled document date (`Date: 08/28/2025`).
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleExtractor for DateExtractor {
    /// Normalized date alongside the raw text it came from.
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        DATE_LABELED
            .captures_iter(text)
            .filter_map(|caps| {
                let raw = caps.get(1)?;
                Some(
                    ExtractionMatch::new(normalize_date(raw.as_str()), raw.as_str())
                        .with_position(raw.start(), raw.end()),
                )
            })
            .collect()
    }
}

/// Normalize a date to ISO `YYYY-MM-DD`.
///
/// Numeric dates read month first (`08/28/2025`, `8-28-25`). Long English
/// dates (`August 28th, 2025`) are accepted too. Anything that does not form
/// a valid calendar date is returned unchanged.
pub fn normalize_date(raw: &str) -> String {
    parse_date(raw.trim())
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    if let Some(caps) = DATE_NUMERIC.captures(s) {
        let month: u32 = caps[1].parse().ok()?;
        let day: u32 = caps[2].parse().ok()?;
        let year = parse_year(&caps[3])?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = DATE_LONG.captures(s) {
        let month = english_month_to_number(&caps[1])?;
        let day: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    None
}

fn parse_year(s: &str) -> Option<i32> {
    let year: i32 = s.parse().ok()?;
    if s.len() <= 2 {
        // Two-digit year: 00-49 are 2000s, 50-99 are 1900s
        Some(if year < 50 { 2000 + year } else { 1900 + year })
    } else {
        Some(year)
    }
}

fn english_month_to_number(month: &str) -> Option<u32> {
    let month = month.to_lowercase();
    let number = match month.get(..3)? {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_numeric_month_first() {
        assert_eq!(normalize_date("08/28/2025"), "2025-08-28");
        assert_eq!(normalize_date("8-28-2025"), "2025-08-28");
        assert_eq!(normalize_date("1/2/24"), "2024-01-02");
        assert_eq!(normalize_date("12/31/99"), "1999-12-31");
    }

    #[test]
    fn test_normalize_long_format() {
        assert_eq!(normalize_date("August 28th, 2025"), "2025-08-28");
        assert_eq!(normalize_date("Sep 1, 2025"), "2025-09-01");
    }

    #[test]
    fn test_unparsable_passes_through() {
        assert_eq!(normalize_date("28/08/2025"), "28/08/2025");
        assert_eq!(normalize_date("02/30/2025"), "02/30/2025");
        assert_eq!(normalize_date("next Tuesday"), "next Tuesday");
    }

    #[test]
    fn test_extract_labeled_date() {
        let extractor = DateExtractor::new();

        let result = extractor.extract("Invoice Nr.: 1\nDate: 08/28/2025\n").unwrap();
        assert_eq!(result.value, "2025-08-28");
        assert_eq!(result.source, "08/28/2025");

        let result = extractor.extract("date 28-08-2025").unwrap();
        assert_eq!(result.value, "28-08-2025");

        assert!(extractor.extract("Updated yesterday").is_none());
    }
}
