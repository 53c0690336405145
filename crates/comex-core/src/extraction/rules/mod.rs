//! Rule-based field extractors for trade documents.

pub mod dates;
pub mod patterns;
pub mod products;

pub use dates::{normalize_date, DateExtractor};
pub use products::{extract_products, ProductExtractor};

use regex::Regex;

/// Trait for field extractors.
pub trait RuleExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A value matched in source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte span in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// First capture group of `pattern` in `text`, trimmed.
///
/// Empty captures count as no match.
pub fn capture_first(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::patterns::*;

    #[test]
    fn test_capture_first() {
        assert_eq!(
            capture_first(&VESSEL, "M/V MSC PANTERA /NX535R  \nnext"),
            Some("MSC PANTERA /NX535R".to_string())
        );
        assert_eq!(capture_first(&VESSEL, "no ship here"), None);
    }

    fn first_and_count<R: RuleExtractor>(rule: &R, text: &str) -> (bool, usize) {
        (rule.extract(text).is_some(), rule.extract_all(text).len())
    }

    #[test]
    fn test_rule_extractors_share_one_interface() {
        let text = "Date: 08/28/2025\nFROZEN SALMON 704 18484.97 7.10 131243.29\n";
        assert_eq!(first_and_count(&DateExtractor::new(), text), (true, 1));
        assert_eq!(first_and_count(&ProductExtractor::new(), text), (true, 1));
        assert_eq!(first_and_count(&DateExtractor::new(), "no date"), (false, 0));
    }

    #[test]
    fn test_container_code_is_case_sensitive() {
        assert_eq!(
            capture_first(&CONTAINER, "container: MEDU9179728"),
            Some("MEDU9179728".to_string())
        );
        assert_eq!(capture_first(&CONTAINER, "Container: medu9179728"), None);
        assert_eq!(capture_first(&CONTAINER, "Container: MED9179728"), None);
    }

    #[test]
    fn test_buyer_label_needs_word_boundary() {
        assert_eq!(capture_first(&BUYER, "Total: 131,243.29"), None);
        assert_eq!(
            capture_first(&BUYER, "SHIP TO: JSC RUSSIAN FISH COMPANY"),
            Some("JSC RUSSIAN FISH COMPANY".to_string())
        );
    }

    #[test]
    fn test_label_on_its_own_line() {
        let text = "SELLER:\nAustralis Mar S.A.\nDecher 161";
        assert_eq!(capture_first(&SELLER, text), Some("Australis Mar S.A.".to_string()));
    }

    #[test]
    fn test_invoice_number_labels() {
        assert_eq!(
            capture_first(&INVOICE_NUMBER, "Invoice Nr.: 12345"),
            Some("12345".to_string())
        );
        assert_eq!(
            capture_first(&INVOICE_NUMBER, "INVOICE NUMBER: INV-2025-001"),
            Some("INV-2025-001".to_string())
        );
        assert_eq!(
            capture_first(&INVOICE_NUMBER, "Invoice No. 0000077320"),
            Some("0000077320".to_string())
        );
    }

    #[test]
    fn test_total_amount() {
        assert_eq!(
            capture_first(&TOTAL_AMOUNT, "Total: USD 131,243.29"),
            Some("131,243.29".to_string())
        );
        assert_eq!(
            capture_first(&TOTAL_AMOUNT, "TOTAL 5000"),
            Some("5000".to_string())
        );
    }
}
