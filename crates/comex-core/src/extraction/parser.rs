//! Generic labeled-field extractor for document text.

use tracing::debug;

use crate::models::extracted::ExtractedData;

use super::rules::patterns::*;
use super::rules::{capture_first, DateExtractor, ProductExtractor, RuleExtractor};
use super::TextExtractor;

/// Applies a fixed list of independent pattern rules, each filling at most
/// one field.
pub struct PatternExtractor {
    dates: DateExtractor,
    products: ProductExtractor,
}

impl PatternExtractor {
    pub fn new() -> Self {
        Self {
            dates: DateExtractor::new(),
            products: ProductExtractor::new(),
        }
    }
}

impl Default for PatternExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for PatternExtractor {
    fn extract(&self, text: &str) -> ExtractedData {
        let mut data = ExtractedData::new();

        data.invoice_number = capture_first(&INVOICE_NUMBER, text);
        data.date = self.dates.extract(text).map(|m| m.value);
        data.seller_name = capture_first(&SELLER, text);
        data.buyer_name = capture_first(&BUYER, text);
        data.container_number = capture_first(&CONTAINER, text);
        data.vessel_name = capture_first(&VESSEL, text);

        let products = self.products.extract_all(text);
        if !products.is_empty() {
            data.products = Some(products);
        }

        data.total_amount = capture_first(&TOTAL_AMOUNT, text);

        debug!(
            "Pattern rules matched {} fields in {} characters",
            data.field_states()
                .iter()
                .filter(|(_, s)| *s != crate::models::extracted::FieldState::Absent)
                .count(),
            text.len()
        );

        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_line_rules() {
        let extractor = PatternExtractor::new();

        let data = extractor.extract("Invoice Nr.: 12345");
        assert_eq!(data.invoice_number.as_deref(), Some("12345"));

        let data = extractor.extract("Container: ABCD1234567");
        assert_eq!(data.container_number.as_deref(), Some("ABCD1234567"));
    }

    #[test]
    fn test_full_document() {
        let text = "\
COMMERCIAL INVOICE
Invoice Nr.: 0000077320
Date: 08/28/2025
SELLER: Australis Mar S.A.
BUYER: JSC RUSSIAN FISH COMPANY
Vessel: MSC PANTERA /NX535R
Container: MEDU9179728

FROZEN ATLANTIC SALMON 704 18,484.97 7.10 131,243.29

Total: USD 131,243.29
";
        let data = PatternExtractor::new().extract(text);

        assert_eq!(data.invoice_number.as_deref(), Some("0000077320"));
        assert_eq!(data.date.as_deref(), Some("2025-08-28"));
        assert_eq!(data.seller_name.as_deref(), Some("Australis Mar S.A."));
        assert_eq!(data.buyer_name.as_deref(), Some("JSC RUSSIAN FISH COMPANY"));
        assert_eq!(data.vessel_name.as_deref(), Some("MSC PANTERA /NX535R"));
        assert_eq!(data.container_number.as_deref(), Some("MEDU9179728"));
        assert_eq!(data.total_amount.as_deref(), Some("131,243.29"));

        let products = data.products.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].description, "FROZEN ATLANTIC SALMON");
        assert_eq!(products[0].quantity, "704");
    }

    #[test]
    fn test_unmatched_fields_stay_absent() {
        let data = PatternExtractor::new().extract("nothing useful here");
        assert!(data.is_empty());
    }
}
