//! Product line extraction.

use super::patterns::PRODUCT_LINE;
use super::RuleExtractor;
use crate::models::extracted::ProductInfo;

/// Extractor for product lines: an upper-case description followed by
/// quantity, weight, unit price and total columns.
pub struct ProductExtractor;

impl ProductExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ProductExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleExtractor for ProductExtractor {
    type Output = ProductInfo;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        PRODUCT_LINE
            .captures_iter(text)
            .map(|caps| ProductInfo {
                description: caps[1].trim().to_string(),
                quantity: caps[2].to_string(),
                weight: caps[3].to_string(),
                unit_price: caps[4].to_string(),
                total: caps[5].to_string(),
                size: None,
                specification: None,
            })
            .collect()
    }
}

/// All product lines in `text`, in document order.
pub fn extract_products(text: &str) -> Vec<ProductInfo> {
    ProductExtractor::new().extract_all(text)
}
