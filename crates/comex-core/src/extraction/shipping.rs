//! Extractor for labeled-block shipping documents.
//!
//! These exporters print upper-case block labels (`CUSTOMER`, `TERMS OF
//! DELIVERY`, `BL#`, ...) followed by the value on the same line.

use crate::models::extracted::ExtractedData;

use super::rules::patterns::*;
use super::rules::{capture_first, normalize_date};
use super::TextExtractor;

pub struct ShippingLayoutExtractor;

impl ShippingLayoutExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ShippingLayoutExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for ShippingLayoutExtractor {
    fn extract(&self, text: &str) -> ExtractedData {
        let mut data = ExtractedData::new();

        data.invoice_number = capture_first(&SHIP_INVOICE_NUMBER, text);
        data.date = capture_first(&SHIP_DATE, text).map(|d| normalize_date(&d));
        data.buyer_name = capture_first(&SHIP_CUSTOMER, text);
        data.buyer_address = capture_first(&SHIP_ADDRESS, text)
            .map(|a| WHITESPACE_RUN.replace_all(&a, " ").into_owned());
        data.shipping_terms = capture_first(&SHIP_DELIVERY_TERMS, text);
        data.payment_terms = capture_first(&SHIP_PAYMENT_TERMS, text);
        data.vessel_name = capture_first(&SHIP_VESSEL, text);
        data.container_number = capture_first(&SHIP_CONTAINER, text);
        data.bl_number = capture_first(&SHIP_BL, text);
        data.etd = capture_first(&SHIP_ETD, text);
        data.eta = capture_first(&SHIP_ETA, text);

        data
    }
}
