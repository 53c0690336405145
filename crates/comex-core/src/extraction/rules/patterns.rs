//! Regex patterns for trade document extraction.
//!
//! Natural-language labels match case-insensitively; fixed formats such as
//! container codes do not.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Generic labeled fields
    pub static ref INVOICE_NUMBER: Regex = Regex::new(
        r"(?i)Invoice\s*(?:Number|No\.?|Nr?\.?):?\s*([A-Z0-9\-]+)"
    ).unwrap();

    pub static ref DATE_LABELED: Regex = Regex::new(
        r"(?i)\bDate:?\s*(\d{1,2}[-/]\d{1,2}[-/]\d{2,4})"
    ).unwrap();

    pub static ref SELLER: Regex = Regex::new(
        r"(?i)\b(?:SELLER|FROM)\b[:\s]*([^\n]+)"
    ).unwrap();

    pub static ref BUYER: Regex = Regex::new(
        r"(?i)\b(?:BUYER|TO|CUSTOMER)\b[:\s]*([^\n]+)"
    ).unwrap();

    // Owner code (4 letters) + serial and check digit (7 digits)
    pub static ref CONTAINER: Regex = Regex::new(
        r"(?i:Container)[:\s]*([A-Z]{4}\d{7})"
    ).unwrap();

    pub static ref VESSEL: Regex = Regex::new(
        r"(?i)(?:M/V|Vessel)[:\s]*([^\n]+)"
    ).unwrap();

    // Description, then quantity, weight, unit price and total columns
    pub static ref PRODUCT_LINE: Regex = Regex::new(
        r"([A-Z][A-Z \t\-]+)[ \t]+(\d+(?:,\d+)?(?:\.\d+)?)[ \t]+(\d+(?:,\d+)?(?:\.\d+)?)[ \t]+(\d+(?:,\d+)?(?:\.\d+)?)[ \t]+(\d+(?:,\d+)?(?:\.\d+)?)"
    ).unwrap();

    pub static ref TOTAL_AMOUNT: Regex = Regex::new(
        r"(?i)Total[:\s]*(?:USD?)?[:\s]*?([\d,]+\.?\d*)"
    ).unwrap();

    // Numeric day/month/year, any of - or / as separator
    pub static ref DATE_NUMERIC: Regex = Regex::new(
        r"^(\d{1,2})[-/](\d{1,2})[-/](\d{2,4})$"
    ).unwrap();

    // "August 28th, 2025"
    pub static ref DATE_LONG: Regex = Regex::new(
        r"^([A-Za-z]+)\s+(\d{1,2})(?:st|nd|rd|th)?,?\s+(\d{4})$"
    ).unwrap();

    // Shipping layout blocks
    pub static ref SHIP_INVOICE_NUMBER: Regex = Regex::new(
        r"Invoice Nr\.:\s*(\d+)"
    ).unwrap();

    pub static ref SHIP_DATE: Regex = Regex::new(
        r"Date\s+([A-Za-z]+ \d{1,2}(?:st|nd|rd|th)?, \d{4})"
    ).unwrap();

    pub static ref SHIP_CUSTOMER: Regex = Regex::new(
        r#"CUSTOMER\s+"([^"]+)""#
    ).unwrap();

    // Address block runs until the delivery terms label (or the end of text)
    pub static ref SHIP_ADDRESS: Regex = Regex::new(
        r"(?s)ADDRESS\s+(.*?)(?:TERMS OF DELIVERY|\z)"
    ).unwrap();

    pub static ref SHIP_DELIVERY_TERMS: Regex = Regex::new(
        r"TERMS OF DELIVERY\s+([^\n]+)"
    ).unwrap();

    pub static ref SHIP_PAYMENT_TERMS: Regex = Regex::new(
        r"TERMS OF PAYMENT\s+([^\n]+)"
    ).unwrap();

    pub static ref SHIP_VESSEL: Regex = Regex::new(
        r"M/N\s+([^\n]+)"
    ).unwrap();

    pub static ref SHIP_CONTAINER: Regex = Regex::new(
        r"Container\s+([A-Z0-9]+)"
    ).unwrap();

    pub static ref SHIP_BL: Regex = Regex::new(
        r"BL#\s+([A-Z0-9]+)"
    ).unwrap();

    pub static ref SHIP_ETD: Regex = Regex::new(
        r"ETD\s+(\d{2}-\d{2}-\d{4})"
    ).unwrap();

    pub static ref SHIP_ETA: Regex = Regex::new(
        r"ETA\s+(\d{2}-\d{2}-\d{4})"
    ).unwrap();

    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}
