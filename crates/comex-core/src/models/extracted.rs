//! Flat record of fields pulled out of uploaded trade documents.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Data extracted from one or more files.
///
/// Every field is optional; consumers must treat any of them as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedData {
    // General
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    /// ISO `YYYY-MM-DD` when the source date could be parsed, verbatim otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    // Seller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_address: Option<String>,
    /// Chilean tax id (RUT).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_rut: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_phone: Option<String>,

    // Buyer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer_address: Option<String>,
    /// Russian taxpayer number (INN).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer_inn: Option<String>,

    // Commercial terms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_terms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_terms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    // Shipment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loading_port: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vessel_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bl_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seal_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<ProductInfo>>,

    // Dates
    /// Estimated time of departure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etd: Option<String>,
    /// Estimated time of arrival.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eta: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,

    // Banking
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_beneficiary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_account: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_swift: Option<String>,

    // Totals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gross_weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_boxes: Option<String>,

    // Certification and quality
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub producer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plant_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authority_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standards_compliance: Option<Vec<String>>,
}

/// One product line. Numbers stay display strings; nothing computes with them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInfo {
    pub description: String,
    pub quantity: String,
    pub weight: String,
    pub unit_price: String,
    pub total: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specification: Option<String>,
}

/// How a single field of a record is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    /// Key not set.
    Absent,
    /// Key set to an empty string.
    Empty,
    /// Key set to a value.
    Populated,
}

impl FieldState {
    fn of_text(value: Option<&String>) -> Self {
        match value {
            None => FieldState::Absent,
            Some(v) if v.is_empty() => FieldState::Empty,
            Some(_) => FieldState::Populated,
        }
    }

    // A present list counts as populated even when empty.
    fn of_list<T>(value: Option<&Vec<T>>) -> Self {
        match value {
            None => FieldState::Absent,
            Some(_) => FieldState::Populated,
        }
    }
}

macro_rules! text_fields {
    ($($field:ident => $key:literal),* $(,)?) => {
        impl ExtractedData {
            /// Persisted names of every scalar field, in declaration order.
            pub const TEXT_KEYS: &'static [&'static str] = &[$($key),*];

            /// Scalar fields paired with their persisted names.
            pub fn text_fields(&self) -> Vec<(&'static str, Option<&String>)> {
                vec![$(($key, self.$field.as_ref())),*]
            }

            fn text_slots_mut(&mut self) -> Vec<&mut Option<String>> {
                vec![$(&mut self.$field),*]
            }
        }
    };
}

text_fields! {
    invoice_number => "invoiceNumber",
    date => "date",
    reference => "reference",
    seller_name => "sellerName",
    seller_address => "sellerAddress",
    seller_rut => "sellerRut",
    seller_phone => "sellerPhone",
    buyer_name => "buyerName",
    buyer_address => "buyerAddress",
    buyer_inn => "buyerInn",
    shipping_terms => "shippingTerms",
    payment_terms => "paymentTerms",
    currency => "currency",
    country_origin => "countryOrigin",
    loading_port => "loadingPort",
    vessel_name => "vesselName",
    container_number => "containerNumber",
    bl_number => "blNumber",
    seal_number => "sealNumber",
    etd => "etd",
    eta => "eta",
    production_date => "productionDate",
    expiration_date => "expirationDate",
    bank_beneficiary => "bankBeneficiary",
    bank_account => "bankAccount",
    bank_name => "bankName",
    bank_swift => "bankSwift",
    total_amount => "totalAmount",
    net_weight => "netWeight",
    gross_weight => "grossWeight",
    number_of_boxes => "numberOfBoxes",
    producer => "producer",
    plant_number => "plantNumber",
    certificate_number => "certificateNumber",
    authority_name => "authorityName",
}

/// Outcome of [`ExtractedData::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ExtractedData {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.field_states().iter().all(|(_, s)| *s == FieldState::Absent)
    }

    /// State of every field, lists included, keyed by persisted name.
    pub fn field_states(&self) -> Vec<(&'static str, FieldState)> {
        let mut states: Vec<(&'static str, FieldState)> = self
            .text_fields()
            .into_iter()
            .map(|(key, value)| (key, FieldState::of_text(value)))
            .collect();
        states.push(("products", FieldState::of_list(self.products.as_ref())));
        states.push((
            "standardsCompliance",
            FieldState::of_list(self.standards_compliance.as_ref()),
        ));
        states
    }

    /// Look up a scalar field by its persisted name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.text_fields()
            .into_iter()
            .find(|(k, _)| *k == key)
            .and_then(|(_, v)| v.map(String::as_str))
    }

    /// Fold `source` into `self`.
    ///
    /// A field missing (or empty) here takes the source value. Lists present on
    /// both sides are concatenated, source after target. Scalars set on both
    /// sides keep the value already here, so the first file processed wins.
    pub fn merge_from(&mut self, source: &ExtractedData) {
        let sources = source.text_fields();
        for (slot, (_, value)) in self.text_slots_mut().into_iter().zip(sources) {
            let target_set = slot.as_ref().is_some_and(|v| !v.is_empty());
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                if !target_set {
                    *slot = Some(value.clone());
                }
            }
        }

        merge_list(&mut self.products, source.products.as_ref());
        merge_list(&mut self.standards_compliance, source.standards_compliance.as_ref());
    }

    /// Check the record for the fields every generated document needs.
    pub fn validate(&self) -> ValidationReport {
        let mut errors = Vec::new();

        if !is_set(&self.invoice_number) {
            errors.push("Invoice number not found".to_string());
        }
        if !is_set(&self.date) {
            errors.push("Date not found".to_string());
        }
        if !is_set(&self.seller_name) {
            errors.push("Seller information not found".to_string());
        }
        if !is_set(&self.buyer_name) {
            errors.push("Buyer information not found".to_string());
        }

        if let Some(date) = self.date.as_deref().filter(|d| !d.is_empty()) {
            if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
                errors.push(format!("Invalid date format: {}", date));
            }
        }

        if self.products.as_ref().is_some_and(|p| p.is_empty()) {
            errors.push("No products found in the documents".to_string());
        }

        ValidationReport {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

fn is_set(value: &Option<String>) -> bool {
    value.as_ref().is_some_and(|v| !v.is_empty())
}

fn merge_list<T: Clone>(target: &mut Option<Vec<T>>, source: Option<&Vec<T>>) {
    let Some(source) = source else {
        return;
    };
    match target {
        Some(existing) => existing.extend(source.iter().cloned()),
        None => *target = Some(source.clone()),
    }
}
