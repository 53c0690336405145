//! Static catalog of document types, their field requirements and default
//! templates.

mod defaults;

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use serde::Serialize;

use crate::error::RegistryError;
use crate::models::template::{DocumentTemplate, DocumentType};

/// Display and template configuration for one document type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentConfig {
    pub kind: DocumentType,
    /// Human-readable name ("Commercial Invoice").
    pub name: &'static str,
    /// Icon identifier for the UI.
    pub icon: &'static str,
    /// Accent color name for the UI.
    pub color: &'static str,
    pub required_fields: &'static [&'static str],
    pub optional_fields: &'static [&'static str],
    pub default_template: DocumentTemplate,
}

lazy_static! {
    static ref CATALOG: BTreeMap<DocumentType, DocumentConfig> = DocumentType::ALL
        .into_iter()
        .map(|kind| (kind, defaults::config_for(kind)))
        .collect();
}

/// Configuration of a document type.
pub fn get_config(kind: DocumentType) -> &'static DocumentConfig {
    // CATALOG is built from DocumentType::ALL, so every variant has an entry.
    &CATALOG[&kind]
}

/// Configuration looked up by a type name such as `"packingList"`.
pub fn get_config_by_name(name: &str) -> Result<&'static DocumentConfig, RegistryError> {
    let kind: DocumentType = name.parse()?;
    Ok(get_config(kind))
}

/// Every registered document type, in catalog order.
pub fn list_types() -> Vec<DocumentType> {
    DocumentType::ALL.to_vec()
}

/// A fresh copy of the default template for a document type.
pub fn default_template(kind: DocumentType) -> DocumentTemplate {
    get_config(kind).default_template.clone()
}
