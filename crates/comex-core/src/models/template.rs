//! Document types and template layout descriptions.
//!
//! Templates are data only. Placeholders such as `{{invoiceNumber}}` are carried
//! through untouched for the rendering layer.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// The closed set of trade documents the application can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentType {
    /// Commercial invoice.
    Invoice,
    /// Packing list.
    PackingList,
    /// Price list.
    PriceList,
    /// Quality certificate.
    Quality,
}

impl DocumentType {
    /// All document types in registry order.
    pub const ALL: [DocumentType; 4] = [
        DocumentType::Invoice,
        DocumentType::PackingList,
        DocumentType::PriceList,
        DocumentType::Quality,
    ];

    /// Identifier used in persisted data (`packingList`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Invoice => "invoice",
            DocumentType::PackingList => "packingList",
            DocumentType::PriceList => "priceList",
            DocumentType::Quality => "quality",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = RegistryError;

    /// Accepts the persisted identifier, case-insensitively, with or without
    /// separators (`packingList`, `packing-list`, `packing_list`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_' && *c != ' ')
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "invoice" => Ok(DocumentType::Invoice),
            "packinglist" => Ok(DocumentType::PackingList),
            "pricelist" => Ok(DocumentType::PriceList),
            "quality" => Ok(DocumentType::Quality),
            _ => Err(RegistryError::KindNotFound(s.to_string())),
        }
    }
}

/// A reusable layout description for one document type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTemplate {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DocumentType,
    pub structure: TemplateStructure,
    #[serde(default)]
    pub custom_fields: Vec<CustomField>,
    pub styling: TemplateStyle,
    /// Set when the template is assigned to a client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl DocumentTemplate {
    /// Stamp both timestamps, returning the template.
    pub fn stamped(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self.updated_at = Some(at);
        self
    }

    /// All placeholder names referenced by the header and sections, in order
    /// of appearance and without duplicates.
    pub fn placeholders(&self) -> Vec<String> {
        let values = self
            .structure
            .header
            .values()
            .chain(self.structure.sections.iter().flat_map(|s| s.fields.values()))
            .chain(self.structure.footer.iter().flat_map(|f| f.values()));

        let mut names: Vec<String> = Vec::new();
        for value in values {
            if let Some(name) = placeholder_name(value) {
                if !names.iter().any(|n| n == name) {
                    names.push(name.to_string());
                }
            }
        }
        names
    }
}

/// Name inside a `{{name}}` placeholder, if the value is one.
pub fn placeholder_name(value: &str) -> Option<&str> {
    value
        .trim()
        .strip_prefix("{{")
        .and_then(|v| v.strip_suffix("}}"))
        .map(str::trim)
}

/// Header placeholders plus ordered sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateStructure {
    pub header: BTreeMap<String, String>,
    pub sections: Vec<TemplateSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<BTreeMap<String, String>>,
}

/// One block of a document layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSection {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SectionKind,
    /// Field name to placeholder mapping.
    pub fields: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub repeatable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Text,
    Table,
    List,
    Image,
}

/// A user-defined field added to a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomField {
    pub id: String,
    pub key: String,
    pub label: String,
    pub value: String,
    #[serde(rename = "type")]
    pub kind: CustomFieldKind,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomFieldKind {
    Text,
    Number,
    Date,
    Select,
}

/// Visual styling handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateStyle {
    pub font_size: u32,
    pub font_family: String,
    pub colors: TemplateColors,
    pub spacing: TemplateSpacing,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateColors {
    pub primary: String,
    pub secondary: String,
    pub text: String,
    pub background: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSpacing {
    pub margin: u32,
    pub padding: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    #[default]
    Single,
    TwoColumn,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_type_parsing() {
        assert_eq!("invoice".parse::<DocumentType>(), Ok(DocumentType::Invoice));
        assert_eq!("packingList".parse::<DocumentType>(), Ok(DocumentType::PackingList));
        assert_eq!("price-list".parse::<DocumentType>(), Ok(DocumentType::PriceList));
        assert_eq!("QUALITY".parse::<DocumentType>(), Ok(DocumentType::Quality));
        assert_eq!(
            "certificate".parse::<DocumentType>(),
            Err(RegistryError::KindNotFound("certificate".to_string()))
        );
    }

    #[test]
    fn test_document_type_serde_names() {
        let json = serde_json::to_string(&DocumentType::PackingList).unwrap();
        assert_eq!(json, "\"packingList\"");

        for kind in DocumentType::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn test_placeholder_name() {
        assert_eq!(placeholder_name("{{invoiceNumber}}"), Some("invoiceNumber"));
        assert_eq!(placeholder_name(" {{ date }} "), Some("date"));
        assert_eq!(placeholder_name("COMMERCIAL INVOICE"), None);
    }

    #[test]
    fn test_layout_serde() {
        assert_eq!(serde_json::to_string(&Layout::TwoColumn).unwrap(), "\"two-column\"");
        assert_eq!(serde_json::to_string(&SectionKind::Table).unwrap(), "\"table\"");
    }
}
