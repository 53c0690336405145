//! Built-in configuration and layout for each document type.

use std::collections::BTreeMap;

use crate::models::template::{
    DocumentTemplate, DocumentType, Layout, SectionKind, TemplateColors, TemplateSection,
    TemplateSpacing, TemplateStructure, TemplateStyle,
};

use super::DocumentConfig;

pub(super) fn config_for(kind: DocumentType) -> DocumentConfig {
    match kind {
        DocumentType::Invoice => DocumentConfig {
            kind,
            name: "Commercial Invoice",
            icon: "file-text",
            color: "blue",
            required_fields: &["invoiceNumber", "date", "sellerName", "buyerName", "totalAmount"],
            optional_fields: &["reference", "shippingTerms", "paymentTerms", "currency"],
            default_template: invoice_template(),
        },
        DocumentType::PackingList => DocumentConfig {
            kind,
            name: "Packing List",
            icon: "package",
            color: "green",
            required_fields: &["date", "fromName", "toName", "productDescription"],
            optional_fields: &["contractNumber", "vesselName", "containerNumber"],
            default_template: packing_list_template(),
        },
        DocumentType::PriceList => DocumentConfig {
            kind,
            name: "Price List",
            icon: "dollar-sign",
            color: "purple",
            required_fields: &["date", "companyName", "currency"],
            optional_fields: &["validityDate", "customerName", "paymentTerms"],
            default_template: price_list_template(),
        },
        DocumentType::Quality => DocumentConfig {
            kind,
            name: "Quality Certificate",
            icon: "award",
            color: "orange",
            required_fields: &["certificateNumber", "date", "authorityName", "productDescription"],
            optional_fields: &["laboratoryName", "standardsCompliance", "validityPeriod"],
            default_template: quality_template(),
        },
    }
}

fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn section(id: &str, name: &str, kind: SectionKind, fields: &[(&str, &str)]) -> TemplateSection {
    TemplateSection {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        fields: map(fields),
        repeatable: false,
    }
}

fn table(id: &str, name: &str, fields: &[(&str, &str)]) -> TemplateSection {
    TemplateSection {
        repeatable: true,
        ..section(id, name, SectionKind::Table, fields)
    }
}

fn style(font_size: u32, primary: &str) -> TemplateStyle {
    TemplateStyle {
        font_size,
        font_family: "Arial".to_string(),
        colors: TemplateColors {
            primary: primary.to_string(),
            secondary: "#6b7280".to_string(),
            text: "#374151".to_string(),
            background: "#ffffff".to_string(),
        },
        spacing: TemplateSpacing {
            margin: 20,
            padding: 15,
        },
        layout: Layout::Single,
    }
}

fn template(
    id: &str,
    name: &str,
    kind: DocumentType,
    header: &[(&str, &str)],
    sections: Vec<TemplateSection>,
    styling: TemplateStyle,
) -> DocumentTemplate {
    DocumentTemplate {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        structure: TemplateStructure {
            header: map(header),
            sections,
            footer: None,
        },
        custom_fields: Vec::new(),
        styling,
        created_at: None,
        updated_at: None,
    }
}

fn invoice_template() -> DocumentTemplate {
    template(
        "default-invoice",
        "Commercial Invoice Standard",
        DocumentType::Invoice,
        &[
            ("title", "COMMERCIAL INVOICE"),
            ("invoiceNumber", "{{invoiceNumber}}"),
            ("date", "{{date}}"),
            ("reference", "{{reference}}"),
        ],
        vec![
            section(
                "seller-info",
                "Seller Information",
                SectionKind::Text,
                &[
                    ("name", "{{sellerName}}"),
                    ("address", "{{sellerAddress}}"),
                    ("rut", "{{sellerRut}}"),
                    ("phone", "{{sellerPhone}}"),
                ],
            ),
            section(
                "buyer-info",
                "Buyer Information",
                SectionKind::Text,
                &[
                    ("name", "{{buyerName}}"),
                    ("address", "{{buyerAddress}}"),
                    ("inn", "{{buyerInn}}"),
                ],
            ),
            section(
                "shipping-info",
                "Shipping Information",
                SectionKind::Text,
                &[
                    ("terms", "{{shippingTerms}}"),
                    ("origin", "{{countryOrigin}}"),
                    ("loadingPort", "{{loadingPort}}"),
                    ("vessel", "{{vesselName}}"),
                    ("container", "{{containerNumber}}"),
                    ("bl", "{{blNumber}}"),
                ],
            ),
            table(
                "products",
                "Products",
                &[
                    ("description", "{{productDescription}}"),
                    ("quantity", "{{quantity}}"),
                    ("weight", "{{weight}}"),
                    ("unitPrice", "{{unitPrice}}"),
                    ("total", "{{totalAmount}}"),
                ],
            ),
            section(
                "banking-info",
                "Banking Information",
                SectionKind::Text,
                &[
                    ("beneficiary", "{{bankBeneficiary}}"),
                    ("account", "{{bankAccount}}"),
                    ("bank", "{{bankName}}"),
                    ("swift", "{{bankSwift}}"),
                ],
            ),
        ],
        style(12, "#1f2937"),
    )
}

fn packing_list_template() -> DocumentTemplate {
    template(
        "default-packing",
        "Packing List Standard",
        DocumentType::PackingList,
        &[("title", "PACKING LIST"), ("date", "{{date}}")],
        vec![
            section(
                "from-info",
                "From",
                SectionKind::Text,
                &[
                    ("name", "{{fromName}}"),
                    ("address", "{{fromAddress}}"),
                    ("phone", "{{fromPhone}}"),
                ],
            ),
            section(
                "to-info",
                "To",
                SectionKind::Text,
                &[
                    ("name", "{{toName}}"),
                    ("address", "{{toAddress}}"),
                    ("inn", "{{toInn}}"),
                ],
            ),
            section(
                "contract-info",
                "Contract Information",
                SectionKind::Text,
                &[("number", "{{contractNumber}}"), ("date", "{{contractDate}}")],
            ),
            section(
                "shipping-details",
                "Shipping Details",
                SectionKind::Text,
                &[
                    ("terms", "{{deliveryTerms}}"),
                    ("origin", "{{countryOrigin}}"),
                    ("vessel", "{{vesselName}}"),
                    ("container", "{{containerNumber}}"),
                    ("bl", "{{blNumber}}"),
                ],
            ),
            table(
                "product-details",
                "Product Details",
                &[
                    ("size", "{{productSize}}"),
                    ("boxes", "{{numberOfBoxes}}"),
                    ("netWeight", "{{netWeight}}"),
                    ("grossWeight", "{{grossWeight}}"),
                    ("prodDate", "{{productionDate}}"),
                    ("expDate", "{{expirationDate}}"),
                ],
            ),
        ],
        style(11, "#065f46"),
    )
}

fn price_list_template() -> DocumentTemplate {
    template(
        "default-price",
        "Price List Standard",
        DocumentType::PriceList,
        &[
            ("title", "PRICE LIST"),
            ("date", "{{date}}"),
            ("validUntil", "{{validityDate}}"),
        ],
        vec![
            section(
                "company-info",
                "Company Information",
                SectionKind::Text,
                &[("name", "{{companyName}}"), ("address", "{{companyAddress}}")],
            ),
            section(
                "customer-info",
                "Customer Information",
                SectionKind::Text,
                &[("name", "{{customerName}}"), ("reference", "{{customerReference}}")],
            ),
            section(
                "terms",
                "Terms",
                SectionKind::Text,
                &[
                    ("currency", "{{currency}}"),
                    ("payment", "{{paymentTerms}}"),
                    ("delivery", "{{deliveryTerms}}"),
                    ("validity", "{{validityPeriod}}"),
                ],
            ),
            table(
                "products",
                "Products",
                &[
                    ("description", "{{productDescription}}"),
                    ("specification", "{{productSpec}}"),
                    ("unitPrice", "{{unitPrice}}"),
                    ("minimumOrder", "{{minOrder}}"),
                ],
            ),
        ],
        style(12, "#7c3aed"),
    )
}

fn quality_template() -> DocumentTemplate {
    template(
        "default-quality",
        "Quality Certificate Standard",
        DocumentType::Quality,
        &[
            ("title", "QUALITY CERTIFICATE"),
            ("certificateNumber", "{{certificateNumber}}"),
            ("date", "{{issueDate}}"),
        ],
        vec![
            section(
                "authority-info",
                "Certifying Authority",
                SectionKind::Text,
                &[
                    ("name", "{{authorityName}}"),
                    ("address", "{{authorityAddress}}"),
                    ("license", "{{licenseNumber}}"),
                ],
            ),
            section(
                "product-info",
                "Product Information",
                SectionKind::Text,
                &[
                    ("description", "{{productDescription}}"),
                    ("origin", "{{countryOrigin}}"),
                    ("producer", "{{producerName}}"),
                    ("batchNumber", "{{batchNumber}}"),
                ],
            ),
            section(
                "analysis-info",
                "Analysis Information",
                SectionKind::Text,
                &[
                    ("laboratory", "{{laboratoryName}}"),
                    ("method", "{{analysisMethod}}"),
                    ("date", "{{analysisDate}}"),
                ],
            ),
            table(
                "standards",
                "Standards Compliance",
                &[
                    ("parameter", "{{parameter}}"),
                    ("result", "{{result}}"),
                    ("standard", "{{standardValue}}"),
                    ("status", "{{status}}"),
                ],
            ),
            section(
                "certification",
                "Certification Details",
                SectionKind::Text,
                &[
                    ("standards", "{{certificationStandards}}"),
                    ("validity", "{{validityPeriod}}"),
                    ("inspector", "{{inspectorName}}"),
                ],
            ),
        ],
        style(12, "#ea580c"),
    )
}
