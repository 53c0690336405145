//! Demo records used by the CLI `--sample` flag and by tests.

use chrono::Utc;

use crate::models::client::Client;
use crate::models::extracted::{ExtractedData, ProductInfo};
use crate::models::template::DocumentType;
use crate::registry;

fn s(value: &str) -> Option<String> {
    Some(value.to_string())
}

/// A fully populated extraction for a frozen salmon shipment.
pub fn sample_extracted_data() -> ExtractedData {
    ExtractedData {
        invoice_number: s("0000077320"),
        date: s("2025-08-28"),
        reference: s("141667"),

        seller_name: s("Australis Mar S.A."),
        seller_address: s("Decher 161, Puerto Varas, Chile"),
        seller_rut: s("76.003.885-7"),

        buyer_name: s("JSC RUSSIAN FISH COMPANY"),
        buyer_address: s("121353, RUSSIAN FEDERATION, MOSCOW, BELOVEZHSKAYA STREET, 4"),
        buyer_inn: s("7701174512"),

        shipping_terms: s("CFR ST. PETERSBURG ACCORDING INCOTERMS 2010"),
        payment_terms: s("30% PREPAYMENT, 70% AGAINST COPY OF DOCUMENTS SENT BY EMAIL"),
        currency: s("USD"),

        country_origin: s("CHILE"),
        loading_port: s("CORONEL, CHILE"),
        vessel_name: s("MSC PANTERA /NX535R"),
        container_number: s("MEDU9179728"),
        bl_number: s("MEDUFP482229"),
        seal_number: s("FX34216182"),

        etd: s("28-08-2025"),
        eta: s("10-10-2025"),

        products: Some(vec![ProductInfo {
            description: "FROZEN ATLANTIC SALMON HON PREMIUM (SALMO SALAR)".to_string(),
            quantity: "704 cartons".to_string(),
            weight: "18,484.97 kg".to_string(),
            unit_price: "7.10 USD/kg".to_string(),
            total: "131,243.29 USD".to_string(),
            size: s("6 - 7 KGS"),
            specification: None,
        }]),

        total_amount: s("131,243.29 USD"),
        net_weight: s("18,484.97 kg"),
        gross_weight: s("20,123.68 kg"),
        number_of_boxes: s("704"),

        producer: s("PROCESADORA DUMESTRE LIMITADA"),
        plant_number: s("12157"),

        bank_beneficiary: s("AUSTRALIS MAR S.A."),
        bank_account: s("5100117136"),
        bank_name: s("Banco Santander Chile"),
        bank_swift: s("BSCHCLRM"),

        ..Default::default()
    }
}

/// A demo client with every document type selected and default templates.
pub fn sample_client() -> Client {
    let now = Utc::now();
    let templates = DocumentType::ALL
        .iter()
        .map(|&kind| (kind, registry::default_template(kind).stamped(now)))
        .collect();

    Client {
        id: "1".to_string(),
        name: "TRAPANANDA SEAFARMS LLC".to_string(),
        email: "contact@trapananda.com".to_string(),
        address: "123 Main St, Seattle, WA".to_string(),
        phone: "+1-555-0123".to_string(),
        country: "USA".to_string(),
        document_types: DocumentType::ALL.to_vec(),
        templates,
        orders: Vec::new(),
        created_at: now,
        updated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confidence;

    #[test]
    fn test_sample_data_is_valid() {
        let data = sample_extracted_data();
        let report = data.validate();
        assert!(report.is_valid, "{:?}", report.errors);
        assert_eq!(confidence::score(&data), 100.0);
    }

    #[test]
    fn test_sample_client_is_consistent() {
        let client = sample_client();
        assert_eq!(client.document_types.len(), 4);
        assert!(client.templates_consistent());
        assert_eq!(client.templates.len(), 4);
    }
}
