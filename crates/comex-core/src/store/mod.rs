//! In-memory client/order store.
//!
//! Every operation validates its inputs before touching the collection, so a
//! failed call leaves the store unchanged.

mod persist;

pub use persist::{
    ExportDocument, FileStorage, MemoryStorage, Persistence, StorageBackend, EXPORT_VERSION,
};

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::assembly::AssembledDocument;
use crate::error::StoreError;
use crate::models::client::{Client, NewClient, Order, OrderStatus, UploadedFile};
use crate::models::config::OrderConfig;
use crate::models::extracted::ExtractedData;
use crate::models::template::{DocumentTemplate, DocumentType};
use crate::processor::ProcessingResult;
use crate::registry;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Summary of what the store holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageStats {
    pub total_clients: usize,
    pub total_orders: usize,
    pub total_generated_docs: usize,
    /// Serialized size of the clients document, "x.xx KB".
    pub storage_used: String,
}

/// Owns every client and, through them, every order.
#[derive(Debug, Clone, Default)]
pub struct ClientStore {
    clients: Vec<Client>,
    numbering: OrderConfig,
}

impl ClientStore {
    pub fn new(numbering: OrderConfig) -> Self {
        Self {
            clients: Vec::new(),
            numbering,
        }
    }

    /// Replace the held clients, e.g. after loading them from storage.
    pub fn with_clients(mut self, clients: Vec<Client>) -> Self {
        self.clients = clients;
        self
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn get_client(&self, client_id: &str) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == client_id)
    }

    pub fn get_order(&self, client_id: &str, order_id: &str) -> Option<&Order> {
        self.get_client(client_id)?.order(order_id)
    }

    fn client_mut(&mut self, client_id: &str) -> Result<&mut Client> {
        self.clients
            .iter_mut()
            .find(|c| c.id == client_id)
            .ok_or_else(|| StoreError::ClientNotFound(client_id.to_string()))
    }

    /// Create a client with default templates for each selected document type.
    pub fn create_client(&mut self, fields: NewClient) -> Result<Client> {
        self.create_client_at(fields, Utc::now())
    }

    pub fn create_client_at(&mut self, fields: NewClient, now: DateTime<Utc>) -> Result<Client> {
        validate_contact(&fields)?;

        let document_types = dedup_types(&fields.document_types);
        let templates = document_types
            .iter()
            .map(|&kind| (kind, registry::default_template(kind).stamped(now)))
            .collect();

        let client = Client {
            id: uuid::Uuid::new_v4().to_string(),
            name: fields.name.trim().to_string(),
            email: fields.email.trim().to_string(),
            address: fields.address,
            phone: fields.phone,
            country: fields.country,
            document_types,
            templates,
            orders: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        info!("Created client {} ({})", client.name, client.id);
        self.clients.push(client.clone());
        Ok(client)
    }

    /// Replace a client's contact fields and document type selection.
    pub fn update_client(&mut self, client_id: &str, fields: NewClient) -> Result<Client> {
        validate_contact(&fields)?;
        let now = Utc::now();

        let client = self.client_mut(client_id)?;
        client.name = fields.name.trim().to_string();
        client.email = fields.email.trim().to_string();
        client.address = fields.address;
        client.phone = fields.phone;
        client.country = fields.country;
        select_types(client, &fields.document_types, now);
        client.updated_at = now;

        Ok(client.clone())
    }

    /// Change which documents a client gets.
    ///
    /// Newly selected types receive a default template; templates of
    /// deselected types are dropped.
    pub fn set_document_types(
        &mut self,
        client_id: &str,
        types: &[DocumentType],
    ) -> Result<Client> {
        let now = Utc::now();
        let client = self.client_mut(client_id)?;
        select_types(client, types, now);
        client.updated_at = now;
        Ok(client.clone())
    }

    /// Store a customized template for one of the client's selected types.
    pub fn set_template(&mut self, client_id: &str, template: DocumentTemplate) -> Result<()> {
        let now = Utc::now();
        let client = self.client_mut(client_id)?;
        if !client.document_types.contains(&template.kind) {
            return Err(StoreError::DocumentTypeNotSelected(template.kind));
        }

        let mut template = template;
        template.updated_at = Some(now);
        if template.created_at.is_none() {
            template.created_at = Some(now);
        }
        client.templates.insert(template.kind, template);
        client.updated_at = now;
        Ok(())
    }

    pub fn delete_client(&mut self, client_id: &str) -> Result<Client> {
        let index = self
            .clients
            .iter()
            .position(|c| c.id == client_id)
            .ok_or_else(|| StoreError::ClientNotFound(client_id.to_string()))?;
        let client = self.clients.remove(index);
        info!("Deleted client {} with {} orders", client.name, client.orders.len());
        Ok(client)
    }

    /// Open a new order for a client.
    pub fn create_order(&mut self, client_id: &str) -> Result<Order> {
        self.create_order_at(client_id, Utc::now())
    }

    /// Open a new order numbered for the year of `now`.
    ///
    /// The sequence is the client's order count plus one, so numbers are
    /// unique per client only.
    pub fn create_order_at(&mut self, client_id: &str, now: DateTime<Utc>) -> Result<Order> {
        let prefix = self.numbering.prefix.clone();
        let width = self.numbering.sequence_width;
        let client = self.client_mut(client_id)?;

        let number = format!(
            "{}-{}-{:0width$}",
            prefix,
            now.year(),
            client.orders.len() + 1,
            width = width
        );
        let order = Order {
            id: uuid::Uuid::new_v4().to_string(),
            number,
            client_id: client.id.clone(),
            date: now.date_naive(),
            status: OrderStatus::New,
            uploaded_files: Vec::new(),
            generated_docs: Vec::new(),
            extracted_data: ExtractedData::new(),
            created_at: now,
            updated_at: now,
        };

        debug!("Created order {} for client {}", order.number, client.id);
        client.orders.push(order.clone());
        client.updated_at = now;
        Ok(order)
    }

    /// Replace an order by identifier.
    pub fn update_order(&mut self, client_id: &str, order: Order) -> Result<()> {
        let client = self.client_mut(client_id)?;
        let slot = client
            .orders
            .iter_mut()
            .find(|o| o.id == order.id)
            .ok_or_else(|| StoreError::OrderNotFound {
                client_id: client_id.to_string(),
                order_id: order.id.clone(),
            })?;
        *slot = order;
        Ok(())
    }

    /// Record a processing run on an order.
    ///
    /// A successful run replaces the order's files (stored without content),
    /// data and generated documents with those of the run, and moves a new
    /// order to in progress. A failed run leaves the order untouched.
    pub fn apply_processing(
        &mut self,
        client_id: &str,
        order_id: &str,
        files: &[UploadedFile],
        result: &ProcessingResult,
        documents: &[AssembledDocument],
    ) -> Result<Order> {
        let now = Utc::now();
        let client = self.client_mut(client_id)?;
        let order = client
            .orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or_else(|| StoreError::OrderNotFound {
                client_id: client_id.to_string(),
                order_id: order_id.to_string(),
            })?;

        if !result.success {
            debug!("Not applying failed run to order {}", order.number);
            return Ok(order.clone());
        }

        order.uploaded_files = files.iter().map(UploadedFile::without_content).collect();
        order.extracted_data = result.extracted_data.clone();
        let generated = documents
            .iter()
            .map(|d| d.to_generated(order, now))
            .collect();
        order.generated_docs = generated;
        if order.status == OrderStatus::New {
            order.status = OrderStatus::InProgress;
        }
        order.updated_at = now;

        info!(
            "Order {} now has {} documents",
            order.number,
            order.generated_docs.len()
        );
        Ok(order.clone())
    }

    pub fn stats(&self) -> StorageStats {
        let bytes = serde_json::to_vec(&self.clients)
            .map(|v| v.len())
            .unwrap_or_default();

        StorageStats {
            total_clients: self.clients.len(),
            total_orders: self.clients.iter().map(|c| c.orders.len()).sum(),
            total_generated_docs: self
                .clients
                .iter()
                .flat_map(|c| &c.orders)
                .map(|o| o.generated_docs.len())
                .sum(),
            storage_used: format!("{:.2} KB", bytes as f64 / 1024.0),
        }
    }

    /// Drop every client.
    pub fn clear(&mut self) {
        self.clients.clear();
    }
}

fn validate_contact(fields: &NewClient) -> Result<()> {
    if fields.name.trim().is_empty() {
        return Err(StoreError::MissingField("name"));
    }
    if fields.email.trim().is_empty() {
        return Err(StoreError::MissingField("email"));
    }
    Ok(())
}

fn dedup_types(types: &[DocumentType]) -> Vec<DocumentType> {
    let mut seen = Vec::with_capacity(types.len());
    for &kind in types {
        if !seen.contains(&kind) {
            seen.push(kind);
        }
    }
    seen
}

fn select_types(client: &mut Client, types: &[DocumentType], now: DateTime<Utc>) {
    let types = dedup_types(types);
    client.templates.retain(|kind, _| types.contains(kind));
    for &kind in &types {
        client
            .templates
            .entry(kind)
            .or_insert_with(|| registry::default_template(kind).stamped(now));
    }
    client.document_types = types;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::DocumentAssembler;
    use crate::sample;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn new_client(name: &str, types: &[DocumentType]) -> NewClient {
        NewClient {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            document_types: types.to_vec(),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_client_templates_match_selection() {
        let mut store = ClientStore::default();
        let selections: [&[DocumentType]; 3] = [
            &[DocumentType::Invoice],
            &[DocumentType::Quality, DocumentType::PackingList],
            &DocumentType::ALL,
        ];

        for types in selections {
            let client = store.create_client(new_client("Acme", types)).unwrap();
            let keys: Vec<DocumentType> = client.templates.keys().copied().collect();
            let mut expected = types.to_vec();
            expected.sort();
            assert_eq!(keys, expected);
            assert_eq!(client.document_types, types.to_vec());
        }
    }

    #[test]
    fn test_create_client_requires_name_and_email() {
        let mut store = ClientStore::default();

        let err = store
            .create_client(NewClient {
                email: "a@b.c".to_string(),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err, StoreError::MissingField("name"));

        let err = store
            .create_client(NewClient {
                name: "Acme".to_string(),
                email: "   ".to_string(),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err, StoreError::MissingField("email"));

        assert!(store.clients().is_empty());
    }

    #[test]
    fn test_order_numbers_are_sequential_per_client() {
        let mut store = ClientStore::default();
        let a = store.create_client(new_client("A", &[])).unwrap();
        let b = store.create_client(new_client("B", &[])).unwrap();
        let now = Utc.with_ymd_and_hms(2025, 8, 28, 12, 0, 0).unwrap();

        let mut numbers = Vec::new();
        for i in 0..5 {
            numbers.push(store.create_order_at(&a.id, now).unwrap().number);
            if i % 2 == 0 {
                store.create_order_at(&b.id, now).unwrap();
            }
        }

        assert_eq!(
            numbers,
            vec![
                "ORD-2025-001",
                "ORD-2025-002",
                "ORD-2025-003",
                "ORD-2025-004",
                "ORD-2025-005",
            ]
        );
    }

    #[test]
    fn test_order_numbers_collide_across_clients() {
        let mut store = ClientStore::default();
        let a = store.create_client(new_client("A", &[])).unwrap();
        let b = store.create_client(new_client("B", &[])).unwrap();

        let first = store.create_order(&a.id).unwrap();
        let second = store.create_order(&b.id).unwrap();

        assert_eq!(first.number, second.number);
        assert_ne!(first.id, second.id);
        assert_eq!(second.client_id, b.id);
    }

    #[test]
    fn test_custom_numbering() {
        let mut store = ClientStore::new(OrderConfig {
            prefix: "EXP".to_string(),
            sequence_width: 5,
        });
        let a = store.create_client(new_client("A", &[])).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        assert_eq!(store.create_order_at(&a.id, now).unwrap().number, "EXP-2024-00001");
    }

    #[test]
    fn test_unknown_identifiers() {
        let mut store = ClientStore::default();
        assert_eq!(
            store.create_order("missing").unwrap_err(),
            StoreError::ClientNotFound("missing".to_string())
        );
        assert_eq!(
            store.delete_client("missing").unwrap_err(),
            StoreError::ClientNotFound("missing".to_string())
        );

        let a = store.create_client(new_client("A", &[])).unwrap();
        let mut order = store.create_order(&a.id).unwrap();
        order.id = "other".to_string();
        assert_eq!(
            store.update_order(&a.id, order).unwrap_err(),
            StoreError::OrderNotFound {
                client_id: a.id.clone(),
                order_id: "other".to_string(),
            }
        );
    }

    #[test]
    fn test_update_order_replaces_by_id() {
        let mut store = ClientStore::default();
        let a = store.create_client(new_client("A", &[])).unwrap();
        let mut order = store.create_order(&a.id).unwrap();
        order.status = OrderStatus::Completed;

        store.update_order(&a.id, order.clone()).unwrap();
        assert_eq!(store.get_order(&a.id, &order.id), Some(&order));
    }

    #[test]
    fn test_delete_client_removes_orders() {
        let mut store = ClientStore::default();
        let a = store.create_client(new_client("A", &[])).unwrap();
        store.create_order(&a.id).unwrap();

        let removed = store.delete_client(&a.id).unwrap();
        assert_eq!(removed.orders.len(), 1);
        assert!(store.get_client(&a.id).is_none());
        assert_eq!(store.stats().total_orders, 0);
    }

    #[test]
    fn test_set_document_types_keeps_invariant() {
        let mut store = ClientStore::default();
        let a = store
            .create_client(new_client("A", &[DocumentType::Invoice, DocumentType::Quality]))
            .unwrap();

        let mut custom = a.templates[&DocumentType::Invoice].clone();
        custom.name = "Custom invoice".to_string();
        store.set_template(&a.id, custom).unwrap();

        let updated = store
            .set_document_types(&a.id, &[DocumentType::Invoice, DocumentType::PriceList])
            .unwrap();
        assert!(updated.templates_consistent());
        assert_eq!(updated.templates.len(), 2);
        assert_eq!(updated.templates[&DocumentType::Invoice].name, "Custom invoice");
        assert!(updated.templates.contains_key(&DocumentType::PriceList));
    }

    #[test]
    fn test_set_template_requires_selection() {
        let mut store = ClientStore::default();
        let a = store.create_client(new_client("A", &[DocumentType::Invoice])).unwrap();

        let err = store
            .set_template(&a.id, registry::default_template(DocumentType::Quality))
            .unwrap_err();
        assert_eq!(err, StoreError::DocumentTypeNotSelected(DocumentType::Quality));
        assert!(store.get_client(&a.id).unwrap().templates_consistent());
    }

    #[test]
    fn test_update_client_validates_first() {
        let mut store = ClientStore::default();
        let a = store.create_client(new_client("A", &[DocumentType::Invoice])).unwrap();

        let err = store.update_client(&a.id, NewClient::default()).unwrap_err();
        assert_eq!(err, StoreError::MissingField("name"));
        assert_eq!(store.get_client(&a.id).unwrap().name, "A");

        let updated = store
            .update_client(&a.id, new_client("Renamed", &[DocumentType::Quality]))
            .unwrap();
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.document_types, vec![DocumentType::Quality]);
        assert!(updated.templates_consistent());
    }

    #[test]
    fn test_apply_processing() {
        let mut store = ClientStore::default().with_clients(vec![sample::sample_client()]);
        let order = store.create_order("1").unwrap();

        let files = vec![UploadedFile::new("invoice.pdf", "application/pdf", 10)
            .with_content("Invoice Nr.: 12345")];
        let result = ProcessingResult {
            success: true,
            extracted_data: sample::sample_extracted_data(),
            confidence: 100.0,
            errors: Vec::new(),
            processing_time_ms: 3,
        };
        let client = store.get_client("1").unwrap().clone();
        let docs = DocumentAssembler::default().assemble(&client, &result.extracted_data, 100.0);

        let updated = store
            .apply_processing("1", &order.id, &files, &result, &docs)
            .unwrap();

        assert_eq!(updated.status, OrderStatus::InProgress);
        assert_eq!(updated.uploaded_files.len(), 1);
        assert_eq!(updated.uploaded_files[0].content, None);
        assert_eq!(updated.extracted_data, result.extracted_data);
        assert_eq!(updated.generated_docs.len(), 4);
        assert!(updated.updated_at >= order.updated_at);

        let stats = store.stats();
        assert_eq!(stats.total_clients, 1);
        assert_eq!(stats.total_orders, 1);
        assert_eq!(stats.total_generated_docs, 4);
        assert!(stats.storage_used.ends_with(" KB"));
    }

    #[test]
    fn test_reprocessing_replaces_previous_run() {
        let mut store = ClientStore::default().with_clients(vec![sample::sample_client()]);
        let order = store.create_order("1").unwrap();
        let client = store.get_client("1").unwrap().clone();
        let assembler = DocumentAssembler::default();

        let mut run = |name: &str, invoice: &str| {
            let files = vec![UploadedFile::new(name, "application/pdf", 10)];
            let result = ProcessingResult {
                success: true,
                extracted_data: ExtractedData {
                    invoice_number: Some(invoice.to_string()),
                    ..Default::default()
                },
                confidence: 25.0,
                errors: Vec::new(),
                processing_time_ms: 1,
            };
            let docs = assembler.assemble(&client, &result.extracted_data, result.confidence);
            store
                .apply_processing("1", &order.id, &files, &result, &docs)
                .unwrap()
        };

        let first = run("a.pdf", "111");
        let second = run("b.pdf", "222");

        let names: Vec<&str> = second.uploaded_files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b.pdf"]);
        assert_eq!(second.extracted_data.invoice_number.as_deref(), Some("222"));
        assert_eq!(second.generated_docs.len(), 4);
        assert!(second
            .generated_docs
            .iter()
            .all(|d| !first.generated_docs.iter().any(|p| p.id == d.id)));
        assert_eq!(second.status, OrderStatus::InProgress);
    }

    #[test]
    fn test_failed_processing_leaves_order() {
        let mut store = ClientStore::default().with_clients(vec![sample::sample_client()]);
        let order = store.create_order("1").unwrap();
        let result = ProcessingResult {
            success: false,
            extracted_data: ExtractedData::new(),
            confidence: 0.0,
            errors: vec!["unsupported file format: zip".to_string()],
            processing_time_ms: 0,
        };

        let after = store
            .apply_processing("1", &order.id, &[], &result, &[])
            .unwrap();
        assert_eq!(after, order);
    }

    #[test]
    fn test_clear() {
        let mut store = ClientStore::default().with_clients(vec![sample::sample_client()]);
        store.clear();
        assert_eq!(
            store.stats(),
            StorageStats {
                total_clients: 0,
                total_orders: 0,
                total_generated_docs: 0,
                storage_used: "0.00 KB".to_string(),
            }
        );
    }
}
