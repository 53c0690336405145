//! WASM bindings for the trade document generator.
//!
//! This crate provides WebAssembly bindings for use in browsers. Client data
//! is kept in `localStorage` under the same key as the web application.

mod storage;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use comex_core::assembly::DocumentAssembler;
use comex_core::models::config::ExtractionProfile;
use comex_core::{
    confidence, registry, sample, ClientStore, ComexConfig, DocumentProcessor, DocumentTemplate,
    DocumentType, ExtractedData, FieldExtractor, NewClient, Order, Persistence,
    ProcessingResult, UploadedFile, View,
};

pub use storage::LocalStorage;

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Serialize to plain JS objects (maps as objects, integers as numbers).
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn from_js<T: DeserializeOwned>(value: JsValue) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// A file as handed over by a browser file input after reading its text.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileInput {
    name: String,
    #[serde(default, rename = "type")]
    mime_type: Option<String>,
    #[serde(default)]
    size: Option<u64>,
    #[serde(default)]
    content: Option<String>,
}

impl FileInput {
    fn into_upload(self) -> UploadedFile {
        let mime = self
            .mime_type
            .unwrap_or_else(|| comex_core::upload::mime_type_for(&self.name).to_string());
        let size = self
            .size
            .unwrap_or_else(|| self.content.as_ref().map_or(0, |c| c.len() as u64));
        let file = UploadedFile::new(self.name, mime, size);
        match self.content {
            Some(content) => file.with_content(content),
            None => file,
        }
    }
}

fn uploads(files: JsValue) -> Result<Vec<UploadedFile>, JsValue> {
    let inputs: Vec<FileInput> = from_js(files)?;
    Ok(inputs.into_iter().map(FileInput::into_upload).collect())
}

/// Extract fields from document text.
///
/// `profile` is `"generic"` (default) or `"shipping"`.
#[wasm_bindgen]
pub fn extract_from_text(text: &str, profile: Option<String>) -> Result<JsValue, JsValue> {
    let profile = match profile.as_deref() {
        None | Some("generic") => ExtractionProfile::Generic,
        Some("shipping") => ExtractionProfile::Shipping,
        Some(other) => return Err(JsValue::from_str(&format!("unknown profile: {}", other))),
    };
    let data = FieldExtractor::new().with_profile(profile).extract(text);
    to_js(&data)
}

/// Completeness score (0-100) of an extracted-data record.
#[wasm_bindgen]
pub fn score(data: JsValue) -> Result<f64, JsValue> {
    let data: ExtractedData = from_js(data)?;
    Ok(confidence::score(&data))
}

/// Validation report (`{isValid, errors}`) of an extracted-data record.
#[wasm_bindgen]
pub fn validate(data: JsValue) -> Result<JsValue, JsValue> {
    let data: ExtractedData = from_js(data)?;
    to_js(&data.validate())
}

/// Registry entries for every document type.
#[wasm_bindgen]
pub fn document_types() -> Result<JsValue, JsValue> {
    let configs: Vec<_> = registry::list_types()
        .into_iter()
        .map(registry::get_config)
        .collect();
    to_js(&configs)
}

/// Demo extraction result.
#[wasm_bindgen]
pub fn sample_data() -> Result<JsValue, JsValue> {
    to_js(&sample::sample_extracted_data())
}

/// Run extraction and scoring over `[{name, type, size, content}]`.
///
/// Resolves to a processing result; apply it to an order with
/// [`ComexApp::apply_processing`].
#[wasm_bindgen]
pub async fn process_documents(files: JsValue, config: JsValue) -> Result<JsValue, JsValue> {
    let config: ComexConfig = if config.is_undefined() || config.is_null() {
        ComexConfig::default()
    } else {
        from_js(config)?
    };
    let files = uploads(files)?;
    let result = DocumentProcessor::new(&config.extraction)
        .process_documents(&files)
        .await;
    to_js(&result)
}

/// Application state: clients in `localStorage` plus the current view.
#[wasm_bindgen]
pub struct ComexApp {
    config: ComexConfig,
    store: ClientStore,
    persistence: Persistence<LocalStorage>,
    view: View,
}

impl ComexApp {
    fn with_config(config: ComexConfig) -> Result<ComexApp, JsValue> {
        let persistence = Persistence::new(LocalStorage::open().map_err(js_err)?, &config.storage);
        let clients = persistence.load().map_err(js_err)?;
        let store = ClientStore::new(config.orders.clone()).with_clients(clients);
        Ok(Self {
            config,
            store,
            persistence,
            view: View::default(),
        })
    }

    fn save(&mut self) -> Result<(), JsValue> {
        self.persistence.save(&self.store).map_err(js_err)
    }
}

#[wasm_bindgen]
impl ComexApp {
    /// Open the app with stored clients and default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<ComexApp, JsValue> {
        Self::with_config(ComexConfig::default())
    }

    /// Open the app with a configuration object.
    pub fn configured(config: JsValue) -> Result<ComexApp, JsValue> {
        Self::with_config(from_js(config)?)
    }

    // Clients

    pub fn clients(&self) -> Result<JsValue, JsValue> {
        to_js(self.store.clients())
    }

    pub fn client(&self, client_id: &str) -> Result<JsValue, JsValue> {
        match self.store.get_client(client_id) {
            Some(client) => to_js(client),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// Create a client from `{name, email, address, phone, country, documentTypes}`.
    pub fn create_client(&mut self, fields: JsValue) -> Result<JsValue, JsValue> {
        let fields: NewClient = from_js(fields)?;
        let client = self.store.create_client(fields).map_err(js_err)?;
        self.save()?;
        to_js(&client)
    }

    pub fn update_client(&mut self, client_id: &str, fields: JsValue) -> Result<JsValue, JsValue> {
        let fields: NewClient = from_js(fields)?;
        let client = self.store.update_client(client_id, fields).map_err(js_err)?;
        self.save()?;
        to_js(&client)
    }

    pub fn set_document_types(&mut self, client_id: &str, types: JsValue) -> Result<JsValue, JsValue> {
        let types: Vec<DocumentType> = from_js(types)?;
        let client = self.store.set_document_types(client_id, &types).map_err(js_err)?;
        self.save()?;
        to_js(&client)
    }

    pub fn set_template(&mut self, client_id: &str, template: JsValue) -> Result<(), JsValue> {
        let template: DocumentTemplate = from_js(template)?;
        self.store.set_template(client_id, template).map_err(js_err)?;
        self.save()
    }

    pub fn delete_client(&mut self, client_id: &str) -> Result<(), JsValue> {
        self.store.delete_client(client_id).map_err(js_err)?;
        if self.view.client_id() == Some(client_id) {
            self.view = View::Clients;
        }
        self.save()
    }

    // Orders

    pub fn create_order(&mut self, client_id: &str) -> Result<JsValue, JsValue> {
        let order = self.store.create_order(client_id).map_err(js_err)?;
        self.save()?;
        to_js(&order)
    }

    pub fn update_order(&mut self, client_id: &str, order: JsValue) -> Result<(), JsValue> {
        let order: Order = from_js(order)?;
        self.store.update_order(client_id, order).map_err(js_err)?;
        self.save()
    }

    /// Assemble the client's documents from a processing result and record
    /// them, with the files, on the order.
    ///
    /// Returns `{order, documents, downloads}`.
    pub fn apply_processing(
        &mut self,
        client_id: &str,
        order_id: &str,
        files: JsValue,
        result: JsValue,
    ) -> Result<JsValue, JsValue> {
        let files = uploads(files)?;
        let result: ProcessingResult = from_js(result)?;
        let client = self
            .store
            .get_client(client_id)
            .ok_or_else(|| JsValue::from_str(&format!("client not found: {}", client_id)))?;

        let documents = DocumentAssembler::new(self.config.assembly.clone()).assemble(
            client,
            &result.extracted_data,
            result.confidence,
        );
        let order = self
            .store
            .apply_processing(client_id, order_id, &files, &result, &documents)
            .map_err(js_err)?;
        self.save()?;

        #[derive(Serialize)]
        struct Applied<'a> {
            order: &'a Order,
            documents: &'a [comex_core::AssembledDocument],
            downloads: Vec<String>,
        }

        to_js(&Applied {
            order: &order,
            documents: &documents,
            downloads: comex_core::download_listing(&documents, &order),
        })
    }

    /// File names the order's generated documents download as.
    pub fn download_names(&self, client_id: &str, order_id: &str) -> Result<js_sys::Array, JsValue> {
        let order = self.store.get_order(client_id, order_id).ok_or_else(|| {
            JsValue::from_str(&format!("order {} not found for client {}", order_id, client_id))
        })?;
        Ok(order
            .generated_docs
            .iter()
            .map(|doc| JsValue::from_str(&doc.name))
            .collect())
    }

    // Data management

    pub fn stats(&self) -> Result<JsValue, JsValue> {
        to_js(&self.store.stats())
    }

    pub fn export_data(&self) -> Result<String, JsValue> {
        self.store.export_data().map_err(js_err)
    }

    /// Replace all clients with an export document. Returns the client count.
    pub fn import_data(&mut self, json: &str) -> Result<usize, JsValue> {
        let count = self.store.import_data(json).map_err(js_err)?;
        self.save()?;
        Ok(count)
    }

    pub fn clear_all_data(&mut self) -> Result<(), JsValue> {
        self.persistence.clear().map_err(js_err)?;
        self.store.clear();
        self.view = View::Dashboard;
        Ok(())
    }

    // Navigation

    pub fn view(&self) -> Result<JsValue, JsValue> {
        to_js(&self.view)
    }

    /// Switch to a view such as `{view: "clientDetail", clientId}`.
    ///
    /// Views scoped to a client require the client to exist.
    pub fn navigate(&mut self, view: JsValue) -> Result<(), JsValue> {
        let view: View = from_js(view)?;
        if let Some(client_id) = view.client_id() {
            if self.store.get_client(client_id).is_none() {
                return Err(JsValue::from_str(&format!("client not found: {}", client_id)));
            }
        }
        self.view = view;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_input_defaults() {
        let input = FileInput {
            name: "Invoice.PDF".to_string(),
            mime_type: None,
            size: None,
            content: Some("Invoice Nr.: 12345".to_string()),
        };
        let file = input.into_upload();
        assert_eq!(file.mime_type, "application/pdf");
        assert_eq!(file.size, 18);
        assert_eq!(file.content.as_deref(), Some("Invoice Nr.: 12345"));
    }

    #[test]
    fn test_file_input_keeps_declared_values() {
        let input = FileInput {
            name: "prices.xlsx".to_string(),
            mime_type: Some("application/octet-stream".to_string()),
            size: Some(4096),
            content: None,
        };
        let file = input.into_upload();
        assert_eq!(file.mime_type, "application/octet-stream");
        assert_eq!(file.size, 4096);
        assert_eq!(file.content, None);
    }
}
