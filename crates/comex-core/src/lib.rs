//! Core library for trade document generation.
//!
//! This crate provides:
//! - Client/order data model with per-client document templates
//! - Static registry of document types (invoice, packing list, price list,
//!   quality certificate) and their default templates
//! - Pattern-based field extraction from uploaded file text
//! - Completeness scoring and document assembly
//! - Persistence and JSON export/import of the client list

pub mod assembly;
pub mod confidence;
pub mod error;
pub mod extraction;
pub mod models;
pub mod processor;
pub mod registry;
pub mod sample;
pub mod store;
pub mod upload;

pub use assembly::{download_listing, AssembledDocument, DocumentAssembler};
pub use error::{ComexError, ExtractionError, RegistryError, Result, StoreError};
pub use extraction::{FieldExtractor, PatternExtractor, ShippingLayoutExtractor, TextExtractor};
pub use models::config::ComexConfig;
pub use models::{
    Client, DocumentTemplate, DocumentType, ExtractedData, GeneratedDocument, NewClient, Order,
    OrderStatus, ProductInfo, UploadedFile, View,
};
pub use processor::{DocumentProcessor, ProcessingResult};
pub use registry::DocumentConfig;
pub use store::{ClientStore, FileStorage, MemoryStorage, Persistence, StorageBackend, StorageStats};
