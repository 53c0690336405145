//! Data models for clients, orders, templates and extracted data.

pub mod client;
pub mod config;
pub mod extracted;
pub mod template;
pub mod view;

pub use client::{Client, GeneratedDocument, NewClient, Order, OrderStatus, UploadedFile};
pub use extracted::{ExtractedData, FieldState, ProductInfo, ValidationReport};
pub use template::{DocumentTemplate, DocumentType, SectionKind, TemplateSection};
pub use view::View;
