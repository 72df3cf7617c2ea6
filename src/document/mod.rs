pub mod document_service;
pub mod search_document;

pub use document_service::DocumentService;
pub use search_document::{decode_document, SearchDocument, SearchDocumentResult, SearchDocumentResultInfo};
