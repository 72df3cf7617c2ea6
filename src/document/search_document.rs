use base64::{Engine, engine::general_purpose::STANDARD};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DecodeError;

/// One hit in a search result. `document` is base64-encoded JSON whose shape is up to the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchDocument {
    #[serde(default)]
    pub document: String,
    #[serde(default)]
    pub document_id: Uuid,
    #[serde(default)]
    pub owner_id: Uuid,
}

impl SearchDocument {
    pub fn decode_document<T: DeserializeOwned>(&self) -> Result<T, DecodeError> {
        decode_document(&self.document)
    }
}

/// Decodes a raw document (standard padded base64 around JSON) into `T`.
pub fn decode_document<T: DeserializeOwned>(raw_document: &str) -> Result<T, DecodeError> {
    let bytes = STANDARD.decode(raw_document)?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchDocumentResultInfo {
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub current_page: u32,
    #[serde(default, rename = "num_page")]
    pub num_pages: u32,
    #[serde(default)]
    pub total_result_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchDocumentResult {
    #[serde(default)]
    pub info: SearchDocumentResultInfo,
    #[serde(default)]
    pub documents: Vec<SearchDocument>,
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub transaction_id: Uuid,
}

impl SearchDocumentResult {
    /// Decodes every document independently; one bad payload does not affect the others.
    pub fn decode_documents<T: DeserializeOwned>(&self) -> Vec<Result<T, DecodeError>> {
        self.documents.iter().map(SearchDocument::decode_document).collect()
    }
}
