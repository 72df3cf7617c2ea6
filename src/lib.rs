//! Typed client for a document-vault REST API.
//!
//! The [`search`] module builds search filters and encodes them into the request body the
//! search endpoint expects; [`document`] runs searches and decodes the base64 JSON documents
//! that come back; [`user`] covers user management and credential vending.

pub mod client;
pub mod config;
pub mod document;
pub mod error;
pub mod logging;
pub mod search;
pub mod url_builder;
pub mod user;

pub use client::{Transport, VaultClient};
pub use document::{DocumentService, SearchDocument, SearchDocumentResult};
pub use error::{ClientError, DecodeError, EncodingError};
pub use search::{FilterType, RangeValue, SearchCondition, SearchFilter, SearchValue, SortOrder};
pub use url_builder::{DefaultUrlBuilder, UrlBuilder};
pub use user::UserService;
