use reqwest::Method;
use std::sync::Arc;
use tracing::info;

use super::search_document::SearchDocumentResult;
use crate::client::{call, Transport, VaultClient};
use crate::error::ClientError;
use crate::search::SearchFilter;

#[derive(Debug, Clone)]
pub struct DocumentService<T: Transport = VaultClient> {
    client: Arc<T>,
}

impl<T: Transport> DocumentService<T> {
    pub fn new(client: Arc<T>) -> Self {
        Self { client }
    }

    /// Runs a document search in `vault_id`.
    ///
    /// The filter is encoded before anything is sent, so an unencodable filter never reaches
    /// the network.
    pub async fn search_documents(
        &self,
        vault_id: &str,
        filter: &SearchFilter,
    ) -> Result<SearchDocumentResult, ClientError> {
        let body = filter.encode()?;
        let url = self.client.url_builder().search_document_url(vault_id);
        let result: SearchDocumentResult = call(self.client.as_ref(), Method::POST, url, Some(body)).await?;
        info!(
            "Search in vault {} returned {} of {} documents",
            vault_id,
            result.documents.len(),
            result.info.total_result_count
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{FilterType, SearchCondition};
    use crate::url_builder::DefaultUrlBuilder;
    use mockito::Matcher;
    use serde_json::json;

    fn service_for(server: &mockito::Server) -> DocumentService {
        let client = VaultClient::new(
            Arc::new(reqwest::Client::new()),
            Arc::new(DefaultUrlBuilder::new(&server.url())),
            "key",
        );
        DocumentService::new(Arc::new(client))
    }

    #[tokio::test]
    async fn test_search_documents() {
        let mut server = mockito::Server::new_async().await;
        let response_json = json!({
            "result": "success",
            "transaction_id": "0b1c2d3e-4f50-4617-8293-a4b5c6d7e8f9",
            "documents": [{
                "document": "eyJYIjoxMjM0fQ==",
                "document_id": "11111111-2222-4333-8444-555555555555",
                "owner_id": "11111111-2222-4333-8444-666666666666"
            }],
            "info": {"per_page": 10, "current_page": 1, "num_page": 1, "total_result_count": 1}
        });
        let m = server
            .mock("POST", "/v1/vaults/vault-1/search")
            .match_body(Matcher::Json(json!({
                "filter": {"name": {"type": "eq", "value": "Ada"}},
                "filter_type": "and",
                "per_page": 10
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(response_json.to_string())
            .create_async()
            .await;

        let filter = SearchFilter::new()
            .condition("name", SearchCondition::equals("Ada"))
            .filter_type(FilterType::And)
            .per_page(10);
        let result = service_for(&server).search_documents("vault-1", &filter).await.unwrap();

        m.assert_async().await;
        assert_eq!(result.result, "success");
        assert_eq!(result.documents.len(), 1);
        let decoded: serde_json::Value = result.documents[0].decode_document().unwrap();
        assert_eq!(decoded["X"], 1234);
    }

    #[tokio::test]
    async fn test_search_documents_status_errors() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/v1/vaults/locked/search")
            .with_status(401)
            .create_async()
            .await;

        let result = service_for(&server).search_documents("locked", &SearchFilter::new()).await;
        assert!(matches!(result, Err(ClientError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_unencodable_filter_is_not_sent() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let filter = SearchFilter::new().condition("score", SearchCondition::equals(f64::INFINITY));
        let result = service_for(&server).search_documents("vault-1", &filter).await;

        assert!(matches!(result, Err(ClientError::Encoding(_))));
        m.assert_async().await;
    }
}
