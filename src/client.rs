use base64::{Engine, engine::general_purpose::STANDARD};
use bytes::Bytes;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::error::ClientError;
use crate::url_builder::{DefaultUrlBuilder, UrlBuilder};

pub const CONTENT_TYPE_APPLICATION_JSON: &str = "application/json";

/// Sends one request and hands back the raw response body.
///
/// Services are written against this trait rather than against `VaultClient` directly.
pub trait Transport: Send + Sync {
    fn url_builder(&self) -> &dyn UrlBuilder;

    fn execute(
        &self,
        method: Method,
        url: String,
        content_type: &'static str,
        body: Option<Vec<u8>>,
    ) -> impl Future<Output = Result<Bytes, ClientError>> + Send;
}

pub fn decode_envelope<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ClientError> {
    serde_json::from_slice(bytes).map_err(ClientError::InvalidResponse)
}

pub(crate) async fn call<T, R>(
    transport: &T,
    method: Method,
    url: String,
    body: Option<Vec<u8>>,
) -> Result<R, ClientError>
where
    T: Transport,
    R: DeserializeOwned,
{
    let bytes = transport
        .execute(method, url, CONTENT_TYPE_APPLICATION_JSON, body)
        .await?;
    decode_envelope(&bytes)
}

#[derive(Clone)]
pub struct VaultClient {
    http_client: Arc<reqwest::Client>,
    url_builder: Arc<dyn UrlBuilder>,
    authorization: String,
}

impl VaultClient {
    pub fn new(
        http_client: Arc<reqwest::Client>,
        url_builder: Arc<dyn UrlBuilder>,
        access_token_or_key: &str,
    ) -> Self {
        Self {
            http_client,
            url_builder,
            authorization: build_authorization_value(access_token_or_key),
        }
    }

    pub fn with_default_urls(http_client: Arc<reqwest::Client>, access_token_or_key: &str) -> Self {
        Self::new(http_client, Arc::new(DefaultUrlBuilder::default()), access_token_or_key)
    }

    /// Same HTTP client and endpoints, different credential.
    pub fn with_new_access_token_or_key(&self, access_token_or_key: &str) -> Self {
        Self {
            http_client: self.http_client.clone(),
            url_builder: self.url_builder.clone(),
            authorization: build_authorization_value(access_token_or_key),
        }
    }
}

// The key is sent as the basic-auth username with an empty password.
fn build_authorization_value(key: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:", key)))
}

impl fmt::Debug for VaultClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaultClient").finish_non_exhaustive()
    }
}

impl Transport for VaultClient {
    fn url_builder(&self) -> &dyn UrlBuilder {
        self.url_builder.as_ref()
    }

    async fn execute(
        &self,
        method: Method,
        url: String,
        content_type: &'static str,
        body: Option<Vec<u8>>,
    ) -> Result<Bytes, ClientError> {
        let request_id = Uuid::new_v4().to_string();
        let span = info_span!("vault_request", request_id = %request_id, method = %method);

        async move {
            info!("Sending request to: {}", url);
            let mut request = self
                .http_client
                .request(method, &url)
                .header(AUTHORIZATION, &self.authorization)
                .header(CONTENT_TYPE, content_type)
                .header("x-request-id", &request_id);
            if let Some(body) = body {
                debug!("request body: {}", String::from_utf8_lossy(&body));
                request = request.body(body);
            }

            let response = request.send().await?;
            match response.status() {
                StatusCode::UNAUTHORIZED => return Err(ClientError::Unauthorized),
                StatusCode::INTERNAL_SERVER_ERROR => return Err(ClientError::ServerError),
                StatusCode::BAD_REQUEST => return Err(ClientError::BadRequest),
                status if !status.is_success() => {
                    warn!("Unexpected response status: {}", status);
                    return Err(ClientError::UnexpectedStatus(status.as_u16()));
                }
                _ => {}
            }

            let bytes = response.bytes().await?;
            debug!("response body: {} bytes", bytes.len());
            Ok(bytes)
        }
        .instrument(span)
        .await
    }
}
