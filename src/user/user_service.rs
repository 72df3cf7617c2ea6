use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use super::user_models::{
    AccessTokenRequest, ApiKeyResponse, CreateUser, PasswordUpdate, UpdateUser, UserResponse,
    UserStatus, UsersResponse, VaultUser,
};
use crate::client::{call, Transport, VaultClient};
use crate::error::{ClientError, EncodingError};

/// User management: creation, lookup, updates, deactivation and credential vending.
#[derive(Debug, Clone)]
pub struct UserService<T: Transport = VaultClient> {
    client: Arc<T>,
}

fn json_body<B: Serialize>(body: &B) -> Result<Vec<u8>, ClientError> {
    serde_json::to_vec(body).map_err(|e| ClientError::Encoding(EncodingError::from(e)))
}

// A 2xx envelope can still carry an error message.
fn check_envelope(response: UserResponse) -> Result<VaultUser, ClientError> {
    match response.error {
        Some(error) if !error.message.is_empty() => Err(ClientError::Api(error.message)),
        _ => Ok(response.user),
    }
}

impl<T: Transport> UserService<T> {
    pub fn new(client: Arc<T>) -> Self {
        Self { client }
    }

    /// Fetches one or more users by id. At most 100 ids per call are accepted by the API.
    pub async fn get(&self, user_ids: &[String], full: bool) -> Result<Vec<VaultUser>, ClientError> {
        if user_ids.is_empty() {
            return Err(ClientError::InvalidArgument("user id required"));
        }
        let url = self.client.url_builder().get_user_url(user_ids, full);
        let response: UsersResponse = call(self.client.as_ref(), Method::GET, url, None).await?;
        debug!("Fetched {} users", response.users.len());
        Ok(response.users)
    }

    pub async fn create(&self, user: &CreateUser) -> Result<VaultUser, ClientError> {
        if user.username.is_empty() {
            return Err(ClientError::InvalidArgument("username required to create user"));
        }
        let url = self.client.url_builder().create_user_url();
        let response: UserResponse =
            call(self.client.as_ref(), Method::POST, url, Some(json_body(user)?)).await?;
        let created = check_envelope(response)?;
        info!("Created user {}", created.user_id);
        Ok(created)
    }

    pub async fn list(&self, status: Option<UserStatus>, full: bool) -> Result<Vec<VaultUser>, ClientError> {
        let url = self.client.url_builder().list_user_url(status, full);
        let response: UsersResponse = call(self.client.as_ref(), Method::GET, url, None).await?;
        Ok(response.users)
    }

    pub async fn update(&self, user_id: &str, update: &UpdateUser) -> Result<VaultUser, ClientError> {
        if user_id.is_empty() {
            return Err(ClientError::InvalidArgument("user id required to update user"));
        }
        let url = self.client.url_builder().update_user_url(user_id);
        let response: UserResponse =
            call(self.client.as_ref(), Method::PUT, url, Some(json_body(update)?)).await?;
        check_envelope(response)
    }

    pub async fn update_password(&self, user_id: &str, password: &str) -> Result<(), ClientError> {
        if user_id.is_empty() {
            return Err(ClientError::InvalidArgument("user id required"));
        }
        if password.is_empty() {
            return Err(ClientError::InvalidArgument("password is required"));
        }
        let url = self.client.url_builder().update_user_password_url(user_id);
        let body = json_body(&PasswordUpdate { password })?;
        let response: UserResponse = call(self.client.as_ref(), Method::PUT, url, Some(body)).await?;
        check_envelope(response).map(|_| ())
    }

    /// Deactivates a user. This frees the username and revokes every access token; it cannot be undone
    /// through a status update and does not purge stored data.
    pub async fn delete(&self, user_id: &str) -> Result<(), ClientError> {
        if user_id.is_empty() {
            return Err(ClientError::InvalidArgument("user id required"));
        }
        let url = self.client.url_builder().delete_user_url(user_id);
        let response: UserResponse = call(self.client.as_ref(), Method::DELETE, url, None).await?;
        check_envelope(response)?;
        info!("Deactivated user {}", user_id);
        Ok(())
    }

    /// Vends a new access token for `user_id` and returns it.
    pub async fn create_access_token(
        &self,
        user_id: &str,
        not_valid_after: Option<DateTime<Utc>>,
    ) -> Result<String, ClientError> {
        if user_id.is_empty() {
            return Err(ClientError::InvalidArgument("user id required"));
        }
        let url = self.client.url_builder().create_access_token_url(user_id);
        let body = json_body(&AccessTokenRequest { not_valid_after })?;
        let response: UserResponse = call(self.client.as_ref(), Method::POST, url, Some(body)).await?;
        Ok(check_envelope(response)?.access_token)
    }

    /// Replaces the user's API key and returns the new one.
    pub async fn create_api_key(&self, user_id: &str) -> Result<String, ClientError> {
        if user_id.is_empty() {
            return Err(ClientError::InvalidArgument("user id required"));
        }
        let url = self.client.url_builder().create_api_key_url(user_id);
        let response: ApiKeyResponse = call(self.client.as_ref(), Method::POST, url, None).await?;
        Ok(response.api_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::url_builder::DefaultUrlBuilder;
    use mockito::Matcher;
    use serde_json::json;

    fn service_for(server: &mockito::Server) -> UserService {
        let client = VaultClient::new(
            Arc::new(reqwest::Client::new()),
            Arc::new(DefaultUrlBuilder::new(&server.url())),
            "key",
        );
        UserService::new(Arc::new(client))
    }

    #[tokio::test]
    async fn test_create_user() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("POST", "/v1/users")
            .match_body(Matcher::Json(json!({"username": "ada", "status": "ACTIVATED"})))
            .with_status(200)
            .with_body(
                json!({
                    "result": "success",
                    "transaction_id": "t1",
                    "user": {"user_id": "u1", "username": "ada", "status": "ACTIVATED", "api_key": "k1"}
                })
                .to_string(),
            )
            .create_async()
            .await;

        let user = service_for(&server)
            .create(&CreateUser::new("ada").status(UserStatus::Activated))
            .await
            .unwrap();

        m.assert_async().await;
        assert_eq!(user.user_id, "u1");
        assert_eq!(user.status, Some(UserStatus::Activated));
        assert_eq!(user.api_key, "k1");
    }

    #[tokio::test]
    async fn test_argument_validation() {
        let server = mockito::Server::new_async().await;
        let service = service_for(&server);

        assert!(matches!(service.get(&[], false).await, Err(ClientError::InvalidArgument(_))));
        assert!(matches!(
            service.create(&CreateUser::default()).await,
            Err(ClientError::InvalidArgument(_))
        ));
        assert!(matches!(
            service.update_password("u1", "").await,
            Err(ClientError::InvalidArgument("password is required"))
        ));
        assert!(matches!(service.delete("").await, Err(ClientError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_get_and_list_users() {
        let mut server = mockito::Server::new_async().await;
        let users = json!({
            "result": "success",
            "transaction_id": "t2",
            "users": [{"user_id": "u1", "username": "ada"}, {"user_id": "u2", "username": "bob"}]
        });
        let get = server
            .mock("GET", "/v2/users/u1,u2")
            .match_query(Matcher::UrlEncoded("full".into(), "true".into()))
            .with_status(200)
            .with_body(users.to_string())
            .create_async()
            .await;
        let list = server
            .mock("GET", "/v1/users")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("status".into(), "LOCKED".into()),
                Matcher::UrlEncoded("full".into(), "false".into()),
            ]))
            .with_status(200)
            .with_body(users.to_string())
            .create_async()
            .await;

        let service = service_for(&server);
        let fetched = service.get(&["u1".to_string(), "u2".to_string()], true).await.unwrap();
        let listed = service.list(Some(UserStatus::Locked), false).await.unwrap();

        get.assert_async().await;
        list.assert_async().await;
        assert_eq!(fetched.len(), 2);
        assert_eq!(listed[1].username, "bob");
    }

    #[tokio::test]
    async fn test_envelope_error_message() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("PUT", "/v1/users/u1")
            .match_body(Matcher::Json(json!({"username": "taken"})))
            .with_status(200)
            .with_body(r#"{"result":"error","error":{"message":"username already in use"}}"#)
            .create_async()
            .await;

        let update = UpdateUser { username: Some("taken".to_string()), ..Default::default() };
        let result = service_for(&server).update("u1", &update).await;
        match result {
            Err(ClientError::Api(message)) => assert_eq!(message, "username already in use"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_credentials() {
        let mut server = mockito::Server::new_async().await;
        let _token = server
            .mock("POST", "/v1/users/u1/access_token")
            .with_status(200)
            .with_body(r#"{"result":"success","user":{"access_token":"tok-1","user_id":"u1"}}"#)
            .create_async()
            .await;
        let _key = server
            .mock("POST", "/v1/users/u1/api_key")
            .with_status(200)
            .with_body(r#"{"result":"success","api_key":"key-2","transaction_id":"t3"}"#)
            .create_async()
            .await;
        let delete = server
            .mock("DELETE", "/v1/users/u1")
            .with_status(200)
            .with_body(r#"{"result":"success","user":{"user_id":"u1","status":"DEACTIVATED"}}"#)
            .create_async()
            .await;

        let service = service_for(&server);
        assert_eq!(service.create_access_token("u1", None).await.unwrap(), "tok-1");
        assert_eq!(service.create_api_key("u1").await.unwrap(), "key-2");
        service.delete("u1").await.unwrap();
        delete.assert_async().await;
    }
}
