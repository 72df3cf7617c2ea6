use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::EncodingError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VaultUser {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub status: Option<UserStatus>,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub mfa_enrolled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserStatus {
    Activated,
    Pending,
    Locked,
    Deactivated,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Activated => "ACTIVATED",
            UserStatus::Pending => "PENDING",
            UserStatus::Locked => "LOCKED",
            UserStatus::Deactivated => "DEACTIVATED",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ACTIVATED" => Ok(UserStatus::Activated),
            "PENDING" => Ok(UserStatus::Pending),
            "LOCKED" => Ok(UserStatus::Locked),
            "DEACTIVATED" => Ok(UserStatus::Deactivated),
            other => Err(format!("unknown user status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub r#type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserResponse {
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub transaction_id: String,
    #[serde(default)]
    pub user: VaultUser,
    #[serde(default)]
    pub error: Option<ApiErrorDetail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsersResponse {
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub transaction_id: String,
    #[serde(default)]
    pub users: Vec<VaultUser>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiKeyResponse {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub transaction_id: String,
}

/// Body of a create-user call. Empty optional fields are left off the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateUser {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Base64-encoded JSON, see [`encode_attributes`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", serialize_with = "serialize_comma_list")]
    pub group_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token_not_valid_after: Option<DateTime<Utc>>,
}

impl CreateUser {
    pub fn new(username: impl Into<String>) -> Self {
        Self { username: username.into(), ..Default::default() }
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn attributes(mut self, attributes: impl Into<String>) -> Self {
        self.attributes = Some(attributes.into());
        self
    }

    pub fn group_ids(mut self, group_ids: Vec<String>) -> Self {
        self.group_ids = group_ids;
        self
    }

    pub fn status(mut self, status: UserStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn access_token_not_valid_after(mut self, at: DateTime<Utc>) -> Self {
        self.access_token_not_valid_after = Some(at);
        self
    }
}

/// Body of an update-user call. Every set field overwrites the stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token_not_valid_after: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct PasswordUpdate<'a> {
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct AccessTokenRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_valid_after: Option<DateTime<Utc>>,
}

fn serialize_comma_list<S>(items: &[String], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&items.join(","))
}

/// Encodes user attributes the way the API stores them: base64 around JSON.
pub fn encode_attributes<T: Serialize>(attributes: &T) -> Result<String, EncodingError> {
    let json = serde_json::to_vec(attributes)?;
    Ok(STANDARD.encode(json))
}
