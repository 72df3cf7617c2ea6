use crate::user::UserStatus;

pub const DEFAULT_API_BASE: &str = "https://api.truevault.com";

/// Maps each API operation to its endpoint URL.
pub trait UrlBuilder: Send + Sync {
    fn search_document_url(&self, vault_id: &str) -> String;
    fn get_user_url(&self, user_ids: &[String], full: bool) -> String;
    fn create_user_url(&self) -> String;
    fn list_user_url(&self, status: Option<UserStatus>, full: bool) -> String;
    fn update_user_url(&self, user_id: &str) -> String;
    fn update_user_password_url(&self, user_id: &str) -> String;
    fn delete_user_url(&self, user_id: &str) -> String;
    fn create_access_token_url(&self, user_id: &str) -> String;
    fn create_api_key_url(&self, user_id: &str) -> String;
}

#[derive(Debug, Clone)]
pub struct DefaultUrlBuilder {
    base: String,
}

impl DefaultUrlBuilder {
    pub fn new(api_base: &str) -> Self {
        Self { base: api_base.trim_end_matches('/').to_string() }
    }
}

impl Default for DefaultUrlBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

impl UrlBuilder for DefaultUrlBuilder {
    fn search_document_url(&self, vault_id: &str) -> String {
        format!("{}/v1/vaults/{}/search", self.base, vault_id)
    }

    fn get_user_url(&self, user_ids: &[String], full: bool) -> String {
        format!("{}/v2/users/{}?full={}", self.base, user_ids.join(","), full)
    }

    fn create_user_url(&self) -> String {
        format!("{}/v1/users", self.base)
    }

    fn list_user_url(&self, status: Option<UserStatus>, full: bool) -> String {
        match status {
            Some(status) => format!("{}/v1/users?status={}&full={}", self.base, status.as_str(), full),
            None => format!("{}/v1/users?full={}", self.base, full),
        }
    }

    fn update_user_url(&self, user_id: &str) -> String {
        format!("{}/v1/users/{}", self.base, user_id)
    }

    fn update_user_password_url(&self, user_id: &str) -> String {
        format!("{}/v1/users/{}/password", self.base, user_id)
    }

    fn delete_user_url(&self, user_id: &str) -> String {
        format!("{}/v1/users/{}", self.base, user_id)
    }

    fn create_access_token_url(&self, user_id: &str) -> String {
        format!("{}/v1/users/{}/access_token", self.base, user_id)
    }

    fn create_api_key_url(&self, user_id: &str) -> String {
        format!("{}/v1/users/{}/api_key", self.base, user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_urls() {
        let urls = DefaultUrlBuilder::default();
        assert_eq!(
            urls.search_document_url("vault-1"),
            "https://api.truevault.com/v1/vaults/vault-1/search"
        );
        assert_eq!(
            urls.get_user_url(&["a".to_string(), "b".to_string()], false),
            "https://api.truevault.com/v2/users/a,b?full=false"
        );
        assert_eq!(
            urls.list_user_url(Some(UserStatus::Locked), true),
            "https://api.truevault.com/v1/users?status=LOCKED&full=true"
        );
        assert_eq!(urls.list_user_url(None, false), "https://api.truevault.com/v1/users?full=false");
        assert_eq!(urls.create_api_key_url("u1"), "https://api.truevault.com/v1/users/u1/api_key");
    }

    #[test]
    fn test_trailing_slash_in_base() {
        let urls = DefaultUrlBuilder::new("http://127.0.0.1:1234/");
        assert_eq!(urls.create_user_url(), "http://127.0.0.1:1234/v1/users");
    }
}
