//! User lookup.

use snip_core::entities::User;

use crate::{ApiClient, error::ApiError};

impl ApiClient {
    /// List users, optionally filtered by username.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the body cannot be parsed.
    pub async fn get_users(&self, username: Option<&str>) -> Result<Vec<User>, ApiError> {
        let pairs: Vec<_> = username
            .filter(|u| !u.is_empty())
            .map(|u| ("username".to_string(), u.to_string()))
            .into_iter()
            .collect();
        self.get_json(&self.url("/users", &pairs)).await
    }

    /// Fetch one user by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Api`] with status 404 for unknown ids, or another
    /// [`ApiError`] if the request fails.
    pub async fn get_user(&self, id: &str) -> Result<User, ApiError> {
        let path = format!("/users/{}", urlencoding::encode(id));
        self.get_json(&self.url(&path, &[])).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_users_response() {
        let users: Vec<User> = serde_json::from_str(
            r#"[{ "id": "u1", "username": "ada", "isPrivileged": false },
                { "id": "u2", "username": "adam", "disabled": true }]"#,
        )
        .unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].is_privileged, Some(false));
        assert_eq!(users[1].disabled, Some(true));
    }

    #[test]
    fn user_path_is_encoded() {
        let client = ApiClient::new(&snip_config::ApiConfig::default()).unwrap();
        let path = format!("/users/{}", urlencoding::encode("a/b"));
        assert_eq!(
            client.url(&path, &[]),
            "http://localhost:3333/v1/users/a%2Fb"
        );
    }
}
