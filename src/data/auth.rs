//! Login, logout, and the current-user probe
//!
//! These calls go over the same gateway client as everything else, but their
//! paths are auth-sensitive: the client never substitutes fallback data for
//! them, so a broken backend fails loudly here instead of silently
//! "succeeding".

use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::api::{ApiClient, ApiError};
use crate::session::{SessionError, StoredUser};

use super::{decode, Role, User};

/// Failures of the login/logout flow
#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend rejected or failed the call
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The session record could not be persisted
    #[error("failed to persist session: {0}")]
    Session(#[from] SessionError),
}

/// The `/login/` response body
#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    #[serde(default)]
    username: Option<String>,
    #[serde(rename = "fullName", default)]
    full_name: Option<String>,
}

/// Authenticates against `/login/` and stores the returned token.
///
/// On success the session record is written through to disk so the next run
/// starts logged in.
pub async fn login(
    client: &ApiClient,
    username: &str,
    password: &str,
    role: Role,
) -> Result<StoredUser, AuthError> {
    let payload = client
        .post(
            "/login/",
            json!({
                "username": username,
                "password": password,
                "userType": role,
            }),
        )
        .await?;
    let response: LoginResponse = decode(payload)?;
    // Listings cached before login were fetched with different visibility.
    client.clear_cache();

    let user = StoredUser {
        username: response.username.unwrap_or_else(|| username.to_string()),
        role,
        token: response.token,
        full_name: response
            .full_name
            .unwrap_or_else(|| capitalize(username)),
        logged_in_at: Utc::now(),
    };
    client.session().store(user.clone())?;
    Ok(user)
}

/// Notifies the backend and deletes the stored session.
///
/// The local record is cleared even when the backend call fails; revoking the
/// token for subsequent requests must not depend on the server being up.
pub async fn logout(client: &ApiClient) -> Result<(), AuthError> {
    let result = client.post("/logout/", json!({})).await;
    client.session().clear();
    client.clear_cache();
    result?;
    Ok(())
}

/// Fetches the authenticated user from `/current-user/`
pub async fn current_user(client: &ApiClient) -> Result<User, ApiError> {
    decode(client.get("/current-user/").await?)
}

/// Default display name when the backend supplies none
fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::mock::MockTransport;
    use crate::api::{FallbackMode, TransportError};
    use crate::session::SessionStore;
    use std::sync::Arc;

    fn client_with(transport: Arc<MockTransport>) -> ApiClient {
        ApiClient::with_transport(
            transport,
            "http://test/api",
            Arc::new(SessionStore::in_memory()),
            FallbackMode::DemoFixtures,
        )
    }

    #[tokio::test]
    async fn test_login_stores_token_and_later_requests_carry_it() {
        let transport = Arc::new(MockTransport::new());
        transport.push_response(
            200,
            &json!({"token": "tok-xyz", "username": "admin", "fullName": "Admin"}),
        );
        transport.push_response(200, &json!([]));
        let client = client_with(transport.clone());

        let user = login(&client, "admin", "admin123", Role::Admin)
            .await
            .expect("login");
        assert_eq!(user.token, "tok-xyz");
        assert!(client.session().is_logged_in());

        client.get("/doctors/").await.expect("authorized read");
        assert_eq!(
            transport.request(1).auth_token.as_deref(),
            Some("tok-xyz"),
            "Requests after login must carry the authorization token"
        );
    }

    #[tokio::test]
    async fn test_login_failure_propagates_and_stores_nothing() {
        let transport = Arc::new(MockTransport::new());
        transport.push_raw(401, r#"{"detail": "Invalid credentials"}"#);
        let client = client_with(transport.clone());

        let result = login(&client, "admin", "wrong", Role::Admin).await;

        assert!(matches!(result, Err(AuthError::Api(ApiError::Auth { .. }))));
        assert!(!client.session().is_logged_in());
    }

    #[tokio::test]
    async fn test_login_network_failure_is_never_masked() {
        let transport = Arc::new(MockTransport::new());
        transport.push_error(TransportError::Timeout);
        let client = client_with(transport.clone());

        let result = login(&client, "admin", "admin123", Role::Admin).await;
        assert!(matches!(
            result,
            Err(AuthError::Api(ApiError::Network(_))),
        ));
    }

    #[tokio::test]
    async fn test_logout_clears_session_and_header_disappears() {
        let transport = Arc::new(MockTransport::new());
        transport.push_response(200, &json!({"token": "tok-xyz"}));
        transport.push_response(200, &json!({}));
        transport.push_response(200, &json!([]));
        let client = client_with(transport.clone());

        login(&client, "admin", "admin123", Role::Admin)
            .await
            .expect("login");
        logout(&client).await.expect("logout");
        assert!(!client.session().is_logged_in());

        client.get("/doctors/").await.expect("anonymous read");
        assert!(
            transport.request(2).auth_token.is_none(),
            "Requests after logout must omit the authorization header"
        );
    }

    #[tokio::test]
    async fn test_logout_clears_session_even_when_backend_is_down() {
        let transport = Arc::new(MockTransport::new());
        transport.push_response(200, &json!({"token": "tok-xyz"}));
        transport.push_error(TransportError::Connect("refused".to_string()));
        let client = client_with(transport.clone());

        login(&client, "admin", "admin123", Role::Admin)
            .await
            .expect("login");
        let result = logout(&client).await;

        assert!(result.is_err(), "The backend failure still surfaces");
        assert!(
            !client.session().is_logged_in(),
            "The local token is revoked regardless"
        );
    }

    #[tokio::test]
    async fn test_current_user_parses_backend_shape() {
        let transport = Arc::new(MockTransport::new());
        transport.push_response(
            200,
            &json!({"id": 3, "username": "asha", "userType": "Doctor", "fullName": "Asha Rao"}),
        );
        let client = client_with(transport.clone());

        let user = current_user(&client).await.expect("current user");
        assert_eq!(user.role, Role::Doctor);
        assert_eq!(user.id, Some(3));
    }

    #[test]
    fn test_capitalize_default_display_name() {
        assert_eq!(capitalize("admin"), "Admin");
        assert_eq!(capitalize(""), "");
    }
}
