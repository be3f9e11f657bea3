//! Login, logout, and customer-id derivation.

use crate::error::{ClientError, ClientResult};
use crate::gateway::Gateway;
use bankagg_core::{raw, Identity, Role};
use bankagg_session::SessionStore;
use serde_json::{json, Value};
use tracing::info;

/// Maps a username to a customer id when the backend does not return one.
///
/// The login response carries only `userId`; which customer that user
/// maps to arrives out of band. Injectable so a deployment can supply a
/// real lookup instead of the demo table.
pub trait IdentityPolicy: Send + Sync {
    fn customer_id_for(&self, username: &str) -> Option<String>;
}

/// Development-only username-to-customer-id table.
///
/// Known correctness gap carried over from the original deployment: these
/// ids only mean anything against the demo backend's seed data.
#[derive(Debug, Default)]
pub struct StaticTestMapping;

impl IdentityPolicy for StaticTestMapping {
    fn customer_id_for(&self, username: &str) -> Option<String> {
        match username.to_lowercase().as_str() {
            "nooru" => Some("109".to_string()),
            "pavi" => Some("108".to_string()),
            _ => None,
        }
    }
}

/// Authenticate and persist the resulting identity in the session.
pub async fn login<G: Gateway>(
    gateway: &G,
    session: &SessionStore,
    policy: &dyn IdentityPolicy,
    username: &str,
    password: &str,
) -> ClientResult<Identity> {
    let body = json!({"username": username, "password": password});
    let response = gateway.post_json("/Auth/login", &body).await?;

    let token = response
        .get("token")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ClientError::Login("no token returned".to_string()))?;

    let role = response
        .get("role")
        .and_then(Value::as_str)
        .map(Role::parse)
        .unwrap_or_default();
    let user_id = response
        .get("userId")
        .and_then(raw::scalar_to_string)
        .unwrap_or_default();

    session.set_token(token);
    session.set_role(role);
    session.set_user_id(&user_id);

    let customer_id = policy.customer_id_for(username);
    if let Some(id) = &customer_id {
        info!(username, customer_id = %id, "Applied identity mapping");
        session.set_customer_id(id);
    }

    info!(username, %role, "Logged in");

    Ok(Identity {
        user_id,
        customer_id,
        role,
    })
}

/// Drop the whole session: token, identity, caches, snapshot.
pub fn logout(session: &SessionStore) {
    session.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubGateway;
    use serde_json::json;

    #[tokio::test]
    async fn test_login_persists_identity() {
        let session = SessionStore::new();
        let gateway = StubGateway::new().route(
            "/Auth/login",
            json!({"token": "jwt", "role": "Admin", "userId": 5}),
        );

        let identity = login(&gateway, &session, &StaticTestMapping, "boss", "pw")
            .await
            .unwrap();

        assert_eq!(identity.role, Role::Admin);
        assert_eq!(identity.user_id, "5");
        assert_eq!(identity.customer_id, None);
        assert_eq!(session.token().as_deref(), Some("jwt"));
        assert_eq!(session.role(), Role::Admin);
        assert_eq!(session.user_id().as_deref(), Some("5"));
        assert!(session.customer_id().is_none());
    }

    #[tokio::test]
    async fn test_login_applies_test_mapping_case_insensitively() {
        let session = SessionStore::new();
        let gateway = StubGateway::new().route(
            "/Auth/login",
            json!({"token": "jwt", "role": "Customer", "userId": 9}),
        );

        let identity = login(&gateway, &session, &StaticTestMapping, "Nooru", "pw")
            .await
            .unwrap();

        assert_eq!(identity.customer_id.as_deref(), Some("109"));
        assert_eq!(session.customer_id().as_deref(), Some("109"));
        assert_eq!(identity.hint(), "109");
    }

    #[tokio::test]
    async fn test_login_without_token_fails() {
        let session = SessionStore::new();
        let gateway = StubGateway::new().route("/Auth/login", json!({"role": "Customer"}));

        let err = login(&gateway, &session, &StaticTestMapping, "nooru", "pw")
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Login(_)));
        assert!(session.token().is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let session = SessionStore::new();
        session.set_token("jwt");
        session.set_account_id("9999");

        logout(&session);

        assert!(session.token().is_none());
        assert!(session.account_id().is_none());
    }
}
