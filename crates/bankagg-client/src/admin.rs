//! Admin-only operations.

use crate::error::ClientResult;
use crate::gateway::Gateway;
use bankagg_core::raw;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One row of the admin user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub user_id: String,
    pub username: String,
    pub email: String,
    /// Raw role string as reported by the backend.
    pub role: String,
    pub customer_id: String,
    pub phone: String,
}

impl UserSummary {
    fn from_raw(record: &Value) -> Self {
        Self {
            user_id: raw::string_field(record, &["userId"]),
            username: raw::string_field(record, &["username"]),
            email: raw::string_field(record, &["email"]),
            role: raw::string_field(record, &["role"]),
            customer_id: raw::string_field(record, &["customerId"]),
            phone: raw::string_field(record, &["phone"]),
        }
    }
}

/// `GET /admin/users` — the full user directory.
pub async fn list_users<G: Gateway>(gateway: &G) -> ClientResult<Vec<UserSummary>> {
    let body = gateway.get_json("/admin/users").await?;
    let users = match &body {
        Value::Array(items) => items.iter().map(UserSummary::from_raw).collect(),
        _ => Vec::new(),
    };
    Ok(users)
}

/// `POST /Accounts` — create an account from a caller-supplied payload.
/// Returns the raw created record.
pub async fn create_account<G: Gateway>(gateway: &G, payload: &Value) -> ClientResult<Value> {
    gateway.post_json("/Accounts", payload).await
}
