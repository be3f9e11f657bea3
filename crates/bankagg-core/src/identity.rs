//! User identity and roles.

use serde::{Deserialize, Serialize};

/// Role granted at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Role {
    Admin,
    /// Default whenever the backend omits or mangles the role string.
    #[default]
    Customer,
}

impl Role {
    /// Parse the role string from a login response. The backend sends
    /// exactly "Admin" for administrators; anything else is a customer.
    pub fn parse(value: &str) -> Self {
        match value {
            "Admin" => Self::Admin,
            _ => Self::Customer,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Customer => "Customer",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A logged-in user as known to this client.
///
/// Established once at login and destroyed only by logout; never mutated
/// mid-session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Id issued by the login endpoint.
    pub user_id: String,
    /// Issued by the identity policy, not by the backend.
    pub customer_id: Option<String>,
    pub role: Role,
}

impl Identity {
    /// Best-known identifier for resolution: customer id when present,
    /// user id otherwise. Not guaranteed accurate.
    pub fn hint(&self) -> &str {
        self.customer_id.as_deref().unwrap_or(&self.user_id)
    }
}
