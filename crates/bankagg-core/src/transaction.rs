//! Transaction record normalization.

use crate::raw;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Normalized transaction shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// `transactionId`/`id` when the backend provides one; otherwise a
    /// synthesized `type-createdAt-random` composite. Synthesized ids are
    /// neither unique nor stable across refetches; never treat them as
    /// identity.
    pub id: String,
    /// Raw `createdAt` value. The backend's date format is not guaranteed,
    /// so it is carried through untouched.
    pub date: String,
    /// Transaction type as reported (e.g. "Deposit", "Withdraw").
    pub kind: String,
    pub amount: Decimal,
    pub description: String,
    pub account_id: String,
}

impl TransactionRecord {
    /// Normalize one raw JSON record.
    pub fn from_raw(raw: &Value) -> Self {
        let kind = raw::string_field(raw, &["type"]);
        let date = raw::string_field(raw, &["createdAt"]);

        let id = raw::string_field(raw, &["transactionId", "id"]);
        let id = if id.is_empty() {
            format!("{kind}-{date}-{}", Uuid::new_v4().simple())
        } else {
            id
        };

        Self {
            id,
            date,
            kind,
            amount: raw::decimal_field(raw, "amount"),
            description: raw::string_field(raw, &["description", "note"]),
            account_id: raw::string_field(raw, &["accountId", "destinationAccountId"]),
        }
    }

    /// Normalize a response body that may be a single object or an array.
    pub fn from_response(body: &Value) -> Vec<Self> {
        match body {
            Value::Array(items) => items.iter().map(Self::from_raw).collect(),
            Value::Null => Vec::new(),
            other => vec![Self::from_raw(other)],
        }
    }
}
