//! Account record normalization.
//!
//! Endpoint variants disagree on field spellings (`accountNumber` vs
//! `accountNo`) and on whether customer data sits inline or nested under
//! a `customer` object. Normalization reconciles the aliases into one
//! display shape.

use crate::raw;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalized account shape shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Primary id: first of `accountId`, `customerId`, `id` in the raw
    /// record, in that priority order.
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub bank_id: String,
    pub branch_id: String,
    pub account_number: String,
    pub phone: String,
    /// Always coerced to a decimal; zero when missing or unparseable.
    pub balance: Decimal,
}

impl AccountRecord {
    /// Normalize one raw JSON record.
    pub fn from_raw(raw: &Value) -> Self {
        Self {
            id: raw::string_field(raw, &["accountId", "customerId", "id"]),
            full_name: customer_field(raw, "fullName"),
            email: customer_field(raw, "email"),
            bank_id: raw::string_field(raw, &["bankId"]),
            branch_id: raw::string_field(raw, &["branchId"]),
            account_number: raw::string_field(raw, &["accountNumber", "accountNo"]),
            phone: customer_field(raw, "phone"),
            balance: raw::decimal_field(raw, "balance"),
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

/// Field present at top level on some backends, under `customer` on others.
fn customer_field(record: &Value, key: &str) -> String {
    record
        .get(key)
        .and_then(raw::scalar_to_string)
        .or_else(|| {
            record
                .get("customer")
                .and_then(|c| c.get(key))
                .and_then(raw::scalar_to_string)
        })
        .unwrap_or_default()
}

/// String-compared identity match against the raw `customerId`/`userId`
/// fields. Tolerates numeric ids on one side and string ids on the other.
pub fn matches_identity(record: &Value, desired: &str) -> bool {
    ["customerId", "userId"].iter().any(|key| {
        record
            .get(*key)
            .and_then(raw::scalar_to_string)
            .as_deref()
            == Some(desired)
    })
}

/// Account id worth caching from a raw response body, if any.
///
/// Prefers the first record carrying an explicit `accountId` or `id`; a
/// record identified only by `customerId` is not cacheable, since the
/// cached id is replayed against `/Accounts/{id}` on later loads.
pub fn extractable_account_id(body: &Value) -> Option<String> {
    let single = std::slice::from_ref(body);
    let items: &[Value] = match body {
        Value::Array(items) => items.as_slice(),
        _ => single,
    };

    let primary = items
        .iter()
        .find(|record| has_scalar(record, "accountId") || has_scalar(record, "id"))
        .or_else(|| items.first())?;

    primary
        .get("accountId")
        .and_then(raw::scalar_to_string)
        .or_else(|| primary.get("id").and_then(raw::scalar_to_string))
}

fn has_scalar(record: &Value, key: &str) -> bool {
    record.get(key).and_then(raw::scalar_to_string).is_some()
}
