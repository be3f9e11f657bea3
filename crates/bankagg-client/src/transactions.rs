//! Transaction history resolution.
//!
//! Same probing pattern as account resolution, with role branching:
//! admins read the one fixed system-wide endpoint, everyone else walks
//! the candidate per-user paths in order. Each success overwrites the
//! session snapshot so later exhausted loads have something to show.

use crate::error::{ClientError, ClientResult};
use crate::gateway::Gateway;
use bankagg_core::{Role, TransactionRecord};
use bankagg_session::SessionStore;
use tracing::{debug, info};

/// Fixed admin-wide listing; never probed, never parameterized.
const ADMIN_TRANSACTIONS_PATH: &str = "/admin/transactions";

/// Candidate path shapes for per-user transaction lookup, tried in order.
const TRANSACTION_PATHS: &[fn(&str) -> String] = &[
    |id| format!("/Transactions/{id}"),
    |id| format!("/Transactions/user/{id}"),
    |id| format!("/Transactions?userId={id}"),
    |id| format!("/Transactions?customerId={id}"),
];

/// Optional date-range filter forwarded as `from`/`to` query parameters.
#[derive(Debug, Clone, Default)]
pub struct DateRange {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl DateRange {
    /// Append the range to `path`, joining with `?` or `&` depending on
    /// whether the path already carries a query string.
    fn append_to(&self, path: &str) -> String {
        let mut out = path.to_string();
        let mut sep = if path.contains('?') { '&' } else { '?' };
        if let Some(from) = &self.from {
            out.push(sep);
            out.push_str("from=");
            out.push_str(from);
            sep = '&';
        }
        if let Some(to) = &self.to {
            out.push(sep);
            out.push_str("to=");
            out.push_str(to);
        }
        out
    }
}

/// Resolves transaction history against the ambiguous endpoint family.
pub struct TransactionResolver<'a, G> {
    gateway: &'a G,
    session: &'a SessionStore,
}

impl<'a, G: Gateway> TransactionResolver<'a, G> {
    pub fn new(gateway: &'a G, session: &'a SessionStore) -> Self {
        Self { gateway, session }
    }

    /// Resolve transactions for `id` under `role`.
    ///
    /// On exhaustion the stored snapshot is left untouched and the caller
    /// decides whether to fall back to it.
    pub async fn resolve(
        &self,
        id: &str,
        role: Role,
        range: &DateRange,
    ) -> ClientResult<Vec<TransactionRecord>> {
        if role.is_admin() {
            let body = self.gateway.get_json(ADMIN_TRANSACTIONS_PATH).await?;
            let records = TransactionRecord::from_response(&body);
            self.session.set_transaction_snapshot(&records);
            info!(count = records.len(), "Fetched admin-wide transactions");
            return Ok(records);
        }

        for path_for in TRANSACTION_PATHS {
            let path = range.append_to(&path_for(id));
            match self.gateway.get_json(&path).await {
                Ok(body) => {
                    let records = TransactionRecord::from_response(&body);
                    self.session.set_transaction_snapshot(&records);
                    info!(%path, count = records.len(), "Resolved transactions");
                    return Ok(records);
                }
                Err(err) => debug!(%path, %err, "Transaction probe failed"),
            }
        }

        Err(ClientError::NoTransactionsEndpoint)
    }
}
