//! Deposit and withdraw submission.
//!
//! The POST endpoints are the one unambiguous part of the backend, so
//! there is no probing here. The ambiguity returns in the post-success
//! refresh, which re-runs the account resolver instead of trusting the
//! POST response body.

use crate::accounts::AccountResolver;
use crate::error::{ClientError, ClientResult};
use crate::gateway::Gateway;
use bankagg_core::AccountRecord;
use bankagg_session::SessionStore;
use rust_decimal::Decimal;
use serde_json::json;
use tracing::warn;

/// Money movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Deposit,
    Withdraw,
}

impl ActionKind {
    fn path(&self) -> &'static str {
        match self {
            Self::Deposit => "/Accounts/deposit",
            Self::Withdraw => "/Accounts/withdraw",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdraw => "withdraw",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the caller should display after a submission.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Server confirmed and the account list was re-resolved from source.
    Refreshed(Vec<AccountRecord>),
    /// The round trip (or the refresh after it) failed. The balance shown
    /// is a local optimistic guess for display continuity only; it is
    /// never rolled back and is reconciled by the next successful
    /// resolution.
    Optimistic {
        account: AccountRecord,
        error: ClientError,
    },
}

/// Submits deposits and withdrawals and reconciles display state.
pub struct ActionSubmitter<'a, G> {
    gateway: &'a G,
    session: &'a SessionStore,
}

impl<'a, G: Gateway> ActionSubmitter<'a, G> {
    pub fn new(gateway: &'a G, session: &'a SessionStore) -> Self {
        Self { gateway, session }
    }

    /// Submit a deposit or withdrawal against `account`.
    ///
    /// Amount validation happens before any network contact; a
    /// non-positive amount is the only hard error here. Everything past
    /// that resolves to a [`SubmitOutcome`].
    pub async fn submit(
        &self,
        kind: ActionKind,
        account: &AccountRecord,
        amount: Decimal,
        note: Option<&str>,
    ) -> ClientResult<SubmitOutcome> {
        if amount <= Decimal::ZERO {
            return Err(ClientError::Validation(format!(
                "Invalid amount for {kind}: {amount}"
            )));
        }

        let payload = json!({
            "amount": amount,
            "destinationAccountId": account.id,
            "note": note.map(str::to_string).unwrap_or_else(|| format!("{kind} via client")),
        });

        match self.gateway.post_json(kind.path(), &payload).await {
            Ok(_) => {
                // Refresh from source of truth; the POST body is never
                // merged locally.
                let resolver = AccountResolver::new(self.gateway, self.session);
                match resolver.resolve(None).await {
                    Ok(records) => Ok(SubmitOutcome::Refreshed(records)),
                    Err(err) => {
                        warn!(action = %kind, %err, "Refresh after submission failed, applying optimistic balance");
                        Ok(SubmitOutcome::Optimistic {
                            account: optimistic_adjustment(kind, account, amount),
                            error: err,
                        })
                    }
                }
            }
            Err(err) => {
                warn!(action = %kind, %err, "Submission failed, applying optimistic balance");
                Ok(SubmitOutcome::Optimistic {
                    account: optimistic_adjustment(kind, account, amount),
                    error: err,
                })
            }
        }
    }
}

/// Local-only balance mutation for display continuity.
fn optimistic_adjustment(kind: ActionKind, account: &AccountRecord, amount: Decimal) -> AccountRecord {
    let mut adjusted = account.clone();
    adjusted.balance = match kind {
        ActionKind::Deposit => account.balance + amount,
        ActionKind::Withdraw => account.balance - amount,
    };
    adjusted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubGateway;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn account_with_balance(balance: Decimal) -> AccountRecord {
        AccountRecord {
            id: "7".to_string(),
            full_name: "Pavi".to_string(),
            email: String::new(),
            bank_id: String::new(),
            branch_id: String::new(),
            account_number: "HDFC108".to_string(),
            phone: String::new(),
            balance,
        }
    }

    #[tokio::test]
    async fn test_non_positive_amount_fails_without_network() {
        let session = SessionStore::new();
        let gateway = StubGateway::new();
        let submitter = ActionSubmitter::new(&gateway, &session);
        let account = account_with_balance(dec!(50));

        for amount in [dec!(0), dec!(-3)] {
            let err = submitter
                .submit(ActionKind::Withdraw, &account, amount, None)
                .await
                .unwrap_err();
            assert!(matches!(err, ClientError::Validation(_)));
        }

        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_network_failure_applies_optimistic_deposit() {
        let session = SessionStore::new();
        let gateway = StubGateway::new();
        let account = account_with_balance(dec!(50));

        let outcome = ActionSubmitter::new(&gateway, &session)
            .submit(ActionKind::Deposit, &account, dec!(100), None)
            .await
            .unwrap();

        match outcome {
            SubmitOutcome::Optimistic { account, error } => {
                assert_eq!(account.balance, dec!(150));
                assert!(matches!(error, ClientError::Http(_)));
            }
            SubmitOutcome::Refreshed(_) => panic!("expected optimistic outcome"),
        }
        assert_eq!(gateway.calls(), vec!["/Accounts/deposit"]);
    }

    #[tokio::test]
    async fn test_network_failure_applies_optimistic_withdraw() {
        let session = SessionStore::new();
        let gateway = StubGateway::new();
        let account = account_with_balance(dec!(50));

        let outcome = ActionSubmitter::new(&gateway, &session)
            .submit(ActionKind::Withdraw, &account, dec!(20), None)
            .await
            .unwrap();

        match outcome {
            SubmitOutcome::Optimistic { account, .. } => {
                assert_eq!(account.balance, dec!(30));
            }
            SubmitOutcome::Refreshed(_) => panic!("expected optimistic outcome"),
        }
    }

    #[tokio::test]
    async fn test_success_refreshes_from_source_of_truth() {
        let session = SessionStore::new();
        session.set_account_id("7");
        let gateway = StubGateway::new()
            .route("/Accounts/deposit", json!({"status": "ok"}))
            .route("/Accounts/7", json!({"accountId": 7, "balance": 150}));
        let account = account_with_balance(dec!(50));

        let outcome = ActionSubmitter::new(&gateway, &session)
            .submit(ActionKind::Deposit, &account, dec!(100), Some("rent"))
            .await
            .unwrap();

        match outcome {
            SubmitOutcome::Refreshed(records) => {
                assert_eq!(records[0].balance, dec!(150));
            }
            SubmitOutcome::Optimistic { .. } => panic!("expected refreshed outcome"),
        }

        let posts = gateway.posts();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].0, "/Accounts/deposit");
        assert_eq!(posts[0].1["destinationAccountId"], json!("7"));
        assert_eq!(posts[0].1["note"], json!("rent"));
    }

    #[tokio::test]
    async fn test_default_note_names_the_action() {
        let session = SessionStore::new();
        let gateway = StubGateway::new();
        let account = account_with_balance(dec!(50));

        ActionSubmitter::new(&gateway, &session)
            .submit(ActionKind::Withdraw, &account, dec!(5), None)
            .await
            .unwrap();

        assert_eq!(gateway.posts()[0].1["note"], json!("withdraw via client"));
    }

    #[tokio::test]
    async fn test_refresh_failure_after_success_is_optimistic() {
        // POST lands but the re-resolution finds nothing: the session has
        // no identity to probe with.
        let session = SessionStore::new();
        let gateway = StubGateway::new().route("/Accounts/withdraw", json!({"status": "ok"}));
        let account = account_with_balance(dec!(50));

        let outcome = ActionSubmitter::new(&gateway, &session)
            .submit(ActionKind::Withdraw, &account, dec!(10), None)
            .await
            .unwrap();

        match outcome {
            SubmitOutcome::Optimistic { account, error } => {
                assert_eq!(account.balance, dec!(40));
                assert!(matches!(error, ClientError::NoMatchingAccount));
            }
            SubmitOutcome::Refreshed(_) => panic!("expected optimistic outcome"),
        }
    }
}
