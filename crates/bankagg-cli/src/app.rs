//! Subcommand dispatch.

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use bankagg_client::{
    AccountResolver, ActionKind, ActionSubmitter, ClientError, DateRange, HttpGateway,
    StaticTestMapping, SubmitOutcome, TransactionResolver, UserSummary,
};
use bankagg_core::{AccountRecord, TransactionRecord};
use bankagg_session::SessionStore;
use chrono::NaiveDate;
use clap::Subcommand;
use rust_decimal::Decimal;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Authenticate against the remote banking API.
    Login {
        username: String,
        password: String,
    },
    /// Drop the stored session.
    Logout,
    /// Show your account(s); admins see the user directory instead.
    Accounts,
    /// Browse transaction history, optionally filtered by date.
    Transactions {
        /// Start date (YYYY-MM-DD).
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD).
        #[arg(long)]
        to: Option<String>,
    },
    /// Deposit funds into your account.
    Deposit {
        amount: Decimal,
        #[arg(long)]
        note: Option<String>,
    },
    /// Withdraw funds from your account.
    Withdraw {
        amount: Decimal,
        #[arg(long)]
        note: Option<String>,
    },
    /// List all users (admin only).
    Users,
    /// Create an account from a JSON payload (admin only).
    CreateAccount {
        /// Raw JSON payload forwarded to the backend.
        payload: String,
    },
}

/// One CLI invocation: loads the session, runs a subcommand, persists
/// the session back to disk.
pub struct Application {
    config: AppConfig,
    session: Arc<SessionStore>,
    gateway: HttpGateway,
}

impl Application {
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let session = Arc::new(load_session(&config.session_file)?);
        let gateway = HttpGateway::new(&config.base_url, Arc::clone(&session))?;
        Ok(Self {
            config,
            session,
            gateway,
        })
    }

    /// Run one subcommand and persist the session afterwards, whether or
    /// not the command succeeded (a failed fetch may still have updated
    /// the resolved-account-id cache or the snapshot).
    pub async fn run(&self, command: Command) -> AppResult<()> {
        let result = self.dispatch(command).await;
        self.save_session()?;
        result
    }

    async fn dispatch(&self, command: Command) -> AppResult<()> {
        match command {
            Command::Login { username, password } => self.login(&username, &password).await,
            Command::Logout => {
                bankagg_client::logout(&self.session);
                println!("Logged out.");
                Ok(())
            }
            Command::Accounts => self.accounts().await,
            Command::Transactions { from, to } => self.transactions(from, to).await,
            Command::Deposit { amount, note } => {
                self.action(ActionKind::Deposit, amount, note).await
            }
            Command::Withdraw { amount, note } => {
                self.action(ActionKind::Withdraw, amount, note).await
            }
            Command::Users => self.users().await,
            Command::CreateAccount { payload } => self.create_account(&payload).await,
        }
    }

    async fn login(&self, username: &str, password: &str) -> AppResult<()> {
        let identity = bankagg_client::login(
            &self.gateway,
            &self.session,
            &StaticTestMapping,
            username,
            password,
        )
        .await?;
        println!("Logged in as {username} ({})", identity.role);
        Ok(())
    }

    async fn accounts(&self) -> AppResult<()> {
        self.require_login()?;
        if self.session.role().is_admin() {
            // Admins see the user directory, mirroring the original page.
            return self.users().await;
        }

        let hint = self
            .session
            .customer_id()
            .or_else(|| self.session.user_id());
        let records = AccountResolver::new(&self.gateway, &self.session)
            .resolve(hint.as_deref())
            .await?;

        for record in &records {
            print_account(record);
        }
        Ok(())
    }

    async fn transactions(&self, from: Option<String>, to: Option<String>) -> AppResult<()> {
        self.require_login()?;
        let range = DateRange {
            from: validate_date(from)?,
            to: validate_date(to)?,
        };

        let id = self
            .session
            .user_id()
            .or_else(|| self.session.customer_id())
            .unwrap_or_else(|| "1".to_string());

        let resolver = TransactionResolver::new(&self.gateway, &self.session);
        let records = match resolver.resolve(&id, self.session.role(), &range).await {
            Ok(records) => records,
            Err(err) => {
                warn!(%err, "Transaction fetch failed, falling back to stored snapshot");
                println!("(showing last known transactions; live fetch failed: {err})");
                self.session.transaction_snapshot()
            }
        };

        if records.is_empty() {
            println!("No transactions.");
        }
        for record in &records {
            print_transaction(record);
        }
        Ok(())
    }

    async fn action(
        &self,
        kind: ActionKind,
        amount: Decimal,
        note: Option<String>,
    ) -> AppResult<()> {
        self.require_login()?;

        // The original page acts on the displayed row; resolve one first.
        let hint = self
            .session
            .customer_id()
            .or_else(|| self.session.user_id());
        let records = AccountResolver::new(&self.gateway, &self.session)
            .resolve(hint.as_deref())
            .await?;
        let account = records
            .first()
            .ok_or(AppError::Client(ClientError::NoMatchingAccount))?;

        let outcome = ActionSubmitter::new(&self.gateway, &self.session)
            .submit(kind, account, amount, note.as_deref())
            .await?;

        match outcome {
            SubmitOutcome::Refreshed(records) => {
                println!("{kind} successful.");
                for record in &records {
                    print_account(record);
                }
            }
            SubmitOutcome::Optimistic { account, error } => {
                println!("{kind} failed: {error}");
                println!("Showing optimistic balance (not confirmed by the backend):");
                print_account(&account);
            }
        }
        Ok(())
    }

    async fn users(&self) -> AppResult<()> {
        self.require_login()?;
        if !self.session.role().is_admin() {
            return Err(AppError::NotAdmin);
        }

        let users = bankagg_client::admin::list_users(&self.gateway).await?;
        if users.is_empty() {
            println!("No users.");
        }
        for user in &users {
            print_user(user);
        }
        Ok(())
    }

    async fn create_account(&self, payload: &str) -> AppResult<()> {
        self.require_login()?;
        if !self.session.role().is_admin() {
            return Err(AppError::NotAdmin);
        }

        let payload: Value = serde_json::from_str(payload)?;
        let created = bankagg_client::admin::create_account(&self.gateway, &payload).await?;
        println!("{}", serde_json::to_string_pretty(&created)?);
        Ok(())
    }

    fn require_login(&self) -> AppResult<()> {
        if self.session.token().is_none() {
            return Err(AppError::NotLoggedIn);
        }
        Ok(())
    }

    fn save_session(&self) -> AppResult<()> {
        std::fs::write(&self.config.session_file, self.session.to_json())?;
        Ok(())
    }
}

fn load_session(path: &str) -> AppResult<SessionStore> {
    match std::fs::read_to_string(path) {
        Ok(json) => Ok(SessionStore::from_json(&json)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(SessionStore::new()),
        Err(err) => Err(err.into()),
    }
}

fn validate_date(value: Option<String>) -> AppResult<Option<String>> {
    match value {
        Some(v) => {
            NaiveDate::parse_from_str(&v, "%Y-%m-%d").map_err(|_| AppError::InvalidDate(v.clone()))?;
            Ok(Some(v))
        }
        None => Ok(None),
    }
}

fn print_account(record: &AccountRecord) {
    println!(
        "{:<8} {:<20} {:<24} {:<14} balance: {}",
        record.id, record.full_name, record.email, record.account_number, record.balance
    );
}

fn print_transaction(record: &TransactionRecord) {
    println!(
        "{:<24} {:<10} {:>12}  acct {:<8} {}",
        record.date, record.kind, record.amount, record.account_id, record.description
    );
}

fn print_user(user: &UserSummary) {
    println!(
        "{:<8} {:<16} {:<24} {:<10} customer: {:<8} {}",
        user.user_id, user.username, user.email, user.role, user.customer_id, user.phone
    );
}
