use thiserror::Error;

use crate::db_types::{Account, NewAccount};

#[derive(Debug, Clone, Error)]
pub enum AccountApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Account id:{0} not found")]
    AccountNotFound(i64),
    #[error("The generated account number is already in use")]
    DuplicateNumber,
    #[error("Operation is not supported: {0}")]
    NotSupported(String),
}

impl From<sqlx::Error> for AccountApiError {
    fn from(e: sqlx::Error) -> Self {
        if e.as_database_error().map(|de| de.is_unique_violation()).unwrap_or(false) {
            AccountApiError::DuplicateNumber
        } else {
            AccountApiError::DatabaseError(e.to_string())
        }
    }
}

/// The `AccountManagement` trait defines the behaviour of the account store.
///
/// An account is a single identity record keyed by an integer id, with a randomly assigned account
/// number that acts as the authorization subject for the protected routes. The trait is deliberately
/// narrow; it maps one-to-one onto the operations the server needs, so that test mocks can stand in for
/// the real database without ceremony.
#[allow(async_fn_in_trait)]
pub trait AccountManagement {
    /// Inserts a new account and returns the stored record, including the id the store assigned.
    /// Fails with [`AccountApiError::DuplicateNumber`] if the generated account number is taken.
    async fn create_account(&self, account: &NewAccount) -> Result<Account, AccountApiError>;

    /// Fetches every account in the store.
    async fn fetch_accounts(&self) -> Result<Vec<Account>, AccountApiError>;

    /// Fetches the account with the given id. If no account exists, `None` is returned.
    async fn fetch_account_by_id(&self, id: i64) -> Result<Option<Account>, AccountApiError>;

    /// Deletes the account with the given id. Fails with [`AccountApiError::AccountNotFound`] if there
    /// was nothing to delete.
    async fn delete_account(&self, id: i64) -> Result<(), AccountApiError>;

    /// Updates an existing account record. No backend currently supports this; it is part of the store
    /// boundary so that backends can opt in without the trait changing under them.
    async fn update_account(&self, account: &Account) -> Result<(), AccountApiError>;
}
