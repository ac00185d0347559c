//! Unified API for accessing accounts.

use std::fmt::Debug;

use log::warn;

use crate::{
    db_types::{Account, NewAccount},
    traits::{AccountApiError, AccountManagement},
};

/// How many fresh account numbers to try before giving up on a creation request. Collisions are
/// vanishingly rare at realistic scale, so hitting this limit points at a broken RNG or a full table.
const MAX_CREATE_ATTEMPTS: usize = 3;

/// The `AccountApi` provides a unified API for accessing accounts, independent of the storage backend.
#[derive(Clone)]
pub struct AccountApi<B> {
    db: B,
}

impl<B: Debug> Debug for AccountApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AccountApi ({:?})", self.db)
    }
}

impl<B> AccountApi<B>
where B: AccountManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Creates a new account for the given holder name, assigning a fresh random account number,
    /// opening balance and creation timestamp.
    ///
    /// Account numbers are unique. If the store reports a collision, a new number is generated and the
    /// insertion retried a bounded number of times.
    pub async fn create_account(&self, first_name: &str, last_name: &str) -> Result<Account, AccountApiError> {
        for attempt in 1..=MAX_CREATE_ATTEMPTS {
            let new_account = NewAccount::new(first_name, last_name);
            match self.db.create_account(&new_account).await {
                Err(AccountApiError::DuplicateNumber) => {
                    warn!("🏦️ Account number {} is already in use (attempt {attempt}). Retrying.", new_account.number);
                },
                other => return other,
            }
        }
        Err(AccountApiError::DuplicateNumber)
    }

    /// Fetches every account in the store.
    pub async fn fetch_accounts(&self) -> Result<Vec<Account>, AccountApiError> {
        self.db.fetch_accounts().await
    }

    /// Fetches the account for the given account id. If no account exists, `None` is returned.
    pub async fn account_by_id(&self, id: i64) -> Result<Option<Account>, AccountApiError> {
        self.db.fetch_account_by_id(id).await
    }

    /// Deletes the account with the given id, failing with [`AccountApiError::AccountNotFound`] if it
    /// does not exist.
    pub async fn delete_account(&self, id: i64) -> Result<(), AccountApiError> {
        self.db.delete_account(id).await
    }
}
