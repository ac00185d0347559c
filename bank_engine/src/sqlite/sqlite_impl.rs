//! `SqliteDatabase` is a concrete implementation of the bank account store.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements the [`AccountManagement`] trait.
use std::fmt::Debug;

use log::debug;
use sqlx::SqlitePool;

use super::db::{accounts, new_pool};
use crate::{
    db_types::{Account, NewAccount},
    traits::{AccountApiError, AccountManagement},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Creates a new connection pool for the given URL and bootstraps the account table.
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, AccountApiError> {
        let pool = new_pool(url, max_connections).await?;
        let mut conn = pool.acquire().await?;
        accounts::create_accounts_table(&mut conn).await?;
        debug!("🗃️ Account table is ready at {url}");
        Ok(Self { url: url.to_string(), pool })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }
}

impl AccountManagement for SqliteDatabase {
    async fn create_account(&self, account: &NewAccount) -> Result<Account, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        accounts::insert_account(account, &mut conn).await
    }

    async fn fetch_accounts(&self) -> Result<Vec<Account>, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        accounts::fetch_accounts(&mut conn).await
    }

    async fn fetch_account_by_id(&self, id: i64) -> Result<Option<Account>, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        accounts::account_by_id(id, &mut conn).await
    }

    async fn delete_account(&self, id: i64) -> Result<(), AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        accounts::delete_account(id, &mut conn).await
    }

    async fn update_account(&self, account: &Account) -> Result<(), AccountApiError> {
        // There is no update path in the service. Fail loudly rather than pretend the write happened.
        Err(AccountApiError::NotSupported(format!("account {} cannot be updated", account.id)))
    }
}
