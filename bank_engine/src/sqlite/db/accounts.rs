use log::trace;
use sqlx::SqliteConnection;

use crate::{
    db_types::{Account, NewAccount},
    traits::AccountApiError,
};

/// Bootstraps the account table. Runs on every startup; a no-op if the table already exists.
///
/// The UNIQUE constraint on `number` is what makes the duplicate-number retry loop in the account API
/// sound.
pub async fn create_accounts_table(conn: &mut SqliteConnection) -> Result<(), AccountApiError> {
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS accounts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            number INTEGER NOT NULL UNIQUE,
            balance REAL NOT NULL,
            created_at TIMESTAMP NOT NULL
        )"#,
    )
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn insert_account(account: &NewAccount, conn: &mut SqliteConnection) -> Result<Account, AccountApiError> {
    trace!("🗃️ Inserting account for {} {}", account.first_name, account.last_name);
    let inserted = sqlx::query_as::<_, Account>(
        r#"INSERT INTO accounts (first_name, last_name, number, balance, created_at)
           VALUES ($1, $2, $3, $4, $5)
           RETURNING id, first_name, last_name, number, balance, created_at"#,
    )
    .bind(&account.first_name)
    .bind(&account.last_name)
    .bind(account.number)
    .bind(account.balance)
    .bind(account.created_at)
    .fetch_one(conn)
    .await?;
    Ok(inserted)
}

pub async fn fetch_accounts(conn: &mut SqliteConnection) -> Result<Vec<Account>, AccountApiError> {
    let accounts = sqlx::query_as::<_, Account>(
        "SELECT id, first_name, last_name, number, balance, created_at FROM accounts ORDER BY id",
    )
    .fetch_all(conn)
    .await?;
    Ok(accounts)
}

pub async fn account_by_id(id: i64, conn: &mut SqliteConnection) -> Result<Option<Account>, AccountApiError> {
    trace!("🗃️ Fetching account [{id}]");
    let result = sqlx::query_as::<_, Account>(
        "SELECT id, first_name, last_name, number, balance, created_at FROM accounts WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;
    Ok(result)
}

pub async fn delete_account(id: i64, conn: &mut SqliteConnection) -> Result<(), AccountApiError> {
    let result = sqlx::query("DELETE FROM accounts WHERE id = $1").bind(id).execute(conn).await?;
    if result.rows_affected() == 0 {
        return Err(AccountApiError::AccountNotFound(id));
    }
    Ok(())
}
