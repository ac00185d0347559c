//! Data types that are shared between the database layer and the public API.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Account numbers are drawn uniformly from `[0, MAX_ACCOUNT_NUMBER)`.
///
/// The number is the authorization subject that gets bound into access tokens. It is distinct from the
/// database id and never changes after the account has been created.
pub const MAX_ACCOUNT_NUMBER: i64 = 136_247_263_537_564_253;

/// Upper bound (exclusive) for the randomly assigned opening balance.
pub const MAX_OPENING_BALANCE: i64 = 100_000_000_000;

/// A stored account record. `id` is assigned by the store on insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlite", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub number: i64,
    pub balance: f64,
    pub created_at: DateTime<Utc>,
}

/// An account that has not been persisted yet. The account number, opening balance and creation
/// timestamp are assigned here; the id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    pub number: i64,
    pub balance: f64,
    pub created_at: DateTime<Utc>,
}

impl NewAccount {
    pub fn new<S1: Into<String>, S2: Into<String>>(first_name: S1, last_name: S2) -> Self {
        let mut rng = rand::thread_rng();
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            number: rng.gen_range(0..MAX_ACCOUNT_NUMBER),
            balance: rng.gen_range(0..MAX_OPENING_BALANCE) as f64,
            created_at: Utc::now(),
        }
    }
}
