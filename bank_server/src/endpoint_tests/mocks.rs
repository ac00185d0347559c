use bank_engine::{
    db_types::{Account, NewAccount},
    traits::{AccountApiError, AccountManagement},
};
use chrono::Utc;
use mockall::mock;

mock! {
    pub AccountManager {}
    impl AccountManagement for AccountManager {
        async fn create_account(&self, account: &NewAccount) -> Result<Account, AccountApiError>;
        async fn fetch_accounts(&self) -> Result<Vec<Account>, AccountApiError>;
        async fn fetch_account_by_id(&self, id: i64) -> Result<Option<Account>, AccountApiError>;
        async fn delete_account(&self, id: i64) -> Result<(), AccountApiError>;
        async fn update_account(&self, account: &Account) -> Result<(), AccountApiError>;
    }
}

pub fn sample_account(id: i64, number: i64) -> Account {
    Account {
        id,
        first_name: "Alice".to_string(),
        last_name: "Aardvark".to_string(),
        number,
        balance: 4200.0,
        created_at: Utc::now(),
    }
}
