//! The traits that a storage backend must implement to act as a store for the bank server.

mod account_management;

pub use account_management::{AccountApiError, AccountManagement};
