//! SQLite database module for the bank account engine.

mod sqlite_impl;

pub mod db;
pub use sqlite_impl::SqliteDatabase;
