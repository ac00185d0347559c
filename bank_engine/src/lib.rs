//! Bank account engine
//!
//! This library contains the persistence and domain logic for the bank account service. It is split into
//! two main sections:
//! 1. Database management and control ([`mod@sqlite`]). SQLite is currently the only supported backend.
//!    You should never need to access the database directly; use the [`AccountApi`] instead. The
//!    exception is the data types stored in the database, which are defined in [`db_types`] and are
//!    public.
//! 2. The store abstraction ([`traits`]). Specific backends implement [`AccountManagement`] in order to
//!    act as a store for the bank server, and anything implementing the trait (including test mocks) can
//!    be driven through [`AccountApi`].
pub mod db_types;
pub mod traits;

mod accounts_api;
#[cfg(feature = "sqlite")]
mod sqlite;

pub use accounts_api::AccountApi;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;
pub use traits::{AccountApiError, AccountManagement};
