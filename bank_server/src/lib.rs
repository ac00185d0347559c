//! # Bank account server
//!
//! This crate hosts the HTTP layer of the bank account service. It is responsible for:
//! * Routing account CRUD requests to the account store.
//! * Issuing JWTs when accounts are created, and gating the per-account routes behind token
//!   validation plus a re-authorization check against the store.
//! * Rendering every handler failure as the uniform `{"error": ...}` JSON envelope.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more
//! information.
//!
//! ## Routes
//! * `GET /health`: liveness check.
//! * `GET|POST /account`: list accounts / create an account.
//! * `GET|DELETE /account/{id}`: fetch or delete one account. Protected: callers must present a JWT
//!   bound to the account's number in the `x-jwt-token` header.
//! * `POST /transfer`: accepts and echoes a transfer request. Deliberately inert.

pub mod auth;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod middleware;
pub mod routes;
pub mod server;
