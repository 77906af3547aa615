//! # Accounts-Core
//!
//! Account directory for the tracer study platform.
//!
//! This crate provides:
//! - The [`Account`] record and its request types
//! - The [`AccountStore`] trait and a SQLite implementation
//! - Argon2 password hashing and verification
//!
//! The directory only stores local staff accounts; alumni and survey
//! respondents authenticate against external providers and never appear
//! here.

pub mod error;
pub mod password;
pub mod store;
pub mod types;

pub use error::{Error, Result};
pub use password::{hash_password, verify_password};
pub use store::{AccountStore, SqliteAccountStore};
pub use types::{Account, CreateAccountRequest, UpdateAccountRequest};
