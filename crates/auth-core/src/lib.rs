//! # Auth-Core
//!
//! Token issuance, verification and role-based access control for the
//! tracer study platform.
//!
//! This crate provides:
//! - Signed, expiring identity tokens carrying a subject and a role
//! - The fixed role enumeration used across the platform
//! - A static access policy table keyed by `/{service}/{method}` routes
//! - An enforcement point that gates inbound calls by token role
//!
//! ## Architecture
//!
//! Auth-core is transport-free: it never touches the wire. The hosting
//! service extracts the `authorization` metadata value and the invoked
//! route, and hands both to [`Enforcer::check`].

pub mod bearer;
pub mod error;
pub mod rbac;
pub mod roles;
pub mod token;

pub use bearer::parse_bearer;
pub use error::{AuthError, Result};
pub use rbac::{AccessPolicy, Enforcer, PolicyBuilder};
pub use roles::Role;
pub use token::{Claims, TokenConfig, TokenService};
