//! # Auth-Service
//!
//! Authentication orchestration for the tracer study platform.
//!
//! Three populations authenticate through three trust paths:
//! - internal staff, against the local account directory
//! - alumni, against the external student-records provider
//! - survey respondents (alumni supervisors), against the external
//!   survey-tracking provider
//!
//! All three converge on one signed-token format carrying a subject and
//! a role. This crate wires the resolvers, the orchestrator, the
//! current-identity lookup and the role-gated JSON gateway together.

pub mod api;
pub mod config;
pub mod handler;
pub mod providers;
pub mod types;

pub use api::{default_policy, router, AppState};
pub use config::AppConfig;
pub use handler::AuthHandler;
pub use providers::{
    AlumniMode, AlumniProvider, HttpAlumniProvider, HttpRespondentProvider, RespondentProvider,
    VerificationOutcome,
};
