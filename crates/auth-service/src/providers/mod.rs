//! Identity resolvers for the external verification providers

use async_trait::async_trait;

pub mod alumni;
pub mod respondent;

pub use alumni::{AlumniMode, HttpAlumniProvider};
pub use respondent::HttpRespondentProvider;

/// Outcome of a single verification attempt.
///
/// Transient and in-memory only; consumed immediately by the
/// orchestrator and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// Identity verified; `subject` is the canonical identity string to
    /// embed in the issued token.
    Verified { subject: String },
    /// The provider answered, and the identity does not exist. A
    /// legitimate business outcome, not a fault.
    NotFound,
    /// The provider itself failed; its own classification is preserved
    /// verbatim.
    ProviderError { code: u16, message: String },
}

/// Resolves an alumnus by national id against the student-records
/// provider.
#[async_trait]
pub trait AlumniProvider: Send + Sync {
    async fn resolve(&self, national_id: &str) -> VerificationOutcome;
}

/// Resolves a survey respondent from supervisor contact details against
/// the survey-tracking provider.
///
/// On success the canonical subject is the contact email; the resolved
/// candidate ids are used purely as an existence check.
#[async_trait]
pub trait RespondentProvider: Send + Sync {
    async fn resolve(&self, name: &str, email: &str, phone: &str) -> VerificationOutcome;
}
