//! Alumni identity resolver

use async_trait::async_trait;
use serde::Deserialize;
use tracing::error;

use super::{AlumniProvider, VerificationOutcome};

/// Which response shape the deployed student-records provider speaks.
///
/// Both exist in the field behind the same login flow: older
/// deployments answer a bare is-alumnus check, newer ones return the
/// full biodata record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlumniMode {
    /// Boolean alumni check; the caller-supplied national id becomes
    /// the token subject.
    Check,
    /// Full profile lookup; the profile's own national id field becomes
    /// the token subject, guarding against typos echoed back.
    Profile,
}

#[derive(Debug, Deserialize)]
struct CheckResponse {
    is_alumnus: bool,
}

#[derive(Debug, Deserialize)]
struct ProfileResponse {
    data: Option<AlumniProfile>,
}

#[derive(Debug, Deserialize)]
struct AlumniProfile {
    national_id: String,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    code: Option<u16>,
    message: Option<String>,
}

/// HTTP client for the student-records provider.
pub struct HttpAlumniProvider {
    client: reqwest::Client,
    base_url: String,
    mode: AlumniMode,
}

impl HttpAlumniProvider {
    pub fn new(base_url: &str, mode: AlumniMode) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            mode,
        }
    }

    async fn fetch(&self, url: &str) -> Result<reqwest::Response, VerificationOutcome> {
        match self.client.get(url).send().await {
            Ok(response) => Ok(response),
            Err(e) => {
                error!(url, error = %e, "alumni provider unreachable");
                Err(VerificationOutcome::ProviderError {
                    code: 500,
                    message: format!("alumni provider unreachable: {}", e),
                })
            }
        }
    }
}

#[async_trait]
impl AlumniProvider for HttpAlumniProvider {
    async fn resolve(&self, national_id: &str) -> VerificationOutcome {
        let path = match self.mode {
            AlumniMode::Check => "check",
            AlumniMode::Profile => "biodata",
        };
        let url = format!("{}/v1/alumni/{}/{}", self.base_url, national_id, path);

        let response = match self.fetch(&url).await {
            Ok(response) => response,
            Err(outcome) => return outcome,
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return VerificationOutcome::ProviderError {
                    code: 500,
                    message: format!("alumni provider response unreadable: {}", e),
                }
            }
        };

        if !status.is_success() {
            return provider_error(status.as_u16(), &body);
        }

        match self.mode {
            AlumniMode::Check => match serde_json::from_str::<CheckResponse>(&body) {
                Ok(check) if check.is_alumnus => VerificationOutcome::Verified {
                    subject: national_id.to_string(),
                },
                Ok(_) => VerificationOutcome::NotFound,
                Err(e) => VerificationOutcome::ProviderError {
                    code: 500,
                    message: format!("malformed alumni check response: {}", e),
                },
            },
            AlumniMode::Profile => match serde_json::from_str::<ProfileResponse>(&body) {
                Ok(profile) => match profile.data {
                    // The provider-echoed id is canonical, not the
                    // caller-supplied one.
                    Some(data) => VerificationOutcome::Verified {
                        subject: data.national_id,
                    },
                    None => VerificationOutcome::NotFound,
                },
                Err(e) => VerificationOutcome::ProviderError {
                    code: 500,
                    message: format!("malformed alumni profile response: {}", e),
                },
            },
        }
    }
}

/// Preserve the provider's own error classification when it sent one.
pub(crate) fn provider_error(status: u16, body: &str) -> VerificationOutcome {
    if let Ok(parsed) = serde_json::from_str::<ProviderErrorBody>(body) {
        if let Some(message) = parsed.message {
            return VerificationOutcome::ProviderError {
                code: parsed.code.unwrap_or(status),
                message,
            };
        }
    }
    VerificationOutcome::ProviderError {
        code: status,
        message: format!("provider returned status {}", status),
    }
}
