//! Respondent identity resolver

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::error;

use super::alumni::provider_error;
use super::{RespondentProvider, VerificationOutcome};

#[derive(Debug, Serialize)]
struct LookupRequest<'a> {
    supervisor_name: &'a str,
    supervisor_email: &'a str,
    supervisor_phone: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    subjects: Vec<String>,
    error: Option<LookupFault>,
}

#[derive(Debug, Deserialize)]
struct LookupFault {
    code: Option<u16>,
    message: String,
}

/// HTTP client for the survey-tracking provider.
pub struct HttpRespondentProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRespondentProvider {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

/// Apply the candidate/error precedence rule.
///
/// Some deployments of the provider return partial errors alongside
/// valid data; a non-empty candidate set always wins over a reported
/// error. The resolved ids are only an existence check: the canonical
/// subject is the supervisor's contact email.
fn lookup_outcome(lookup: LookupResponse, status: u16, email: &str) -> VerificationOutcome {
    if !lookup.subjects.is_empty() {
        return VerificationOutcome::Verified {
            subject: email.to_string(),
        };
    }

    if let Some(fault) = lookup.error {
        return VerificationOutcome::ProviderError {
            code: fault.code.unwrap_or(status),
            message: fault.message,
        };
    }

    if !(200..300).contains(&status) {
        return VerificationOutcome::ProviderError {
            code: status,
            message: format!("provider returned status {}", status),
        };
    }

    VerificationOutcome::NotFound
}

#[async_trait]
impl RespondentProvider for HttpRespondentProvider {
    async fn resolve(&self, name: &str, email: &str, phone: &str) -> VerificationOutcome {
        let url = format!("{}/v1/respondents/lookup", self.base_url);
        let request = LookupRequest {
            supervisor_name: name,
            supervisor_email: email,
            supervisor_phone: phone,
        };

        let response = match self.client.post(&url).json(&request).send().await {
            Ok(response) => response,
            Err(e) => {
                error!(url, error = %e, "respondent provider unreachable");
                return VerificationOutcome::ProviderError {
                    code: 500,
                    message: format!("respondent provider unreachable: {}", e),
                };
            }
        };

        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return VerificationOutcome::ProviderError {
                    code: 500,
                    message: format!("respondent provider response unreadable: {}", e),
                }
            }
        };

        // Even error responses may carry a usable candidate set, so the
        // body is parsed before the status is judged.
        match serde_json::from_str::<LookupResponse>(&body) {
            Ok(lookup) => lookup_outcome(lookup, status, email),
            Err(_) => provider_error(status, &body),
        }
    }
}
