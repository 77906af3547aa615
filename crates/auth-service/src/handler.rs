//! Authentication orchestrator

use std::sync::Arc;

use tracing::{error, warn};

use tracer_accounts_core::{
    hash_password, verify_password, AccountStore, CreateAccountRequest, Error as DirectoryError,
};
use tracer_auth_core::{parse_bearer, Role, TokenService};

use crate::providers::{AlumniProvider, RespondentProvider, VerificationOutcome};
use crate::types::{
    AccountResponse, LoginAlumniRequest, LoginLocalRequest, LoginRespondentRequest, LoginResponse,
    RegisterRequest,
};

/// Orchestrates the three login kinds, registration and the
/// current-identity lookup.
///
/// Stateless per invocation; every downstream call inherits the
/// caller's cancellation, and no retries are performed here.
pub struct AuthHandler {
    store: Arc<dyn AccountStore>,
    tokens: Arc<TokenService>,
    alumni: Arc<dyn AlumniProvider>,
    respondents: Arc<dyn RespondentProvider>,
}

impl AuthHandler {
    pub fn new(
        store: Arc<dyn AccountStore>,
        tokens: Arc<TokenService>,
        alumni: Arc<dyn AlumniProvider>,
        respondents: Arc<dyn RespondentProvider>,
    ) -> Self {
        Self {
            store,
            tokens,
            alumni,
            respondents,
        }
    }

    /// Verify an alumnus by national id and issue a token with the
    /// fixed alumnus role.
    pub async fn login_alumni(&self, request: LoginAlumniRequest) -> LoginResponse {
        match self.alumni.resolve(&request.national_id).await {
            VerificationOutcome::Verified { subject } => {
                self.issue_login(&subject, Role::Alumnus, "login success")
            }
            VerificationOutcome::NotFound => {
                warn!(national_id = %request.national_id, "login rejected: not an alumnus");
                LoginResponse::rejected(404, "is not an alumnus")
            }
            VerificationOutcome::ProviderError { code, message } => {
                error!(code, %message, "alumni provider error");
                LoginResponse::rejected(code, message)
            }
        }
    }

    /// Verify a survey respondent by supervisor contact details and
    /// issue a token with the fixed respondent role.
    ///
    /// On success the token subject is the contact email.
    pub async fn login_respondent(&self, request: LoginRespondentRequest) -> LoginResponse {
        let outcome = self
            .respondents
            .resolve(
                &request.supervisor_name,
                &request.supervisor_email,
                &request.supervisor_phone,
            )
            .await;

        match outcome {
            VerificationOutcome::Verified { subject } => {
                self.issue_login(&subject, Role::Respondent, "login user study success")
            }
            VerificationOutcome::NotFound => {
                warn!(email = %request.supervisor_email, "login rejected: user resource not found");
                LoginResponse::rejected(404, "user resource not found")
            }
            VerificationOutcome::ProviderError { code, message } => {
                error!(code, %message, "respondent provider error");
                LoginResponse::rejected(code, message)
            }
        }
    }

    /// Verify a local staff account by username and password.
    ///
    /// An unknown username is reported before any hash comparison is
    /// attempted; a credential mismatch is reported distinctly from a
    /// missing account.
    pub async fn login_local(&self, request: LoginLocalRequest) -> LoginResponse {
        let account = match self.store.find_by_username(&request.username).await {
            Ok(Some(account)) => account,
            Ok(None) => {
                warn!(username = %request.username, "login rejected: user not found");
                return LoginResponse::rejected(404, "user not found");
            }
            Err(e) => {
                error!(error = %e, "directory error during login");
                return LoginResponse::rejected(500, e.to_string());
            }
        };

        match verify_password(&request.password, &account.password_hash) {
            Ok(true) => {}
            Ok(false) => {
                warn!(username = %request.username, "login rejected: invalid credentials");
                return LoginResponse::rejected(400, "invalid credentials");
            }
            Err(e) => {
                error!(error = %e, "stored hash unreadable");
                return LoginResponse::rejected(500, e.to_string());
            }
        }

        let role = match Role::from_id(account.role_id) {
            Ok(role) => role,
            Err(e) => {
                error!(role_id = account.role_id, "account carries unknown role");
                return LoginResponse::rejected(500, e.to_string());
            }
        };

        self.issue_login(&account.username, role, "login user success")
    }

    /// Create a local staff account.
    pub async fn register(&self, request: RegisterRequest) -> AccountResponse {
        match self.store.find_by_username(&request.username).await {
            Ok(Some(_)) => {
                warn!(username = %request.username, "registration rejected: user already exists");
                return AccountResponse::rejected(409, "user already exists");
            }
            Ok(None) => {}
            Err(e) => {
                error!(error = %e, "directory error during registration");
                return AccountResponse::rejected(500, e.to_string());
            }
        }

        if Role::from_id(request.role_id).is_err() {
            return AccountResponse::rejected(400, format!("unknown role id: {}", request.role_id));
        }

        let password_hash = match hash_password(&request.password) {
            Ok(hash) => hash,
            Err(e) => {
                error!(error = %e, "password hashing failed");
                return AccountResponse::rejected(500, e.to_string());
            }
        };

        let created = self
            .store
            .create(CreateAccountRequest {
                name: request.name,
                username: request.username,
                email: request.email,
                password_hash,
                role_id: request.role_id,
            })
            .await;

        match created {
            Ok(account) => AccountResponse::success(201, "register user success", account.into()),
            Err(DirectoryError::AlreadyExists(_)) => {
                AccountResponse::rejected(409, "user already exists")
            }
            Err(e) => {
                error!(error = %e, "directory error while creating account");
                AccountResponse::rejected(500, e.to_string())
            }
        }
    }

    /// Resolve the calling identity from its bearer token.
    ///
    /// The header shape is validated before any token verification is
    /// attempted; the verified subject is then re-fetched from the
    /// directory so the caller sees the account as currently stored.
    pub async fn whoami(&self, authorization: Option<&str>) -> AccountResponse {
        let header = match authorization {
            Some(header) => header,
            None => {
                warn!("whoami rejected: no authorization header found");
                return AccountResponse::rejected(400, "no authorization header found");
            }
        };

        let token = match parse_bearer(header) {
            Ok(token) => token,
            Err(e) => {
                warn!("whoami rejected: invalid authorization header");
                return AccountResponse::rejected(e.code(), e.to_string());
            }
        };

        let claims = match self.tokens.verify(token) {
            Ok(claims) => claims,
            Err(e) => {
                warn!(error = %e, "whoami rejected: token verification failed");
                return AccountResponse::rejected(e.code(), "invalid token");
            }
        };

        match self.store.find_by_username(&claims.subject).await {
            Ok(Some(account)) => {
                AccountResponse::success(200, "get current user success", account.into())
            }
            Ok(None) => {
                warn!(subject = %claims.subject, "whoami: account no longer exists");
                AccountResponse::rejected(404, "user not found")
            }
            Err(e) => {
                error!(error = %e, "directory error during whoami");
                AccountResponse::rejected(500, e.to_string())
            }
        }
    }

    fn issue_login(&self, subject: &str, role: Role, message: &str) -> LoginResponse {
        match self.tokens.issue(subject, role) {
            Ok(token) => LoginResponse::success(message, token),
            Err(e) => {
                error!(error = %e, "token signing failed");
                LoginResponse::rejected(500, format!("token failed to generate: {}", e))
            }
        }
    }
}
