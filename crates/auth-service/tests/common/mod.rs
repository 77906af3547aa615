//! Shared test doubles for the orchestrator and gateway tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use tracer_accounts_core::{
    hash_password, Account, AccountStore, CreateAccountRequest, Error, Result,
    UpdateAccountRequest,
};
use tracer_auth_service::{AlumniProvider, RespondentProvider, VerificationOutcome};

/// In-memory account directory that counts writes.
pub struct MemoryAccountStore {
    accounts: Mutex<HashMap<String, Account>>,
    pub create_calls: AtomicUsize,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
            create_calls: AtomicUsize::new(0),
        }
    }

    /// Seed an account with a real Argon2 hash for `password`.
    pub fn with_account(self, name: &str, username: &str, password: &str, role_id: u32) -> Self {
        let now = chrono::Utc::now();
        let account = Account {
            id: Account::new_id(),
            name: name.to_string(),
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password_hash: hash_password(password).unwrap(),
            role_id,
            created_at: now,
            updated_at: now,
        };
        self.accounts
            .lock()
            .unwrap()
            .insert(username.to_string(), account);
        self
    }

    pub fn writes(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Direct access to the backing map, for corrupting state in tests.
    pub fn accounts_for_test(&self) -> std::sync::MutexGuard<'_, HashMap<String, Account>> {
        self.accounts.lock().unwrap()
    }

    /// Synchronous lookup helper for assertions.
    pub fn find_by_username_for_test(&self, username: &str) -> Option<Account> {
        self.accounts.lock().unwrap().get(username).cloned()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Account>> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.values().find(|a| a.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>> {
        Ok(self.accounts.lock().unwrap().get(username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    async fn create(&self, request: CreateAccountRequest) -> Result<Account> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);

        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(&request.username) {
            return Err(Error::AlreadyExists(request.username));
        }

        let now = chrono::Utc::now();
        let account = Account {
            id: Account::new_id(),
            name: request.name,
            username: request.username.clone(),
            email: request.email,
            password_hash: request.password_hash,
            role_id: request.role_id,
            created_at: now,
            updated_at: now,
        };
        accounts.insert(request.username, account.clone());
        Ok(account)
    }

    async fn update(&self, id: &str, _request: UpdateAccountRequest) -> Result<Account> {
        Err(Error::NotFound(id.to_string()))
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut accounts = self.accounts.lock().unwrap();
        let username = accounts
            .values()
            .find(|a| a.id == id)
            .map(|a| a.username.clone())
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        accounts.remove(&username);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Account>> {
        Ok(self.accounts.lock().unwrap().values().cloned().collect())
    }
}

/// Account directory whose every call fails, for surfacing directory
/// errors verbatim.
pub struct FailingAccountStore;

#[async_trait]
impl AccountStore for FailingAccountStore {
    async fn find_by_id(&self, _id: &str) -> Result<Option<Account>> {
        Err(Error::Database(sqlx::Error::PoolClosed))
    }
    async fn find_by_username(&self, _username: &str) -> Result<Option<Account>> {
        Err(Error::Database(sqlx::Error::PoolClosed))
    }
    async fn find_by_email(&self, _email: &str) -> Result<Option<Account>> {
        Err(Error::Database(sqlx::Error::PoolClosed))
    }
    async fn create(&self, _request: CreateAccountRequest) -> Result<Account> {
        Err(Error::Database(sqlx::Error::PoolClosed))
    }
    async fn update(&self, id: &str, _request: UpdateAccountRequest) -> Result<Account> {
        Err(Error::NotFound(id.to_string()))
    }
    async fn delete(&self, _id: &str) -> Result<()> {
        Err(Error::Database(sqlx::Error::PoolClosed))
    }
    async fn list(&self) -> Result<Vec<Account>> {
        Err(Error::Database(sqlx::Error::PoolClosed))
    }
}

/// Alumni provider returning a preset outcome.
pub struct FixedAlumniProvider(pub VerificationOutcome);

#[async_trait]
impl AlumniProvider for FixedAlumniProvider {
    async fn resolve(&self, _national_id: &str) -> VerificationOutcome {
        self.0.clone()
    }
}

/// Respondent provider returning a preset outcome.
pub struct FixedRespondentProvider(pub VerificationOutcome);

#[async_trait]
impl RespondentProvider for FixedRespondentProvider {
    async fn resolve(&self, _name: &str, _email: &str, _phone: &str) -> VerificationOutcome {
        self.0.clone()
    }
}
