//! Auth service entry point

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use tracer_accounts_core::SqliteAccountStore;
use tracer_auth_core::{Enforcer, TokenService};
use tracer_auth_service::{
    default_policy, router, AppConfig, AppState, AuthHandler, HttpAlumniProvider,
    HttpRespondentProvider,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load()?;

    let store = Arc::new(SqliteAccountStore::new(&config.database.url).await?);
    let tokens = Arc::new(TokenService::new(config.token.clone())?);
    let policy = Arc::new(default_policy());
    let enforcer = Arc::new(Enforcer::new(tokens.clone(), policy));

    let alumni = Arc::new(HttpAlumniProvider::new(
        &config.providers.alumni.base_url,
        config.providers.alumni.mode,
    ));
    let respondents = Arc::new(HttpRespondentProvider::new(
        &config.providers.respondent.base_url,
    ));

    let handler = Arc::new(AuthHandler::new(store, tokens, alumni, respondents));
    let app = router(AppState { handler, enforcer });

    let listener = tokio::net::TcpListener::bind(&config.http.bind_address).await?;
    info!(address = %config.http.bind_address, "auth service listening");
    axum::serve(listener, app).await?;

    Ok(())
}
