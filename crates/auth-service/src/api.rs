//! JSON gateway and enforcement middleware

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use tracer_auth_core::{AccessPolicy, Enforcer, PolicyBuilder, Role};

use crate::handler::AuthHandler;
use crate::types::{
    ErrorResponse, LoginAlumniRequest, LoginLocalRequest, LoginRespondentRequest, RegisterRequest,
};

/// Deployment package prefix used in policy-table route keys.
pub const BASE_PATH: &str = "tracer_study_grpc";

pub const LOGIN_ALUMNI: &str = "/tracer_study_grpc.AuthService/LoginAlumni";
pub const LOGIN_RESPONDENT: &str = "/tracer_study_grpc.AuthService/LoginUserStudy";
pub const LOGIN_LOCAL: &str = "/tracer_study_grpc.AuthService/LoginUser";
pub const REGISTER: &str = "/tracer_study_grpc.AuthService/RegisterUser";
pub const CURRENT_USER: &str = "/tracer_study_grpc.AuthService/GetCurrentUser";

/// The static access policy table.
///
/// Login routes are deliberately unlisted: callers have no token yet.
/// Unlisted routes are open by default; see DESIGN.md before closing
/// that, since it changes authorization semantics for every route added
/// later.
pub fn default_policy() -> AccessPolicy {
    PolicyBuilder::new(BASE_PATH)
        .method("AuthService", "RegisterUser", &[Role::SuperAdmin, Role::Admin])
        .method("AuthService", "GetCurrentUser", &Role::ALL)
        .build()
}

#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<AuthHandler>,
    pub enforcer: Arc<Enforcer>,
}

/// Build the gateway router with the enforcement middleware applied to
/// every route.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(LOGIN_ALUMNI, post(login_alumni))
        .route(LOGIN_RESPONDENT, post(login_respondent))
        .route(LOGIN_LOCAL, post(login_local))
        .route(REGISTER, post(register))
        .route(CURRENT_USER, post(current_user))
        .layer(middleware::from_fn_with_state(state.clone(), enforce))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Enforcement point: intercepts every inbound call and applies the
/// policy table before the handler runs.
async fn enforce(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let route = request.uri().path().to_string();
    let authorization = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    match state.enforcer.check(&route, authorization.as_deref()) {
        Ok(_) => next.run(request).await,
        Err(e) => {
            let body = ErrorResponse {
                code: e.code(),
                message: e.to_string(),
            };
            (status_from(body.code), Json(body)).into_response()
        }
    }
}

async fn login_alumni(
    State(state): State<AppState>,
    Json(request): Json<LoginAlumniRequest>,
) -> Response {
    let response = state.handler.login_alumni(request).await;
    (status_from(response.code), Json(response)).into_response()
}

async fn login_respondent(
    State(state): State<AppState>,
    Json(request): Json<LoginRespondentRequest>,
) -> Response {
    let response = state.handler.login_respondent(request).await;
    (status_from(response.code), Json(response)).into_response()
}

async fn login_local(
    State(state): State<AppState>,
    Json(request): Json<LoginLocalRequest>,
) -> Response {
    let response = state.handler.login_local(request).await;
    (status_from(response.code), Json(response)).into_response()
}

async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Response {
    let response = state.handler.register(request).await;
    (status_from(response.code), Json(response)).into_response()
}

async fn current_user(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let response = state.handler.whoami(authorization).await;
    (status_from(response.code), Json(response)).into_response()
}

fn status_from(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}
