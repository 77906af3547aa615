//! Access policy table and enforcement point

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::bearer::parse_bearer;
use crate::error::{AuthError, Result};
use crate::roles::Role;
use crate::token::{Claims, TokenService};

/// Builder for the nested `service -> method -> roles` policy table.
///
/// Flattened once at build time into direct `/{service}/{method}` route
/// lookups.
pub struct PolicyBuilder {
    base_path: String,
    entries: Vec<(String, String, Vec<Role>)>,
}

impl PolicyBuilder {
    /// `base_path` is the deployment package prefix, e.g. `tracer_study_grpc`.
    pub fn new(base_path: &str) -> Self {
        Self {
            base_path: base_path.to_string(),
            entries: Vec::new(),
        }
    }

    /// Allow `roles` to invoke `service`/`method`.
    pub fn method(mut self, service: &str, method: &str, roles: &[Role]) -> Self {
        self.entries
            .push((service.to_string(), method.to_string(), roles.to_vec()));
        self
    }

    pub fn build(self) -> AccessPolicy {
        let mut routes = HashMap::new();
        for (service, method, roles) in self.entries {
            let route = format!("/{}.{}/{}", self.base_path, service, method);
            routes.insert(route, roles);
        }
        AccessPolicy { routes }
    }
}

/// Immutable route-to-allowed-roles table.
///
/// Built once at process start; read-only thereafter, so concurrent
/// reads need no synchronization.
pub struct AccessPolicy {
    routes: HashMap<String, Vec<Role>>,
}

impl AccessPolicy {
    /// Roles allowed to invoke `route`, or `None` when the route has no
    /// policy entry (unlisted methods are open by default).
    pub fn allowed(&self, route: &str) -> Option<&[Role]> {
        self.routes.get(route).map(|r| r.as_slice())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }
}

/// Enforcement point applied to every inbound call.
pub struct Enforcer {
    tokens: Arc<TokenService>,
    policy: Arc<AccessPolicy>,
}

impl Enforcer {
    pub fn new(tokens: Arc<TokenService>, policy: Arc<AccessPolicy>) -> Self {
        Self { tokens, policy }
    }

    /// Check whether the call carried by `authorization` may invoke
    /// `route`.
    ///
    /// Routes absent from the policy table pass without a role check and
    /// yield `Ok(None)`. For listed routes the bearer token is extracted
    /// and verified, and the caller's role must be in the allowed set;
    /// the verified claims are returned so handlers need not re-verify.
    pub fn check(&self, route: &str, authorization: Option<&str>) -> Result<Option<Claims>> {
        let allowed = match self.policy.allowed(route) {
            Some(allowed) => allowed,
            None => {
                debug!(route, "no policy entry, skipping role check");
                return Ok(None);
            }
        };

        let header = authorization.ok_or_else(|| {
            warn!(route, "rejected call without authorization token");
            AuthError::InvalidToken("authorization token is not provided".to_string())
        })?;

        let token = parse_bearer(header)?;
        let claims = self.tokens.verify(token)?;

        if !allowed.contains(&claims.role) {
            warn!(route, role = claims.role.id(), "rejected call by role");
            return Err(AuthError::PermissionDenied(format!(
                "role is not allowed to access {}",
                route
            )));
        }

        Ok(Some(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattens_routes_with_base_path() {
        let policy = PolicyBuilder::new("tracer_study_grpc")
            .method("AuthService", "RegisterUser", &[Role::SuperAdmin, Role::Admin])
            .method("AuthService", "GetCurrentUser", &Role::ALL)
            .build();

        assert_eq!(policy.len(), 2);
        assert_eq!(
            policy.allowed("/tracer_study_grpc.AuthService/RegisterUser"),
            Some(&[Role::SuperAdmin, Role::Admin][..])
        );
        assert!(policy.allowed("/tracer_study_grpc.AuthService/LoginUser").is_none());
    }
}
