//! Token service behavior tests

use tracer_auth_core::{AuthError, Role, TokenConfig, TokenService};

fn service_with_ttl(ttl_seconds: u64) -> TokenService {
    TokenService::new(TokenConfig {
        secret: "integration-test-secret".to_string(),
        ttl_seconds,
    })
    .unwrap()
}

#[test]
fn round_trip_preserves_subject_and_role() {
    let svc = service_with_ttl(60);

    for role in Role::ALL {
        let token = svc.issue("1906123456", role).unwrap();
        let claims = svc.verify(&token).unwrap();
        assert_eq!(claims.subject, "1906123456");
        assert_eq!(claims.role, role);
    }
}

#[test]
fn expired_token_fails_with_expired_not_invalid() {
    let svc = service_with_ttl(1);
    let token = svc.issue("alice", Role::Alumnus).unwrap();

    std::thread::sleep(std::time::Duration::from_secs(2));

    match svc.verify(&token) {
        Err(AuthError::TokenExpired) => {}
        other => panic!("expected TokenExpired, got {:?}", other.map(|c| c.subject)),
    }
}

#[test]
fn token_at_its_exact_expiry_instant_is_already_expired() {
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
    use serde::Serialize;

    #[derive(Serialize)]
    struct RawClaims {
        sub: String,
        role: u32,
        iat: u64,
        exp: u64,
        jti: String,
    }

    // exp == now: the strict boundary treats this as expired.
    let now = chrono::Utc::now().timestamp() as u64;
    let claims = RawClaims {
        sub: "alice".to_string(),
        role: 6,
        iat: now - 60,
        exp: now,
        jti: "test".to_string(),
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(b"integration-test-secret"),
    )
    .unwrap();

    let svc = service_with_ttl(60);
    assert!(matches!(svc.verify(&token), Err(AuthError::TokenExpired)));
}

#[test]
fn tampered_token_fails_with_invalid_token() {
    let svc = service_with_ttl(60);
    let token = svc.issue("alice", Role::Alumnus).unwrap();

    // Flip the last character of the signature segment.
    let mut tampered = token.clone();
    let last = tampered.pop().unwrap();
    tampered.push(if last == 'A' { 'B' } else { 'A' });

    match svc.verify(&tampered) {
        Err(AuthError::InvalidToken(_)) => {}
        other => panic!("expected InvalidToken, got {:?}", other.map(|c| c.subject)),
    }
}

#[test]
fn garbage_input_fails_with_invalid_token() {
    let svc = service_with_ttl(60);

    for garbled in ["", "not-a-token", "a.b", "a.b.c.d"] {
        assert!(matches!(
            svc.verify(garbled),
            Err(AuthError::InvalidToken(_))
        ));
    }
}

#[test]
fn token_signed_with_other_secret_is_rejected() {
    let svc = service_with_ttl(60);
    let other = TokenService::new(TokenConfig {
        secret: "some-other-secret".to_string(),
        ttl_seconds: 60,
    })
    .unwrap();

    let token = other.issue("alice", Role::Admin).unwrap();
    assert!(matches!(svc.verify(&token), Err(AuthError::InvalidToken(_))));
}

#[test]
fn unsupported_algorithm_is_rejected() {
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
    use serde::Serialize;

    #[derive(Serialize)]
    struct RawClaims {
        sub: String,
        role: u32,
        iat: u64,
        exp: u64,
        jti: String,
    }

    let now = chrono::Utc::now().timestamp() as u64;
    let claims = RawClaims {
        sub: "alice".to_string(),
        role: 2,
        iat: now,
        exp: now + 60,
        jti: "test".to_string(),
    };

    // Same secret, different algorithm.
    let token = encode(
        &Header::new(Algorithm::HS384),
        &claims,
        &EncodingKey::from_secret(b"integration-test-secret"),
    )
    .unwrap();

    let svc = service_with_ttl(60);
    assert!(matches!(svc.verify(&token), Err(AuthError::InvalidToken(_))));
}

#[test]
fn token_with_unknown_role_id_is_rejected() {
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
    use serde::Serialize;

    #[derive(Serialize)]
    struct RawClaims {
        sub: String,
        role: u32,
        iat: u64,
        exp: u64,
        jti: String,
    }

    let now = chrono::Utc::now().timestamp() as u64;
    let claims = RawClaims {
        sub: "alice".to_string(),
        role: 42,
        iat: now,
        exp: now + 60,
        jti: "test".to_string(),
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(b"integration-test-secret"),
    )
    .unwrap();

    let svc = service_with_ttl(60);
    assert!(matches!(svc.verify(&token), Err(AuthError::InvalidToken(_))));
}
