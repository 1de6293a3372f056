//! Test helpers for creating in-memory test databases and signed tokens

use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde_json::{Value, json};
use sqlx::sqlite::SqlitePoolOptions;

use crate::db::DbPool;
use crate::services::{AuthService, Jwk, JwkSet, StaticKeys};

pub const TEST_KID: &str = "casting-test-key";
pub const TEST_AUDIENCE: &str = "http://dev-csu-ji77.us.com/api/v3";

/// Private half of the key published by [`test_jwks`].
pub const TEST_PRIVATE_KEY_PEM: &str = include_str!("../testdata/rsa_private.pem");

/// Unrelated key, for forged signatures.
pub const OTHER_PRIVATE_KEY_PEM: &str = include_str!("../testdata/rsa_private_other.pem");

const TEST_MODULUS: &str = "kaH2JYKgHXRU2xpjR-k4DjHjvLEJ_QLCHp7J0eygN2o3Mhg6YHixGZjnujDTM0KKPxSk67AMNGAMAcq3T9n5coaJi2rdWRXnjhQTbAiPxUIgcKUxZqK-HpnIupUVkSbB4zTwpAmFbC69TitSlQY1ElVElwESme_eTQsgaqrhVvGaMlyhTTavhJ6YD-ssi-yrFVxiThg939Q0iDijBDshXBblnFAQq5m61FIG-2NXehjAD3x3uduMdMFmoJBmVVvOnsHNd82BtDjr3H0JYWZsu4mGbd1C1_6U2CoHqa57iH9mkpK6a42HO2VxKHZpk-LhSRhIK8bf3g3VJzKmIhMdAQ";
const TEST_EXPONENT: &str = "AQAB";

/// Creates an in-memory SQLite database with all migrations applied
pub async fn create_test_db() -> DbPool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    // Run migrations
    sqlx::migrate!("./src/db/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub fn test_jwks() -> JwkSet {
    JwkSet {
        keys: vec![Jwk {
            kid: Some(TEST_KID.to_string()),
            kty: "RSA".to_string(),
            alg: Some("RS256".to_string()),
            key_use: Some("sig".to_string()),
            n: Some(TEST_MODULUS.to_string()),
            e: Some(TEST_EXPONENT.to_string()),
        }],
    }
}

/// Auth service trusting only the test key, with the default audience.
pub fn test_auth_service() -> AuthService {
    AuthService::new(Arc::new(StaticKeys::new(test_jwks())), TEST_AUDIENCE)
}

/// Claims valid for an hour, carrying the given permissions.
pub fn claims_with_permissions(permissions: &[&str]) -> Value {
    let now = Utc::now().timestamp();
    json!({
        "iss": "https://dev-csu-ji77.us.auth0.com/",
        "sub": "auth0|casting-test",
        "aud": TEST_AUDIENCE,
        "iat": now,
        "exp": now + 3600,
        "permissions": permissions,
    })
}

pub fn sign_token(claims: &Value) -> String {
    sign_token_with(claims, Some(TEST_KID), TEST_PRIVATE_KEY_PEM)
}

pub fn sign_token_with(claims: &Value, kid: Option<&str>, private_key_pem: &str) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = kid.map(str::to_string);
    let key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes()).expect("test key");
    encode(&header, claims, &key).expect("sign test token")
}

/// `Authorization` header value for a fresh token with the given permissions.
pub fn bearer(permissions: &[&str]) -> String {
    format!("Bearer {}", sign_token(&claims_with_permissions(permissions)))
}
