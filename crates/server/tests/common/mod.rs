#![allow(dead_code)]

use std::sync::Arc;

use axum::http::{HeaderValue, header::AUTHORIZATION};
use axum_test::{TestRequest, TestServer};

use casting_core::db::DbPool;
use casting_core::test_helpers::{bearer, create_test_db, test_auth_service};
use casting_server::{AppState, create_router};

pub const ALL_PERMISSIONS: [&str; 8] = [
    "read:actors",
    "create:actors",
    "update:actors",
    "delete:actors",
    "read:movies",
    "create:movies",
    "update:movies",
    "delete:movies",
];

/// Router over a fresh in-memory database, trusting the test signing key.
pub async fn test_server() -> TestServer {
    test_server_with_pool().await.0
}

/// Same as [`test_server`], also handing back the pool behind it.
pub async fn test_server_with_pool() -> (TestServer, DbPool) {
    let pool = create_test_db().await;
    let state = Arc::new(AppState::new(pool.clone(), test_auth_service()));
    let server = TestServer::new(create_router(state)).expect("test server");
    (server, pool)
}

pub trait Authorized {
    /// Attaches a freshly signed bearer token holding `permissions`.
    fn with_permissions(self, permissions: &[&str]) -> Self;

    fn with_full_access(self) -> Self;

    fn with_raw_authorization(self, value: &str) -> Self;
}

impl Authorized for TestRequest {
    fn with_permissions(self, permissions: &[&str]) -> Self {
        self.with_raw_authorization(&bearer(permissions))
    }

    fn with_full_access(self) -> Self {
        self.with_permissions(&ALL_PERMISSIONS)
    }

    fn with_raw_authorization(self, value: &str) -> Self {
        self.add_header(
            AUTHORIZATION,
            HeaderValue::from_str(value).expect("header value"),
        )
    }
}
