use std::sync::Arc;

use axum::{
    Router,
    handler::Handler,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    response::IntoResponse,
    routing::{get, patch},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use casting_core::{
    Config,
    db::{DbPool, create_pool, reset_and_seed},
    services::{ActorService, AuthService, MovieService, RemoteJwks},
};

pub mod error;
pub mod middleware;
pub mod routes;

pub use error::{ApiError, ApiResult};

use middleware::auth::RequirePermissionLayer;
use routes::{actors, movies};

/// Permission strings granted by the identity provider.
pub mod permissions {
    pub const READ_ACTORS: &str = "read:actors";
    pub const CREATE_ACTORS: &str = "create:actors";
    pub const UPDATE_ACTORS: &str = "update:actors";
    pub const DELETE_ACTORS: &str = "delete:actors";
    pub const READ_MOVIES: &str = "read:movies";
    pub const CREATE_MOVIES: &str = "create:movies";
    pub const UPDATE_MOVIES: &str = "update:movies";
    pub const DELETE_MOVIES: &str = "delete:movies";
}

use permissions::*;

pub struct AppState {
    pub actor_service: ActorService,
    pub movie_service: MovieService,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(pool: DbPool, auth_service: AuthService) -> Self {
        Self {
            actor_service: ActorService::new(pool.clone()),
            movie_service: MovieService::new(pool),
            auth_service: Arc::new(auth_service),
        }
    }

    /// Guard layer for a single handler.
    pub fn require(&self, permission: &'static str) -> RequirePermissionLayer {
        RequirePermissionLayer::new(self.auth_service.clone(), permission)
    }
}

/// Creates the application state with all services initialized
pub async fn create_app_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    // Create database pool
    let pool = create_pool(&config.database_url).await?;
    tracing::info!("Database connected");

    if config.seed_database {
        reset_and_seed(&pool).await?;
    }

    let jwks = RemoteJwks::new(config.jwks_url());
    tracing::info!(url = %jwks.url(), audience = %config.api_audience, "Using identity provider keys");

    let mut auth_service = AuthService::new(Arc::new(jwks), config.api_audience.clone());
    if let Some(issuer) = &config.auth_issuer {
        auth_service = auth_service.with_issuer(issuer.clone());
    }

    Ok(Arc::new(AppState::new(pool, auth_service)))
}

/// Creates the router with all routes configured
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Actors
        .route(
            "/actors",
            get(actors::list.layer(state.require(READ_ACTORS)))
                .post(actors::create.layer(state.require(CREATE_ACTORS))),
        )
        .route(
            "/actors/{id}",
            patch(actors::update.layer(state.require(UPDATE_ACTORS)))
                .delete(actors::delete.layer(state.require(DELETE_ACTORS))),
        )
        // Movies
        .route(
            "/movies",
            get(movies::list.layer(state.require(READ_MOVIES)))
                .post(movies::create.layer(state.require(CREATE_MOVIES))),
        )
        .route(
            "/movies/{id}",
            patch(movies::update.layer(state.require(UPDATE_MOVIES)))
                .delete(movies::delete.layer(state.require(DELETE_MOVIES))),
        )
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
}

async fn health_check() -> &'static str {
    "OK"
}

async fn not_found() -> impl IntoResponse {
    ApiError::not_found()
}

async fn method_not_allowed() -> impl IntoResponse {
    ApiError::method_not_allowed()
}

/// Starts the server and blocks until shutdown
pub async fn start_server(config: Config) -> anyhow::Result<()> {
    tracing::info!("Starting casting server...");

    let state = create_app_state(&config).await?;
    let app = create_router(state);

    let addr = config.server_addr();
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
