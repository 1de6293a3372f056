pub mod actors;
pub mod auth;
pub mod jwks;
pub mod movies;

pub use actors::ActorService;
pub use auth::AuthService;
pub use jwks::{Jwk, JwkSet, KeySource, RemoteJwks, StaticKeys};
pub use movies::MovieService;
