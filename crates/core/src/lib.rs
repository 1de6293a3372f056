pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use config::Config;
pub use error::{AuthError, Error, Result};
