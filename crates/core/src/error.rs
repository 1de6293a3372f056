use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Item not found")]
    NotFound,

    #[error("Validation error: {0}")]
    Validation(String),
}

impl Error {
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Auth(e) => e.status_code(),
            Error::NotFound => 404,
            Error::Validation(_) => 422,
            Error::Database(_) => 500,
        }
    }
}

/// Failures produced while authenticating and authorizing a bearer token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authorization header is expected")]
    MissingHeader,

    #[error("{0}")]
    MalformedHeader(&'static str),

    #[error("Unable to parse authentication token: {0}")]
    MalformedToken(String),

    #[error("Unable to find the appropriate key")]
    UnknownSigningKey(String),

    #[error("Unable to fetch signing keys: {0}")]
    KeySetUnavailable(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Incorrect claims: {0}")]
    InvalidClaims(String),

    #[error("Permission not available")]
    PermissionDenied(String),
}

impl AuthError {
    /// Short machine-readable tag carried in error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingHeader
            | AuthError::MalformedHeader(_)
            | AuthError::MalformedToken(_)
            | AuthError::UnknownSigningKey(_) => "invalid_header",
            AuthError::KeySetUnavailable(_) => "jwks_unavailable",
            AuthError::TokenExpired => "token_expired",
            AuthError::InvalidClaims(_) => "invalid_claims",
            AuthError::PermissionDenied(_) => "unauthorized",
        }
    }

    pub fn status_code(&self) -> u16 {
        401
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_errors_share_unauthorized_status() {
        let errors = [
            AuthError::MissingHeader,
            AuthError::MalformedHeader("Authorization header must be bearer token"),
            AuthError::MalformedToken("bad".into()),
            AuthError::UnknownSigningKey("k9".into()),
            AuthError::KeySetUnavailable("timeout".into()),
            AuthError::TokenExpired,
            AuthError::InvalidClaims("audience".into()),
            AuthError::PermissionDenied("read:actors".into()),
        ];
        for err in errors {
            assert_eq!(err.status_code(), 401, "{err:?}");
            assert_eq!(Error::from(err).status_code(), 401);
        }
    }

    #[test]
    fn test_auth_error_codes() {
        assert_eq!(AuthError::MissingHeader.code(), "invalid_header");
        assert_eq!(AuthError::TokenExpired.code(), "token_expired");
        assert_eq!(AuthError::InvalidClaims("x".into()).code(), "invalid_claims");
        assert_eq!(
            AuthError::PermissionDenied("read:movies".into()).code(),
            "unauthorized"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::NotFound.status_code(), 404);
        assert_eq!(Error::Validation("age".into()).status_code(), 422);
        assert_eq!(Error::Database(sqlx::Error::PoolClosed).status_code(), 500);
    }
}
