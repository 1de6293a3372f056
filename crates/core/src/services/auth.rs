use std::sync::Arc;

use jsonwebtoken::{Algorithm, Validation, decode, decode_header, errors::ErrorKind};

use crate::error::AuthError;
use crate::models::Claims;
use crate::services::jwks::KeySource;

/// Validates identity-provider access tokens and enforces route permissions.
pub struct AuthService {
    keys: Arc<dyn KeySource>,
    audience: String,
    issuer: Option<String>,
}

impl AuthService {
    pub fn new(keys: Arc<dyn KeySource>, audience: impl Into<String>) -> Self {
        Self {
            keys,
            audience: audience.into(),
            issuer: None,
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Pulls the token out of an `Authorization: Bearer <token>` header value.
    pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
        let header = header.ok_or(AuthError::MissingHeader)?;
        let parts: Vec<&str> = header.split(' ').collect();

        match parts.as_slice() {
            ["Bearer", token] if !token.is_empty() => Ok(*token),
            ["Bearer"] | ["Bearer", ""] => Err(AuthError::MalformedHeader("Token not found")),
            ["Bearer", ..] => Err(AuthError::MalformedHeader(
                "Authorization header must be bearer token",
            )),
            _ => Err(AuthError::MalformedHeader(
                "Authorization header must start with \"Bearer\"",
            )),
        }
    }

    pub async fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token).map_err(|e| AuthError::MalformedToken(e.to_string()))?;
        let kid = header
            .kid
            .ok_or_else(|| AuthError::MalformedToken("token header has no key id".into()))?;

        let key = self.keys.decoding_key(&kid).await?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[self.audience.as_str()]);
        if let Some(issuer) = &self.issuer {
            validation.set_issuer(&[issuer.as_str()]);
        }

        let data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            ErrorKind::InvalidAudience => AuthError::InvalidClaims("audience".into()),
            ErrorKind::InvalidIssuer => AuthError::InvalidClaims("issuer".into()),
            ErrorKind::ImmatureSignature => AuthError::InvalidClaims("not yet valid".into()),
            ErrorKind::MissingRequiredClaim(claim) => AuthError::InvalidClaims(claim.clone()),
            _ => AuthError::MalformedToken(e.to_string()),
        })?;

        if data.claims.permissions.is_none() {
            return Err(AuthError::InvalidClaims(
                "permissions not included in token".into(),
            ));
        }

        Ok(data.claims)
    }

    pub fn check_permission(claims: &Claims, permission: &str) -> Result<(), AuthError> {
        if claims.has_permission(permission) {
            Ok(())
        } else {
            Err(AuthError::PermissionDenied(permission.to_string()))
        }
    }

    /// Full guard: header extraction, token verification, permission check.
    pub async fn authorize(
        &self,
        header: Option<&str>,
        permission: &str,
    ) -> Result<Claims, AuthError> {
        let result = async {
            let token = Self::bearer_token(header)?;
            let claims = self.verify_token(token).await?;
            Self::check_permission(&claims, permission)?;
            Ok::<_, AuthError>(claims)
        }
        .await;

        match &result {
            Ok(claims) => tracing::debug!(sub = %claims.sub, permission, "Request authorized"),
            Err(e) => tracing::warn!(code = e.code(), permission, error = %e, "Request rejected"),
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::jwks::StaticKeys;
    use crate::test_helpers::{
        OTHER_PRIVATE_KEY_PEM, TEST_AUDIENCE, TEST_KID, claims_with_permissions, sign_token,
        sign_token_with, test_auth_service, test_jwks,
    };
    use serde_json::json;

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(AuthService::bearer_token(Some("Bearer abc.def.ghi")), Ok("abc.def.ghi"));
        assert_eq!(
            AuthService::bearer_token(None),
            Err(AuthError::MissingHeader)
        );
        assert!(matches!(
            AuthService::bearer_token(Some("Bearer")),
            Err(AuthError::MalformedHeader(_))
        ));
        assert!(matches!(
            AuthService::bearer_token(Some("Bearer a b")),
            Err(AuthError::MalformedHeader(_))
        ));
        assert!(matches!(
            AuthService::bearer_token(Some("Basic dXNlcjpwYXNz")),
            Err(AuthError::MalformedHeader(_))
        ));
        assert!(matches!(
            AuthService::bearer_token(Some("bearer abc")),
            Err(AuthError::MalformedHeader(_))
        ));
    }

    #[test]
    fn test_bearer_token_needs_single_space_separator() {
        for header in ["Bearer  abc", "Bearer\tabc", "Bearer ", " Bearer abc", "Bearer abc "] {
            assert!(
                matches!(
                    AuthService::bearer_token(Some(header)),
                    Err(AuthError::MalformedHeader(_))
                ),
                "{header:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_valid_token_with_permission_is_authorized() {
        let auth = test_auth_service();
        let token = sign_token(&claims_with_permissions(&["read:actors", "read:movies"]));
        let header = format!("Bearer {token}");

        let claims = auth.authorize(Some(&header), "read:actors").await.unwrap();
        assert_eq!(claims.sub, "auth0|casting-test");
        assert!(claims.has_permission("read:movies"));
    }

    #[tokio::test]
    async fn test_missing_permission_is_denied() {
        let auth = test_auth_service();
        let token = sign_token(&claims_with_permissions(&["read:actors"]));
        let header = format!("Bearer {token}");

        assert_eq!(
            auth.authorize(Some(&header), "delete:actors").await.unwrap_err(),
            AuthError::PermissionDenied("delete:actors".into())
        );
    }

    #[tokio::test]
    async fn test_expired_token() {
        let auth = test_auth_service();
        let mut claims = claims_with_permissions(&["read:actors"]);
        claims["exp"] = json!(chrono::Utc::now().timestamp() - 3600);

        assert_eq!(
            auth.verify_token(&sign_token(&claims)).await.unwrap_err(),
            AuthError::TokenExpired
        );
    }

    #[tokio::test]
    async fn test_wrong_audience() {
        let auth = test_auth_service();
        let mut claims = claims_with_permissions(&["read:actors"]);
        claims["aud"] = json!("https://someone-else.example/api");

        assert!(matches!(
            auth.verify_token(&sign_token(&claims)).await,
            Err(AuthError::InvalidClaims(_))
        ));
    }

    #[tokio::test]
    async fn test_audience_list_containing_ours_is_accepted() {
        let auth = test_auth_service();
        let mut claims = claims_with_permissions(&["read:actors"]);
        claims["aud"] = json!([TEST_AUDIENCE, "https://tenant.auth0.com/userinfo"]);

        assert!(auth.verify_token(&sign_token(&claims)).await.is_ok());
    }

    #[tokio::test]
    async fn test_issuer_checked_when_configured() {
        let auth = AuthService::new(Arc::new(StaticKeys::new(test_jwks())), TEST_AUDIENCE)
            .with_issuer("https://casting.auth0.com/");
        let mut claims = claims_with_permissions(&["read:actors"]);
        claims["iss"] = json!("https://elsewhere.auth0.com/");

        assert!(matches!(
            auth.verify_token(&sign_token(&claims)).await,
            Err(AuthError::InvalidClaims(_))
        ));

        claims["iss"] = json!("https://casting.auth0.com/");
        assert!(auth.verify_token(&sign_token(&claims)).await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_permissions_claim() {
        let auth = test_auth_service();
        let mut claims = claims_with_permissions(&[]);
        claims.as_object_mut().unwrap().remove("permissions");

        assert!(matches!(
            auth.verify_token(&sign_token(&claims)).await,
            Err(AuthError::InvalidClaims(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_key_id() {
        let auth = test_auth_service();
        let token = sign_token_with(
            &claims_with_permissions(&["read:actors"]),
            Some("retired-key"),
            crate::test_helpers::TEST_PRIVATE_KEY_PEM,
        );

        assert_eq!(
            auth.verify_token(&token).await.unwrap_err(),
            AuthError::UnknownSigningKey("retired-key".into())
        );
    }

    #[tokio::test]
    async fn test_token_without_key_id() {
        let auth = test_auth_service();
        let token = sign_token_with(
            &claims_with_permissions(&["read:actors"]),
            None,
            crate::test_helpers::TEST_PRIVATE_KEY_PEM,
        );

        assert!(matches!(
            auth.verify_token(&token).await,
            Err(AuthError::MalformedToken(_))
        ));
    }

    #[tokio::test]
    async fn test_signature_from_other_key_is_rejected() {
        let auth = test_auth_service();
        let token = sign_token_with(
            &claims_with_permissions(&["read:actors"]),
            Some(TEST_KID),
            OTHER_PRIVATE_KEY_PEM,
        );

        assert!(matches!(
            auth.verify_token(&token).await,
            Err(AuthError::MalformedToken(_))
        ));
    }

    #[tokio::test]
    async fn test_garbage_token() {
        let auth = test_auth_service();

        assert!(matches!(
            auth.authorize(Some("Bearer not-a-jwt"), "read:actors").await,
            Err(AuthError::MalformedToken(_))
        ));
    }
}
