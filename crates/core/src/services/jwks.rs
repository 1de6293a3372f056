use std::collections::HashMap;

use async_trait::async_trait;
use jsonwebtoken::DecodingKey;
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// A single JSON Web Key as published by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jwk {
    #[serde(default)]
    pub kid: Option<String>,
    pub kty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
    #[serde(rename = "use", default, skip_serializing_if = "Option::is_none")]
    pub key_use: Option<String>,
    /// RSA modulus (base64url)
    #[serde(default)]
    pub n: Option<String>,
    /// RSA exponent (base64url)
    #[serde(default)]
    pub e: Option<String>,
}

impl Jwk {
    fn to_decoding_key(&self) -> Result<DecodingKey, AuthError> {
        let kid = self.kid.clone().unwrap_or_default();
        if self.kty != "RSA" {
            return Err(AuthError::UnknownSigningKey(kid));
        }
        match (self.n.as_deref(), self.e.as_deref()) {
            (Some(n), Some(e)) => DecodingKey::from_rsa_components(n, e).map_err(|err| {
                AuthError::KeySetUnavailable(format!("invalid RSA components for {kid}: {err}"))
            }),
            _ => Err(AuthError::KeySetUnavailable(format!(
                "RSA key {kid} is missing its modulus or exponent"
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JwkSet {
    pub keys: Vec<Jwk>,
}

impl JwkSet {
    pub fn find(&self, kid: &str) -> Option<&Jwk> {
        self.keys.iter().find(|k| k.kid.as_deref() == Some(kid))
    }
}

/// Resolves the public key a token was signed with.
#[async_trait]
pub trait KeySource: Send + Sync {
    async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, AuthError>;
}

/// Reads the identity provider's JWKS endpoint on every lookup.
pub struct RemoteJwks {
    url: String,
    client: reqwest::Client,
}

impl RemoteJwks {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn fetch(&self) -> Result<JwkSet, AuthError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AuthError::KeySetUnavailable(e.to_string()))?;

        response
            .json::<JwkSet>()
            .await
            .map_err(|e| AuthError::KeySetUnavailable(format!("failed to parse JWKS: {e}")))
    }
}

#[async_trait]
impl KeySource for RemoteJwks {
    async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, AuthError> {
        let jwks = self.fetch().await?;
        tracing::debug!(url = %self.url, keys = jwks.keys.len(), "Fetched JWKS");

        jwks.find(kid)
            .ok_or_else(|| AuthError::UnknownSigningKey(kid.to_string()))?
            .to_decoding_key()
    }
}

/// Fixed key set held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticKeys {
    keys: HashMap<String, Jwk>,
}

impl StaticKeys {
    pub fn new(jwks: JwkSet) -> Self {
        let keys = jwks
            .keys
            .into_iter()
            .filter_map(|jwk| jwk.kid.clone().map(|kid| (kid, jwk)))
            .collect();
        Self { keys }
    }
}

#[async_trait]
impl KeySource for StaticKeys {
    async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, AuthError> {
        self.keys
            .get(kid)
            .ok_or_else(|| AuthError::UnknownSigningKey(kid.to_string()))?
            .to_decoding_key()
    }
}
