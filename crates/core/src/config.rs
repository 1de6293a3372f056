use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default = "default_auth0_domain")]
    pub auth0_domain: String,

    #[serde(default = "default_api_audience")]
    pub api_audience: String,

    /// Required `iss` claim. Not checked when unset.
    #[serde(default)]
    pub auth_issuer: Option<String>,

    /// Overrides the JWKS endpoint derived from `auth0_domain`
    #[serde(default)]
    pub jwks_url: Option<String>,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Wipe both tables and insert the sample rows on startup
    #[serde(default)]
    pub seed_database: bool,
}

fn default_database_url() -> String {
    "sqlite:data/casting.db?mode=rwc".to_string()
}

fn default_auth0_domain() -> String {
    "dev-csu-ji77.us.auth0.com".to_string()
}

fn default_api_audience() -> String {
    "http://dev-csu-ji77.us.com/api/v3".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env::<Config>()
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn jwks_url(&self) -> String {
        self.jwks_url
            .clone()
            .unwrap_or_else(|| format!("https://{}/.well-known/jwks.json", self.auth0_domain))
    }
}
