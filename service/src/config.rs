use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use integration_auth::oauth::providers::hubspot::{DEFAULT_API_BASE_URL, DEFAULT_AUTHORIZE_URL};
use log::LevelFilter;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default callback URL registered with the HubSpot app.
pub const DEFAULT_HUBSPOT_REDIRECT_URI: &str =
    "http://localhost:8000/integrations/hubspot/oauth2callback";

/// Default scopes requested from HubSpot: read access to CRM contacts.
pub const DEFAULT_HUBSPOT_SCOPES: &str = "crm.objects.contacts.read";

#[derive(Clone, Debug, PartialEq)]
pub enum RustEnv {
    Development,
    Production,
    Staging,
}

#[derive(Debug, PartialEq, Eq)]
pub struct RustEnvParseError;

impl FromStr for RustEnv {
    type Err = RustEnvParseError;
    fn from_str(level: &str) -> Result<RustEnv, Self::Err> {
        match level.to_lowercase().as_str() {
            "development" => Ok(RustEnv::Development),
            "production" => Ok(RustEnv::Production),
            "staging" => Ok(RustEnv::Staging),
            _ => Err(RustEnvParseError),
        }
    }
}

impl fmt::Display for RustEnv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RustEnv::Development => write!(f, "development"),
            RustEnv::Production => write!(f, "production"),
            RustEnv::Staging => write!(f, "staging"),
        }
    }
}

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// A list of full CORS origin URLs that allowed to receive server responses.
    #[arg(
        long,
        env,
        value_delimiter = ',',
        use_value_delimiter = true,
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,

    /// The HubSpot app client ID.
    #[arg(long, env)]
    hubspot_client_id: Option<String>,

    /// The HubSpot app client secret. Also signs OAuth state tokens.
    #[arg(long, env, hide_env_values = true)]
    hubspot_client_secret: Option<String>,

    /// The OAuth redirect URI registered with the HubSpot app.
    #[arg(long, env, default_value = DEFAULT_HUBSPOT_REDIRECT_URI)]
    hubspot_redirect_uri: String,

    /// Space separated OAuth scopes to request from HubSpot.
    #[arg(long, env, default_value = DEFAULT_HUBSPOT_SCOPES)]
    hubspot_scopes: String,

    /// The HubSpot consent page users are redirected to.
    /// Override in tests to point at a mock server.
    #[arg(long, env, default_value = DEFAULT_AUTHORIZE_URL)]
    hubspot_authorize_url: String,

    /// The base URL of the HubSpot API (token exchange and CRM endpoints).
    /// Override in tests to point at a mock server.
    #[arg(long, env, default_value = DEFAULT_API_BASE_URL)]
    hubspot_api_base_url: String,

    /// Timeout in seconds applied to every outbound HTTP request
    #[arg(long, env, default_value_t = 30)]
    pub http_timeout_secs: u64,

    /// Seconds a pending authorization (OAuth state) stays valid
    #[arg(long, env, default_value_t = 600)]
    pub pending_auth_ttl_secs: u64,

    /// Seconds between sweeps that drop expired store entries
    #[arg(long, env, default_value_t = 60)]
    pub store_purge_interval_secs: u64,

    /// The host interface to listen for incoming connections
    #[arg(short, long, env, default_value = "127.0.0.1")]
    pub interface: Option<String>,

    /// The host TCP port to listen for incoming connections
    #[arg(short, long, env, default_value_t = 8000)]
    pub port: u16,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,

    /// Set the Rust runtime environment to use.
    #[arg(
    short,
    long,
    env,
    default_value_t = RustEnv::Development,
    value_parser = clap::builder::PossibleValuesParser::new([
        "DEVELOPMENT", "PRODUCTION", "STAGING",
        "development", "production", "staging"
    ])
        .map(|s| s.parse::<RustEnv>().unwrap()),
    )]
    pub runtime_env: RustEnv,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    /// Returns the HubSpot client ID, if configured.
    pub fn hubspot_client_id(&self) -> Option<String> {
        self.hubspot_client_id.clone()
    }

    /// Returns the HubSpot client secret, if configured.
    pub fn hubspot_client_secret(&self) -> Option<String> {
        self.hubspot_client_secret.clone()
    }

    pub fn hubspot_redirect_uri(&self) -> &str {
        &self.hubspot_redirect_uri
    }

    pub fn hubspot_scopes(&self) -> &str {
        &self.hubspot_scopes
    }

    /// Returns the HubSpot consent page URL.
    pub fn hubspot_authorize_url(&self) -> &str {
        &self.hubspot_authorize_url
    }

    /// Returns the HubSpot API base URL.
    pub fn hubspot_api_base_url(&self) -> &str {
        &self.hubspot_api_base_url
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn pending_auth_ttl(&self) -> Duration {
        Duration::from_secs(self.pending_auth_ttl_secs)
    }

    pub fn store_purge_interval(&self) -> Duration {
        Duration::from_secs(self.store_purge_interval_secs)
    }

    pub fn runtime_env(&self) -> RustEnv {
        self.runtime_env.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rust_env_from_str_is_case_insensitive() {
        assert_eq!("PRODUCTION".parse::<RustEnv>(), Ok(RustEnv::Production));
        assert_eq!("staging".parse::<RustEnv>(), Ok(RustEnv::Staging));
        assert_eq!("nope".parse::<RustEnv>(), Err(RustEnvParseError));
    }

    #[test]
    fn test_rust_env_display() {
        assert_eq!(RustEnv::Development.to_string(), "development");
    }

    #[test]
    fn test_hubspot_settings_from_flags() {
        let config = Config::parse_from([
            "crm_connect",
            "--hubspot-client-id",
            "client-123",
            "--hubspot-client-secret",
            "secret-456",
            "--hubspot-api-base-url",
            "http://127.0.0.1:1234",
            "--http-timeout-secs",
            "5",
            "--runtime-env",
            "PRODUCTION",
        ]);

        assert_eq!(config.hubspot_client_id(), Some("client-123".to_string()));
        assert_eq!(config.hubspot_client_secret(), Some("secret-456".to_string()));
        assert_eq!(config.hubspot_api_base_url(), "http://127.0.0.1:1234");
        assert_eq!(config.http_timeout(), Duration::from_secs(5));
        assert_eq!(config.runtime_env(), RustEnv::Production);
    }

    #[test]
    fn test_log_level_filter_from_flag() {
        let config = Config::parse_from(["crm_connect", "--log-level-filter", "DEBUG"]);
        assert_eq!(config.log_level_filter, LevelFilter::Debug);
    }
}
