use miette::{IntoDiagnostic, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub server: Server,
    #[serde(default)]
    pub auth: Auth,
    #[serde(default)]
    pub store: StoreSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
    /// Serve the GraphiQL IDE at /graphiql
    #[serde(default = "default_graphiql")]
    pub graphiql: bool,
}

fn default_graphiql() -> bool {
    true
}

/// Who may call `generateAuthToken`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TokenIssuance {
    /// Any caller may mint a token for any existing user.
    #[default]
    Open,
    /// The caller must already hold a token for that user, or be an admin.
    SelfOrAdmin,
}

#[derive(Clone, Serialize, Deserialize, Default)]
pub struct Auth {
    /// HS256 signing secret. A random per-process secret is used when unset.
    pub secret: Option<String>,
    /// Token lifetime in seconds. Tokens never expire when unset.
    pub token_ttl_secs: Option<u64>,
    #[serde(default)]
    pub issuance: TokenIssuance,
}

// The signing secret never reaches the logs
impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Auth")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("issuance", &self.issuance)
            .finish()
    }
}

impl Auth {
    pub fn token_ttl(&self) -> Option<Duration> {
        self.token_ttl_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreSettings {
    /// JSON fixture file; built-in fixtures are used when unset.
    pub seed_path: Option<PathBuf>,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
            graphiql: true,
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("server.host", Server::default().host)
            .into_diagnostic()?
            .set_default("server.port", Server::default().port)
            .into_diagnostic()?
            .set_default("server.graphiql", Server::default().graphiql)
            .into_diagnostic()?
            .set_default("auth.issuance", "open")
            .into_diagnostic()?;

        // Optional file
        if Path::new(path).exists() {
            builder = builder.add_source(config::File::with_name(path));
        }

        // Environment overrides: CARNET__SERVER__PORT=9090, etc.
        builder = builder.add_source(config::Environment::with_prefix("CARNET").separator("__"));

        let cfg = builder.build().into_diagnostic()?;
        let mut s: Settings = cfg.try_deserialize().into_diagnostic()?;

        // Normalize seed path to be relative to current dir
        if let Some(seed_path) = s.store.seed_path.take() {
            s.store.seed_path = Some(if seed_path.is_relative() {
                std::env::current_dir().into_diagnostic()?.join(seed_path)
            } else {
                seed_path
            });
        }

        Ok(s)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
