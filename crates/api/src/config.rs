use std::fmt;
use std::net::{IpAddr, SocketAddr};

use axum::http::Uri;

/// Environment name that enables verbose, human-readable logging.
pub const DEV_ENV: &str = "dev";

/// `CORS_ORIGINS` value that allows any origin.
pub const ANY_ORIGIN: &str = "*";

/// Errors raised while loading [`ServerConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has an invalid value: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Server configuration loaded from environment variables.
///
/// Built once at startup and shared through `AppState`.
#[derive(Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Postgres connection string.
    pub database_url: String,
    /// Shared secret expected in the `X-API-Key` header.
    pub api_key: String,
    /// Environment name (default: `dev`).
    pub env: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// Externally visible `scheme://host[:port]`, if configured and valid.
    pub public_base_url: Option<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default   |
    /// |------------------------|-----------|
    /// | `DATABASE_URL`         | required  |
    /// | `API_KEY`              | required  |
    /// | `ENV`                  | `dev`     |
    /// | `CORS_ORIGINS`         | `*`       |
    /// | `PUBLIC_BASE_URL`      | unset     |
    /// | `HOST`                 | `0.0.0.0` |
    /// | `PORT`                 | `8000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`      |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &'static str| {
            lookup(var)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(var))
        };

        let database_url = required("DATABASE_URL")?;
        let api_key = required("API_KEY")?;

        let env = lookup("ENV")
            .map(|v| v.trim().to_lowercase())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEV_ENV.into());

        let cors_origins =
            parse_cors_origins(&lookup("CORS_ORIGINS").unwrap_or_else(|| ANY_ORIGIN.into()));

        let public_base_url = lookup("PUBLIC_BASE_URL").and_then(|v| normalize_base_url(&v));

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_var(&lookup, "PORT", 8000)?;
        let request_timeout_secs = parse_var(&lookup, "REQUEST_TIMEOUT_SECS", 30)?;

        Ok(Self {
            host,
            port,
            database_url,
            api_key,
            env,
            cors_origins,
            public_base_url,
            request_timeout_secs,
        })
    }

    /// Whether the service runs in the development environment.
    pub fn is_dev(&self) -> bool {
        self.env == DEV_ENV
    }

    /// Whether any origin may call the API cross-origin.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == ANY_ORIGIN)
    }

    /// Address to bind, built from `HOST` and `PORT`. `HOST` may be an IPv4
    /// or IPv6 literal (`0.0.0.0`, `::`).
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.host.trim().parse().map_err(|_| ConfigError::Invalid {
            var: "HOST",
            value: self.host.clone(),
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Absolute or root-relative URL of a resource path such as `/jobs/{id}`.
    pub fn resource_url(&self, path: &str) -> String {
        match &self.public_base_url {
            Some(base) => format!("{base}{path}"),
            None => path.to_string(),
        }
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &"<redacted>")
            .field("api_key", &"<redacted>")
            .field("env", &self.env)
            .field("cors_origins", &self.cors_origins)
            .field("public_base_url", &self.public_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}

/// Split a comma-separated origin list, dropping blanks.
pub fn parse_cors_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Reduce a URL to `scheme://host[:port]`, dropping any path, query,
/// fragment or credentials.
///
/// Returns `None` for blank input and for anything that does not parse as an
/// absolute `http`/`https` URL.
pub fn normalize_base_url(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let without_fragment = raw.split('#').next().unwrap_or_default();
    if without_fragment.is_empty() {
        return None;
    }

    let uri: Uri = without_fragment.parse().ok()?;
    let scheme = uri.scheme_str()?.to_ascii_lowercase();
    if scheme != "http" && scheme != "https" {
        return None;
    }

    let host = uri.host().filter(|h| !h.is_empty())?;
    match uri.port_u16() {
        Some(port) => Some(format!("{scheme}://{host}:{port}")),
        None => Some(format!("{scheme}://{host}")),
    }
}
