use crate::app::gate::{GateConfig, ReservedSlugs};

/// Default slugs that collide with static routes under the space prefix.
pub const DEFAULT_RESERVED_SLUGS: &[&str] = &["new", "create", "join", "invite", "settings"];

/// Centralized environment configuration.
/// All env vars and defaults are defined here.
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection URL. Required.
    pub database_url: String,

    /// Address the HTTP server binds to.
    /// Default: 0.0.0.0:3000
    pub bind_addr: String,

    /// Paths under this prefix require an admin session.
    /// Default: /admin
    pub admin_path_prefix: String,

    /// Paths of the form `<prefix>/<slug>/...` are space-scoped.
    /// Default: /space
    pub space_path_prefix: String,

    /// Space list / selection page.
    /// Default: /spaces
    pub space_list_path: String,

    /// Comma-separated slugs never treated as spaces.
    /// Default: new,create,join,invite,settings
    pub reserved_space_slugs: Vec<String>,
}

impl Config {
    /// Build config from environment variables.
    /// Returns an error if required vars are missing.
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL must be set in .env")?;

        let bind_addr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let admin_path_prefix = path_var("ADMIN_PATH_PREFIX", "/admin")?;
        let space_path_prefix = path_var("SPACE_PATH_PREFIX", "/space")?;
        let space_list_path = path_var("SPACE_LIST_PATH", "/spaces")?;

        let reserved_space_slugs = match std::env::var("RESERVED_SPACE_SLUGS") {
            Ok(raw) => parse_slug_list(&raw),
            Err(_) => DEFAULT_RESERVED_SLUGS.iter().map(|s| s.to_string()).collect(),
        };

        Ok(Self {
            database_url,
            bind_addr,
            admin_path_prefix,
            space_path_prefix,
            space_list_path,
            reserved_space_slugs,
        })
    }

    /// Immutable gate configuration derived from this config.
    pub fn gate(&self) -> GateConfig {
        GateConfig {
            admin_prefix: self.admin_path_prefix.clone(),
            space_prefix: self.space_path_prefix.clone(),
            space_list_path: self.space_list_path.clone(),
            reserved: ReservedSlugs::new(self.reserved_space_slugs.iter().cloned()),
            ..GateConfig::default()
        }
    }

    /// Config for tests. Uses in-memory database URL and default paths.
    pub fn for_tests() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            bind_addr: "127.0.0.1:0".to_string(),
            admin_path_prefix: "/admin".to_string(),
            space_path_prefix: "/space".to_string(),
            space_list_path: "/spaces".to_string(),
            reserved_space_slugs: DEFAULT_RESERVED_SLUGS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Read a path-valued env var. Must start with '/'; a trailing '/' is dropped.
fn path_var(name: &str, default: &str) -> Result<String, String> {
    let value = std::env::var(name).unwrap_or_else(|_| default.to_string());
    if !value.starts_with('/') {
        return Err(format!("{name} must start with '/'"));
    }
    let trimmed = value.trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(format!("{name} cannot be the site root"));
    }
    Ok(trimmed.to_string())
}

fn parse_slug_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
