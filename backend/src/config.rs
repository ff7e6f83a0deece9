use shuttle_runtime::SecretStore;
use tracing::warn;

pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { allowed_origins: vec![DEFAULT_CORS_ORIGIN.to_string()] }
    }
}

impl ServerConfig {
    pub fn from_secrets(secrets: &SecretStore) -> Self {
        match secrets.get("CORS_ORIGIN").map(|raw| parse_origins(&raw)) {
            Some(origins) if !origins.is_empty() => Self { allowed_origins: origins },
            _ => {
                warn!("CORS_ORIGIN not set - allowing {} only", DEFAULT_CORS_ORIGIN);
                Self::default()
            }
        }
    }

    pub fn allows(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|allowed| allowed == origin)
    }
}

/// Comma separated list, trailing slashes ignored.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}
