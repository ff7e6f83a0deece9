use std::time::Duration;

pub const BASE_URL: &str = "http://localhost:8000/";
pub const TIMEOUT_MS: u32 = 1_000;
pub const CONTENT_TYPE: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";

/// Defaults every request issued by the frontend client starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: &'static str,
    pub timeout_ms: u32,
    pub headers: &'static [(&'static str, &'static str)],
}

impl ClientConfig {
    pub const fn new() -> Self {
        Self {
            base_url: BASE_URL,
            timeout_ms: TIMEOUT_MS,
            headers: &[(CONTENT_TYPE, APPLICATION_JSON)],
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(u64::from(self.timeout_ms))
    }

    pub fn header(&self, name: &str) -> Option<&'static str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| *value)
    }

    /// Appends `path` to the base address with exactly one `/` between them.
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            format!("{}/", base)
        } else {
            format!("{}/{}", base, path)
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

pub const CLIENT_CONFIG: ClientConfig = ClientConfig::new();
