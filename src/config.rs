use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Target URL; the host must be an IPv4 literal (no DNS resolution).
    #[serde(default = "default_url")]
    pub url: String,
    /// HTTP method for the request.
    #[serde(default = "default_method")]
    pub method: String,
    /// Optional request body.
    #[serde(default)]
    pub body: Option<String>,
}

impl Config {
    /// Loads configuration from the YAML file named by `COURIER_CONFIG`,
    /// falling back to `COURIER_URL` / `COURIER_METHOD` / `COURIER_BODY`
    /// environment variables and their defaults.
    pub fn load() -> anyhow::Result<Self> {
        if let Ok(path) = std::env::var("COURIER_CONFIG") {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config file {path}"))?;
            return Self::from_yaml(&raw);
        }

        Ok(Self {
            url: std::env::var("COURIER_URL").unwrap_or_else(|_| default_url()),
            method: std::env::var("COURIER_METHOD").unwrap_or_else(|_| default_method()),
            body: std::env::var("COURIER_BODY").ok(),
        })
    }

    pub fn from_yaml(raw: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(raw).context("failed to parse config")
    }
}

fn default_url() -> String {
    "http://127.0.0.1:8080/".to_string()
}

fn default_method() -> String {
    "GET".to_string()
}
