use anyhow::{Context, Result};

const DEFAULT_HR_API_BASE_URL: &str = "https://testdns.artizence.com/api/v1";

/// Application configuration loaded from environment variables.
/// Startup fails if any storage variable is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub hr_api_base_url: String,
    pub storage: StorageConfig,
    pub port: u16,
    pub rust_log: String,
}

/// Credentials and addressing for the R2 resume bucket.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bucket: String,
    pub account_id: String,
    pub access_key: String,
    pub secret_key: String,
    pub public_domain: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            hr_api_base_url: std::env::var("HR_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_HR_API_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            storage: StorageConfig::from_env()?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl StorageConfig {
    pub fn from_env() -> Result<Self> {
        Ok(StorageConfig {
            bucket: require_env("R2_BUCKET_NAME")?,
            account_id: require_env("R2_ACCOUNT_ID")?,
            access_key: require_env("R2_ACCESS_KEY")?,
            secret_key: require_env("R2_SECRET_KEY")?,
            public_domain: require_env("R2_PUBLIC_DOMAIN")?,
        })
    }

    /// S3-compatible endpoint for the account.
    pub fn endpoint(&self) -> String {
        format!("https://{}.r2.cloudflarestorage.com", self.account_id)
    }

    /// Public URL under which an uploaded object resolves.
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_domain.trim_end_matches('/'), key)
    }
}

fn require_env(key: &str) -> Result<String> {
    let value = std::env::var(key)
        .with_context(|| format!("Required environment variable '{key}' is not set"))?;
    if value.trim().is_empty() {
        anyhow::bail!("Required environment variable '{key}' is empty");
    }
    Ok(value)
}
