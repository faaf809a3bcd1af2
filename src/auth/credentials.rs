use anyhow::Result;
use log::info;
use std::fmt;

/// Process-wide PBX credentials, loaded once at startup
#[derive(Clone)]
pub struct Credentials {
    pub base_url: String,
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(base_url: String, username: String, password: String) -> Result<Credentials> {
        let credentials = Credentials {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            username: username.trim().to_string(),
            password,
        };
        credentials.validate()?;
        Ok(credentials)
    }

    pub fn from_env() -> Result<Credentials> {
        info!("Importing credentials from environment variables");

        // A missing .env is fine, the variables may already be exported
        dotenvy::dotenv().ok();

        let base_url = std::env::var("PBX_BASE_URL")
            .map_err(|_| anyhow::anyhow!("PBX_BASE_URL environment variable not set"))?;
        let username = std::env::var("PBX_USERNAME")
            .map_err(|_| anyhow::anyhow!("PBX_USERNAME environment variable not set"))?;
        let password = std::env::var("PBX_PASSWORD")
            .map_err(|_| anyhow::anyhow!("PBX_PASSWORD environment variable not set"))?;

        Credentials::new(base_url, username, password)
    }

    fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            anyhow::bail!("BASE_URL must not be empty");
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            anyhow::bail!("BASE_URL must start with http:// or https://, got '{}'", self.base_url);
        }
        if self.username.is_empty() {
            anyhow::bail!("USERNAME must not be empty");
        }
        if self.password.is_empty() {
            anyhow::bail!("PASSWORD must not be empty");
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
