use crate::error::Result;
use std::env;
use url::Url;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";
pub const SERVER_URL_ENV: &str = "CLASSIFY_SERVER_URL";

/// Path of the classify endpoint, resolved against the server origin.
pub const CLASSIFY_PATH: &str = "/classify-file/";

#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub server_url: Url,
}

impl UploadConfig {
    pub fn new(server_url: &str) -> Result<Self> {
        Ok(Self {
            server_url: Url::parse(server_url)?,
        })
    }

    /// Loads `.env` if present, then reads `CLASSIFY_SERVER_URL`.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let server_url = env::var(SERVER_URL_ENV).unwrap_or_else(|_| {
            log::debug!("{} not set, using {}", SERVER_URL_ENV, DEFAULT_SERVER_URL);
            DEFAULT_SERVER_URL.to_string()
        });

        Self::new(&server_url)
    }

    pub fn endpoint(&self) -> Result<Url> {
        Ok(self.server_url.join(CLASSIFY_PATH)?)
    }
}
