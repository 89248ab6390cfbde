//! Central module for application-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the backend base URL, the HTTP timeout, and the session token file path.

use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub http_timeout_seconds: u64,
    pub token_file: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_base_url =
            env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());

        let http_timeout_seconds = env::var("HTTP_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u64>()
            .context("HTTP_TIMEOUT_SECONDS must be a valid number")?;

        let token_file = env::var("TOKEN_FILE").unwrap_or_else(|_| ".session-token".to_string());

        Ok(Config {
            api_base_url,
            http_timeout_seconds,
            token_file,
        })
    }
}
