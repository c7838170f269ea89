// src/config.rs

use dotenvy::dotenv;
use std::env;

/// Page size for the session listing and the enrolled-groups sub-list.
pub const PAGE_SIZE: i64 = 5;

/// Length of a session access token.
pub const TOKEN_LENGTH: usize = 6;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            database_url,
            rust_log,
        }
    }
}
