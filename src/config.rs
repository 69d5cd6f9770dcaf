use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            // File-backed SQLite so the demo runs without an external server;
            // point DATABASE_URL at MySQL for a real deployment.
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://orgstore.db?mode=rwc".to_string()),
            max_connections: env::var("MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap(),
        }
    }
}
