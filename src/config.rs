use std::{env, path::PathBuf};

const DEV_JWT_SECRET: &str = "order-board-dev-secret";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Postgres URL. Without it the service keeps everything in memory.
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_file: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let jwt_secret = match (env::var("JWT_SECRET"), &database_url) {
            (Ok(secret), _) => secret,
            (Err(_), None) => DEV_JWT_SECRET.to_string(),
            (Err(_), Some(_)) => anyhow::bail!("JWT_SECRET must be set when DATABASE_URL is set"),
        };
        let token_file = env::var("TOKEN_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".order-board-token.json"));

        Ok(Self {
            database_url,
            host,
            port,
            jwt_secret,
            token_file,
        })
    }
}
