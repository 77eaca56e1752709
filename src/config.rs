use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub jwt_secret: String,
    pub session_ttl: usize,

    // The single configured credential pair
    pub login_username: String,
    pub login_password: String,

    pub api_prefix: String,

    // Flat files
    pub attendance_file: PathBuf,
    pub register_file: PathBuf,
    pub export_file: PathBuf,

    pub log_dir: PathBuf,
    pub log_level: tracing::Level,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_addr: var_or("SERVER_ADDR", "127.0.0.1:8080"),
            jwt_secret: required("JWT_SECRET")?,
            session_ttl: parsed_or("SESSION_TTL", 43_200)?, // default 12 h

            login_username: required("LOGIN_USERNAME")?,
            login_password: required("LOGIN_PASSWORD")?,

            api_prefix: var_or("API_PREFIX", "/api"),

            attendance_file: var_or("ATTENDANCE_FILE", "attendance_data.csv").into(),
            register_file: var_or("REGISTER_FILE", "REGISTER.csv").into(),
            export_file: var_or("EXPORT_FILE", "exported_attendance_data.csv").into(),

            log_dir: var_or("LOG_DIR", "logs").into(),
            log_level: parsed_or("LOG_LEVEL", tracing::Level::DEBUG)?,
        })
    }
}

fn required(key: &str) -> Result<String> {
    env::var(key).with_context(|| format!("{key} must be set"))
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parsed_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        Err(_) => Ok(default),
    }
}
