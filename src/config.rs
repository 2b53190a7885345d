use std::{net::SocketAddr, path::PathBuf};

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub session_idle_minutes: i64,
    /// Voter export loaded into an empty voter table at startup.
    pub voter_csv: Option<PathBuf>,
}

impl Config {
    /// Reads `.env` (if any) and the process environment.
    pub fn from_env() -> anyhow::Result<Config> {
        dotenv::dotenv().ok();

        let database_url = dotenv::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://cs412.db".to_owned());

        let bind_addr = dotenv::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_owned())
            .parse()
            .context("BIND_ADDR is not a socket address")?;

        let session_idle_minutes = match dotenv::var("SESSION_IDLE_MINUTES") {
            Ok(minutes) => minutes
                .parse()
                .context("SESSION_IDLE_MINUTES is not a number")?,
            Err(_) => 30,
        };

        let voter_csv = dotenv::var("VOTER_CSV").ok().map(PathBuf::from);

        Ok(Config {
            database_url,
            bind_addr,
            session_idle_minutes,
            voter_csv,
        })
    }
}
