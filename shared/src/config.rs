use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 8080;

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub port: u16,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            host: std::env::var("DATABASE_HOST").context("DATABASE_HOST is not set")?,
            port: std::env::var("DATABASE_PORT")
                .context("DATABASE_PORT is not set")?
                .parse()
                .context("DATABASE_PORT must be a port number")?,
            username: std::env::var("DATABASE_USERNAME").context("DATABASE_USERNAME is not set")?,
            password: std::env::var("DATABASE_PASSWORD").context("DATABASE_PASSWORD is not set")?,
            database: std::env::var("DATABASE_NAME").context("DATABASE_NAME is not set")?,
        };
        let port = match std::env::var("PORT") {
            Ok(value) => value.parse().context("PORT must be a port number")?,
            Err(_) => DEFAULT_PORT,
        };
        Ok(Self { database, port })
    }
}

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_config_defaults_port_to_8080() {
        std::env::set_var("DATABASE_HOST", "localhost");
        std::env::set_var("DATABASE_PORT", "5432");
        std::env::set_var("DATABASE_USERNAME", "app");
        std::env::set_var("DATABASE_PASSWORD", "passwd");
        std::env::set_var("DATABASE_NAME", "app");

        std::env::remove_var("PORT");
        assert_eq!(AppConfig::new().unwrap().port, 8080);

        std::env::set_var("PORT", "3000");
        assert_eq!(AppConfig::new().unwrap().port, 3000);
        std::env::remove_var("PORT");
    }
}
