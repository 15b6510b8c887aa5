use core_config::{app_info, server::ServerConfig, shutdown_timeout_from_env, AppInfo, FromEnv};
use database::mongodb::MongoConfig;
use std::time::Duration;

pub use core_config::Environment;

/// Application configuration, composed from the shared config pieces.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub mongodb: MongoConfig,
    /// Bound on connection draining and on cleanup after a shutdown signal
    pub shutdown_timeout: Duration,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let mongodb = MongoConfig::from_env()?.with_app_name(env!("CARGO_PKG_NAME"));

        Ok(Self {
            app: app_info!(),
            environment: Environment::from_env(),
            server: ServerConfig::from_env()?,
            mongodb,
            shutdown_timeout: shutdown_timeout_from_env()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_with_only_mongo_uri() {
        temp_env::with_vars(
            [
                ("MONGO_URI", Some("mongodb://localhost:27017")),
                ("MONGODB_DATABASE", None),
                ("PORT", None),
                ("HOST", None),
                ("APP_ENV", None),
                ("SHUTDOWN_TIMEOUT_SECS", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.app.name, "catalog_api");
                assert_eq!(config.server.port, 3000);
                assert_eq!(config.server.address(), "0.0.0.0:3000");
                assert_eq!(config.mongodb.database(), "catalog");
                assert_eq!(config.shutdown_timeout, Duration::from_secs(10));
                assert!(config.environment.is_development());
            },
        );
    }

    #[test]
    fn test_missing_mongo_uri_fails() {
        temp_env::with_vars_unset(["MONGO_URI", "MONGODB_URL", "MONGO_URL"], || {
            assert!(Config::from_env().is_err());
        });
    }

    #[test]
    fn test_overrides() {
        temp_env::with_vars(
            [
                ("MONGO_URI", Some("mongodb://db:27017")),
                ("MONGODB_DATABASE", Some("shop")),
                ("PORT", Some("8080")),
                ("APP_ENV", Some("production")),
                ("SHUTDOWN_TIMEOUT_SECS", Some("3")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.server.port, 8080);
                assert_eq!(config.mongodb.database(), "shop");
                assert_eq!(config.shutdown_timeout, Duration::from_secs(3));
                assert!(config.environment.is_production());
            },
        );
    }

    #[test]
    fn test_invalid_shutdown_timeout_fails() {
        temp_env::with_vars(
            [
                ("MONGO_URI", Some("mongodb://localhost:27017")),
                ("SHUTDOWN_TIMEOUT_SECS", Some("soon")),
            ],
            || {
                assert!(Config::from_env().is_err());
            },
        );
    }
}
