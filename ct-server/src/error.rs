//! Startup errors. Request-path errors live in [`crate::api::error`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ct_config::ConfigError),

    #[error("Auth setup error: {0}")]
    Auth(#[from] ct_auth::AuthError),

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("Repository error: {0}")]
    Repo(#[from] ct_db::DbError),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Logger error: {message}")]
    Logger { message: String },

    #[error("Cannot read key file {path}: {source}")]
    JwtKeyFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
