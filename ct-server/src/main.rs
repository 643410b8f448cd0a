use ct_server::error::{Result as ServerErrorResult, ServerError};
use ct_server::{AppState, build_router, logger};

use ct_auth::{JwksClient, JwksVerifier, JwtValidator, TokenVerifier};
use ct_config::Config;
use ct_db::MIGRATOR;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> ServerErrorResult<()> {
    dotenvy::dotenv().ok();

    let config = Config::load()?;
    config.validate()?;

    logger::initialize(
        config.logging.level,
        log_file_path(&config)?,
        config.logging.colored,
    )?;
    config.log_summary();

    let db_path = config.database_path()?;
    let options = SqliteConnectOptions::new()
        .filename(&db_path)
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    MIGRATOR.run(&pool).await?;
    info!("Database ready: {}", db_path.display());

    let verifier = build_verifier(&config)?;

    let state = AppState {
        pool,
        verifier,
        audience: config.auth.audience.clone(),
        environment: config.server.environment.clone(),
    };

    let app = build_router(state);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Pick the token verifier: a local PEM pins verification to one fixed
/// key, otherwise keys come from the tenant's JWKS endpoint.
fn build_verifier(config: &Config) -> ServerErrorResult<Arc<dyn TokenVerifier>> {
    let issuer = config.auth.issuer();
    let audience = &config.auth.audience;

    if let Some(path) = &config.auth.jwt_public_key_path {
        let pem = std::fs::read_to_string(path).map_err(|e| ServerError::JwtKeyFile {
            path: path.clone(),
            source: e,
        })?;
        let validator = JwtValidator::with_rs256(&pem, &issuer, audience)?;
        info!("Token verification: local PEM key from {}", path);
        return Ok(Arc::new(validator));
    }

    let jwks = JwksClient::new(
        config.auth.jwks_uri(),
        Duration::from_secs(config.auth.jwks_cache_ttl_secs),
    );
    info!("Token verification: JWKS from {}", config.auth.jwks_uri());
    Ok(Arc::new(JwksVerifier::new(jwks, &issuer, audience)))
}

/// Resolve the log file target, creating the log directory when file
/// logging is configured.
fn log_file_path(config: &Config) -> ServerErrorResult<Option<PathBuf>> {
    let Some(file) = &config.logging.file else {
        return Ok(None);
    };

    let dir = PathBuf::from(&config.logging.dir);
    std::fs::create_dir_all(&dir)?;
    Ok(Some(dir.join(file)))
}
