//! Development seeder. Populates an empty database with an admin, two
//! regular users and a pair of upcoming concerts. A non-empty user table
//! makes it a no-op, so it is safe to run repeatedly.

use ct_server::error::Result as ServerErrorResult;

use ct_config::Config;
use ct_core::{Concert, ConcertStatus, Role, User};
use ct_db::{ConcertRepository, MIGRATOR, UserRepository};

use chrono::{Duration, Utc};
use log::{info, warn};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

#[tokio::main]
async fn main() -> ServerErrorResult<()> {
    dotenvy::dotenv().ok();

    let config = Config::load()?;
    config.validate()?;

    ct_server::logger::initialize(config.logging.level, None, config.logging.colored)?;

    let db_path = config.database_path()?;
    let options = SqliteConnectOptions::new()
        .filename(&db_path)
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    MIGRATOR.run(&pool).await?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await?;
    if existing > 0 {
        warn!("Database already has {} users, skipping seed", existing);
        return Ok(());
    }

    let users = UserRepository::new(pool.clone());

    let mut admin = User::new(
        "auth0|admin".to_string(),
        "admin@concert-tickets.com".to_string(),
        Some("Admin".to_string()),
    );
    admin.role = Role::Admin;
    users.create(&admin).await?;

    let alice = User::new(
        "auth0|test-user-1".to_string(),
        "alice@example.com".to_string(),
        Some("Alice Example".to_string()),
    );
    users.create(&alice).await?;

    let bob = User::new(
        "auth0|test-user-2".to_string(),
        "bob@example.com".to_string(),
        None,
    );
    users.create(&bob).await?;

    info!("Seeded 3 users (1 admin)");

    let concerts = ConcertRepository::new(pool.clone());
    let now = Utc::now();

    let summer = Concert::new(
        "Summer Night Live".to_string(),
        "Berlin Arena".to_string(),
        now + Duration::days(30),
        5000,
        ConcertStatus::Scheduled,
    );
    concerts.create(&summer).await?;

    let acoustic = Concert::new(
        "Acoustic Evening".to_string(),
        "Hamburg Jazz Hall".to_string(),
        now + Duration::days(45),
        300,
        ConcertStatus::Scheduled,
    );
    concerts.create(&acoustic).await?;

    info!("Seeded 2 concerts");
    info!("Seed complete: {}", db_path.display());

    Ok(())
}
