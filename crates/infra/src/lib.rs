mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, ExpoConfig};
use repos::Repos;
pub use repos::{DeleteResult, IReminderRepo, IUserRepo};
pub use services::{ExpoPushRestApi, IPushGateway, PushTicket};
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
pub use system::ISys;
use system::RealSys;
use tracing::info;

#[derive(Clone)]
pub struct NudgeContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub push_gateway: Arc<dyn IPushGateway>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl NudgeContext {
    async fn create(params: ContextParams) -> Self {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&params.postgres_connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        let config = Config::new();
        Self {
            repos: Repos::create_postgres(pool),
            push_gateway: create_push_gateway(&config),
            sys: Arc::new(RealSys {}),
            config,
        }
    }

    /// Context backed by inmemory repositories, used when no database is
    /// configured and by tests
    pub fn create_inmemory() -> Self {
        let config = Config::new();
        Self {
            repos: Repos::create_inmemory(),
            push_gateway: create_push_gateway(&config),
            sys: Arc::new(RealSys {}),
            config,
        }
    }
}

fn create_push_gateway(config: &Config) -> Arc<dyn IPushGateway> {
    Arc::new(ExpoPushRestApi::new(
        config.expo.base_url.clone(),
        config.expo.access_token.clone(),
        Duration::from_millis(config.expo.request_timeout_millis),
    ))
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> NudgeContext {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    match std::env::var(PSQL_CONNECTION_STRING) {
        Ok(conn) => {
            run_migration(&conn)
                .await
                .expect("Database migrations to succeed");
            NudgeContext::create(ContextParams {
                postgres_connection_string: conn,
            })
            .await
        }
        Err(_) => {
            info!(
                "Did not find {} environment variable. Going to use inmemory repositories.",
                PSQL_CONNECTION_STRING
            );
            NudgeContext::create_inmemory()
        }
    }
}

pub async fn run_migration(connection_string: &str) -> Result<(), MigrateError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(connection_string)
        .await
        .expect("Postgres credentials must be set and valid");

    sqlx::migrate!().run(&pool).await
}
