mod config;
mod repos;
mod services;
mod system;

use std::sync::Arc;

pub use config::{Config, ProviderConfig};
pub use repos::Repos;
pub use services::*;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
pub use system::{FakeSys, ISys, RealSys};

/// Everything a delivery run needs to hand a message over to the
/// outside world
#[derive(Clone)]
pub struct DeliveryProviders {
    pub email: Arc<dyn IEmailProvider>,
    pub sms: Arc<dyn ISmsProvider>,
}

#[derive(Clone)]
pub struct MailhornContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub providers: DeliveryProviders,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl MailhornContext {
    async fn create(params: ContextParams) -> Self {
        let repos = Repos::create_postgres(&params.postgres_connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        let config = Config::new();
        let providers = DeliveryProviders {
            email: Arc::new(HttpEmailProvider::new(
                &config.email_provider,
                config.provider_timeout_secs,
            )),
            sms: Arc::new(HttpSmsProvider::new(
                &config.sms_provider,
                config.provider_timeout_secs,
            )),
        };
        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            providers,
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> MailhornContext {
    MailhornContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string(),
    })
    .await
}

/// In process context for tests, backed by in memory repos and
/// recording delivery providers
pub fn setup_context_inmemory() -> MailhornContext {
    setup_context_inmemory_with(Arc::new(RealSys {}))
}

pub fn setup_context_inmemory_with(sys: Arc<dyn ISys>) -> MailhornContext {
    MailhornContext {
        repos: Repos::create_inmemory(),
        config: Config::new(),
        sys,
        providers: DeliveryProviders {
            email: Arc::new(InMemoryEmailProvider::new()),
            sms: Arc::new(InMemorySmsProvider::new()),
        },
    }
}

fn get_psql_connection_string() -> String {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .unwrap_or_else(|_| panic!("{} env var to be present.", PSQL_CONNECTION_STRING))
}

pub async fn run_migration() -> Result<(), MigrateError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&get_psql_connection_string())
        .await
        .expect("TO CONNECT TO POSTGRES");

    sqlx::migrate!().run(&pool).await
}
