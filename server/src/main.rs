//! Hostly marketplace server.
//!
//! Wires Postgres stores, the Kafka event bus (optional), and the LLM
//! concierge (optional) into the Axum router and serves it.
//!
//! # Configuration
//!
//! | Variable       | Default                 | Notes                          |
//! |----------------|-------------------------|--------------------------------|
//! | `DATABASE_URL` | required                | PostgreSQL connection string   |
//! | `KAFKA_BROKER` | unset                   | unset disables eventing        |
//! | `GROQ_API_KEY` | unset                   | unset disables the concierge   |
//! | `CORS_ORIGIN`  | `http://localhost:5173` | exact frontend origin          |
//! | `PORT`         | `3000`                  |                                |
//! | `RUST_LOG`     | `info`                  | tracing filter                 |

use anyhow::Context;
use axum::http::HeaderValue;
use hostly_concierge::{ChatClient, ConciergeService};
use hostly_core::{EventPublisher, NoopEventPublisher};
use hostly_events::consumers::{run_owner_consumer, run_traveler_consumer};
use hostly_events::KafkaEventBus;
use hostly_postgres::{
    PostgresBookingRepository, PostgresFavoriteRepository, PostgresPropertyRepository,
    PostgresSessionStore, PostgresUserRepository,
};
use hostly_web::{app_router, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Runtime configuration read from the environment.
struct Config {
    database_url: String,
    kafka_broker: Option<String>,
    cors_origin: HeaderValue,
    port: u16,
}

impl Config {
    fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let kafka_broker = std::env::var("KAFKA_BROKER").ok().filter(|b| !b.is_empty());
        let cors_origin = std::env::var("CORS_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:5173".to_string())
            .parse::<HeaderValue>()
            .context("CORS_ORIGIN is not a valid header value")?;
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse().context("PORT is not a valid port number")?,
            Err(_) => 3000,
        };
        Ok(Self {
            database_url,
            kafka_broker,
            cors_origin,
            port,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let pool = hostly_postgres::connect(&config.database_url).await?;
    hostly_postgres::run_migrations(&pool).await?;
    tracing::info!("Connected to PostgreSQL, migrations applied");

    let concierge = match ChatClient::from_env() {
        Ok(client) => {
            tracing::info!("Concierge enabled");
            ConciergeService::new(client)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Concierge unavailable, answering with fallback payloads");
            ConciergeService::disabled()
        }
    };

    let bookings = PostgresBookingRepository::new(pool.clone());

    match config.kafka_broker.as_deref() {
        Some(brokers) => match KafkaEventBus::builder().brokers(brokers).build() {
            Ok(bus) => {
                spawn_consumers(brokers, &bookings);
                serve(&config, &pool, bus, concierge).await
            }
            Err(e) => {
                tracing::warn!(error = %e, "Kafka unavailable, continuing without eventing");
                serve(&config, &pool, NoopEventPublisher, concierge).await
            }
        },
        None => {
            tracing::info!("KAFKA_BROKER not set, continuing without eventing");
            serve(&config, &pool, NoopEventPublisher, concierge).await
        }
    }
}

fn spawn_consumers(brokers: &str, bookings: &PostgresBookingRepository) {
    let owner_brokers = brokers.to_string();
    let owner_bookings = bookings.clone();
    tokio::spawn(async move {
        if let Err(e) = run_owner_consumer(&owner_brokers, owner_bookings).await {
            tracing::error!(error = %e, "Owner notification consumer stopped");
        }
    });

    let traveler_brokers = brokers.to_string();
    let traveler_bookings = bookings.clone();
    tokio::spawn(async move {
        if let Err(e) = run_traveler_consumer(&traveler_brokers, traveler_bookings).await {
            tracing::error!(error = %e, "Traveler notification consumer stopped");
        }
    });
}

async fn serve<E>(
    config: &Config,
    pool: &sqlx::PgPool,
    events: E,
    concierge: ConciergeService,
) -> anyhow::Result<()>
where
    E: EventPublisher + Clone + 'static,
{
    let state = AppState {
        users: PostgresUserRepository::new(pool.clone()),
        properties: PostgresPropertyRepository::new(pool.clone()),
        bookings: PostgresBookingRepository::new(pool.clone()),
        favorites: PostgresFavoriteRepository::new(pool.clone()),
        sessions: PostgresSessionStore::new(pool.clone()),
        events,
        concierge,
    };
    let app = app_router(state, &config.cors_origin);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(%addr, "Hostly server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
