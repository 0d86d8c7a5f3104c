//! Portfolio Contact server entry point.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use portfolio_contact::adapters::email::{SmtpMailer, SmtpMailerConfig};
use portfolio_contact::adapters::http::{app_router, AppState, OperatorToken};
use portfolio_contact::adapters::memory::InMemoryConversationStore;
use portfolio_contact::adapters::messaging::{EmailChannel, WhatsAppChannel};
use portfolio_contact::adapters::postgres::{run_migrations, PostgresConversationStore};
use portfolio_contact::adapters::twilio::{TwilioClient, TwilioClientConfig};
use portfolio_contact::application::Notifier;
use portfolio_contact::config::{AppConfig, DatabaseConfig, EmailConfig, TwilioConfig};
use portfolio_contact::ports::{ChatSender, ConversationStore};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let chat_sender = build_chat_sender(&config.twilio)?;
    let mut notifier = Notifier::new();

    match (&chat_sender, config.twilio.owner_address()) {
        (Some(sender), Some(owner)) => {
            notifier = notifier.with_primary(Arc::new(WhatsAppChannel::new(sender.clone(), owner)));
            tracing::info!("WhatsApp channel enabled");
        }
        _ => tracing::warn!("WhatsApp channel not configured"),
    }

    match build_mailer(&config.email).await {
        Some((mailer, owner_email)) => {
            notifier = notifier.with_secondary(Arc::new(EmailChannel::new(mailer, owner_email)));
            tracing::info!("Email channel enabled");
        }
        None => tracing::warn!("Email channel not configured"),
    }

    let mut state = AppState::new(notifier)
        .with_operator_token(OperatorToken::new(config.webhook.token().map(str::to_string)));
    if let Some(sender) = chat_sender {
        state = state.with_chat_sender(sender);
    }
    match build_store(&config.database).await {
        Some(store) => state = state.with_store(store),
        None => tracing::warn!("No conversation store configured; threads will not be kept"),
    }
    if !state.operator_token().is_configured() {
        tracing::warn!("Webhook token not set; webhook and operator routes will reject all requests");
    }

    let addr = config.server.socket_addr()?;
    let app = app_router(state, &config.server);
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// JSON output in production, human-readable otherwise. `RUST_LOG` wins over config.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn build_chat_sender(config: &TwilioConfig) -> Result<Option<Arc<dyn ChatSender>>, BoxError> {
    let Some((sid, token)) = config.credentials() else {
        return Ok(None);
    };

    let client_config = TwilioClientConfig::new(sid, token, config.whatsapp_from.clone())
        .with_base_url(config.api_base_url.clone())
        .with_timeout(config.timeout());
    Ok(Some(Arc::new(TwilioClient::new(client_config)?)))
}

/// Disables email when the relay rejects the credentials at startup.
async fn build_mailer(config: &EmailConfig) -> Option<(Arc<SmtpMailer>, String)> {
    let (user, password) = (config.user()?, config.password()?);
    let owner_email = config.owner_email()?.to_string();

    let mut mailer_config = SmtpMailerConfig::new(config.smtp_host.clone(), user, password)
        .with_from_name(config.from_name.clone())
        .with_timeout(config.timeout());
    if let Some(port) = config.smtp_port {
        mailer_config = mailer_config.with_port(port);
    }

    let mailer = match SmtpMailer::new(mailer_config) {
        Ok(mailer) => mailer,
        Err(e) => {
            tracing::error!(error = %e, "Invalid SMTP settings; email disabled");
            return None;
        }
    };
    if let Err(e) = mailer.verify().await {
        tracing::error!(error = %e, host = %config.smtp_host, "SMTP verification failed; email disabled");
        return None;
    }

    Some((Arc::new(mailer), owner_email))
}

/// A store that cannot be reached is logged and left out; conversation routes then answer 503.
async fn build_store(config: &DatabaseConfig) -> Option<Arc<dyn ConversationStore>> {
    if config.in_memory {
        tracing::info!("Using in-memory conversation store");
        return Some(Arc::new(InMemoryConversationStore::new()));
    }

    let url = config.url()?;

    let pool = match PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect(url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to PostgreSQL; conversation store disabled");
            return None;
        }
    };
    if config.run_migrations {
        if let Err(e) = run_migrations(&pool).await {
            tracing::error!(error = %e, "Database migrations failed; conversation store disabled");
            return None;
        }
        tracing::info!("Database migrations applied");
    }

    tracing::info!(max_connections = config.max_connections, "Using PostgreSQL conversation store");
    Some(Arc::new(PostgresConversationStore::new(pool)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
