use std::sync::Arc;

use anyhow::Context;
use auth::Clock;
use auth::PasswordHasher;
use auth::SystemClock;
use auth::TokenIssuer;
use project_service::config::Config;
use project_service::domain::project::service::ProjectService;
use project_service::domain::session::service::SessionService;
use project_service::domain::user::credentials::Credentials;
use project_service::domain::user::models::Avatar;
use project_service::domain::user::service::UserService;
use project_service::inbound::http::router::create_router;
use project_service::inbound::http::router::AppState;
use project_service::outbound::repositories::PostgresProjectRepository;
use project_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "project_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "project-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load().context("invalid configuration")?;

    tracing::info!(
        http_port = config.server.http_port,
        request_timeout_secs = config.server.request_timeout_secs,
        allowed_origins = ?config.server.allowed_origins,
        access_ttl_secs = config.jwt.access_ttl_secs,
        refresh_ttl_secs = config.jwt.refresh_ttl_secs,
        "Configuration loaded"
    );

    let avatar_bytes = tokio::fs::read(&config.avatar.default_path)
        .await
        .with_context(|| {
            format!(
                "cannot read default avatar at {}",
                config.avatar.default_path.display()
            )
        })?;
    let default_avatar = Avatar::png(avatar_bytes);

    let hasher = PasswordHasher::with_cost(config.hash_cost())
        .context("invalid password hashing cost")?;
    let credentials = Credentials::new(hasher);

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let token_issuer = Arc::new(
        TokenIssuer::new(config.token_secrets(), config.token_lifetimes())
            .context("invalid token configuration")?
            .with_clock(Arc::clone(&clock)),
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
        .context("cannot connect to database")?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations")
        .run(&pg_pool)
        .await
        .context("database migration failed")?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let project_repository = Arc::new(PostgresProjectRepository::new(pg_pool));

    let state = AppState {
        session_service: Arc::new(SessionService::new(
            Arc::clone(&user_repository),
            Arc::clone(&token_issuer),
            credentials.clone(),
            default_avatar,
        )),
        user_service: Arc::new(UserService::new(
            Arc::clone(&user_repository),
            credentials,
            Arc::clone(&clock),
        )),
        project_service: Arc::new(ProjectService::new(
            project_repository,
            user_repository,
            clock,
        )),
        token_issuer,
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        state,
        config.request_timeout(),
        config.allowed_origins(),
    );
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited");

    Ok(())
}
