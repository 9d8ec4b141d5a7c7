use axum::{Router, routing::get};
use campus_hub_backend_api::BackendClient;
use campus_hub_schedule::{HolidayClient, TimetableClient};
use campus_hub_server::{
    api,
    auth::{self, AppState, OidcClient},
    config::ServerConfig,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = ServerConfig::from_env().expect("failed to load configuration");
    tracing::info!("Loaded configuration");

    // Clients for the community backend and calendar sources
    let backend = BackendClient::new(
        config.backend.api_url.clone(),
        std::time::Duration::from_secs(config.backend.timeout_seconds),
    )
    .expect("failed to create backend client");

    let calendar_timeout = std::time::Duration::from_secs(config.calendar.timeout_seconds);
    let timetable = TimetableClient::new(config.calendar.timetable_url.clone(), calendar_timeout)
        .expect("failed to create timetable client");
    let holidays = HolidayClient::new(
        config.calendar.holidays_url.clone(),
        config.calendar.country.clone(),
        calendar_timeout,
    )
    .expect("failed to create holiday client");

    // Initialize OIDC client
    tracing::info!("Discovering OIDC provider...");
    let oidc_client = OidcClient::discover(config.oidc)
        .await
        .expect("failed to discover OIDC provider");

    // Create application state
    let app_state = Arc::new(AppState::new(
        oidc_client,
        config.session.clone(),
        backend,
        timetable,
        holidays,
    ));

    // Spawn periodic session cleanup task
    let cleanup_state = app_state.clone();
    let cleanup_interval_secs = config.session.cleanup_interval_seconds;
    tokio::spawn(async move {
        let mut interval =
            tokio::time::interval(std::time::Duration::from_secs(cleanup_interval_secs));
        loop {
            interval.tick().await;
            let count = cleanup_state.sessions.delete_expired().await;
            if count > 0 {
                tracing::debug!(deleted_sessions = count, "Periodic session cleanup");
            }
        }
    });

    let app = Router::new()
        // Auth routes
        .route("/auth/login", get(auth::login))
        .route("/auth/callback", get(auth::callback))
        .route("/auth/logout", get(auth::logout))
        // Liveness
        .route("/healthz", get(healthz))
        // Authenticated API
        .merge(api::router())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", config.listen_addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("server error");
}

async fn healthz() -> &'static str {
    "ok"
}
