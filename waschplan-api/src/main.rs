use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use waschplan_api::{app, worker, AppState};
use waschplan_store::{InMemoryDeviceRepo, InMemoryMieterRepo, InMemoryTerminRepo};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "waschplan_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = waschplan_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Waschplan API on port {}", config.server.port);

    let termin_repo = Arc::new(InMemoryTerminRepo::new(config.plan_rules.termin_dauer_stunden));
    let mieter_repo = if config.mieter.is_empty() {
        Arc::new(InMemoryMieterRepo::with_default_haus())
    } else {
        Arc::new(InMemoryMieterRepo::from_seeds(&config.mieter))
    };
    let device_repo = Arc::new(InMemoryDeviceRepo::new());

    // Event fan-out for SSE clients and the notify worker
    let (events_tx, _) = tokio::sync::broadcast::channel(100);

    if config.notify.enabled {
        tokio::spawn(worker::start_notify_worker(
            events_tx.subscribe(),
            device_repo.clone() as Arc<dyn waschplan_core::repository::DeviceRepository>,
            config.notify.clone(),
        ));
    }

    let app_state = AppState {
        termin_repo,
        mieter_repo,
        device_repo,
        events_tx,
        plan_rules: config.plan_rules.clone(),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
