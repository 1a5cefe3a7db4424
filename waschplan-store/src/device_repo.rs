use async_trait::async_trait;
use std::collections::BTreeSet;
use tokio::sync::RwLock;

use waschplan_core::repository::DeviceRepository;

/// Registered push-notification device tokens.
///
/// Registration is idempotent; the client posts its token once per startup.
pub struct InMemoryDeviceRepo {
    tokens: RwLock<BTreeSet<String>>,
}

impl InMemoryDeviceRepo {
    pub fn new() -> Self {
        Self {
            tokens: RwLock::new(BTreeSet::new()),
        }
    }
}

impl Default for InMemoryDeviceRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeviceRepository for InMemoryDeviceRepo {
    async fn register_device(
        &self,
        token: &str,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        let inserted = self.tokens.write().await.insert(token.to_string());
        if inserted {
            tracing::info!("Registered device token");
        }
        Ok(inserted)
    }

    async fn list_devices(&self) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.tokens.read().await.iter().cloned().collect())
    }
}
