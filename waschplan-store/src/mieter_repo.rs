use async_trait::async_trait;

use waschplan_core::mieter::Mieter;
use waschplan_core::repository::MieterRepository;

use crate::app_config::MieterSeed;

/// Read-only tenant registry, seeded once at startup from configuration.
pub struct InMemoryMieterRepo {
    mieter: Vec<Mieter>,
}

impl InMemoryMieterRepo {
    pub fn from_seeds(seeds: &[MieterSeed]) -> Self {
        let mieter = seeds
            .iter()
            .map(|s| Mieter::new(s.id.clone(), s.name.clone(), s.avatar.clone()))
            .collect();
        Self { mieter }
    }

    /// The four parties of the original house
    pub fn with_default_haus() -> Self {
        Self {
            mieter: vec![
                Mieter::new("mieter-1", "Hugo", "avatars/Hugo.jpg"),
                Mieter::new("mieter-2", "Familie Ramseier", "avatars/FamRamseier.jpg"),
                Mieter::new("mieter-3", "Frau Brönnimann", "avatars/FrauBroennimann.png"),
                Mieter::new("mieter-4", "Beat & Lisa", "avatars/BeatLisa.jpg"),
            ],
        }
    }
}

#[async_trait]
impl MieterRepository for InMemoryMieterRepo {
    async fn list_mieter(&self) -> Result<Vec<Mieter>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.mieter.clone())
    }

    async fn get_mieter(
        &self,
        mieter_id: &str,
    ) -> Result<Option<Mieter>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.mieter.iter().find(|m| m.id == mieter_id).cloned())
    }
}
