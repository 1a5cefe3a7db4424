use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub plan_rules: PlanRules,
    pub notify: NotifyConfig,
    #[serde(default)]
    pub mieter: Vec<MieterSeed>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

/// Calendar rules the booking flow enforces server-side
#[derive(Debug, Deserialize, Clone)]
pub struct PlanRules {
    /// A wash day spans this many hours from its start
    #[serde(default = "default_dauer")]
    pub termin_dauer_stunden: i64,
    /// Earliest bookable hour of day (calendar slot minimum)
    #[serde(default = "default_min_hour")]
    pub slot_min_hour: u32,
    /// Latest bookable hour of day (calendar slot maximum)
    #[serde(default = "default_max_hour")]
    pub slot_max_hour: u32,
}

fn default_dauer() -> i64 {
    9
}
fn default_min_hour() -> u32 {
    7
}
fn default_max_hour() -> u32 {
    22
}

#[derive(Debug, Deserialize, Clone)]
pub struct NotifyConfig {
    pub enabled: bool,
    /// Push gateway the worker would hand tokens to; None logs only
    pub gateway_url: Option<String>,
}

/// Tenant parties seeded into the read-only Mieter repository
#[derive(Debug, Deserialize, Clone)]
pub struct MieterSeed {
    pub id: String,
    pub name: String,
    pub avatar: String,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Environment-specific file, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `WASCHPLAN__SERVER__PORT=8080`
            .add_source(config::Environment::with_prefix("WASCHPLAN").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
