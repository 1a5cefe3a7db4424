pub mod app_config;
pub mod device_repo;
pub mod mieter_repo;
pub mod termin_repo;

pub use app_config::Config;
pub use device_repo::InMemoryDeviceRepo;
pub use mieter_repo::InMemoryMieterRepo;
pub use termin_repo::InMemoryTerminRepo;
