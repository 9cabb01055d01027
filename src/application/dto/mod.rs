/// Data Transfer Objects for application layer
///
/// DTOs carry request parameters and settings from the CLI into the use
/// cases, keeping the inventory core free of configuration concerns.
mod inventory_request;
mod validator_config;

pub use inventory_request::InventoryRequest;
pub use validator_config::{ValidatorConfig, DEFAULT_MAX_POLL_ATTEMPTS, DEFAULT_SERVICE_URL};
