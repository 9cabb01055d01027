/// Use cases module containing application business logic orchestration
mod build_inventory;
mod remote_validator;

pub use build_inventory::BuildInventoryUseCase;
pub use remote_validator::{poll_delay, RemoteValidator};
