//! Inventory core: domain model, resolution policies and pure services.
//!
//! Nothing in this module touches the filesystem or the network directly;
//! I/O reaches it through the traits in `ports`.

pub mod domain;
pub mod policies;
pub mod services;
