/// System adapters: clock-based waiting and host introspection
mod environment_probe;
mod sleeper;

pub use environment_probe::HostEnvironmentProbe;
pub use sleeper::{CancelHandle, InterruptibleSleeper};
