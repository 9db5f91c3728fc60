use once_cell::sync::Lazy;

pub mod error;
pub mod registry;
pub mod types;

pub use error::*;
pub use registry::*;
pub use types::*;

use std::env;
use std::path::PathBuf;

/// Global driver registry, loaded lazily from the default backing file on
/// first access.
///
/// Prefer passing a `DriverRegistry` built with [`DriverRegistry::open`]
/// down from the composition root; this global exists for call sites that
/// still resolve drivers through process-wide state. `Lazy` guarantees the
/// load runs exactly once no matter how many threads race here.
pub static GLOBAL_DRIVER_REGISTRY: Lazy<DriverRegistry> =
    Lazy::new(|| DriverRegistry::open(default_registry_path()));

/// Accessor for the global driver registry.
#[inline]
pub fn global() -> &'static DriverRegistry {
    &GLOBAL_DRIVER_REGISTRY
}

/// Default backing-file location: `$CONFIG_PATH/drivers.json`, falling back
/// to the current directory when `CONFIG_PATH` is unset.
pub fn default_registry_path() -> PathBuf {
    let dir = env::var("CONFIG_PATH").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(dir).join("drivers.json")
}
