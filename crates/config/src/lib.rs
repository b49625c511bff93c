//! Configuration management for the Happa capacity tooling.
//!
//! This crate provides the explicit configuration struct handed to the
//! client and the aggregation core, plus a loader that builds it from
//! `.env` files, environment variables and direct overrides.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use types::{
    AuthConfig, Config, ConnectionConfig, MachineTypeSource, Provider, ScalingLimits,
};

#[cfg(test)]
pub(crate) mod test_util {
    use std::sync::{Mutex, OnceLock};

    pub fn global_test_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }
}
