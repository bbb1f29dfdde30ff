//! Test helpers shared by the config-factory crates.
//!
//! [`env`] serialises mutation of the process environment, which
//! `OverrideSet::from_env` snapshots. [`figment`] wraps `figment::Jail` so
//! file-backed builds run inside a scratch working directory.

pub mod env;
pub mod figment;
