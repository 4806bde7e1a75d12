//! Configuration management infrastructure
//!
//! Directory-based configuration for pipeline runs:
//! - Per-section YAML file loading
//! - Closed-schema validation into an immutable `ValidatedConfig`
//! - Canonical snapshots with SHA-256 integrity digests

mod fields;
pub mod loader;
pub mod snapshot;
pub mod validator;

pub use loader::{load_config_dir, ConfigLoader, LoadPolicy};
pub use snapshot::{
    write_snapshot, ConfigSnapshot, SnapshotRecord, SnapshotVerification, HASH_FILE,
    SNAPSHOT_FILE,
};
pub use validator::{load_app_config, load_app_config_with, ConfigValidator};
