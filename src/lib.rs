//! rxbind
//!
//! Turns RC bind phrases into receiver UIDs and hands them to the active
//! receiver, without programming matching IDs on both ends by hand.
//!
//! # Overview
//!
//! A bind phrase is either a byte list (`"1,2,3,4,5,6"`) or free text. Free
//! text is hashed the same way transmitter build tooling does it, so a
//! receiver bound here pairs with a transmitter flashed with the same phrase.
//!
//! # Example
//!
//! ```rust
//! use rxbind::algorithm::{BindDispatcher, ProviderConfig, UidMode};
//! use rxbind::{BindRegistry, CrsfBinder};
//!
//! let binder = CrsfBinder::new(UidMode::Auto);
//! let log = binder.log();
//! let dispatcher = BindDispatcher::new(BindRegistry::crsf(binder));
//!
//! assert!(dispatcher.start_bind(&ProviderConfig::default(), "test"));
//! let uid = log.last().unwrap().result.unwrap();
//! assert_eq!(format!("{uid:x}"), "4f04fd822155");
//! ```

// Re-export the core algorithm
pub use rxbind_core as algorithm;

pub mod config;
pub mod crsf;

// Convenience re-exports
pub use algorithm::{derive_uid, BindDispatcher, BindRegistry, Uid, UidMode};
pub use config::{default_config_path, ConfigError, RxConfig};
pub use crsf::{BindLog, BindRecord, CrsfBinder};

/// Dispatcher wired with every bind implementation this tool ships
///
/// Currently a single CRSF collaborator; the returned log reports its
/// outcomes.
pub fn default_dispatcher(mode: UidMode) -> (BindDispatcher, BindLog) {
    let binder = CrsfBinder::new(mode);
    let log = binder.log();
    (BindDispatcher::new(BindRegistry::crsf(binder)), log)
}
