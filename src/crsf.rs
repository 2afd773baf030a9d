//! CRSF bind collaborator
//!
//! Stands in for the flight controller's CRSF receiver driver: it turns the
//! dispatched phrase into a UID and keeps the outcome so the caller can
//! report it. Whether the receiver accepted the UID is this collaborator's
//! business, not the dispatcher's.

use rxbind_core::{PhraseBinder, Uid, UidMode};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{info, warn};

/// Outcome of the most recent bind handed to a [`CrsfBinder`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindRecord {
    pub phrase: String,
    pub result: Result<Uid, rxbind_core::Error>,
}

/// Shared view of the last bind, readable after the binder is registered
#[derive(Debug, Clone, Default)]
pub struct BindLog {
    last: Arc<Mutex<Option<BindRecord>>>,
}

impl BindLog {
    pub fn last(&self) -> Option<BindRecord> {
        self.last
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, record: BindRecord) {
        *self.last.lock().unwrap_or_else(PoisonError::into_inner) = Some(record);
    }
}

/// Derives the UID for a CRSF receiver from a dispatched phrase
#[derive(Debug, Clone)]
pub struct CrsfBinder {
    mode: UidMode,
    log: BindLog,
}

impl CrsfBinder {
    pub fn new(mode: UidMode) -> Self {
        Self {
            mode,
            log: BindLog::default(),
        }
    }

    /// Handle for reading bind outcomes once the binder is moved into a registry
    pub fn log(&self) -> BindLog {
        self.log.clone()
    }
}

impl PhraseBinder for CrsfBinder {
    fn bind_with_phrase(&self, phrase: &str) {
        let result = rxbind_core::derive_uid(phrase, self.mode);
        match &result {
            Ok(uid) => info!(mode = %self.mode, uid = %hex::encode(uid), "crsf bind uid derived"),
            Err(err) => warn!(mode = %self.mode, %err, "crsf bind failed"),
        }
        self.log.record(BindRecord {
            phrase: phrase.to_string(),
            result,
        });
    }
}
