// libs/appointment-cell/src/services/session.rs
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use tracing::{debug, info};

use shared_models::auth::UserIdentity;
use shared_utils::jwt::decode_identity;

/// Per-session state handed to the sync controller at construction.
///
/// The generation advances whenever the credential changes or the session is
/// torn down. Background work captures it up front and checks
/// [`SessionContext::is_current`] before touching shared state.
pub struct SessionContext {
    credential: RwLock<Option<String>>,
    generation: AtomicU64,
}

impl SessionContext {
    pub fn new(credential: Option<String>) -> Self {
        Self {
            credential: RwLock::new(credential.filter(|t| !t.is_empty())),
            generation: AtomicU64::new(0),
        }
    }

    pub fn credential(&self) -> Option<String> {
        self.credential
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn has_credential(&self) -> bool {
        self.credential().is_some()
    }

    /// Returns true when the stored credential actually changed.
    pub fn set_credential(&self, credential: Option<String>) -> bool {
        let credential = credential.filter(|t| !t.is_empty());
        let mut current = self.credential
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if *current == credential {
            return false;
        }

        *current = credential;
        self.generation.fetch_add(1, Ordering::SeqCst);
        debug!("Session credential changed");
        true
    }

    /// User id read from the credential without verification. Advisory only:
    /// the backend re-validates it against the bearer token.
    pub fn advisory_identity(&self) -> Option<UserIdentity> {
        let token = self.credential()?;
        match decode_identity(&token) {
            Ok(identity) => Some(identity),
            Err(e) => {
                debug!("Could not read identity from credential: {}", e);
                None
            }
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation() == generation
    }

    pub fn teardown(&self) {
        *self.credential
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
        self.generation.fetch_add(1, Ordering::SeqCst);
        info!("Session torn down");
    }
}
