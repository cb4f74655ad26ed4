//! Session identity.
//!
//! A session is a random token generated on first use and persisted in local
//! storage. It is never rotated and never expires client-side. There is no
//! collision detection; uniqueness rests on the birthday bound of a 16-char
//! base-36 token.

use rand::Rng;
use rand::seq::IndexedRandom;
use shopease_core::SessionId;
use tracing::{debug, info};

use crate::storage::{LocalStorage, StorageError};

/// Local storage keys.
pub mod keys {
    /// Key holding the session token.
    pub const SESSION_ID: &str = "session_id";
}

/// Length of generated tokens.
pub const TOKEN_LENGTH: usize = 16;

const TOKEN_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Resolves the session for a storage scope.
#[derive(Debug, Default, Clone, Copy)]
pub struct SessionManager;

impl SessionManager {
    /// Return the persisted session, generating and persisting one on first
    /// access.
    ///
    /// Storage is written at most once per scope: only when no token exists.
    ///
    /// # Errors
    ///
    /// Returns an error if local storage cannot be read or written.
    pub fn resolve(storage: &mut impl LocalStorage) -> Result<SessionId, StorageError> {
        Self::resolve_with(storage, &mut rand::rng())
    }

    /// Like [`resolve`](Self::resolve) with an explicit random source.
    ///
    /// # Errors
    ///
    /// Returns an error if local storage cannot be read or written.
    pub fn resolve_with<R: Rng + ?Sized>(
        storage: &mut impl LocalStorage,
        rng: &mut R,
    ) -> Result<SessionId, StorageError> {
        if let Some(existing) = storage.get_item(keys::SESSION_ID)?
            && !existing.is_empty()
        {
            debug!("Reusing persisted session");
            return Ok(SessionId::new(existing));
        }

        let token = generate_token(rng);
        storage.set_item(keys::SESSION_ID, &token)?;
        info!(session_id = %token, "Created new session");
        Ok(SessionId::new(token))
    }
}

/// Generate a lowercase base-36 token.
fn generate_token<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..TOKEN_LENGTH)
        .filter_map(|_| TOKEN_ALPHABET.choose(rng).map(|b| char::from(*b)))
        .collect()
}
