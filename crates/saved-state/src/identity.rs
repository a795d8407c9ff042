//! Mocked identity provider.
//!
//! Stands in for real authentication: any email plus a password of at least
//! six characters signs in. Every login or registration mints a fresh
//! identity id (`user-<unix millis>`), so the same email signing in twice
//! gets two unrelated identities and therefore two separate saved states.
//!
//! The signed-in identity is stored as JSON under the `user` key and read
//! back when the provider is restored at process start.

use crate::error::{AuthError, StorageError};
use crate::keys::USER_KEY;
use crate::storage::KeyValueStorage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Shortest password the mock login accepts.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Who is currently signed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque token used to scope saved state
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

/// Editable profile fields; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
}

/// Issues and remembers the mocked identity.
pub struct IdentityProvider {
    storage: Arc<dyn KeyValueStorage>,
    current: Option<Identity>,
    last_issued_millis: i64,
}

impl IdentityProvider {
    /// Restore the signed-in identity from storage, if there is one.
    ///
    /// An unreadable `user` record means "signed out".
    pub fn restore(storage: Arc<dyn KeyValueStorage>) -> Self {
        let current = match storage.get_item(USER_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Identity>(&json) {
                Ok(identity) => Some(identity),
                Err(e) => {
                    warn!("Ignoring unreadable stored user: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Failed to read stored user: {}", e);
                None
            }
        };
        if let Some(identity) = &current {
            info!("Restored session for {} ({})", identity.email, identity.id);
        }
        Self {
            storage,
            current,
            last_issued_millis: 0,
        }
    }

    pub fn current(&self) -> Option<&Identity> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Sign in with the mock credential rules and persist the new identity.
    pub fn login(&mut self, email: &str, password: &str) -> Result<&Identity, AuthError> {
        validate_credentials(email, password)?;
        let email = email.trim();
        let name = email.split('@').next().unwrap_or(email).to_string();
        self.sign_in(email, name)
    }

    /// Register a new account. Behaves like `login` with an explicit name.
    pub fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<&Identity, AuthError> {
        validate_credentials(email, password)?;
        let email = email.trim();
        let name = match name.trim() {
            "" => email.split('@').next().unwrap_or(email),
            name => name,
        };
        self.sign_in(email, name.to_string())
    }

    fn sign_in(&mut self, email: &str, name: String) -> Result<&Identity, AuthError> {
        let identity = Identity {
            id: self.next_identity_id(),
            email: email.to_string(),
            name,
            created_at: Utc::now(),
            location: None,
            bio: None,
        };
        self.save(&identity)?;
        info!("Signed in {} as {}", identity.email, identity.id);
        Ok(&*self.current.insert(identity))
    }

    /// Sign out. Removes the `user` record; saved sets stay in storage.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.storage.remove_item(USER_KEY)?;
        if let Some(identity) = self.current.take() {
            info!("Signed out {}", identity.id);
        }
        Ok(())
    }

    /// Edit the signed-in profile. The identity id never changes here.
    pub fn update_profile(&mut self, update: ProfileUpdate) -> Result<&Identity, AuthError> {
        let mut identity = self.current.clone().ok_or(AuthError::NotSignedIn)?;
        if let Some(name) = update.name {
            identity.name = name;
        }
        if let Some(email) = update.email {
            identity.email = email;
        }
        if let Some(location) = update.location {
            identity.location = Some(location);
        }
        if let Some(bio) = update.bio {
            identity.bio = Some(bio);
        }
        self.save(&identity)?;
        Ok(&*self.current.insert(identity))
    }

    fn save(&self, identity: &Identity) -> Result<(), StorageError> {
        let json = serde_json::to_string(identity)?;
        self.storage.set_item(USER_KEY, &json)
    }

    /// `user-<millis>`, strictly increasing within this provider.
    fn next_identity_id(&mut self) -> String {
        let millis = Utc::now().timestamp_millis().max(self.last_issued_millis + 1);
        self.last_issued_millis = millis;
        format!("user-{}", millis)
    }
}

fn validate_credentials(email: &str, password: &str) -> Result<(), AuthError> {
    if email.trim().is_empty() || password.trim().is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}
