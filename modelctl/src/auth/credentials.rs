//! Fixed credential store consulted at login.

use std::{collections::HashMap, fmt, sync::Arc};

use crate::config::Config;

/// Username → password pairs, loaded from configuration at startup and immutable afterwards.
#[derive(Clone, Default)]
pub struct CredentialStore {
    users: Arc<HashMap<String, String>>,
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore")
            .field("users", &self.users.len())
            .finish_non_exhaustive()
    }
}

impl CredentialStore {
    pub fn new(users: HashMap<String, String>) -> Self {
        Self { users: Arc::new(users) }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.auth.users.clone())
    }

    /// Exact match on both username and password.
    ///
    /// An unknown username and a wrong password are indistinguishable to the caller.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.users.get(username).is_some_and(|expected| expected == password)
    }
}
