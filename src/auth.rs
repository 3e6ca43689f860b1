//! Credential store and login check
//!
//! The store is a read-only table injected into the router at startup.
//! There is no hashing and no session issuance; a successful lookup yields
//! only the role tag for that call.

use crate::{ClimaCareError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Role assigned to an authenticated user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Citizen,
    Hospital,
}

/// A single username's credentials
#[derive(Debug, Clone)]
pub struct CredentialEntry {
    pub password: String,
    pub role: Role,
}

/// Fixed username -> credential table, immutable after construction
#[derive(Debug, Clone)]
pub struct CredentialStore {
    users: HashMap<String, CredentialEntry>,
}

impl CredentialStore {
    /// Build a store from explicit entries
    pub fn new(entries: impl IntoIterator<Item = (String, CredentialEntry)>) -> Self {
        Self {
            users: entries.into_iter().collect(),
        }
    }

    /// Exact-match lookup; any mismatch or unknown username is `Unauthorized`
    pub fn authenticate(&self, username: &str, password: &str) -> Result<Role> {
        match self.users.get(username) {
            Some(entry) if entry.password == password => Ok(entry.role),
            _ => Err(ClimaCareError::Unauthorized),
        }
    }
}

impl Default for CredentialStore {
    /// The built-in demo table
    fn default() -> Self {
        Self::new([
            (
                "citizen".to_string(),
                CredentialEntry {
                    password: "1234".to_string(),
                    role: Role::Citizen,
                },
            ),
            (
                "hospital".to_string(),
                CredentialEntry {
                    password: "9999".to_string(),
                    role: Role::Hospital,
                },
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("citizen", "1234", Role::Citizen)]
    #[case("hospital", "9999", Role::Hospital)]
    fn test_valid_credentials(#[case] username: &str, #[case] password: &str, #[case] role: Role) {
        let store = CredentialStore::default();
        assert_eq!(store.authenticate(username, password).unwrap(), role);
    }

    #[rstest]
    #[case("citizen", "wrong")]
    #[case("citizen", "")]
    #[case("hospital", "1234")]
    #[case("unknown", "1234")]
    #[case("", "")]
    fn test_invalid_credentials(#[case] username: &str, #[case] password: &str) {
        let store = CredentialStore::default();
        assert!(matches!(
            store.authenticate(username, password),
            Err(ClimaCareError::Unauthorized)
        ));
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Citizen).unwrap(), "\"citizen\"");
        assert_eq!(
            serde_json::to_string(&Role::Hospital).unwrap(),
            "\"hospital\""
        );
    }
}
