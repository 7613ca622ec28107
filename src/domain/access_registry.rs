use std::collections::HashMap;

/// Access keys indexed by secret, built from the configured name → secret mapping.
#[derive(Debug, Clone, Default)]
pub struct AccessRegistry {
    by_secret: HashMap<String, String>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AccessRegistryError {
    #[error("access key for '{second}' duplicates the key of '{first}'")]
    DuplicateSecret { first: String, second: String },
    #[error("access key for '{0}' is empty")]
    EmptySecret(String),
}

impl AccessRegistry {
    pub fn from_users(users: &HashMap<String, String>) -> Result<Self, AccessRegistryError> {
        let mut names: Vec<&String> = users.keys().collect();
        names.sort();

        let mut by_secret: HashMap<String, String> = HashMap::with_capacity(users.len());
        for name in names {
            let secret = &users[name];
            if secret.is_empty() {
                return Err(AccessRegistryError::EmptySecret(name.clone()));
            }
            if let Some(first) = by_secret.get(secret) {
                return Err(AccessRegistryError::DuplicateSecret {
                    first: first.clone(),
                    second: name.clone(),
                });
            }
            by_secret.insert(secret.clone(), name.clone());
        }

        Ok(Self { by_secret })
    }

    /// Display name for an exact key match. Never matches an empty key.
    pub fn authenticate(&self, access_key: &str) -> Option<&str> {
        if access_key.is_empty() {
            return None;
        }
        self.by_secret.get(access_key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_secret.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_secret.is_empty()
    }
}
