//! In-memory identity provider for tests and local runs.

use super::IdentityProvider;
use crate::domain::AuthUser;
use async_trait::async_trait;
use cookbook_errors::AppError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

#[derive(Debug, Clone)]
struct Account {
    uid: String,
    name: String,
    password: String,
}

#[derive(Debug)]
pub struct FakeIdentityProvider {
    accounts: RwLock<HashMap<String, Account>>,
    next_uid: AtomicU64,
}

impl FakeIdentityProvider {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            next_uid: AtomicU64::new(1),
        }
    }
}

impl Default for FakeIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentityProvider {
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthUser, AppError> {
        let email = email.to_lowercase();
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| AppError::Internal("identity store poisoned".to_string()))?;
        if accounts.contains_key(&email) {
            return Err(AppError::validation("That email is already registered"));
        }

        let uid = format!("uid-{}", self.next_uid.fetch_add(1, Ordering::SeqCst));
        accounts.insert(
            email.clone(),
            Account {
                uid: uid.clone(),
                name: name.to_string(),
                password: password.to_string(),
            },
        );
        Ok(AuthUser {
            uid,
            email,
            display_name: Some(name.to_string()),
        })
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthUser, AppError> {
        let email = email.to_lowercase();
        let accounts = self
            .accounts
            .read()
            .map_err(|_| AppError::Internal("identity store poisoned".to_string()))?;
        match accounts.get(&email) {
            Some(account) if account.password == password => Ok(AuthUser {
                uid: account.uid.clone(),
                email,
                display_name: Some(account.name.clone()),
            }),
            _ => Err(AppError::InvalidCredentials),
        }
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}
