//! Credential collaborator: register and authenticate players
//!
//! Only the contract lives here, plus a process-lifetime implementation.
//! Secrets are compared as given; nothing is hashed.

use std::fmt;

use ahash::AHashMap;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("All fields are required")]
    MissingFields,

    #[error("Username already exists")]
    UsernameTaken,

    #[error("Email already in use")]
    EmailInUse,

    #[error("Invalid username or password")]
    InvalidCredentials,
}

/// Opaque token handed out on login
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionToken(Uuid);

impl SessionToken {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub trait CredentialService {
    fn register(&mut self, email: &str, username: &str, secret: &str)
        -> Result<(), AuthError>;
    fn authenticate(&mut self, username: &str, secret: &str) -> Result<SessionToken, AuthError>;
}

/// Register the player if needed, then log in
///
/// An existing account with the same name is reused, so the secret decides.
pub fn sign_in<S: CredentialService + ?Sized>(
    service: &mut S,
    email: &str,
    username: &str,
    secret: &str,
) -> Result<SessionToken, AuthError> {
    match service.register(email, username, secret) {
        Ok(()) | Err(AuthError::UsernameTaken) => service.authenticate(username, secret),
        Err(e) => Err(e),
    }
}

#[derive(Debug, Clone)]
struct Account {
    email: String,
    secret: String,
}

/// Accounts kept for the life of the process
#[derive(Debug, Default)]
pub struct InMemoryCredentials {
    accounts: AHashMap<String, Account>,
    sessions: AHashMap<SessionToken, String>,
}

impl InMemoryCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Username a token was issued to
    pub fn holder(&self, token: &SessionToken) -> Option<&str> {
        self.sessions.get(token).map(String::as_str)
    }
}

impl CredentialService for InMemoryCredentials {
    fn register(
        &mut self,
        email: &str,
        username: &str,
        secret: &str,
    ) -> Result<(), AuthError> {
        if email.is_empty() || username.is_empty() || secret.is_empty() {
            return Err(AuthError::MissingFields);
        }
        if self.accounts.contains_key(username) {
            return Err(AuthError::UsernameTaken);
        }
        if self.accounts.values().any(|a| a.email == email) {
            return Err(AuthError::EmailInUse);
        }

        self.accounts.insert(
            username.to_string(),
            Account {
                email: email.to_string(),
                secret: secret.to_string(),
            },
        );
        tracing::info!("Registered player {}", username);
        Ok(())
    }

    fn authenticate(&mut self, username: &str, secret: &str) -> Result<SessionToken, AuthError> {
        if username.is_empty() || secret.is_empty() {
            return Err(AuthError::MissingFields);
        }
        match self.accounts.get(username) {
            Some(account) if account.secret == secret => {
                let token = SessionToken::generate();
                self.sessions.insert(token, username.to_string());
                Ok(token)
            }
            _ => Err(AuthError::InvalidCredentials),
        }
    }
}
