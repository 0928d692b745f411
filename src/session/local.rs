//! Device-local stand-in for the hosted authentication service.
//!
//! Keeps a single profile (email, display name, argon2 password hash) and
//! the signed-in flag in one JSON file under the app data directory. The
//! gateway contract is identical to the hosted one, so the presentation
//! layer cannot tell them apart.

use std::{fs, path::{Path, PathBuf}};

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, PasswordHash,
};
use serde::{Deserialize, Serialize};

use crate::errors::{FinanceError, Result};
use crate::session::{Session, SessionGateway};
use crate::store::app_data_dir;

const PROFILE_FILE: &str = "profile.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredProfile {
    email: String,
    display_name: String,
    password_hash: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct AuthState {
    #[serde(default)]
    profile: Option<StoredProfile>,
    #[serde(default)]
    signed_in: bool,
}

pub struct LocalGateway {
    path: PathBuf,
    state: AuthState,
}

impl LocalGateway {
    pub fn open(path: PathBuf) -> Result<Self> {
        let state = if path.exists() {
            let data = fs::read_to_string(&path)?;
            serde_json::from_str(&data)?
        } else {
            AuthState::default()
        };
        Ok(Self { path, state })
    }

    pub fn open_default() -> Result<Self> {
        Self::open(app_data_dir().join(PROFILE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.state)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn session_for(profile: &StoredProfile) -> Session {
        Session {
            email: profile.email.clone(),
            display_name: Some(profile.display_name.clone()),
        }
    }
}

impl SessionGateway for LocalGateway {
    fn current_session(&self) -> Result<Option<Session>> {
        Ok(self
            .state
            .profile
            .as_ref()
            .filter(|_| self.state.signed_in)
            .map(Self::session_for))
    }

    fn sign_in(&mut self, email: &str, password: &str) -> Result<Session> {
        let profile = self
            .state
            .profile
            .as_ref()
            .ok_or_else(|| FinanceError::Auth("no account on this device".into()))?;
        if !profile.email.eq_ignore_ascii_case(email.trim())
            || !verify_password(password, &profile.password_hash)
        {
            return Err(FinanceError::Auth("invalid email or password".into()));
        }
        let session = Self::session_for(profile);
        self.state.signed_in = true;
        self.persist()?;
        tracing::info!(email = %session.email, "signed in");
        Ok(session)
    }

    fn sign_up(&mut self, email: &str, password: &str, display_name: &str) -> Result<Session> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(FinanceError::Auth("a valid email is required".into()));
        }
        if password.len() < 6 {
            return Err(FinanceError::Auth("password must have at least 6 characters".into()));
        }
        if let Some(existing) = &self.state.profile {
            if !existing.email.eq_ignore_ascii_case(email) {
                return Err(FinanceError::Auth("another account already exists on this device".into()));
            }
        }
        let profile = StoredProfile {
            email: email.to_string(),
            display_name: display_name.trim().to_string(),
            password_hash: hash_password(password)?,
        };
        let session = Self::session_for(&profile);
        self.state.profile = Some(profile);
        self.state.signed_in = true;
        self.persist()?;
        tracing::info!(email = %session.email, "account created");
        Ok(session)
    }

    fn sign_out(&mut self) -> Result<()> {
        self.state.signed_in = false;
        self.persist()?;
        tracing::info!("signed out");
        Ok(())
    }
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| FinanceError::Auth(format!("failed to hash password: {err}")))
}

fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn gateway_in(dir: &TempDir) -> LocalGateway {
        LocalGateway::open(dir.path().join(PROFILE_FILE)).unwrap()
    }

    #[test]
    fn sign_up_then_current_session_is_active() {
        let dir = TempDir::new().unwrap();
        let mut gateway = gateway_in(&dir);
        let session = gateway.sign_up("ana@example.com", "segredo1", "Ana").unwrap();
        assert_eq!(session.email, "ana@example.com");
        assert!(gateway.current_session().unwrap().is_some());
    }

    #[test]
    fn sign_in_verifies_the_stored_hash() {
        let dir = TempDir::new().unwrap();
        let mut gateway = gateway_in(&dir);
        gateway.sign_up("ana@example.com", "segredo1", "Ana").unwrap();
        gateway.sign_out().unwrap();

        assert!(gateway.sign_in("ana@example.com", "errada").is_err());
        assert!(gateway.current_session().unwrap().is_none());
        let session = gateway.sign_in("Ana@Example.com", "segredo1").unwrap();
        assert_eq!(session.display_name.as_deref(), Some("Ana"));
    }

    #[test]
    fn sign_up_rejects_weak_input_and_second_accounts() {
        let dir = TempDir::new().unwrap();
        let mut gateway = gateway_in(&dir);
        assert!(gateway.sign_up("not-an-email", "segredo1", "Ana").is_err());
        assert!(gateway.sign_up("ana@example.com", "123", "Ana").is_err());

        gateway.sign_up("ana@example.com", "segredo1", "Ana").unwrap();
        assert!(gateway.sign_up("outra@example.com", "segredo1", "Bia").is_err());
    }

    #[test]
    fn signed_in_flag_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(PROFILE_FILE);
        let mut gateway = LocalGateway::open(path.clone()).unwrap();
        gateway.sign_up("ana@example.com", "segredo1", "Ana").unwrap();
        drop(gateway);

        let reopened = LocalGateway::open(path).unwrap();
        let session = reopened.current_session().unwrap().unwrap();
        assert_eq!(session.email, "ana@example.com");
    }
}
