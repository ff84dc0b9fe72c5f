//! Credential service — salted password hashing and the register/login flows.

pub mod handlers;

use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::errors::AppError;
use crate::models::user::UserInfo;
use crate::store::users::UserStore;

const MIN_USERNAME_LEN: usize = 3;
const MIN_PASSWORD_LEN: usize = 6;
const SALT_BYTES: usize = 32;

/// Hashes a password with a salt using SHA-256 over `password || salt`.
/// A fresh random salt is generated when none is supplied. Returns the
/// stored form `"{salt}${hash}"` together with the salt.
pub fn hash_password(password: &str, salt: Option<&str>) -> (String, String) {
    let salt = match salt {
        Some(s) => s.to_string(),
        None => {
            let mut bytes = [0u8; SALT_BYTES];
            rand::rngs::OsRng.fill_bytes(&mut bytes);
            hex::encode(bytes)
        }
    };

    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(salt.as_bytes());
    let digest = hex::encode(hasher.finalize());

    (format!("{salt}${digest}"), salt)
}

/// Verifies a password against a stored `"{salt}${hash}"` string.
/// Malformed stored hashes verify as false, never as an error.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Some((salt, digest)) = stored_hash.split_once('$') else {
        return false;
    };

    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize()) == digest
}

fn validate_registration(username: &str, email: &str, password: &str) -> Result<(), AppError> {
    if username.len() < MIN_USERNAME_LEN {
        return Err(AppError::Validation(format!(
            "Username must be at least {MIN_USERNAME_LEN} characters long"
        )));
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }
    if !email.contains('@') {
        return Err(AppError::Validation("Invalid email address".to_string()));
    }
    Ok(())
}

/// Registers a new user. Duplicate usernames and emails are rejected without
/// touching existing rows.
pub async fn register_user(
    store: &dyn UserStore,
    username: &str,
    email: &str,
    password: &str,
) -> Result<UserInfo, AppError> {
    validate_registration(username, email, password)?;

    if store.get_user_by_username(username).await?.is_some() {
        return Err(AppError::Conflict("Username already exists".to_string()));
    }
    if store.get_user_by_email(email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let (password_hash, _) = hash_password(password, None);
    // A concurrent insert can still hit the unique constraint between the
    // checks above and here; the store reports that as None.
    let user_id = store
        .create_user(username, email, &password_hash)
        .await?
        .ok_or_else(|| AppError::Conflict("Username or email already exists".to_string()))?;

    let user = store
        .get_user_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;

    Ok(user.into())
}

/// Authenticates a user by username and password. The caller cannot tell an
/// unknown username apart from a wrong password.
pub async fn login_user(
    store: &dyn UserStore,
    username: &str,
    password: &str,
) -> Result<UserInfo, AppError> {
    let user = store
        .get_user_by_username(username)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !verify_password(password, &user.password_hash) {
        return Err(AppError::Unauthorized);
    }

    Ok(user.into())
}

/// User profile by id, without the password hash.
pub async fn get_user_info(store: &dyn UserStore, user_id: i64) -> Result<UserInfo, AppError> {
    let user = store
        .get_user_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;
    Ok(user.into())
}
