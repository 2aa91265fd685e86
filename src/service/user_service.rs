use std::backtrace::Backtrace;

use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::{Connection, TransactionBehavior};
use sha2::{Digest, Sha256};

use crate::hierarchy;
use crate::model::error::user_errors::CreateUserError;
use crate::model::repository::{DriveEntity, User};
use crate::model::request::CreateUserRequest;
use crate::model::response::UserApi;
use crate::model::service::auth::CheckAuthResult;
use crate::repository::{entity_repository, open_connection, user_repository};
use crate::storage::{self, StagedPath};
use crate::util::generate_name;

/// user names end up as directory names, so they're kept to a safe set of characters
static USERNAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_@.\-]{1,64}$").expect("username pattern is valid"));

/// hashes the username and password combined, the same way the database stores them
pub fn hash_credentials(username: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{}:{}", username.trim(), password.trim()).as_bytes());
    format!("{:x}", hasher.finalize())
}

fn is_valid_username(username: &str) -> bool {
    USERNAME_PATTERN.is_match(username) && !username.chars().all(|c| c == '.')
}

/// registers a new user along with their root directory.
///
/// The root directory is created on the disk first. If saving to the database fails, it's removed again
pub fn create_user(request: &CreateUserRequest) -> Result<UserApi, CreateUserError> {
    let username = request.username.trim();
    if !is_valid_username(username) {
        return Err(CreateUserError::InvalidUsername);
    }
    let mut con = open_connection();
    let tx = con
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|e| {
            log::error!(
                "Failed to start transaction! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            CreateUserError::DbError
        })?;
    match user_repository::get_user(username, &tx) {
        Ok(None) => { /* good route */ }
        Ok(Some(_)) => return Err(CreateUserError::AlreadyExists),
        Err(e) => {
            log::error!(
                "Failed to check if user {username} exists! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            return Err(CreateUserError::DbError);
        }
    };
    let mut user = User {
        name: username.to_string(),
        full_name: request.full_name.clone(),
        user_image: request.user_image.clone(),
        password_hash: hash_credentials(username, &request.password),
        root_directory: None,
    };
    let staged = StagedPath::create_dir(storage::user_dir(username)).map_err(|e| {
        log::error!(
            "Failed to create root directory for {username} on the disk! Error is {e:?}\n{}",
            Backtrace::force_capture()
        );
        CreateUserError::FileSystemError
    })?;
    let mut root = DriveEntity::new(
        generate_name(username),
        username.to_string(),
        true,
        username.to_string(),
    );
    root.path = Some(staged.path().to_string_lossy().to_string());
    let saved = user_repository::create_user(&user, &tx)
        .and_then(|_| hierarchy::insert(root, None, &tx))
        .and_then(|root| {
            user_repository::set_root_directory(username, &root.name, &tx).map(|_| root)
        })
        .and_then(|root| tx.commit().map(|_| root));
    let root = match saved {
        Ok(root) => root,
        Err(e) => {
            log::error!(
                "Failed to save user {username}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            // dropping `staged` removes the directory
            return Err(CreateUserError::DbError);
        }
    };
    staged.keep();
    log::info!("Created user {username} with root directory {}", root.name);
    user.root_directory = Some(root.name);
    Ok(UserApi::from(user))
}

/// checks the passed credentials against the database
pub fn check_auth(username: &str, password: &str) -> CheckAuthResult {
    let con = open_connection();
    match user_repository::get_user(username.trim(), &con) {
        Ok(Some(user)) if user.password_hash == hash_credentials(username, password) => {
            CheckAuthResult::Valid
        }
        Ok(Some(_)) => CheckAuthResult::Invalid,
        Ok(None) => CheckAuthResult::Missing,
        Err(e) => {
            log::error!(
                "Failed to check auth in database: {e:?}\n{}",
                Backtrace::force_capture()
            );
            CheckAuthResult::DbError
        }
    }
}

/// retrieves the root directory of `user`, the default destination for new and moved entities
pub fn get_user_directory(user: &str, con: &Connection) -> Result<DriveEntity, rusqlite::Error> {
    entity_repository::get_user_directory(user, con)
}
