use std::fs::{remove_dir_all, remove_file};
use std::path::Path;

use crate::model::repository::{DriveEntity, ShareTarget};
use crate::model::request::CreateUserRequest;
use crate::repository::{entity_repository, initialize_db, open_connection, share_repository};
use crate::service::{entity_service, user_service};
use crate::storage::file_dir;
use crate::util::now;

mod entity_handler_tests;

/// username:password
pub static AUTH: &str = "Basic dXNlcm5hbWU6cGFzc3dvcmQ=";
/// other:password
pub static OTHER_AUTH: &str = "Basic b3RoZXI6cGFzc3dvcmQ=";
/// third:password
pub static THIRD_AUTH: &str = "Basic dGhpcmQ6cGFzc3dvcmQ=";

pub fn current_thread_name() -> String {
    let current_thread = std::thread::current();
    current_thread.name().unwrap().to_string()
}

/// starts the current test with a fresh database
pub fn init_db_folder() {
    cleanup();
    initialize_db().unwrap();
}

pub fn cleanup() {
    let thread_name = current_thread_name();
    remove_file(Path::new(format!("{thread_name}.sqlite").as_str())).unwrap_or(());
    let files = file_dir();
    let files = Path::new(files.as_str());
    if files.exists() {
        remove_dir_all(files).unwrap_or(());
    }
}

/// registers a user whose password is `password`, and returns the name of their root directory
pub fn create_user_entry(username: &str) -> String {
    let request = CreateUserRequest {
        username: username.to_string(),
        password: "password".to_string(),
        full_name: format!("{username} full name"),
        user_image: None,
    };
    user_service::create_user(&request)
        .unwrap()
        .root_directory
        .unwrap()
}

/// creates a folder owned by `owner` directly in the database, returning its name.
/// `parent` defaults to the owner's root directory
pub fn create_folder_entry(title: &str, parent: Option<&str>, owner: &str) -> String {
    entity_service::create_folder(title, parent, owner)
        .unwrap()
        .name
}

/// uploads a file owned by `owner`, returning its name
pub fn create_file_entry(
    title: &str,
    parent: Option<&str>,
    contents: &str,
    owner: &str,
) -> String {
    entity_service::create_file(
        title,
        parent,
        Some("text/plain".to_string()),
        contents.as_bytes(),
        owner,
    )
    .unwrap()
    .name
}

/// grants `user` access to a single entity, without touching its descendants
pub fn create_share_entry(name: &str, user: &str, write: bool, share: bool) {
    let con = open_connection();
    share_repository::upsert_share(
        name,
        &ShareTarget::User(user.to_string()),
        write,
        share,
        now(),
        &con,
    )
    .unwrap();
}

pub fn get_entity_entry(name: &str) -> DriveEntity {
    let con = open_connection();
    entity_repository::get_by_name(name, &con).unwrap()
}

/// asserts that every entity's bounds are consistent with its parent pointer
pub fn assert_bounds_consistent() {
    let con = open_connection();
    let links = entity_repository::get_tree_links(&con).unwrap();
    for link in links.iter() {
        assert!(link.lft < link.rgt, "{} has inverted bounds", link.name);
        if let Some(parent) = &link.parent {
            let parent = links.iter().find(|l| &l.name == parent).unwrap();
            assert!(
                parent.lft < link.lft && link.rgt < parent.rgt,
                "{} is not inside its parent {}",
                link.name,
                parent.name
            );
        }
    }
}
