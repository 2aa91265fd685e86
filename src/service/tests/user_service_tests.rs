use crate::model::error::user_errors::CreateUserError;
use crate::model::request::CreateUserRequest;
use crate::model::service::auth::CheckAuthResult;
use crate::repository::{open_connection, user_repository};
use crate::service::user_service::*;
use crate::storage;
use crate::test::*;

fn request(username: &str) -> CreateUserRequest {
    CreateUserRequest {
        username: username.to_string(),
        password: "password".to_string(),
        full_name: "Some User".to_string(),
        user_image: Some("/images/user.png".to_string()),
    }
}

#[test]
fn create_user_creates_root_directory() {
    init_db_folder();
    let user = create_user(&request("username")).unwrap();
    assert_eq!("username", user.name);
    let root = get_entity_entry(&user.root_directory.unwrap());
    assert!(root.is_group);
    assert_eq!("username", root.title);
    assert_eq!("username", root.owner);
    assert_eq!(None, root.parent_drive_entity);
    let dir = storage::user_dir("username");
    assert!(dir.is_dir());
    assert_eq!(Some(dir.to_string_lossy().to_string()), root.path);
    let con = open_connection();
    assert_eq!(root, get_user_directory("username", &con).unwrap());
    cleanup();
}

#[test]
fn create_user_already_exists() {
    init_db_folder();
    create_user(&request("username")).unwrap();
    assert_eq!(
        CreateUserError::AlreadyExists,
        create_user(&request("username")).unwrap_err()
    );
    cleanup();
}

#[test]
fn create_user_invalid_username() {
    init_db_folder();
    for name in ["", "..", "a/b", "a b"] {
        assert_eq!(
            CreateUserError::InvalidUsername,
            create_user(&request(name)).unwrap_err()
        );
    }
    cleanup();
}

#[test]
fn create_user_failed_insert_removes_directory() {
    init_db_folder();
    let con = open_connection();
    con.execute_batch(
        "create trigger fail_insert before insert on DriveEntities begin select raise(abort, 'no'); end;",
    )
    .unwrap();
    assert_eq!(
        CreateUserError::DbError,
        create_user(&request("username")).unwrap_err()
    );
    assert!(!storage::user_dir("username").exists());
    assert_eq!(None, user_repository::get_user("username", &con).unwrap());
    cleanup();
}

#[test]
fn check_auth_results() {
    init_db_folder();
    create_user(&request("username")).unwrap();
    assert_eq!(CheckAuthResult::Valid, check_auth("username", "password"));
    assert_eq!(CheckAuthResult::Invalid, check_auth("username", "wrong"));
    assert_eq!(CheckAuthResult::Missing, check_auth("nobody", "password"));
    cleanup();
}
