use rocket::http::{Header, Status};
use rocket::local::blocking::Client;

use crate::model::response::{BasicMessage, EntityApi};
use crate::rocket;
use crate::storage;
use crate::test::*;

fn client() -> Client {
    Client::tracked(rocket()).unwrap()
}

mod create_folder_tests {
    use super::*;

    #[test]
    fn create_folder_without_creds() {
        init_db_folder();
        let client = client();
        let res = client
            .post(uri!("/entities/folders"))
            .body(r#"{"title":"test"}"#)
            .dispatch();
        assert_eq!(res.status(), Status::Unauthorized);
        cleanup();
    }

    #[test]
    fn create_folder_unknown_user() {
        init_db_folder();
        let client = client();
        let res = client
            .post(uri!("/entities/folders"))
            .header(Header::new("Authorization", AUTH))
            .body(r#"{"title":"test"}"#)
            .dispatch();
        assert_eq!(res.status(), Status::Unauthorized);
        cleanup();
    }

    #[test]
    fn create_folder() {
        init_db_folder();
        let root = create_user_entry("username");
        let client = client();
        let res = client
            .post(uri!("/entities/folders"))
            .header(Header::new("Authorization", AUTH))
            .body(r#"{"title":"test"}"#)
            .dispatch();
        assert_eq!(res.status(), Status::Created);
        let body: EntityApi = res.into_json().unwrap();
        assert_eq!("test", body.title);
        assert_eq!(Some(root), body.parent_drive_entity);
        assert_eq!("username", body.owner);
        cleanup();
    }

    #[test]
    fn create_folder_already_exists() {
        init_db_folder();
        create_user_entry("username");
        create_folder_entry("test", None, "username");
        let client = client();
        let res = client
            .post(uri!("/entities/folders"))
            .header(Header::new("Authorization", AUTH))
            .body(r#"{"title":"test"}"#)
            .dispatch();
        assert_eq!(res.status(), Status::Conflict);
        cleanup();
    }

    #[test]
    fn create_folder_blank_title() {
        init_db_folder();
        create_user_entry("username");
        let client = client();
        let res = client
            .post(uri!("/entities/folders"))
            .header(Header::new("Authorization", AUTH))
            .body(r#"{"title":"   "}"#)
            .dispatch();
        assert_eq!(res.status(), Status::BadRequest);
        cleanup();
    }

    #[test]
    fn create_folder_in_someone_elses_folder() {
        init_db_folder();
        let root = create_user_entry("username");
        create_user_entry("other");
        let client = client();
        let res = client
            .post(uri!("/entities/folders"))
            .header(Header::new("Authorization", OTHER_AUTH))
            .body(format!(r#"{{"title":"test","parent":"{root}"}}"#))
            .dispatch();
        assert_eq!(res.status(), Status::Forbidden);
        cleanup();
    }
}

mod upload_tests {
    use super::*;

    fn upload_body(parent: Option<&str>) -> String {
        let mut body = "--BOUNDARY\r\n\
Content-Disposition: form-data; name=\"file\"; filename=\"test.txt\"\r\n\
Content-Type: text/plain\r\n\
\r\n\
hello\r\n"
            .to_string();
        if let Some(parent) = parent {
            body.push_str(&format!(
                "--BOUNDARY\r\n\
Content-Disposition: form-data; name=\"parent\"\r\n\
\r\n\
{parent}\r\n"
            ));
        }
        body.push_str("--BOUNDARY--");
        body
    }

    #[test]
    fn upload_file() {
        init_db_folder();
        let root = create_user_entry("username");
        let client = client();
        let res = client
            .post(uri!("/entities/files"))
            .header(Header::new("Authorization", AUTH))
            .header(Header::new(
                "Content-Type",
                "multipart/form-data; boundary=BOUNDARY",
            ))
            .body(upload_body(None))
            .dispatch();
        assert_eq!(res.status(), Status::Created);
        let body: EntityApi = res.into_json().unwrap();
        assert_eq!("test.txt", body.title);
        assert_eq!(Some(root), body.parent_drive_entity);
        assert_eq!(5, body.file_size);
        assert!(body.mime_type.unwrap().starts_with("text/plain"));
        let path = storage::entity_path("username", &body.name);
        assert_eq!("hello", std::fs::read_to_string(path).unwrap());
        cleanup();
    }

    #[test]
    fn upload_file_parent_not_found() {
        init_db_folder();
        create_user_entry("username");
        let client = client();
        let res = client
            .post(uri!("/entities/files"))
            .header(Header::new("Authorization", AUTH))
            .header(Header::new(
                "Content-Type",
                "multipart/form-data; boundary=BOUNDARY",
            ))
            .body(upload_body(Some("missing")))
            .dispatch();
        assert_eq!(res.status(), Status::BadRequest);
        let body: BasicMessage = res.into_json().unwrap();
        assert_eq!("The parent does not exist or is not a folder.", body.message);
        // nothing was left on the disk
        let user_dir = storage::user_dir("username");
        assert_eq!(0, std::fs::read_dir(user_dir).unwrap().count());
        cleanup();
    }

    #[test]
    fn download_file() {
        init_db_folder();
        create_user_entry("username");
        let file = create_file_entry("test.txt", None, "hello", "username");
        let client = client();
        let res = client
            .get(format!("/entities/{file}/download"))
            .header(Header::new("Authorization", AUTH))
            .dispatch();
        assert_eq!(res.status(), Status::Ok);
        assert_eq!("hello", res.into_string().unwrap());
        cleanup();
    }

    #[test]
    fn download_folder() {
        init_db_folder();
        let root = create_user_entry("username");
        let client = client();
        let res = client
            .get(format!("/entities/{root}/download"))
            .header(Header::new("Authorization", AUTH))
            .dispatch();
        assert_eq!(res.status(), Status::BadRequest);
        cleanup();
    }
}

mod update_tests {
    use super::*;

    #[test]
    fn get_entity_not_found() {
        init_db_folder();
        create_user_entry("username");
        let client = client();
        let res = client
            .get(uri!("/entities/missing"))
            .header(Header::new("Authorization", AUTH))
            .dispatch();
        assert_eq!(res.status(), Status::NotFound);
        cleanup();
    }

    #[test]
    fn get_entity_with_children() {
        init_db_folder();
        let root = create_user_entry("username");
        let folder = create_folder_entry("folder", None, "username");
        let client = client();
        let res = client
            .get(format!("/entities/{root}"))
            .header(Header::new("Authorization", AUTH))
            .dispatch();
        assert_eq!(res.status(), Status::Ok);
        let body: EntityApi = res.into_json().unwrap();
        assert_eq!(1, body.children.len());
        assert_eq!(folder, body.children[0].name);
        cleanup();
    }

    #[test]
    fn move_into_descendant() {
        init_db_folder();
        create_user_entry("username");
        let a = create_folder_entry("a", None, "username");
        let b = create_folder_entry("b", Some(&a), "username");
        let client = client();
        let res = client
            .put(format!("/entities/{a}/move"))
            .header(Header::new("Authorization", AUTH))
            .body(format!(r#"{{"newParent":"{b}"}}"#))
            .dispatch();
        assert_eq!(res.status(), Status::BadRequest);
        cleanup();
    }

    #[test]
    fn move_entity() {
        init_db_folder();
        create_user_entry("username");
        let a = create_folder_entry("a", None, "username");
        let b = create_folder_entry("b", None, "username");
        let client = client();
        let res = client
            .put(format!("/entities/{a}/move"))
            .header(Header::new("Authorization", AUTH))
            .body(format!(r#"{{"newParent":"{b}"}}"#))
            .dispatch();
        assert_eq!(res.status(), Status::Ok);
        let body: EntityApi = res.into_json().unwrap();
        assert_eq!(Some(b), body.parent_drive_entity);
        assert_bounds_consistent();
        cleanup();
    }

    #[test]
    fn rename_collision() {
        init_db_folder();
        create_user_entry("username");
        create_folder_entry("a", None, "username");
        let b = create_folder_entry("b", None, "username");
        let client = client();
        let res = client
            .put(format!("/entities/{b}/rename"))
            .header(Header::new("Authorization", AUTH))
            .body(r#"{"title":"a"}"#)
            .dispatch();
        assert_eq!(res.status(), Status::Conflict);
        cleanup();
    }

    #[test]
    fn trash_and_restore() {
        init_db_folder();
        create_user_entry("username");
        let a = create_folder_entry("a", None, "username");
        let client = client();
        let res = client
            .put(format!("/entities/{a}/trash"))
            .header(Header::new("Authorization", AUTH))
            .dispatch();
        assert_eq!(res.status(), Status::NoContent);
        assert!(!get_entity_entry(&a).is_active);
        let res = client
            .put(format!("/entities/{a}/restore"))
            .header(Header::new("Authorization", AUTH))
            .dispatch();
        assert_eq!(res.status(), Status::NoContent);
        assert!(get_entity_entry(&a).is_active);
        cleanup();
    }

    #[test]
    fn delete_entity() {
        init_db_folder();
        create_user_entry("username");
        let a = create_folder_entry("a", None, "username");
        let file = create_file_entry("test.txt", Some(&a), "test", "username");
        let client = client();
        let res = client
            .delete(format!("/entities/{a}"))
            .header(Header::new("Authorization", AUTH))
            .dispatch();
        assert_eq!(res.status(), Status::NoContent);
        assert!(!storage::entity_path("username", &file).exists());
        let res = client
            .get(format!("/entities/{file}"))
            .header(Header::new("Authorization", AUTH))
            .dispatch();
        assert_eq!(res.status(), Status::NotFound);
        cleanup();
    }

    #[test]
    fn delete_not_owner() {
        init_db_folder();
        create_user_entry("username");
        create_user_entry("other");
        let a = create_folder_entry("a", None, "username");
        let client = client();
        let res = client
            .delete(format!("/entities/{a}"))
            .header(Header::new("Authorization", OTHER_AUTH))
            .dispatch();
        assert_eq!(res.status(), Status::Forbidden);
        cleanup();
    }
}
