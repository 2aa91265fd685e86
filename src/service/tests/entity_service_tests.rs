use std::fs;
use std::path::Path;

use crate::model::error::entity_errors::{
    CreateEntityError, DeleteEntityError, DownloadEntityError, GetEntityError, MoveEntityError,
    RenameEntityError, TrashEntityError,
};
use crate::repository::{entity_repository, open_connection, share_repository};
use crate::service::entity_service::*;
use crate::storage;
use crate::test::*;

mod create_tests {
    use super::*;

    #[test]
    fn create_folder_defaults_to_root_directory() {
        init_db_folder();
        let root = create_user_entry("username");
        let folder = create_folder("docs", None, "username").unwrap();
        assert_eq!(Some(root), folder.parent_drive_entity);
        assert_eq!(1, folder.version);
        assert!(folder.is_group);
        assert_bounds_consistent();
        cleanup();
    }

    #[test]
    fn create_folder_duplicate_title() {
        init_db_folder();
        create_user_entry("username");
        create_folder_entry("docs", None, "username");
        let res = create_folder("docs", None, "username").unwrap_err();
        assert_eq!(CreateEntityError::AlreadyExists, res);
        // titles are case-sensitive
        create_folder("Docs", None, "username").unwrap();
        cleanup();
    }

    #[test]
    fn create_folder_parent_not_a_folder() {
        init_db_folder();
        create_user_entry("username");
        let file = create_file_entry("test.txt", None, "test", "username");
        assert_eq!(
            CreateEntityError::NotADirectory,
            create_folder("docs", Some(&file), "username").unwrap_err()
        );
        assert_eq!(
            CreateEntityError::NotADirectory,
            create_folder("docs", Some("missing"), "username").unwrap_err()
        );
        cleanup();
    }

    #[test]
    fn create_folder_without_write_permission() {
        init_db_folder();
        create_user_entry("username");
        create_user_entry("other");
        let folder = create_folder_entry("docs", None, "username");
        assert_eq!(
            CreateEntityError::PermissionDenied,
            create_folder("inner", Some(&folder), "other").unwrap_err()
        );
        create_share_entry(&folder, "other", true, false);
        let inner = create_folder("inner", Some(&folder), "other").unwrap();
        assert_eq!("other", inner.owner);
        cleanup();
    }

    #[test]
    fn create_file_writes_contents() {
        init_db_folder();
        create_user_entry("username");
        let file = create_file("test.txt", None, None, b"hello", "username").unwrap();
        assert_eq!(5, file.file_size);
        assert!(!file.is_group);
        let path = storage::entity_path("username", &file.name);
        assert_eq!("hello", fs::read_to_string(path).unwrap());
        cleanup();
    }

    #[test]
    fn create_file_failed_insert_leaves_no_file() {
        init_db_folder();
        create_user_entry("username");
        let con = open_connection();
        con.execute_batch(
            "create trigger fail_insert before insert on DriveEntities begin select raise(abort, 'no'); end;",
        )
        .unwrap();
        drop(con);
        let res = create_file("test.txt", None, None, b"hello", "username").unwrap_err();
        assert_eq!(CreateEntityError::DbError, res);
        let user_dir = storage::user_dir("username");
        assert_eq!(0, fs::read_dir(user_dir).unwrap().count());
        cleanup();
    }

    #[test]
    fn create_file_duplicate_title_writes_nothing() {
        init_db_folder();
        create_user_entry("username");
        create_file_entry("test.txt", None, "first", "username");
        assert_eq!(
            CreateEntityError::AlreadyExists,
            create_file("test.txt", None, None, b"second", "username").unwrap_err()
        );
        let user_dir = storage::user_dir("username");
        assert_eq!(1, fs::read_dir(user_dir).unwrap().count());
        cleanup();
    }
}

mod move_tests {
    use super::*;

    #[test]
    fn move_into_folder() {
        init_db_folder();
        create_user_entry("username");
        let a = create_folder_entry("a", None, "username");
        let b = create_folder_entry("b", None, "username");
        let file = create_file_entry("test.txt", Some(&a), "test", "username");
        let moved = move_entity(&a, Some(&b), "username").unwrap();
        assert_eq!(Some(b.clone()), moved.parent_drive_entity);
        assert_eq!(2, moved.version);
        assert_bounds_consistent();
        // the file moved along with its folder
        let b_entity = get_entity_entry(&b);
        let file_entity = get_entity_entry(&file);
        assert!(b_entity.lft < file_entity.lft && file_entity.rgt < b_entity.rgt);
        cleanup();
    }

    #[test]
    fn move_defaults_to_root_directory() {
        init_db_folder();
        let root = create_user_entry("username");
        let a = create_folder_entry("a", None, "username");
        let b = create_folder_entry("b", Some(&a), "username");
        let moved = move_entity(&b, None, "username").unwrap();
        assert_eq!(Some(root), moved.parent_drive_entity);
        assert_bounds_consistent();
        cleanup();
    }

    #[test]
    fn move_into_file() {
        init_db_folder();
        create_user_entry("username");
        let a = create_folder_entry("a", None, "username");
        let file = create_file_entry("test.txt", None, "test", "username");
        assert_eq!(
            MoveEntityError::NotADirectory,
            move_entity(&a, Some(&file), "username").unwrap_err()
        );
        cleanup();
    }

    #[test]
    fn move_into_descendant() {
        init_db_folder();
        create_user_entry("username");
        let a = create_folder_entry("a", None, "username");
        let b = create_folder_entry("b", Some(&a), "username");
        let c = create_folder_entry("c", Some(&b), "username");
        assert_eq!(
            MoveEntityError::NotAllowed,
            move_entity(&a, Some(&c), "username").unwrap_err()
        );
        assert_eq!(
            MoveEntityError::NotAllowed,
            move_entity(&a, Some(&a), "username").unwrap_err()
        );
        // nothing changed
        assert_eq!(Some(a.clone()), get_entity_entry(&b).parent_drive_entity);
        cleanup();
    }

    #[test]
    fn move_root_directory() {
        init_db_folder();
        let root = create_user_entry("username");
        let a = create_folder_entry("a", None, "username");
        assert_eq!(
            MoveEntityError::NotAllowed,
            move_entity(&root, Some(&a), "username").unwrap_err()
        );
        cleanup();
    }

    #[test]
    fn move_title_collision() {
        init_db_folder();
        create_user_entry("username");
        let a = create_folder_entry("a", None, "username");
        create_folder_entry("same", Some(&a), "username");
        let other = create_folder_entry("same", None, "username");
        assert_eq!(
            MoveEntityError::AlreadyExists,
            move_entity(&other, Some(&a), "username").unwrap_err()
        );
        cleanup();
    }

    #[test]
    fn move_into_current_parent_already_exists() {
        init_db_folder();
        let root = create_user_entry("username");
        let a = create_folder_entry("a", None, "username");
        assert_eq!(
            MoveEntityError::AlreadyExists,
            move_entity(&a, Some(&root), "username").unwrap_err()
        );
        assert_eq!(1, get_entity_entry(&a).version);
        cleanup();
    }

    #[test]
    fn move_missing_entity() {
        init_db_folder();
        create_user_entry("username");
        assert_eq!(
            MoveEntityError::NotFound,
            move_entity("missing", None, "username").unwrap_err()
        );
        cleanup();
    }

    #[test]
    fn move_needs_write_on_target() {
        init_db_folder();
        create_user_entry("username");
        create_user_entry("other");
        let a = create_folder_entry("a", None, "username");
        let target = create_folder_entry("target", None, "username");
        create_share_entry(&a, "other", true, false);
        create_share_entry(&target, "other", false, false);
        assert_eq!(
            MoveEntityError::PermissionDenied,
            move_entity(&a, Some(&target), "other").unwrap_err()
        );
        create_share_entry(&target, "other", true, false);
        move_entity(&a, Some(&target), "other").unwrap();
        cleanup();
    }
}

mod rename_tests {
    use super::*;

    #[test]
    fn rename_collision() {
        init_db_folder();
        create_user_entry("username");
        create_folder_entry("first", None, "username");
        let second = create_folder_entry("second", None, "username");
        assert_eq!(
            RenameEntityError::AlreadyExists,
            rename_entity(&second, "first", "username").unwrap_err()
        );
        assert_eq!("second", get_entity_entry(&second).title);
        cleanup();
    }

    #[test]
    fn rename_unique_title() {
        init_db_folder();
        create_user_entry("username");
        let file = create_file_entry("test.txt", None, "test", "username");
        let renamed = rename_entity(&file, "renamed.txt", "username").unwrap();
        assert_eq!("renamed.txt", renamed.title);
        let saved = get_entity_entry(&file);
        assert_eq!("renamed.txt", saved.title);
        assert_eq!(2, saved.version);
        cleanup();
    }

    #[test]
    fn rename_to_own_title_already_exists() {
        init_db_folder();
        create_user_entry("username");
        let a = create_folder_entry("a", None, "username");
        assert_eq!(
            RenameEntityError::AlreadyExists,
            rename_entity(&a, "a", "username").unwrap_err()
        );
        assert_eq!(1, get_entity_entry(&a).version);
        cleanup();
    }

    #[test]
    fn rename_without_permission() {
        init_db_folder();
        create_user_entry("username");
        create_user_entry("other");
        let a = create_folder_entry("a", None, "username");
        create_share_entry(&a, "other", false, false);
        assert_eq!(
            RenameEntityError::PermissionDenied,
            rename_entity(&a, "b", "other").unwrap_err()
        );
        cleanup();
    }
}

mod delete_tests {
    use super::*;

    #[test]
    fn delete_children_first() {
        init_db_folder();
        create_user_entry("username");
        let a = create_folder_entry("a", None, "username");
        let b = create_folder_entry("b", Some(&a), "username");
        let file = create_file_entry("test.txt", Some(&b), "test", "username");
        let sibling = create_folder_entry("sibling", None, "username");
        let file_path = storage::entity_path("username", &file);
        assert!(file_path.exists());

        let deleted = delete_entity(&a, "username").unwrap();
        assert_eq!(vec![file.clone(), b.clone(), a.clone()], deleted);
        assert!(!file_path.exists());
        let con = open_connection();
        for name in [&a, &b, &file] {
            assert!(matches!(
                entity_repository::get_by_name(name, &con),
                Err(rusqlite::Error::QueryReturnedNoRows)
            ));
        }
        drop(con);
        get_entity_entry(&sibling);
        assert_bounds_consistent();
        cleanup();
    }

    #[test]
    fn delete_removes_shares() {
        init_db_folder();
        create_user_entry("username");
        create_user_entry("other");
        let a = create_folder_entry("a", None, "username");
        create_share_entry(&a, "other", true, true);
        delete_entity(&a, "username").unwrap();
        let con = open_connection();
        let shares = share_repository::get_shared_with_user("other", &con).unwrap();
        assert!(shares.is_empty());
        cleanup();
    }

    #[test]
    fn delete_not_owner() {
        init_db_folder();
        create_user_entry("username");
        create_user_entry("other");
        let a = create_folder_entry("a", None, "username");
        create_share_entry(&a, "other", true, true);
        assert_eq!(
            DeleteEntityError::PermissionDenied,
            delete_entity(&a, "other").unwrap_err()
        );
        cleanup();
    }

    #[test]
    fn delete_root_directory() {
        init_db_folder();
        let root = create_user_entry("username");
        assert_eq!(
            DeleteEntityError::NotAllowed,
            delete_entity(&root, "username").unwrap_err()
        );
        assert!(storage::user_dir("username").exists());
        cleanup();
    }

    #[test]
    fn delete_missing_file_on_disk_still_deletes_row() {
        init_db_folder();
        create_user_entry("username");
        let file = create_file_entry("test.txt", None, "test", "username");
        fs::remove_file(storage::entity_path("username", &file)).unwrap();
        delete_entity(&file, "username").unwrap();
        let con = open_connection();
        assert!(entity_repository::get_by_name(&file, &con).is_err());
        cleanup();
    }
}

mod trash_tests {
    use super::*;

    #[test]
    fn trash_hides_subtree() {
        init_db_folder();
        let root = create_user_entry("username");
        let a = create_folder_entry("a", None, "username");
        let b = create_folder_entry("b", Some(&a), "username");
        set_active(&a, false, "username").unwrap();
        assert!(!get_entity_entry(&a).is_active);
        assert!(!get_entity_entry(&b).is_active);
        assert!(get_entity(&root, "username").unwrap().children.is_empty());
        set_active(&a, true, "username").unwrap();
        assert!(get_entity_entry(&b).is_active);
        assert_eq!(1, get_entity(&root, "username").unwrap().children.len());
        cleanup();
    }

    #[test]
    fn trash_root_directory() {
        init_db_folder();
        let root = create_user_entry("username");
        assert_eq!(
            TrashEntityError::NotAllowed,
            set_active(&root, false, "username").unwrap_err()
        );
        cleanup();
    }
}

mod get_tests {
    use super::*;

    #[test]
    fn get_entity_lists_folders_first() {
        init_db_folder();
        let root = create_user_entry("username");
        create_file_entry("a.txt", None, "test", "username");
        create_folder_entry("z", None, "username");
        let entity = get_entity(&root, "username").unwrap();
        let titles: Vec<&str> = entity.children.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(vec!["z", "a.txt"], titles);
        cleanup();
    }

    #[test]
    fn get_entity_hides_trashed_children() {
        init_db_folder();
        let root = create_user_entry("username");
        let kept = create_folder_entry("kept", None, "username");
        let trashed = create_folder_entry("trashed", None, "username");
        set_active(&trashed, false, "username").unwrap();
        let entity = get_entity(&root, "username").unwrap();
        let names: Vec<&str> = entity.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(vec![kept.as_str()], names);
        cleanup();
    }

    #[test]
    fn get_entity_without_permission() {
        init_db_folder();
        let root = create_user_entry("username");
        create_user_entry("other");
        assert_eq!(
            GetEntityError::PermissionDenied,
            get_entity(&root, "other").unwrap_err()
        );
        cleanup();
    }

    #[test]
    fn get_file_path_of_folder() {
        init_db_folder();
        let root = create_user_entry("username");
        assert_eq!(
            DownloadEntityError::IsADirectory,
            get_file_path(&root, "username").unwrap_err()
        );
        cleanup();
    }

    #[test]
    fn get_file_path_of_file() {
        init_db_folder();
        create_user_entry("username");
        let file = create_file_entry("test.txt", None, "test", "username");
        let (path, title) = get_file_path(&file, "username").unwrap();
        assert_eq!("test.txt", title);
        assert_eq!("test", fs::read_to_string(Path::new(&path)).unwrap());
        cleanup();
    }
}
