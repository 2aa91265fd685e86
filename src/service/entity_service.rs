use std::backtrace::Backtrace;
use std::path::PathBuf;

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::hierarchy;
use crate::model::error::entity_errors::{
    CreateEntityError, DeleteEntityError, DownloadEntityError, GetEntityError, MoveEntityError,
    RenameEntityError, TrashEntityError,
};
use crate::model::repository::{DriveEntity, PermissionType};
use crate::model::response::EntityApi;
use crate::repository::{entity_repository, open_connection, share_repository};
use crate::service::permission_service::has_permission;
use crate::service::user_service;
use crate::storage::{self, StagedPath};
use crate::util::{generate_name, now};

fn begin(con: &mut Connection) -> Result<Transaction<'_>, rusqlite::Error> {
    con.transaction_with_behavior(TransactionBehavior::Immediate)
}

fn log_db_error(action: &str, e: &rusqlite::Error) {
    log::error!(
        "Failed to {action}! Error is {e:?}\n{}",
        Backtrace::force_capture()
    );
}

/// retrieves the folder entities should be placed in: `parent` if passed, otherwise the caller's root directory.
///
/// if `None` is returned, the folder doesn't exist or isn't a folder
fn find_folder(
    parent: Option<&str>,
    user: &str,
    con: &Connection,
) -> Result<Option<DriveEntity>, rusqlite::Error> {
    let res = match parent {
        Some(name) => entity_repository::get_by_name(name, con),
        None => user_service::get_user_directory(user, con),
    };
    match res {
        Ok(folder) if folder.is_group => Ok(Some(folder)),
        Ok(_) | Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

/// bumps the version and modified date of `entity`, then saves it
fn save(entity: &mut DriveEntity, con: &Connection) -> Result<(), rusqlite::Error> {
    entity.version += 1;
    entity.modified = now();
    entity_repository::update_entity(entity, con)
}

/// runs the checks shared by folder creation and uploads, returning the folder to create in
fn check_create(
    title: &str,
    parent: Option<&str>,
    user: &str,
    con: &Connection,
) -> Result<DriveEntity, CreateEntityError> {
    let folder = match find_folder(parent, user, con) {
        Ok(Some(folder)) => folder,
        Ok(None) => return Err(CreateEntityError::NotADirectory),
        Err(e) => {
            log_db_error("retrieve parent folder", &e);
            return Err(CreateEntityError::DbError);
        }
    };
    match has_permission(&folder, user, PermissionType::Write, con) {
        Ok(true) => { /* good route */ }
        Ok(false) => return Err(CreateEntityError::PermissionDenied),
        Err(e) => {
            log_db_error("check write permission on parent folder", &e);
            return Err(CreateEntityError::DbError);
        }
    };
    match entity_repository::find_sibling_by_title(Some(folder.name.as_str()), title, con) {
        Ok(None) => Ok(folder),
        Ok(Some(_)) => Err(CreateEntityError::AlreadyExists),
        Err(e) => {
            log_db_error("search for sibling by title", &e);
            Err(CreateEntityError::DbError)
        }
    }
}

pub fn create_folder(
    title: &str,
    parent: Option<&str>,
    user: &str,
) -> Result<EntityApi, CreateEntityError> {
    let mut con = open_connection();
    let tx = begin(&mut con).map_err(|e| {
        log_db_error("start transaction", &e);
        CreateEntityError::DbError
    })?;
    let folder = check_create(title, parent, user, &tx)?;
    let entity = DriveEntity::new(
        generate_name(title),
        title.to_string(),
        true,
        user.to_string(),
    );
    let created =
        hierarchy::insert(entity, Some(&folder), &tx).and_then(|e| tx.commit().map(|_| e));
    match created {
        Ok(entity) => {
            log::info!("{user} created folder {} in {}", entity.name, folder.name);
            Ok(EntityApi::from(entity))
        }
        Err(e) => {
            log_db_error("create folder", &e);
            Err(CreateEntityError::DbError)
        }
    }
}

/// saves an uploaded file. The contents are written to the disk before the database row,
/// and are removed again if the transaction doesn't commit
pub fn create_file(
    title: &str,
    parent: Option<&str>,
    mime_type: Option<String>,
    contents: &[u8],
    user: &str,
) -> Result<EntityApi, CreateEntityError> {
    let mut con = open_connection();
    let tx = begin(&mut con).map_err(|e| {
        log_db_error("start transaction", &e);
        CreateEntityError::DbError
    })?;
    let folder = check_create(title, parent, user, &tx)?;
    let mut entity = DriveEntity::new(
        generate_name(title),
        title.to_string(),
        false,
        user.to_string(),
    );
    let staged = StagedPath::write_file(storage::entity_path(user, &entity.name), contents)
        .map_err(|e| {
            log::error!(
                "Failed to write file {title} to the disk! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            CreateEntityError::FileSystemError
        })?;
    entity.path = Some(staged.path().to_string_lossy().to_string());
    entity.file_size = contents.len() as u64;
    entity.mime_type = mime_type;
    let created =
        hierarchy::insert(entity, Some(&folder), &tx).and_then(|e| tx.commit().map(|_| e));
    match created {
        Ok(entity) => {
            staged.keep();
            log::info!("{user} uploaded file {} to {}", entity.name, folder.name);
            Ok(EntityApi::from(entity))
        }
        Err(e) => {
            log_db_error("create file", &e);
            Err(CreateEntityError::DbError)
        }
    }
}

/// moves the entity into `new_parent`, or into the caller's root directory if `None` is passed
pub fn move_entity(
    name: &str,
    new_parent: Option<&str>,
    user: &str,
) -> Result<EntityApi, MoveEntityError> {
    let mut con = open_connection();
    let tx = begin(&mut con).map_err(|e| {
        log_db_error("start transaction", &e);
        MoveEntityError::DbError
    })?;
    let mut entity = match entity_repository::get_by_name(name, &tx) {
        Ok(e) => e,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Err(MoveEntityError::NotFound),
        Err(e) => {
            log_db_error("retrieve entity to move", &e);
            return Err(MoveEntityError::DbError);
        }
    };
    match has_permission(&entity, user, PermissionType::Write, &tx) {
        Ok(true) => { /* good route */ }
        Ok(false) => return Err(MoveEntityError::PermissionDenied),
        Err(e) => {
            log_db_error("check write permission on entity", &e);
            return Err(MoveEntityError::DbError);
        }
    };
    // root directories stay roots
    if entity.parent_drive_entity.is_none() {
        return Err(MoveEntityError::NotAllowed);
    }
    let target = match find_folder(new_parent, user, &tx) {
        Ok(Some(folder)) => folder,
        Ok(None) => return Err(MoveEntityError::NotADirectory),
        Err(e) => {
            log_db_error("retrieve target folder", &e);
            return Err(MoveEntityError::DbError);
        }
    };
    if target.name == entity.name || hierarchy::is_descendant(&entity, &target) {
        return Err(MoveEntityError::NotAllowed);
    }
    match has_permission(&target, user, PermissionType::Write, &tx) {
        Ok(true) => { /* good route */ }
        Ok(false) => return Err(MoveEntityError::PermissionDenied),
        Err(e) => {
            log_db_error("check write permission on target folder", &e);
            return Err(MoveEntityError::DbError);
        }
    };
    // the entity itself counts, so moving into the current parent is a collision
    match entity_repository::find_sibling_by_title(
        Some(target.name.as_str()),
        &entity.title,
        &tx,
    ) {
        Ok(None) => { /* good route */ }
        Ok(Some(_)) => return Err(MoveEntityError::AlreadyExists),
        Err(e) => {
            log_db_error("search target folder for title", &e);
            return Err(MoveEntityError::DbError);
        }
    };
    let moved = hierarchy::move_subtree(&mut entity, &target, &tx)
        .and_then(|_| save(&mut entity, &tx))
        .and_then(|_| tx.commit());
    if let Err(e) = moved {
        log_db_error("move entity", &e);
        return Err(MoveEntityError::DbError);
    }
    log::info!("{user} moved {name} into {}", target.name);
    Ok(EntityApi::from(entity))
}

pub fn rename_entity(
    name: &str,
    new_title: &str,
    user: &str,
) -> Result<EntityApi, RenameEntityError> {
    let mut con = open_connection();
    let tx = begin(&mut con).map_err(|e| {
        log_db_error("start transaction", &e);
        RenameEntityError::DbError
    })?;
    let mut entity = match entity_repository::get_by_name(name, &tx) {
        Ok(e) => e,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Err(RenameEntityError::NotFound),
        Err(e) => {
            log_db_error("retrieve entity to rename", &e);
            return Err(RenameEntityError::DbError);
        }
    };
    match has_permission(&entity, user, PermissionType::Write, &tx) {
        Ok(true) => { /* good route */ }
        Ok(false) => return Err(RenameEntityError::PermissionDenied),
        Err(e) => {
            log_db_error("check write permission on entity", &e);
            return Err(RenameEntityError::DbError);
        }
    };
    // root directories have no siblings
    if let Some(parent) = entity.parent_drive_entity.as_deref() {
        match entity_repository::find_sibling_by_title(Some(parent), new_title, &tx) {
            Ok(None) => { /* good route */ }
            Ok(Some(_)) => return Err(RenameEntityError::AlreadyExists),
            Err(e) => {
                log_db_error("search siblings for title", &e);
                return Err(RenameEntityError::DbError);
            }
        };
    }
    entity.title = new_title.to_string();
    if let Err(e) = save(&mut entity, &tx).and_then(|_| tx.commit()) {
        log_db_error("rename entity", &e);
        return Err(RenameEntityError::DbError);
    }
    Ok(EntityApi::from(entity))
}

/// deletes the entity and everything beneath it, children first.
///
/// Returns the names of the deleted entities in the order they were deleted.
/// Physical files are only removed once the database changes have committed
pub fn delete_entity(name: &str, user: &str) -> Result<Vec<String>, DeleteEntityError> {
    let mut con = open_connection();
    let tx = begin(&mut con).map_err(|e| {
        log_db_error("start transaction", &e);
        DeleteEntityError::DbError
    })?;
    let entity = match entity_repository::get_by_name(name, &tx) {
        Ok(e) => e,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Err(DeleteEntityError::NotFound),
        Err(e) => {
            log_db_error("retrieve entity to delete", &e);
            return Err(DeleteEntityError::DbError);
        }
    };
    if entity.owner != user {
        return Err(DeleteEntityError::PermissionDenied);
    }
    if entity.parent_drive_entity.is_none() {
        return Err(DeleteEntityError::NotAllowed);
    }
    let subtree = hierarchy::subtree_post_order(&entity, &tx).map_err(|e| {
        log_db_error("retrieve subtree to delete", &e);
        DeleteEntityError::DbError
    })?;
    let mut deleted = Vec::with_capacity(subtree.len());
    let mut paths: Vec<PathBuf> = Vec::new();
    for child in subtree {
        let res = share_repository::delete_shares_for_entity(&child.name, &tx)
            .and_then(|_| entity_repository::delete_entity(&child.name, &tx));
        if let Err(e) = res {
            log_db_error(&format!("delete entity {}", child.name), &e);
            return Err(DeleteEntityError::DbError);
        }
        if let Some(path) = child.path {
            paths.push(PathBuf::from(path));
        }
        deleted.push(child.name);
    }
    if let Err(e) = hierarchy::remove_subtree(&entity, &tx).and_then(|_| tx.commit()) {
        log_db_error("delete entity", &e);
        return Err(DeleteEntityError::DbError);
    }
    log::info!("{user} deleted {name} and {} descendants", deleted.len() - 1);
    remove_paths(&paths)?;
    Ok(deleted)
}

fn remove_paths(paths: &[PathBuf]) -> Result<(), DeleteEntityError> {
    let mut failed = false;
    for path in paths {
        if let Err(e) = storage::remove_physical(path) {
            log::error!(
                "Failed to remove {path:?} from the disk! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            failed = true;
        }
    }
    if failed {
        Err(DeleteEntityError::FileSystemError)
    } else {
        Ok(())
    }
}

/// moves the entity and its subtree into the trash (`active = false`) or back out of it
pub fn set_active(name: &str, active: bool, user: &str) -> Result<(), TrashEntityError> {
    let mut con = open_connection();
    let tx = begin(&mut con).map_err(|e| {
        log_db_error("start transaction", &e);
        TrashEntityError::DbError
    })?;
    let entity = match entity_repository::get_by_name(name, &tx) {
        Ok(e) => e,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Err(TrashEntityError::NotFound),
        Err(e) => {
            log_db_error("retrieve entity to trash", &e);
            return Err(TrashEntityError::DbError);
        }
    };
    match has_permission(&entity, user, PermissionType::Write, &tx) {
        Ok(true) => { /* good route */ }
        Ok(false) => return Err(TrashEntityError::PermissionDenied),
        Err(e) => {
            log_db_error("check write permission on entity", &e);
            return Err(TrashEntityError::DbError);
        }
    };
    if entity.parent_drive_entity.is_none() {
        return Err(TrashEntityError::NotAllowed);
    }
    let res = entity_repository::set_subtree_active(&entity, active, now(), &tx)
        .and_then(|_| tx.commit());
    if let Err(e) = res {
        log_db_error("update trash state", &e);
        return Err(TrashEntityError::DbError);
    }
    Ok(())
}

/// retrieves the entity along with its active direct children
pub fn get_entity(name: &str, user: &str) -> Result<EntityApi, GetEntityError> {
    let con = open_connection();
    let entity = match entity_repository::get_by_name(name, &con) {
        Ok(e) => e,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Err(GetEntityError::NotFound),
        Err(e) => {
            log_db_error("retrieve entity", &e);
            return Err(GetEntityError::DbError);
        }
    };
    match has_permission(&entity, user, PermissionType::Read, &con) {
        Ok(true) => { /* good route */ }
        Ok(false) => return Err(GetEntityError::PermissionDenied),
        Err(e) => {
            log_db_error("check read permission on entity", &e);
            return Err(GetEntityError::DbError);
        }
    };
    let mut api = EntityApi::from(&entity);
    if entity.is_group {
        let mut children: Vec<DriveEntity> = hierarchy::get_children(name, &con)
            .map_err(|e| {
                log_db_error("retrieve children", &e);
                GetEntityError::DbError
            })?
            .into_iter()
            .filter(|child| child.is_active)
            .collect();
        // folders first, then by title
        children.sort_by(|a, b| {
            b.is_group
                .cmp(&a.is_group)
                .then_with(|| a.title.cmp(&b.title))
        });
        api.children = children.into_iter().map(EntityApi::from).collect();
    }
    Ok(api)
}

/// returns where the contents of the file entity are stored, along with its title
pub fn get_file_path(name: &str, user: &str) -> Result<(PathBuf, String), DownloadEntityError> {
    let con = open_connection();
    let entity = match entity_repository::get_by_name(name, &con) {
        Ok(e) => e,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Err(DownloadEntityError::NotFound),
        Err(e) => {
            log_db_error("retrieve entity", &e);
            return Err(DownloadEntityError::DbError);
        }
    };
    match has_permission(&entity, user, PermissionType::Read, &con) {
        Ok(true) => { /* good route */ }
        Ok(false) => return Err(DownloadEntityError::PermissionDenied),
        Err(e) => {
            log_db_error("check read permission on entity", &e);
            return Err(DownloadEntityError::DbError);
        }
    };
    if entity.is_group {
        return Err(DownloadEntityError::IsADirectory);
    }
    match entity.path {
        Some(path) => Ok((PathBuf::from(path), entity.title)),
        None => {
            log::error!("File {name} has no path on the disk");
            Err(DownloadEntityError::NotFound)
        }
    }
}
