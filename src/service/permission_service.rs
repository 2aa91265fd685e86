use std::backtrace::Backtrace;
use std::collections::HashSet;

use rusqlite::Connection;

use crate::model::error::permission_errors::{
    GeneralAccessError, GetNotificationsError, SharedWithListError, SharedWithMeError,
};
use crate::model::repository::{DriveEntity, PermissionType, ShareRecord, ShareTarget};
use crate::model::response::{GeneralAccessApi, NotificationApi, SharedEntityApi, SharedWithApi};
use crate::repository::{
    entity_repository, notification_repository, open_connection, share_repository,
};

/// checks whether `user` may perform `ptype` on `entity`.
///
/// Owners can do anything. Everyone else gets the union of their own grant and the entity's everyone grant
pub fn has_permission(
    entity: &DriveEntity,
    user: &str,
    ptype: PermissionType,
    con: &Connection,
) -> Result<bool, rusqlite::Error> {
    if entity.owner == user {
        return Ok(true);
    }
    let own = share_repository::get_share(&entity.name, &ShareTarget::User(user.to_string()), con)?;
    let everyone = share_repository::get_share(&entity.name, &ShareTarget::Everyone, con)?;
    Ok(own
        .iter()
        .chain(everyone.iter())
        .any(|grant| grants(grant, ptype)))
}

fn grants(share: &ShareRecord, ptype: PermissionType) -> bool {
    match ptype {
        PermissionType::Read => share.read,
        PermissionType::Write => share.write,
        PermissionType::Share => share.share,
    }
}

/// returns every user the entity has been explicitly shared with, newest grant first.
/// The caller needs write permission on the entity
pub fn get_shared_with_list(
    name: &str,
    caller: &str,
) -> Result<Vec<SharedWithApi>, SharedWithListError> {
    let con = open_connection();
    let entity = match entity_repository::get_by_name(name, &con) {
        Ok(e) => e,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Err(SharedWithListError::NotFound),
        Err(e) => {
            log::error!(
                "Failed to retrieve entity {name}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            return Err(SharedWithListError::DbError);
        }
    };
    let allowed = has_permission(&entity, caller, PermissionType::Write, &con).map_err(|e| {
        log::error!(
            "Failed to check write permission on {name} for {caller}! Error is {e:?}\n{}",
            Backtrace::force_capture()
        );
        SharedWithListError::DbError
    })?;
    if !allowed {
        return Err(SharedWithListError::PermissionDenied);
    }
    let rows = share_repository::get_shared_with_list(name, &con).map_err(|e| {
        log::error!(
            "Failed to retrieve grants on {name}! Error is {e:?}\n{}",
            Backtrace::force_capture()
        );
        SharedWithListError::DbError
    })?;
    Ok(rows.into_iter().map(SharedWithApi::from).collect())
}

/// With a folder name, returns the caller's grants on the folder's active direct children.
///
/// Without one, returns the top-level entities shared with the caller: an entity whose parent is
/// also shared with the caller is only reachable through that parent, and is left out
pub fn get_shared_with_me(
    name: Option<&str>,
    caller: &str,
) -> Result<Vec<SharedEntityApi>, SharedWithMeError> {
    let con = open_connection();
    let rows = match name {
        Some(name) => {
            let folder = match entity_repository::get_by_name(name, &con) {
                Ok(e) if e.is_group => e,
                Ok(_) | Err(rusqlite::Error::QueryReturnedNoRows) => {
                    return Err(SharedWithMeError::NotADirectory)
                }
                Err(e) => {
                    log::error!(
                        "Failed to retrieve entity {name}! Error is {e:?}\n{}",
                        Backtrace::force_capture()
                    );
                    return Err(SharedWithMeError::DbError);
                }
            };
            let allowed =
                has_permission(&folder, caller, PermissionType::Read, &con).map_err(|e| {
                    log::error!(
                        "Failed to check read permission on {name} for {caller}! Error is {e:?}\n{}",
                        Backtrace::force_capture()
                    );
                    SharedWithMeError::DbError
                })?;
            if !allowed {
                return Err(SharedWithMeError::PermissionDenied);
            }
            share_repository::get_shared_children(name, caller, &con)
        }
        None => share_repository::get_shared_with_user(caller, &con).map(|rows| {
            let names: HashSet<String> = rows.iter().map(|r| r.name.clone()).collect();
            rows.into_iter()
                .filter(|r| {
                    r.parent_drive_entity
                        .as_ref()
                        .map_or(true, |parent| !names.contains(parent))
                })
                .collect::<Vec<_>>()
        }),
    };
    let rows = rows.map_err(|e| {
        log::error!(
            "Failed to retrieve entities shared with {caller}! Error is {e:?}\n{}",
            Backtrace::force_capture()
        );
        SharedWithMeError::DbError
    })?;
    Ok(rows.into_iter().map(SharedEntityApi::from).collect())
}

/// returns the read/write flags of the entity's everyone grant, or `None` if it doesn't have one
pub fn get_general_access(name: &str) -> Result<Option<GeneralAccessApi>, GeneralAccessError> {
    let con = open_connection();
    match share_repository::get_share(name, &ShareTarget::Everyone, &con) {
        Ok(share) => Ok(share.map(GeneralAccessApi::from)),
        Err(e) => {
            log::error!(
                "Failed to retrieve general access for {name}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(GeneralAccessError::DbError)
        }
    }
}

/// returns the caller's notifications, newest first
pub fn get_notifications(caller: &str) -> Result<Vec<NotificationApi>, GetNotificationsError> {
    let con = open_connection();
    match notification_repository::get_notifications_for_user(caller, &con) {
        Ok(notifications) => Ok(notifications
            .into_iter()
            .map(NotificationApi::from)
            .collect()),
        Err(e) => {
            log::error!(
                "Failed to retrieve notifications for {caller}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(GetNotificationsError::DbError)
        }
    }
}
