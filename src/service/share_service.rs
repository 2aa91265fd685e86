use std::backtrace::Backtrace;

use rusqlite::{Connection, TransactionBehavior};

use crate::hierarchy;
use crate::model::error::share_errors::ShareEntityError;
use crate::model::repository::{DriveEntity, PermissionType, ShareTarget};
use crate::repository::{
    entity_repository, notification_repository, open_connection, share_repository,
    user_repository,
};
use crate::service::permission_service::has_permission;
use crate::util::now;

/// `entity` and, if it is a folder, all of its descendants. Children come before their parents
fn share_worklist(
    entity: &DriveEntity,
    con: &Connection,
) -> Result<Vec<DriveEntity>, rusqlite::Error> {
    if entity.is_group {
        hierarchy::subtree_post_order(entity, con)
    } else {
        Ok(vec![entity.clone()])
    }
}

fn get_entity(name: &str, con: &Connection) -> Result<DriveEntity, ShareEntityError> {
    match entity_repository::get_by_name(name, con) {
        Ok(e) => Ok(e),
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(ShareEntityError::NotFound),
        Err(e) => {
            log::error!(
                "Failed to retrieve entity {name}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(ShareEntityError::DbError)
        }
    }
}

fn check_share_permission(
    entity: &DriveEntity,
    caller: &str,
    con: &Connection,
) -> Result<(), ShareEntityError> {
    match has_permission(entity, caller, PermissionType::Share, con) {
        Ok(true) => Ok(()),
        Ok(false) => Err(ShareEntityError::PermissionDenied),
        Err(e) => {
            log::error!(
                "Failed to check share permission on {} for {caller}! Error is {e:?}\n{}",
                entity.name,
                Backtrace::force_capture()
            );
            Err(ShareEntityError::DbError)
        }
    }
}

/// grants `target` read access (plus `write` and `share` as passed) to the entity.
///
/// Folders pass the same grant down to every descendant before the folder itself gets it.
/// Only the top-level grant notifies, and only when a named user other than the caller is the target
pub fn share(
    name: &str,
    target: &ShareTarget,
    write: bool,
    share: bool,
    notify: bool,
    caller: &str,
) -> Result<(), ShareEntityError> {
    let mut con = open_connection();
    let tx = con
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|e| {
            log::error!(
                "Failed to start transaction! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            ShareEntityError::DbError
        })?;
    let entity = get_entity(name, &tx)?;
    check_share_permission(&entity, caller, &tx)?;
    if let ShareTarget::User(user) = target {
        match user_repository::get_user(user, &tx) {
            Ok(Some(_)) => { /* good route */ }
            Ok(None) => return Err(ShareEntityError::UserNotFound),
            Err(e) => {
                log::error!(
                    "Failed to retrieve user {user}! Error is {e:?}\n{}",
                    Backtrace::force_capture()
                );
                return Err(ShareEntityError::DbError);
            }
        };
    }
    let timestamp = now();
    let res = share_worklist(&entity, &tx)
        .and_then(|worklist| {
            for item in worklist.iter() {
                share_repository::upsert_share(&item.name, target, write, share, timestamp, &tx)?;
            }
            Ok(worklist.len())
        })
        .and_then(|count| {
            match target {
                ShareTarget::User(user) if notify && user != caller => {
                    let subject = format!("{caller} shared \"{}\" with you", entity.title);
                    notification_repository::create_notification(
                        user,
                        caller,
                        &entity.name,
                        &subject,
                        timestamp,
                        &tx,
                    )?;
                }
                _ => { /* no notification */ }
            };
            Ok(count)
        })
        .and_then(|count| tx.commit().map(|_| count));
    match res {
        Ok(count) => {
            log::info!("{caller} shared {name} with {target:?}, {count} grants saved");
            Ok(())
        }
        Err(e) => {
            log::error!(
                "Failed to share {name} with {target:?}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(ShareEntityError::DbError)
        }
    }
}

/// removes the grant for `target` from the entity and all of its descendants.
///
/// Anyone may remove their own grant. Removing someone else's needs share permission
pub fn unshare(name: &str, target: &ShareTarget, caller: &str) -> Result<(), ShareEntityError> {
    let mut con = open_connection();
    let tx = con
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|e| {
            log::error!(
                "Failed to start transaction! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            ShareEntityError::DbError
        })?;
    let entity = get_entity(name, &tx)?;
    if *target != ShareTarget::User(caller.to_string()) {
        check_share_permission(&entity, caller, &tx)?;
    }
    let res = share_worklist(&entity, &tx)
        .and_then(|worklist| {
            for item in worklist.iter() {
                share_repository::delete_share(&item.name, target, &tx)?;
            }
            Ok(())
        })
        .and_then(|_| tx.commit());
    if let Err(e) = res {
        log::error!(
            "Failed to unshare {name} from {target:?}! Error is {e:?}\n{}",
            Backtrace::force_capture()
        );
        return Err(ShareEntityError::DbError);
    }
    log::info!("{caller} unshared {name} from {target:?}");
    Ok(())
}
