use chrono::NaiveDateTime;
use rusqlite::{params, Connection};

use crate::model::repository::{ShareRecord, ShareTarget, SharedEntityRow, SharedWithRow};

/// returns the grant for `target` on the entity with the passed name, if there is one
pub fn get_share(
    share_name: &str,
    target: &ShareTarget,
    con: &Connection,
) -> Result<Option<ShareRecord>, rusqlite::Error> {
    let res = match target {
        ShareTarget::User(user) => {
            let mut pst =
                con.prepare(include_str!("../assets/queries/share/get_user_share.sql"))?;
            pst.query_row(params![share_name, user], map_share)
        }
        ShareTarget::Everyone => {
            let mut pst = con.prepare(include_str!(
                "../assets/queries/share/get_everyone_share.sql"
            ))?;
            pst.query_row(params![share_name], map_share)
        }
    };
    match res {
        Ok(share) => Ok(Some(share)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

/// creates the grant for `target`, or overwrites its permission bits if one already exists.
/// `read` is always granted
pub fn upsert_share(
    share_name: &str,
    target: &ShareTarget,
    write: bool,
    share: bool,
    now: NaiveDateTime,
    con: &Connection,
) -> Result<(), rusqlite::Error> {
    if let Some(existing) = get_share(share_name, target, con)? {
        let mut pst = con.prepare(include_str!("../assets/queries/share/update_share.sql"))?;
        pst.execute(params![true, write, share, now, existing.id])?;
        return Ok(());
    }
    let (user, everyone) = match target {
        ShareTarget::User(user) => (Some(user.as_str()), false),
        ShareTarget::Everyone => (None, true),
    };
    let mut pst = con.prepare(include_str!("../assets/queries/share/create_share.sql"))?;
    pst.execute(params![share_name, user, true, write, share, everyone, now])?;
    Ok(())
}

/// removes the grant for `target`. Does nothing if there is no such grant
pub fn delete_share(
    share_name: &str,
    target: &ShareTarget,
    con: &Connection,
) -> Result<(), rusqlite::Error> {
    match target {
        ShareTarget::User(user) => {
            let mut pst = con.prepare(include_str!(
                "../assets/queries/share/delete_user_share.sql"
            ))?;
            pst.execute(params![share_name, user])?;
        }
        ShareTarget::Everyone => {
            let mut pst = con.prepare(include_str!(
                "../assets/queries/share/delete_everyone_share.sql"
            ))?;
            pst.execute(params![share_name])?;
        }
    };
    Ok(())
}

/// removes every grant on the entity with the passed name
pub fn delete_shares_for_entity(share_name: &str, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/share/delete_shares_for_entity.sql"
    ))?;
    pst.execute([share_name])?;
    Ok(())
}

/// returns every per-user grant on the entity, newest first
pub fn get_shared_with_list(
    share_name: &str,
    con: &Connection,
) -> Result<Vec<SharedWithRow>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/share/get_shared_with_list.sql"
    ))?;
    let rows = pst.query_map([share_name], |row| {
        Ok(SharedWithRow {
            user: row.get(0)?,
            read: row.get(1)?,
            write: row.get(2)?,
            share: row.get(3)?,
            everyone: row.get(4)?,
            modified: row.get(5)?,
            full_name: row.get(6)?,
            user_image: row.get(7)?,
        })
    })?;
    rows.collect()
}

/// returns every active entity explicitly shared with `user`, in tree order
pub fn get_shared_with_user(
    user: &str,
    con: &Connection,
) -> Result<Vec<SharedEntityRow>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/share/get_shared_with_user.sql"
    ))?;
    let rows = pst.query_map([user], map_shared_entity)?;
    rows.collect()
}

/// returns the active direct children of `parent` that are explicitly shared with `user`
pub fn get_shared_children(
    parent: &str,
    user: &str,
    con: &Connection,
) -> Result<Vec<SharedEntityRow>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/share/get_shared_children.sql"
    ))?;
    let rows = pst.query_map(params![parent, user], map_shared_entity)?;
    rows.collect()
}

fn map_share(row: &rusqlite::Row) -> Result<ShareRecord, rusqlite::Error> {
    Ok(ShareRecord {
        id: row.get(0)?,
        share_name: row.get(1)?,
        user: row.get(2)?,
        read: row.get(3)?,
        write: row.get(4)?,
        share: row.get(5)?,
        everyone: row.get(6)?,
        creation: row.get(7)?,
        modified: row.get(8)?,
    })
}

fn map_shared_entity(row: &rusqlite::Row) -> Result<SharedEntityRow, rusqlite::Error> {
    Ok(SharedEntityRow {
        name: row.get(0)?,
        title: row.get(1)?,
        is_group: row.get(2)?,
        owner: row.get(3)?,
        modified: row.get(4)?,
        creation: row.get(5)?,
        file_size: row.get(6)?,
        mime_type: row.get(7)?,
        parent_drive_entity: row.get(8)?,
        read: row.get(9)?,
        write: row.get(10)?,
        share: row.get(11)?,
    })
}
