use rusqlite::{params, Connection};

use crate::model::repository::{DriveEntity, TreeLink};

pub fn get_by_name(name: &str, con: &Connection) -> Result<DriveEntity, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/entity/get_entity_by_name.sql"
    ))?;
    pst.query_row([name], map_entity)
}

/// returns every direct child of the entity with the passed name, trashed or not
pub fn get_children(name: &str, con: &Connection) -> Result<Vec<DriveEntity>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/entity/get_children.sql"))?;
    let rows = pst.query_map([name], map_entity)?;
    rows.collect()
}

/// returns the passed entity and all of its descendants, with every child listed before its parent.
/// The ordering relies on the nested-set bounds being up-to-date
pub fn get_subtree_post_order(
    root: &DriveEntity,
    con: &Connection,
) -> Result<Vec<DriveEntity>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/entity/get_subtree_post_order.sql"
    ))?;
    let rows = pst.query_map(params![root.lft, root.rgt], map_entity)?;
    rows.collect()
}

/// searches `parent` for an entity titled `title` (case-sensitive).
///
/// if `None` is returned, that means there was no match
pub fn find_sibling_by_title(
    parent: Option<&str>,
    title: &str,
    con: &Connection,
) -> Result<Option<String>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/entity/find_sibling_by_title.sql"
    ))?;
    match pst.query_row(params![parent, title], |row| row.get(0)) {
        Ok(name) => Ok(Some(name)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

/// creates an entity record in the database.
/// This does not do any checks on the parent or the nested-set bounds,
/// and that must be done before this function is called
pub fn create_entity(entity: &DriveEntity, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/entity/create_entity.sql"))?;
    pst.execute(params![
        entity.name,
        entity.title,
        entity.is_group,
        entity.parent_drive_entity,
        entity.path,
        entity.file_size,
        entity.mime_type,
        entity.version,
        entity.owner,
        entity.is_active,
        entity.lft,
        entity.rgt,
        entity.creation,
        entity.modified
    ])?;
    Ok(())
}

/// saves the title, parent, version, and modified date of the passed entity
pub fn update_entity(entity: &DriveEntity, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/entity/update_entity.sql"))?;
    pst.execute(params![
        entity.title,
        entity.parent_drive_entity,
        entity.version,
        entity.modified,
        entity.name
    ])?;
    Ok(())
}

/// removes the single row for the entity. Children and nested-set bounds are untouched
pub fn delete_entity(name: &str, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/entity/delete_entity.sql"))?;
    pst.execute([name])?;
    Ok(())
}

/// flags `root` and its whole subtree as active or trashed
pub fn set_subtree_active(
    root: &DriveEntity,
    active: bool,
    modified: chrono::NaiveDateTime,
    con: &Connection,
) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/entity/set_subtree_active.sql"
    ))?;
    pst.execute(params![active, modified, root.lft, root.rgt])?;
    Ok(())
}

/// returns the largest right bound in the table, or 0 if there are no entities
pub fn get_max_rgt(con: &Connection) -> Result<i64, rusqlite::Error> {
    con.query_row(
        include_str!("../assets/queries/entity/get_max_rgt.sql"),
        [],
        |row| row.get(0),
    )
}

/// adds `delta` to every left bound that is at least `from`
pub fn shift_lft(delta: i64, from: i64, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/entity/shift_lft.sql"))?;
    pst.execute(params![delta, from])?;
    Ok(())
}

/// adds `delta` to every right bound that is at least `from`
pub fn shift_rgt(delta: i64, from: i64, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/entity/shift_rgt.sql"))?;
    pst.execute(params![delta, from])?;
    Ok(())
}

/// negates the bounds of `root` and its descendants, so bound shifts leave them alone until [`attach_subtree`]
pub fn detach_subtree(root: &DriveEntity, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/entity/detach_subtree.sql"))?;
    pst.execute(params![root.lft, root.rgt])?;
    Ok(())
}

/// restores the detached subtree, adding `offset` to each of its original bounds
pub fn attach_subtree(offset: i64, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/entity/attach_subtree.sql"))?;
    pst.execute([offset])?;
    Ok(())
}

/// returns the parent pointer and current bounds of every entity, in left-bound order
pub fn get_tree_links(con: &Connection) -> Result<Vec<TreeLink>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/entity/get_tree_links.sql"))?;
    let rows = pst.query_map([], |row| {
        Ok(TreeLink {
            name: row.get(0)?,
            parent: row.get(1)?,
            lft: row.get(2)?,
            rgt: row.get(3)?,
        })
    })?;
    rows.collect()
}

pub fn set_bounds(name: &str, lft: i64, rgt: i64, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/entity/set_bounds.sql"))?;
    pst.execute(params![lft, rgt, name])?;
    Ok(())
}

/// retrieves the root directory of the user with the passed name
pub fn get_user_directory(user: &str, con: &Connection) -> Result<DriveEntity, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/entity/get_user_directory.sql"
    ))?;
    pst.query_row([user], map_entity)
}

fn map_entity(row: &rusqlite::Row) -> Result<DriveEntity, rusqlite::Error> {
    Ok(DriveEntity {
        name: row.get(0)?,
        title: row.get(1)?,
        is_group: row.get(2)?,
        parent_drive_entity: row.get(3)?,
        path: row.get(4)?,
        file_size: row.get(5)?,
        mime_type: row.get(6)?,
        version: row.get(7)?,
        owner: row.get(8)?,
        is_active: row.get(9)?,
        lft: row.get(10)?,
        rgt: row.get(11)?,
        creation: row.get(12)?,
        modified: row.get(13)?,
    })
}
