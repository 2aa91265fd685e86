//! Nested-set maintenance for the entity tree.
//!
//! Every entity carries `lft`/`rgt` bounds so that a whole subtree can be pulled with one range query.
//! All user trees share a single numbering, roots laid out one after another. Every function here
//! must run inside the same transaction as the write it accompanies, otherwise bounds go stale.

use std::collections::HashMap;

use rusqlite::Connection;

use crate::model::repository::DriveEntity;
use crate::repository::entity_repository;

/// assigns bounds to `entity` as the last child of `parent` (or as a new root if `parent` is `None`)
/// and saves it.
///
/// `parent` must have been read inside the current transaction
pub fn insert(
    mut entity: DriveEntity,
    parent: Option<&DriveEntity>,
    con: &Connection,
) -> Result<DriveEntity, rusqlite::Error> {
    match parent {
        Some(parent) => {
            let anchor = parent.rgt;
            entity_repository::shift_rgt(2, anchor, con)?;
            entity_repository::shift_lft(2, anchor + 1, con)?;
            entity.parent_drive_entity = Some(parent.name.clone());
            entity.lft = anchor;
            entity.rgt = anchor + 1;
        }
        None => {
            let lft = entity_repository::get_max_rgt(con)? + 1;
            entity.parent_drive_entity = None;
            entity.lft = lft;
            entity.rgt = lft + 1;
        }
    };
    entity_repository::create_entity(&entity, con)?;
    Ok(entity)
}

/// closes the gap left behind by `root` and its descendants. The rows themselves must already be deleted
pub fn remove_subtree(root: &DriveEntity, con: &Connection) -> Result<(), rusqlite::Error> {
    let width = root.rgt - root.lft + 1;
    entity_repository::shift_lft(-width, root.rgt + 1, con)?;
    entity_repository::shift_rgt(-width, root.rgt + 1, con)?;
    Ok(())
}

/// returns `root` and every entity beneath it, depth-first with children before their parents.
/// `root` is always the last element
pub fn subtree_post_order(
    root: &DriveEntity,
    con: &Connection,
) -> Result<Vec<DriveEntity>, rusqlite::Error> {
    entity_repository::get_subtree_post_order(root, con)
}

/// the direct children of the entity named `name`, including trashed ones
pub fn get_children(name: &str, con: &Connection) -> Result<Vec<DriveEntity>, rusqlite::Error> {
    entity_repository::get_children(name, con)
}

/// makes `entity` and its subtree the last child of `parent`, shifting only the bounds between the old and
/// new position. `parent` must not be `entity` or one of its descendants.
///
/// Both entities must have been read inside the current transaction. The new parent pointer is set on
/// `entity` but not saved
pub fn move_subtree(
    entity: &mut DriveEntity,
    parent: &DriveEntity,
    con: &Connection,
) -> Result<(), rusqlite::Error> {
    let width = entity.rgt - entity.lft + 1;
    entity_repository::detach_subtree(entity, con)?;
    entity_repository::shift_lft(-width, entity.rgt + 1, con)?;
    entity_repository::shift_rgt(-width, entity.rgt + 1, con)?;
    // the parent's right bound moved too if it came after the closed gap
    let anchor = if parent.rgt > entity.rgt {
        parent.rgt - width
    } else {
        parent.rgt
    };
    entity_repository::shift_rgt(width, anchor, con)?;
    entity_repository::shift_lft(width, anchor + 1, con)?;
    let offset = anchor - entity.lft;
    entity_repository::attach_subtree(offset, con)?;
    entity.lft += offset;
    entity.rgt += offset;
    entity.parent_drive_entity = Some(parent.name.clone());
    Ok(())
}

pub fn is_descendant(ancestor: &DriveEntity, candidate: &DriveEntity) -> bool {
    candidate.lft > ancestor.lft && candidate.rgt < ancestor.rgt
}

/// a slot in the arena built by [`rebuild`]
struct Slot {
    name: String,
    children: Vec<usize>,
    old_bounds: (i64, i64),
    new_bounds: (i64, i64),
}

enum Visit {
    Enter(usize),
    Exit(usize),
}

/// recomputes every nested-set bound from the parent pointers, and saves the bounds that changed.
/// This reads the whole table, so it only runs as a repair when the database is opened at startup.
///
/// Siblings keep their current relative order. The walk uses an explicit stack, so tree depth is
/// only limited by memory
pub fn rebuild(con: &Connection) -> Result<(), rusqlite::Error> {
    let links = entity_repository::get_tree_links(con)?;
    let index: HashMap<&str, usize> = links
        .iter()
        .enumerate()
        .map(|(i, link)| (link.name.as_str(), i))
        .collect();
    let mut arena: Vec<Slot> = links
        .iter()
        .map(|link| Slot {
            name: link.name.clone(),
            children: Vec::new(),
            old_bounds: (link.lft, link.rgt),
            new_bounds: (0, 0),
        })
        .collect();
    let mut roots: Vec<usize> = Vec::new();
    for (i, link) in links.iter().enumerate() {
        match link.parent.as_deref().and_then(|p| index.get(p)) {
            Some(&parent) => arena[parent].children.push(i),
            None => {
                if let Some(parent) = &link.parent {
                    log::warn!(
                        "Entity {} points to missing parent {parent}, treating it as a root",
                        link.name
                    );
                }
                roots.push(i);
            }
        }
    }

    let mut counter: i64 = 1;
    let mut visited = 0usize;
    let mut stack: Vec<Visit> = Vec::new();
    for root in roots {
        stack.push(Visit::Enter(root));
        while let Some(visit) = stack.pop() {
            match visit {
                Visit::Enter(i) => {
                    arena[i].new_bounds.0 = counter;
                    counter += 1;
                    visited += 1;
                    stack.push(Visit::Exit(i));
                    // reversed so the first child is popped first
                    for &child in arena[i].children.iter().rev() {
                        stack.push(Visit::Enter(child));
                    }
                }
                Visit::Exit(i) => {
                    arena[i].new_bounds.1 = counter;
                    counter += 1;
                }
            }
        }
    }
    if visited != arena.len() {
        log::error!(
            "Only {visited} of {} entities are reachable from a root, the tree contains a cycle",
            arena.len()
        );
    }

    // unreachable slots are left as they were
    let changed = arena
        .iter()
        .filter(|s| s.new_bounds.1 != 0 && s.old_bounds != s.new_bounds);
    for slot in changed {
        entity_repository::set_bounds(&slot.name, slot.new_bounds.0, slot.new_bounds.1, con)?;
    }
    Ok(())
}
