use chrono::NaiveDateTime;

/// represents a file or folder in the DriveEntities table of the database
#[derive(Debug, PartialEq, Clone)]
pub struct DriveEntity {
    /// unique id, cannot be changed
    pub name: String,
    /// the display name of the entity, unique among its siblings
    pub title: String,
    /// `true` if this entity is a folder
    pub is_group: bool,
    /// will be `None` for a user's root directory
    pub parent_drive_entity: Option<String>,
    /// where the entity is stored on the disk. Regular folders aren't stored on the disk
    pub path: Option<String>,
    pub file_size: u64,
    pub mime_type: Option<String>,
    /// incremented every time the entity is saved
    pub version: u32,
    pub owner: String,
    /// `false` if the entity is in the trash
    pub is_active: bool,
    /// left nested-set bound
    pub lft: i64,
    /// right nested-set bound
    pub rgt: i64,
    pub creation: NaiveDateTime,
    pub modified: NaiveDateTime,
}

/// a grant of permissions on an entity, either to a single user or to everyone.
///
/// [`user`] will be `None` if and only if [`everyone`] is `true`
#[derive(Debug, PartialEq, Clone)]
pub struct ShareRecord {
    pub id: u32,
    /// the name of the entity this grant is for
    pub share_name: String,
    pub user: Option<String>,
    pub read: bool,
    pub write: bool,
    pub share: bool,
    pub everyone: bool,
    pub creation: NaiveDateTime,
    pub modified: NaiveDateTime,
}

#[derive(Debug, PartialEq, Clone)]
pub struct User {
    pub name: String,
    pub full_name: String,
    pub user_image: Option<String>,
    /// sha256 of `username:password`
    pub password_hash: String,
    /// the name of the user's root directory entity. Only `None` while the user is being created
    pub root_directory: Option<String>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Notification {
    pub id: u32,
    pub for_user: String,
    pub from_user: String,
    /// the name of the entity this notification is about
    pub entity: String,
    pub subject: String,
    pub creation: NaiveDateTime,
}

/// a single per-user grant on an entity, along with the profile of the user it is granted to
#[derive(Debug, PartialEq, Clone)]
pub struct SharedWithRow {
    pub user: String,
    pub read: bool,
    pub write: bool,
    pub share: bool,
    pub everyone: bool,
    pub modified: NaiveDateTime,
    pub full_name: Option<String>,
    pub user_image: Option<String>,
}

/// an entity joined with the grant that gives a user access to it
#[derive(Debug, PartialEq, Clone)]
pub struct SharedEntityRow {
    pub name: String,
    pub title: String,
    pub is_group: bool,
    pub owner: String,
    pub modified: NaiveDateTime,
    pub creation: NaiveDateTime,
    pub file_size: u64,
    pub mime_type: Option<String>,
    pub parent_drive_entity: Option<String>,
    pub read: bool,
    pub write: bool,
    pub share: bool,
}

/// who a share grant applies to
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ShareTarget {
    User(String),
    Everyone,
}

/// the kinds of access that can be checked on an entity
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PermissionType {
    Read,
    Write,
    Share,
}

/// the slice of an entity needed to recompute nested-set bounds
#[derive(Debug, PartialEq, Clone)]
pub struct TreeLink {
    pub name: String,
    pub parent: Option<String>,
    pub lft: i64,
    pub rgt: i64,
}

impl DriveEntity {
    /// creates an unsaved entity with no parent, no storage, and no bounds.
    /// Creation counts as the first save, so the version starts at 1
    pub fn new(name: String, title: String, is_group: bool, owner: String) -> Self {
        let now = crate::util::now();
        Self {
            name,
            title,
            is_group,
            parent_drive_entity: None,
            path: None,
            file_size: 0,
            mime_type: None,
            version: 1,
            owner,
            is_active: true,
            lft: 0,
            rgt: 0,
            creation: now,
            modified: now,
        }
    }
}
