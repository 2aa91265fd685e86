use chrono::NaiveDateTime;
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};

use crate::model::repository;

pub mod entity_responses;
pub mod permission_responses;
pub mod share_responses;
pub mod user_responses;

pub type NoContent = ();

/// represents a basic json message
#[derive(Responder, Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct BasicMessage {
    pub message: String,
}

/// a file or folder as it is sent to clients. Folders carry their active direct children,
/// children themselves never have children filled in
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct EntityApi {
    pub name: String,
    pub title: String,
    #[serde(rename = "isGroup")]
    pub is_group: bool,
    #[serde(rename = "parentDriveEntity")]
    pub parent_drive_entity: Option<String>,
    #[serde(rename = "fileSize")]
    pub file_size: u64,
    #[serde(rename = "mimeType")]
    pub mime_type: Option<String>,
    pub version: u32,
    pub owner: String,
    #[serde(rename = "isActive")]
    pub is_active: bool,
    pub creation: NaiveDateTime,
    pub modified: NaiveDateTime,
    #[serde(default)]
    pub children: Vec<EntityApi>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct SharedWithApi {
    pub user: String,
    pub read: bool,
    pub write: bool,
    pub share: bool,
    pub everyone: bool,
    pub modified: NaiveDateTime,
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
    #[serde(rename = "userImage")]
    pub user_image: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct SharedEntityApi {
    pub name: String,
    pub title: String,
    #[serde(rename = "isGroup")]
    pub is_group: bool,
    pub owner: String,
    pub modified: NaiveDateTime,
    pub creation: NaiveDateTime,
    #[serde(rename = "fileSize")]
    pub file_size: u64,
    #[serde(rename = "mimeType")]
    pub mime_type: Option<String>,
    #[serde(rename = "parentDriveEntity")]
    pub parent_drive_entity: Option<String>,
    pub read: bool,
    pub write: bool,
    pub share: bool,
}

/// the read/write flags of an entity's everyone grant
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
#[serde(crate = "rocket::serde")]
pub struct GeneralAccessApi {
    pub read: bool,
    pub write: bool,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct NotificationApi {
    pub id: u32,
    #[serde(rename = "fromUser")]
    pub from_user: String,
    pub entity: String,
    pub subject: String,
    pub creation: NaiveDateTime,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct UserApi {
    pub name: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    #[serde(rename = "userImage")]
    pub user_image: Option<String>,
    #[serde(rename = "rootDirectory")]
    pub root_directory: Option<String>,
}

// ----------------------------------

impl BasicMessage {
    pub fn new(message: &str) -> Json<BasicMessage> {
        Json::from(BasicMessage {
            message: message.to_string(),
        })
    }
}

impl From<&str> for BasicMessage {
    fn from(value: &str) -> Self {
        Self {
            message: value.to_string(),
        }
    }
}

impl From<&repository::DriveEntity> for EntityApi {
    fn from(value: &repository::DriveEntity) -> Self {
        Self {
            name: value.name.clone(),
            title: value.title.clone(),
            is_group: value.is_group,
            parent_drive_entity: value.parent_drive_entity.clone(),
            file_size: value.file_size,
            mime_type: value.mime_type.clone(),
            version: value.version,
            owner: value.owner.clone(),
            is_active: value.is_active,
            creation: value.creation,
            modified: value.modified,
            children: Vec::new(),
        }
    }
}

impl From<repository::DriveEntity> for EntityApi {
    fn from(value: repository::DriveEntity) -> Self {
        Self::from(&value)
    }
}

impl From<repository::SharedWithRow> for SharedWithApi {
    fn from(value: repository::SharedWithRow) -> Self {
        Self {
            user: value.user,
            read: value.read,
            write: value.write,
            share: value.share,
            everyone: value.everyone,
            modified: value.modified,
            full_name: value.full_name,
            user_image: value.user_image,
        }
    }
}

impl From<repository::SharedEntityRow> for SharedEntityApi {
    fn from(value: repository::SharedEntityRow) -> Self {
        Self {
            name: value.name,
            title: value.title,
            is_group: value.is_group,
            owner: value.owner,
            modified: value.modified,
            creation: value.creation,
            file_size: value.file_size,
            mime_type: value.mime_type,
            parent_drive_entity: value.parent_drive_entity,
            read: value.read,
            write: value.write,
            share: value.share,
        }
    }
}

impl From<repository::ShareRecord> for GeneralAccessApi {
    fn from(value: repository::ShareRecord) -> Self {
        Self {
            read: value.read,
            write: value.write,
        }
    }
}

impl From<repository::Notification> for NotificationApi {
    fn from(value: repository::Notification) -> Self {
        Self {
            id: value.id,
            from_user: value.from_user,
            entity: value.entity,
            subject: value.subject,
            creation: value.creation,
        }
    }
}

impl From<repository::User> for UserApi {
    fn from(value: repository::User) -> Self {
        Self {
            name: value.name,
            full_name: value.full_name,
            user_image: value.user_image,
            root_directory: value.root_directory,
        }
    }
}
