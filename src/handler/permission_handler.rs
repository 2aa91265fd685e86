use rocket::serde::json::Json;

use crate::guard::HeaderAuth;
use crate::model::error::permission_errors::{SharedWithListError, SharedWithMeError};
use crate::model::guard::auth::ValidateResult;
use crate::model::response::permission_responses::{
    GeneralAccessResponse, GetNotificationsResponse, SharedWithListResponse, SharedWithMeResponse,
};
use crate::model::response::BasicMessage;
use crate::service::permission_service;

#[get("/shared-with/<name>")]
pub fn get_shared_with_list(name: &str, auth: HeaderAuth) -> SharedWithListResponse {
    match auth.validate() {
        ValidateResult::Ok => { /* no op */ }
        ValidateResult::UnknownUser => {
            return SharedWithListResponse::Unauthorized("Unknown user".to_string())
        }
        ValidateResult::Invalid => {
            return SharedWithListResponse::Unauthorized("Bad Credentials".to_string())
        }
    };
    match permission_service::get_shared_with_list(name, &auth.username) {
        Ok(list) => SharedWithListResponse::Success(Json::from(list)),
        Err(SharedWithListError::NotFound) => SharedWithListResponse::NotFound(
            BasicMessage::new("The entity with the passed name could not be found."),
        ),
        Err(SharedWithListError::PermissionDenied) => SharedWithListResponse::PermissionDenied(
            BasicMessage::new("You do not have permission to write to this entity."),
        ),
        Err(SharedWithListError::DbError) => SharedWithListResponse::GenericError(
            BasicMessage::new("Failed to pull shares from database. Check server logs for details"),
        ),
    }
}

/// without `entity`, lists the top-level entities shared with the caller.
/// With it, lists the caller's shared entries directly inside that folder
#[get("/shared-with-me?<entity>")]
pub fn get_shared_with_me(entity: Option<&str>, auth: HeaderAuth) -> SharedWithMeResponse {
    match auth.validate() {
        ValidateResult::Ok => { /* no op */ }
        ValidateResult::UnknownUser => {
            return SharedWithMeResponse::Unauthorized("Unknown user".to_string())
        }
        ValidateResult::Invalid => {
            return SharedWithMeResponse::Unauthorized("Bad Credentials".to_string())
        }
    };
    match permission_service::get_shared_with_me(entity, &auth.username) {
        Ok(list) => SharedWithMeResponse::Success(Json::from(list)),
        Err(SharedWithMeError::NotADirectory) => SharedWithMeResponse::NotADirectory(
            BasicMessage::new("The entity does not exist or is not a folder."),
        ),
        Err(SharedWithMeError::PermissionDenied) => SharedWithMeResponse::PermissionDenied(
            BasicMessage::new("You do not have permission to read this folder."),
        ),
        Err(SharedWithMeError::DbError) => SharedWithMeResponse::GenericError(BasicMessage::new(
            "Failed to pull shares from database. Check server logs for details",
        )),
    }
}

#[get("/general-access/<name>")]
pub fn get_general_access(name: &str, auth: HeaderAuth) -> GeneralAccessResponse {
    match auth.validate() {
        ValidateResult::Ok => { /* no op */ }
        ValidateResult::UnknownUser => {
            return GeneralAccessResponse::Unauthorized("Unknown user".to_string())
        }
        ValidateResult::Invalid => {
            return GeneralAccessResponse::Unauthorized("Bad Credentials".to_string())
        }
    };
    match permission_service::get_general_access(name) {
        Ok(access) => GeneralAccessResponse::Success(Json::from(access)),
        Err(_) => GeneralAccessResponse::GenericError(BasicMessage::new(
            "Failed to pull general access from database. Check server logs for details",
        )),
    }
}

#[get("/notifications")]
pub fn get_notifications(auth: HeaderAuth) -> GetNotificationsResponse {
    match auth.validate() {
        ValidateResult::Ok => { /* no op */ }
        ValidateResult::UnknownUser => {
            return GetNotificationsResponse::Unauthorized("Unknown user".to_string())
        }
        ValidateResult::Invalid => {
            return GetNotificationsResponse::Unauthorized("Bad Credentials".to_string())
        }
    };
    match permission_service::get_notifications(&auth.username) {
        Ok(notifications) => GetNotificationsResponse::Success(Json::from(notifications)),
        Err(_) => GetNotificationsResponse::GenericError(BasicMessage::new(
            "Failed to pull notifications from database. Check server logs for details",
        )),
    }
}
