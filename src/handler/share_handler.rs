use rocket::serde::json::Json;

use crate::guard::HeaderAuth;
use crate::model::error::share_errors::ShareEntityError;
use crate::model::guard::auth::ValidateResult;
use crate::model::request::share_requests::{ShareRequest, UnshareRequest};
use crate::model::response::share_responses::ShareResponse;
use crate::model::response::BasicMessage;
use crate::service::share_service;

fn share_error(e: ShareEntityError) -> ShareResponse {
    match e {
        ShareEntityError::NotFound => ShareResponse::NotFound(BasicMessage::new(
            "The entity with the passed name could not be found.",
        )),
        ShareEntityError::UserNotFound => {
            ShareResponse::UserNotFound(BasicMessage::new("No user with that name exists."))
        }
        ShareEntityError::PermissionDenied => ShareResponse::PermissionDenied(BasicMessage::new(
            "You do not have permission to share this entity.",
        )),
        ShareEntityError::DbError => ShareResponse::GenericError(BasicMessage::new(
            "Failed to update shares in the database. Check server logs for details",
        )),
    }
}

#[post("/<name>/shares", data = "<request>")]
pub fn share_entity(name: &str, request: Json<ShareRequest>, auth: HeaderAuth) -> ShareResponse {
    match auth.validate() {
        ValidateResult::Ok => { /* no op */ }
        ValidateResult::UnknownUser => return ShareResponse::Unauthorized("Unknown user".to_string()),
        ValidateResult::Invalid => return ShareResponse::Unauthorized("Bad Credentials".to_string()),
    };
    let Some(target) = request.target() else {
        return ShareResponse::MissingTarget(BasicMessage::new(
            "Either a user or everyone must be passed.",
        ));
    };
    match share_service::share(
        name,
        &target,
        request.write,
        request.share,
        request.notify.unwrap_or(true),
        &auth.username,
    ) {
        Ok(()) => ShareResponse::Success(()),
        Err(e) => share_error(e),
    }
}

#[delete("/<name>/shares", data = "<request>")]
pub fn unshare_entity(
    name: &str,
    request: Json<UnshareRequest>,
    auth: HeaderAuth,
) -> ShareResponse {
    match auth.validate() {
        ValidateResult::Ok => { /* no op */ }
        ValidateResult::UnknownUser => return ShareResponse::Unauthorized("Unknown user".to_string()),
        ValidateResult::Invalid => return ShareResponse::Unauthorized("Bad Credentials".to_string()),
    };
    let Some(target) = request.target() else {
        return ShareResponse::MissingTarget(BasicMessage::new(
            "Either a user or everyone must be passed.",
        ));
    };
    match share_service::unshare(name, &target, &auth.username) {
        Ok(()) => ShareResponse::Success(()),
        Err(e) => share_error(e),
    }
}
