use rocket::fs::NamedFile;
use rocket::serde::json::Json;

use crate::model::response::{BasicMessage, EntityApi, NoContent};

#[derive(Responder)]
pub enum CreateEntityResponse {
    #[response(status = 201)]
    Success(Json<EntityApi>),
    /// the title is blank
    #[response(status = 400, content_type = "json")]
    InvalidTitle(Json<BasicMessage>),
    #[response(status = 400, content_type = "json")]
    NotADirectory(Json<BasicMessage>),
    #[response(status = 403, content_type = "json")]
    PermissionDenied(Json<BasicMessage>),
    #[response(status = 409, content_type = "json")]
    AlreadyExists(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    GenericError(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
}

#[derive(Responder)]
pub enum GetEntityResponse {
    #[response(status = 200)]
    Success(Json<EntityApi>),
    #[response(status = 404, content_type = "json")]
    NotFound(Json<BasicMessage>),
    #[response(status = 403, content_type = "json")]
    PermissionDenied(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    GenericError(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
}

#[derive(Responder)]
pub enum DownloadEntityResponse {
    #[response(status = 200)]
    Success(NamedFile),
    #[response(status = 404, content_type = "json")]
    NotFound(Json<BasicMessage>),
    #[response(status = 403, content_type = "json")]
    PermissionDenied(Json<BasicMessage>),
    #[response(status = 400, content_type = "json")]
    IsADirectory(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    GenericError(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
}

/// used for both move and rename
#[derive(Responder)]
pub enum UpdateEntityResponse {
    #[response(status = 200)]
    Success(Json<EntityApi>),
    #[response(status = 400, content_type = "json")]
    InvalidTitle(Json<BasicMessage>),
    #[response(status = 404, content_type = "json")]
    NotFound(Json<BasicMessage>),
    #[response(status = 403, content_type = "json")]
    PermissionDenied(Json<BasicMessage>),
    #[response(status = 400, content_type = "json")]
    NotADirectory(Json<BasicMessage>),
    #[response(status = 400, content_type = "json")]
    NotAllowed(Json<BasicMessage>),
    #[response(status = 409, content_type = "json")]
    AlreadyExists(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    GenericError(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
}

/// used for delete, trash, and restore
#[derive(Responder)]
pub enum RemoveEntityResponse {
    #[response(status = 204)]
    Success(NoContent),
    #[response(status = 404, content_type = "json")]
    NotFound(Json<BasicMessage>),
    #[response(status = 403, content_type = "json")]
    PermissionDenied(Json<BasicMessage>),
    #[response(status = 400, content_type = "json")]
    NotAllowed(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    GenericError(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
}
