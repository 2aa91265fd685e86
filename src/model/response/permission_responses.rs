use rocket::serde::json::Json;

use crate::model::response::{
    BasicMessage, GeneralAccessApi, NotificationApi, SharedEntityApi, SharedWithApi,
};

#[derive(Responder)]
pub enum SharedWithListResponse {
    #[response(status = 200)]
    Success(Json<Vec<SharedWithApi>>),
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
pub enum SharedWithMeResponse {
    #[response(status = 200)]
    Success(Json<Vec<SharedEntityApi>>),
    #[response(status = 400, content_type = "json")]
    NotADirectory(Json<BasicMessage>),
    #[response(status = 403, content_type = "json")]
    PermissionDenied(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    GenericError(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
}

#[derive(Responder)]
pub enum GeneralAccessResponse {
    /// `null` if the entity has no everyone grant
    #[response(status = 200)]
    Success(Json<Option<GeneralAccessApi>>),
    #[response(status = 500, content_type = "json")]
    GenericError(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
}

#[derive(Responder)]
pub enum GetNotificationsResponse {
    #[response(status = 200)]
    Success(Json<Vec<NotificationApi>>),
    #[response(status = 500, content_type = "json")]
    GenericError(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
}
