use rocket::serde::json::Json;

use crate::model::response::{BasicMessage, NoContent};

#[derive(Responder)]
pub enum ShareResponse {
    #[response(status = 204)]
    Success(NoContent),
    /// neither a user nor `everyone` was passed
    #[response(status = 400, content_type = "json")]
    MissingTarget(Json<BasicMessage>),
    #[response(status = 404, content_type = "json")]
    NotFound(Json<BasicMessage>),
    #[response(status = 404, content_type = "json")]
    UserNotFound(Json<BasicMessage>),
    #[response(status = 403, content_type = "json")]
    PermissionDenied(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    GenericError(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
}
