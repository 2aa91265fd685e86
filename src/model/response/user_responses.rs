use rocket::serde::json::Json;

use crate::model::response::{BasicMessage, UserApi};

#[derive(Responder)]
pub enum CreateUserResponse {
    #[response(status = 201)]
    Created(Json<UserApi>),
    #[response(status = 400, content_type = "json")]
    InvalidUsername(Json<BasicMessage>),
    #[response(status = 409, content_type = "json")]
    AlreadyExists(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    Failure(Json<BasicMessage>),
}
