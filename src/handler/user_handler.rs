use rocket::serde::json::Json;

use crate::model::error::user_errors::CreateUserError;
use crate::model::request::CreateUserRequest;
use crate::model::response::user_responses::CreateUserResponse;
use crate::model::response::BasicMessage;
use crate::service::user_service;

/// registers a new user. This is the only route that doesn't need credentials
#[post("/", data = "<request>")]
pub fn create_user(request: Json<CreateUserRequest>) -> CreateUserResponse {
    match user_service::create_user(&request.into_inner()) {
        Ok(user) => CreateUserResponse::Created(Json::from(user)),
        Err(CreateUserError::AlreadyExists) => CreateUserResponse::AlreadyExists(
            BasicMessage::new("A user with that name already exists."),
        ),
        Err(CreateUserError::InvalidUsername) => CreateUserResponse::InvalidUsername(
            BasicMessage::new(
                "User names may only contain letters, numbers, and the characters `_@.-`",
            ),
        ),
        Err(_) => CreateUserResponse::Failure(BasicMessage::new(
            "Failed to create user. Check server logs for details",
        )),
    }
}
