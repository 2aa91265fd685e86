pub mod entity_requests;
pub mod share_requests;

use rocket::serde::{Deserialize, Serialize};

/// Because `HeaderAuth` is used as a request guard, we can't use it for registering users.
/// This allows us to accept credentials in a post body.
#[derive(Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    #[serde(rename = "userImage")]
    pub user_image: Option<String>,
}
