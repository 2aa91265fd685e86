use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rocket::async_trait;
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::Request;

use crate::model::guard::auth::ValidateResult;
use crate::model::service::auth::CheckAuthResult;
use crate::service::user_service::check_auth;

/// basic auth credentials pulled from the `Authorization` header
#[derive(Debug)]
pub struct HeaderAuth {
    pub username: String,
    pub password: String,
}

impl HeaderAuth {
    /// creates a `HeaderAuth` object from the passed header value.
    /// The value of header must be base64-encoded basic auth.
    pub fn from(header: &str) -> Result<HeaderAuth, &str> {
        // remove the "Basic " from the header, leaving only the base64 part
        let stripped_header = header.trim_start_matches("Basic ");
        let decoded = match STANDARD.decode(stripped_header) {
            Ok(value) => value,
            Err(_) => return Err("Invalid basic auth format: not base64"),
        };
        let combined = match String::from_utf8(decoded) {
            Ok(combined) => combined,
            Err(_) => return Err("Invalid basic auth format: not utf-8"),
        };
        // passwords may contain a colon, user names can't
        match combined.split_once(':') {
            Some((username, password))
                if !username.trim().is_empty() && !password.trim().is_empty() =>
            {
                Ok(HeaderAuth {
                    username: username.trim().to_string(),
                    password: password.trim().to_string(),
                })
            }
            _ => Err("Invalid basic auth format: missing username or password"),
        }
    }

    /// compares our value with that in the database.
    ///
    /// _this is a convenience method to be used only in handlers_
    pub fn validate(&self) -> ValidateResult {
        match check_auth(&self.username, &self.password) {
            CheckAuthResult::Valid => ValidateResult::Ok,
            CheckAuthResult::Missing => ValidateResult::UnknownUser,
            CheckAuthResult::Invalid | CheckAuthResult::DbError => ValidateResult::Invalid,
        }
    }
}

#[async_trait]
impl<'a> FromRequest<'a> for HeaderAuth {
    type Error = AuthError;

    async fn from_request(request: &'a Request<'_>) -> Outcome<Self, Self::Error> {
        match request.headers().get_one("Authorization") {
            None => Outcome::Error((Status::Unauthorized, AuthError::Missing)),
            Some(value) if value.starts_with("Basic") => match HeaderAuth::from(value) {
                Ok(auth) => Outcome::Success(auth),
                Err(_) => Outcome::Error((Status::Unauthorized, AuthError::Invalid)),
            },
            Some(_) => Outcome::Error((Status::BadRequest, AuthError::Invalid)),
        }
    }
}

#[derive(Debug)]
pub enum AuthError {
    Missing,
    Invalid,
}
