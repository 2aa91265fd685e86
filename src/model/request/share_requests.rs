use rocket::serde::{Deserialize, Serialize};

use crate::model::repository::ShareTarget;

#[derive(Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ShareRequest {
    /// ignored if `everyone` is set
    pub user: Option<String>,
    #[serde(default)]
    pub write: bool,
    #[serde(default)]
    pub share: bool,
    #[serde(default)]
    pub everyone: bool,
    /// whether the user being shared with should get a notification. Defaults to `true`
    pub notify: Option<bool>,
}

#[derive(Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct UnshareRequest {
    pub user: Option<String>,
    #[serde(default)]
    pub everyone: bool,
}

/// `None` if neither a user nor `everyone` was passed
fn target_of(user: &Option<String>, everyone: bool) -> Option<ShareTarget> {
    if everyone {
        Some(ShareTarget::Everyone)
    } else {
        user.clone().map(ShareTarget::User)
    }
}

impl ShareRequest {
    pub fn target(&self) -> Option<ShareTarget> {
        target_of(&self.user, self.everyone)
    }
}

impl UnshareRequest {
    pub fn target(&self) -> Option<ShareTarget> {
        target_of(&self.user, self.everyone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn everyone_wins_over_user() {
        let req = ShareRequest {
            user: Some("test".to_string()),
            write: false,
            share: false,
            everyone: true,
            notify: None,
        };
        assert_eq!(Some(ShareTarget::Everyone), req.target());
    }

    #[test]
    fn missing_target() {
        let req = UnshareRequest {
            user: None,
            everyone: false,
        };
        assert_eq!(None, req.target());
    }
}
