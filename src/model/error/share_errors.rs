#[derive(PartialEq, Debug)]
pub enum ShareEntityError {
    /// the entity being shared does not exist
    NotFound,
    /// the caller does not have share permission on the entity
    PermissionDenied,
    /// the user being shared with does not exist
    UserNotFound,
    DbError,
}
