#[derive(PartialEq, Debug)]
pub enum SharedWithListError {
    NotFound,
    /// the caller needs write permission to see who an entity is shared with
    PermissionDenied,
    DbError,
}

#[derive(PartialEq, Debug)]
pub enum SharedWithMeError {
    /// the requested entity is missing or is not a folder
    NotADirectory,
    /// the caller cannot read the requested folder
    PermissionDenied,
    DbError,
}

#[derive(PartialEq, Debug)]
pub enum GeneralAccessError {
    DbError,
}

#[derive(PartialEq, Debug)]
pub enum GetNotificationsError {
    DbError,
}
