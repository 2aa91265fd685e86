#[derive(PartialEq, Debug)]
pub enum CreateUserError {
    /// a user with that name already exists
    AlreadyExists,
    /// the username is empty or contains characters that can't be used in a directory name
    InvalidUsername,
    DbError,
    /// the user's root directory could not be created on the disk
    FileSystemError,
}
