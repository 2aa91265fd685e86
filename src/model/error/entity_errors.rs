#[derive(PartialEq, Debug)]
pub enum CreateEntityError {
    /// the requested parent is missing or is not a folder
    NotADirectory,
    /// the caller cannot write to the requested parent folder
    PermissionDenied,
    /// an entity with the same title already exists in the parent folder
    AlreadyExists,
    DbError,
    /// the file could not be written to the disk
    FileSystemError,
}

#[derive(PartialEq, Debug)]
pub enum GetEntityError {
    NotFound,
    PermissionDenied,
    DbError,
}

#[derive(PartialEq, Debug)]
pub enum DownloadEntityError {
    NotFound,
    PermissionDenied,
    /// folders can't be downloaded
    IsADirectory,
    DbError,
}

#[derive(PartialEq, Debug)]
pub enum MoveEntityError {
    NotFound,
    /// the caller cannot write to the entity or to the target folder
    PermissionDenied,
    /// the target is missing or is not a folder
    NotADirectory,
    /// the target is the entity itself or one of its descendants
    NotAllowed,
    /// an entity with the same title already exists in the target folder
    AlreadyExists,
    DbError,
}

#[derive(PartialEq, Debug)]
pub enum RenameEntityError {
    NotFound,
    PermissionDenied,
    /// a sibling already has the new title
    AlreadyExists,
    DbError,
}

#[derive(PartialEq, Debug)]
pub enum DeleteEntityError {
    NotFound,
    /// only the owner may delete an entity
    PermissionDenied,
    /// user root directories can't be deleted
    NotAllowed,
    DbError,
    /// the database records were removed, but at least one file couldn't be removed from the disk
    FileSystemError,
}

#[derive(PartialEq, Debug)]
pub enum TrashEntityError {
    NotFound,
    PermissionDenied,
    /// user root directories can't be trashed
    NotAllowed,
    DbError,
}
