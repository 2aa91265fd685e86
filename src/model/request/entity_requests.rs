use rocket::fs::TempFile;
use rocket::serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct CreateFolderRequest {
    pub title: String,
    /// leave blank to create the folder in the caller's root directory
    pub parent: Option<String>,
}

#[derive(FromForm)]
pub struct FileUpload<'a> {
    /// the file being uploaded
    pub file: TempFile<'a>,
    /// leave blank to upload to the caller's root directory
    pub parent: Option<String>,
    /// defaults to the name of the uploaded file
    pub title: Option<String>,
}

#[derive(Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct MoveEntityRequest {
    /// leave blank to move the entity to the caller's root directory
    #[serde(rename = "newParent")]
    pub new_parent: Option<String>,
}

#[derive(Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct RenameEntityRequest {
    pub title: String,
}
