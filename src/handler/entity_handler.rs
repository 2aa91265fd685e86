use rocket::form::Form;
use rocket::fs::NamedFile;
use rocket::serde::json::Json;
use rocket::tokio::io::AsyncReadExt;

use crate::guard::HeaderAuth;
use crate::model::error::entity_errors::{
    CreateEntityError, DeleteEntityError, DownloadEntityError, GetEntityError, MoveEntityError,
    RenameEntityError, TrashEntityError,
};
use crate::model::guard::auth::ValidateResult;
use crate::model::request::entity_requests::{
    CreateFolderRequest, FileUpload, MoveEntityRequest, RenameEntityRequest,
};
use crate::model::response::entity_responses::{
    CreateEntityResponse, DownloadEntityResponse, GetEntityResponse, RemoveEntityResponse,
    UpdateEntityResponse,
};
use crate::model::response::BasicMessage;
use crate::service::entity_service;

fn create_error(e: CreateEntityError) -> CreateEntityResponse {
    match e {
        CreateEntityError::NotADirectory => CreateEntityResponse::NotADirectory(BasicMessage::new(
            "The parent does not exist or is not a folder.",
        )),
        CreateEntityError::PermissionDenied => CreateEntityResponse::PermissionDenied(
            BasicMessage::new("You do not have permission to write to the parent folder."),
        ),
        CreateEntityError::AlreadyExists => CreateEntityResponse::AlreadyExists(
            BasicMessage::new("An entity with that title already exists in the parent folder."),
        ),
        CreateEntityError::DbError => CreateEntityResponse::GenericError(BasicMessage::new(
            "Failed to save entity to the database. Check server logs for details",
        )),
        CreateEntityError::FileSystemError => CreateEntityResponse::GenericError(
            BasicMessage::new("Failed to write file to the disk. Check server logs for details"),
        ),
    }
}

#[post("/folders", data = "<request>")]
pub fn create_folder(request: Json<CreateFolderRequest>, auth: HeaderAuth) -> CreateEntityResponse {
    match auth.validate() {
        ValidateResult::Ok => { /* no op */ }
        ValidateResult::UnknownUser => {
            return CreateEntityResponse::Unauthorized("Unknown user".to_string())
        }
        ValidateResult::Invalid => {
            return CreateEntityResponse::Unauthorized("Bad Credentials".to_string())
        }
    };
    let title = request.title.trim();
    if title.is_empty() {
        return CreateEntityResponse::InvalidTitle(BasicMessage::new("Title cannot be blank."));
    }
    match entity_service::create_folder(title, request.parent.as_deref(), &auth.username) {
        Ok(folder) => CreateEntityResponse::Success(Json::from(folder)),
        Err(e) => create_error(e),
    }
}

/// accepts a file via multipart form and stores it off
#[post("/files", data = "<upload>")]
pub async fn upload_file(upload: Form<FileUpload<'_>>, auth: HeaderAuth) -> CreateEntityResponse {
    match auth.validate() {
        ValidateResult::Ok => { /* no op */ }
        ValidateResult::UnknownUser => {
            return CreateEntityResponse::Unauthorized("Unknown user".to_string())
        }
        ValidateResult::Invalid => {
            return CreateEntityResponse::Unauthorized("Bad Credentials".to_string())
        }
    };
    let upload = upload.into_inner();
    // titles are only ever displayed, so the raw file name is fine here
    let title = upload
        .title
        .clone()
        .or_else(|| {
            upload
                .file
                .raw_name()
                .map(|n| n.dangerous_unsafe_unsanitized_raw().as_str().to_string())
        })
        .unwrap_or_default();
    let title = title.trim();
    if title.is_empty() {
        return CreateEntityResponse::InvalidTitle(BasicMessage::new("Title cannot be blank."));
    }
    let mime_type = upload.file.content_type().map(|c| c.to_string());
    let mut contents = Vec::new();
    let read = match upload.file.open().await {
        Ok(reader) => Box::pin(reader).read_to_end(&mut contents).await,
        Err(e) => Err(e),
    };
    if let Err(e) = read {
        log::error!("Failed to read uploaded file {title}: {e:?}");
        return CreateEntityResponse::GenericError(BasicMessage::new(
            "Failed to read the uploaded file. Check server logs for details",
        ));
    }
    match entity_service::create_file(
        title,
        upload.parent.as_deref(),
        mime_type,
        &contents,
        &auth.username,
    ) {
        Ok(file) => CreateEntityResponse::Success(Json::from(file)),
        Err(e) => create_error(e),
    }
}

#[get("/<name>")]
pub fn get_entity(name: &str, auth: HeaderAuth) -> GetEntityResponse {
    match auth.validate() {
        ValidateResult::Ok => { /* no op */ }
        ValidateResult::UnknownUser => {
            return GetEntityResponse::Unauthorized("Unknown user".to_string())
        }
        ValidateResult::Invalid => {
            return GetEntityResponse::Unauthorized("Bad Credentials".to_string())
        }
    };
    match entity_service::get_entity(name, &auth.username) {
        Ok(entity) => GetEntityResponse::Success(Json::from(entity)),
        Err(GetEntityError::NotFound) => GetEntityResponse::NotFound(BasicMessage::new(
            "The entity with the passed name could not be found.",
        )),
        Err(GetEntityError::PermissionDenied) => GetEntityResponse::PermissionDenied(
            BasicMessage::new("You do not have permission to read this entity."),
        ),
        Err(GetEntityError::DbError) => GetEntityResponse::GenericError(BasicMessage::new(
            "Failed to pull entity info from database. Check server logs for details",
        )),
    }
}

#[get("/<name>/download")]
pub async fn download_file(name: &str, auth: HeaderAuth) -> DownloadEntityResponse {
    match auth.validate() {
        ValidateResult::Ok => { /* no op */ }
        ValidateResult::UnknownUser => {
            return DownloadEntityResponse::Unauthorized("Unknown user".to_string())
        }
        ValidateResult::Invalid => {
            return DownloadEntityResponse::Unauthorized("Bad Credentials".to_string())
        }
    };
    let path = match entity_service::get_file_path(name, &auth.username) {
        Ok((path, _)) => path,
        Err(DownloadEntityError::NotFound) => {
            return DownloadEntityResponse::NotFound(BasicMessage::new(
                "The file with the passed name could not be found.",
            ))
        }
        Err(DownloadEntityError::PermissionDenied) => {
            return DownloadEntityResponse::PermissionDenied(BasicMessage::new(
                "You do not have permission to read this file.",
            ))
        }
        Err(DownloadEntityError::IsADirectory) => {
            return DownloadEntityResponse::IsADirectory(BasicMessage::new(
                "Folders cannot be downloaded.",
            ))
        }
        Err(DownloadEntityError::DbError) => {
            return DownloadEntityResponse::GenericError(BasicMessage::new(
                "Failed to pull file info from database. Check server logs for details",
            ))
        }
    };
    match NamedFile::open(&path).await {
        Ok(file) => DownloadEntityResponse::Success(file),
        Err(e) => {
            log::error!("Failed to open {path:?} for download: {e:?}");
            DownloadEntityResponse::NotFound(BasicMessage::new(
                "The file could not be found on the disk.",
            ))
        }
    }
}

#[put("/<name>/move", data = "<request>")]
pub fn move_entity(
    name: &str,
    request: Json<MoveEntityRequest>,
    auth: HeaderAuth,
) -> UpdateEntityResponse {
    match auth.validate() {
        ValidateResult::Ok => { /* no op */ }
        ValidateResult::UnknownUser => {
            return UpdateEntityResponse::Unauthorized("Unknown user".to_string())
        }
        ValidateResult::Invalid => {
            return UpdateEntityResponse::Unauthorized("Bad Credentials".to_string())
        }
    };
    match entity_service::move_entity(name, request.new_parent.as_deref(), &auth.username) {
        Ok(entity) => UpdateEntityResponse::Success(Json::from(entity)),
        Err(MoveEntityError::NotFound) => UpdateEntityResponse::NotFound(BasicMessage::new(
            "The entity with the passed name could not be found.",
        )),
        Err(MoveEntityError::PermissionDenied) => UpdateEntityResponse::PermissionDenied(
            BasicMessage::new("You need write permission on both the entity and the target."),
        ),
        Err(MoveEntityError::NotADirectory) => UpdateEntityResponse::NotADirectory(
            BasicMessage::new("The target does not exist or is not a folder."),
        ),
        Err(MoveEntityError::NotAllowed) => UpdateEntityResponse::NotAllowed(BasicMessage::new(
            "An entity cannot be moved into itself or one of its descendants, and root directories cannot be moved.",
        )),
        Err(MoveEntityError::AlreadyExists) => UpdateEntityResponse::AlreadyExists(
            BasicMessage::new("An entity with that title already exists in the target folder."),
        ),
        Err(MoveEntityError::DbError) => UpdateEntityResponse::GenericError(BasicMessage::new(
            "Failed to move entity. Check server logs for details",
        )),
    }
}

#[put("/<name>/rename", data = "<request>")]
pub fn rename_entity(
    name: &str,
    request: Json<RenameEntityRequest>,
    auth: HeaderAuth,
) -> UpdateEntityResponse {
    match auth.validate() {
        ValidateResult::Ok => { /* no op */ }
        ValidateResult::UnknownUser => {
            return UpdateEntityResponse::Unauthorized("Unknown user".to_string())
        }
        ValidateResult::Invalid => {
            return UpdateEntityResponse::Unauthorized("Bad Credentials".to_string())
        }
    };
    let title = request.title.trim();
    if title.is_empty() {
        return UpdateEntityResponse::InvalidTitle(BasicMessage::new("Title cannot be blank."));
    }
    match entity_service::rename_entity(name, title, &auth.username) {
        Ok(entity) => UpdateEntityResponse::Success(Json::from(entity)),
        Err(RenameEntityError::NotFound) => UpdateEntityResponse::NotFound(BasicMessage::new(
            "The entity with the passed name could not be found.",
        )),
        Err(RenameEntityError::PermissionDenied) => UpdateEntityResponse::PermissionDenied(
            BasicMessage::new("You do not have permission to write to this entity."),
        ),
        Err(RenameEntityError::AlreadyExists) => UpdateEntityResponse::AlreadyExists(
            BasicMessage::new("An entity with that title already exists in the same folder."),
        ),
        Err(RenameEntityError::DbError) => UpdateEntityResponse::GenericError(BasicMessage::new(
            "Failed to rename entity. Check server logs for details",
        )),
    }
}

fn set_active(name: &str, active: bool, auth: HeaderAuth) -> RemoveEntityResponse {
    match auth.validate() {
        ValidateResult::Ok => { /* no op */ }
        ValidateResult::UnknownUser => {
            return RemoveEntityResponse::Unauthorized("Unknown user".to_string())
        }
        ValidateResult::Invalid => {
            return RemoveEntityResponse::Unauthorized("Bad Credentials".to_string())
        }
    };
    match entity_service::set_active(name, active, &auth.username) {
        Ok(()) => RemoveEntityResponse::Success(()),
        Err(TrashEntityError::NotFound) => RemoveEntityResponse::NotFound(BasicMessage::new(
            "The entity with the passed name could not be found.",
        )),
        Err(TrashEntityError::PermissionDenied) => RemoveEntityResponse::PermissionDenied(
            BasicMessage::new("You do not have permission to write to this entity."),
        ),
        Err(TrashEntityError::NotAllowed) => RemoveEntityResponse::NotAllowed(BasicMessage::new(
            "Root directories cannot be trashed.",
        )),
        Err(TrashEntityError::DbError) => RemoveEntityResponse::GenericError(BasicMessage::new(
            "Failed to update entity. Check server logs for details",
        )),
    }
}

#[put("/<name>/trash")]
pub fn trash_entity(name: &str, auth: HeaderAuth) -> RemoveEntityResponse {
    set_active(name, false, auth)
}

#[put("/<name>/restore")]
pub fn restore_entity(name: &str, auth: HeaderAuth) -> RemoveEntityResponse {
    set_active(name, true, auth)
}

#[delete("/<name>")]
pub fn delete_entity(name: &str, auth: HeaderAuth) -> RemoveEntityResponse {
    match auth.validate() {
        ValidateResult::Ok => { /* no op */ }
        ValidateResult::UnknownUser => {
            return RemoveEntityResponse::Unauthorized("Unknown user".to_string())
        }
        ValidateResult::Invalid => {
            return RemoveEntityResponse::Unauthorized("Bad Credentials".to_string())
        }
    };
    match entity_service::delete_entity(name, &auth.username) {
        Ok(_) => RemoveEntityResponse::Success(()),
        Err(DeleteEntityError::NotFound) => RemoveEntityResponse::NotFound(BasicMessage::new(
            "The entity with the passed name could not be found.",
        )),
        Err(DeleteEntityError::PermissionDenied) => RemoveEntityResponse::PermissionDenied(
            BasicMessage::new("Only the owner can delete an entity."),
        ),
        Err(DeleteEntityError::NotAllowed) => RemoveEntityResponse::NotAllowed(BasicMessage::new(
            "Root directories cannot be deleted.",
        )),
        Err(DeleteEntityError::DbError) => RemoveEntityResponse::GenericError(BasicMessage::new(
            "Failed to delete entity from database. Check server logs for details",
        )),
        Err(DeleteEntityError::FileSystemError) => RemoveEntityResponse::GenericError(
            BasicMessage::new(
                "The entity was deleted, but some files could not be removed from the disk. Check server logs for details",
            ),
        ),
    }
}
