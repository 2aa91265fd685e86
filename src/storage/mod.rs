use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};

#[cfg(not(test))]
pub fn file_dir() -> String {
    crate::config::DRIVE_CONFIG.files.directory.clone()
}

#[cfg(test)]
pub fn file_dir() -> String {
    let thread_name = crate::test::current_thread_name();
    format!("./{thread_name}_files")
}

/// checks if the files directory exists. If not, it creates it.
///
/// panics:
/// panics if the files directory could not be created
pub fn ensure_file_dir() {
    let dir = file_dir();
    let path = Path::new(&dir);
    if !path.exists() {
        fs::create_dir_all(path).expect("Failed to create files directory!");
    }
}

/// the directory a user's uploads are stored in
pub fn user_dir(user: &str) -> PathBuf {
    Path::new(&file_dir()).join(user)
}

/// where the contents of the file entity `name`, uploaded by `owner`, are stored.
/// Files are stored by entity name, so moving or renaming never touches the disk
pub fn entity_path(owner: &str, name: &str) -> PathBuf {
    user_dir(owner).join(name)
}

/// removes a file, or a directory and everything in it. A path that is already gone is not an error
pub fn remove_physical(path: &Path) -> io::Result<()> {
    let res = if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    match res {
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Tried to remove {path:?}, but it was already gone");
            Ok(())
        }
        other => other,
    }
}

/// A file or directory written to the disk by a transaction that hasn't committed yet.
///
/// The database can roll back but the disk can't, so dropping a `StagedPath` without calling
/// [`StagedPath::keep`] removes whatever it created.
#[derive(Debug)]
pub struct StagedPath {
    path: PathBuf,
    kept: bool,
}

impl StagedPath {
    /// writes `contents` to a new file at `path`, creating parent directories as needed.
    /// Fails if something already exists at `path`
    pub fn write_file(path: PathBuf, contents: &[u8]) -> io::Result<StagedPath> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)?;
        let staged = StagedPath { path, kept: false };
        // from here on, a failed write still cleans up the half-written file
        file.write_all(contents)?;
        file.sync_all()?;
        Ok(staged)
    }

    /// creates a new, empty directory at `path`. Fails if something already exists at `path`
    pub fn create_dir(path: PathBuf) -> io::Result<StagedPath> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::create_dir(&path)?;
        Ok(StagedPath { path, kept: false })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// the transaction committed, so the path stays on the disk
    pub fn keep(mut self) {
        self.kept = true;
    }
}

impl Drop for StagedPath {
    fn drop(&mut self) {
        if self.kept {
            return;
        }
        log::warn!(
            "Removing {:?} because the transaction that created it did not commit",
            self.path
        );
        if let Err(e) = remove_physical(&self.path) {
            log::error!("Failed to remove {:?} from the disk: {e:?}", self.path);
        }
    }
}
