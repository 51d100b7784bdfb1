//! JSON settings file I/O shared by both merges.

use crate::error::PolicyError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Read a JSON document, falling back to `T::default()` when the file does not exist.
///
/// Any other read failure, and malformed JSON, is an error.
pub fn read_json_or_default<T>(path: &Path) -> Result<T, PolicyError>
where
    T: DeserializeOwned + Default,
{
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "Settings file missing, starting from empty");
            return Ok(T::default());
        }
        Err(source) => {
            return Err(PolicyError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&content).map_err(|source| PolicyError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `value` as 2-space pretty JSON with a trailing newline.
///
/// Parent directories are created as needed. An existing file is replaced
/// atomically: the content goes to a temporary file beside the resolved target
/// (symlinks are followed), which takes over the target's permissions before
/// being renamed into place.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), PolicyError> {
    let mut serialized =
        serde_json::to_string_pretty(value).map_err(|source| PolicyError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;
    serialized.push('\n');

    let target = match fs::canonicalize(path) {
        Ok(target) => target,
        Err(e) if e.kind() == ErrorKind::NotFound => return create_new(path, &serialized),
        Err(source) => {
            return Err(PolicyError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let permissions = fs::metadata(&target)
        .map_err(|source| PolicyError::Read {
            path: target.clone(),
            source,
        })?
        .permissions();
    let parent = target.parent().unwrap_or_else(|| Path::new("."));

    let write_err = |source: std::io::Error| PolicyError::Write {
        path: target.clone(),
        source,
    };
    let mut temp = NamedTempFile::new_in(parent).map_err(write_err)?;
    temp.write_all(serialized.as_bytes()).map_err(write_err)?;
    temp.as_file().set_permissions(permissions).map_err(write_err)?;
    temp.persist(&target).map_err(|e| write_err(e.error))?;

    debug!(path = %path.display(), target = %target.display(), "Replaced settings file");
    Ok(())
}

/// First write of a settings file; it gets the process's default mode.
///
/// A dangling symlink at `path` is written through, creating its target.
fn create_new(path: &Path, content: &str) -> Result<(), PolicyError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| PolicyError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, content).map_err(|source| PolicyError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), "Created settings file");
    Ok(())
}
