use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Name of the data directory, both local and under the home directory
pub const DIR_NAME: &str = ".tally";

/// File holding every storage key as one JSON object
pub const STORAGE_FILE: &str = "storage.json";

/// Log file written by env_logger
pub const LOG_FILE: &str = "tally.log";

/// Where tasks live: `--dir` if given, else the closest `.tally` above the
/// working directory, else `.tally` in the home directory
pub fn resolve_data_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }

    let cwd = env::current_dir().context("Could not determine current directory")?;
    if let Some(project_dir) = nearest_data_dir(&cwd) {
        return Ok(project_dir);
    }

    dirs::home_dir()
        .map(|home| home.join(DIR_NAME))
        .context("Could not determine home directory")
}

fn nearest_data_dir(from: &Path) -> Option<PathBuf> {
    from.ancestors()
        .map(|dir| dir.join(DIR_NAME))
        .find(|candidate| candidate.is_dir())
}

/// Resolve the data directory and create it if missing
pub fn prepare_data_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    let dir = resolve_data_dir(explicit)?;
    fs::create_dir_all(&dir)
        .with_context(|| format!("Cannot create data directory {}", dir.display()))?;
    Ok(dir)
}

/// `tally init`: make `./.tally` so this project gets its own task list
pub fn create_project_dir() -> Result<PathBuf> {
    let cwd = env::current_dir().context("Could not determine current directory")?;
    let dir = cwd.join(DIR_NAME);

    if dir.exists() {
        anyhow::bail!("{} already exists", dir.display());
    }
    fs::create_dir(&dir).with_context(|| format!("Cannot create {}", dir.display()))?;
    Ok(dir)
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> io::Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(dir)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.as_file().sync_all()?;
    temp_file.persist(path).map_err(|e| e.error)?;

    Ok(())
}

/// Read file content, `None` if the file doesn't exist
pub fn read_file<P: AsRef<Path>>(path: P) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}
