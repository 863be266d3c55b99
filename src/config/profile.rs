//! Loading of dotenv profiles (`.env`, `.env.<project>`).

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Default dotenv filename.
const DEFAULT_ENV_FILE: &str = ".env";

/// Where to read the dotenv layer from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvSource {
    /// `.env.<name>` in the working directory; must exist
    Profile(String),
    /// An explicit file; must exist
    File(PathBuf),
    /// `.env` in the working directory, if present
    Default,
}

/// Get path to the profile file for a project.
pub fn profile_path(dir: &Path, project: &str) -> PathBuf {
    dir.join(format!("{DEFAULT_ENV_FILE}.{project}"))
}

/// Parse a dotenv file without touching the process environment.
pub fn load_env_file(path: &Path) -> Result<Vec<(String, String)>> {
    let iter = dotenvy::from_path_iter(path)
        .map_err(|e| Error::EnvProfile(format!("failed to read {}: {e}", path.display())))?;

    iter.map(|item| {
        item.map_err(|e| Error::EnvProfile(format!("failed to parse {}: {e}", path.display())))
    })
    .collect()
}

/// Merge the dotenv layer with the process environment.
///
/// Process values win, matching dotenv semantics of never overriding
/// variables that are already set.
pub fn collect_vars<I>(dir: &Path, source: &EnvSource, process_env: I) -> Result<HashMap<String, String>>
where
    I: IntoIterator<Item = (String, String)>,
{
    let file_vars = match source {
        EnvSource::Profile(project) => load_env_file(&profile_path(dir, project))?,
        EnvSource::File(path) => load_env_file(&dir.join(path))?,
        EnvSource::Default => {
            let path = dir.join(DEFAULT_ENV_FILE);
            if path.is_file() {
                load_env_file(&path)?
            } else {
                Vec::new()
            }
        }
    };

    let mut vars: HashMap<String, String> = file_vars.into_iter().collect();
    vars.extend(process_env);
    Ok(vars)
}
