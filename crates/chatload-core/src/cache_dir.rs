use std::path::PathBuf;

use crate::error::{Error, Result};

/// Resolve the on-disk directory used to cache normalized datasets, based on
/// priority:
/// 1. Explicit path
/// 2. `CHATLOAD_CACHE_DIR` environment variable
/// 3. System cache directory (`<cache_dir>/chatload`)
/// 4. `~/.cache/chatload` (fallback for systems without a standard cache dir)
pub fn resolve_cache_dir(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("CHATLOAD_CACHE_DIR") {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(cache_dir) = dirs::cache_dir() {
        return Ok(cache_dir.join("chatload"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".cache").join("chatload"));
    }

    Err(Error::Config(
        "could not determine cache directory: no HOME or system cache directory found"
            .to_string(),
    ))
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}
