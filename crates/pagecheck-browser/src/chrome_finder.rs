use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Binary names probed on PATH, in preference order
const PATH_CANDIDATES: &[&str] = &[
    "google-chrome",
    "google-chrome-stable",
    "chromium",
    "chromium-browser",
];

/// Locate a Chrome/Chromium binary.
///
/// An explicit path is authoritative: if it is missing or not executable the
/// whole lookup fails rather than silently falling back to a different
/// browser than the one the user asked for. Without one, PATH is probed
/// first, then the platform's conventional install locations.
pub fn find_chrome(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return require_executable(path);
    }

    for name in PATH_CANDIDATES {
        if let Ok(path) = which::which(name) {
            tracing::debug!("Found {} on PATH: {}", name, path.display());
            return Ok(path);
        }
    }

    for path in install_locations() {
        if require_executable(&path).is_ok() {
            return Ok(path);
        }
    }

    Err(Error::Browser(
        "No Chrome or Chromium binary found on PATH or in standard install \
         locations. Use --chrome-path to point at one."
            .to_string(),
    ))
}

fn install_locations() -> Vec<PathBuf> {
    #[cfg(target_os = "linux")]
    return vec![
        PathBuf::from("/usr/bin/google-chrome"),
        PathBuf::from("/usr/bin/chromium"),
        PathBuf::from("/usr/bin/chromium-browser"),
        PathBuf::from("/snap/bin/chromium"),
    ];

    #[cfg(target_os = "macos")]
    return vec![
        PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome"),
        PathBuf::from("/Applications/Chromium.app/Contents/MacOS/Chromium"),
    ];

    #[cfg(target_os = "windows")]
    return vec![
        PathBuf::from(r"C:\Program Files\Google\Chrome\Application\chrome.exe"),
        PathBuf::from(r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe"),
    ];

    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    return vec![];
}

fn require_executable(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Err(Error::Browser(format!(
            "Chrome not found at: {}",
            path.display()
        )));
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let metadata = std::fs::metadata(path).map_err(Error::Io)?;
        if metadata.permissions().mode() & 0o111 == 0 {
            return Err(Error::Browser(format!(
                "Chrome binary not executable: {}",
                path.display()
            )));
        }
    }

    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_is_used() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let path = temp.path();

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
        }

        assert_eq!(find_chrome(Some(path)).unwrap(), path);
    }

    #[test]
    fn test_missing_explicit_path_fails_without_fallback() {
        let result = find_chrome(Some(Path::new("/nonexistent/chrome")));
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_executable_explicit_path_fails() {
        use std::os::unix::fs::PermissionsExt;
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::set_permissions(temp.path(), std::fs::Permissions::from_mode(0o644)).unwrap();

        let result = find_chrome(Some(temp.path()));
        assert!(result.unwrap_err().to_string().contains("not executable"));
    }
}
