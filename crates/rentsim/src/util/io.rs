//! I/O utility functions

use std::fs;
use std::io;
use std::path::Path;

/// Write content to a file atomically using write-then-rename pattern.
///
/// The content lands in a sibling `.tmp` file first and is renamed over the
/// target, so readers never see a half-written config or report.
///
/// # Example
/// ```ignore
/// atomic_write(Path::new("config.yaml"), &yaml_content)?;
/// ```
pub fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    let temp_path = temp_path(path);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    fs::write(&temp_path, content)?;

    // Atomic on POSIX systems
    fs::rename(&temp_path, path)?;

    Ok(())
}

fn temp_path(path: &Path) -> std::path::PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        atomic_write(&path, "key: value\n").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "key: value\n");

        // Temp file should not exist
        assert!(!dir.path().join("config.yaml.tmp").exists());
    }

    #[test]
    fn test_atomic_write_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.txt");

        atomic_write(&path, "first").unwrap();
        atomic_write(&path, "second").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "second");
    }

    #[test]
    fn test_atomic_write_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reports").join("2026").join("report.txt");

        atomic_write(&path, "content").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "content");
    }
}
