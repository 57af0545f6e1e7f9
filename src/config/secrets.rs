use std::fs;
use std::path::Path;
use tracing::debug;

/// Reads a mounted secret such as `/run/secrets/anylist_password`.
///
/// Returns `None` when the file is missing, unreadable or blank. Surrounding
/// whitespace is trimmed.
pub fn read_secret(dir: &Path, name: &str) -> Option<String> {
    let path = dir.join(name);
    match fs::read_to_string(&path) {
        Ok(contents) => {
            let value = contents.trim();
            if value.is_empty() {
                None
            } else {
                debug!("Using secret from {}", path.display());
                Some(value.to_string())
            }
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn trims_secret_contents() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("anylist_email"), "  me@example.com\n").unwrap();
        assert_eq!(
            read_secret(dir.path(), "anylist_email").as_deref(),
            Some("me@example.com")
        );
    }

    #[test]
    fn missing_or_blank_secret_is_none() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("anylist_password"), "\n").unwrap();
        assert_eq!(read_secret(dir.path(), "anylist_password"), None);
        assert_eq!(read_secret(dir.path(), "anylist_email"), None);
    }
}
