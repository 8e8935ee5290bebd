//! File-backed token store for the CLI.
//!
//! The token issued by `bnb login` is written to a single file so later
//! commands can reuse it. The file holds nothing but the token.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use bitnbolt_admin::services::{TokenStore, TokenStoreError};
use secrecy::{ExposeSecret, SecretString};

/// Default location when `BNB_TOKEN_FILE` is not set: `$HOME/.config/bnb/token`.
#[must_use]
pub fn default_token_path() -> PathBuf {
    std::env::var_os("HOME").map_or_else(
        || PathBuf::from(".bnb_token"),
        |home| PathBuf::from(home).join(".config").join("bnb").join("token"),
    )
}

/// Token kept in a file on disk.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn store_error(path: &Path, e: &std::io::Error) -> TokenStoreError {
    TokenStoreError(format!("{}: {e}", path.display()))
}

#[cfg(unix)]
async fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<SecretString>, TokenStoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| SecretString::from(token.to_owned())))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(store_error(&self.path, &e)),
        }
    }

    async fn save(&self, token: SecretString) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| store_error(parent, &e))?;
        }
        tokio::fs::write(&self.path, token.expose_secret())
            .await
            .map_err(|e| store_error(&self.path, &e))?;
        restrict_permissions(&self.path)
            .await
            .map_err(|e| store_error(&self.path, &e))
    }

    async fn clear(&self) -> Result<(), TokenStoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(store_error(&self.path, &e)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("bnb-test-{}-{name}", std::process::id()))
            .join("token")
    }

    #[tokio::test]
    async fn test_missing_file_means_signed_out() {
        let store = FileTokenStore::new(scratch_path("missing"));
        assert!(store.load().await.unwrap().is_none());
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_save_load_clear() {
        let path = scratch_path("round-trip");
        let store = FileTokenStore::new(&path);

        store.save(SecretString::from("tok-123")).await.unwrap();
        let token = store.load().await.unwrap().unwrap();
        assert_eq!(token.expose_secret(), "tok-123");

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
        assert!(!path.exists());

        if let Some(parent) = path.parent() {
            let _ = std::fs::remove_dir(parent);
        }
    }

    #[tokio::test]
    async fn test_blank_file_is_no_token() {
        let path = scratch_path("blank");
        let store = FileTokenStore::new(&path);
        store.save(SecretString::from("  \n")).await.unwrap();
        assert!(store.load().await.unwrap().is_none());
        store.clear().await.unwrap();
    }
}
