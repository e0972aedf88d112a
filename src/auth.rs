//! Persistent storage for the JWT used against the GraphQL endpoint.

use anyhow::{Context, Result, anyhow, bail};
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// `<config_dir>/xpdash/token`.
    pub fn default_location() -> Result<Self> {
        let dir = dirs::config_dir().ok_or_else(|| anyhow!("no config directory on this platform"))?;
        Ok(Self::at(dir.join("xpdash").join("token")))
    }

    pub fn at<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored token, or `None` when nothing was saved.
    pub fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(s) => {
                let token = s.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("read {}", self.path.display())),
        }
    }

    pub fn save(&self, token: &str) -> Result<()> {
        let token = token.trim();
        if !looks_like_jwt(token) {
            bail!("token is not a JWT (expected three dot-separated segments)");
        }
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        }
        fs::write(&self.path, token).with_context(|| format!("write {}", self.path.display()))?;
        debug!("token saved to {}", self.path.display());
        Ok(())
    }

    /// Remove the stored token; a missing file is fine.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("token removed from {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("remove {}", self.path.display())),
        }
    }
}

fn looks_like_jwt(token: &str) -> bool {
    let parts: Vec<&str> = token.split('.').collect();
    parts.len() == 3 && parts.iter().all(|p| !p.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_load_clear() {
        let dir = tempdir().unwrap();
        let store = TokenStore::at(dir.path().join("nested").join("token"));
        assert_eq!(store.load().unwrap(), None);

        store.save("aaa.bbb.ccc\n").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("aaa.bbb.ccc"));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        store.clear().unwrap();
    }

    #[test]
    fn rejects_non_jwt() {
        let dir = tempdir().unwrap();
        let store = TokenStore::at(dir.path().join("token"));
        assert!(store.save("not-a-token").is_err());
        assert!(store.save("a..c").is_err());
    }
}
