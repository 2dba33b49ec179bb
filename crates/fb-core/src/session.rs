//! File-backed credential record.
//!
//! One record per user at `~/.fubon-cli-session.json`:
//!
//! ```json
//! { "personal_id": "A123456789", "password": "..", "cert_path": "/path/cert.pfx", "cert_password": "" }
//! ```
//!
//! Every call goes to disk; concurrent writers are last-writer-wins. On Unix
//! the file is created and kept at mode `0600`.

use std::fmt;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FbError, FbResult};
use crate::logging::mask_identity;

pub const SESSION_FILE_NAME: &str = ".fubon-cli-session.json";

/// The four values needed to log in.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub personal_id: String,
    pub password: String,
    pub cert_path: String,
    /// Empty when the certificate has no password.
    pub cert_password: String,
}

impl Credentials {
    pub fn new(
        personal_id: impl Into<String>,
        password: impl Into<String>,
        cert_path: impl Into<String>,
        cert_password: Option<String>,
    ) -> Self {
        Self {
            personal_id: personal_id.into(),
            password: password.into(),
            cert_path: cert_path.into(),
            cert_password: cert_password.unwrap_or_default(),
        }
    }

    /// The certificate password, `None` when empty.
    pub fn cert_password(&self) -> Option<&str> {
        if self.cert_password.is_empty() { None } else { Some(&self.cert_password) }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("personal_id", &mask_identity(&self.personal_id))
            .field("password", &"***")
            .field("cert_path", &self.cert_path)
            .field("cert_password", &"***")
            .finish()
    }
}

/// Resolve `name` inside the user's home directory.
pub fn home_file(name: &str) -> FbResult<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(name))
        .ok_or_else(|| FbError::Config("cannot determine home directory".to_string()))
}

/// Reads and writes the single credential record.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `~/.fubon-cli-session.json`.
    pub fn default_location() -> FbResult<Self> {
        Ok(Self::new(home_file(SESSION_FILE_NAME)?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the record.
    pub fn save(&self, credentials: &Credentials) -> FbResult<()> {
        let body = serde_json::to_vec(credentials)?;
        write_private(&self.path, &body)?;
        debug!(
            "session saved for {} at {}",
            mask_identity(&credentials.personal_id),
            self.path.display()
        );
        Ok(())
    }

    /// Read the record; `Ok(None)` when no file exists.
    pub fn load(&self) -> FbResult<Option<Credentials>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let credentials = serde_json::from_str(&content).map_err(|e| {
            FbError::Config(format!(
                "session file {} is unreadable ({e}); run fubon login again",
                self.path.display()
            ))
        })?;
        Ok(Some(credentials))
    }

    /// Delete the record. Deleting an absent record succeeds.
    pub fn clear(&self) -> FbResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("session cleared at {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Write `body` to `path`, truncating, readable by the owner only.
pub(crate) fn write_private(path: &Path, body: &[u8]) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(body)?;
    file.flush()?;

    // `mode` only applies on creation; tighten files that already existed.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Credentials {
        Credentials::new("A123456789", "pw", "/certs/a.pfx", Some("cpw".into()))
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join(SESSION_FILE_NAME));
        store.save(&sample()).unwrap();
        assert_eq!(store.load().unwrap(), Some(sample()));
    }

    #[test]
    fn missing_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("none.json"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join(SESSION_FILE_NAME));
        store.save(&sample()).unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        store.clear().unwrap();
    }

    #[test]
    fn resave_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join(SESSION_FILE_NAME));
        store.save(&sample()).unwrap();
        let other = Credentials::new("B987654321", "pw2", "/certs/b.pfx", None);
        store.save(&other).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, other);
        assert_eq!(loaded.cert_password, "");
        assert_eq!(loaded.cert_password(), None);
    }

    #[test]
    fn stored_as_four_field_json() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join(SESSION_FILE_NAME));
        store.save(&Credentials::new("A1", "p", "/c", None)).unwrap();
        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(
            raw,
            serde_json::json!({"personal_id": "A1", "password": "p", "cert_path": "/c", "cert_password": ""})
        );
    }

    #[test]
    fn corrupt_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join(SESSION_FILE_NAME));
        fs::write(store.path(), "{not json").unwrap();
        assert!(matches!(store.load(), Err(FbError::Config(_))));
    }

    #[cfg(unix)]
    #[test]
    fn file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SESSION_FILE_NAME);
        fs::write(&path, "{}").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        SessionStore::new(&path).save(&sample()).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }

    #[test]
    fn debug_hides_secrets() {
        let text = format!("{:?}", sample());
        assert!(!text.contains("cpw"));
        assert!(text.contains("A12***"));
    }
}
