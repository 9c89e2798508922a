//! Implements ConfigStorePort using a JSON file.
//!
//! Holds sender identity and the recipient list. Rewritten wholesale on every save.

use crate::domain::{Configuration, DomainError};
use crate::ports::ConfigStorePort;
use serde::Deserialize;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::info;

/// On-disk shape. Every field optional so absence is reported as
/// `ConfigIncomplete` rather than a parse error.
#[derive(Debug, Deserialize)]
struct RawConfiguration {
    email_from: Option<String>,
    email_password: Option<String>,
    recipients: Option<Vec<String>>,
    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

impl RawConfiguration {
    fn validate(self) -> Result<Configuration, DomainError> {
        let mut missing = Vec::new();
        if self.email_from.is_none() {
            missing.push("email_from");
        }
        if self.email_password.is_none() {
            missing.push("email_password");
        }
        if self.recipients.is_none() {
            missing.push("recipients");
        }
        match (self.email_from, self.email_password, self.recipients) {
            (Some(from), Some(password), Some(recipients)) => {
                let mut config = Configuration::new(from, password, recipients);
                config.extra = self.extra;
                Ok(config)
            }
            _ => Err(DomainError::ConfigIncomplete(format!(
                "missing field(s): {}",
                missing.join(", ")
            ))),
        }
    }
}

/// JSON file-based configuration store.
pub struct JsonConfigStore {
    path: PathBuf,
}

impl JsonConfigStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Pretty JSON with a 4-space indent and a trailing newline.
    fn to_pretty_json(config: &Configuration) -> Result<Vec<u8>, serde_json::Error> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        config.serialize(&mut ser)?;
        buf.push(b'\n');
        Ok(buf)
    }
}

#[async_trait::async_trait]
impl ConfigStorePort for JsonConfigStore {
    async fn load(&self) -> Result<Configuration, DomainError> {
        let text = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(DomainError::ConfigMissing(self.path.display().to_string()));
            }
            Err(e) => {
                return Err(DomainError::ConfigMissing(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )));
            }
        };
        let raw: RawConfiguration = serde_json::from_str(&text).map_err(|e| {
            DomainError::ConfigMalformed(format!("{}: {}", self.path.display(), e))
        })?;
        raw.validate()
    }

    /// Write-replace: temp file, sync_all, then rename over the target so a
    /// crash mid-write leaves the previous configuration intact.
    async fn save(&self, config: &Configuration) -> Result<(), DomainError> {
        let json = Self::to_pretty_json(config)
            .map_err(|e| DomainError::ConfigWriteError(e.to_string()))?;

        let temp_path = self.path.with_extension("json.tmp");
        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| DomainError::ConfigWriteError(format!("create temp file: {}", e)))?;
        f.write_all(&json)
            .await
            .map_err(|e| DomainError::ConfigWriteError(format!("write temp file: {}", e)))?;
        f.sync_all()
            .await
            .map_err(|e| DomainError::ConfigWriteError(format!("sync temp file: {}", e)))?;
        drop(f);

        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| DomainError::ConfigWriteError(format!("rename failed: {}", e)))?;

        info!(path = %self.path.display(), recipients = config.recipients.len(), "configuration saved");
        Ok(())
    }
}
