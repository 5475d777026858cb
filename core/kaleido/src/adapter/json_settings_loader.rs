//! settings.json を読む SettingsLoader 実装

use crate::domain::Settings;
use crate::ports::outbound::SettingsLoader;
use common::error::Error;
use common::ports::outbound::FileSystem;
use std::path::PathBuf;
use std::sync::Arc;

pub struct JsonSettingsLoader {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl JsonSettingsLoader {
    pub fn new(fs: Arc<dyn FileSystem>, path: PathBuf) -> Self {
        Self { fs, path }
    }
}

impl SettingsLoader for JsonSettingsLoader {
    fn load(&self) -> Result<Settings, Error> {
        if !self.fs.exists(&self.path) {
            return Ok(Settings::default());
        }
        let json = self.fs.read_to_string(&self.path).map_err(|e| {
            Error::config(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        Settings::from_json(&json)
            .map_err(|e| Error::config(format!("{}: {}", self.path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::adapter::StdFileSystem;

    #[test]
    fn test_missing_file_is_default() {
        let tmp = tempfile::tempdir().unwrap();
        let loader = JsonSettingsLoader::new(Arc::new(StdFileSystem), tmp.path().join("settings.json"));
        assert_eq!(loader.load().unwrap(), Settings::default());
    }

    #[test]
    fn test_reads_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("settings.json");
        std::fs::write(&path, r#"{"provider": "echo", "style": "code-examples"}"#).unwrap();
        let settings = JsonSettingsLoader::new(Arc::new(StdFileSystem), path).load().unwrap();
        assert_eq!(settings.provider.as_deref(), Some("echo"));
        assert_eq!(settings.style.as_deref(), Some("code-examples"));
    }

    #[test]
    fn test_invalid_file_names_path() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("settings.json");
        std::fs::write(&path, "[1, 2").unwrap();
        let err = JsonSettingsLoader::new(Arc::new(StdFileSystem), path).load().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("settings.json"));
    }
}
