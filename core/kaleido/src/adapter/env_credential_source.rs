//! 環境変数と `.env` から API キーを探す CredentialSource 実装
//!
//! 探索順: 環境変数（名前の並び順）→ カレントディレクトリの `.env`（同じ名前の並び順）。
//! `.env` がファイルでない、または読めないときはキー無しとして扱う。

use crate::ports::outbound::CredentialSource;
use common::domain::ApiKey;
use common::error::Error;
use common::ports::outbound::{EnvResolver, FileSystem, Log, LogLevel, LogRecord};
use std::sync::Arc;

const DOTENV_FILE: &str = ".env";

pub struct EnvCredentialSource {
    env: Arc<dyn EnvResolver>,
    fs: Arc<dyn FileSystem>,
    var_names: Vec<String>,
    log: Arc<dyn Log>,
}

impl EnvCredentialSource {
    pub fn new(
        env: Arc<dyn EnvResolver>,
        fs: Arc<dyn FileSystem>,
        var_names: Vec<String>,
        log: Arc<dyn Log>,
    ) -> Self {
        Self {
            env,
            fs,
            var_names,
            log,
        }
    }

    fn skip_dotenv(&self, path: &std::path::Path, reason: String) {
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Warn, "adapter", "config", "dotenv skipped")
                .with_field("path", path.display().to_string())
                .with_field("reason", reason),
        );
    }
}

impl CredentialSource for EnvCredentialSource {
    fn load(&self) -> Result<Option<ApiKey>, Error> {
        for name in &self.var_names {
            if let Some(value) = self.env.var(name) {
                return Ok(Some(ApiKey::new(value)));
            }
        }

        let path = self.env.current_dir()?.join(DOTENV_FILE);
        match self.fs.metadata(&path) {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => {
                // `python -m venv .env` などのディレクトリ
                self.skip_dotenv(&path, "not a file".to_string());
                return Ok(None);
            }
            Err(_) => return Ok(None),
        }
        let contents = match self.fs.read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                self.skip_dotenv(&path, e.to_string());
                return Ok(None);
            }
        };
        let entries = parse_dotenv(&contents);
        Ok(self.var_names.iter().find_map(|name| {
            entries
                .iter()
                .find(|(k, v)| k == name && !v.is_empty())
                .map(|(_, v)| ApiKey::new(v.clone()))
        }))
    }
}

/// `KEY=VALUE` 行を読む。空行・`#` コメント・`export ` 接頭辞・前後の引用符を扱う。
pub fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    contents
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            let line = line.strip_prefix("export ").unwrap_or(line);
            let (key, value) = line.split_once('=')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            Some((key.to_string(), unquote(value.trim()).to_string()))
        })
        .collect()
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    // 引用符なしの値は行末コメントを落とす
    match value.find(" #") {
        Some(i) => value[..i].trim_end(),
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::adapter::StdFileSystem;
    use common::domain::Dirs;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    #[derive(Default)]
    struct CapturingLog(Mutex<Vec<String>>);

    impl Log for CapturingLog {
        fn log(&self, record: &LogRecord) -> Result<(), Error> {
            self.0.lock().unwrap().push(record.message.clone());
            Ok(())
        }
    }

    struct FakeEnv {
        vars: HashMap<String, String>,
        cwd: PathBuf,
    }

    impl EnvResolver for FakeEnv {
        fn var(&self, name: &str) -> Option<String> {
            self.vars.get(name).cloned()
        }

        fn resolve_dirs(&self) -> Result<Dirs, Error> {
            Ok(Dirs {
                config_dir: self.cwd.join("config"),
                state_dir: self.cwd.join("state"),
            })
        }

        fn current_dir(&self) -> Result<PathBuf, Error> {
            Ok(self.cwd.clone())
        }
    }

    fn source(vars: &[(&str, &str)], cwd: &Path) -> EnvCredentialSource {
        source_with_log(vars, cwd, Arc::new(CapturingLog::default()))
    }

    fn source_with_log(
        vars: &[(&str, &str)],
        cwd: &Path,
        log: Arc<dyn Log>,
    ) -> EnvCredentialSource {
        let env = FakeEnv {
            vars: vars
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            cwd: cwd.to_path_buf(),
        };
        EnvCredentialSource::new(
            Arc::new(env),
            Arc::new(StdFileSystem),
            vec!["GOOGLE_API_KEY".to_string(), "GEMINI_API_KEY".to_string()],
            log,
        )
    }

    #[test]
    fn test_parse_dotenv() {
        let entries = parse_dotenv(
            "# secrets\n\nexport GOOGLE_API_KEY=\"abc 123\"\nOTHER='x'\nPLAIN=value # note\nbroken line\n=novalue\n",
        );
        assert_eq!(
            entries,
            vec![
                ("GOOGLE_API_KEY".to_string(), "abc 123".to_string()),
                ("OTHER".to_string(), "x".to_string()),
                ("PLAIN".to_string(), "value".to_string()),
            ]
        );
    }

    #[test]
    fn test_environment_wins_in_name_order() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(".env"), "GOOGLE_API_KEY=from-file\n").unwrap();
        let src = source(
            &[("GEMINI_API_KEY", "gemini"), ("GOOGLE_API_KEY", "google")],
            tmp.path(),
        );
        assert_eq!(src.load().unwrap().unwrap().expose(), "google");
    }

    #[test]
    fn test_dotenv_fallback() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(".env"), "GEMINI_API_KEY=from-file\n").unwrap();
        let src = source(&[], tmp.path());
        assert_eq!(src.load().unwrap().unwrap().expose(), "from-file");
    }

    #[test]
    fn test_missing_everywhere_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(source(&[], tmp.path()).load().unwrap().is_none());

        std::fs::write(tmp.path().join(".env"), "GOOGLE_API_KEY=\n").unwrap();
        assert!(source(&[], tmp.path()).load().unwrap().is_none());
    }

    #[test]
    fn test_dotenv_directory_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join(".env")).unwrap();
        let log = Arc::new(CapturingLog::default());
        let src = source_with_log(&[], tmp.path(), log.clone());
        assert!(src.load().unwrap().is_none());
        assert_eq!(*log.0.lock().unwrap(), vec!["dotenv skipped".to_string()]);
    }

    #[test]
    fn test_dotenv_directory_does_not_hide_environment() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join(".env")).unwrap();
        let src = source(&[("GOOGLE_API_KEY", "google")], tmp.path());
        assert_eq!(src.load().unwrap().unwrap().expose(), "google");
    }
}
