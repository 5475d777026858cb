//! 標準環境変数解決実装（std::env を委譲）

use crate::domain::Dirs;
use crate::error::Error;
use crate::ports::outbound::EnvResolver;
use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "kaleido";

/// 標準環境変数解決実装
#[derive(Debug, Clone, Default)]
pub struct StdEnvResolver;

impl StdEnvResolver {
    /// 環境変数の読み取り関数から Dirs を組み立てる（テストで差し替えられるよう分離）
    fn dirs_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Dirs, Error> {
        if let Some(home) = lookup("KALEIDO_HOME") {
            let home = PathBuf::from(home);
            return Ok(Dirs {
                config_dir: home.join("config"),
                state_dir: home.join("state"),
            });
        }

        let user_home = lookup("HOME").map(PathBuf::from);
        let base = |xdg: &str, fallback: &[&str]| -> Result<PathBuf, Error> {
            lookup(xdg)
                .map(PathBuf::from)
                .or_else(|| {
                    user_home.as_ref().map(|h| {
                        let mut p = h.clone();
                        p.extend(fallback);
                        p
                    })
                })
                .ok_or_else(|| Error::env("HOME is not set"))
        };

        Ok(Dirs {
            config_dir: base("XDG_CONFIG_HOME", &[".config"])?.join(APP_DIR),
            state_dir: base("XDG_STATE_HOME", &[".local", "state"])?.join(APP_DIR),
        })
    }
}

impl EnvResolver for StdEnvResolver {
    fn var(&self, name: &str) -> Option<String> {
        env::var(name).ok().filter(|s| !s.is_empty())
    }

    fn resolve_dirs(&self) -> Result<Dirs, Error> {
        Self::dirs_from(|name| self.var(name))
    }

    fn current_dir(&self) -> Result<PathBuf, Error> {
        env::current_dir()
            .map_err(|e| Error::io_msg(format!("Failed to get current directory: {}", e)))
    }
}
