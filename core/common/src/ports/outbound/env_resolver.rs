//! 環境変数解決 Outbound ポート
//!
//! 設定・ログのディレクトリや認証情報の環境変数を解決する。
//! usecase / adapter はこの trait 経由でのみ環境変数にアクセスする。

use crate::domain::Dirs;
use crate::error::Error;
use std::path::PathBuf;

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdEnvResolver` やテスト用のモックなど。
pub trait EnvResolver: Send + Sync {
    /// 環境変数を読む（未設定・空文字は None）
    fn var(&self, name: &str) -> Option<String>;

    /// config / state ディレクトリを解決する
    ///
    /// 優先順位:
    /// 1. KALEIDO_HOME（設定されていれば $KALEIDO_HOME/config, $KALEIDO_HOME/state）
    /// 2. $XDG_CONFIG_HOME/kaleido, $XDG_STATE_HOME/kaleido
    /// 3. $HOME/.config/kaleido, $HOME/.local/state/kaleido
    fn resolve_dirs(&self) -> Result<Dirs, Error>;

    /// カレントディレクトリを返す（.env 探索用）
    fn current_dir(&self) -> Result<PathBuf, Error>;
}
