//! エラーハンドリング
//!
//! 全レイヤー共通のエラー型。バリアントごとに終了コード（sysexits 準拠）を持つ。

/// 共通エラー型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// 引数・入力の不正（usage を表示する）
    #[error("{0}")]
    InvalidArgument(String),
    /// ダイアグラム描画の失敗
    #[error("{0}")]
    Render(String),
    /// HTTP / API エラー（ネットワーク・クォータ等）
    #[error("{0}")]
    Http(String),
    /// 内部エラー
    #[error("{0}")]
    System(String),
    /// ファイル・プロセス I/O
    #[error("{0}")]
    Io(String),
    /// JSON のパース・生成失敗
    #[error("{0}")]
    Json(String),
    /// 環境変数・認証情報の欠如
    #[error("{0}")]
    Env(String),
    /// 設定ファイルの不正
    #[error("{0}")]
    Config(String),
}

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    pub fn system(msg: impl Into<String>) -> Self {
        Self::System(msg.into())
    }

    pub fn io_msg(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Self::Json(msg.into())
    }

    pub fn env(msg: impl Into<String>) -> Self {
        Self::Env(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// usage を併せて表示すべきエラーか
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// プロセス終了コード
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) => 64,
            Self::Render(_) => 65,
            Self::Http(_) => 69,
            Self::System(_) => 70,
            Self::Io(_) | Self::Json(_) => 74,
            Self::Env(_) | Self::Config(_) => 78,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}
