//! テキスト表示 Outbound ポート

use crate::domain::Role;
use common::error::Error;

/// 会話テキストと状態表示の出力先
///
/// 実装は adapter::TerminalTextSink（stdout / stderr）やテスト用の記録 sink。
pub trait TextSink {
    /// ターン表示の開始（発話者の見出し）
    fn begin_turn(&mut self, role: Role) -> Result<(), Error>;
    /// 会話本文の 1 区間（空文字もそのまま渡される）
    fn text(&mut self, text: &str) -> Result<(), Error>;
    /// 案内・設定表示
    fn info(&mut self, text: &str) -> Result<(), Error>;
    /// 一時的な状態表示（"Thinking..." 等）
    fn status(&mut self, text: &str) -> Result<(), Error>;
    /// インラインのエラー表示
    fn error(&mut self, text: &str) -> Result<(), Error>;
}
