//! 対話入力 Outbound ポート

use common::error::Error;

/// 1 行ずつ入力を読む。EOF なら None。
pub trait LineReader {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, Error>;
}
