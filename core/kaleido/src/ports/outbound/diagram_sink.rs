//! ダイアグラム描画 Outbound ポート

use common::error::Error;

/// ダイアグラム記述（Graphviz DOT）を受け取って描画する
///
/// 記述の構文は呼び出し側で検証しない。描画できなければ Error::Render。
pub trait DiagramSink {
    fn diagram(&mut self, source: &str) -> Result<(), Error>;
}
