//! Inbound ポート: ドライバ（CLI）がアプリを呼び出すインターフェース

use crate::cli::Config;
use common::error::Error;

/// kaleido アプリケーションを実行する Inbound ポート
///
/// main はこの trait を実装した型（Runner）の run を呼び出し、戻り値を終了コードにする。
/// 対話ループがセッション状態を更新するため `&mut self` を取る。
pub trait UseCaseRunner {
    fn run(&mut self, config: Config) -> Result<i32, Error>;
}
