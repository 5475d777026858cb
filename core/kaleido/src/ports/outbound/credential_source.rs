//! 認証情報 Outbound ポート

use common::domain::ApiKey;
use common::error::Error;

/// モデル呼び出し用の API キーを探す
///
/// 見つからないことはエラーではない（Ok(None)）。読み取り自体の失敗のみ Err。
pub trait CredentialSource {
    fn load(&self) -> Result<Option<ApiKey>, Error>;
}
