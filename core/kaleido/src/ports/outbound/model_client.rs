//! テキスト生成モデル Outbound ポート

use common::error::Error;

/// プロンプト 1 つを送り、応答テキストを 1 つ受け取る（同期・リトライなし）
pub trait ModelClient: Send + Sync {
    /// ログ用のプロバイダ名
    fn name(&self) -> &str;
    fn generate(&self, prompt: &str) -> Result<String, Error>;
}
