//! 設定読み込み Outbound ポート

use crate::domain::Settings;
use common::error::Error;

/// settings.json を読む。ファイルが無ければ既定値、不正なら Error::Config。
pub trait SettingsLoader {
    fn load(&self) -> Result<Settings, Error>;
}
