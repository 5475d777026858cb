//! Ports & Adapters のポート定義
//!
//! - inbound: ドライバ（CLI）がアプリを呼び出すインターフェース
//! - outbound: アプリが外界（画面・ダイアグラム描画・モデル・入力・設定）を使うための trait

pub mod inbound;
pub mod outbound;
