//! Outbound ポート: アプリが外界（画面・ダイアグラム描画・モデル・入力・設定）を使うための trait

pub mod credential_source;
pub mod diagram_sink;
pub mod line_reader;
pub mod model_client;
pub mod settings_loader;
pub mod text_sink;

pub use credential_source::CredentialSource;
pub use diagram_sink::DiagramSink;
pub use line_reader::LineReader;
pub use model_client::ModelClient;
pub use settings_loader::SettingsLoader;
pub use text_sink::TextSink;
