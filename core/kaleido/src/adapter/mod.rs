pub(crate) mod env_credential_source;
pub(crate) mod graphviz_diagram_sink;
pub(crate) mod json_settings_loader;
pub(crate) mod model_client;
pub(crate) mod stdin_line_reader;
pub(crate) mod terminal_text_sink;
pub(crate) use env_credential_source::EnvCredentialSource;
pub(crate) use graphviz_diagram_sink::GraphvizDiagramSink;
pub(crate) use json_settings_loader::JsonSettingsLoader;
pub(crate) use model_client::DriverModelClient;
pub(crate) use stdin_line_reader::StdinLineReader;
pub(crate) use terminal_text_sink::TerminalTextSink;
