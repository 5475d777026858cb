//! 配線: 標準アダプタで App を組み立てる
//!
//! 設定の解決順: ディレクトリ解決 → settings.json → CLI 上書き → 認証情報。
//! 認証情報が無いことは致命的ではない（モデル利用不可としてセッションを続ける）。

use std::io::Write;
use std::sync::Arc;

use common::adapter::{
    FileJsonLog, NoopLog, StderrLog, StdClock, StdEnvResolver, StdFileSystem, StdProcess, TeeLog,
};
use common::error::Error;
use common::llm::create_driver;
use common::ports::outbound::{Clock, EnvResolver, FileSystem, Log, LogLevel, LogRecord, Process};

use crate::adapter::{
    DriverModelClient, EnvCredentialSource, GraphvizDiagramSink, JsonSettingsLoader,
    StdinLineReader, TerminalTextSink,
};
use crate::cli::Config;
use crate::domain::{resolve_settings, Choice, SessionState, Settings};
use crate::ports::outbound::{CredentialSource, DiagramSink, LineReader, SettingsLoader, TextSink};
use crate::usecase::chat::{ChatUseCase, ModelAvailability};

/// 組み立て済みアプリケーション
pub struct App {
    pub chat: ChatUseCase,
    pub session: SessionState,
    pub text_sink: Box<dyn TextSink>,
    pub diagram_sink: Box<dyn DiagramSink>,
    pub line_reader: Box<dyn LineReader>,
    pub logger: Arc<dyn Log>,
}

/// OS 資源（ファイル・環境変数・プロセス・時刻）
pub struct Platform {
    pub fs: Arc<dyn FileSystem>,
    pub env: Arc<dyn EnvResolver>,
    pub process: Arc<dyn Process>,
    pub clock: Arc<dyn Clock>,
}

impl Platform {
    pub fn std() -> Self {
        Self {
            fs: Arc::new(StdFileSystem),
            env: Arc::new(StdEnvResolver),
            process: Arc::new(StdProcess),
            clock: Arc::new(StdClock),
        }
    }
}

/// 端末入出力
pub struct Terminal {
    pub text_sink: Box<dyn TextSink>,
    pub line_reader: Box<dyn LineReader>,
    /// ダイアグラム出力パスの表示先
    pub diagram_out: Box<dyn Write>,
}

impl Terminal {
    pub fn stdio() -> Self {
        Self {
            text_sink: Box::new(TerminalTextSink::stdio()),
            line_reader: Box::new(StdinLineReader::stdio()),
            diagram_out: Box::new(std::io::stdout()),
        }
    }
}

/// 配線: 標準アダプタで App を組み立てる
pub fn wire(config: &Config) -> Result<App, Error> {
    wire_with(config, Platform::std(), Terminal::stdio())
}

pub fn wire_with(config: &Config, platform: Platform, terminal: Terminal) -> Result<App, Error> {
    let dirs = platform.env.resolve_dirs().ok();

    let file_log: Arc<dyn Log> = match &dirs {
        Some(d) => Arc::new(FileJsonLog::new(Arc::clone(&platform.fs), d.log_file())),
        None => Arc::new(NoopLog),
    };
    let logger: Arc<dyn Log> = if config.verbose {
        Arc::new(TeeLog::new(vec![
            file_log,
            Arc::new(StderrLog::new()) as Arc<dyn Log>,
        ]))
    } else {
        file_log
    };

    let settings = match &dirs {
        Some(d) => JsonSettingsLoader::new(Arc::clone(&platform.fs), d.settings_file()).load()?,
        None => Settings::default(),
    };
    let default_diagram_dir = match &dirs {
        Some(d) => d.diagrams_dir(),
        None => platform.env.current_dir()?.join("diagrams"),
    };
    let resolved = resolve_settings(&settings, &config.overrides(), default_diagram_dir)?;
    let _ = logger.log(
        &LogRecord::new(LogLevel::Info, "wiring", "config", "settings resolved")
            .with_field("provider", resolved.provider.as_str())
            .with_field("model", resolved.model.clone().unwrap_or_default())
            .with_field("interest", resolved.persona.interest.slug())
            .with_field("language", resolved.persona.language.slug())
            .with_field("style", resolved.persona.style.slug())
            .with_field("diagram_format", resolved.diagram_format.as_str()),
    );

    let api_key = if resolved.provider.requires_api_key() {
        EnvCredentialSource::new(
            Arc::clone(&platform.env),
            Arc::clone(&platform.fs),
            resolved.api_key_envs.clone(),
            Arc::clone(&logger),
        )
        .load()?
    } else {
        None
    };
    let model = match create_driver(
        resolved.provider,
        resolved.model.clone(),
        api_key,
        resolved.temperature,
    ) {
        Ok(driver) => ModelAvailability::Ready(Arc::new(DriverModelClient::new(driver))),
        Err(e @ Error::Env(_)) => {
            let _ = logger.log(
                &LogRecord::new(LogLevel::Warn, "wiring", "config", "credential missing")
                    .with_field("looked_up", resolved.api_key_envs.join(", ")),
            );
            ModelAvailability::Unavailable(e)
        }
        Err(e) => return Err(e),
    };

    let diagram_sink = GraphvizDiagramSink::new(
        platform.fs,
        platform.process,
        platform.clock,
        resolved.diagram_dir.clone(),
        resolved.diagram_format,
        terminal.diagram_out,
    );

    Ok(App {
        chat: ChatUseCase::new(model, Arc::clone(&logger)),
        session: SessionState::new(resolved.persona),
        text_sink: terminal.text_sink,
        diagram_sink: Box::new(diagram_sink),
        line_reader: terminal.line_reader,
        logger,
    })
}
