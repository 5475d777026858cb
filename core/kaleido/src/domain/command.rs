//! kaleido の実行モードと、対話ループへの 1 行入力の解釈

/// kaleido の実行モード
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KaleidoCommand {
    /// ヘルプ表示
    Help,
    /// 対話ループ（メッセージ未指定）
    Interactive,
    /// 1 回だけ質問して終了
    Ask { message: String },
    /// モデルを呼ばずに送信予定のプロンプトを表示
    DryRun { message: String },
}

/// 対話ループの 1 行入力
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplInput {
    /// 空行
    Empty,
    /// 通常の質問
    Message(String),
    /// /reset, /fresh
    Reset,
    /// /interest <slug>
    SetInterest(String),
    /// /language <slug>
    SetLanguage(String),
    /// /style <slug>
    SetStyle(String),
    /// /settings
    ShowSettings,
    /// /history
    History,
    /// /help
    Help,
    /// /quit, /exit
    Quit,
    /// 不明な /コマンド
    Unknown(String),
}

impl ReplInput {
    /// 1 行を解釈する。`/` で始まる行はコマンド、それ以外は質問。
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        let Some(command_line) = trimmed.strip_prefix('/') else {
            return Self::Message(trimmed.to_string());
        };
        let (name, arg) = match command_line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim().to_string()),
            None => (command_line, String::new()),
        };
        match name.to_lowercase().as_str() {
            "reset" | "fresh" => Self::Reset,
            "interest" => Self::SetInterest(arg),
            "language" | "lang" => Self::SetLanguage(arg),
            "style" => Self::SetStyle(arg),
            "settings" => Self::ShowSettings,
            "history" => Self::History,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            _ => Self::Unknown(format!("/{}", name)),
        }
    }
}
