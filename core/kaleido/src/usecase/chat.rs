//! チャットセッションのユースケース
//!
//! 1 回の送信: user ターン追加 → 表示 → "Thinking..." → モデル呼び出し → assistant ターン追加 → 描画。
//! モデルへは直近の質問だけを送り、履歴は送らない。

use crate::domain::{Choice, Role, SessionState};
use crate::ports::outbound::{DiagramSink, ModelClient, TextSink};
use crate::usecase::prompt::build_prompt;
use crate::usecase::renderer::render_content;
use common::error::Error;
use common::ports::outbound::{Log, LogLevel, LogRecord};
use std::sync::Arc;

/// 起動時に決まるモデルの利用可否
pub enum ModelAvailability {
    Ready(Arc<dyn ModelClient>),
    /// 認証情報が無い等。セッション中はモデルを呼ばない。
    Unavailable(Error),
}

/// submit の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 空入力のため何もしなかった
    Ignored,
    Answered,
    /// 応答は保存済みだがダイアグラム描画に失敗した
    AnsweredWithRenderError(Error),
    /// モデル呼び出しに失敗（または利用不可）。user ターンは残る。
    Failed(Error),
}

pub struct ChatUseCase {
    model: ModelAvailability,
    log: Arc<dyn Log>,
}

impl ChatUseCase {
    pub fn new(model: ModelAvailability, log: Arc<dyn Log>) -> Self {
        Self { model, log }
    }

    /// 起動時の設定エラー（あれば）
    pub fn config_error(&self) -> Option<&Error> {
        match &self.model {
            ModelAvailability::Ready(_) => None,
            ModelAvailability::Unavailable(e) => Some(e),
        }
    }

    fn provider_name(&self) -> &str {
        match &self.model {
            ModelAvailability::Ready(client) => client.name(),
            ModelAvailability::Unavailable(_) => "unavailable",
        }
    }

    /// 質問を 1 つ送る
    ///
    /// Err を返すのはテキスト sink への書き込み自体に失敗したときだけ。
    /// モデル・描画の失敗はインライン表示して SubmitOutcome で返す。
    pub fn submit(
        &self,
        state: &mut SessionState,
        message: &str,
        text_sink: &mut dyn TextSink,
        diagram_sink: &mut dyn DiagramSink,
    ) -> Result<SubmitOutcome, Error> {
        if message.trim().is_empty() {
            return Ok(SubmitOutcome::Ignored);
        }

        state.history.push_user(message);
        text_sink.begin_turn(Role::User)?;
        text_sink.text(message)?;
        text_sink.status("Thinking...")?;

        let client = match &self.model {
            ModelAvailability::Ready(client) => client,
            ModelAvailability::Unavailable(e) => {
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Warn, "usecase", "config", "model unavailable")
                        .with_field("error", e.to_string()),
                );
                text_sink.error(&format!("⚠️ {}", e))?;
                return Ok(SubmitOutcome::Failed(e.clone()));
            }
        };

        let prompt = build_prompt(&state.persona, message);
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Info, "usecase", "generation", "generation started")
                .with_field("provider", client.name())
                .with_field("interest", state.persona.interest.slug())
                .with_field("language", state.persona.language.slug())
                .with_field("style", state.persona.style.slug())
                .with_field("prompt_chars", prompt.chars().count()),
        );

        let reply = match client.generate(&prompt) {
            Ok(reply) => reply,
            Err(e) => {
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Error, "usecase", "generation", "generation failed")
                        .with_field("provider", client.name())
                        .with_field("error", e.to_string()),
                );
                text_sink.error(&format!("Error: {}", e))?;
                return Ok(SubmitOutcome::Failed(e));
            }
        };

        state.history.push_assistant(reply.as_str());
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Info, "usecase", "generation", "generation succeeded")
                .with_field("provider", client.name())
                .with_field("reply_chars", reply.chars().count()),
        );

        text_sink.begin_turn(Role::Assistant)?;
        match self.render_turn(&reply, text_sink, diagram_sink) {
            Ok(()) => Ok(SubmitOutcome::Answered),
            Err(e) => Ok(SubmitOutcome::AnsweredWithRenderError(e)),
        }
    }

    /// 応答を描画する。失敗はインライン表示してから返す。
    fn render_turn(
        &self,
        content: &str,
        text_sink: &mut dyn TextSink,
        diagram_sink: &mut dyn DiagramSink,
    ) -> Result<(), Error> {
        match render_content(content, text_sink, diagram_sink) {
            Ok(block) => {
                if block.has_diagram() {
                    let _ = self.log.log(&LogRecord::new(
                        LogLevel::Info,
                        "usecase",
                        "render",
                        "diagram rendered",
                    ));
                }
                Ok(())
            }
            Err(e) => {
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Warn, "usecase", "render", "diagram failed")
                        .with_field("error", e.to_string()),
                );
                text_sink.error(&format!("Diagram error: {}", e))?;
                Err(e)
            }
        }
    }

    /// 保存済みの全ターンを順に再表示する。ターンごとに描画失敗を閉じ込めて続行する。
    ///
    /// 描画に失敗したターン数を返す。
    pub fn replay(
        &self,
        state: &SessionState,
        text_sink: &mut dyn TextSink,
        diagram_sink: &mut dyn DiagramSink,
    ) -> Result<usize, Error> {
        if state.history.is_empty() {
            text_sink.info("No conversation yet.")?;
            return Ok(0);
        }
        let mut failures = 0;
        for turn in state.history.turns() {
            text_sink.begin_turn(turn.role())?;
            match turn.role() {
                Role::User => text_sink.text(turn.content())?,
                Role::Assistant => {
                    if self.render_turn(turn.content(), text_sink, diagram_sink).is_err() {
                        failures += 1;
                    }
                }
            }
        }
        Ok(failures)
    }

    /// 履歴を全消去する（何度呼んでも同じ）
    pub fn reset(&self, state: &mut SessionState) {
        let cleared = state.history.len();
        state.history.clear();
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Info, "usecase", "history", "history reset")
                .with_field("cleared_turns", cleared),
        );
    }

    /// タイトル表示。設定エラーがあればバナーも出す。
    pub fn banner(&self, text_sink: &mut dyn TextSink) -> Result<(), Error> {
        text_sink.info("Kaleido 🌈")?;
        text_sink.info("The AI Tutor that adapts to YOU.")?;
        if let Some(e) = self.config_error() {
            text_sink.error(&format!("⚠️ {}", e))?;
        }
        Ok(())
    }

    /// 履歴が空のときだけ歓迎パネルを出す
    pub fn welcome(&self, state: &SessionState, text_sink: &mut dyn TextSink) -> Result<(), Error> {
        if !state.history.is_empty() {
            return Ok(());
        }
        text_sink.info(&format!(
            "👋 Welcome! I am ready to teach you in {} using {} analogies.",
            state.persona.language.label(),
            state.persona.interest.label()
        ))?;
        text_sink.info("💡 Try asking:")?;
        for example in ["How does the Internet work?", "Explain Gravity", "What is Inflation?"] {
            text_sink.info(&format!("   {}", example))?;
        }
        text_sink.info("🚀 Features:")?;
        text_sink.info("   - Analogy Engine: Learn via Cricket/Movies")?;
        text_sink.info("   - Visual Mode: Ask for flowcharts (/style visual-flowcharts)")?;
        text_sink.info("   - Hinglish: I speak your language")?;
        Ok(())
    }

    /// 現在のペルソナと会話状況を表示する
    pub fn show_settings(&self, state: &SessionState, text_sink: &mut dyn TextSink) -> Result<(), Error> {
        text_sink.info("Settings ⚙️")?;
        text_sink.info(&format!(
            "   ❤️ Interest: {} ({})",
            state.persona.interest.label(),
            state.persona.interest.slug()
        ))?;
        text_sink.info(&format!(
            "   🗣️ Language: {} ({})",
            state.persona.language.label(),
            state.persona.language.slug()
        ))?;
        text_sink.info(&format!(
            "   🧠 Learning Style: {} ({})",
            state.persona.style.label(),
            state.persona.style.slug()
        ))?;
        text_sink.info(&format!("   Provider: {}", self.provider_name()))?;
        text_sink.info(&format!(
            "   Turns: {} ({} unanswered)",
            state.history.len(),
            state.history.unanswered_count()
        ))?;
        Ok(())
    }

    /// 送信されるはずのプロンプト（--dry-run 用）
    pub fn preview_prompt(&self, state: &SessionState, message: &str) -> String {
        build_prompt(&state.persona, message)
    }
}
