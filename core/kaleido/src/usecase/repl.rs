//! 対話ループ（REPL）
//!
//! EOF か /quit まで 1 行ずつ読み、ReplInput に解釈して ChatUseCase へ振り分ける。

use crate::domain::{Choice, Interest, Language, LearningStyle, ReplInput, SessionState};
use crate::ports::outbound::{DiagramSink, LineReader, TextSink};
use crate::usecase::chat::ChatUseCase;
use common::error::Error;
use common::ports::outbound::{Log, LogLevel, LogRecord};
use std::sync::Arc;

const PROMPT: &str = "🌈 What is confusing you today? > ";

const HELP_LINES: &[&str] = &[
    "Commands:",
    "  <question>                Ask Kaleido to explain something",
    "  /interest <slug>          Change interest (bollywood, cricket, video-games, farming, cooking)",
    "  /language <slug>          Change language (hinglish, english, marathi-mix)",
    "  /style <slug>             Change learning style (stories-and-analogies, visual-flowcharts, code-examples)",
    "  /settings                 Show current settings",
    "  /history                  Show the conversation again",
    "  /reset, /fresh            Start fresh (clear the conversation)",
    "  /help                     Show this help",
    "  /quit, /exit              Leave Kaleido",
];

/// 対話ループ本体
pub struct Repl<'a> {
    chat: &'a ChatUseCase,
    log: Arc<dyn Log>,
}

impl<'a> Repl<'a> {
    pub fn new(chat: &'a ChatUseCase, log: Arc<dyn Log>) -> Self {
        Self { chat, log }
    }

    /// 起動表示のあと、入力が尽きるか /quit まで回す。処理したコマンド数を返す。
    pub fn run(
        &self,
        state: &mut SessionState,
        reader: &mut dyn LineReader,
        text_sink: &mut dyn TextSink,
        diagram_sink: &mut dyn DiagramSink,
    ) -> Result<usize, Error> {
        self.chat.banner(text_sink)?;
        self.chat.welcome(state, text_sink)?;

        let mut handled = 0;
        while let Some(line) = reader.read_line(PROMPT)? {
            let input = ReplInput::parse(&line);
            if input == ReplInput::Quit {
                break;
            }
            if input != ReplInput::Empty {
                handled += 1;
            }
            self.dispatch(input, state, text_sink, diagram_sink)?;
        }
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Info, "usecase", "lifecycle", "repl finished")
                .with_field("inputs", handled)
                .with_field("turns", state.history.len()),
        );
        Ok(handled)
    }

    fn dispatch(
        &self,
        input: ReplInput,
        state: &mut SessionState,
        text_sink: &mut dyn TextSink,
        diagram_sink: &mut dyn DiagramSink,
    ) -> Result<(), Error> {
        match input {
            ReplInput::Empty | ReplInput::Quit => {}
            ReplInput::Message(message) => {
                self.chat.submit(state, &message, text_sink, diagram_sink)?;
            }
            ReplInput::Reset => {
                self.chat.reset(state);
                text_sink.info("🗑️ Started fresh.")?;
                self.chat.welcome(state, text_sink)?;
            }
            ReplInput::SetInterest(slug) => {
                self.update(text_sink, Interest::from_slug(&slug), |i| state.persona.interest = i)?
            }
            ReplInput::SetLanguage(slug) => {
                self.update(text_sink, Language::from_slug(&slug), |l| state.persona.language = l)?
            }
            ReplInput::SetStyle(slug) => {
                self.update(text_sink, LearningStyle::from_slug(&slug), |s| state.persona.style = s)?
            }
            ReplInput::ShowSettings => self.chat.show_settings(state, text_sink)?,
            ReplInput::History => {
                self.chat.replay(state, text_sink, diagram_sink)?;
            }
            ReplInput::Help => {
                for line in HELP_LINES {
                    text_sink.info(line)?;
                }
            }
            ReplInput::Unknown(name) => {
                text_sink.error(&format!("Unknown command: {} (try /help)", name))?;
            }
        }
        Ok(())
    }

    /// ペルソナを 1 項目更新する。不正な slug は選択肢付きでインライン表示。
    fn update<C: Choice>(
        &self,
        text_sink: &mut dyn TextSink,
        parsed: Result<C, Error>,
        apply: impl FnOnce(C),
    ) -> Result<(), Error> {
        match parsed {
            Ok(choice) => {
                apply(choice);
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Info, "usecase", "persona", "persona changed")
                        .with_field(C::KIND, choice.slug()),
                );
                text_sink.info(&format!("✅ {} set to {}", C::KIND, choice.label()))
            }
            Err(e) => text_sink.error(&e.to_string()),
        }
    }
}
