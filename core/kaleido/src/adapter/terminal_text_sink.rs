//! 端末へのテキスト表示
//!
//! 会話本文・案内は stdout、状態表示・エラーは stderr に出す。

use crate::domain::Role;
use crate::ports::outbound::TextSink;
use common::error::Error;
use std::io::{self, Write};

/// Writer 2 本（本文用・状態用）に書き分ける TextSink 実装
pub struct TerminalTextSink<O: Write, E: Write> {
    out: O,
    err: E,
}

impl TerminalTextSink<io::Stdout, io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> TerminalTextSink<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (O, E) {
        (self.out, self.err)
    }
}

fn write_line(w: &mut dyn Write, text: &str) -> Result<(), Error> {
    let written = if text.ends_with('\n') {
        write!(w, "{}", text)
    } else {
        writeln!(w, "{}", text)
    };
    written
        .and_then(|_| w.flush())
        .map_err(|e| Error::io_msg(format!("Failed to write to terminal: {}", e)))
}

impl<O: Write, E: Write> TextSink for TerminalTextSink<O, E> {
    fn begin_turn(&mut self, role: Role) -> Result<(), Error> {
        let heading = match role {
            Role::User => "\n🧑 You:",
            Role::Assistant => "\n🌈 Kaleido:",
        };
        write_line(&mut self.out, heading)
    }

    fn text(&mut self, text: &str) -> Result<(), Error> {
        // 本文前後の空区間（フェンス直前・直後）は行を増やさない
        if text.trim().is_empty() {
            return Ok(());
        }
        write_line(&mut self.out, text)
    }

    fn info(&mut self, text: &str) -> Result<(), Error> {
        write_line(&mut self.out, text)
    }

    fn status(&mut self, text: &str) -> Result<(), Error> {
        write_line(&mut self.err, &format!("⏳ {}", text))
    }

    fn error(&mut self, text: &str) -> Result<(), Error> {
        write_line(&mut self.err, text)
    }
}
