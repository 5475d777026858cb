//! 標準入力から 1 行ずつ読む LineReader 実装

use crate::ports::outbound::LineReader;
use common::error::Error;
use std::io::{self, BufRead, Write};

/// 入力元とプロンプト表示先を持つ LineReader
pub struct StdinLineReader<R: BufRead, W: Write> {
    input: R,
    prompt_out: W,
}

impl StdinLineReader<io::StdinLock<'static>, io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> StdinLineReader<R, W> {
    pub fn new(input: R, prompt_out: W) -> Self {
        Self { input, prompt_out }
    }
}

impl<R: BufRead, W: Write> LineReader for StdinLineReader<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, Error> {
        write!(self.prompt_out, "\n{}", prompt)
            .and_then(|_| self.prompt_out.flush())
            .map_err(|e| Error::io_msg(e.to_string()))?;

        // 不正な UTF-8 は置換文字にして読み進める
        let mut buf = Vec::new();
        let n = self
            .input
            .read_until(b'\n', &mut buf)
            .map_err(|e| Error::io_msg(format!("Failed to read input: {}", e)))?;
        if n == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }
}
