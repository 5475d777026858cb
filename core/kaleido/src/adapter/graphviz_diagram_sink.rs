//! Graphviz（dot コマンド）によるダイアグラム描画
//!
//! 記述を `<dir>/diagram-<ms>-<n>.dot` に保存し、`dot -T<format> <in> -o <out>` で画像にする。
//! 成功時は出力パスを表示する。

use crate::domain::DiagramFormat;
use crate::ports::outbound::DiagramSink;
use common::error::Error;
use common::ports::outbound::{Clock, FileSystem, Process};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

const DOT_PROGRAM: &str = "dot";

pub struct GraphvizDiagramSink<W: Write> {
    fs: Arc<dyn FileSystem>,
    process: Arc<dyn Process>,
    clock: Arc<dyn Clock>,
    dir: PathBuf,
    format: DiagramFormat,
    program: PathBuf,
    /// 同一ミリ秒内の衝突回避
    seq: u64,
    out: W,
}

impl<W: Write> GraphvizDiagramSink<W> {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        process: Arc<dyn Process>,
        clock: Arc<dyn Clock>,
        dir: PathBuf,
        format: DiagramFormat,
        out: W,
    ) -> Self {
        Self {
            fs,
            process,
            clock,
            dir,
            format,
            program: PathBuf::from(DOT_PROGRAM),
            seq: 0,
            out,
        }
    }

    #[cfg(test)]
    pub fn into_out(self) -> W {
        self.out
    }
}

impl<W: Write> DiagramSink for GraphvizDiagramSink<W> {
    fn diagram(&mut self, source: &str) -> Result<(), Error> {
        self.fs.create_dir_all(&self.dir)?;
        self.seq += 1;
        let stem = format!("diagram-{}-{}", self.clock.now_ms(), self.seq);
        let input = self.dir.join(format!("{}.dot", stem));
        let output = self.dir.join(format!("{}.{}", stem, self.format.as_str()));
        self.fs.write(&input, source)?;

        let args = vec![
            format!("-T{}", self.format.as_str()),
            input.display().to_string(),
            "-o".to_string(),
            output.display().to_string(),
        ];
        let code = self
            .process
            .run(&self.program, &args)
            .map_err(|e| Error::render(format!("Graphviz is not available: {}", e)))?;
        if code != 0 {
            return Err(Error::render(format!(
                "dot exited with status {} (source kept at {})",
                code,
                input.display()
            )));
        }

        writeln!(self.out, "📊 Diagram: {}", output.display())
            .and_then(|_| self.out.flush())
            .map_err(|e| Error::io_msg(e.to_string()))
    }
}
