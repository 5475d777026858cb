//! 応答テキストの分割結果（前文・ダイアグラム・後文）
//!
//! 応答に埋め込まれた ```dot フェンスを 1 つだけ探し、表示用の区間に分ける。
//! 走査は 2 状態: 開始フェンスを探す段階と、開始フェンスの後ろで終了フェンスを探す段階。
//!
//! - 開始フェンスが無い: 全文が前文
//! - 最初の開始フェンスで分割し、その後ろの最初の終了フェンスで本文と後文に分ける
//! - 終了フェンスが無い: 後文なし（エラーにしない）
//! - 2 つ目以降の ```dot ブロックは後文の一部としてそのまま残す
//!
//! ダイアグラム本文の構文は検証しない。

/// ダイアグラム開始フェンス
pub const DIAGRAM_OPEN_FENCE: &str = "```dot";
/// フェンス終端
pub const FENCE_CLOSE: &str = "```";

/// 表示区間
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// 通常テキスト
    Text(&'a str),
    /// ダイアグラム記述（DOT）
    Diagram(&'a str),
}

/// 1 つの応答を分割した結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBlock {
    pub preface: String,
    pub diagram_source: Option<String>,
    pub trailing: Option<String>,
}

impl RenderedBlock {
    /// 応答テキストを分割する
    pub fn parse(content: &str) -> Self {
        let Some((preface, remainder)) = content.split_once(DIAGRAM_OPEN_FENCE) else {
            return Self {
                preface: content.to_string(),
                diagram_source: None,
                trailing: None,
            };
        };

        let (diagram_source, trailing) = split_at_closing_fence(strip_fence_line_break(remainder));
        Self {
            preface: preface.to_string(),
            diagram_source: Some(diagram_source.to_string()),
            trailing: trailing.map(str::to_string),
        }
    }

    pub fn has_diagram(&self) -> bool {
        self.diagram_source.is_some()
    }

    /// 表示順の区間列（前文 → ダイアグラム → 後文）。前文は空でも必ず含む。
    pub fn segments(&self) -> Vec<Segment<'_>> {
        let mut segments = vec![Segment::Text(self.preface.as_str())];
        if let Some(source) = &self.diagram_source {
            segments.push(Segment::Diagram(source.as_str()));
        }
        if let Some(trailing) = &self.trailing {
            segments.push(Segment::Text(trailing.as_str()));
        }
        segments
    }
}

/// 開始フェンス行の改行（`\n` または `\r\n` 1 つ）はフェンス側に属する
fn strip_fence_line_break(remainder: &str) -> &str {
    remainder
        .strip_prefix("\r\n")
        .or_else(|| remainder.strip_prefix('\n'))
        .unwrap_or(remainder)
}

/// 最初の終了フェンスで (本文, 後文) に分ける。終了フェンスが無ければ後文は None。
fn split_at_closing_fence(remainder: &str) -> (&str, Option<&str>) {
    match remainder.split_once(FENCE_CLOSE) {
        Some((source, trailing)) => (source, Some(trailing)),
        None => (remainder, None),
    }
}
