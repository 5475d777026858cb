//! 混在コンテンツの描画
//!
//! 応答を RenderedBlock に分割し、区間ごとにテキスト sink / ダイアグラム sink へ順に流す。
//! 呼び出しごとに状態を持たない。ダイアグラム sink の失敗はそのまま返す。

use crate::domain::{RenderedBlock, Segment};
use crate::ports::outbound::{DiagramSink, TextSink};
use common::error::Error;

pub fn render_content(
    content: &str,
    text_sink: &mut dyn TextSink,
    diagram_sink: &mut dyn DiagramSink,
) -> Result<RenderedBlock, Error> {
    let block = RenderedBlock::parse(content);
    for segment in block.segments() {
        match segment {
            Segment::Text(text) => text_sink.text(text)?,
            Segment::Diagram(source) => diagram_sink.diagram(source)?,
        }
    }
    Ok(block)
}
