//! Echoプロバイダの実装
//!
//! このプロバイダは実際にLLM APIを呼び出さず、決まった応答を返すだけです。
//! APIキーなしでの動作確認やテスト用に使用します。

use crate::error::Error;
use crate::llm::provider::LlmProvider;
use serde_json::{json, Value};

/// 指示文にこの語が含まれていればダイアグラム付きで応答する
const DIAGRAM_HINT: &str = "Graphviz DOT";

/// Echoプロバイダ
#[derive(Debug, Clone, Default)]
pub struct EchoProvider;

impl EchoProvider {
    /// 新しいEchoプロバイダを作成
    pub fn new() -> Self {
        Self
    }
}

impl LlmProvider for EchoProvider {
    fn name(&self) -> &str {
        "echo"
    }

    fn make_request_payload(&self, instruction: &str) -> Result<Value, Error> {
        Ok(json!({ "query": instruction }))
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        // 実際のAPI呼び出しは行わず、リクエストをそのまま包んで返す
        let request: Value = serde_json::from_str(request_json)?;
        Ok(json!({ "echo": request["query"] }).to_string())
    }

    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error> {
        let v: Value = serde_json::from_str(response_json)?;
        let query = v["echo"].as_str().unwrap_or("");
        let mut text = String::from("[Echo Provider] Query received (no actual LLM call made)");
        if query.contains(DIAGRAM_HINT) {
            text.push_str("\n```dot\ndigraph Echo {\n  Question -> Answer;\n}\n```\n");
            text.push_str("[Echo Provider] Diagram attached.");
        }
        Ok(Some(text))
    }
}
