//! Geminiプロバイダの実装（generateContent、非ストリーミング）

use crate::domain::ApiKey;
use crate::error::Error;
use crate::llm::provider::LlmProvider;
use serde_json::{json, Value};

/// 既定モデル
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-flash-latest";

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Geminiプロバイダ
pub struct GeminiProvider {
    model: String,
    api_key: ApiKey,
    temperature: Option<f32>,
    client: reqwest::blocking::Client,
}

impl GeminiProvider {
    /// 新しいGeminiプロバイダを作成
    ///
    /// # Arguments
    /// * `model` - モデル名（デフォルト: "gemini-flash-latest"）
    /// * `api_key` - 認証情報（設定層で解決済みのもの）
    /// * `temperature` - 生成温度（None のときは API 既定）
    pub fn new(model: Option<String>, api_key: ApiKey, temperature: Option<f32>) -> Self {
        Self {
            model: model.unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            api_key,
            temperature,
            client: reqwest::blocking::Client::new(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", GEMINI_BASE_URL, self.model)
    }

    /// エラーレスポンスからメッセージを取り出す（JSON でなければ本文をそのまま使う）
    fn api_error_message(status: reqwest::StatusCode, body: &str) -> String {
        serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v["error"]["message"].as_str().map(|s| s.to_string()))
            .unwrap_or_else(|| format!("HTTP {}: {}", status, body))
    }
}

impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn make_request_payload(&self, instruction: &str) -> Result<Value, Error> {
        let mut payload = json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": instruction}]
            }]
        });
        if let Some(t) = self.temperature {
            payload["generationConfig"] = json!({ "temperature": t });
        }
        Ok(payload)
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        // キーは URL に載せない（reqwest のエラー表示に URL が含まれるため）
        let response = self
            .client
            .post(self.endpoint())
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", self.api_key.expose())
            .body(request_json.to_string())
            .send()
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let response_text = response
            .text()
            .map_err(|e| Error::http(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(Error::http(format!(
                "Gemini API error: {}",
                Self::api_error_message(status, &response_text)
            )));
        }

        Ok(response_text)
    }

    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error> {
        let v: Value = serde_json::from_str(response_json)
            .map_err(|e| Error::json(format!("Failed to parse response JSON: {}", e)))?;

        if let Some(error) = v.get("error") {
            let error_msg = error["message"].as_str().unwrap_or("Unknown error");
            return Err(Error::http(format!("Gemini API error: {}", error_msg)));
        }

        if let Some(reason) = v["promptFeedback"]["blockReason"].as_str() {
            return Err(Error::http(format!("Gemini blocked the prompt: {}", reason)));
        }

        // 複数 part に分かれて返ることがあるので連結する
        let text = v["candidates"][0]["content"]["parts"]
            .as_array()
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|part| part["text"].as_str())
                    .collect::<String>()
            })
            .filter(|s| !s.is_empty());

        Ok(text)
    }
}
